use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the front-end bundle from disk. Any path that does not match a
/// real file falls back to the SPA entry document so client-side routing can
/// take over.
pub(super) fn spa_site(public_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}
