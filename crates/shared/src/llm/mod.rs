pub mod catalog;
pub mod client;
pub mod pathgen;
pub mod resolver;
pub mod sanitize;

pub use catalog::{CatalogFuture, LegacyCatalog, ModelCatalog, ModernCatalog, default_catalogs};
pub use client::{DEFAULT_API_BASE_URL, GeminiClient, GeminiConfig, GeminiError, ModelDescriptor};
pub use pathgen::{GeneratePathError, PathGenerator};
pub use resolver::{FALLBACK_MODEL, PREFERRED_MODEL_FAMILY, ResolvedModel, resolve_model};
pub use sanitize::{ParseFailure, sanitize_json};
