use std::future::Future;
use std::pin::Pin;

use super::client::{ApiVersion, GeminiClient, GeminiError, ModelDescriptor};

const LIST_PAGE_SIZE: u32 = 50;

pub type CatalogFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<ModelDescriptor>, GeminiError>> + Send + 'a>>;

/// One model-discovery strategy, fixed at construction time. The resolver
/// walks an ordered chain of these instead of probing the provider client
/// for capabilities at runtime.
pub trait ModelCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    fn list_models<'a>(&'a self) -> CatalogFuture<'a>;
}

/// Paginated listing on the v1beta surface, the shape current client
/// libraries expose.
pub struct ModernCatalog {
    client: GeminiClient,
}

impl ModernCatalog {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl ModelCatalog for ModernCatalog {
    fn name(&self) -> &'static str {
        "v1beta"
    }

    fn list_models<'a>(&'a self) -> CatalogFuture<'a> {
        Box::pin(async move {
            self.client
                .list_models(ApiVersion::V1Beta, Some(LIST_PAGE_SIZE))
                .await
        })
    }
}

/// Unpaginated listing on the v1 surface, matching older client libraries.
pub struct LegacyCatalog {
    client: GeminiClient,
}

impl LegacyCatalog {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl ModelCatalog for LegacyCatalog {
    fn name(&self) -> &'static str {
        "v1"
    }

    fn list_models<'a>(&'a self) -> CatalogFuture<'a> {
        Box::pin(async move { self.client.list_models(ApiVersion::V1, None).await })
    }
}

/// The production discovery chain, in strict priority order.
pub fn default_catalogs(client: &GeminiClient) -> Vec<Box<dyn ModelCatalog>> {
    vec![
        Box::new(ModernCatalog::new(client.clone())),
        Box::new(LegacyCatalog::new(client.clone())),
    ]
}
