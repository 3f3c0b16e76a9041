use tracing::{info, warn};

use super::catalog::ModelCatalog;
use super::client::{GeminiClient, ModelDescriptor};

/// Substring marking the model generation preferred during discovery.
pub const PREFERRED_MODEL_FAMILY: &str = "gemini-2.5";

/// Fixed identifier adopted when discovery selects nothing.
pub const FALLBACK_MODEL: &str = "models/gemini-2.5-flash";

/// The model identifier chosen at startup. Produced at most once per process
/// and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub name: String,
}

/// Best-effort one-shot model resolution.
///
/// Attempts the first catalog in the chain exactly once, preferring a
/// [`PREFERRED_MODEL_FAMILY`] identifier, then the first listed model, then
/// [`FALLBACK_MODEL`]. The chosen identifier must pass a usability probe
/// before it is adopted. Every failure along the way degrades to the next
/// step and ultimately to `None`; nothing here is fatal.
pub async fn resolve_model(
    client: Option<&GeminiClient>,
    catalogs: &[Box<dyn ModelCatalog>],
) -> Option<ResolvedModel> {
    let Some(client) = client else {
        info!("no provider credential configured, serving demo mode");
        return None;
    };

    let discovered = match catalogs.first() {
        Some(catalog) => match catalog.list_models().await {
            Ok(models) => {
                info!(
                    "discovered {} models via the {} listing",
                    models.len(),
                    catalog.name()
                );
                select_identifier(&models)
            }
            Err(err) => {
                warn!("model listing via {} failed: {err}", catalog.name());
                None
            }
        },
        None => None,
    };

    let name = discovered.unwrap_or_else(|| {
        info!("falling back to guessed model {FALLBACK_MODEL}");
        FALLBACK_MODEL.to_string()
    });

    match client.fetch_model(&name).await {
        Ok(_) => {
            info!("generative model initialized: {name}");
            Some(ResolvedModel { name })
        }
        Err(err) => {
            warn!("model {name} is not usable, serving demo mode: {err}");
            None
        }
    }
}

fn select_identifier(models: &[ModelDescriptor]) -> Option<String> {
    models
        .iter()
        .find(|model| model.name.contains(PREFERRED_MODEL_FAMILY))
        .or_else(|| models.first())
        .map(|model| model.name.clone())
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::{PREFERRED_MODEL_FAMILY, select_identifier};
    use crate::llm::client::ModelDescriptor;

    fn descriptor(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            metadata: Map::new(),
        }
    }

    #[test]
    fn select_identifier_prefers_the_preferred_family() {
        let models = vec![
            descriptor("models/gemini-1.5-pro"),
            descriptor("models/gemini-2.5-flash"),
            descriptor("models/gemini-2.5-pro"),
        ];

        let selected = select_identifier(&models).expect("selection should succeed");
        assert!(selected.contains(PREFERRED_MODEL_FAMILY));
        assert_eq!(selected, "models/gemini-2.5-flash");
    }

    #[test]
    fn select_identifier_takes_the_first_model_without_a_family_match() {
        let models = vec![
            descriptor("models/gemini-1.5-pro"),
            descriptor("models/text-bison-001"),
        ];

        assert_eq!(
            select_identifier(&models).as_deref(),
            Some("models/gemini-1.5-pro")
        );
    }

    #[test]
    fn select_identifier_yields_nothing_for_an_empty_listing() {
        assert_eq!(select_identifier(&[]), None);
    }
}
