use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;
use url::form_urlencoded;

use super::client::{GeminiClient, GeminiError};
use super::resolver::ResolvedModel;
use super::sanitize::sanitize_json;
use crate::models::{GenerationMode, GenerationResult, LearningModule, LearningResource};

/// The two failures a caller ever sees. Everything else (missing credential,
/// missing model, undecodable output) degrades to a successful lower-fidelity
/// result.
#[derive(Debug, Error)]
pub enum GeneratePathError {
    #[error("Skills are required")]
    EmptySkills,
    #[error("{0}")]
    Provider(#[from] GeminiError),
}

/// Turns a skills string into a learning path using the model resolved at
/// startup, or canned content when none is available.
pub struct PathGenerator {
    client: Option<GeminiClient>,
    resolved: Option<ResolvedModel>,
}

impl PathGenerator {
    pub fn new(client: Option<GeminiClient>, resolved: Option<ResolvedModel>) -> Self {
        Self { client, resolved }
    }

    pub fn resolved_model(&self) -> Option<&ResolvedModel> {
        self.resolved.as_ref()
    }

    pub async fn generate(&self, skills: &str) -> Result<GenerationResult, GeneratePathError> {
        let skills = skills.trim();
        if skills.is_empty() {
            return Err(GeneratePathError::EmptySkills);
        }

        let (Some(client), Some(resolved)) = (&self.client, &self.resolved) else {
            return Ok(demo_result());
        };

        let raw = client
            .generate_content(&resolved.name, &build_prompt(skills))
            .await?;

        let data = match sanitize_json(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("model returned undecodable output, substituting a synthesized module: {err}");
                json!([synthesized_module(skills)])
            }
        };

        Ok(GenerationResult {
            success: true,
            mode: GenerationMode::Ai,
            model: Some(resolved.name.clone()),
            data,
        })
    }
}

fn build_prompt(skills: &str) -> String {
    format!(
        "Generate a structured learning path for: {skills}.\n\
         Return JSON array of modules with fields:\n\
         - title\n\
         - duration\n\
         - description\n\
         - resources: array of {{ name, url }}"
    )
}

fn demo_result() -> GenerationResult {
    GenerationResult {
        success: true,
        mode: GenerationMode::Mock,
        model: None,
        data: json!(demo_learning_path()),
    }
}

/// The fixed learning path served whenever no provider model is available.
fn demo_learning_path() -> Vec<LearningModule> {
    vec![LearningModule {
        title: "Mathematics for Data Science".to_string(),
        duration: "8 weeks".to_string(),
        description: "Covers essential mathematical concepts like linear algebra, calculus, \
                      probability, and statistics crucial for understanding and applying data \
                      science techniques."
            .to_string(),
        resources: vec![
            LearningResource {
                name: "Khan Academy Linear Algebra".to_string(),
                url: "https://www.khanacademy.org/math/linear-algebra".to_string(),
            },
            LearningResource {
                name: "MIT OpenCourseWare Calculus".to_string(),
                url: "https://ocw.mit.edu/courses/mathematics/18-01sc-single-variable-calculus-fall-2010/"
                    .to_string(),
            },
            LearningResource {
                name: "3Blue1Brown Essence of Linear Algebra".to_string(),
                url: "https://www.youtube.com/playlist?list=PLZHQObOWTQDPD3MizzM2xVFitgF8hE_ab"
                    .to_string(),
            },
            LearningResource {
                name: "Statistics with R by Peng".to_string(),
                url: "https://www.coursera.org/learn/statistics".to_string(),
            },
        ],
    }]
}

/// Substitute module used when the model answers with something other than
/// decodable JSON.
fn synthesized_module(skills: &str) -> LearningModule {
    let query: String = form_urlencoded::byte_serialize(skills.as_bytes()).collect();

    LearningModule {
        title: format!("Learn {skills}"),
        duration: "4 weeks".to_string(),
        description: "Structured learning path generated by AI.".to_string(),
        resources: vec![LearningResource {
            name: "Google Search".to_string(),
            url: format!("https://www.google.com/search?q={query}"),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::{build_prompt, demo_learning_path, synthesized_module};

    #[test]
    fn prompt_embeds_the_requested_skills() {
        let prompt = build_prompt("rust, async networking");

        assert!(prompt.starts_with("Generate a structured learning path for: rust, async networking."));
        assert!(prompt.contains("- resources: array of { name, url }"));
    }

    #[test]
    fn demo_path_is_the_fixed_single_module() {
        let path = demo_learning_path();

        assert_eq!(path.len(), 1);
        assert_eq!(path[0].title, "Mathematics for Data Science");
        assert_eq!(path[0].duration, "8 weeks");
        assert_eq!(path[0].resources.len(), 4);
    }

    #[test]
    fn synthesized_module_links_a_search_for_the_skills() {
        let module = synthesized_module("machine learning");

        assert_eq!(module.title, "Learn machine learning");
        assert_eq!(module.duration, "4 weeks");
        assert_eq!(module.resources.len(), 1);
        assert!(
            module.resources[0]
                .url
                .starts_with("https://www.google.com/search?q=machine")
        );
    }
}
