use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::llm::client::{DEFAULT_API_BASE_URL, GeminiConfig};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub public_dir: PathBuf,
    pub gemini: Option<GeminiConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match optional_trimmed_env("BIND_ADDR") {
            Some(addr) => addr,
            None => format!("127.0.0.1:{}", parse_u16_env("PORT", 3001)?),
        };

        Ok(Self {
            bind_addr,
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            gemini: GeminiConfig::from_env(),
        })
    }
}

impl GeminiConfig {
    /// Absent or blank `GEMINI_API_KEY` means demo mode, not a config error.
    pub fn from_env() -> Option<Self> {
        let api_key = optional_trimmed_env("GEMINI_API_KEY")?;

        Some(Self {
            api_key,
            base_url: optional_trimmed_env("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }
}

fn parse_u16_env(key: &str, default: u16) -> Result<u16, ConfigError> {
    match optional_trimmed_env(key) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| ConfigError::ParseInt(key.to_string())),
        None => Ok(default),
    }
}

fn optional_trimmed_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
