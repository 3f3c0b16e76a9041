pub mod config;
pub mod llm;
pub mod models;
