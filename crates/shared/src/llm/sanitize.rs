use serde_json::Value;
use thiserror::Error;

/// Signal that provider output could not be decoded. Consumers recover from
/// this locally; it never reaches a caller.
#[derive(Debug, Error)]
#[error("model output is not valid json: {0}")]
pub struct ParseFailure(#[from] serde_json::Error);

/// Interpret raw model output as JSON, tolerating the code-fence markup
/// models commonly wrap structured replies in. The decoded value is returned
/// as-is; shape enforcement is left to consumers that care.
pub fn sanitize_json(raw: &str) -> Result<Value, ParseFailure> {
    let stripped = strip_code_fences(raw);
    Ok(serde_json::from_str(stripped.trim())?)
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}
