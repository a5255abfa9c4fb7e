use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::DocumentAnalysis;
use crate::error::SchemaValidationError;

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

impl DocumentAnalysis {
    /// Parse a raw model reply into an analysis.
    ///
    /// The reply may wrap the JSON object in a Markdown code fence or surrounding prose.
    /// Anything that does not deserialize into the schema is rejected; no repair is tried.
    pub fn parse(raw: &str) -> Result<Self, SchemaValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SchemaValidationError::EmptyResponse);
        }

        let payload = extract_json_payload(trimmed);
        let object = JSON_OBJECT
            .find(&payload)
            .ok_or(SchemaValidationError::MissingJson)?;

        let analysis: DocumentAnalysis =
            serde_json::from_str(object.as_str()).map_err(|err| {
                warn!(error = %err, "model reply does not match analysis schema");
                SchemaValidationError::Malformed(err.to_string())
            })?;

        if analysis.improved_text.trim().is_empty() {
            return Err(SchemaValidationError::EmptyImprovedText);
        }
        Ok(analysis)
    }
}

fn extract_json_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(stripped) = strip_code_fence(trimmed) {
        return stripped;
    }
    trimmed.to_string()
}

fn strip_code_fence(input: &str) -> Option<String> {
    let mut trimmed = input.trim();
    if !trimmed.starts_with("```") {
        return None;
    }
    trimmed = trimmed.trim_start_matches("```");
    trimmed = trimmed.trim_start_matches(|c: char| c.is_ascii_whitespace());
    if let Some(rest) = trimmed.strip_prefix("json") {
        trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    }
    let end = trimmed.rfind("```").unwrap_or(trimmed.len());
    Some(trimmed[..end].trim().to_string())
}
