use thiserror::Error;

/// Failures surfaced by the checker. The core never recovers from these itself.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Required configuration (usually the API credential) is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The remote model call failed (transport, auth, quota or an unusable reply envelope).
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),
    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),
}

/// Reasons a model reply could not be turned into a `DocumentAnalysis`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaValidationError {
    #[error("model response was empty")]
    EmptyResponse,
    #[error("model response does not contain a JSON object")]
    MissingJson,
    #[error("model response does not match the analysis schema: {0}")]
    Malformed(String),
    #[error("analysis field `improved_text` must not be empty")]
    EmptyImprovedText,
}

impl CheckerError {
    pub(crate) fn invocation(err: anyhow::Error) -> Self {
        Self::ModelInvocation(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_keeps_error_chain() {
        let err = anyhow::anyhow!("connection refused").context("failed to call chat API");
        let wrapped = CheckerError::invocation(err);
        let message = wrapped.to_string();
        assert!(message.contains("failed to call chat API"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn schema_errors_display_transparently() {
        let err = CheckerError::from(SchemaValidationError::EmptyImprovedText);
        assert_eq!(
            err.to_string(),
            "analysis field `improved_text` must not be empty"
        );
    }
}
