use std::collections::HashMap;

use crate::error::CheckerError;

/// Environment-driven configuration for the model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl LlmSettings {
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    pub const ENDPOINT_ENV: &'static str = "OPENAI_BASE_URL";
    pub const MODEL_ENV: &'static str = "TECHWRITE_MODEL";
    pub const TIMEOUT_ENV: &'static str = "TECHWRITE_TIMEOUT_SECS";

    /// Settings with only a credential; everything else uses client defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            model: None,
            timeout_secs: None,
        }
    }

    /// Load settings from environment variables.
    ///
    /// * `OPENAI_API_KEY`  — API key (required).
    /// * `OPENAI_BASE_URL` — Optional base URL of an OpenAI-compatible API.
    /// * `TECHWRITE_MODEL` — Optional chat model name.
    /// * `TECHWRITE_TIMEOUT_SECS` — Optional request timeout; no timeout when unset.
    pub fn from_env() -> Result<Self, CheckerError> {
        Self::from_map(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Result<Self, CheckerError> {
        let api_key = vars
            .get(Self::API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CheckerError::Configuration(format!(
                    "environment variable {} is not set",
                    Self::API_KEY_ENV
                ))
            })?;
        let non_blank = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let timeout_secs = vars
            .get(Self::TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(Self {
            api_key,
            endpoint: non_blank(Self::ENDPOINT_ENV),
            model: non_blank(Self::MODEL_ENV),
            timeout_secs,
        })
    }
}
