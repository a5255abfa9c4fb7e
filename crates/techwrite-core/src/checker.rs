use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::analysis::DocumentAnalysis;
use crate::error::CheckerError;
use crate::llm::{LlmClient, LlmSettings, OpenAiClient};
use crate::{prompt, report};

/// Checks technical writing against the style rules by delegating to a language model.
#[derive(Clone)]
pub struct TechnicalWritingChecker {
    client: Arc<dyn LlmClient>,
}

impl TechnicalWritingChecker {
    /// Build a checker backed by the OpenAI chat-completions API.
    pub fn new(settings: &LlmSettings) -> Result<Self, CheckerError> {
        let client = OpenAiClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Build a checker from `OPENAI_API_KEY` / `OPENAI_BASE_URL` and friends.
    pub fn from_env() -> Result<Self, CheckerError> {
        Self::new(&LlmSettings::from_env()?)
    }

    /// Use an arbitrary model collaborator.
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn render_prompt(&self, text: &str) -> String {
        prompt::render_prompt(text)
    }

    /// Analyze `text`, blocking the current thread until the model replies.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime; use
    /// [`TechnicalWritingChecker::check_text_async`] there.
    pub fn check_text(&self, text: &str) -> Result<DocumentAnalysis, CheckerError> {
        let prompt = self.render_prompt(text);
        debug!(input_len = text.len(), prompt_len = prompt.len(), "checking text");
        let raw = self
            .client
            .complete_blocking(&prompt)
            .map_err(CheckerError::invocation)?;
        Ok(DocumentAnalysis::parse(&raw)?)
    }

    #[instrument(name = "check_text", skip(self, text), fields(input_len = text.len()))]
    pub async fn check_text_async(&self, text: &str) -> Result<DocumentAnalysis, CheckerError> {
        let prompt = self.render_prompt(text);
        debug!(prompt_len = prompt.len(), "checking text");
        let raw = self
            .client
            .complete(&prompt)
            .await
            .map_err(CheckerError::invocation)?;
        debug!(reply_len = raw.len(), "model replied");
        Ok(DocumentAnalysis::parse(&raw)?)
    }

    /// Analyze every text concurrently, returning results in input order.
    ///
    /// The first failure fails the whole batch and cancels the calls still in flight.
    /// Dropping the returned future cancels every pending call as well.
    pub async fn process_multiple_texts<S>(
        &self,
        texts: &[S],
    ) -> Result<Vec<DocumentAnalysis>, CheckerError>
    where
        S: AsRef<str>,
    {
        let analyses =
            try_join_all(texts.iter().map(|text| self.check_text_async(text.as_ref()))).await?;
        info!(count = analyses.len(), "batch analysis complete");
        Ok(analyses)
    }

    pub fn format_analysis(&self, analysis: &DocumentAnalysis) -> String {
        report::format_analysis(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    struct FixedClient(&'static str);

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            bail!("OpenAI API error (401 Unauthorized): invalid key")
        }
    }

    fn checker(client: impl LlmClient + 'static) -> TechnicalWritingChecker {
        TechnicalWritingChecker::with_client(Arc::new(client))
    }

    #[test]
    fn construction_without_key_is_configuration_error() {
        let err = TechnicalWritingChecker::new(&LlmSettings::new("")).err().unwrap();
        assert!(matches!(err, CheckerError::Configuration(_)));
    }

    #[test]
    fn check_text_parses_reply() {
        let checker = checker(FixedClient(
            r#"{"violations": [], "improved_text": "Turn the shaft assembly."}"#,
        ));
        let analysis = checker.check_text("Turn the shaft assembly.").unwrap();
        assert!(analysis.violations().is_empty());
        assert!(!analysis.improved_text().is_empty());
    }

    #[test]
    fn check_text_surfaces_invocation_failure() {
        let err = checker(FailingClient).check_text("x").unwrap_err();
        assert!(matches!(&err, CheckerError::ModelInvocation(msg) if msg.contains("401")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn async_check_surfaces_schema_failure() {
        let err = checker(FixedClient("{\"violations\": ["))
            .check_text_async("x")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckerError::SchemaValidation(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_batch_returns_empty_vec() {
        let texts: [&str; 0] = [];
        let analyses = checker(FailingClient)
            .process_multiple_texts(&texts)
            .await
            .unwrap();
        assert!(analyses.is_empty());
    }

    #[test]
    fn format_analysis_delegates_to_report() {
        let analysis = DocumentAnalysis::new(Vec::new(), "Fine.");
        let checker = checker(FailingClient);
        assert_eq!(
            checker.format_analysis(&analysis),
            report::format_analysis(&analysis)
        );
    }
}
