mod settings;

pub mod openai;

use anyhow::{Context, Result};
use async_trait::async_trait;

pub use openai::OpenAiClient;
pub use settings::LlmSettings;

/// Remote language model reduced to a single capability: prompt in, raw text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `prompt` to the model and return its raw textual reply.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Blocking variant of [`LlmClient::complete`].
    ///
    /// Drives the request on a private current-thread runtime.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime; use `complete` there instead.
    fn complete_blocking(&self, prompt: &str) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start runtime for blocking model call")?;
        runtime.block_on(self.complete(prompt))
    }
}
