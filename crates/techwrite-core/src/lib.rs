pub mod analysis;
pub mod checker;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod report;

pub use analysis::{
    format_instructions, schema_description, DocumentAnalysis, RuleType, RuleViolation,
};
pub use checker::TechnicalWritingChecker;
pub use error::{CheckerError, SchemaValidationError};
pub use llm::{LlmClient, LlmSettings, OpenAiClient};
pub use report::{format_analysis, render_report, OutputFormat};
