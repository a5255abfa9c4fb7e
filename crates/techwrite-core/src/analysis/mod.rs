use std::fmt;

use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod parser;

/// The closed set of style rules a document is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RuleType {
    #[serde(rename = "Article Usage")]
    ArticleUsage,
    #[serde(rename = "Active Voice")]
    ActiveVoice,
    #[serde(rename = "Single Instructions")]
    SingleInstructions,
    #[serde(rename = "Imperative Form")]
    ImperativeForm,
    #[serde(rename = "Sentence Length")]
    SentenceLength,
}

impl RuleType {
    /// All rules, in the order they are presented to the model.
    pub const ALL: [RuleType; 5] = [
        RuleType::ArticleUsage,
        RuleType::ActiveVoice,
        RuleType::SingleInstructions,
        RuleType::ImperativeForm,
        RuleType::SentenceLength,
    ];

    /// Label used on the wire and in reports. Matches the serde names.
    pub fn label(self) -> &'static str {
        match self {
            RuleType::ArticleUsage => "Article Usage",
            RuleType::ActiveVoice => "Active Voice",
            RuleType::SingleInstructions => "Single Instructions",
            RuleType::ImperativeForm => "Imperative Form",
            RuleType::SentenceLength => "Sentence Length",
        }
    }

    /// Reviewer guidance for this rule, embedded in the prompt.
    pub fn guidance(self) -> &'static str {
        match self {
            RuleType::ArticleUsage => {
                "Use articles (a, an, the) where English grammar requires them. Do not drop articles before nouns."
            }
            RuleType::ActiveVoice => {
                "Write instructions in the active voice. Rewrite passive constructions so the actor performs the action."
            }
            RuleType::SingleInstructions => {
                "Give one instruction per sentence. Split sentences that combine several actions."
            }
            RuleType::ImperativeForm => {
                "Write instructions in the imperative form (for example \"Turn the switch\" instead of \"You should turn the switch\")."
            }
            RuleType::SentenceLength => {
                "Flag a sentence only when it contains more than 20 words. Never use this rule for any other kind of issue."
            }
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single style-rule violation found in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleViolation {
    /// Type of rule that was violated
    rule_type: RuleType,
    /// The text that contains the violation
    original_text: String,
    /// Suggested correction
    suggestion: String,
    /// Explanation of why this is a violation
    explanation: String,
}

impl RuleViolation {
    pub fn new(
        rule_type: RuleType,
        original_text: impl Into<String>,
        suggestion: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            rule_type,
            original_text: original_text.into(),
            suggestion: suggestion.into(),
            explanation: explanation.into(),
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Full result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentAnalysis {
    /// List of rule violations found, in the order they appear in the text
    violations: Vec<RuleViolation>,
    /// The corrected version of the text
    improved_text: String,
}

impl DocumentAnalysis {
    pub fn new(violations: Vec<RuleViolation>, improved_text: impl Into<String>) -> Self {
        Self {
            violations,
            improved_text: improved_text.into(),
        }
    }

    /// Violations in the order the model reported them.
    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    pub fn improved_text(&self) -> &str {
        &self.improved_text
    }

    /// Excerpt of the first violation, or the improved text when nothing was flagged.
    ///
    /// This is a display helper and not the document that was submitted; callers that
    /// need the submitted text must keep it themselves.
    pub fn original_text(&self) -> &str {
        self.violations
            .first()
            .map(|violation| violation.original_text.as_str())
            .unwrap_or(&self.improved_text)
    }
}

static SCHEMA_DESCRIPTION: Lazy<String> = Lazy::new(|| {
    let schema = schemars::schema_for!(DocumentAnalysis);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
});

static FORMAT_INSTRUCTIONS: Lazy<String> = Lazy::new(|| {
    format!(
        "Respond with a single JSON object that conforms to the JSON schema below. \
Use exactly the rule_type labels listed in the schema and do not add commentary outside the JSON.\n\
\n\
Output schema:\n```json\n{}\n```",
        schema_description()
    )
});

/// JSON Schema of [`DocumentAnalysis`], generated from the type definitions.
pub fn schema_description() -> &'static str {
    &SCHEMA_DESCRIPTION
}

/// Instructions telling the model how to shape its reply, schema included.
pub fn format_instructions() -> &'static str {
    &FORMAT_INSTRUCTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule_type: RuleType, excerpt: &str) -> RuleViolation {
        RuleViolation::new(rule_type, excerpt, "fixed", "because")
    }

    #[test]
    fn original_text_prefers_first_violation() {
        let analysis = DocumentAnalysis::new(
            vec![
                violation(RuleType::ArticleUsage, "Turn shaft assembly"),
                violation(RuleType::ActiveVoice, "are supplied by"),
            ],
            "Turn the shaft assembly.",
        );
        assert_eq!(analysis.original_text(), "Turn shaft assembly");
    }

    #[test]
    fn original_text_falls_back_to_improved_text() {
        let analysis = DocumentAnalysis::new(Vec::new(), "Turn the shaft assembly.");
        assert_eq!(analysis.original_text(), "Turn the shaft assembly.");
    }

    #[test]
    fn labels_match_serde_names() {
        for rule in RuleType::ALL {
            let encoded = serde_json::to_string(&rule).unwrap();
            assert_eq!(encoded, format!("\"{}\"", rule.label()));
            assert_eq!(rule.to_string(), rule.label());
        }
    }

    #[test]
    fn schema_lists_every_rule_label() {
        let schema = schema_description();
        for rule in RuleType::ALL {
            assert!(schema.contains(rule.label()), "missing {}", rule.label());
        }
        assert!(schema.contains("improved_text"));
        assert!(schema.contains("The corrected version of the text"));
    }

    #[test]
    fn format_instructions_embed_schema() {
        assert!(format_instructions().contains(schema_description()));
    }
}
