use serde::Serialize;

use crate::analysis::{DocumentAnalysis, RuleViolation};

/// Format styles supported by [`render_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Produce a report string from an analysis using the desired format.
pub fn render_report(analysis: &DocumentAnalysis, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => Ok(format_analysis(analysis)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonReport::from(analysis))?),
    }
}

/// Render an analysis as human-readable text.
pub fn format_analysis(analysis: &DocumentAnalysis) -> String {
    let mut lines: Vec<String> = vec![
        "=== Technical Writing Analysis ===".into(),
        String::new(),
        "Original Text:".into(),
        analysis.original_text().to_string(),
        String::new(),
    ];

    if analysis.violations().is_empty() {
        lines.push("No rule violations found.".into());
        lines.push(String::new());
    } else {
        lines.push("Found Rule Violations:".into());
        lines.push(String::new());
        for violation in analysis.violations() {
            lines.push(format!("[{}]", violation.rule_type()));
            lines.push(format!("Text: {}", flatten(violation.original_text())));
            lines.push(format!("Issue: {}", violation.explanation()));
            lines.push(format!("Suggestion: {}", violation.suggestion()));
            lines.push(String::new());
        }
    }

    lines.push("=== Improved Text ===".into());
    lines.push(analysis.improved_text().to_string());
    lines.join("\n")
}

fn flatten(excerpt: &str) -> String {
    excerpt
        .chars()
        .map(|c| match c {
            '\n' | '\r' => ' ',
            _ => c,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    original_text: &'a str,
    violation_count: usize,
    violations: &'a [RuleViolation],
    improved_text: &'a str,
}

impl<'a> From<&'a DocumentAnalysis> for JsonReport<'a> {
    fn from(analysis: &'a DocumentAnalysis) -> Self {
        Self {
            original_text: analysis.original_text(),
            violation_count: analysis.violations().len(),
            violations: analysis.violations(),
            improved_text: analysis.improved_text(),
        }
    }
}
