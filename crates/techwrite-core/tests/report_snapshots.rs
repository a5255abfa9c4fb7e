use insta::assert_snapshot;
use techwrite_core::{format_analysis, DocumentAnalysis, RuleType, RuleViolation};

#[test]
fn single_violation_report_snapshot() {
    let analysis = DocumentAnalysis::new(
        vec![RuleViolation::new(
            RuleType::ArticleUsage,
            "Turn shaft assembly",
            "Turn the shaft assembly",
            "Missing article before noun",
        )],
        "Turn the shaft assembly.",
    );
    assert_snapshot!("single_violation", format_analysis(&analysis));
}

#[test]
fn clean_report_snapshot() {
    let analysis = DocumentAnalysis::new(Vec::new(), "Turn the shaft assembly.");
    assert_snapshot!("clean", format_analysis(&analysis));
}
