use std::fmt::Write;

use crate::analysis::{format_instructions, RuleType};

const PREAMBLE: &str = "You are a technical writing reviewer. Check the text below against the following rules:";

const REQUEST: &str = "Report every violation in the order it appears in the text. \
For each violation give the rule type, the exact text that violates the rule, a suggested correction \
and a short explanation. Then provide the complete corrected text with all suggestions applied.";

/// Build the analysis prompt for `text`. The text is inserted verbatim.
pub fn render_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(text.len() + 4096);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");
    for (idx, rule) in RuleType::ALL.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(prompt, "{}. {}: {}", idx + 1, rule.label(), rule.guidance());
    }
    prompt.push('\n');
    prompt.push_str(REQUEST);
    prompt.push_str("\n\n");
    prompt.push_str(format_instructions());
    prompt.push_str("\n\nText to analyze:\n");
    prompt.push_str(text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_all_rules_in_order() {
        let prompt = render_prompt("Turn shaft assembly.");
        let mut last = 0;
        for (idx, rule) in RuleType::ALL.iter().enumerate() {
            let line = format!("{}. {}:", idx + 1, rule.label());
            let pos = prompt.find(&line).unwrap_or_else(|| panic!("missing `{line}`"));
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn sentence_length_rule_has_twenty_word_threshold() {
        let prompt = render_prompt("x");
        let line = prompt
            .lines()
            .find(|line| line.starts_with("5. Sentence Length"))
            .expect("sentence length rule present");
        assert!(line.contains("more than 20 words"));
        assert!(line.contains("Never use this rule for any other kind of issue"));
    }

    #[test]
    fn interpolates_text_verbatim_at_the_end() {
        let text = "Set the TEST switch to {middle}\n  and release it.";
        let prompt = render_prompt(text);
        assert!(prompt.ends_with(text));
    }

    #[test]
    fn embeds_schema_instructions() {
        let prompt = render_prompt("x");
        assert!(prompt.contains(format_instructions()));
        assert!(prompt.contains("\"improved_text\""));
    }
}
