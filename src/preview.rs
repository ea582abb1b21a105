//! Read-only inspection of what cleaning would change.
//!
//! Every enabled rule is checked against the original text, independently of
//! the others, so the counts here can differ from a real cleaning run where
//! rules see each other's output.

use crate::category::RuleCategory;
use crate::config::CleaningConfig;
use crate::rules::{self, Rule};
use crate::stats::Tally;
use serde::Serialize;

/// Something a rule would change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub category: RuleCategory,
    pub tally: Tally,
    pub count: usize,
}

impl Issue {
    /// Human-readable label of the category.
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    /// Count with a noun, e.g. "3 hidden characters".
    pub fn description(&self) -> String {
        let (one, many) = noun(self.category);
        format!("{} {}", self.count, if self.count == 1 { one } else { many })
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.description())
    }
}

fn noun(category: RuleCategory) -> (&'static str, &'static str) {
    match category {
        RuleCategory::HiddenCharacters => ("hidden character", "hidden characters"),
        RuleCategory::EncodingIssues => ("mis-decoded sequence", "mis-decoded sequences"),
        RuleCategory::MarkdownConversion => ("markup element", "markup elements"),
        RuleCategory::NonBreakingSpace => ("non-breaking space", "non-breaking spaces"),
        RuleCategory::Dashes => ("dash", "dashes"),
        RuleCategory::Quotes => ("smart quote", "smart quotes"),
        RuleCategory::Ellipsis => ("ellipsis", "ellipses"),
        RuleCategory::MathSymbols => ("math symbol", "math symbols"),
        RuleCategory::UnicodePunctuation => ("punctuation mark", "punctuation marks"),
        RuleCategory::Spacing => ("spacing issue", "spacing issues"),
        RuleCategory::AIArtifacts => ("artifact character", "artifact characters"),
        RuleCategory::TrailingWhitespace => {
            ("trailing whitespace character", "trailing whitespace characters")
        }
    }
}

/// Lazy iterator over the issues found in a text.
///
/// Cloning yields an independent iterator starting from the same position,
/// and calling [`preview`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Preview<'a> {
    text: &'a str,
    config: CleaningConfig,
    rules: std::slice::Iter<'static, Rule>,
}

impl<'a> Iterator for Preview<'a> {
    type Item = Issue;

    fn next(&mut self) -> Option<Issue> {
        for rule in self.rules.by_ref() {
            if !self.config.is_enabled(rule.category()) {
                continue;
            }
            let count = rule.count(self.text);
            if count > 0 {
                return Some(Issue {
                    category: rule.category(),
                    tally: rule.tally(),
                    count,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rules.len()))
    }
}

impl std::iter::FusedIterator for Preview<'_> {}

/// Lists what the enabled rules would change in `text`, without changing it.
///
/// # Example
///
/// ```
/// use scrubtext::{preview, CleaningConfig};
///
/// let issues: Vec<_> = preview("a\u{200B}b \u{2014} c", &CleaningConfig::default()).collect();
/// assert_eq!(issues.len(), 2);
/// assert_eq!(issues[0].to_string(), "Hidden characters: 1 hidden character");
/// ```
pub fn preview<'a>(text: &'a str, config: &CleaningConfig) -> Preview<'a> {
    Preview {
        text,
        config: *config,
        rules: rules::catalog().iter(),
    }
}

/// Like [`preview`], but `None` yields no issues.
pub fn preview_optional<'a>(text: Option<&'a str>, config: &CleaningConfig) -> Preview<'a> {
    let catalog: &'static [Rule] = match text {
        Some(_) => rules::catalog(),
        None => &[],
    };
    Preview {
        text: text.unwrap_or_default(),
        config: *config,
        rules: catalog.iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_reports_enabled_categories() {
        let text = "\u{201C}hi\u{201D}\u{200B} \u{2014} ok   \n";
        let issues: Vec<Issue> = preview(text, &CleaningConfig::default()).collect();
        let categories: Vec<RuleCategory> = issues.iter().map(|issue| issue.category).collect();
        assert_eq!(
            categories,
            vec![
                RuleCategory::HiddenCharacters,
                RuleCategory::Dashes,
                RuleCategory::Quotes,
                RuleCategory::Spacing,
                RuleCategory::TrailingWhitespace,
            ]
        );
    }

    #[test]
    fn test_preview_skips_disabled_categories() {
        let text = "a\u{200B}b \u{2014}";
        let config = CleaningConfig::only([RuleCategory::Dashes]);
        let issues: Vec<Issue> = preview(text, &config).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, RuleCategory::Dashes);
        assert_eq!(issues[0].count, 1);
    }

    #[test]
    fn test_preview_sees_original_text() {
        // Cleaning would repair the mojibake into a curly quote before the
        // quote rule runs; preview checks each rule against the raw input
        let text = "donâ€™t";
        let issues: Vec<Issue> = preview(text, &CleaningConfig::default()).collect();
        assert!(issues
            .iter()
            .any(|issue| issue.category == RuleCategory::EncodingIssues));
        assert!(!issues.iter().any(|issue| issue.category == RuleCategory::Quotes));
    }

    #[test]
    fn test_preview_is_repeatable() {
        let text = "x\u{00A0}y\u{2026}\n\n\n\nz";
        let config = CleaningConfig::all();
        let first: Vec<Issue> = preview(text, &config).collect();
        let second: Vec<Issue> = preview(text, &config).collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_cloned_preview_restarts_independently() {
        let text = "a\u{200B}\u{2014}\u{2026}";
        let mut issues = preview(text, &CleaningConfig::default());
        let snapshot = issues.clone();
        let first = issues.next();
        assert_eq!(snapshot.count(), 3);
        assert_eq!(first.map(|issue| issue.category), Some(RuleCategory::HiddenCharacters));
        assert_eq!(issues.count(), 2);
    }

    #[test]
    fn test_preview_clean_text_has_no_issues() {
        assert_eq!(preview("All good here.", &CleaningConfig::all()).count(), 0);
    }

    #[test]
    fn test_preview_optional_none() {
        assert_eq!(preview_optional(None, &CleaningConfig::all()).count(), 0);
    }

    #[test]
    fn test_issue_description_pluralizes() {
        let one = Issue {
            category: RuleCategory::Ellipsis,
            tally: Tally::Replaced,
            count: 1,
        };
        let many = Issue { count: 4, ..one.clone() };
        assert_eq!(one.description(), "1 ellipsis");
        assert_eq!(many.to_string(), "Ellipses: 4 ellipses");
    }
}
