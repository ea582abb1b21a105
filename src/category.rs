//! Rule categories and their canonical order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of a normalization concern.
///
/// Every category maps to exactly one rule in the catalog. The declaration
/// order below is the canonical application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Zero-width, BOM and directional format characters
    HiddenCharacters,
    /// Windows-1252 / UTF-8 mismatch sequences
    EncodingIssues,
    /// Markdown markup rendered to plain text
    MarkdownConversion,
    /// U+00A0
    NonBreakingSpace,
    /// Em dash, en dash, minus sign
    Dashes,
    /// Curly and low-9 quotes
    Quotes,
    /// Horizontal ellipsis
    Ellipsis,
    /// Math and measurement symbols
    MathSymbols,
    /// Guillemets, inverted marks, solidus variants
    UnicodePunctuation,
    /// Exotic spaces and runs of spaces
    Spacing,
    /// Soft hyphens, control characters, excess blank lines
    #[serde(rename = "ai_artifacts")]
    AIArtifacts,
    /// Whitespace at the end of each line
    TrailingWhitespace,
}

impl RuleCategory {
    /// All categories in canonical application order.
    pub const ALL: [RuleCategory; 12] = [
        RuleCategory::HiddenCharacters,
        RuleCategory::EncodingIssues,
        RuleCategory::MarkdownConversion,
        RuleCategory::NonBreakingSpace,
        RuleCategory::Dashes,
        RuleCategory::Quotes,
        RuleCategory::Ellipsis,
        RuleCategory::MathSymbols,
        RuleCategory::UnicodePunctuation,
        RuleCategory::Spacing,
        RuleCategory::AIArtifacts,
        RuleCategory::TrailingWhitespace,
    ];

    /// Stable kebab-case key, used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            RuleCategory::HiddenCharacters => "hidden-characters",
            RuleCategory::EncodingIssues => "encoding-issues",
            RuleCategory::MarkdownConversion => "markdown-conversion",
            RuleCategory::NonBreakingSpace => "non-breaking-space",
            RuleCategory::Dashes => "dashes",
            RuleCategory::Quotes => "quotes",
            RuleCategory::Ellipsis => "ellipsis",
            RuleCategory::MathSymbols => "math-symbols",
            RuleCategory::UnicodePunctuation => "unicode-punctuation",
            RuleCategory::Spacing => "spacing",
            RuleCategory::AIArtifacts => "ai-artifacts",
            RuleCategory::TrailingWhitespace => "trailing-whitespace",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RuleCategory::HiddenCharacters => "Hidden characters",
            RuleCategory::EncodingIssues => "Encoding issues",
            RuleCategory::MarkdownConversion => "Markdown formatting",
            RuleCategory::NonBreakingSpace => "Non-breaking spaces",
            RuleCategory::Dashes => "Dashes",
            RuleCategory::Quotes => "Smart quotes",
            RuleCategory::Ellipsis => "Ellipses",
            RuleCategory::MathSymbols => "Math symbols",
            RuleCategory::UnicodePunctuation => "Unicode punctuation",
            RuleCategory::Spacing => "Irregular spacing",
            RuleCategory::AIArtifacts => "AI artifacts",
            RuleCategory::TrailingWhitespace => "Trailing whitespace",
        }
    }

    /// One-line description of what the rule does.
    pub fn description(self) -> &'static str {
        match self {
            RuleCategory::HiddenCharacters => {
                "Remove zero-width, BOM and directional format characters"
            }
            RuleCategory::EncodingIssues => "Repair UTF-8 text mis-decoded as Windows-1252",
            RuleCategory::MarkdownConversion => "Render Markdown markup as plain text",
            RuleCategory::NonBreakingSpace => "Replace non-breaking spaces with regular spaces",
            RuleCategory::Dashes => "Replace em/en dashes and minus signs with hyphens",
            RuleCategory::Quotes => "Replace curly quotes with straight quotes",
            RuleCategory::Ellipsis => "Replace the ellipsis character with three periods",
            RuleCategory::MathSymbols => "Spell out math and measurement symbols in ASCII",
            RuleCategory::UnicodePunctuation => "Replace guillemets, inverted marks and slashes",
            RuleCategory::Spacing => "Normalize exotic spaces and collapse repeated spaces",
            RuleCategory::AIArtifacts => {
                "Remove soft hyphens, control characters and excess blank lines"
            }
            RuleCategory::TrailingWhitespace => "Strip whitespace at the end of each line",
        }
    }

    /// Position in the canonical order.
    pub fn order(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RuleCategory {
    type Err = Error;

    /// Accepts kebab-case or snake_case keys, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        RuleCategory::ALL
            .iter()
            .copied()
            .find(|category| category.key() == wanted)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_declaration() {
        for (index, category) in RuleCategory::ALL.iter().enumerate() {
            assert_eq!(category.order(), index);
        }
        assert_eq!(RuleCategory::ALL[0], RuleCategory::HiddenCharacters);
        assert_eq!(RuleCategory::ALL[11], RuleCategory::TrailingWhitespace);
    }

    #[test]
    fn test_encoding_runs_before_character_rules() {
        let encoding = RuleCategory::EncodingIssues.order();
        assert!(encoding < RuleCategory::Quotes.order());
        assert!(encoding < RuleCategory::Dashes.order());
        assert!(encoding < RuleCategory::Ellipsis.order());
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            "hidden-characters".parse::<RuleCategory>().unwrap(),
            RuleCategory::HiddenCharacters
        );
        assert_eq!(
            "AI_ARTIFACTS".parse::<RuleCategory>().unwrap(),
            RuleCategory::AIArtifacts
        );
        assert_eq!(
            " math_symbols ".parse::<RuleCategory>().unwrap(),
            RuleCategory::MathSymbols
        );
    }

    #[test]
    fn test_parse_unknown_key() {
        match "emoji".parse::<RuleCategory>() {
            Err(Error::UnknownCategory(name)) => assert_eq!(name, "emoji"),
            _ => panic!("Expected UnknownCategory error"),
        }
    }

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for category in RuleCategory::ALL {
            assert_eq!(category.key().parse::<RuleCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RuleCategory::AIArtifacts).unwrap();
        assert_eq!(json, "\"ai_artifacts\"");
        let json = serde_json::to_string(&RuleCategory::NonBreakingSpace).unwrap();
        assert_eq!(json, "\"non_breaking_space\"");
    }
}
