//! Cleaning configuration: which rule categories are active.

use crate::category::RuleCategory;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options selecting the active rule categories.
///
/// Categories are independent: enabling one never implies another, and any
/// combination (including none at all) is valid. The order in which fields
/// are set has no effect on the order rules run in.
///
/// When loaded from JSON, missing keys keep their default value and unknown
/// keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningConfig {
    /// Remove zero-width, BOM and directional format characters
    pub hidden_characters: bool,
    /// Repair Windows-1252 / UTF-8 mojibake
    pub encoding_issues: bool,
    /// Render Markdown as plain text
    pub markdown_conversion: bool,
    /// U+00A0 to ASCII space
    pub non_breaking_space: bool,
    /// Em dash, en dash, minus sign to hyphen
    pub dashes: bool,
    /// Curly quotes to straight quotes
    pub quotes: bool,
    /// Ellipsis character to three periods
    pub ellipsis: bool,
    /// Math symbols to ASCII mnemonics
    pub math_symbols: bool,
    /// Guillemets, inverted marks and slash variants to ASCII
    pub unicode_punctuation: bool,
    /// Exotic spaces to ASCII space, runs of spaces collapsed
    pub spacing: bool,
    /// Soft hyphens, control characters, excess blank lines
    pub ai_artifacts: bool,
    /// Strip whitespace at line ends
    pub trailing_whitespace: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            markdown_conversion: false,
            ..Self::all()
        }
    }
}

impl CleaningConfig {
    /// Creates options with default settings (everything except Markdown conversion).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every category.
    pub fn all() -> Self {
        Self::none().with_all(RuleCategory::ALL)
    }

    /// Disables every category; cleaning becomes the identity transform.
    pub fn none() -> Self {
        Self {
            hidden_characters: false,
            encoding_issues: false,
            markdown_conversion: false,
            non_breaking_space: false,
            dashes: false,
            quotes: false,
            ellipsis: false,
            math_symbols: false,
            unicode_punctuation: false,
            spacing: false,
            ai_artifacts: false,
            trailing_whitespace: false,
        }
    }

    /// Creates options for minimal cleanup (invisible characters and whitespace only).
    pub fn minimal() -> Self {
        Self::none().with_all([
            RuleCategory::HiddenCharacters,
            RuleCategory::NonBreakingSpace,
            RuleCategory::TrailingWhitespace,
        ])
    }

    /// Enables exactly the given categories.
    pub fn only(categories: impl IntoIterator<Item = RuleCategory>) -> Self {
        Self::none().with_all(categories)
    }

    /// Enables a category.
    pub fn with(mut self, category: RuleCategory) -> Self {
        self.set(category, true);
        self
    }

    /// Disables a category.
    pub fn without(mut self, category: RuleCategory) -> Self {
        self.set(category, false);
        self
    }

    fn with_all(mut self, categories: impl IntoIterator<Item = RuleCategory>) -> Self {
        for category in categories {
            self.set(category, true);
        }
        self
    }

    /// Sets whether a category is enabled.
    pub fn set(&mut self, category: RuleCategory, enabled: bool) {
        *self.flag_mut(category) = enabled;
    }

    /// Returns true if the category is enabled.
    pub fn is_enabled(&self, category: RuleCategory) -> bool {
        match category {
            RuleCategory::HiddenCharacters => self.hidden_characters,
            RuleCategory::EncodingIssues => self.encoding_issues,
            RuleCategory::MarkdownConversion => self.markdown_conversion,
            RuleCategory::NonBreakingSpace => self.non_breaking_space,
            RuleCategory::Dashes => self.dashes,
            RuleCategory::Quotes => self.quotes,
            RuleCategory::Ellipsis => self.ellipsis,
            RuleCategory::MathSymbols => self.math_symbols,
            RuleCategory::UnicodePunctuation => self.unicode_punctuation,
            RuleCategory::Spacing => self.spacing,
            RuleCategory::AIArtifacts => self.ai_artifacts,
            RuleCategory::TrailingWhitespace => self.trailing_whitespace,
        }
    }

    fn flag_mut(&mut self, category: RuleCategory) -> &mut bool {
        match category {
            RuleCategory::HiddenCharacters => &mut self.hidden_characters,
            RuleCategory::EncodingIssues => &mut self.encoding_issues,
            RuleCategory::MarkdownConversion => &mut self.markdown_conversion,
            RuleCategory::NonBreakingSpace => &mut self.non_breaking_space,
            RuleCategory::Dashes => &mut self.dashes,
            RuleCategory::Quotes => &mut self.quotes,
            RuleCategory::Ellipsis => &mut self.ellipsis,
            RuleCategory::MathSymbols => &mut self.math_symbols,
            RuleCategory::UnicodePunctuation => &mut self.unicode_punctuation,
            RuleCategory::Spacing => &mut self.spacing,
            RuleCategory::AIArtifacts => &mut self.ai_artifacts,
            RuleCategory::TrailingWhitespace => &mut self.trailing_whitespace,
        }
    }

    /// Enabled categories in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = RuleCategory> + '_ {
        RuleCategory::ALL
            .into_iter()
            .filter(move |category| self.is_enabled(*category))
    }

    /// Returns true if no category is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled().next().is_none()
    }

    /// Parses options from a JSON object such as `{"quotes": true, "dashes": false}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_default_excludes_markdown() {
        let config = CleaningConfig::default();
        assert!(!config.is_enabled(RuleCategory::MarkdownConversion));
        assert_eq!(config.enabled().count(), 11);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(CleaningConfig::none().is_empty());
        assert!(!CleaningConfig::all().is_empty());
        assert_eq!(CleaningConfig::all().enabled().count(), 12);
    }

    #[test]
    fn test_minimal_preset() {
        let config = CleaningConfig::minimal();
        let enabled: Vec<_> = config.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                RuleCategory::HiddenCharacters,
                RuleCategory::NonBreakingSpace,
                RuleCategory::TrailingWhitespace,
            ]
        );
    }

    #[test]
    fn test_enabled_is_canonical_regardless_of_toggle_order() {
        let config = CleaningConfig::none()
            .with(RuleCategory::TrailingWhitespace)
            .with(RuleCategory::Quotes)
            .with(RuleCategory::HiddenCharacters);
        let enabled: Vec<_> = config.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                RuleCategory::HiddenCharacters,
                RuleCategory::Quotes,
                RuleCategory::TrailingWhitespace,
            ]
        );
    }

    #[test]
    fn test_categories_are_independent() {
        for category in RuleCategory::ALL {
            let config = CleaningConfig::only([category]);
            assert_eq!(config.enabled().collect::<Vec<_>>(), vec![category]);
            assert!(config.without(category).is_empty());
        }
    }

    #[test]
    fn test_from_json_partial() {
        let config = CleaningConfig::from_json(r#"{"quotes": false, "markdown_conversion": true}"#)
            .unwrap();
        assert!(!config.quotes);
        assert!(config.markdown_conversion);
        assert!(config.dashes); // missing keys keep defaults
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let result = CleaningConfig::from_json(r#"{"quotes": true, "emoji": true}"#);
        match result {
            Err(Error::Config(message)) => assert!(message.contains("emoji")),
            _ => panic!("Expected Config error for unknown key"),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"spacing": false, "ai_artifacts": false}}"#).unwrap();

        let config = CleaningConfig::from_file(file.path()).unwrap();
        assert!(!config.spacing);
        assert!(!config.ai_artifacts);
        assert!(config.hidden_characters);
    }

    #[test]
    fn test_from_missing_file() {
        let result = CleaningConfig::from_file("/nonexistent/scrubtext.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_serialized_keys_match_category_serde_names() {
        let value = serde_json::to_value(CleaningConfig::all()).unwrap();
        let object = value.as_object().unwrap();
        for category in RuleCategory::ALL {
            let key = serde_json::to_value(category).unwrap();
            assert!(object.contains_key(key.as_str().unwrap()));
        }
    }
}
