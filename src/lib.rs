//! # scrubtext
//!
//! Rule-based normalization of problematic Unicode in free-form text:
//! invisible marks, smart punctuation, fancy dashes, exotic spaces and
//! mis-decoded encoding artifacts are rewritten into ASCII-safe equivalents,
//! with counts of what was removed and what was replaced.
//!
//! ## Rules
//!
//! Every [`RuleCategory`] is an independent rule that can be switched on or
//! off in a [`CleaningConfig`]. Enabled rules always run in the same
//! canonical order, whatever order they were enabled in:
//!
//! 1. **Hidden characters** - zero-width, BOM and directional marks
//! 2. **Encoding issues** - `â€™`, `Ã©` and friends back to `’`, `é`
//! 3. **Markdown conversion** - markup rendered as plain text (off by default)
//! 4. **Non-breaking spaces**, **dashes**, **quotes**, **ellipses**
//! 5. **Math symbols** and **Unicode punctuation** - ASCII mnemonics
//! 6. **Spacing** - exotic spaces and repeated spaces
//! 7. **AI artifacts** - soft hyphens, control characters, excess blank lines
//! 8. **Trailing whitespace** - stripped from every line
//!
//! ## Quick Start
//!
//! ```
//! use scrubtext::{clean, preview, CleaningConfig};
//!
//! let config = CleaningConfig::default();
//! let text = "\u{201C}Smart\u{201D} quotes\u{200B} \u{2014} done\u{2026}";
//!
//! for issue in preview(text, &config) {
//!     println!("{}", issue);
//! }
//!
//! let result = clean(text, &config);
//! assert_eq!(result.text, "\"Smart\" quotes - done...");
//! assert_eq!(result.stats.removed_count, 1);
//! assert_eq!(result.stats.replaced_count, 3);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): [`clean_many`] runs on a rayon thread pool

pub mod category;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod rules;
pub mod stats;

// Re-exports
pub use category::RuleCategory;
pub use config::CleaningConfig;
pub use error::{Error, Result};
pub use pipeline::{clean, clean_bytes, clean_many, clean_optional};
pub use preview::{preview, preview_optional, Issue, Preview};
pub use stats::{Change, CleaningResult, CleaningStats, Tally};

/// Builder for cleaning text.
///
/// Provides a fluent API over [`CleaningConfig`].
///
/// # Example
///
/// ```
/// use scrubtext::{RuleCategory, Scrubber};
///
/// let result = Scrubber::new()
///     .disable(RuleCategory::Quotes)
///     .clean("\u{201C}kept\u{201D} \u{2014} replaced");
/// assert_eq!(result.text, "\u{201C}kept\u{201D} - replaced");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    config: CleaningConfig,
}

impl Scrubber {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Enables exactly the given categories.
    pub fn only(mut self, categories: impl IntoIterator<Item = RuleCategory>) -> Self {
        self.config = CleaningConfig::only(categories);
        self
    }

    /// Enables a category.
    pub fn enable(mut self, category: RuleCategory) -> Self {
        self.config.set(category, true);
        self
    }

    /// Disables a category.
    pub fn disable(mut self, category: RuleCategory) -> Self {
        self.config.set(category, false);
        self
    }

    /// Enables Markdown to plain text conversion.
    pub fn with_markdown(self) -> Self {
        self.enable(RuleCategory::MarkdownConversion)
    }

    /// Returns the configuration being built.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Cleans a text.
    pub fn clean(&self, text: &str) -> CleaningResult {
        clean(text, &self.config)
    }

    /// Lists what cleaning would change.
    pub fn preview<'a>(&self, text: &'a str) -> Preview<'a> {
        preview(text, &self.config)
    }
}
