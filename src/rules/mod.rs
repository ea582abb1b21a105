//! # Rule Catalog
//!
//! One rule per [`RuleCategory`], stored in canonical order. Each rule is a
//! fixed list of steps (character maps, deletions, regex substitutions,
//! line trimming, table lookups) and a [`Tally`] saying which counter its
//! count feeds. The same catalog drives both cleaning and preview.
//!
//! Rules are pure: applying one never touches shared state, and a rule that
//! finds nothing to change returns the input borrowed.

mod markdown;
mod mojibake;
mod tables;

use crate::category::RuleCategory;
use crate::stats::Tally;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

// Regex patterns (compiled once using LazyLock)
static RE_DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{201C}\x{201E}]([^\x{201C}\x{201D}\x{201E}\n]*)\x{201D}").unwrap()
});

static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static RE_EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// A single transformation within a rule.
pub(crate) enum Step {
    /// Replace each character found in the table; one count per character.
    Map(&'static [(char, &'static str)]),
    /// Delete each matching character; one count per character.
    Delete(fn(char) -> bool),
    /// Regex substitution with `$n` expansion; one count per match.
    Substitute {
        regex: &'static LazyLock<Regex>,
        replacement: &'static str,
    },
    /// Regex substitution with a literal; counts the characters dropped.
    Collapse {
        regex: &'static LazyLock<Regex>,
        keep: &'static str,
    },
    /// Strip whitespace at the end of every line; counts characters stripped.
    TrimLineEnds,
    /// Repair Windows-1252 mojibake; one count per sequence.
    Mojibake,
    /// Render Markdown as plain text; one count per markup element.
    Markdown,
}

impl Step {
    fn apply<'a>(&self, text: &'a str) -> (Cow<'a, str>, usize) {
        match self {
            Step::Map(table) => map_chars(text, table),
            Step::Delete(predicate) => delete_chars(text, *predicate),
            Step::Substitute { regex, replacement } => {
                let count = regex.find_iter(text).count();
                if count == 0 {
                    return (Cow::Borrowed(text), 0);
                }
                (regex.replace_all(text, *replacement), count)
            }
            Step::Collapse { regex, keep } => {
                let keep_len = keep.chars().count();
                let dropped: usize = regex
                    .find_iter(text)
                    .map(|m| m.as_str().chars().count().saturating_sub(keep_len))
                    .sum();
                if dropped == 0 {
                    return (Cow::Borrowed(text), 0);
                }
                (regex.replace_all(text, NoExpand(*keep)), dropped)
            }
            Step::TrimLineEnds => trim_line_ends(text),
            Step::Mojibake => mojibake::repair(text),
            Step::Markdown => markdown::to_plain_text(text),
        }
    }
}

fn map_chars<'a>(text: &'a str, table: &[(char, &'static str)]) -> (Cow<'a, str>, usize) {
    let count = text
        .chars()
        .filter(|c| tables::lookup(table, *c).is_some())
        .count();
    if count == 0 {
        return (Cow::Borrowed(text), 0);
    }

    let mut result = String::with_capacity(text.len() + count * 2);
    for c in text.chars() {
        match tables::lookup(table, c) {
            Some(replacement) => result.push_str(replacement),
            None => result.push(c),
        }
    }
    (Cow::Owned(result), count)
}

fn delete_chars(text: &str, predicate: fn(char) -> bool) -> (Cow<'_, str>, usize) {
    let count = text.chars().filter(|c| predicate(*c)).count();
    if count == 0 {
        return (Cow::Borrowed(text), 0);
    }
    let result: String = text.chars().filter(|c| !predicate(*c)).collect();
    (Cow::Owned(result), count)
}

/// Lines are split on `\n`; a `\r` ending a line is kept so CRLF text stays CRLF.
fn trim_line_ends(text: &str) -> (Cow<'_, str>, usize) {
    let mut stripped = 0;
    let mut lines = Vec::new();

    for line in text.split('\n') {
        let (body, line_end) = match line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (line, ""),
        };
        let kept = body.trim_end();
        stripped += body[kept.len()..].chars().count();
        lines.push((kept, line_end));
    }

    if stripped == 0 {
        return (Cow::Borrowed(text), 0);
    }

    let mut result = String::with_capacity(text.len());
    for (index, (kept, line_end)) in lines.into_iter().enumerate() {
        if index > 0 {
            result.push('\n');
        }
        result.push_str(kept);
        result.push_str(line_end);
    }
    (Cow::Owned(result), stripped)
}

/// A normalization rule: an ordered list of steps and the counter they feed.
pub struct Rule {
    category: RuleCategory,
    tally: Tally,
    steps: &'static [Step],
}

/// Output of applying a rule to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<'a> {
    pub text: Cow<'a, str>,
    pub count: usize,
}

impl Rule {
    /// The category this rule implements.
    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Which counter this rule's count is added to.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Applies the rule, feeding each step's output into the next.
    pub fn apply<'a>(&self, text: &'a str) -> Applied<'a> {
        let mut current = Cow::Borrowed(text);
        let mut count = 0;

        for step in self.steps {
            let (next, found) = step.apply(&current);
            count += found;
            let owned = match next {
                Cow::Owned(changed) => Some(changed),
                Cow::Borrowed(_) => None,
            };
            if let Some(changed) = owned {
                current = Cow::Owned(changed);
            }
        }

        Applied {
            text: current,
            count,
        }
    }

    /// Number of changes the rule would make, without keeping the result.
    pub fn count(&self, text: &str) -> usize {
        self.apply(text).count
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .field("tally", &self.tally)
            .field("steps", &self.steps.len())
            .finish()
    }
}

// ============================================================================
// Catalog
// ============================================================================

static HIDDEN_STEPS: [Step; 1] = [Step::Delete(tables::is_hidden)];

static ENCODING_STEPS: [Step; 1] = [Step::Mojibake];

static MARKDOWN_STEPS: [Step; 1] = [Step::Markdown];

static NBSP_STEPS: [Step; 1] = [Step::Map(tables::NON_BREAKING_SPACE)];

static DASH_STEPS: [Step; 1] = [Step::Map(tables::DASHES)];

// A curly double-quoted span on one line is one quotation. Single quotes
// double as apostrophes and are never paired.
static QUOTE_STEPS: [Step; 3] = [
    Step::Substitute {
        regex: &RE_DOUBLE_QUOTED,
        replacement: "\"${1}\"",
    },
    Step::Map(tables::DOUBLE_QUOTES),
    Step::Map(tables::SINGLE_QUOTES),
];

static ELLIPSIS_STEPS: [Step; 1] = [Step::Map(tables::ELLIPSIS)];

static MATH_STEPS: [Step; 1] = [Step::Map(tables::MATH_SYMBOLS)];

static PUNCTUATION_STEPS: [Step; 1] = [Step::Map(tables::UNICODE_PUNCTUATION)];

static SPACING_STEPS: [Step; 2] = [
    Step::Map(tables::SPACES),
    Step::Substitute {
        regex: &RE_SPACE_RUN,
        replacement: " ",
    },
];

static ARTIFACT_STEPS: [Step; 2] = [
    Step::Delete(tables::is_artifact),
    Step::Collapse {
        regex: &RE_EXCESS_NEWLINES,
        keep: "\n\n",
    },
];

static TRAILING_STEPS: [Step; 1] = [Step::TrimLineEnds];

static CATALOG: [Rule; 12] = [
    Rule {
        category: RuleCategory::HiddenCharacters,
        tally: Tally::Removed,
        steps: &HIDDEN_STEPS,
    },
    Rule {
        category: RuleCategory::EncodingIssues,
        tally: Tally::Replaced,
        steps: &ENCODING_STEPS,
    },
    Rule {
        category: RuleCategory::MarkdownConversion,
        tally: Tally::Replaced,
        steps: &MARKDOWN_STEPS,
    },
    Rule {
        category: RuleCategory::NonBreakingSpace,
        tally: Tally::Replaced,
        steps: &NBSP_STEPS,
    },
    Rule {
        category: RuleCategory::Dashes,
        tally: Tally::Replaced,
        steps: &DASH_STEPS,
    },
    Rule {
        category: RuleCategory::Quotes,
        tally: Tally::Replaced,
        steps: &QUOTE_STEPS,
    },
    Rule {
        category: RuleCategory::Ellipsis,
        tally: Tally::Replaced,
        steps: &ELLIPSIS_STEPS,
    },
    Rule {
        category: RuleCategory::MathSymbols,
        tally: Tally::Replaced,
        steps: &MATH_STEPS,
    },
    Rule {
        category: RuleCategory::UnicodePunctuation,
        tally: Tally::Replaced,
        steps: &PUNCTUATION_STEPS,
    },
    Rule {
        category: RuleCategory::Spacing,
        tally: Tally::Replaced,
        steps: &SPACING_STEPS,
    },
    Rule {
        category: RuleCategory::AIArtifacts,
        tally: Tally::Removed,
        steps: &ARTIFACT_STEPS,
    },
    Rule {
        category: RuleCategory::TrailingWhitespace,
        tally: Tally::Removed,
        steps: &TRAILING_STEPS,
    },
];

/// All rules in canonical order.
pub fn catalog() -> &'static [Rule] {
    &CATALOG
}

/// The rule implementing a category.
pub fn rule(category: RuleCategory) -> &'static Rule {
    &CATALOG[category.order()]
}
