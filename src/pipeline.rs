//! Cleaning entry points.
//!
//! Each call owns its own statistics accumulator; nothing is shared between
//! calls, so any number of them can run at once.

use crate::config::CleaningConfig;
use crate::rules;
use crate::stats::{Change, CleaningResult, CleaningStats};
use std::borrow::Cow;

/// Runs every enabled rule over `text` in canonical order.
///
/// Rules are composed sequentially: each one sees the previous rule's
/// output. Disabled rules are skipped entirely.
///
/// # Example
///
/// ```
/// use scrubtext::{clean, CleaningConfig};
///
/// let result = clean("\u{201C}hello\u{2019}s\u{201D}", &CleaningConfig::default());
/// assert_eq!(result.text, "\"hello's\"");
/// assert_eq!(result.stats.replaced_count, 2);
/// ```
pub fn clean(text: &str, config: &CleaningConfig) -> CleaningResult {
    let mut stats = CleaningStats::start(text);
    let mut changes = Vec::new();
    let mut current = Cow::Borrowed(text);

    for rule in rules::catalog() {
        let category = rule.category();
        if !config.is_enabled(category) {
            tracing::trace!(rule = category.key(), "rule disabled, skipping");
            continue;
        }

        let applied = rule.apply(&current);
        if applied.count == 0 {
            continue;
        }

        tracing::debug!(
            rule = category.key(),
            tally = ?rule.tally(),
            count = applied.count,
            "rule applied"
        );
        stats.record(rule.tally(), applied.count);
        changes.push(Change {
            category,
            tally: rule.tally(),
            count: applied.count,
        });

        let owned = match applied.text {
            Cow::Owned(changed) => Some(changed),
            Cow::Borrowed(_) => None,
        };
        if let Some(changed) = owned {
            current = Cow::Owned(changed);
        }
    }

    stats.finish(&current);
    CleaningResult {
        text: current.into_owned(),
        stats,
        changes,
    }
}

/// Like [`clean`], but a missing input yields the neutral result:
/// empty text and all-zero statistics.
pub fn clean_optional(text: Option<&str>, config: &CleaningConfig) -> CleaningResult {
    match text {
        Some(text) => clean(text, config),
        None => CleaningResult::default(),
    }
}

/// Cleans raw bytes. Input that is not valid UTF-8 yields the neutral result.
pub fn clean_bytes(bytes: &[u8], config: &CleaningConfig) -> CleaningResult {
    match std::str::from_utf8(bytes) {
        Ok(text) => clean(text, config),
        Err(e) => {
            tracing::warn!("input is not valid UTF-8, nothing cleaned: {}", e);
            CleaningResult::default()
        }
    }
}

/// Cleans many texts, each with its own accumulator.
///
/// With the `parallel` feature the batch runs on the rayon thread pool.
pub fn clean_many<S>(texts: &[S], config: &CleaningConfig) -> Vec<CleaningResult>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        texts
            .par_iter()
            .map(|text| clean(text.as_ref(), config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        texts
            .iter()
            .map(|text| clean(text.as_ref(), config))
            .collect()
    }
}
