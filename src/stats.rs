//! Statistics accumulated while cleaning.

use crate::category::RuleCategory;
use serde::Serialize;

/// How a rule's count is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tally {
    /// Characters deleted with no substitute.
    Removed,
    /// Matched spans substituted with different content.
    Replaced,
}

/// Counters for a single cleaning call.
///
/// Lengths are measured in Unicode scalar values (`char`s), not in UTF-8 or
/// UTF-16 code units: `"é🎉"` has length 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Characters deleted with no substitute
    pub removed_count: usize,
    /// Occurrences substituted with different content
    pub replaced_count: usize,
    /// Length of the input, in scalar values
    pub original_length: usize,
    /// Length of the output, in scalar values
    pub final_length: usize,
}

impl CleaningStats {
    /// Starts a fresh accumulator for an input of the given text.
    pub(crate) fn start(input: &str) -> Self {
        Self {
            original_length: input.chars().count(),
            ..Self::default()
        }
    }

    /// Adds a rule's count to the matching counter.
    pub(crate) fn record(&mut self, tally: Tally, count: usize) {
        match tally {
            Tally::Removed => self.removed_count += count,
            Tally::Replaced => self.replaced_count += count,
        }
    }

    pub(crate) fn finish(&mut self, output: &str) {
        self.final_length = output.chars().count();
    }

    /// Total number of changes of either kind.
    pub fn total_changes(&self) -> usize {
        self.removed_count + self.replaced_count
    }

    /// Returns true if nothing was removed or replaced.
    pub fn is_unchanged(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Count contributed by one rule during a cleaning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Change {
    pub category: RuleCategory,
    pub tally: Tally,
    pub count: usize,
}

/// Cleaned text together with the statistics of the call that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningResult {
    /// The transformed text
    pub text: String,
    /// Counters snapshot taken after all rules ran
    pub stats: CleaningStats,
    /// Per-rule counts, in canonical order, for rules that changed something
    pub changes: Vec<Change>,
}

impl CleaningResult {
    /// Consumes the result and returns the cleaned text.
    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_records_original_length() {
        let stats = CleaningStats::start("héllo\u{200B}");
        assert_eq!(stats.original_length, 6);
        assert_eq!(stats.final_length, 0);
        assert!(stats.is_unchanged());
    }

    #[test]
    fn test_lengths_count_scalar_values() {
        let text = "e\u{301}\u{1F389}";
        let mut stats = CleaningStats::start(text);
        stats.finish("\u{1F389}");
        assert_eq!(text.len(), 7);
        assert_eq!(text.encode_utf16().count(), 4);
        assert_eq!(stats.original_length, 3);
        assert_eq!(stats.final_length, 1);
    }

    #[test]
    fn test_record_routes_by_tally() {
        let mut stats = CleaningStats::default();
        stats.record(Tally::Removed, 3);
        stats.record(Tally::Replaced, 2);
        stats.record(Tally::Removed, 1);
        assert_eq!(stats.removed_count, 4);
        assert_eq!(stats.replaced_count, 2);
        assert_eq!(stats.total_changes(), 6);
    }

    #[test]
    fn test_neutral_result() {
        let result = CleaningResult::default();
        assert!(result.text.is_empty());
        assert_eq!(result.stats, CleaningStats::default());
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_serialize_stats() {
        let stats = CleaningStats {
            removed_count: 1,
            replaced_count: 2,
            original_length: 10,
            final_length: 9,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["removed_count"], 1);
        assert_eq!(json["final_length"], 9);
    }
}
