//! Repair of UTF-8 text that was decoded as Windows-1252.
//!
//! The garbled forms are derived rather than typed out: each intended
//! character is encoded as UTF-8 and the bytes are decoded as Windows-1252,
//! which yields exactly the sequence a mismatched decoder would have produced
//! (`’` becomes `â€™`, `é` becomes `Ã©`, `©` becomes `Â©`).

use encoding_rs::WINDOWS_1252;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Characters whose mis-decoded forms are recognized.
const INTENDED: &[char] = &[
    // Punctuation
    '\u{2019}', '\u{2018}', '\u{201C}', '\u{201D}', '\u{2013}', '\u{2014}', '\u{2026}',
    '\u{2022}', '\u{00A0}',
    // Symbols
    '\u{2122}', '\u{00A9}', '\u{00AE}', '\u{00B0}', '\u{20AC}', '\u{00A3}', '\u{00A7}',
    '\u{00BD}',
    // Accented letters
    'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç', 'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï', 'ñ', 'ò',
    'ó', 'ô', 'õ', 'ö', 'ø', 'ù', 'ú', 'û', 'ü', 'ý', 'ÿ', 'ß', 'À', 'Á', 'Â', 'Ä', 'Å', 'Ç',
    'Ã', 'È', 'É', 'Ê', 'Í', 'Ñ', 'Ó', 'Ô', 'Ö', 'Ø', 'Ú', 'Ü',
];

/// Double-encoded text needs one pass per encoding round.
const MAX_PASSES: usize = 3;

struct MojibakeTable {
    pattern: Regex,
    repairs: HashMap<String, char>,
}

impl MojibakeTable {
    fn build() -> Self {
        let mut repairs = HashMap::with_capacity(INTENDED.len());
        for &intended in INTENDED {
            repairs.insert(garble(intended), intended);
        }

        // Longest sequences first so a shared prefix never wins over a full match
        let mut sequences: Vec<&String> = repairs.keys().collect();
        sequences.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let alternation = sequences
            .iter()
            .map(|sequence| regex::escape(sequence))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            pattern: Regex::new(&alternation).unwrap(),
            repairs,
        }
    }

    fn repair_sequence(&self, sequence: &str) -> String {
        match self.repairs.get(sequence) {
            Some(intended) => intended.to_string(),
            None => sequence.to_string(),
        }
    }
}

static TABLE: LazyLock<MojibakeTable> = LazyLock::new(MojibakeTable::build);

/// Produces the sequence a Windows-1252 decoder shows for a UTF-8 character.
pub(crate) fn garble(intended: char) -> String {
    let mut buf = [0u8; 4];
    let bytes = intended.encode_utf8(&mut buf).as_bytes();
    let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    decoded.into_owned()
}

/// Replaces every known mis-decoded sequence with its intended character.
///
/// Returns the repaired text and the number of sequences replaced.
pub(crate) fn repair(text: &str) -> (Cow<'_, str>, usize) {
    let table = &*TABLE;
    let mut current = Cow::Borrowed(text);
    let mut total = 0;

    for _ in 0..MAX_PASSES {
        let found = table.pattern.find_iter(&current).count();
        if found == 0 {
            break;
        }
        total += found;

        let repaired = table
            .pattern
            .replace_all(&current, |caps: &Captures| table.repair_sequence(&caps[0]))
            .into_owned();
        current = Cow::Owned(repaired);
    }

    (current, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garble_known_forms() {
        assert_eq!(garble('\u{2019}'), "â€™");
        assert_eq!(garble('é'), "Ã©");
        assert_eq!(garble('©'), "Â©");
        assert_eq!(garble('\u{2122}'), "â„¢");
    }

    #[test]
    fn test_garbled_right_double_quote_keeps_c1_byte() {
        // 0x9D has no Windows-1252 mapping and decodes to the C1 control
        assert_eq!(garble('\u{201D}'), "â€\u{9D}");
    }

    #[test]
    fn test_repair_curly_quote_mojibake() {
        let (text, count) = repair("Itâ€™s â€œquotedâ€\u{9D}");
        assert_eq!(text, "It\u{2019}s \u{201C}quoted\u{201D}");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_repair_accented_letters() {
        let (text, count) = repair("cafÃ© dÃ©jÃ\u{A0} vu");
        assert_eq!(text, "café déjà vu");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_repair_symbols() {
        let (text, count) = repair("Â© 2024 Acmeâ„¢");
        assert_eq!(text, "© 2024 Acme™");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_repair_double_encoded() {
        let once = garble('é');
        let twice: String = once.chars().map(garble).collect();
        let (text, count) = repair(&twice);
        assert_eq!(text, "é");
        assert_eq!(count, 3); // two sequences on the first pass, one on the second
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        let (text, count) = repair("plain text, déjà vu");
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_every_intended_char_round_trips() {
        for &intended in INTENDED {
            let garbled = garble(intended);
            let (text, count) = repair(&garbled);
            assert_eq!(text, intended.to_string());
            assert_eq!(count, 1);
        }
    }
}
