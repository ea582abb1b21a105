//! Code-point tables used by the rule catalog.

/// Invisible format characters deleted by the hidden-character rule.
pub(crate) fn is_hidden(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'              // Zero-width space
        | '\u{200C}'            // Zero-width non-joiner
        | '\u{200D}'            // Zero-width joiner
        | '\u{2060}'            // Word joiner
        | '\u{FEFF}'            // BOM / zero-width no-break space
        | '\u{200E}'            // Left-to-right mark
        | '\u{200F}'            // Right-to-left mark
        | '\u{202A}'..='\u{202E}' // Directional embeddings and overrides
        | '\u{2066}'..='\u{2069}' // Directional isolates
        | '\u{061C}'            // Arabic letter mark
        | '\u{180E}'            // Mongolian vowel separator
        | '\u{034F}'            // Combining grapheme joiner
    )
}

/// Characters typically left behind by generated or pasted text.
///
/// Tab, line feed and carriage return are kept.
pub(crate) fn is_artifact(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => false,
        '\u{00}'..='\u{1F}' => true, // C0 controls
        '\u{7F}' => true,            // DEL
        '\u{80}'..='\u{9F}' => true, // C1 controls
        '\u{00AD}' => true,          // Soft hyphen
        '\u{FFFD}' => true,          // Replacement character
        _ => false,
    }
}

pub(crate) const NON_BREAKING_SPACE: &[(char, &str)] = &[('\u{00A0}', " ")];

pub(crate) const DASHES: &[(char, &str)] = &[
    ('\u{2014}', "-"), // Em dash
    ('\u{2013}', "-"), // En dash
    ('\u{2212}', "-"), // Minus sign
];

pub(crate) const DOUBLE_QUOTES: &[(char, &str)] = &[
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201E}', "\""), // Low-9
];

pub(crate) const SINGLE_QUOTES: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', "'"), // Low-9
];

pub(crate) const ELLIPSIS: &[(char, &str)] = &[('\u{2026}', "...")];

pub(crate) const MATH_SYMBOLS: &[(char, &str)] = &[
    ('×', "*"),
    ('÷', "/"),
    ('≤', "<="),
    ('≥', ">="),
    ('≠', "!="),
    ('±', "+/-"),
    ('∞', "infinity"),
    ('°', " degrees"),
    ('′', "'"),
    ('″', "\""),
    ('‰', " per mille"),
    ('∑', "sum"),
    ('∏', "product"),
    ('√', "sqrt"),
    ('∆', "delta"),
    ('π', "pi"),
    ('µ', "u"), // Micro sign
];

pub(crate) const UNICODE_PUNCTUATION: &[(char, &str)] = &[
    ('«', "\""),
    ('»', "\""),
    ('‹', "'"),
    ('›', "'"),
    ('\u{201E}', "\""), // Double low-9 quotation mark
    ('\u{201A}', "'"),  // Single low-9 quotation mark
    ('¡', "!"),
    ('¿', "?"),
    ('\u{203E}', "-"), // Overline
    ('\u{2044}', "/"), // Fraction slash
    ('\u{2215}', "/"), // Division slash
    ('\u{29F8}', "/"), // Big solidus
    ('\u{29F9}', "\\"), // Big reverse solidus
    ('\u{FF0F}', "/"), // Fullwidth solidus
    ('\u{FF3C}', "\\"), // Fullwidth reverse solidus
    ('\u{2010}', "-"), // Hyphen
    ('\u{2011}', "-"), // Non-breaking hyphen
];

pub(crate) const SPACES: &[(char, &str)] = &[
    ('\u{2000}', " "), // En quad
    ('\u{2001}', " "), // Em quad
    ('\u{2002}', " "), // En space
    ('\u{2003}', " "), // Em space
    ('\u{2004}', " "), // Three-per-em space
    ('\u{2005}', " "), // Four-per-em space
    ('\u{2006}', " "), // Six-per-em space
    ('\u{2007}', " "), // Figure space
    ('\u{2008}', " "), // Punctuation space
    ('\u{2009}', " "), // Thin space
    ('\u{200A}', " "), // Hair space
    ('\u{202F}', " "), // Narrow no-break space
    ('\u{205F}', " "), // Medium mathematical space
    ('\u{3000}', " "), // Ideographic space
];

/// Looks up a character's replacement in a mapping table.
pub(crate) fn lookup(table: &[(char, &'static str)], c: char) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, replacement)| *replacement)
}
