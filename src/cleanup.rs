//! Line-level cleanup for plain-text sources.
//!
//! Two passes live here: the numeric-table heuristic, which drops lines that
//! look like rows of figures rather than prose, and ligature expansion, which
//! batch runs apply to finished documents.

use crate::model::Page;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A line is a numeric row when more than this share of its words carry a digit.
pub const NUMERIC_ROW_RATIO: f64 = 0.4;

/// Typographic ligatures and their expansions.
pub const KNOWN_LIGATURES: &[(&str, &str)] = &[
    // Latin
    ("\u{FB00}", "ff"),  // ﬀ
    ("\u{FB01}", "fi"),  // ﬁ
    ("\u{FB02}", "fl"),  // ﬂ
    ("\u{FB03}", "ffi"), // ﬃ
    ("\u{FB04}", "ffl"), // ﬄ
    ("\u{FB05}", "ft"),  // ﬅ
    ("\u{FB06}", "st"),  // ﬆ
    ("\u{01F1}", "DZ"),  // Ǳ
    ("\u{01F2}", "Dz"),  // ǲ
    ("\u{01F3}", "dz"),  // ǳ
    ("\u{01C4}", "DŽ"),  // Ǆ
    ("\u{01C5}", "Dž"),  // ǅ
    ("\u{01C6}", "dž"),  // ǆ
    ("\u{A728}", "Tz"),  // Ꜩ
    ("\u{A729}", "tz"),  // ꜩ
    ("\u{1F670}", "et"), // 🙰
    ("\u{2114}", "lb"),  // ℔
    ("\u{1D6B}", "ue"),  // ᵫ
    ("\u{0132}", "IJ"),  // Ĳ
    ("\u{0133}", "ij"),  // ĳ
    ("\u{A74F}", "oo"),  // ꝏ
    // Armenian
    ("\u{FB13}", "մն"), // ﬓ
    ("\u{FB14}", "մե"), // ﬔ
    ("\u{FB15}", "մի"), // ﬕ
    ("\u{FB16}", "վն"), // ﬖ
    ("\u{FB17}", "մխ"), // ﬗ
];

/// Statistics collected while cleaning a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of form-feed delimited pages
    pub page_count: usize,

    /// Lines read across all pages
    pub line_count: usize,

    /// Lines dropped by the numeric-table heuristic
    pub removed_line_count: usize,

    /// Characters in the cleaned text
    pub char_count: usize,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that survived cleaning.
    pub fn kept_line_count(&self) -> usize {
        self.line_count - self.removed_line_count
    }
}

/// Cleaned pages of one file.
#[derive(Debug, Clone, Default)]
pub struct CleanedText {
    /// Page texts in source order
    pub pages: Vec<String>,

    /// What the cleaning pass did
    pub stats: ConversionStats,
}

impl CleanedText {
    /// Pages concatenated directly, with no separator.
    pub fn text(&self) -> String {
        self.pages.concat()
    }
}

/// Zero code points of the Unicode decimal digit (Nd) runs.
///
/// Every run is ten consecutive code points starting at its zero.
const DECIMAL_DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Check whether a character is a digit.
///
/// Decimal digits of any script count, as do superscript and subscript
/// digits. Fractions, Roman numerals and other numeric symbols do not.
pub fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    if !c.is_numeric() {
        return false;
    }
    let code = u32::from(c);
    matches!(c, '\u{00B2}' | '\u{00B3}' | '\u{00B9}' | '\u{2070}')
        || ('\u{2074}'..='\u{2079}').contains(&c)
        || ('\u{2080}'..='\u{2089}').contains(&c)
        || DECIMAL_DIGIT_ZEROS
            .iter()
            .any(|&zero| (zero..zero + 10).contains(&code))
}

/// Whitespace that separates words, including the `\x1c`-`\x1f` separators.
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{001C}'..='\u{001F}').contains(&c)
}

/// Check whether a line looks like a row of a numeric table.
///
/// True when the line has at least one word, more than [`NUMERIC_ROW_RATIO`] of
/// its words contain a digit, and it does not end with a period once trailing
/// whitespace is removed.
pub fn is_numeric_row(line: &str) -> bool {
    let mut words = 0usize;
    let mut digit_words = 0usize;
    for word in line.split(is_word_separator).filter(|w| !w.is_empty()) {
        words += 1;
        if word.chars().any(is_digit) {
            digit_words += 1;
        }
    }

    if words == 0 {
        return false;
    }

    let ratio = digit_words as f64 / words as f64;
    ratio > NUMERIC_ROW_RATIO && !line.trim_end_matches(is_word_separator).ends_with('.')
}

/// Clean every page, dropping numeric rows when asked.
///
/// Surviving lines are joined with `\n`. `source` is only used for logging.
pub fn clean_pages(pages: &[Page], remove_numeric_tables: bool, source: &Path) -> CleanedText {
    let mut stats = ConversionStats {
        page_count: pages.len(),
        ..ConversionStats::default()
    };

    let cleaned: Vec<String> = pages
        .iter()
        .map(|page| {
            stats.line_count += page.line_count();
            if !remove_numeric_tables {
                return page.text();
            }
            let mut kept = Page::new(page.number);
            for line in &page.lines {
                if is_numeric_row(line) {
                    log::debug!("Removing line '{}' from {}", line, source.display());
                    stats.removed_line_count += 1;
                } else {
                    kept.add_line(line.as_str());
                }
            }
            kept.text()
        })
        .collect();

    stats.char_count = cleaned.iter().map(|page| page.chars().count()).sum();

    CleanedText {
        pages: cleaned,
        stats,
    }
}

/// Replace every ligature in `text` with its expansion.
pub fn expand_ligatures<S: AsRef<str>>(text: &str, ligatures: &[(S, S)]) -> String {
    let mut result = text.to_string();
    for (ligature, replacement) in ligatures {
        let ligature = ligature.as_ref();
        if !ligature.is_empty() && result.contains(ligature) {
            result = result.replace(ligature, replacement.as_ref());
        }
    }
    result
}
