use crate::models::CellValue;
use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Fold a raw name into its comparable form: diacritics stripped, lowercase,
/// hyphens read as spaces, whitespace trimmed and collapsed.
///
/// Lowercasing runs before decomposition so that letters whose lowercase form
/// carries a combining mark (`İ` -> `i̇`) are folded in the same pass, which
/// keeps the function idempotent.
pub fn normalize_name(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Leading run of ASCII digits of a textual mark ("7 Apte" -> "7").
/// Non-text cells yield an empty mark.
pub fn extract_mark(mark: &CellValue) -> String {
    match mark.as_text() {
        Some(s) => s.chars().take_while(|c| c.is_ascii_digit()).collect(),
        None => String::new(),
    }
}
