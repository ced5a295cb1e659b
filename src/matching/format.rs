//! Reorder "Given Names Surname(s)" spreadsheet names into the roster's
//! "Surname(s), Given Names" layout.

/// Names containing a comma are already in roster layout.
pub fn is_preformatted(raw: &str) -> bool {
    raw.contains(',')
}

/// Canonical ordering: with more than two tokens the last two are the
/// surnames (compound surnames are the common case); otherwise everything
/// after the first token is.
///
/// A single token is taken as the given name with an empty surname
/// (`"Ana"` -> `", Ana"`).
pub fn to_canonical_order(raw: &str) -> String {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let split = if parts.len() > 2 {
        parts.len() - 2
    } else {
        parts.len().min(1)
    };
    let (given, surnames) = parts.split_at(split);
    format!("{}, {}", surnames.join(" "), given.join(" "))
}

/// Alternative ordering: exactly the last token is the surname.
pub fn to_alternative_order(raw: &str) -> String {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let split = parts.len().saturating_sub(1);
    let (given, surname) = parts.split_at(split);
    format!("{}, {}", surname.join(" "), given.join(" "))
}
