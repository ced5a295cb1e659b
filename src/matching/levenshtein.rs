//! Levenshtein edit distance.

/// Edit distance between two sequences: the minimum number of single-element
/// insertions, deletions and substitutions turning `a` into `b`.
///
/// Fills the full `(|b|+1) x (|a|+1)` table; inputs here are names, so the
/// quadratic footprint is a few kilobytes at most.
pub fn levenshtein_by<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let cols = a.len() + 1;
    let mut table = vec![0usize; (b.len() + 1) * cols];
    for (j, cell) in table.iter_mut().take(cols).enumerate() {
        *cell = j;
    }
    for i in 1..=b.len() {
        table[i * cols] = i;
        for j in 1..cols {
            let diag = table[(i - 1) * cols + (j - 1)];
            table[i * cols + j] = if b[i - 1] == a[j - 1] {
                diag
            } else {
                let left = table[i * cols + (j - 1)];
                let up = table[(i - 1) * cols + j];
                1 + diag.min(left).min(up)
            };
        }
    }
    table[b.len() * cols + a.len()]
}

/// Character-level edit distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_by(&a, &b)
}

/// Edit distance expressed as a similarity percentage (0.0-100.0) of the
/// longer input's length.
pub fn similarity_pct(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let dist = edit_distance(a, b);
    (1.0 - (dist as f64 / max_len as f64)) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_empty() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("garcia lopez, ana", "garcia lopez, ana"), 0);
    }

    #[test]
    fn classic_pairs() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("perez, joan", "perez, juan"), 1);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("lopez, juan carlos garcia", "garcia lopez, juan carlos"),
            ("abc", "yabd"),
            ("ñandu", "nandu"),
        ];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(edit_distance("ñ", "n"), 1);
        assert_eq!(edit_distance("łukasz", "lukasz"), 1);
    }

    #[test]
    fn generic_over_tokens() {
        let a = ["garcia", "lopez", "ana"];
        let b = ["lopez", "ana"];
        assert_eq!(levenshtein_by(&a, &b), 1);
    }

    #[test]
    fn agrees_with_strsim() {
        let words = [
            "",
            "a",
            "garcia lopez, ana maria",
            "lopez, ana maria garcia",
            "perez, juan",
            "perez, joan",
            "martinez ruiz, pau",
            "ruiz, pau martinez",
        ];
        for a in words {
            for b in words {
                assert_eq!(edit_distance(a, b), strsim::levenshtein(a, b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity_pct("", ""), 100.0);
        assert_eq!(similarity_pct("abcd", "abcd"), 100.0);
        assert_eq!(similarity_pct("abcd", "wxyz"), 0.0);
        assert!((similarity_pct("perez, juan", "perez, joan") - 90.909).abs() < 0.01);
    }
}
