use serde::{Deserialize, Serialize};

/// A raw spreadsheet cell as handed over by the sheet collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) => false,
        }
    }

    /// Render the cell as text. Integral numbers drop the fractional part.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One spreadsheet data row after column mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRow {
    /// 1-based row number in the sheet; the header occupies row 1.
    pub row_number: usize,
    pub name: String,
    pub mark: CellValue,
    pub observation: String,
}

impl StudentRow {
    pub fn new(row_number: usize, name: &str, mark: CellValue, observation: &str) -> Self {
        Self {
            row_number,
            name: name.to_string(),
            mark,
            observation: observation.to_string(),
        }
    }
}

/// A roster entry: an opaque handle back to the rendered record plus its displayed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate<H> {
    pub handle: H,
    pub display_name: String,
}

impl<H> NameCandidate<H> {
    pub fn new(handle: H, display_name: impl Into<String>) -> Self {
        Self {
            handle,
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Canonical (or pre-formatted) form equals a roster name.
    Exact,
    /// Alternative form equals a roster name.
    Alternative,
    /// Closest roster name by edit distance.
    Fuzzy,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Alternative => "alternative",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which formatted query produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryForm {
    Canonical,
    Alternative,
}

#[derive(Debug)]
pub struct Hit<'r, H> {
    /// Position of the candidate in the roster snapshot.
    pub index: usize,
    pub candidate: &'r NameCandidate<H>,
    pub distance: usize,
    pub tier: MatchTier,
    pub form: QueryForm,
}

impl<H> Clone for Hit<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Hit<'_, H> {}

#[derive(Debug)]
pub struct MatchResult<'r, H> {
    /// Closest candidate found, accepted or not. `None` only for an empty roster.
    pub best: Option<Hit<'r, H>>,
    pub matched: bool,
}

impl<'r, H> MatchResult<'r, H> {
    pub fn none() -> Self {
        Self {
            best: None,
            matched: false,
        }
    }

    /// The accepted candidate, if any.
    pub fn candidate(&self) -> Option<&'r NameCandidate<H>> {
        self.best.filter(|_| self.matched).map(|h| h.candidate)
    }

    pub fn distance(&self) -> Option<usize> {
        self.best.map(|h| h.distance)
    }

    pub fn is_exact(&self) -> bool {
        self.matched && self.best.is_some_and(|h| h.distance == 0)
    }
}

impl<H> Clone for MatchResult<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for MatchResult<'_, H> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(!CellValue::Text("7".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(CellValue::Number(f64::NAN).is_blank());
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(7.0).display(), "7");
        assert_eq!(CellValue::Number(7.5).display(), "7.5");
        assert_eq!(CellValue::Text("Notable".into()).display(), "Notable");
        assert_eq!(CellValue::Empty.display(), "");
    }

    #[test]
    fn candidate_hidden_when_rejected() {
        let c = NameCandidate::new(3usize, "Pérez, Juan");
        let hit = Hit {
            index: 0,
            candidate: &c,
            distance: 20,
            tier: MatchTier::Fuzzy,
            form: QueryForm::Canonical,
        };
        let r = MatchResult {
            best: Some(hit),
            matched: false,
        };
        assert!(r.candidate().is_none());
        assert_eq!(r.distance(), Some(20));
        assert!(!r.is_exact());
    }
}
