//! Batch status, per-row diagnostics and the run summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::MatchTier;

/// Batch-level status shown to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportStatus {
    Processing,
    Succeeded,
    Failed,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Succeeded => "success",
            Self::Failed => "failure",
        }
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportProgress {
    pub processed: usize,
    pub total: usize,
    pub percent: f32,
    pub status: ImportStatus,
    pub stage: &'static str,
}

impl ImportProgress {
    pub fn new(processed: usize, total: usize, status: ImportStatus, stage: &'static str) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            processed as f32 / total as f32 * 100.0
        };
        Self {
            processed,
            total,
            percent,
            status,
            stage,
        }
    }
}

/// A non-fatal problem with one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RowIssue {
    /// Closest roster name was beyond the threshold, or the roster was empty.
    NoMatchFound {
        closest: Option<String>,
        distance: Option<usize>,
    },
    /// No leading digits in the mark cell; nothing was written for the mark.
    MalformedMark { raw: String },
    WriteBackUnavailable { field: &'static str, reason: String },
}

impl RowIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoMatchFound { .. } => "no_match",
            Self::MalformedMark { .. } => "malformed_mark",
            Self::WriteBackUnavailable { .. } => "write_back_unavailable",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::NoMatchFound {
                closest: Some(name),
                distance: Some(d),
            } => format!("closest {:?} at distance {}", name, d),
            Self::NoMatchFound { .. } => "roster empty".to_string(),
            Self::MalformedMark { raw } => format!("mark {:?} has no leading digits", raw),
            Self::WriteBackUnavailable { field, reason } => format!("{}: {}", field, reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiagnostic {
    pub row_number: usize,
    pub name: String,
    pub issue: RowIssue,
}

/// What happened to one eligible row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub row_number: usize,
    pub name: String,
    /// Displayed roster name of the closest candidate, accepted or not.
    pub candidate: Option<String>,
    pub roster_index: Option<usize>,
    pub distance: Option<usize>,
    pub tier: Option<MatchTier>,
    pub matched: bool,
    pub mark: String,
    pub mark_written: bool,
    pub observation_written: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub skipped_blank: usize,
    pub matched_exact: usize,
    pub matched_fuzzy: usize,
    pub unmatched: usize,
    pub marks_written: usize,
    pub observations_written: usize,
    pub dry_run: bool,
    pub outcomes: Vec<RowOutcome>,
    pub diagnostics: Vec<RowDiagnostic>,
    pub started_utc: DateTime<Utc>,
    pub ended_utc: DateTime<Utc>,
    pub duration_secs: f64,
}

impl ImportSummary {
    pub fn matched(&self) -> usize {
        self.matched_exact + self.matched_fuzzy
    }

    pub fn outcome_for_row(&self, row_number: usize) -> Option<&RowOutcome> {
        self.outcomes.iter().find(|o| o.row_number == row_number)
    }

    pub fn issues_for_row(&self, row_number: usize) -> impl Iterator<Item = &RowIssue> {
        self.diagnostics
            .iter()
            .filter(move |d| d.row_number == row_number)
            .map(|d| &d.issue)
    }
}

/// Accumulates row results while a batch runs.
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    total_rows: usize,
    skipped_blank: usize,
    matched_exact: usize,
    matched_fuzzy: usize,
    unmatched: usize,
    marks_written: usize,
    observations_written: usize,
    dry_run: bool,
    outcomes: Vec<RowOutcome>,
    diagnostics: Vec<RowDiagnostic>,
    started_utc: DateTime<Utc>,
}

impl SummaryBuilder {
    pub fn new(total_rows: usize, dry_run: bool) -> Self {
        Self {
            total_rows,
            skipped_blank: 0,
            matched_exact: 0,
            matched_fuzzy: 0,
            unmatched: 0,
            marks_written: 0,
            observations_written: 0,
            dry_run,
            outcomes: Vec::new(),
            diagnostics: Vec::new(),
            started_utc: Utc::now(),
        }
    }

    pub fn skip_blank(&mut self) {
        self.skipped_blank += 1;
    }

    pub fn record_issue(&mut self, row_number: usize, name: &str, issue: RowIssue) {
        self.diagnostics.push(RowDiagnostic {
            row_number,
            name: name.to_string(),
            issue,
        });
    }

    pub fn record_outcome(&mut self, outcome: RowOutcome) {
        match (outcome.matched, outcome.distance) {
            (true, Some(0)) => self.matched_exact += 1,
            (true, _) => self.matched_fuzzy += 1,
            (false, _) => self.unmatched += 1,
        }
        if outcome.mark_written {
            self.marks_written += 1;
        }
        if outcome.observation_written {
            self.observations_written += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn build(self) -> ImportSummary {
        let ended_utc = Utc::now();
        let duration_secs = (ended_utc - self.started_utc).num_milliseconds() as f64 / 1000.0;
        ImportSummary {
            total_rows: self.total_rows,
            skipped_blank: self.skipped_blank,
            matched_exact: self.matched_exact,
            matched_fuzzy: self.matched_fuzzy,
            unmatched: self.unmatched,
            marks_written: self.marks_written,
            observations_written: self.observations_written,
            dry_run: self.dry_run,
            outcomes: self.outcomes,
            diagnostics: self.diagnostics,
            started_utc: self.started_utc,
            ended_utc,
            duration_secs,
        }
    }
}
