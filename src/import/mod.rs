//! Batch import: route every spreadsheet row through the resolver and push
//! accepted marks and observations into the roster.
//!
//! Rows are handled strictly in sheet order, one at a time, because each
//! write-back mutates the roster the next row is matched against. Per-row
//! problems become [`RowIssue`]s and never stop the batch; only an unreadable
//! sheet, invalid configuration or a failed final commit do.

pub mod port;
pub mod sheet;
pub mod summary;

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::config::AppConfig;
use crate::error::ImportError;
use crate::matching::{Resolver, Roster, RosterSource};
use crate::models::{MatchResult, StudentRow};
use crate::normalize::extract_mark;

pub use port::WriteBackPort;
pub use sheet::{SheetSource, rows_from_table};
pub use summary::{
    ImportProgress, ImportStatus, ImportSummary, RowDiagnostic, RowIssue, RowOutcome,
    SummaryBuilder,
};

/// Side-effect-free resolution of one row, as returned by [`BatchImporter::preview`].
#[derive(Debug)]
pub struct RowPlan<'r, H> {
    pub row_number: usize,
    /// `None` when the row lacks a name or a mark.
    pub result: Option<MatchResult<'r, H>>,
    pub mark: String,
}

#[derive(Debug, Clone)]
pub struct BatchImporter {
    resolver: Resolver,
    dry_run: bool,
    progress_every: usize,
}

impl Default for BatchImporter {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl BatchImporter {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            resolver: Resolver::new(cfg.matching.max_distance),
            dry_run: cfg.import.dry_run,
            progress_every: cfg.import.progress_every.max(1),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Import all rows into the roster through `port`, then commit once.
    pub fn import_all<H, P, F>(
        &self,
        rows: &[StudentRow],
        roster: &Roster<H>,
        port: &mut P,
        mut on_progress: F,
    ) -> Result<ImportSummary, ImportError>
    where
        P: WriteBackPort<H> + ?Sized,
        F: FnMut(ImportProgress),
    {
        let total = rows.len();
        let mut summary = SummaryBuilder::new(total, self.dry_run);
        info!(
            "importing {} rows against {} roster entries (max distance {}{})",
            total,
            roster.len(),
            self.resolver.max_distance(),
            if self.dry_run { ", dry run" } else { "" }
        );
        on_progress(ImportProgress::new(0, total, ImportStatus::Processing, "start"));

        for (i, row) in rows.iter().enumerate() {
            self.import_row(row, roster, port, &mut summary);
            let processed = i + 1;
            if processed % self.progress_every == 0 && processed < total {
                on_progress(ImportProgress::new(
                    processed,
                    total,
                    ImportStatus::Processing,
                    "rows",
                ));
            }
        }

        if !self.dry_run {
            if let Err(e) = port.commit() {
                error!("final commit failed: {}", e);
                on_progress(ImportProgress::new(total, total, ImportStatus::Failed, "commit"));
                return Err(ImportError::Commit(e));
            }
        }

        let summary = summary.build();
        info!(
            "import finished: {} exact, {} fuzzy, {} unmatched, {} blank in {:.3}s",
            summary.matched_exact,
            summary.matched_fuzzy,
            summary.unmatched,
            summary.skipped_blank,
            summary.duration_secs
        );
        on_progress(ImportProgress::new(total, total, ImportStatus::Succeeded, "done"));
        Ok(summary)
    }

    fn import_row<H, P>(
        &self,
        row: &StudentRow,
        roster: &Roster<H>,
        port: &mut P,
        summary: &mut SummaryBuilder,
    ) where
        P: WriteBackPort<H> + ?Sized,
    {
        if row.name.trim().is_empty() || row.mark.is_blank() {
            debug!("row {}: missing name or mark, skipped", row.row_number);
            summary.skip_blank();
            return;
        }

        let result = self.resolver.resolve(&row.name, roster);
        let mark = extract_mark(&row.mark);
        let mut outcome = RowOutcome {
            row_number: row.row_number,
            name: row.name.clone(),
            candidate: result.best.map(|h| h.candidate.display_name.clone()),
            roster_index: result.best.map(|h| h.index),
            distance: result.distance(),
            tier: result.best.map(|h| h.tier),
            matched: result.matched,
            mark: mark.clone(),
            mark_written: false,
            observation_written: false,
        };

        let Some(hit) = result.best.filter(|_| result.matched) else {
            let issue = RowIssue::NoMatchFound {
                closest: outcome.candidate.clone(),
                distance: outcome.distance,
            };
            warn!("row {} {:?}: no match ({})", row.row_number, row.name, issue.detail());
            summary.record_issue(row.row_number, &row.name, issue);
            summary.record_outcome(outcome);
            return;
        };
        debug!(
            "row {} {:?} -> {:?} ({} tier, distance {})",
            row.row_number, row.name, hit.candidate.display_name, hit.tier, hit.distance
        );

        if mark.is_empty() {
            let issue = RowIssue::MalformedMark {
                raw: row.mark.display(),
            };
            warn!("row {} {:?}: {}", row.row_number, row.name, issue.detail());
            summary.record_issue(row.row_number, &row.name, issue);
        } else if !self.dry_run {
            match port.apply_mark(&hit.candidate.handle, &mark) {
                Ok(()) => outcome.mark_written = true,
                Err(e) => {
                    warn!("row {} {:?}: {}", row.row_number, row.name, e);
                    summary.record_issue(
                        row.row_number,
                        &row.name,
                        RowIssue::WriteBackUnavailable {
                            field: "mark",
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        let observation = row.observation.trim();
        if !observation.is_empty() && !self.dry_run {
            match port.apply_observation(&hit.candidate.handle, observation) {
                Ok(()) => outcome.observation_written = true,
                Err(e) => {
                    warn!("row {} {:?}: {}", row.row_number, row.name, e);
                    summary.record_issue(
                        row.row_number,
                        &row.name,
                        RowIssue::WriteBackUnavailable {
                            field: "observation",
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        summary.record_outcome(outcome);
    }

    /// Resolve every row in parallel without touching the roster. Plans come
    /// back in row order.
    pub fn preview<'r, H: Sync>(
        &self,
        rows: &[StudentRow],
        roster: &'r Roster<H>,
    ) -> Vec<RowPlan<'r, H>> {
        rows.par_iter()
            .map(|row| {
                let eligible = !row.name.trim().is_empty() && !row.mark.is_blank();
                RowPlan {
                    row_number: row.row_number,
                    result: eligible.then(|| self.resolver.resolve(&row.name, roster)),
                    mark: extract_mark(&row.mark),
                }
            })
            .collect()
    }
}

/// Read the sheet, snapshot the roster once and import every row.
///
/// A sheet that cannot be read is fatal: nothing is written and a
/// [`ImportStatus::Failed`] update is emitted.
pub fn run_import<S, R, P, F>(
    sheet: &mut S,
    roster_source: &R,
    port: &mut P,
    config: &AppConfig,
    mut on_progress: F,
) -> Result<ImportSummary, ImportError>
where
    S: SheetSource + ?Sized,
    R: RosterSource + ?Sized,
    P: WriteBackPort<R::Handle> + ?Sized,
    F: FnMut(ImportProgress),
{
    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        on_progress(ImportProgress::new(0, 0, ImportStatus::Failed, "config"));
        return Err(e.into());
    }

    let table = match sheet.read_table() {
        Ok(table) => table,
        Err(e) => {
            error!("could not read spreadsheet: {}", e);
            on_progress(ImportProgress::new(0, 0, ImportStatus::Failed, "read"));
            return Err(e.into());
        }
    };
    let rows = rows_from_table(&table, &config.columns);
    let roster = Roster::new(roster_source.snapshot());
    debug!("sheet rows: {}, roster entries: {}", rows.len(), roster.len());

    BatchImporter::from_config(config).import_all(&rows, &roster, port, &mut on_progress)
}
