use anyhow::Result;
use csv::{Writer, WriterBuilder};
use std::io::Write;

use crate::import::ImportSummary;

const ROW_HEADERS: [&str; 10] = [
    "Row",
    "SheetName",
    "RosterName",
    "RosterIndex",
    "Tier",
    "Distance",
    "Matched",
    "Mark",
    "MarkWritten",
    "ObservationWritten",
];

/// One line per processed row, in sheet order.
pub fn write_outcomes_csv<W: Write>(summary: &ImportSummary, out: W) -> Result<()> {
    let mut w = WriterBuilder::new().from_writer(out);
    w.write_record(ROW_HEADERS)?;
    for o in &summary.outcomes {
        w.write_record([
            o.row_number.to_string(),
            o.name.clone(),
            o.candidate.clone().unwrap_or_default(),
            o.roster_index.map(|i| i.to_string()).unwrap_or_default(),
            o.tier.map(|t| t.as_str().to_string()).unwrap_or_default(),
            o.distance.map(|d| d.to_string()).unwrap_or_default(),
            o.matched.to_string(),
            o.mark.clone(),
            o.mark_written.to_string(),
            o.observation_written.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Per-row issues followed by a Key/Value block of run totals.
pub fn write_report_csv<W: Write>(summary: &ImportSummary, out: W) -> Result<()> {
    let mut w = WriterBuilder::new().flexible(true).from_writer(out);
    w.write_record(["Row", "SheetName", "Issue", "Detail"])?;
    for d in &summary.diagnostics {
        w.write_record([
            d.row_number.to_string(),
            d.name.clone(),
            d.issue.kind().to_string(),
            d.issue.detail(),
        ])?;
    }
    write_totals(&mut w, summary)?;
    w.flush()?;
    Ok(())
}

fn write_totals<W: Write>(w: &mut Writer<W>, s: &ImportSummary) -> Result<()> {
    w.write_record(["Key", "Value"])?;
    let mut write_kv = |k: &str, v: String| -> Result<()> {
        w.write_record([k, v.as_str()])?;
        Ok(())
    };
    write_kv("Rows", s.total_rows.to_string())?;
    write_kv("Skipped (blank)", s.skipped_blank.to_string())?;
    write_kv("Matches (Exact)", s.matched_exact.to_string())?;
    write_kv("Matches (Fuzzy)", s.matched_fuzzy.to_string())?;
    write_kv("Unmatched", s.unmatched.to_string())?;
    write_kv("Marks written", s.marks_written.to_string())?;
    write_kv("Observations written", s.observations_written.to_string())?;
    write_kv("Dry run", s.dry_run.to_string())?;
    write_kv("Started (UTC)", s.started_utc.to_rfc3339())?;
    write_kv("Ended (UTC)", s.ended_utc.to_rfc3339())?;
    write_kv("Duration (s)", format!("{:.3}", s.duration_secs))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{RowIssue, RowOutcome, SummaryBuilder};
    use crate::models::MatchTier;

    fn sample() -> ImportSummary {
        let mut b = SummaryBuilder::new(2, false);
        b.record_outcome(RowOutcome {
            row_number: 2,
            name: "Joan Perez".into(),
            candidate: Some("Pérez, Juan".into()),
            roster_index: Some(1),
            distance: Some(1),
            tier: Some(MatchTier::Fuzzy),
            matched: true,
            mark: "6".into(),
            mark_written: true,
            observation_written: true,
        });
        b.record_issue(
            3,
            "Nadie, Aqui",
            RowIssue::NoMatchFound {
                closest: Some("Pérez, Juan".into()),
                distance: Some(17),
            },
        );
        b.build()
    }

    #[test]
    fn outcomes_csv_has_header_and_row() {
        let mut buf = Vec::new();
        write_outcomes_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Row,SheetName,RosterName,RosterIndex,Tier,Distance,Matched,Mark,MarkWritten,ObservationWritten")
        );
        assert_eq!(
            lines.next(),
            Some("2,Joan Perez,\"Pérez, Juan\",1,fuzzy,1,true,6,true,true")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn report_lists_issues_then_totals() {
        let mut buf = Vec::new();
        write_report_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Row,SheetName,Issue,Detail\n"));
        assert!(text.contains("3,\"Nadie, Aqui\",no_match,"));
        assert!(text.contains("Matches (Fuzzy),1"));
        assert!(text.contains("Unmatched,0"));
    }
}
