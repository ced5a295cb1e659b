pub mod report_csv;

pub use report_csv::{write_outcomes_csv, write_report_csv};
