//! Route spreadsheet marks to the right roster entry when the two lists spell
//! student names differently.
//!
//! The core is [`matching::Resolver`]: names are normalized
//! ([`normalize::normalize_name`]), reordered into the roster's
//! "Surname(s), Given Names" layout and compared exactly, then by edit
//! distance. [`import::BatchImporter`] drives it row by row and pushes results
//! through a [`import::WriteBackPort`].

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod util;

pub use config::AppConfig;
pub use error::{ConfigError, ImportError, SourceError, WriteBackError};
pub use import::{BatchImporter, ImportSummary, WriteBackPort, run_import};
pub use matching::{Resolver, Roster};
pub use models::{CellValue, MatchResult, MatchTier, NameCandidate, StudentRow};
