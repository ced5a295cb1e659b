//! Name resolution: formatting, edit distance and the tiered cascade.

pub mod cascade;
pub mod format;
pub mod levenshtein;
pub mod roster;

pub use cascade::{DEFAULT_MAX_DISTANCE, Resolver};
pub use roster::{Roster, RosterSource};
