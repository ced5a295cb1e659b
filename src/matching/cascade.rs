//! Three-tier name resolution cascade.
//!
//! Tiers run in order and stop at the first exact hit:
//! 1. Exact: the canonical form (or the name as given, when it already has a
//!    comma) equals a normalized roster name.
//! 2. Alternative: the last-token-surname form equals a roster name; otherwise
//!    its nearest roster name by edit distance is kept.
//! 3. Fuzzy: nearest roster name to the canonical form.
//!
//! Tier 2 and tier 3 each yield their own nearest candidate and the two are
//! folded by distance, tier 2 winning ties. The fold result is accepted when
//! its distance is within `max_distance`.

use log::{debug, trace};

use crate::matching::format::{is_preformatted, to_alternative_order, to_canonical_order};
use crate::matching::levenshtein::edit_distance;
use crate::matching::roster::Roster;
use crate::models::{Hit, MatchResult, MatchTier, QueryForm};
use crate::normalize::normalize_name;

/// Empirical acceptance bound on edit distance for fuzzy hits.
pub const DEFAULT_MAX_DISTANCE: usize = 15;

/// Nearest roster entry: (index, distance).
type Nearest = Option<(usize, usize)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_distance: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE)
    }
}

impl Resolver {
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Resolve one spreadsheet name against a roster snapshot.
    pub fn resolve<'r, H>(&self, raw_name: &str, roster: &'r Roster<H>) -> MatchResult<'r, H> {
        if roster.is_empty() {
            debug!("empty roster; nothing to match for {:?}", raw_name);
            return MatchResult::none();
        }

        let preformatted = is_preformatted(raw_name);
        let canonical = if preformatted {
            normalize_name(raw_name)
        } else {
            normalize_name(&to_canonical_order(raw_name))
        };

        if let Some(index) = exact_scan(&canonical, roster) {
            trace!("{:?}: exact hit at {}", raw_name, index);
            return self.accept(roster, index, 0, MatchTier::Exact, QueryForm::Canonical);
        }

        let alternative = if preformatted {
            None
        } else {
            let alt = normalize_name(&to_alternative_order(raw_name));
            if let Some(index) = exact_scan(&alt, roster) {
                trace!("{:?}: alternative-format hit at {}", raw_name, index);
                return self.accept(roster, index, 0, MatchTier::Alternative, QueryForm::Alternative);
            }
            nearest(&alt, roster)
        };

        let fuzzy = nearest(&canonical, roster);
        let (index, distance, form) = match closer(alternative, fuzzy) {
            (Some((i, d)), true) => (i, d, QueryForm::Alternative),
            (Some((i, d)), false) => (i, d, QueryForm::Canonical),
            (None, _) => return MatchResult::none(),
        };
        trace!(
            "{:?}: nearest {} at distance {} via {:?} form",
            raw_name, index, distance, form
        );
        self.accept(roster, index, distance, MatchTier::Fuzzy, form)
    }

    fn accept<'r, H>(
        &self,
        roster: &'r Roster<H>,
        index: usize,
        distance: usize,
        tier: MatchTier,
        form: QueryForm,
    ) -> MatchResult<'r, H> {
        let Some(candidate) = roster.get(index) else {
            return MatchResult::none();
        };
        MatchResult {
            best: Some(Hit {
                index,
                candidate,
                distance,
                tier,
                form,
            }),
            matched: distance <= self.max_distance,
        }
    }
}

/// First roster entry whose normalized name equals `query`.
fn exact_scan<H>(query: &str, roster: &Roster<H>) -> Option<usize> {
    roster
        .entries()
        .find(|(_, _, name)| *name == query)
        .map(|(i, _, _)| i)
}

/// Minimum-distance roster entry; the earliest wins ties.
fn nearest<H>(query: &str, roster: &Roster<H>) -> Nearest {
    let mut best: Nearest = None;
    for (i, _, name) in roster.entries() {
        let d = edit_distance(query, name);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

/// Fold two nearest results by distance; `first` wins ties.
/// The flag reports whether the winner came from `first`.
fn closer(first: Nearest, second: Nearest) -> (Nearest, bool) {
    match (first, second) {
        (Some(a), Some(b)) if b.1 < a.1 => (Some(b), false),
        (Some(a), _) => (Some(a), true),
        (None, b) => (b, false),
    }
}
