use crate::models::NameCandidate;
use crate::normalize::normalize_name;

/// Point-in-time roster snapshot with every displayed name normalized once.
#[derive(Debug, Clone)]
pub struct Roster<H> {
    candidates: Vec<NameCandidate<H>>,
    normalized: Vec<String>,
}

impl<H> Roster<H> {
    pub fn new(candidates: Vec<NameCandidate<H>>) -> Self {
        let normalized = candidates
            .iter()
            .map(|c| normalize_name(&c.display_name))
            .collect();
        Self {
            candidates,
            normalized,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NameCandidate<H>> {
        self.candidates.get(index)
    }

    pub fn candidates(&self) -> &[NameCandidate<H>] {
        &self.candidates
    }

    /// Candidates paired with their normalized names, in roster order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &NameCandidate<H>, &str)> {
        self.candidates
            .iter()
            .zip(self.normalized.iter())
            .enumerate()
            .map(|(i, (c, n))| (i, c, n.as_str()))
    }
}

impl<H> FromIterator<NameCandidate<H>> for Roster<H> {
    fn from_iter<I: IntoIterator<Item = NameCandidate<H>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Supplies the names currently rendered by the roster page.
///
/// Queried once per import run; the result is treated as read-only.
pub trait RosterSource {
    type Handle;
    fn snapshot(&self) -> Vec<NameCandidate<Self::Handle>>;
}

impl<H: Clone> RosterSource for Vec<NameCandidate<H>> {
    type Handle = H;
    fn snapshot(&self) -> Vec<NameCandidate<H>> {
        self.clone()
    }
}

impl<H: Clone> RosterSource for [NameCandidate<H>] {
    type Handle = H;
    fn snapshot(&self) -> Vec<NameCandidate<H>> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_normalizes_once_in_order() {
        let roster: Roster<u32> = vec![
            NameCandidate::new(10, "García López, Ana María"),
            NameCandidate::new(20, "Pérez,  Juan"),
        ]
        .into_iter()
        .collect();
        let entries: Vec<_> = roster.entries().map(|(i, c, n)| (i, c.handle, n.to_string())).collect();
        assert_eq!(
            entries,
            vec![
                (0, 10, "garcia lopez, ana maria".to_string()),
                (1, 20, "perez, juan".to_string()),
            ]
        );
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).map(|c| c.handle), Some(20));
    }

    #[test]
    fn vec_source_snapshot_is_a_copy() {
        let source = vec![NameCandidate::new("a", "Pérez, Juan")];
        let snap = source.snapshot();
        assert_eq!(snap, source);
    }
}
