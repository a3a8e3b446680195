use crate::domain::{Derivation, SourceNumber, SourceSet};
use std::cmp::Ordering;

/// A value available for further combination, with the derivation that built it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableValue {
    /// Cached value of `derivation`
    pub value: u64,

    pub derivation: Derivation,
}

impl AvailableValue {
    pub fn new(derivation: Derivation) -> Self {
        Self {
            value: derivation.value(),
            derivation,
        }
    }

    /// Sort key: ascending value, then ascending lowest source identity.
    ///
    /// Values in one state never share a source, so the key is a total order
    /// over the values of a state.
    fn sort_key(&self) -> (u64, usize) {
        (self.value, self.derivation.sources().lowest().unwrap_or(usize::MAX))
    }

    fn cmp_canonical(&self, other: &AvailableValue) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Canonical signature of a search state: sorted `(value, sources)` pairs
pub type StateKey = Box<[(u64, SourceSet)]>;

/// Multiset of values not yet combined, kept in canonical order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    values: Vec<AvailableValue>,
}

impl SearchState {
    /// Builds the initial state with one leaf per source number
    pub fn initial(sources: &[SourceNumber]) -> Self {
        let mut values: Vec<AvailableValue> = sources
            .iter()
            .map(|&source| AvailableValue::new(Derivation::leaf(source)))
            .collect();
        values.sort_by(AvailableValue::cmp_canonical);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks if no further reduction can be attempted
    pub fn is_terminal(&self) -> bool {
        self.values.len() < 2
    }

    pub fn values(&self) -> &[AvailableValue] {
        &self.values
    }

    /// Every unordered pair of positions exactly once, `i < j`
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.values.len();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
    }

    /// Successor state: removes positions `i` and `j` and inserts `combined`
    pub fn reduce(&self, i: usize, j: usize, combined: Derivation) -> SearchState {
        debug_assert!(i < j && j < self.values.len());

        let mut values = Vec::with_capacity(self.values.len() - 1);
        values.extend(
            self.values
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, v)| v.clone()),
        );

        let next = AvailableValue::new(combined);
        let pos = values
            .binary_search_by(|probe| probe.cmp_canonical(&next))
            .unwrap_or_else(|insert_at| insert_at);
        values.insert(pos, next);

        SearchState { values }
    }

    /// Memo key identifying this state regardless of how it was reached
    pub fn signature(&self) -> StateKey {
        self.values
            .iter()
            .map(|v| (v.value, v.derivation.sources()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Operator;

    fn state(values: &[u64]) -> SearchState {
        SearchState::initial(&SourceNumber::from_values(values))
    }

    #[test]
    fn test_initial_state_sorted() {
        let s = state(&[75, 3, 100, 3]);
        let values: Vec<u64> = s.values().iter().map(|v| v.value).collect();
        assert_eq!(values, vec![3, 3, 75, 100]);

        // Equal values ordered by source identity
        let first = s.values()[0].derivation.sources().lowest();
        let second = s.values()[1].derivation.sources().lowest();
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(3));
    }

    #[test]
    fn test_terminal_states() {
        assert!(state(&[]).is_terminal());
        assert!(state(&[7]).is_terminal());
        assert!(!state(&[7, 8]).is_terminal());
    }

    #[test]
    fn test_pairs_visit_each_unordered_pair_once() {
        let s = state(&[1, 2, 3, 4]);
        let pairs: Vec<_> = s.pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|&(i, j)| i < j));
        assert!(state(&[5]).pairs().next().is_none());
    }

    #[test]
    fn test_reduce_replaces_pair_with_combined_value() {
        let s = state(&[2, 5, 9]);
        let a = &s.values()[0].derivation;
        let b = &s.values()[2].derivation;
        let product = Derivation::combine(Operator::Multiply, a, b).unwrap();

        let next = s.reduce(0, 2, product);
        let values: Vec<u64> = next.values().iter().map(|v| v.value).collect();
        assert_eq!(values, vec![5, 18]);
        assert_eq!(next.values()[1].derivation.sources().len(), 2);
        // The original state is untouched
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_signature_independent_of_reduction_order() {
        let s = state(&[1, 2, 3, 4]);
        let v = |k: usize, st: &SearchState| st.values()[k].derivation.clone();

        // (1 + 2) then (3 + 4); the new 3 sorts ahead of the source 3
        let left = s.reduce(0, 1, Derivation::combine(Operator::Add, &v(0, &s), &v(1, &s)).unwrap());
        let left = left.reduce(1, 2, Derivation::combine(Operator::Add, &v(1, &left), &v(2, &left)).unwrap());

        // (3 + 4) then (1 + 2)
        let right = s.reduce(2, 3, Derivation::combine(Operator::Add, &v(2, &s), &v(3, &s)).unwrap());
        let right = right.reduce(0, 1, Derivation::combine(Operator::Add, &v(0, &right), &v(1, &right)).unwrap());

        assert_eq!(left.signature(), right.signature());
    }

    #[test]
    fn test_signature_distinguishes_source_identity() {
        let s = state(&[4, 4, 2]);
        let v = |k: usize| s.values()[k].derivation.clone();

        // 2 + first 4 and 2 + second 4 leave different sources behind
        let with_first = s.reduce(0, 1, Derivation::combine(Operator::Add, &v(0), &v(1)).unwrap());
        let with_second = s.reduce(0, 2, Derivation::combine(Operator::Add, &v(0), &v(2)).unwrap());
        assert_ne!(with_first.signature(), with_second.signature());
    }
}
