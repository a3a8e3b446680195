use serde::Serialize;
use std::fmt;

/// One input number available to the solver.
///
/// Two sources with the same value are still distinct sources: identity is
/// the position in the caller's list, and each source can be consumed at most
/// once by a single derivation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct SourceNumber {
    /// Position in the caller's source list
    pub index: usize,

    /// Positive value of the source
    pub value: u64,
}

impl SourceNumber {
    /// Creates a new source number
    pub fn new(index: usize, value: u64) -> Self {
        Self { index, value }
    }

    /// Builds source numbers from a plain list of values, keeping positions as identities
    pub fn from_values(values: &[u64]) -> Vec<SourceNumber> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| SourceNumber::new(index, value))
            .collect()
    }
}

impl fmt::Display for SourceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Set of source identities, stored as a bitmask over source indices
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct SourceSet(u64);

impl SourceSet {
    /// Maximum number of distinct sources a set can hold
    pub const CAPACITY: usize = 64;

    /// The empty set
    pub const EMPTY: SourceSet = SourceSet(0);

    /// Creates a set holding a single source index
    pub fn single(index: usize) -> Self {
        debug_assert!(index < Self::CAPACITY);
        SourceSet(1u64 << index)
    }

    /// Returns the union of two sets
    pub fn union(self, other: SourceSet) -> SourceSet {
        SourceSet(self.0 | other.0)
    }

    /// Checks that no source appears in both sets
    pub fn is_disjoint(self, other: SourceSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Checks membership of a source index
    pub fn contains(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1u64 << index) != 0
    }

    /// Number of sources in the set
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest source index in the set, if any
    pub fn lowest(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Iterates source indices in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..Self::CAPACITY).filter(move |&i| self.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_keeps_positions() {
        let sources = SourceNumber::from_values(&[4, 4, 9]);
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0], SourceNumber::new(0, 4));
        assert_eq!(sources[1], SourceNumber::new(1, 4));
        assert_ne!(sources[0], sources[1]);
        assert_eq!(sources[2].value, 9);
    }

    #[test]
    fn test_source_set_union_and_disjoint() {
        let a = SourceSet::single(0);
        let b = SourceSet::single(3);
        assert!(a.is_disjoint(b));

        let ab = a.union(b);
        assert_eq!(ab.len(), 2);
        assert!(ab.contains(0));
        assert!(ab.contains(3));
        assert!(!ab.contains(1));
        assert!(!ab.is_disjoint(b));
    }

    #[test]
    fn test_source_set_iter_and_lowest() {
        let set = SourceSet::single(5).union(SourceSet::single(2)).union(SourceSet::single(9));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 5, 9]);
        assert_eq!(set.lowest(), Some(2));
        assert_eq!(SourceSet::EMPTY.lowest(), None);
        assert!(SourceSet::EMPTY.is_empty());
    }

    #[test]
    fn test_contains_out_of_range_is_false() {
        let set = SourceSet::single(63);
        assert!(set.contains(63));
        assert!(!set.contains(64));
        assert!(!set.contains(1000));
    }
}
