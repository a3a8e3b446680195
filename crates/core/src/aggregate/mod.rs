use crate::domain::Derivation;
use crate::math;
use serde::Serialize;
use std::collections::HashSet;

/// Best non-exact (or exact) value seen during a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Closest {
    /// Reachable value closest to the target
    pub value: u64,

    /// Absolute difference from the target
    pub distance: u64,

    /// One derivation producing the value
    pub derivation: Derivation,
}

/// Collects exact solutions and tracks the closest value for one solve call
#[derive(Debug)]
pub struct SolutionSet {
    target: u64,
    max_solutions: usize,
    exact: Vec<Derivation>,
    // Rendered expressions, so copies of a repeated source value count once
    seen_exact: HashSet<String>,
    closest: Option<Closest>,
    observed: u64,
}

impl SolutionSet {
    /// Creates an empty set for the given target.
    ///
    /// At most `max_solutions` exact derivations are kept (at least one is
    /// always kept).
    pub fn new(target: u64, max_solutions: usize) -> Self {
        Self {
            target,
            max_solutions: max_solutions.max(1),
            exact: Vec::new(),
            seen_exact: HashSet::new(),
            closest: None,
            observed: 0,
        }
    }

    /// Records a derivation reached by the search.
    ///
    /// Returns true if it was a new exact solution.
    pub fn observe(&mut self, derivation: &Derivation) -> bool {
        self.observed += 1;
        let value = derivation.value();
        let distance = math::distance(value, self.target);

        // Strict comparison: the first derivation found at a distance wins ties
        let improves = self
            .closest
            .as_ref()
            .map_or(true, |best| distance < best.distance);
        if improves {
            self.closest = Some(Closest {
                value,
                distance,
                derivation: derivation.clone(),
            });
        }

        if distance != 0 || self.exact.len() >= self.max_solutions {
            return false;
        }

        if self.seen_exact.insert(derivation.to_string()) {
            self.exact.push(derivation.clone());
            true
        } else {
            false
        }
    }

    pub fn has_exact(&self) -> bool {
        !self.exact.is_empty()
    }

    /// Checks whether no further exact solutions will be retained
    pub fn is_full(&self) -> bool {
        self.exact.len() >= self.max_solutions
    }

    /// Exact solutions in discovery order
    pub fn exact(&self) -> &[Derivation] {
        &self.exact
    }

    pub fn closest(&self) -> Option<&Closest> {
        self.closest.as_ref()
    }

    /// Number of derivations observed so far
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Consumes the set, returning exact solutions and the closest value
    pub fn into_parts(self) -> (Vec<Derivation>, Option<Closest>) {
        (self.exact, self.closest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Operator, SourceNumber};

    fn leaf(index: usize, value: u64) -> Derivation {
        Derivation::leaf(SourceNumber::new(index, value))
    }

    #[test]
    fn test_empty_set() {
        let set = SolutionSet::new(10, 5);
        assert!(!set.has_exact());
        assert!(set.closest().is_none());
        assert_eq!(set.observed(), 0);
    }

    #[test]
    fn test_closest_tracking() {
        let mut set = SolutionSet::new(100, 5);
        set.observe(&leaf(0, 3));
        set.observe(&leaf(1, 5));
        assert_eq!(set.closest().unwrap().value, 5);

        let product = Derivation::combine(Operator::Multiply, &leaf(0, 3), &leaf(1, 5)).unwrap();
        set.observe(&product);
        let closest = set.closest().unwrap();
        assert_eq!(closest.value, 15);
        assert_eq!(closest.distance, 85);
        assert!(!set.has_exact());
    }

    #[test]
    fn test_ties_keep_first_discovered() {
        let mut set = SolutionSet::new(10, 5);
        set.observe(&leaf(0, 8));
        set.observe(&leaf(1, 12));
        let closest = set.closest().unwrap();
        assert_eq!(closest.value, 8);
        assert_eq!(closest.derivation, leaf(0, 8));
    }

    #[test]
    fn test_exact_deduplicated_and_capped() {
        let mut set = SolutionSet::new(4, 2);
        let a = leaf(0, 2);
        let b = leaf(1, 2);
        let sum = Derivation::combine(Operator::Add, &a, &b).unwrap();
        let product = Derivation::combine(Operator::Multiply, &a, &b).unwrap();

        assert!(set.observe(&sum));
        assert!(!set.observe(&sum));
        assert!(set.observe(&product));
        assert!(set.is_full());
        assert!(!set.observe(&leaf(2, 4)));

        assert_eq!(set.exact().len(), 2);
        assert_eq!(set.closest().unwrap().derivation, sum);
        assert_eq!(set.observed(), 4);
    }

    #[test]
    fn test_same_expression_from_different_copies_counts_once() {
        let mut set = SolutionSet::new(4, 5);
        let first = Derivation::combine(Operator::Add, &leaf(0, 2), &leaf(1, 2)).unwrap();
        let second = Derivation::combine(Operator::Add, &leaf(0, 2), &leaf(2, 2)).unwrap();
        assert_ne!(first, second);

        assert!(set.observe(&first));
        assert!(!set.observe(&second));
        assert_eq!(set.exact(), &[first]);
    }

    #[test]
    fn test_zero_cap_still_keeps_one() {
        let mut set = SolutionSet::new(7, 0);
        assert!(set.observe(&leaf(0, 7)));
        let (exact, closest) = set.into_parts();
        assert_eq!(exact.len(), 1);
        assert_eq!(closest.unwrap().distance, 0);
    }
}
