pub mod engine;
pub mod state;

pub use engine::SolverEngine;
pub use state::{AvailableValue, SearchState, StateKey};

use crate::aggregate::Closest;
use crate::domain::Derivation;
use serde::{Deserialize, Serialize};

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of search states expanded before giving up
    pub max_expansions: u64,

    /// Maximum number of distinct exact derivations to keep
    pub max_solutions: usize,

    /// End the search as soon as one exact derivation is found
    pub stop_at_first_exact: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: 2_000_000,
            max_solutions: 10,
            stop_at_first_exact: false,
        }
    }
}

impl SolverConfig {
    /// Configuration for yes/no reachability checks
    pub fn validity_check() -> Self {
        Self {
            max_solutions: 1,
            stop_at_first_exact: true,
            ..Self::default()
        }
    }

    /// Validates configuration values
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_expansions == 0 {
            return Err(crate::Error::ConfigError(
                "max_expansions must be greater than zero".to_string(),
            ));
        }

        if self.max_solutions == 0 {
            return Err(crate::Error::ConfigError(
                "max_solutions must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Number of states whose pairs were enumerated
    pub states_expanded: u64,

    /// Number of states skipped because an identical state was already expanded
    pub memo_hits: u64,

    /// Number of valid (pair, operator) reductions produced
    pub candidates_generated: u64,

    /// Number of (pair, operator) combinations rejected by the validity rules
    pub pruned: u64,

    /// Whether the expansion ceiling cut the search short
    pub truncated: bool,
}

/// Result of solving one numbers puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Target value
    pub target: u64,

    /// Whether at least one exact derivation was found
    pub has_exact: bool,

    /// Distinct exact derivations in discovery order
    pub exact: Vec<Derivation>,

    /// Closest reachable value, `None` when nothing was searched
    pub closest: Option<Closest>,

    /// Search statistics
    pub statistics: SearchStatistics,
}

impl Solution {
    /// Solution for a call that had nothing to search
    pub fn empty(target: u64) -> Self {
        Self {
            target,
            has_exact: false,
            exact: Vec::new(),
            closest: None,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn closest_value(&self) -> Option<u64> {
        self.closest.as_ref().map(|c| c.value)
    }

    pub fn closest_derivation(&self) -> Option<&Derivation> {
        self.closest.as_ref().map(|c| &c.derivation)
    }

    /// Distance between the closest value and the target
    pub fn distance(&self) -> Option<u64> {
        self.closest.as_ref().map(|c| c.distance)
    }
}

/// Solver trait for different solving strategies
pub trait Solver {
    /// Solves a numbers puzzle
    fn solve(&self, target: u64, sources: &[u64]) -> Solution;

    /// Returns solver name
    fn name(&self) -> &str;

    /// Returns solver configuration
    fn config(&self) -> &SolverConfig;
}

/// Receives every derivation the search reaches
pub trait SearchObserver {
    fn on_value(&mut self, derivation: &Derivation);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_value(&mut self, _derivation: &Derivation) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&Derivation),
{
    fn on_value(&mut self, derivation: &Derivation) {
        self(derivation)
    }
}
