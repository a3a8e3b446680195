pub mod aggregate;
pub mod domain;
pub mod math;
pub mod solver;

pub use aggregate::{Closest, SolutionSet};
pub use domain::{Derivation, Operator, SourceNumber, SourceSet};
pub use solver::{
    NoopObserver, SearchObserver, SearchStatistics, Solution, Solver, SolverConfig, SolverEngine,
};

/// Core result type for solver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Solves a numbers puzzle with the default configuration.
///
/// Finds derivations of `target` from `sources` (each source used at most
/// once, every intermediate value a positive integer) and the closest
/// reachable value. An empty source list or a zero target yields a solution
/// with no exact derivations and no closest value.
pub fn solve(target: u64, sources: &[u64]) -> Solution {
    SolverEngine::default().solve(target, sources)
}
