use super::state::{SearchState, StateKey};
use super::{NoopObserver, SearchObserver, SearchStatistics, Solution, Solver, SolverConfig};
use crate::aggregate::SolutionSet;
use crate::domain::{Derivation, Operator, SourceNumber, SourceSet};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Main solver engine: depth-first search over pairwise reductions with a
/// per-call transposition memo
pub struct SolverEngine {
    config: SolverConfig,
    name: String,
}

impl SolverEngine {
    /// Creates a new solver engine with given configuration
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            name: "NumbersSolverEngine".to_string(),
        }
    }

    /// Solves a puzzle, reporting every reached derivation to `observer`
    pub fn solve_observed<O>(&self, target: u64, sources: &[u64], observer: &mut O) -> Solution
    where
        O: SearchObserver,
    {
        if target == 0 {
            debug!("Target is not positive, nothing to solve");
            return Solution::empty(target);
        }

        let sources = self.prepare_sources(sources);
        if sources.is_empty() {
            debug!("No usable source numbers");
            return Solution::empty(target);
        }

        info!("Solving for {} with {} source numbers", target, sources.len());

        let mut search = Search {
            config: &self.config,
            solutions: SolutionSet::new(target, self.config.max_solutions),
            memo: HashSet::new(),
            statistics: SearchStatistics::default(),
            observer,
            stopped: false,
        };
        search.run(&SearchState::initial(&sources));

        let Search {
            solutions,
            memo,
            statistics,
            ..
        } = search;

        debug!(
            "Search expanded {} states, observed {} values, {} memo entries, {} memo hits",
            statistics.states_expanded,
            solutions.observed(),
            memo.len(),
            statistics.memo_hits
        );
        if statistics.truncated {
            warn!(
                "Search stopped after {} expansions, returning best effort result",
                statistics.states_expanded
            );
        }

        let (exact, closest) = solutions.into_parts();
        let solution = Solution {
            target,
            has_exact: !exact.is_empty(),
            exact,
            closest,
            statistics,
        };

        info!(
            "Found {} exact solutions, closest={:?}",
            solution.exact.len(),
            solution.closest_value()
        );

        solution
    }

    /// Checks whether the target can be reached exactly
    pub fn is_reachable(&self, target: u64, sources: &[u64]) -> bool {
        let engine = SolverEngine::new(SolverConfig {
            max_expansions: self.config.max_expansions,
            ..SolverConfig::validity_check()
        });
        engine.solve_observed(target, sources, &mut NoopObserver).has_exact
    }

    /// Assigns identities to the caller's numbers, dropping ones the search cannot use
    fn prepare_sources(&self, values: &[u64]) -> Vec<SourceNumber> {
        if values.len() > SourceSet::CAPACITY {
            warn!(
                "Only the first {} of {} source numbers are used",
                SourceSet::CAPACITY,
                values.len()
            );
        }

        SourceNumber::from_values(&values[..values.len().min(SourceSet::CAPACITY)])
            .into_iter()
            .filter(|source| {
                if source.value == 0 {
                    debug!("Skipping zero source at position {}", source.index);
                    return false;
                }
                true
            })
            .collect()
    }
}

impl Default for SolverEngine {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver for SolverEngine {
    fn solve(&self, target: u64, sources: &[u64]) -> Solution {
        self.solve_observed(target, sources, &mut NoopObserver)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }
}

/// State of a single solve call; dropped when the call returns
struct Search<'a, O> {
    config: &'a SolverConfig,
    solutions: SolutionSet,
    memo: HashSet<StateKey>,
    statistics: SearchStatistics,
    observer: &'a mut O,
    stopped: bool,
}

impl<O: SearchObserver> Search<'_, O> {
    fn run(&mut self, initial: &SearchState) {
        for available in initial.values() {
            self.record(&available.derivation);
            if self.stopped {
                return;
            }
        }

        self.expand(initial);
    }

    /// Records a newly reached derivation and decides whether the search can end
    fn record(&mut self, derivation: &Derivation) {
        self.observer.on_value(derivation);

        let new_exact = self.solutions.observe(derivation);
        if new_exact && self.config.stop_at_first_exact {
            self.stopped = true;
        }

        // Nothing left to improve once the exact set is full
        if self.solutions.is_full() {
            self.stopped = true;
        }
    }

    fn expand(&mut self, state: &SearchState) {
        if self.stopped || state.is_terminal() {
            return;
        }

        if !self.memo.insert(state.signature()) {
            self.statistics.memo_hits += 1;
            return;
        }

        if self.statistics.states_expanded >= self.config.max_expansions {
            self.statistics.truncated = true;
            self.stopped = true;
            return;
        }
        self.statistics.states_expanded += 1;

        let values = state.values();
        for (i, j) in state.pairs() {
            for op in Operator::ALL {
                let combined =
                    match Derivation::combine(op, &values[i].derivation, &values[j].derivation) {
                        Some(combined) => combined,
                        None => {
                            self.statistics.pruned += 1;
                            continue;
                        }
                    };
                self.statistics.candidates_generated += 1;

                // Only the new value needs scanning; the rest were seen when created
                self.record(&combined);
                if self.stopped {
                    return;
                }

                if state.len() > 2 {
                    let next = state.reduce(i, j, combined);
                    self.expand(&next);
                    if self.stopped {
                        return;
                    }
                }
            }
        }
    }
}
