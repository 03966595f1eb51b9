//! Metaheuristic search engines.
//!
//! Four interchangeable engines (genetic algorithm, tabu search,
//! simulated annealing, ant colony optimization) plus the AWCSAT hybrid
//! share one contract: [`PlanningAlgorithm::solve`] over a
//! [`SchedulingProblem`] and an [`AlgorithmConfig`]. The constraint
//! evaluator and the precomputed observation values are injected
//! collaborators — engines never inherit behavior from each other.
//!
//! Shared mechanics:
//! - a seeded [`SmallRng`] makes runs bit-identical for a fixed seed
//!   (a fixed default seed applies when none is configured);
//! - the elapsed-time budget is checked at the top of every outer
//!   iteration; exceeding it truncates the loop and still returns the
//!   best-known result (timeout is not an error);
//! - the best-known objective is recorded once per outer iteration,
//!   giving a monotone non-decreasing convergence history;
//! - equal-objective candidates resolve by first-found order, keeping
//!   runs deterministic.

mod annealing;
mod ant_colony;
mod awcsat;
mod genetic;
mod tabu;

pub use annealing::SimulatedAnnealing;
pub use ant_colony::AntColony;
pub use awcsat::Awcsat;
pub use genetic::GeneticAlgorithm;
pub use tabu::TabuSearch;

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constraints::ConstraintChecker;
use crate::error::PlanError;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Seed used when the configuration does not provide one.
const DEFAULT_SEED: u64 = 0x5EED_0B5A;

/// Budget and reproducibility settings shared by all engines.
///
/// Engine-specific parameters (population size, tenure, temperatures,
/// ant counts) live on the engine structs themselves.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmConfig {
    /// Maximum outer iterations (generations for the GA).
    pub max_iterations: u32,
    /// Wall-clock budget (s). Whichever budget triggers first stops the run.
    pub time_limit_sec: f64,
    /// RNG seed. `None` uses a fixed crate default.
    pub random_seed: Option<u64>,
    /// Stop after this many consecutive non-improving outer iterations.
    /// `None` disables the convergence stop.
    pub convergence_patience: Option<u32>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            time_limit_sec: 300.0,
            random_seed: None,
            convergence_patience: None,
        }
    }
}

impl AlgorithmConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the wall-clock budget (s).
    pub fn with_time_limit(mut self, time_limit_sec: f64) -> Self {
        self.time_limit_sec = time_limit_sec;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables the convergence stop.
    pub fn with_convergence_patience(mut self, patience: u32) -> Self {
        self.convergence_patience = Some(patience);
        self
    }

    /// Fails fast on unbounded or nonsensical budgets.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.max_iterations == 0 {
            return Err(PlanError::Configuration(
                "max_iterations must be positive".into(),
            ));
        }
        if !(self.time_limit_sec > 0.0) || !self.time_limit_sec.is_finite() {
            return Err(PlanError::Configuration(
                "time_limit_sec must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The iteration budget was exhausted.
    IterationLimit,
    /// The wall-clock budget was exhausted (truncation, not an error).
    TimeLimit,
    /// The annealing temperature fell below its floor.
    MinTemperature,
    /// No improvement for the configured patience window.
    Converged,
    /// There were no candidates to schedule.
    EmptyInput,
}

/// Result of one planning run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Best solution found.
    pub best: Solution,
    /// Best-known objective after each outer iteration (non-decreasing).
    pub objective_history: Vec<f64>,
    /// Wall-clock runtime (s).
    pub runtime_seconds: f64,
    /// Outer iterations completed.
    pub iterations: u32,
    /// Why the run stopped.
    pub termination: Termination,
}

impl SolveResult {
    /// An empty result for a run that had nothing to schedule.
    pub fn empty(problem: &SchedulingProblem) -> Self {
        Self {
            best: Solution::empty(problem),
            objective_history: Vec::new(),
            runtime_seconds: 0.0,
            iterations: 0,
            termination: Termination::EmptyInput,
        }
    }

    /// Objective of the best solution.
    pub fn objective(&self) -> f64 {
        self.best.objective()
    }
}

/// The common engine contract.
pub trait PlanningAlgorithm {
    /// Engine name with its parameters, for logs and benchmark tables.
    fn name(&self) -> String;

    /// Runs the search and returns the best solution found plus its
    /// convergence history.
    fn solve(
        &mut self,
        problem: &SchedulingProblem,
        config: &AlgorithmConfig,
    ) -> Result<SolveResult, PlanError>;
}

/// Seeds the engine RNG from the configuration.
pub(crate) fn seed_rng(config: &AlgorithmConfig) -> SmallRng {
    SmallRng::seed_from_u64(config.random_seed.unwrap_or(DEFAULT_SEED))
}

/// Wall-clock budget tracking, checked at the top of outer iterations.
pub(crate) struct RunClock {
    start: Instant,
    limit_sec: f64,
}

impl RunClock {
    pub(crate) fn start(limit_sec: f64) -> Self {
        Self {
            start: Instant::now(),
            limit_sec,
        }
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.elapsed_seconds() >= self.limit_sec
    }

    pub(crate) fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Best-known tracking shared by all engines.
///
/// `observe` keeps the best solution by strict improvement (first-found
/// wins on ties); `record_iteration` appends one history sample per
/// outer iteration, so the history is non-decreasing by construction.
pub(crate) struct BestTracker {
    best: Option<Solution>,
    history: Vec<f64>,
    stale_iterations: u32,
    improved_since_record: bool,
}

impl BestTracker {
    pub(crate) fn new() -> Self {
        Self {
            best: None,
            history: Vec::new(),
            stale_iterations: 0,
            improved_since_record: false,
        }
    }

    /// Considers a candidate for best-known. Returns whether it improved.
    pub(crate) fn observe(&mut self, candidate: &Solution) -> bool {
        let improved = match &self.best {
            None => true,
            Some(best) => candidate.objective() > best.objective(),
        };
        if improved {
            self.best = Some(candidate.clone());
            self.improved_since_record = true;
        }
        improved
    }

    /// Best-known objective, or `-inf` before any observation.
    pub(crate) fn best_objective(&self) -> f64 {
        self.best
            .as_ref()
            .map(|b| b.objective())
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Appends the per-iteration history sample and updates staleness.
    pub(crate) fn record_iteration(&mut self) {
        self.history
            .push(self.best.as_ref().map(|b| b.objective()).unwrap_or(0.0));
        if self.improved_since_record {
            self.stale_iterations = 0;
        } else {
            self.stale_iterations += 1;
        }
        self.improved_since_record = false;
    }

    /// Whether the convergence-patience stop triggers.
    pub(crate) fn converged(&self, patience: Option<u32>) -> bool {
        matches!(patience, Some(p) if self.stale_iterations >= p)
    }

    pub(crate) fn into_result(
        self,
        problem: &SchedulingProblem,
        clock: &RunClock,
        iterations: u32,
        termination: Termination,
    ) -> SolveResult {
        SolveResult {
            best: self
                .best
                .unwrap_or_else(|| Solution::empty(problem)),
            objective_history: self.history,
            runtime_seconds: clock.elapsed_seconds(),
            iterations,
            termination,
        }
    }
}

/// Greedy seed solution: candidates in descending value order, each
/// added if feasible. Ties resolve by canonical index.
pub fn greedy_seed(problem: &SchedulingProblem, checker: &ConstraintChecker) -> Solution {
    let mut order: Vec<u32> = (0..problem.len() as u32).collect();
    order.sort_by(|&a, &b| {
        problem
            .value(b)
            .partial_cmp(&problem.value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut solution = Solution::empty(problem);
    for idx in order {
        let _ = solution.try_add(idx, problem, checker);
    }
    solution
}

/// Random solution: every candidate toggled in with probability 0.5,
/// subject to the constraint checker.
pub(crate) fn random_solution(
    problem: &SchedulingProblem,
    checker: &ConstraintChecker,
    rng: &mut SmallRng,
) -> Solution {
    let mut solution = Solution::empty(problem);
    for idx in 0..problem.len() as u32 {
        if rng.random_bool(0.5) {
            let _ = solution.try_add(idx, problem, checker);
        }
    }
    solution
}
