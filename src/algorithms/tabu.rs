//! Tabu search engine.
//!
//! Single-trajectory search over toggle moves. Starts from a greedy
//! seed (candidates in descending value order), samples a neighborhood
//! of single-candidate toggles each iteration, and applies the best
//! non-tabu move. A tabu move is still allowed when it would beat the
//! best-known objective (aspiration criterion). Applied moves enter a
//! FIFO tabu list of fixed tenure, forbidding immediate reversal.
//!
//! # Reference
//! Glover (1989), "Tabu Search — Part I"

use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use super::{
    greedy_seed, seed_rng, AlgorithmConfig, BestTracker, PlanningAlgorithm, RunClock, SolveResult,
    Termination,
};
use crate::constraints::ConstraintChecker;
use crate::error::PlanError;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Tabu search over the candidate-selection space.
pub struct TabuSearch {
    tenure: usize,
    neighborhood_size: usize,
    checker: ConstraintChecker,
}

impl TabuSearch {
    /// Creates an engine with the standard parameterization.
    pub fn new() -> Self {
        Self {
            tenure: 10,
            neighborhood_size: 20,
            checker: ConstraintChecker::standard(),
        }
    }

    /// Sets the tabu tenure (moves remembered).
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the number of toggle moves sampled per iteration.
    pub fn with_neighborhood_size(mut self, neighborhood_size: usize) -> Self {
        self.neighborhood_size = neighborhood_size;
        self
    }

    /// Replaces the constraint evaluator.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    fn validate_params(&self) -> Result<(), PlanError> {
        if self.tenure == 0 {
            return Err(PlanError::Configuration("tenure must be positive".into()));
        }
        if self.neighborhood_size == 0 {
            return Err(PlanError::Configuration(
                "neighborhood_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TabuSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAlgorithm for TabuSearch {
    fn name(&self) -> String {
        format!(
            "TabuSearch(tenure={}, nbhd={})",
            self.tenure, self.neighborhood_size
        )
    }

    fn solve(
        &mut self,
        problem: &SchedulingProblem,
        config: &AlgorithmConfig,
    ) -> Result<SolveResult, PlanError> {
        config.validate()?;
        self.validate_params()?;
        if problem.is_empty() {
            return Ok(SolveResult::empty(problem));
        }

        let clock = RunClock::start(config.time_limit_sec);
        let mut rng = seed_rng(config);
        let mut tracker = BestTracker::new();

        let mut current = greedy_seed(problem, &self.checker);
        tracker.observe(&current);
        debug!("{}: greedy seed objective {:.2}", self.name(), current.objective());

        let n = problem.len() as u32;
        let mut tabu: VecDeque<u32> = VecDeque::with_capacity(self.tenure);
        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;

        for _ in 0..config.max_iterations {
            if clock.is_expired() {
                termination = Termination::TimeLimit;
                break;
            }

            // Sample the toggle neighborhood and keep the best
            // admissible move (first-found on ties).
            let mut best_move: Option<(Solution, u32)> = None;
            for _ in 0..self.neighborhood_size {
                let move_idx = rng.random_range(0..n);
                let mut neighbor = current.clone();
                if !neighbor.toggle(move_idx, problem, &self.checker) {
                    continue; // Infeasible addition, no move made.
                }

                if tabu.contains(&move_idx)
                    && neighbor.objective() <= tracker.best_objective()
                {
                    continue; // Tabu without aspiration.
                }

                let improves = match &best_move {
                    None => true,
                    Some((best, _)) => neighbor.objective() > best.objective(),
                };
                if improves {
                    best_move = Some((neighbor, move_idx));
                }
            }

            if let Some((neighbor, move_idx)) = best_move {
                current = neighbor;
                if tabu.len() == self.tenure {
                    tabu.pop_front();
                }
                tabu.push_back(move_idx);
                tracker.observe(&current);
            }

            iterations += 1;
            tracker.record_iteration();
            if tracker.converged(config.convergence_patience) {
                termination = Termination::Converged;
                break;
            }
        }

        debug!(
            "{}: finished after {} iterations, best {:.2}",
            self.name(),
            iterations,
            tracker.best_objective()
        );
        Ok(tracker.into_result(problem, &clock, iterations, termination))
    }
}
