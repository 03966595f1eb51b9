//! Ant colony optimization engine.
//!
//! One pheromone weight per candidate. Each iteration, `num_ants`
//! independent solutions are constructed: every candidate is accepted
//! stochastically with probability `τ^α·η^β / (τ^α·η^β + 1)` (η = value
//! normalized by the maximum), subject to the constraint checker. After
//! all ants finish, pheromones evaporate multiplicatively and are
//! reinforced in proportion to each ant's quality relative to the
//! best-known objective, divided by its solution size.
//!
//! Pheromone state is scoped to one run — concurrent runs never share it.
//!
//! # Reference
//! Dorigo et al. (1996), "Ant System: Optimization by a Colony of
//! Cooperating Agents"

use log::debug;
use rand::Rng;

use super::{
    seed_rng, AlgorithmConfig, BestTracker, PlanningAlgorithm, RunClock, SolveResult, Termination,
};
use crate::constraints::ConstraintChecker;
use crate::error::PlanError;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Ant colony optimization over the candidate-selection space.
pub struct AntColony {
    num_ants: usize,
    alpha: f64,
    beta: f64,
    rho: f64,
    q: f64,
    checker: ConstraintChecker,
}

impl AntColony {
    /// Creates an engine with the standard parameterization.
    pub fn new() -> Self {
        Self {
            num_ants: 20,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            q: 100.0,
            checker: ConstraintChecker::standard(),
        }
    }

    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, num_ants: usize) -> Self {
        self.num_ants = num_ants;
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate ρ (0–1).
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the deposit constant Q.
    pub fn with_deposit(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Replaces the constraint evaluator.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    fn validate_params(&self) -> Result<(), PlanError> {
        if self.num_ants == 0 {
            return Err(PlanError::Configuration("num_ants must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(PlanError::Configuration("rho must be within [0, 1]".into()));
        }
        if !(self.q > 0.0) {
            return Err(PlanError::Configuration("deposit Q must be positive".into()));
        }
        Ok(())
    }
}

impl Default for AntColony {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAlgorithm for AntColony {
    fn name(&self) -> String {
        format!(
            "ACO(ants={}, alpha={}, beta={}, rho={})",
            self.num_ants, self.alpha, self.beta, self.rho
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

        let n = problem.len();
        let mut pheromone = vec![1.0_f64; n];

        // Heuristic desirability: value normalized by the maximum.
        let max_value = (0..n as u32)
            .map(|i| problem.value(i))
            .fold(f64::NEG_INFINITY, f64::max);
        let eta: Vec<f64> = if max_value > 0.0 {
            (0..n as u32).map(|i| problem.value(i) / max_value).collect()
        } else {
            vec![1.0; n]
        };

        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;

        for _ in 0..config.max_iterations {
            if clock.is_expired() {
                termination = Termination::TimeLimit;
                break;
            }

            let mut ant_solutions = Vec::with_capacity(self.num_ants);
            for _ in 0..self.num_ants {
                let mut solution = Solution::empty(problem);
                for idx in 0..n as u32 {
                    let attraction = pheromone[idx as usize].powf(self.alpha)
                        * eta[idx as usize].powf(self.beta);
                    let threshold = attraction / (attraction + 1.0);
                    if rng.random::<f64>() < threshold {
                        let _ = solution.try_add(idx, problem, &self.checker);
                    }
                }
                tracker.observe(&solution);
                ant_solutions.push(solution);
            }

            // Evaporation, then quality-proportional reinforcement.
            for weight in &mut pheromone {
                *weight *= 1.0 - self.rho;
            }
            let best_objective = tracker.best_objective();
            if best_objective > 0.0 {
                for solution in &ant_solutions {
                    let deposit = self.q * (solution.objective() / best_objective)
                        / (1.0 + solution.len() as f64);
                    for idx in solution.selected_indices() {
                        pheromone[idx as usize] += deposit;
                    }
                }
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
