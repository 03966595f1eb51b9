//! Simulated annealing engine.
//!
//! Single-trajectory search proposing one toggle move per iteration.
//! Improving moves are always accepted; worsening moves are accepted
//! with probability `exp(Δ/T)` where Δ is the (negative) objective
//! change. The temperature decays geometrically each iteration and the
//! run stops when it falls below the configured floor. The best-ever
//! solution is tracked separately from the wandering current solution.
//!
//! # Reference
//! Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

use log::debug;
use rand::Rng;

use super::{
    random_solution, seed_rng, AlgorithmConfig, BestTracker, PlanningAlgorithm, RunClock,
    SolveResult, Termination,
};
use crate::constraints::ConstraintChecker;
use crate::error::PlanError;
use crate::problem::SchedulingProblem;

/// Simulated annealing over the candidate-selection space.
pub struct SimulatedAnnealing {
    initial_temp: f64,
    cooling_rate: f64,
    min_temp: f64,
    checker: ConstraintChecker,
}

impl SimulatedAnnealing {
    /// Creates an engine with the standard parameterization.
    pub fn new() -> Self {
        Self {
            initial_temp: 100.0,
            cooling_rate: 0.995,
            min_temp: 0.01,
            checker: ConstraintChecker::standard(),
        }
    }

    /// Sets the initial temperature.
    pub fn with_initial_temp(mut self, initial_temp: f64) -> Self {
        self.initial_temp = initial_temp;
        self
    }

    /// Sets the geometric cooling rate (0–1, exclusive).
    pub fn with_cooling_rate(mut self, cooling_rate: f64) -> Self {
        self.cooling_rate = cooling_rate;
        self
    }

    /// Sets the stopping temperature.
    pub fn with_min_temp(mut self, min_temp: f64) -> Self {
        self.min_temp = min_temp;
        self
    }

    /// Replaces the constraint evaluator.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    fn validate_params(&self) -> Result<(), PlanError> {
        if !(self.initial_temp > 0.0) {
            return Err(PlanError::Configuration(
                "initial_temp must be positive".into(),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(PlanError::Configuration(
                "cooling_rate must be within (0, 1)".into(),
            ));
        }
        if !(self.min_temp > 0.0) {
            return Err(PlanError::Configuration("min_temp must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAlgorithm for SimulatedAnnealing {
    fn name(&self) -> String {
        format!(
            "SA(T0={}, cool={}, Tmin={})",
            self.initial_temp, self.cooling_rate, self.min_temp
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

        let mut current = random_solution(problem, &self.checker, &mut rng);
        tracker.observe(&current);

        let n = problem.len() as u32;
        let mut temp = self.initial_temp;
        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;

        for _ in 0..config.max_iterations {
            if clock.is_expired() {
                termination = Termination::TimeLimit;
                break;
            }
            if temp < self.min_temp {
                termination = Termination::MinTemperature;
                break;
            }

            let move_idx = rng.random_range(0..n);
            let mut neighbor = current.clone();
            neighbor.toggle(move_idx, problem, &self.checker);

            let delta = neighbor.objective() - current.objective();
            let accepted = delta > 0.0 || rng.random::<f64>() < (delta / temp).exp();
            if accepted {
                current = neighbor;
                tracker.observe(&current);
            }

            temp *= self.cooling_rate;
            iterations += 1;
            tracker.record_iteration();
            if tracker.converged(config.convergence_patience) {
                termination = Termination::Converged;
                break;
            }
        }

        debug!(
            "{}: finished after {} iterations at T={:.4}, best {:.2}",
            self.name(),
            iterations,
            temp,
            tracker.best_objective()
        );
        Ok(tracker.into_result(problem, &clock, iterations, termination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::tests::{replay_feasible, respects_capacities, small_scenario};

    #[test]
    fn test_best_tracked_separately_from_current() {
        // The wandering current solution may degrade; the reported best
        // and its history never do.
        let problem = small_scenario();
        let config = AlgorithmConfig::default().with_max_iterations(200).with_seed(21);
        let mut engine = SimulatedAnnealing::new().with_initial_temp(50.0);

        let result = engine.solve(&problem, &config).unwrap();
        assert!(result
            .objective_history
            .windows(2)
            .all(|w| w[1] >= w[0] - 1e-12));
        assert!(replay_feasible(&result.best, &problem));
        assert!(respects_capacities(&result.best, &problem));
    }

    #[test]
    fn test_min_temperature_stop() {
        let problem = small_scenario();
        // 0.5^k drops below 1.0 from T0=100 in ~8 iterations.
        let config = AlgorithmConfig::default().with_max_iterations(1000).with_seed(2);
        let mut engine = SimulatedAnnealing::new()
            .with_cooling_rate(0.5)
            .with_min_temp(1.0);

        let result = engine.solve(&problem, &config).unwrap();
        assert_eq!(result.termination, Termination::MinTemperature);
        assert!(result.iterations < 1000);
    }

    #[test]
    fn test_cold_run_is_hill_climb() {
        // Near-zero acceptance of worsening moves still improves.
        let problem = small_scenario();
        let config = AlgorithmConfig::default().with_max_iterations(100).with_seed(9);
        let mut engine = SimulatedAnnealing::new()
            .with_initial_temp(1e-3)
            .with_min_temp(1e-9);

        let result = engine.solve(&problem, &config).unwrap();
        assert!(result.objective() > 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let problem = small_scenario();
        let config = AlgorithmConfig::default();
        assert!(SimulatedAnnealing::new()
            .with_initial_temp(0.0)
            .solve(&problem, &config)
            .is_err());
        assert!(SimulatedAnnealing::new()
            .with_cooling_rate(1.0)
            .solve(&problem, &config)
            .is_err());
        assert!(SimulatedAnnealing::new()
            .with_min_temp(-1.0)
            .solve(&problem, &config)
            .is_err());
    }
}
