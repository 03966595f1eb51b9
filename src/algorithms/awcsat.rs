//! Adaptive wave-controlled simulated annealing with tabu (AWCSAT).
//!
//! A hybrid single-trajectory engine combining three controls:
//!
//! - **Wave temperature control** — the outer loop cools along a
//!   decaying baseline but re-heats locally through an oscillating term
//!   driven by the inner loop's acceptance statistics:
//!   `T_k = (T0·(K−k)/K)/(C·k+1) + (L_k/(1+G_k))·cos²(J_k/(n·T0))`.
//! - **Adaptive inner loops** — the isothermal search length grows when
//!   few neighbors improve and shrinks when many do.
//! - **Tabu memory** — recently visited selection states (by hash) are
//!   forbidden unless they would beat the best-known objective.
//!
//! The initial temperature derives from a random solution sample:
//! `T0 = −ΔE / ln(q)` with ΔE the sample's objective spread. Worsening
//! neighbors are accepted by a Metropolis rule rescaled by
//! `S = exp(−(E_avg − E_min)/T0)`.
//!
//! # Reference
//! Wave-controlled annealing for imaging-satellite planning over point
//! groups and wide areas (Systems Engineering and Electronics)

use std::collections::VecDeque;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use super::{
    random_solution, seed_rng, AlgorithmConfig, BestTracker, PlanningAlgorithm, RunClock,
    SolveResult, Termination,
};
use crate::constraints::ConstraintChecker;
use crate::error::PlanError;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// AWCSAT over the candidate-selection space.
pub struct Awcsat {
    /// Initial isothermal search length L0.
    inner_loops: usize,
    /// Tabu tenure over visited selection states.
    tabu_tenure: usize,
    /// Initial temperature coefficient q, within (0, 1).
    initial_temp_coef: f64,
    /// Wave constant n.
    wave_n: f64,
    /// Wave constant C.
    wave_c: f64,
    /// Random solutions sampled to estimate the objective spread.
    sample_size: usize,
    checker: ConstraintChecker,
}

impl Awcsat {
    /// Creates an engine with the published parameterization.
    pub fn new() -> Self {
        Self {
            inner_loops: 200,
            tabu_tenure: 5,
            initial_temp_coef: 0.9,
            wave_n: 1.0,
            wave_c: 0.25,
            sample_size: 10,
            checker: ConstraintChecker::standard(),
        }
    }

    /// Sets the initial inner-loop count L0.
    pub fn with_inner_loops(mut self, inner_loops: usize) -> Self {
        self.inner_loops = inner_loops;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets the initial temperature coefficient q (0–1, exclusive).
    pub fn with_initial_temp_coef(mut self, coef: f64) -> Self {
        self.initial_temp_coef = coef;
        self
    }

    /// Sets the wave constants (n, C).
    pub fn with_wave_constants(mut self, n: f64, c: f64) -> Self {
        self.wave_n = n;
        self.wave_c = c;
        self
    }

    /// Sets the initial-sample size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Replaces the constraint evaluator.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    fn validate_params(&self) -> Result<(), PlanError> {
        if self.inner_loops == 0 {
            return Err(PlanError::Configuration(
                "inner_loops must be positive".into(),
            ));
        }
        if self.tabu_tenure == 0 {
            return Err(PlanError::Configuration(
                "tabu_tenure must be positive".into(),
            ));
        }
        if !(self.initial_temp_coef > 0.0 && self.initial_temp_coef < 1.0) {
            return Err(PlanError::Configuration(
                "initial_temp_coef must be within (0, 1)".into(),
            ));
        }
        if self.sample_size == 0 {
            return Err(PlanError::Configuration(
                "sample_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Generates a neighbor with a uniformly chosen operator: single
    /// toggle, selected/unselected exchange, or per-satellite block
    /// reassignment.
    fn neighbor(
        &self,
        current: &Solution,
        problem: &SchedulingProblem,
        by_satellite: &[Vec<u32>],
        rng: &mut SmallRng,
    ) -> Solution {
        let n = problem.len() as u32;
        let mut neighbor = current.clone();
        match rng.random_range(0..3) {
            0 => {
                neighbor.toggle(rng.random_range(0..n), problem, &self.checker);
            }
            1 => {
                let selected = current.selected_indices();
                let unselected: Vec<u32> =
                    (0..n).filter(|&i| !current.is_selected(i)).collect();
                if selected.is_empty() || unselected.is_empty() {
                    neighbor.toggle(rng.random_range(0..n), problem, &self.checker);
                } else {
                    let out = selected[rng.random_range(0..selected.len())];
                    let inn = unselected[rng.random_range(0..unselected.len())];
                    neighbor.remove(out, problem);
                    let _ = neighbor.try_add(inn, problem, &self.checker);
                }
            }
            _ => {
                let sat = rng.random_range(0..by_satellite.len());
                let cleared: Vec<u32> = neighbor.satellite_timeline(sat).to_vec();
                for idx in cleared {
                    neighbor.remove(idx, problem);
                }
                for &idx in &by_satellite[sat] {
                    let _ = neighbor.try_add(idx, problem, &self.checker);
                }
            }
        }
        neighbor
    }
}

impl Default for Awcsat {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAlgorithm for Awcsat {
    fn name(&self) -> String {
        format!(
            "AWCSAT(L0={}, tenure={}, q={})",
            self.inner_loops, self.tabu_tenure, self.initial_temp_coef
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

        // Per-satellite candidates in descending value order, for the
        // block-reassignment operator.
        let mut by_satellite = vec![Vec::new(); problem.satellites().len()];
        for idx in 0..problem.len() as u32 {
            by_satellite[problem.satellite_index_of(idx)].push(idx);
        }
        for candidates in &mut by_satellite {
            candidates.sort_by(|&a, &b| {
                problem
                    .value(b)
                    .partial_cmp(&problem.value(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            });
        }

        // Initialization: sample the objective spread and derive T0.
        let samples: Vec<Solution> = (0..self.sample_size)
            .map(|_| random_solution(problem, &self.checker, &mut rng))
            .collect();
        let objectives: Vec<f64> = samples.iter().map(|s| s.objective()).collect();
        let e_min = objectives.iter().copied().fold(f64::INFINITY, f64::min);
        let e_max = objectives.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let e_avg = objectives.iter().sum::<f64>() / objectives.len() as f64;
        let delta_e = e_max - e_min;

        let t0 = if delta_e > 0.0 {
            -delta_e / self.initial_temp_coef.ln()
        } else {
            100.0
        };
        let s_factor = (-(e_avg - e_min) / t0).exp();

        let mut current = samples
            .into_iter()
            .reduce(|best, s| if s.objective() > best.objective() { s } else { best })
            .unwrap_or_else(|| Solution::empty(problem));
        tracker.observe(&current);
        debug!(
            "{}: T0={:.3}, dE={:.3}, seed objective {:.2}",
            self.name(),
            t0,
            delta_e,
            current.objective()
        );

        let mut tabu: VecDeque<u64> = VecDeque::with_capacity(self.tabu_tenure);
        let mut temp = t0;
        let mut inner = self.inner_loops;
        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;

        for k in 0..config.max_iterations {
            if clock.is_expired() {
                termination = Termination::TimeLimit;
                break;
            }

            // Isothermal inner loop.
            let mut improved = 0usize;
            let mut accepted = 0usize;
            for _ in 0..inner {
                let neighbor = self.neighbor(&current, problem, &by_satellite, &mut rng);
                let state = neighbor.selection_hash();

                if tabu.contains(&state) {
                    // Aspiration: a forbidden state beating the
                    // best-known is taken anyway.
                    if neighbor.objective() > tracker.best_objective() {
                        if neighbor.objective() > current.objective() {
                            improved += 1;
                        }
                        accepted += 1;
                        current = neighbor;
                        tracker.observe(&current);
                    }
                    continue;
                }
                if tabu.len() == self.tabu_tenure {
                    tabu.pop_front();
                }
                tabu.push_back(state);

                let take = if neighbor.objective() >= current.objective() {
                    true
                } else {
                    let delta = neighbor.objective() - current.objective();
                    let denom = s_factor * temp;
                    denom > 0.0 && rng.random::<f64>() < (delta / denom).exp()
                };
                if take {
                    if neighbor.objective() > current.objective() {
                        improved += 1;
                    }
                    accepted += 1;
                    current = neighbor;
                    tracker.observe(&current);
                }
            }

            // Wave temperature update.
            let big_k = f64::from(config.max_iterations);
            let term1 = (t0 * (big_k - f64::from(k)) / big_k) / (self.wave_c * f64::from(k) + 1.0);
            let cos_val = if self.wave_n * t0 > 0.0 {
                (accepted as f64 / (self.wave_n * t0)).cos()
            } else {
                1.0
            };
            let term2 = (inner as f64 / (1.0 + improved as f64)) * cos_val * cos_val;
            temp = (term1 + term2).max(1e-10);

            // Adapt the inner-loop count from the improvement ratio.
            let ratio = improved as f64 / inner.max(1) as f64;
            if ratio < 0.1 {
                inner = ((inner as f64 * 1.1) as usize).min(self.inner_loops * 2);
            } else if ratio > 0.5 {
                inner = ((inner as f64 * 0.9) as usize)
                    .max(self.inner_loops / 2)
                    .max(1);
            }

            iterations += 1;
            tracker.record_iteration();
            if tracker.converged(config.convergence_patience) {
                termination = Termination::Converged;
                break;
            }
        }

        debug!(
            "{}: finished after {} outer loops, best {:.2}",
            self.name(),
            iterations,
            tracker.best_objective()
        );
        Ok(tracker.into_result(problem, &clock, iterations, termination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::tests::{replay_feasible, respects_capacities, small_scenario};

    fn config() -> AlgorithmConfig {
        AlgorithmConfig::default().with_max_iterations(15).with_seed(12)
    }

    #[test]
    fn test_finds_good_solution() {
        let problem = small_scenario();
        let mut engine = Awcsat::new().with_inner_loops(30);
        let result = engine.solve(&problem, &config()).unwrap();
        assert!(result.objective() >= 24.0);
        assert!(replay_feasible(&result.best, &problem));
        assert!(respects_capacities(&result.best, &problem));
    }

    #[test]
    fn test_history_monotone() {
        let problem = small_scenario();
        let mut engine = Awcsat::new().with_inner_loops(10);
        let result = engine.solve(&problem, &config()).unwrap();
        assert!(result
            .objective_history
            .windows(2)
            .all(|w| w[1] >= w[0] - 1e-12));
    }

    #[test]
    fn test_block_reassign_keeps_feasibility() {
        let problem = small_scenario();
        let engine = Awcsat::new();
        let checker = ConstraintChecker::standard();
        let mut rng = seed_rng(&config());

        let mut by_satellite = vec![Vec::new(); problem.satellites().len()];
        for idx in 0..problem.len() as u32 {
            by_satellite[problem.satellite_index_of(idx)].push(idx);
        }

        let mut current = random_solution(&problem, &checker, &mut rng);
        for _ in 0..50 {
            current = engine.neighbor(&current, &problem, &by_satellite, &mut rng);
            assert!(replay_feasible(&current, &problem));
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let problem = small_scenario();
        let cfg = config();
        assert!(Awcsat::new().with_inner_loops(0).solve(&problem, &cfg).is_err());
        assert!(Awcsat::new().with_tabu_tenure(0).solve(&problem, &cfg).is_err());
        assert!(Awcsat::new()
            .with_initial_temp_coef(1.0)
            .solve(&problem, &cfg)
            .is_err());
    }

    #[test]
    fn test_single_candidate_run() {
        // One candidate: the sample spread may collapse to zero, taking
        // the fallback T0; the run must still find the candidate.
        let satellites = vec![crate::models::Satellite::optical("S1")];
        let observations = vec![crate::models::Observation::imaging(
            "O1", "S1", "T1", 0, 10_000,
        )
        .with_value(5.0)];
        let problem =
            SchedulingProblem::without_ground_segment(observations, satellites).unwrap();

        let mut engine = Awcsat::new().with_inner_loops(5);
        let result = engine.solve(&problem, &config()).unwrap();
        assert!((result.objective() - 5.0).abs() < 1e-9);
    }
}
