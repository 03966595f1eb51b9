//! Genetic algorithm engine.
//!
//! Population of feasible solutions; per generation the top `elitism`
//! individuals survive unchanged and the remainder is filled through
//! tournament selection, single-point crossover over the canonical
//! candidate ordering, and per-candidate toggle mutation. Children are
//! rebuilt through the constraint checker, so every individual in the
//! population is feasible at all times.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning"

use std::cmp::Ordering;

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

/// Genetic algorithm over the candidate-selection space.
pub struct GeneticAlgorithm {
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    elitism: usize,
    tournament_size: usize,
    checker: ConstraintChecker,
}

impl GeneticAlgorithm {
    /// Creates an engine with the standard parameterization.
    pub fn new() -> Self {
        Self {
            population_size: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elitism: 2,
            tournament_size: 3,
            checker: ConstraintChecker::standard(),
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the crossover probability (0–1).
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets the per-candidate mutation probability (0–1).
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Sets the number of elites preserved each generation.
    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    /// Replaces the constraint evaluator.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    fn validate_params(&self) -> Result<(), PlanError> {
        if self.population_size < 2 {
            return Err(PlanError::Configuration(
                "population_size must be at least 2".into(),
            ));
        }
        if self.elitism >= self.population_size {
            return Err(PlanError::Configuration(
                "elitism must be below population_size".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(PlanError::Configuration(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PlanError::Configuration(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(PlanError::Configuration(
                "tournament_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Tournament selection: best of `tournament_size` random distinct
    /// competitors, first-found on ties.
    fn tournament<'a>(&self, population: &'a [Solution], rng: &mut SmallRng) -> &'a Solution {
        let k = self.tournament_size.min(population.len());
        let mut winner: Option<&Solution> = None;
        for i in rand::seq::index::sample(rng, population.len(), k) {
            let contender = &population[i];
            match winner {
                None => winner = Some(contender),
                Some(current) if contender.objective() > current.objective() => {
                    winner = Some(contender)
                }
                _ => {}
            }
        }
        winner.unwrap_or(&population[0])
    }

    /// Single-point crossover over the canonical ordering: the left
    /// segment inherits from one parent, the right from the other.
    ///
    /// Children are rebuilt through the checker, communication passes
    /// first so uplink-dependent imaging finds its support selected.
    fn crossover(
        &self,
        parent_a: &Solution,
        parent_b: &Solution,
        problem: &SchedulingProblem,
        rng: &mut SmallRng,
    ) -> (Solution, Solution) {
        let n = problem.len();
        let point = rng.random_range(0..=n) as u32;

        let inherit = |child: &mut Solution, left: &Solution, right: &Solution, comm: bool| {
            for idx in 0..n as u32 {
                if problem.observation(idx).kind.is_comm() != comm {
                    continue;
                }
                let donor = if idx < point { left } else { right };
                if donor.is_selected(idx) {
                    let _ = child.try_add(idx, problem, &self.checker);
                }
            }
        };

        let mut child_a = Solution::empty(problem);
        let mut child_b = Solution::empty(problem);
        inherit(&mut child_a, parent_a, parent_b, true);
        inherit(&mut child_a, parent_a, parent_b, false);
        inherit(&mut child_b, parent_b, parent_a, true);
        inherit(&mut child_b, parent_b, parent_a, false);
        (child_a, child_b)
    }

    /// Independent per-candidate toggle mutation.
    fn mutate(&self, solution: &mut Solution, problem: &SchedulingProblem, rng: &mut SmallRng) {
        if self.mutation_rate <= 0.0 {
            return;
        }
        for idx in 0..problem.len() as u32 {
            if rng.random_bool(self.mutation_rate) {
                solution.toggle(idx, problem, &self.checker);
            }
        }
    }
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAlgorithm for GeneticAlgorithm {
    fn name(&self) -> String {
        format!(
            "GA(pop={}, cx={}, mut={})",
            self.population_size, self.crossover_rate, self.mutation_rate
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

        debug!(
            "{}: starting over {} candidates, {} satellites",
            self.name(),
            problem.len(),
            problem.satellites().len()
        );

        let clock = RunClock::start(config.time_limit_sec);
        let mut rng = seed_rng(config);
        let mut tracker = BestTracker::new();

        let mut population: Vec<Solution> = (0..self.population_size)
            .map(|_| random_solution(problem, &self.checker, &mut rng))
            .collect();
        for individual in &population {
            tracker.observe(individual);
        }

        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;
        for _generation in 0..config.max_iterations {
            if clock.is_expired() {
                termination = Termination::TimeLimit;
                break;
            }

            population.sort_by(|a, b| {
                b.objective()
                    .partial_cmp(&a.objective())
                    .unwrap_or(Ordering::Equal)
            });

            let mut next: Vec<Solution> =
                population.iter().take(self.elitism).cloned().collect();
            while next.len() < self.population_size {
                let parent_a = self.tournament(&population, &mut rng);
                let parent_b = self.tournament(&population, &mut rng);

                let (mut child_a, mut child_b) = if rng.random_bool(self.crossover_rate) {
                    self.crossover(parent_a, parent_b, problem, &mut rng)
                } else {
                    (parent_a.clone(), parent_b.clone())
                };
                self.mutate(&mut child_a, problem, &mut rng);
                self.mutate(&mut child_b, problem, &mut rng);

                next.push(child_a);
                if next.len() < self.population_size {
                    next.push(child_b);
                }
            }
            population = next;

            for individual in &population {
                tracker.observe(individual);
            }
            iterations += 1;
            tracker.record_iteration();
            if tracker.converged(config.convergence_patience) {
                termination = Termination::Converged;
                break;
            }
        }

        debug!(
            "{}: finished after {} generations, best {:.2}",
            self.name(),
            iterations,
            tracker.best_objective()
        );
        Ok(tracker.into_result(problem, &clock, iterations, termination))
    }
}
