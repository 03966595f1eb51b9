//! Energy capacity constraint.

use super::{ConstraintKind, ConstraintRule};
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Rejects candidates whose energy draw would exceed the executing
/// satellite's payload power budget, given the solution's running usage.
pub struct EnergyCapacity;

impl ConstraintRule for EnergyCapacity {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Energy
    }

    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool {
        let obs = problem.observation(idx);
        if obs.energy_delta_wh <= 0.0 {
            return true;
        }
        let satellite = problem.satellite_of(idx);
        let usage = solution.usage(problem.satellite_index_of(idx));
        usage.energy_wh + obs.energy_delta_wh <= satellite.power_capacity_wh + 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintChecker;
    use crate::models::{Observation, Satellite};

    fn problem(capacity_wh: f64, draws: &[f64]) -> SchedulingProblem {
        let satellites = vec![Satellite::optical("S1").with_power_capacity(capacity_wh)];
        let observations = draws
            .iter()
            .enumerate()
            .map(|(i, &draw)| {
                let start = i as i64 * 3_600_000;
                Observation::imaging(format!("O{i}"), "S1", "T1", start, start + 10_000)
                    .with_resource_deltas(0.0, draw)
            })
            .collect();
        SchedulingProblem::without_ground_segment(observations, satellites).unwrap()
    }

    #[test]
    fn test_admits_within_budget() {
        let problem = problem(200.0, &[80.0, 80.0]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);
        assert!(sol.try_add(0, &problem, &checker).is_accepted());
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
    }

    #[test]
    fn test_rejects_over_budget() {
        let problem = problem(200.0, &[80.0, 80.0, 80.0]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);
        sol.try_add(0, &problem, &checker);
        sol.try_add(1, &problem, &checker);
        let outcome = sol.try_add(2, &problem, &checker);
        assert_eq!(outcome.reason(), Some(ConstraintKind::Energy));
    }

    #[test]
    fn test_usage_restored_on_removal() {
        let problem = problem(100.0, &[60.0, 60.0]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);
        sol.try_add(0, &problem, &checker);
        assert!(!sol.try_add(1, &problem, &checker).is_accepted());
        sol.remove(0, &problem);
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
    }
}
