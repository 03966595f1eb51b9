//! Storage capacity constraint.

use super::{ConstraintKind, ConstraintRule};
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Rejects candidates whose data volume would overflow the executing
/// satellite's storage, given the solution's running usage.
pub struct StorageCapacity;

impl ConstraintRule for StorageCapacity {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Storage
    }

    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool {
        let obs = problem.observation(idx);
        if obs.storage_delta_gb <= 0.0 {
            return true;
        }
        let satellite = problem.satellite_of(idx);
        let usage = solution.usage(problem.satellite_index_of(idx));
        usage.storage_gb + obs.storage_delta_gb <= satellite.storage_gb + 1e-9
    }
}
