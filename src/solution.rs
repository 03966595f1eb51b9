//! Solution representation.
//!
//! A [`Solution`] is a feasible subset of the problem's candidates plus
//! derived state: an incrementally maintained objective, per-satellite
//! resource-usage snapshots, and per-satellite / per-antenna action
//! timelines kept sorted by start time.
//!
//! Every solution owns its usage snapshot — satellites themselves stay
//! immutable capacity templates, so two solutions explored concurrently
//! can never alias each other's counters. `Clone` is a deep copy;
//! algorithms clone before mutating a solution they intend to keep
//! distinct from the original.
//!
//! Feasibility is enforced at construction: every member passed the
//! constraint evaluator against the then-current state, and removal of
//! an uplink cascades to imaging actions left without command support.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::constraints::{has_command_support, CheckOutcome, ConstraintChecker};
use crate::models::Satellite;
use crate::problem::SchedulingProblem;

/// Running resource usage of one satellite within one solution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    /// Storage in use (GB).
    pub storage_gb: f64,
    /// Energy consumed (Wh).
    pub energy_wh: f64,
}

impl ResourceUsage {
    /// Whether the satellite can absorb the given deltas.
    pub fn has_capacity(&self, satellite: &Satellite, storage_gb: f64, energy_wh: f64) -> bool {
        self.storage_gb + storage_gb <= satellite.storage_gb + 1e-9
            && self.energy_wh + energy_wh <= satellite.power_capacity_wh + 1e-9
    }

    /// Applies the deltas of a selected action.
    pub fn consume(&mut self, storage_gb: f64, energy_wh: f64) {
        self.storage_gb += storage_gb;
        self.energy_wh += energy_wh;
    }

    /// Reverts the deltas of a deselected action.
    pub fn release(&mut self, storage_gb: f64, energy_wh: f64) {
        self.storage_gb -= storage_gb;
        self.energy_wh -= energy_wh;
    }

    /// Clears all usage.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A partial assignment of candidates, always feasible unless flagged.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Selection state over the canonical candidate ordering.
    selected: Vec<bool>,
    /// Running objective (sum of selected values).
    objective: f64,
    /// Per-satellite usage snapshots.
    usage: Vec<ResourceUsage>,
    /// Per-satellite selected actions, sorted by start time.
    sat_timeline: Vec<Vec<u32>>,
    /// Per-antenna selected actions, sorted by start time.
    antenna_timeline: Vec<Vec<u32>>,
    /// Number of selected candidates.
    num_selected: usize,
    /// Whether the solution is valid for scoring.
    feasible: bool,
}

impl Solution {
    /// Creates an empty solution sized for the problem.
    pub fn empty(problem: &SchedulingProblem) -> Self {
        Self {
            selected: vec![false; problem.len()],
            objective: 0.0,
            usage: vec![ResourceUsage::default(); problem.satellites().len()],
            sat_timeline: vec![Vec::new(); problem.satellites().len()],
            antenna_timeline: vec![Vec::new(); problem.antennas().len()],
            num_selected: 0,
            feasible: true,
        }
    }

    /// Whether the candidate is selected.
    #[inline]
    pub fn is_selected(&self, idx: u32) -> bool {
        self.selected[idx as usize]
    }

    /// Number of selected candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_selected
    }

    /// Whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_selected == 0
    }

    /// The running objective.
    ///
    /// Only meaningful while [`is_feasible`](Self::is_feasible) holds —
    /// no algorithm may read an invalid solution's objective as a score.
    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Whether the solution is valid for scoring.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Explicitly flags the solution invalid.
    pub fn mark_infeasible(&mut self) {
        self.feasible = false;
    }

    /// Usage snapshot of one satellite.
    #[inline]
    pub fn usage(&self, sat_idx: usize) -> &ResourceUsage {
        &self.usage[sat_idx]
    }

    /// Selected actions of one satellite, sorted by start time.
    #[inline]
    pub fn satellite_timeline(&self, sat_idx: usize) -> &[u32] {
        &self.sat_timeline[sat_idx]
    }

    /// Selected actions on one antenna, sorted by start time.
    #[inline]
    pub fn antenna_timeline(&self, antenna_idx: usize) -> &[u32] {
        &self.antenna_timeline[antenna_idx]
    }

    /// Selected candidate indices in canonical order.
    pub fn selected_indices(&self) -> Vec<u32> {
        (0..self.selected.len() as u32)
            .filter(|&i| self.selected[i as usize])
            .collect()
    }

    /// Selected candidate IDs in canonical order.
    pub fn selected_ids(&self, problem: &SchedulingProblem) -> Vec<String> {
        self.selected_indices()
            .into_iter()
            .map(|i| problem.observation(i).id.clone())
            .collect()
    }

    /// Attempts to add a candidate, checking feasibility first.
    ///
    /// Nothing mutates unless every constraint check passes. Adding an
    /// already-selected candidate is a no-op acceptance.
    pub fn try_add(
        &mut self,
        idx: u32,
        problem: &SchedulingProblem,
        checker: &ConstraintChecker,
    ) -> CheckOutcome {
        if self.is_selected(idx) {
            return CheckOutcome::Accepted;
        }
        let outcome = checker.can_add(idx, self, problem);
        if !outcome.is_accepted() {
            return outcome;
        }

        let obs = problem.observation(idx);
        let sat_idx = problem.satellite_index_of(idx);
        self.selected[idx as usize] = true;
        self.num_selected += 1;
        self.objective += obs.value;
        self.usage[sat_idx].consume(obs.storage_delta_gb, obs.energy_delta_wh);
        timeline_insert(&mut self.sat_timeline[sat_idx], idx, problem);
        if let Some(ant_idx) = problem.antenna_index_of(idx) {
            timeline_insert(&mut self.antenna_timeline[ant_idx], idx, problem);
        }
        CheckOutcome::Accepted
    }

    /// Removes a candidate. Returns `false` if it wasn't selected.
    ///
    /// Removing an uplink cascades to selected imaging actions that lose
    /// their last command support, preserving the feasibility invariant.
    pub fn remove(&mut self, idx: u32, problem: &SchedulingProblem) -> bool {
        if !self.is_selected(idx) {
            return false;
        }

        let obs = problem.observation(idx);
        let sat_idx = problem.satellite_index_of(idx);
        self.selected[idx as usize] = false;
        self.num_selected -= 1;
        self.objective -= obs.value;
        self.usage[sat_idx].release(obs.storage_delta_gb, obs.energy_delta_wh);
        timeline_remove(&mut self.sat_timeline[sat_idx], idx);
        if let Some(ant_idx) = problem.antenna_index_of(idx) {
            timeline_remove(&mut self.antenna_timeline[ant_idx], idx);
        }

        // Cascade: imaging actions left without command support go too.
        let dependents: Vec<u32> = problem
            .dependent_imaging(idx)
            .iter()
            .copied()
            .filter(|&d| self.is_selected(d) && !has_command_support(d, self, problem))
            .collect();
        for dependent in dependents {
            self.remove(dependent, problem);
        }

        true
    }

    /// Flips the selection state of a candidate.
    ///
    /// Returns `true` if the solution changed (removal always succeeds;
    /// addition succeeds only when feasible).
    pub fn toggle(
        &mut self,
        idx: u32,
        problem: &SchedulingProblem,
        checker: &ConstraintChecker,
    ) -> bool {
        if self.is_selected(idx) {
            self.remove(idx, problem)
        } else {
            self.try_add(idx, problem, checker).is_accepted()
        }
    }

    /// Recomputes the objective by full rescan.
    ///
    /// The search maintains the objective incrementally; this exists so
    /// tests can detect drift between the running total and the truth.
    pub fn recompute_objective(&self, problem: &SchedulingProblem) -> f64 {
        self.selected_indices()
            .into_iter()
            .map(|i| problem.value(i))
            .sum()
    }

    /// A hash of the selection state, for solution-level tabu lists.
    pub fn selection_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.selected.hash(&mut hasher);
        hasher.finish()
    }
}

fn timeline_insert(timeline: &mut Vec<u32>, idx: u32, problem: &SchedulingProblem) {
    let start = problem.observation(idx).start_ms;
    let pos = timeline.partition_point(|&other| {
        let other_start = problem.observation(other).start_ms;
        other_start < start || (other_start == start && other < idx)
    });
    timeline.insert(pos, idx);
}

fn timeline_remove(timeline: &mut Vec<u32>, idx: u32) {
    if let Some(pos) = timeline.iter().position(|&o| o == idx) {
        timeline.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Antenna, Observation, Satellite};

    fn imaging_problem() -> SchedulingProblem {
        let satellites = vec![Satellite::optical("S1").with_storage(10.0)];
        let observations = vec![
            Observation::imaging("O1", "S1", "T1", 0, 10_000)
                .with_value(10.0)
                .with_resource_deltas(3.0, 50.0),
            Observation::imaging("O2", "S1", "T2", 60_000, 70_000)
                .with_value(8.0)
                .with_resource_deltas(3.0, 50.0),
            Observation::imaging("O3", "S1", "T3", 120_000, 130_000)
                .with_value(6.0)
                .with_resource_deltas(3.0, 50.0),
        ];
        SchedulingProblem::without_ground_segment(observations, satellites).unwrap()
    }

    #[test]
    fn test_empty_solution() {
        let problem = imaging_problem();
        let sol = Solution::empty(&problem);
        assert!(sol.is_empty());
        assert!(sol.is_feasible());
        assert!((sol.objective() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_add_and_objective() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        assert!(sol.try_add(0, &problem, &checker).is_accepted());
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
        assert_eq!(sol.len(), 2);
        assert!((sol.objective() - 18.0).abs() < 1e-10);
        assert!((sol.usage(0).storage_gb - 6.0).abs() < 1e-10);
        assert_eq!(sol.satellite_timeline(0), &[0, 1]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        sol.try_add(0, &problem, &checker);
        sol.try_add(0, &problem, &checker);
        assert_eq!(sol.len(), 1);
        assert!((sol.objective() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_remove_reverts_state() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        sol.try_add(0, &problem, &checker);
        sol.try_add(1, &problem, &checker);
        assert!(sol.remove(0, &problem));
        assert!(!sol.remove(0, &problem));

        assert_eq!(sol.len(), 1);
        assert!((sol.objective() - 8.0).abs() < 1e-10);
        assert!((sol.usage(0).storage_gb - 3.0).abs() < 1e-10);
        assert_eq!(sol.satellite_timeline(0), &[1]);
    }

    #[test]
    fn test_clone_is_deep() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut original = Solution::empty(&problem);
        original.try_add(0, &problem, &checker);

        let mut branched = original.clone();
        branched.try_add(1, &problem, &checker);

        // Mutating the branch never leaks into the original.
        assert_eq!(original.len(), 1);
        assert_eq!(branched.len(), 2);
        assert!((original.usage(0).storage_gb - 3.0).abs() < 1e-10);
        assert!((branched.usage(0).storage_gb - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_incremental_matches_recompute() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        sol.try_add(0, &problem, &checker);
        sol.try_add(2, &problem, &checker);
        sol.remove(0, &problem);
        sol.try_add(1, &problem, &checker);

        assert!((sol.objective() - sol.recompute_objective(&problem)).abs() < 1e-9);
    }

    #[test]
    fn test_uplink_cascade_removal() {
        let satellites = vec![Satellite::optical("S1")];
        let antennas = vec![Antenna::new("A1", "GS1")];
        let observations = vec![
            Observation::uplink("U1", "S1", "A1", 0, 5_000)
                .carrying_commands_for(vec!["O1".into()]),
            Observation::imaging("O1", "S1", "T1", 200_000, 210_000)
                .with_value(10.0)
                .requiring_uplink(),
        ];
        let problem = SchedulingProblem::new(observations, satellites, antennas).unwrap();
        let checker = ConstraintChecker::standard();

        let mut sol = Solution::empty(&problem);
        assert!(sol.try_add(0, &problem, &checker).is_accepted());
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
        assert_eq!(sol.len(), 2);

        // Removing the only supporting uplink takes the imaging with it.
        sol.remove(0, &problem);
        assert!(sol.is_empty());
        assert!((sol.objective() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_selected_ids() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);
        sol.try_add(2, &problem, &checker);
        sol.try_add(0, &problem, &checker);

        assert_eq!(sol.selected_ids(&problem), vec!["O1", "O3"]);
    }

    #[test]
    fn test_selection_hash_changes() {
        let problem = imaging_problem();
        let checker = ConstraintChecker::standard();
        let mut a = Solution::empty(&problem);
        let b = Solution::empty(&problem);
        assert_eq!(a.selection_hash(), b.selection_hash());

        a.try_add(0, &problem, &checker);
        assert_ne!(a.selection_hash(), b.selection_hash());
    }

    #[test]
    fn test_resource_usage_capacity() {
        let sat = Satellite::optical("S1")
            .with_storage(10.0)
            .with_power_capacity(100.0);
        let mut usage = ResourceUsage::default();
        assert!(usage.has_capacity(&sat, 10.0, 100.0));
        usage.consume(8.0, 50.0);
        assert!(!usage.has_capacity(&sat, 3.0, 0.0));
        assert!(usage.has_capacity(&sat, 2.0, 50.0));
        usage.release(8.0, 50.0);
        assert!(usage.has_capacity(&sat, 10.0, 100.0));
        usage.consume(1.0, 1.0);
        usage.reset();
        assert_eq!(usage, ResourceUsage::default());
    }
}
