//! Action transition-time constraint.
//!
//! Consecutive actions on one satellite need a minimum gap that depends
//! on the action pair: imaging → imaging needs a slew, imaging ↔
//! communication needs a payload reconfiguration, and chained
//! communication passes over different stations need a re-point.
//! A candidate violating the gap to either timeline neighbor is
//! rejected, never clamped or shifted.

use super::{ConstraintKind, ConstraintRule};
use crate::models::Observation;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Rejects candidates too close to a neighboring action on the same
/// satellite's timeline.
pub struct TransitionTime;

impl ConstraintRule for TransitionTime {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Transition
    }

    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool {
        let obs = problem.observation(idx);
        let sat_idx = problem.satellite_index_of(idx);
        let timeline = solution.satellite_timeline(sat_idx);
        if timeline.is_empty() {
            return true;
        }

        // Position the candidate among the sorted selected actions and
        // check the gap to its nearest neighbors.
        let pos = timeline.partition_point(|&other| {
            problem.observation(other).start_ms < obs.start_ms
        });

        if pos > 0 {
            let prev = problem.observation(timeline[pos - 1]);
            let gap = required_gap_ms(problem, idx, timeline[pos - 1]);
            if prev.end_ms + gap > obs.start_ms {
                return false;
            }
        }
        if pos < timeline.len() {
            let next = problem.observation(timeline[pos]);
            let gap = required_gap_ms(problem, idx, timeline[pos]);
            if obs.end_ms + gap > next.start_ms {
                return false;
            }
        }
        true
    }
}

/// Minimum gap between two actions on the same satellite (ms).
fn required_gap_ms(problem: &SchedulingProblem, a: u32, b: u32) -> i64 {
    let transition = &problem.satellite_of(a).transition;
    let obs_a = problem.observation(a);
    let obs_b = problem.observation(b);
    match (obs_a.kind.is_imaging(), obs_b.kind.is_imaging()) {
        (true, true) => transition.imaging_switch_ms,
        (true, false) | (false, true) => transition.imaging_to_comm_ms,
        // Comm → comm: only switching stations costs a re-point.
        (false, false) => {
            if same_station(problem, obs_a, obs_b) {
                0
            } else {
                transition.comm_switch_ms
            }
        }
    }
}

fn same_station(problem: &SchedulingProblem, a: &Observation, b: &Observation) -> bool {
    let station_of = |obs: &Observation| {
        obs.antenna_id.as_deref().and_then(|id| {
            problem
                .antennas()
                .iter()
                .find(|ant| ant.id == id)
                .map(|ant| ant.station_id.as_str())
        })
    };
    match (station_of(a), station_of(b)) {
        (Some(sa), Some(sb)) => sa == sb,
        _ => false,
    }
}
