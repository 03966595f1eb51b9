//! Uplink precedence constraint.
//!
//! Imaging actions flagged as requiring a command uplink are infeasible
//! until a supporting uplink on the same satellite is selected and
//! completes far enough ahead of the imaging start.

use super::{ConstraintKind, ConstraintRule};
use crate::models::ObservationKind;
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Rejects imaging candidates whose command uplink is missing or late.
pub struct UplinkPrecedence;

impl ConstraintRule for UplinkPrecedence {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::UplinkPrecedence
    }

    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool {
        match problem.observation(idx).kind {
            ObservationKind::Imaging {
                requires_uplink: true,
            } => has_command_support(idx, solution, problem),
            _ => true,
        }
    }
}

/// Whether a selected uplink supports the imaging candidate in time.
///
/// Also used by solution removal to cascade imaging actions that lose
/// their last supporting uplink.
pub(crate) fn has_command_support(
    imaging_idx: u32,
    solution: &Solution,
    problem: &SchedulingProblem,
) -> bool {
    let imaging = problem.observation(imaging_idx);
    problem
        .supporting_uplinks(imaging_idx)
        .iter()
        .any(|&uplink_idx| {
            solution.is_selected(uplink_idx)
                && problem.observation(uplink_idx).end_ms + problem.min_uplink_gap_ms()
                    <= imaging.start_ms
        })
}
