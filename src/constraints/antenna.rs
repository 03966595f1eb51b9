//! Antenna resource exclusivity constraint.
//!
//! One antenna serves one satellite at a time. A candidate communication
//! pass is rejected when it overlaps any selected pass on the same
//! antenna, or when the antenna would have to switch satellites faster
//! than its minimum re-point gap allows.

use super::{ConstraintKind, ConstraintRule};
use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Rejects communication passes that contend for a busy antenna.
pub struct AntennaExclusivity;

impl ConstraintRule for AntennaExclusivity {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::AntennaExclusive
    }

    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool {
        let ant_idx = match problem.antenna_index_of(idx) {
            Some(a) => a,
            None => return true, // Not antenna-bound.
        };
        let obs = problem.observation(idx);
        let antenna = &problem.antennas()[ant_idx];
        let timeline = solution.antenna_timeline(ant_idx);
        if timeline.is_empty() {
            return true;
        }

        let pos = timeline.partition_point(|&other| {
            problem.observation(other).start_ms < obs.start_ms
        });

        if pos > 0 {
            let prev = problem.observation(timeline[pos - 1]);
            let min_gap = if prev.satellite_id != obs.satellite_id {
                antenna.satellite_switch_time_ms
            } else {
                0
            };
            if prev.end_ms + min_gap > obs.start_ms {
                return false;
            }
        }
        if pos < timeline.len() {
            let next = problem.observation(timeline[pos]);
            let min_gap = if next.satellite_id != obs.satellite_id {
                antenna.satellite_switch_time_ms
            } else {
                0
            };
            if obs.end_ms + min_gap > next.start_ms {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintChecker;
    use crate::models::{Antenna, Observation, Satellite, TransitionTimes};

    fn problem(observations: Vec<Observation>) -> SchedulingProblem {
        // Zero satellite-side transition times so only the antenna rule
        // is exercised.
        let no_transition = TransitionTimes {
            imaging_switch_ms: 0,
            imaging_to_comm_ms: 0,
            comm_switch_ms: 0,
        };
        let satellites = vec![
            Satellite::optical("S1").with_transition_times(no_transition),
            Satellite::optical("S2").with_transition_times(no_transition),
        ];
        let antennas = vec![Antenna::new("A1", "GS1").with_switch_time(5_000)];
        SchedulingProblem::new(observations, satellites, antennas).unwrap()
    }

    #[test]
    fn test_overlap_rejected() {
        let problem = problem(vec![
            Observation::downlink("D1", "S1", "A1", 0, 10_000),
            Observation::downlink("D2", "S2", "A1", 5_000, 15_000),
        ]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        assert!(sol.try_add(0, &problem, &checker).is_accepted());
        let outcome = sol.try_add(1, &problem, &checker);
        assert_eq!(outcome.reason(), Some(ConstraintKind::AntennaExclusive));
    }

    #[test]
    fn test_switch_gap_between_satellites() {
        let problem = problem(vec![
            Observation::downlink("D1", "S1", "A1", 0, 10_000),
            // 3 s gap < 5 s switch time, different satellite.
            Observation::downlink("D2", "S2", "A1", 13_000, 20_000),
            // 6 s gap is enough.
            Observation::downlink("D3", "S2", "A1", 16_000, 22_000),
        ]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        sol.try_add(0, &problem, &checker);
        assert!(!sol.try_add(1, &problem, &checker).is_accepted());
        assert!(sol.try_add(2, &problem, &checker).is_accepted());
    }

    #[test]
    fn test_same_satellite_back_to_back() {
        let problem = problem(vec![
            Observation::downlink("D1", "S1", "A1", 0, 10_000),
            Observation::downlink("D2", "S1", "A1", 10_000, 15_000),
        ]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        assert!(sol.try_add(0, &problem, &checker).is_accepted());
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
    }

    #[test]
    fn test_imaging_not_antenna_bound() {
        let problem = problem(vec![
            Observation::downlink("D1", "S1", "A1", 0, 10_000),
            Observation::imaging("O1", "S2", "T1", 5_000, 9_000),
        ]);
        let checker = ConstraintChecker::standard();
        let mut sol = Solution::empty(&problem);

        sol.try_add(0, &problem, &checker);
        // Imaging on another satellite never contends for the antenna.
        assert!(sol.try_add(1, &problem, &checker).is_accepted());
    }
}
