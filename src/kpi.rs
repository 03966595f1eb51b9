//! Plan quality metrics (KPIs).
//!
//! Computes the summary the orchestration layer persists as the run's
//! output artifact: objective, completion rate, and per-satellite /
//! per-antenna resource utilisation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Objective | Sum of selected observation values |
//! | Completion Rate | Distinct targets imaged / distinct targets offered |
//! | Storage Utilisation | Used / capacity per satellite (%) |
//! | Energy Utilisation | Used / capacity per satellite (%) |
//! | Antenna Busy Time | Selected pass time per antenna (ms) |

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// Per-satellite resource utilisation percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteUtilization {
    /// Satellite ID.
    pub satellite_id: String,
    /// Storage used / capacity (%).
    pub storage_pct: f64,
    /// Energy used / capacity (%).
    pub energy_pct: f64,
    /// Selected actions on this satellite.
    pub action_count: usize,
}

/// Plan-level performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanKpi {
    /// Objective of the plan.
    pub objective: f64,
    /// Selected candidates.
    pub selected_count: usize,
    /// Offered candidates.
    pub candidate_count: usize,
    /// Distinct targets imaged / distinct targets offered (0–1).
    pub target_completion_rate: f64,
    /// Per-satellite utilisation, in roster order.
    pub utilization: Vec<SatelliteUtilization>,
    /// Busy time per antenna (ms).
    pub antenna_busy_ms: HashMap<String, i64>,
}

impl PlanKpi {
    /// Computes KPIs for a solution over its problem.
    pub fn calculate(solution: &Solution, problem: &SchedulingProblem) -> Self {
        let selected = solution.selected_indices();

        let offered_targets: HashSet<&str> = problem
            .observations()
            .iter()
            .filter(|o| o.kind.is_imaging())
            .filter_map(|o| o.target_id.as_deref())
            .collect();
        let imaged_targets: HashSet<&str> = selected
            .iter()
            .map(|&i| problem.observation(i))
            .filter(|o| o.kind.is_imaging())
            .filter_map(|o| o.target_id.as_deref())
            .collect();
        let target_completion_rate = if offered_targets.is_empty() {
            0.0
        } else {
            imaged_targets.len() as f64 / offered_targets.len() as f64
        };

        let utilization = problem
            .satellites()
            .iter()
            .enumerate()
            .map(|(i, sat)| {
                let usage = solution.usage(i);
                SatelliteUtilization {
                    satellite_id: sat.id.clone(),
                    storage_pct: percentage(usage.storage_gb, sat.storage_gb),
                    energy_pct: percentage(usage.energy_wh, sat.power_capacity_wh),
                    action_count: solution.satellite_timeline(i).len(),
                }
            })
            .collect();

        let mut antenna_busy_ms = HashMap::new();
        for (i, antenna) in problem.antennas().iter().enumerate() {
            let busy: i64 = solution
                .antenna_timeline(i)
                .iter()
                .map(|&idx| problem.observation(idx).duration_ms())
                .sum();
            if busy > 0 {
                antenna_busy_ms.insert(antenna.id.clone(), busy);
            }
        }

        Self {
            objective: solution.objective(),
            selected_count: solution.len(),
            candidate_count: problem.len(),
            target_completion_rate,
            utilization,
            antenna_busy_ms,
        }
    }
}

fn percentage(used: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        used / capacity * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintChecker;
    use crate::models::{Antenna, Observation, Satellite};
    use approx::assert_relative_eq;

    fn sample() -> (SchedulingProblem, Solution) {
        let satellites = vec![
            Satellite::optical("S1").with_storage(10.0).with_power_capacity(100.0),
            Satellite::optical("S2").with_storage(20.0).with_power_capacity(200.0),
        ];
        let antennas = vec![Antenna::new("A1", "GS1")];
        let observations = vec![
            Observation::imaging("O1", "S1", "T1", 0, 10_000)
                .with_value(10.0)
                .with_resource_deltas(4.0, 25.0),
            Observation::imaging("O2", "S1", "T2", 60_000, 70_000)
                .with_value(8.0)
                .with_resource_deltas(2.0, 25.0),
            Observation::imaging("O3", "S2", "T3", 0, 10_000).with_value(6.0),
            Observation::downlink("D1", "S2", "A1", 100_000, 130_000),
        ];
        let problem = SchedulingProblem::new(observations, satellites, antennas).unwrap();
        let checker = ConstraintChecker::standard();
        let mut solution = Solution::empty(&problem);
        solution.try_add(0, &problem, &checker);
        solution.try_add(1, &problem, &checker);
        solution.try_add(3, &problem, &checker);
        (problem, solution)
    }

    #[test]
    fn test_kpi_basic() {
        let (problem, solution) = sample();
        let kpi = PlanKpi::calculate(&solution, &problem);

        assert_relative_eq!(kpi.objective, 18.0);
        assert_eq!(kpi.selected_count, 3);
        assert_eq!(kpi.candidate_count, 4);
        // Targets T1, T2 of {T1, T2, T3}.
        assert_relative_eq!(kpi.target_completion_rate, 2.0 / 3.0);
    }

    #[test]
    fn test_kpi_utilization() {
        let (problem, solution) = sample();
        let kpi = PlanKpi::calculate(&solution, &problem);

        let s1 = &kpi.utilization[0];
        assert_eq!(s1.satellite_id, "S1");
        assert_relative_eq!(s1.storage_pct, 60.0); // 6 of 10 GB
        assert_relative_eq!(s1.energy_pct, 50.0); // 50 of 100 Wh
        assert_eq!(s1.action_count, 2);

        let s2 = &kpi.utilization[1];
        assert_relative_eq!(s2.storage_pct, 0.0);
        assert_eq!(s2.action_count, 1); // The downlink.
    }

    #[test]
    fn test_kpi_antenna_busy() {
        let (problem, solution) = sample();
        let kpi = PlanKpi::calculate(&solution, &problem);
        assert_eq!(kpi.antenna_busy_ms.get("A1"), Some(&30_000));
    }

    #[test]
    fn test_kpi_empty_solution() {
        let (problem, _) = sample();
        let kpi = PlanKpi::calculate(&Solution::empty(&problem), &problem);
        assert_relative_eq!(kpi.objective, 0.0);
        assert_eq!(kpi.selected_count, 0);
        assert_relative_eq!(kpi.target_completion_rate, 0.0);
        assert!(kpi.antenna_busy_ms.is_empty());
    }

    #[test]
    fn test_kpi_serializes() {
        let (problem, solution) = sample();
        let kpi = PlanKpi::calculate(&solution, &problem);
        let json = serde_json::to_string(&kpi).unwrap();
        assert!(json.contains("\"target_completion_rate\""));
        let back: PlanKpi = serde_json::from_str(&json).unwrap();
        assert_eq!(back.selected_count, 3);
    }
}
