//! Observation value function.
//!
//! Each candidate's `value` is computed once, upstream of search, as a
//! weighted sum of normalized quality terms: target priority, pass
//! elevation, sensor resolution, and timeliness. The search layer only
//! ever sums precomputed values, so swapping the scoring policy never
//! touches the algorithms.
//!
//! All sub-terms normalize to 0–1 before weighting and the weighted sum
//! scales to 0–100.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Observation, Satellite, Target};

/// Reference resolution (m) mapping to a resolution score of zero.
const RESOLUTION_REF_M: f64 = 10.0;

/// Weights of the value function's quality terms.
///
/// Defaults follow the operational configuration
/// (priority 0.4, elevation 0.2, resolution 0.2, timeliness 0.2);
/// they are configuration, not law.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueWeights {
    /// Weight of the target-priority term.
    pub priority: f64,
    /// Weight of the pass-elevation term.
    pub elevation: f64,
    /// Weight of the sensor-resolution term.
    pub resolution: f64,
    /// Weight of the timeliness term.
    pub timeliness: f64,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            priority: 0.4,
            elevation: 0.2,
            resolution: 0.2,
            timeliness: 0.2,
        }
    }
}

impl ValueWeights {
    /// Scores one imaging candidate against its target.
    ///
    /// `resolution_m` is the imaging sensor's ground resolution;
    /// `horizon_ms` is the planning horizon used to normalize
    /// timeliness (earlier observations score higher).
    pub fn score(
        &self,
        observation: &Observation,
        target: &Target,
        resolution_m: f64,
        horizon_ms: i64,
    ) -> f64 {
        let priority_score = (f64::from(target.priority) - 1.0) / 4.0;
        let elevation_score = ((observation.elevation_deg - 15.0) / 75.0).clamp(0.0, 1.0);
        let resolution_score = (1.0 - resolution_m / RESOLUTION_REF_M).clamp(0.0, 1.0);
        let timeliness_score = if horizon_ms > 0 {
            (1.0 - observation.start_ms as f64 / horizon_ms as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (self.priority * priority_score
            + self.elevation * elevation_score
            + self.resolution * resolution_score
            + self.timeliness * timeliness_score)
            * 100.0
    }
}

/// Fills in `value` for every imaging candidate in place.
///
/// Candidates whose target or sensor cannot be resolved keep their
/// current value; communication actions are never scored (they enable
/// imaging rather than contributing reward directly).
pub fn apply_values(
    observations: &mut [Observation],
    targets: &[Target],
    satellites: &[Satellite],
    weights: &ValueWeights,
    horizon_ms: i64,
) {
    let target_map: HashMap<&str, &Target> = targets.iter().map(|t| (t.id.as_str(), t)).collect();
    let sat_map: HashMap<&str, &Satellite> =
        satellites.iter().map(|s| (s.id.as_str(), s)).collect();

    for obs in observations.iter_mut() {
        if !obs.kind.is_imaging() {
            continue;
        }
        let target = obs
            .target_id
            .as_deref()
            .and_then(|id| target_map.get(id).copied());
        let resolution_m = obs.sensor_id.as_deref().and_then(|sensor_id| {
            sat_map
                .get(obs.satellite_id.as_str())
                .and_then(|sat| sat.sensor(sensor_id))
                .map(|sensor| sensor.resolution_m)
        });

        if let (Some(target), Some(resolution_m)) = (target, resolution_m) {
            obs.value = weights.score(obs, target, resolution_m, horizon_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImagingMode, Sensor};
    use approx::assert_relative_eq;

    const HORIZON: i64 = 86_400_000;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ValueWeights::default();
        assert_relative_eq!(w.priority + w.elevation + w.resolution + w.timeliness, 1.0);
    }

    #[test]
    fn test_score_best_case() {
        // Priority 5, 90° elevation, 0 m resolution, t=0 → every term is 1.
        let weights = ValueWeights::default();
        let target = Target::point("T1", 0.0, 0.0).with_priority(5);
        let obs = Observation::imaging("O1", "S1", "T1", 0, 10_000).with_geometry(90.0, 0.0);
        assert_relative_eq!(weights.score(&obs, &target, 0.0, HORIZON), 100.0);
    }

    #[test]
    fn test_score_worst_case() {
        let weights = ValueWeights::default();
        let target = Target::point("T1", 0.0, 0.0).with_priority(1);
        let obs = Observation::imaging("O1", "S1", "T1", HORIZON, HORIZON + 10_000)
            .with_geometry(10.0, 0.0);
        assert_relative_eq!(weights.score(&obs, &target, 20.0, HORIZON), 0.0);
    }

    #[test]
    fn test_score_mid_terms() {
        let weights = ValueWeights::default();
        let target = Target::point("T1", 0.0, 0.0).with_priority(3);
        // Elevation 52.5° → 0.5; resolution 5 m → 0.5; start at half horizon → 0.5.
        let obs = Observation::imaging("O1", "S1", "T1", HORIZON / 2, HORIZON / 2 + 10_000)
            .with_geometry(52.5, 0.0);
        let score = weights.score(&obs, &target, 5.0, HORIZON);
        assert_relative_eq!(score, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_priority_dominates_with_custom_weights() {
        let weights = ValueWeights {
            priority: 1.0,
            elevation: 0.0,
            resolution: 0.0,
            timeliness: 0.0,
        };
        let low = Target::point("T1", 0.0, 0.0).with_priority(1);
        let high = Target::point("T2", 0.0, 0.0).with_priority(5);
        let obs = Observation::imaging("O1", "S1", "T1", 0, 10_000);
        assert_relative_eq!(weights.score(&obs, &low, 1.0, HORIZON), 0.0);
        assert_relative_eq!(weights.score(&obs, &high, 1.0, HORIZON), 100.0);
    }

    #[test]
    fn test_apply_values() {
        let satellites = vec![Satellite::optical("S1")
            .with_sensor(Sensor::new("CAM", ImagingMode::Agile).with_resolution(1.0))];
        let targets = vec![Target::point("T1", 0.0, 0.0).with_priority(5)];
        let mut observations = vec![
            Observation::imaging("O1", "S1", "T1", 0, 10_000)
                .with_sensor("CAM")
                .with_geometry(90.0, 0.0),
            Observation::downlink("D1", "S1", "A1", 0, 5_000).with_value(7.0),
        ];

        apply_values(
            &mut observations,
            &targets,
            &satellites,
            &ValueWeights::default(),
            HORIZON,
        );

        // Imaging scored: 0.4·1 + 0.2·1 + 0.2·0.9 + 0.2·1 = 0.98 → 98.
        assert_relative_eq!(observations[0].value, 98.0, epsilon = 1e-9);
        // Downlink untouched.
        assert_relative_eq!(observations[1].value, 7.0);
    }

    #[test]
    fn test_apply_values_unresolvable_kept() {
        let satellites = vec![Satellite::optical("S1")];
        let targets = vec![Target::point("T1", 0.0, 0.0)];
        let mut observations =
            vec![Observation::imaging("O1", "S1", "T1", 0, 10_000).with_value(3.0)];
        // No sensor on the observation → value stays.
        apply_values(
            &mut observations,
            &targets,
            &satellites,
            &ValueWeights::default(),
            HORIZON,
        );
        assert_relative_eq!(observations[0].value, 3.0);
    }
}
