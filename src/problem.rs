//! Planning problem assembly.
//!
//! [`SchedulingProblem`] compacts the domain objects into an indexed,
//! validated form the search loops can consume cheaply: observations in
//! a canonical order addressed by `u32` index, satellites and antennas
//! addressed by dense indices, and the uplink ↔ imaging cross-references
//! resolved up front. IDs are resolved back only at the result boundary.

use std::collections::HashMap;

use crate::error::PlanError;
use crate::models::{Antenna, Observation, ObservationKind, Satellite};
use crate::validation::validate_input;

/// Default minimum gap between an uplink's end and a dependent imaging
/// action's start (ms).
pub const DEFAULT_UPLINK_GAP_MS: i64 = 60_000;

/// An indexed, validated planning problem.
///
/// The observation ordering is canonical: it is the order candidates
/// were supplied in, and every algorithm that needs a stable ordering
/// (crossover segments, pheromone vectors, tie-breaks) uses it.
#[derive(Debug, Clone)]
pub struct SchedulingProblem {
    observations: Vec<Observation>,
    satellites: Vec<Satellite>,
    antennas: Vec<Antenna>,
    /// Per-observation satellite index.
    obs_satellite: Vec<usize>,
    /// Per-observation antenna index (communication actions only).
    obs_antenna: Vec<Option<usize>>,
    /// imaging index → uplink indices that carry its commands.
    supporting_uplinks: Vec<Vec<u32>>,
    /// uplink index → imaging indices depending on it.
    dependent_imaging: Vec<Vec<u32>>,
    /// Minimum uplink-to-imaging gap (ms).
    min_uplink_gap_ms: i64,
}

impl SchedulingProblem {
    /// Assembles and validates a problem.
    ///
    /// Fails with [`PlanError::InvalidInput`] on structural defects
    /// (duplicate IDs, dangling references, non-positive windows).
    pub fn new(
        observations: Vec<Observation>,
        satellites: Vec<Satellite>,
        antennas: Vec<Antenna>,
    ) -> Result<Self, PlanError> {
        validate_input(&observations, &satellites, &antennas).map_err(PlanError::InvalidInput)?;

        let sat_index: HashMap<&str, usize> = satellites
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        let antenna_index: HashMap<&str, usize> = antennas
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.as_str(), i))
            .collect();
        let obs_index: HashMap<&str, u32> = observations
            .iter()
            .enumerate()
            .map(|(i, o)| (o.id.as_str(), i as u32))
            .collect();

        // Validation guarantees every reference resolves.
        let obs_satellite: Vec<usize> = observations
            .iter()
            .map(|o| sat_index[o.satellite_id.as_str()])
            .collect();
        let obs_antenna: Vec<Option<usize>> = observations
            .iter()
            .map(|o| {
                o.antenna_id
                    .as_deref()
                    .and_then(|id| antenna_index.get(id).copied())
            })
            .collect();

        let n = observations.len();
        let mut supporting_uplinks = vec![Vec::new(); n];
        let mut dependent_imaging = vec![Vec::new(); n];
        for (u_idx, obs) in observations.iter().enumerate() {
            if let ObservationKind::Uplink { commands_for } = &obs.kind {
                for task_id in commands_for {
                    let i_idx = obs_index[task_id.as_str()] as usize;
                    // Command links only bind within the same satellite.
                    if observations[i_idx].satellite_id == obs.satellite_id {
                        supporting_uplinks[i_idx].push(u_idx as u32);
                        dependent_imaging[u_idx].push(i_idx as u32);
                    }
                }
            }
        }

        Ok(Self {
            observations,
            satellites,
            antennas,
            obs_satellite,
            obs_antenna,
            supporting_uplinks,
            dependent_imaging,
            min_uplink_gap_ms: DEFAULT_UPLINK_GAP_MS,
        })
    }

    /// Assembles a problem with no ground segment (imaging-only scenarios).
    pub fn without_ground_segment(
        observations: Vec<Observation>,
        satellites: Vec<Satellite>,
    ) -> Result<Self, PlanError> {
        Self::new(observations, satellites, Vec::new())
    }

    /// Sets the minimum uplink-to-imaging gap (ms).
    pub fn with_min_uplink_gap(mut self, gap_ms: i64) -> Self {
        self.min_uplink_gap_ms = gap_ms;
        self
    }

    /// Number of candidate observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the candidate list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The candidate at the given canonical index.
    #[inline]
    pub fn observation(&self, idx: u32) -> &Observation {
        &self.observations[idx as usize]
    }

    /// All candidates in canonical order.
    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// All satellites.
    #[inline]
    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    /// All antennas.
    #[inline]
    pub fn antennas(&self) -> &[Antenna] {
        &self.antennas
    }

    /// Satellite executing the candidate.
    #[inline]
    pub fn satellite_of(&self, idx: u32) -> &Satellite {
        &self.satellites[self.obs_satellite[idx as usize]]
    }

    /// Dense satellite index of the candidate.
    #[inline]
    pub fn satellite_index_of(&self, idx: u32) -> usize {
        self.obs_satellite[idx as usize]
    }

    /// Dense antenna index of the candidate, if antenna-bound.
    #[inline]
    pub fn antenna_index_of(&self, idx: u32) -> Option<usize> {
        self.obs_antenna[idx as usize]
    }

    /// Uplink candidates carrying commands for an imaging candidate.
    #[inline]
    pub fn supporting_uplinks(&self, imaging_idx: u32) -> &[u32] {
        &self.supporting_uplinks[imaging_idx as usize]
    }

    /// Imaging candidates depending on an uplink candidate.
    #[inline]
    pub fn dependent_imaging(&self, uplink_idx: u32) -> &[u32] {
        &self.dependent_imaging[uplink_idx as usize]
    }

    /// Minimum uplink-to-imaging gap (ms).
    #[inline]
    pub fn min_uplink_gap_ms(&self) -> i64 {
        self.min_uplink_gap_ms
    }

    /// Objective contribution of the candidate.
    #[inline]
    pub fn value(&self, idx: u32) -> f64 {
        self.observations[idx as usize].value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SchedulingProblem {
        let satellites = vec![Satellite::optical("S1"), Satellite::optical("S2")];
        let antennas = vec![Antenna::new("A1", "GS1")];
        let observations = vec![
            Observation::imaging("O1", "S1", "T1", 100_000, 110_000).requiring_uplink(),
            Observation::imaging("O2", "S2", "T2", 0, 10_000),
            Observation::uplink("U1", "S1", "A1", 0, 5_000)
                .carrying_commands_for(vec!["O1".into(), "O2".into()]),
        ];
        SchedulingProblem::new(observations, satellites, antennas).unwrap()
    }

    #[test]
    fn test_indexing() {
        let problem = sample();
        assert_eq!(problem.len(), 3);
        assert_eq!(problem.satellite_of(0).id, "S1");
        assert_eq!(problem.satellite_index_of(1), 1);
        assert_eq!(problem.antenna_index_of(2), Some(0));
        assert_eq!(problem.antenna_index_of(0), None);
    }

    #[test]
    fn test_uplink_cross_references() {
        let problem = sample();
        // U1 supports O1 (same satellite) but not O2 (different satellite).
        assert_eq!(problem.supporting_uplinks(0), &[2]);
        assert!(problem.supporting_uplinks(1).is_empty());
        assert_eq!(problem.dependent_imaging(2), &[0]);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let observations = vec![Observation::imaging("O1", "GHOST", "T1", 0, 1_000)];
        let satellites = vec![Satellite::optical("S1")];
        let result = SchedulingProblem::new(observations, satellites, Vec::new());
        assert!(matches!(result, Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_problem_is_valid() {
        let problem = SchedulingProblem::without_ground_segment(vec![], vec![]).unwrap();
        assert!(problem.is_empty());
    }

    #[test]
    fn test_uplink_gap_builder() {
        let problem = sample().with_min_uplink_gap(30_000);
        assert_eq!(problem.min_uplink_gap_ms(), 30_000);
    }
}
