//! Input validation for planning problems.
//!
//! Checks structural integrity of the candidate list and roster before
//! scheduling. Detects:
//! - Duplicate IDs
//! - Dangling satellite / antenna / uplink references
//! - Non-positive observation windows
//! - Communication actions without an antenna
//!
//! Constraint feasibility (storage, energy, timing) is *not* checked
//! here — that is the constraint evaluator's job inside the search.

use std::collections::HashSet;

use crate::models::{Antenna, Observation, ObservationKind, Satellite};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An observation references a satellite that doesn't exist.
    UnknownSatellite,
    /// A communication action references an antenna that doesn't exist.
    UnknownAntenna,
    /// An uplink carries commands for an observation that doesn't exist.
    UnknownUplinkTarget,
    /// An observation window has zero or negative duration.
    EmptyWindow,
    /// A communication action has no antenna bound.
    MissingAntenna,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a planning problem.
///
/// Checks:
/// 1. No duplicate satellite IDs
/// 2. No duplicate antenna IDs
/// 3. No duplicate observation IDs
/// 4. Every observation window has positive duration
/// 5. Every observation references a known satellite
/// 6. Every communication action is bound to a known antenna
/// 7. Every uplink's command list references known observations
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    observations: &[Observation],
    satellites: &[Satellite],
    antennas: &[Antenna],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut satellite_ids = HashSet::new();
    for sat in satellites {
        if !satellite_ids.insert(sat.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate satellite ID: {}", sat.id),
            ));
        }
    }

    let mut antenna_ids = HashSet::new();
    for ant in antennas {
        if !antenna_ids.insert(ant.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate antenna ID: {}", ant.id),
            ));
        }
    }

    let mut observation_ids = HashSet::new();
    for obs in observations {
        if !observation_ids.insert(obs.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate observation ID: {}", obs.id),
            ));
        }

        if obs.duration_ms() <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyWindow,
                format!(
                    "observation '{}' has non-positive window [{}, {}]",
                    obs.id, obs.start_ms, obs.end_ms
                ),
            ));
        }

        if !satellite_ids.contains(obs.satellite_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSatellite,
                format!(
                    "observation '{}' references unknown satellite '{}'",
                    obs.id, obs.satellite_id
                ),
            ));
        }

        if obs.kind.is_comm() {
            match &obs.antenna_id {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingAntenna,
                    format!("communication action '{}' has no antenna", obs.id),
                )),
                Some(ant) if !antenna_ids.contains(ant.as_str()) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownAntenna,
                        format!(
                            "communication action '{}' references unknown antenna '{}'",
                            obs.id, ant
                        ),
                    ))
                }
                _ => {}
            }
        }
    }

    // Uplink command references (needs the full observation ID set)
    for obs in observations {
        if let ObservationKind::Uplink { commands_for } = &obs.kind {
            for task_id in commands_for {
                if !observation_ids.contains(task_id.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownUplinkTarget,
                        format!(
                            "uplink '{}' carries commands for unknown observation '{}'",
                            obs.id, task_id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_satellites() -> Vec<Satellite> {
        vec![Satellite::optical("S1"), Satellite::optical("S2")]
    }

    fn sample_antennas() -> Vec<Antenna> {
        vec![Antenna::new("A1", "GS1")]
    }

    #[test]
    fn test_valid_input() {
        let observations = vec![
            Observation::imaging("O1", "S1", "T1", 0, 1_000),
            Observation::downlink("D1", "S2", "A1", 2_000, 3_000),
        ];
        assert!(validate_input(&observations, &sample_satellites(), &sample_antennas()).is_ok());
    }

    #[test]
    fn test_duplicate_observation_id() {
        let observations = vec![
            Observation::imaging("O1", "S1", "T1", 0, 1_000),
            Observation::imaging("O1", "S2", "T2", 0, 1_000),
        ];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duplicate_satellite_id() {
        let satellites = vec![Satellite::optical("S1"), Satellite::sar("S1")];
        let errors = validate_input(&[], &satellites, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("satellite")));
    }

    #[test]
    fn test_unknown_satellite() {
        let observations = vec![Observation::imaging("O1", "GHOST", "T1", 0, 1_000)];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownSatellite));
    }

    #[test]
    fn test_empty_window() {
        let observations = vec![Observation::imaging("O1", "S1", "T1", 1_000, 1_000)];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyWindow));
    }

    #[test]
    fn test_unknown_antenna() {
        let observations = vec![Observation::downlink("D1", "S1", "NOWHERE", 0, 1_000)];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownAntenna));
    }

    #[test]
    fn test_unknown_uplink_target() {
        let observations = vec![
            Observation::uplink("U1", "S1", "A1", 0, 1_000)
                .carrying_commands_for(vec!["MISSING".into()]),
        ];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownUplinkTarget));
    }

    #[test]
    fn test_multiple_errors() {
        let observations = vec![
            Observation::imaging("O1", "GHOST", "T1", 500, 0),
            Observation::imaging("O1", "S1", "T1", 0, 1_000),
        ];
        let errors =
            validate_input(&observations, &sample_satellites(), &sample_antennas()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
