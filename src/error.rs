//! Planning error taxonomy.
//!
//! Constraint rejections are not errors — they are a normal signal
//! consumed inside the search loop and never surface here. Only problems
//! that prevent a run from starting at all are reported as errors, so a
//! caller can distinguish "ran and found nothing" (a valid zero-objective
//! result) from "could not run".

use thiserror::Error;

use crate::validation::ValidationError;

/// An error preventing a planning run from starting.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Invalid or unbounded run configuration (e.g. neither an iteration
    /// budget nor a time budget). Detected before the search loop starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Structurally broken input: duplicate IDs, dangling references,
    /// non-positive windows. Detected when the problem is assembled.
    #[error("invalid problem input ({} issue(s), first: {})", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}
