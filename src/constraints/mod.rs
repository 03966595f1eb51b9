//! Composable constraint evaluation.
//!
//! The [`ConstraintChecker`] answers one question for the search's inner
//! loop: is this candidate addable to this partial solution? Each check
//! is a pure predicate over the solution's state — nothing mutates until
//! every check passes, so check ordering can never leak partial state.
//!
//! The standard check order is fixed and deterministic, cheapest first:
//! storage → energy → transition time → antenna exclusivity → uplink
//! precedence. The first failing check short-circuits and names itself
//! in the rejection.
//!
//! A rejection is a normal signal consumed by the search, never an
//! error.

mod antenna;
mod energy;
mod storage;
mod transition;
mod uplink;

pub use antenna::AntennaExclusivity;
pub use energy::EnergyCapacity;
pub use storage::StorageCapacity;
pub use transition::TransitionTime;
pub use uplink::UplinkPrecedence;

pub(crate) use uplink::has_command_support;

use crate::problem::SchedulingProblem;
use crate::solution::Solution;

/// The constraint family that rejected a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Satellite storage capacity would be exceeded.
    Storage,
    /// Satellite energy capacity would be exceeded.
    Energy,
    /// Minimum transition gap to a neighboring action is violated.
    Transition,
    /// The bound antenna is busy or cannot switch satellites in time.
    AntennaExclusive,
    /// Required command uplink is missing or completes too late.
    UplinkPrecedence,
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The candidate is addable.
    Accepted,
    /// The candidate was rejected by the named constraint.
    Rejected(ConstraintKind),
}

impl CheckOutcome {
    /// Whether the candidate was accepted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, CheckOutcome::Accepted)
    }

    /// The rejecting constraint, if any.
    pub fn reason(&self) -> Option<ConstraintKind> {
        match self {
            CheckOutcome::Accepted => None,
            CheckOutcome::Rejected(kind) => Some(*kind),
        }
    }
}

/// A single feasibility rule.
///
/// Implementations must be pure: they read the solution and problem but
/// mutate nothing, so the checker can probe candidates speculatively.
pub trait ConstraintRule: Send + Sync {
    /// The constraint family this rule enforces.
    fn kind(&self) -> ConstraintKind;

    /// Whether the candidate may be added to the solution.
    fn admits(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> bool;
}

/// The composed evaluator shared by all search algorithms.
pub struct ConstraintChecker {
    rules: Vec<Box<dyn ConstraintRule>>,
}

impl ConstraintChecker {
    /// Creates a checker with no rules (every candidate is addable).
    pub fn unconstrained() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates the standard checker with all five rules in order.
    pub fn standard() -> Self {
        Self::unconstrained()
            .with_rule(StorageCapacity)
            .with_rule(EnergyCapacity)
            .with_rule(TransitionTime)
            .with_rule(AntennaExclusivity)
            .with_rule(UplinkPrecedence)
    }

    /// Appends a rule to the check order.
    pub fn with_rule(mut self, rule: impl ConstraintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of composed rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks whether a candidate is addable to a solution.
    ///
    /// Rules run in composition order; the first failure wins.
    pub fn can_add(&self, idx: u32, solution: &Solution, problem: &SchedulingProblem) -> CheckOutcome {
        for rule in &self.rules {
            if !rule.admits(idx, solution, problem) {
                return CheckOutcome::Rejected(rule.kind());
            }
        }
        CheckOutcome::Accepted
    }
}

impl Default for ConstraintChecker {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ConstraintChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintChecker")
            .field("rules", &self.rules.iter().map(|r| r.kind()).collect::<Vec<_>>())
            .finish()
    }
}
