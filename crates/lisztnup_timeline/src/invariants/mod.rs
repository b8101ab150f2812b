//! First-class invariants for the timeline engine.
//!
//! Invariants are properties that hold between any two operations. The
//! engine checks them after every mutating operation in debug builds; they
//! are also usable directly from tests.

pub mod cards;
pub mod pending;
pub mod supply;

pub use cards::DistinctTimelineCards;
pub use pending::{PendingMatchesPhase, SingleUnconfirmedEntry};
pub use supply::CenterStackBounded;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of four invariants, the shape of [`TimelineInvariants`].
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        collect::<S, I4>(state, &mut violations);
        finish(violations)
    }
}

/// Every engine invariant as one composable set.
pub type TimelineInvariants = (
    SingleUnconfirmedEntry,
    PendingMatchesPhase,
    CenterStackBounded,
    DistinctTimelineCards,
);
