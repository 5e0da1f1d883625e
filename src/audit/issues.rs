//! Issues reported by the setup audit.

use crate::core::StateId;
use thiserror::Error;

/// A questionable setup found by [`audit`](crate::audit::audit).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SetupIssue {
    #[error("Initial state not set")]
    MissingInitialState,

    #[error("Transition {from} -> {to} is registered more than once")]
    DuplicateEdge { from: StateId, to: StateId },

    #[error("Transition {from} -> {to} has no start condition and never fires automatically")]
    InertTransition { from: StateId, to: StateId },

    #[error("State {state} has permissions but is unreachable from the current state")]
    UnreachablePermission { state: StateId },
}
