//! Build errors for state machine and transition builders.

use crate::audit::SetupIssue;
use crate::engine::MachineError;
use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Setup rejected: {0}")]
    Setup(#[from] MachineError),

    #[error("Strict build found {} setup issue(s)", .0.len())]
    Audit(Vec<SetupIssue>),
}
