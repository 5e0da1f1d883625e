//! Engine error types.

use crate::core::{Selector, StateId};
use thiserror::Error;

/// Failure reported by a transition effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EffectError {
    message: String,
}

impl EffectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that abort an engine call.
///
/// None of these are retried by the engine. A failed call leaves the
/// machine and the host environment as they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    #[error("Initial state already set to {current}")]
    AlreadyInitialized { current: StateId },

    #[error("Machine is immutable; setup operations are no longer allowed")]
    AlreadyImmutable,

    #[error("No transition registered from {from} to {to}")]
    TransitionNotFound { from: StateId, to: StateId },

    #[error("Function {selector} is not permitted in state {state}")]
    NotPermitted { state: StateId, selector: Selector },

    #[error("Effect #{index} of transition {from} -> {to} failed: {source}")]
    EffectFailed {
        from: StateId,
        to: StateId,
        index: usize,
        #[source]
        source: EffectError,
    },

    #[error("Cascade exceeded the configured limit of {limit} transitions")]
    CascadeLimitExceeded { limit: usize },
}
