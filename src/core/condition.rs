//! Start conditions gating automatic transitions.
//!
//! A start condition is a pure predicate over the host environment and the
//! candidate destination state. The cascade resolver may evaluate a
//! condition many times per call, so it must be deterministic and free of
//! side effects.

use super::id::StateId;

/// Pure predicate that decides whether a transition may fire.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::{StartCondition, StateId};
///
/// struct Vault {
///     balance: u64,
/// }
///
/// let funded = StartCondition::new(|vault: &Vault, _to: &StateId| vault.balance >= 100);
/// let active = StateId::from_name("Active");
///
/// assert!(!funded.check(&Vault { balance: 0 }, &active));
/// assert!(funded.check(&Vault { balance: 150 }, &active));
/// ```
pub struct StartCondition<Env> {
    predicate: Box<dyn Fn(&Env, &StateId) -> bool + Send + Sync>,
}

impl<Env> StartCondition<Env> {
    /// Create a condition from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Env, &StateId) -> bool + Send + Sync + 'static,
    {
        StartCondition {
            predicate: Box::new(predicate),
        }
    }

    /// Condition that is always satisfied.
    pub fn always() -> Self
    where
        Env: 'static,
    {
        Self::new(|_, _| true)
    }

    /// Evaluate the condition for the candidate destination `to`.
    pub fn check(&self, env: &Env, to: &StateId) -> bool {
        (self.predicate)(env, to)
    }
}

impl<Env> std::fmt::Debug for StartCondition<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StartCondition")
    }
}
