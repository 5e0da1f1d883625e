//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for declaring a
//! machine's graph and permissions in one expression.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::{TransitionBuilder, TransitionSpec};

use crate::core::StateId;

/// Create a transition that fires whenever `from` is current.
///
/// # Example
///
/// ```
/// use gatekeep::builder::simple_transition;
/// use gatekeep::core::StateId;
///
/// let spec = simple_transition::<()>(StateId::from_name("Start"), StateId::from_name("End"));
/// assert_eq!(spec.conditions.len(), 1);
/// ```
pub fn simple_transition<Env: 'static>(from: StateId, to: StateId) -> TransitionSpec<Env> {
    guarded_transition(from, to, |_: &Env, _: &StateId| true)
}

/// Create a transition with a single start condition.
///
/// # Example
///
/// ```
/// use gatekeep::builder::guarded_transition;
/// use gatekeep::core::StateId;
///
/// struct Sale {
///     raised: u64,
/// }
///
/// let spec = guarded_transition(
///     StateId::from_name("Funding"),
///     StateId::from_name("Succeeded"),
///     |sale: &Sale, _: &StateId| sale.raised >= 1_000,
/// );
/// assert!(spec.conditions[0].check(&Sale { raised: 1_500 }, &spec.to));
/// ```
pub fn guarded_transition<Env, F>(from: StateId, to: StateId, condition: F) -> TransitionSpec<Env>
where
    F: Fn(&Env, &StateId) -> bool + Send + Sync + 'static,
{
    TransitionSpec {
        from,
        to,
        conditions: vec![crate::core::StartCondition::new(condition)],
        effects: Vec::new(),
    }
}
