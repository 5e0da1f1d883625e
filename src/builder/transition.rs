//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{StartCondition, StateId};
use crate::engine::{EffectError, TransitionEffect};

/// A fully declared transition, ready to be registered on a machine.
pub struct TransitionSpec<Env> {
    pub from: StateId,
    pub to: StateId,
    pub conditions: Vec<StartCondition<Env>>,
    pub effects: Vec<TransitionEffect<Env>>,
}

/// Builder for constructing transitions with a fluent API.
///
/// Conditions and effects keep the order in which they are added.
pub struct TransitionBuilder<Env> {
    from: Option<StateId>,
    to: Option<StateId>,
    conditions: Vec<StartCondition<Env>>,
    effects: Vec<TransitionEffect<Env>>,
}

impl<Env> TransitionBuilder<Env> {
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            conditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: StateId) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: StateId) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a start condition using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Env, &StateId) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(StartCondition::new(predicate));
        self
    }

    /// Add a prebuilt start condition.
    pub fn condition(mut self, condition: StartCondition<Env>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Fire whenever the source state is current.
    pub fn always(self) -> Self
    where
        Env: 'static,
    {
        self.condition(StartCondition::always())
    }

    /// Add an effect using a closure.
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut Env) -> Result<(), EffectError> + Send + Sync + 'static,
    {
        self.effects.push(TransitionEffect::new(effect));
        self
    }

    /// Build the transition declaration.
    pub fn build(self) -> Result<TransitionSpec<Env>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionSpec {
            from,
            to,
            conditions: self.conditions,
            effects: self.effects,
        })
    }
}

impl<Env> Default for TransitionBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}
