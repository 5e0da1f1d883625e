//! Transition records: start conditions and effects per registered edge.

use crate::core::{StartCondition, StateId};
use crate::engine::error::EffectError;

/// Side-effecting action run when a transition fires.
///
/// Effects receive the host environment mutably. Returning an error aborts
/// the whole call; the environment is restored to its pre-call value.
pub struct TransitionEffect<Env> {
    action: Box<dyn Fn(&mut Env) -> Result<(), EffectError> + Send + Sync>,
}

impl<Env> TransitionEffect<Env> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut Env) -> Result<(), EffectError> + Send + Sync + 'static,
    {
        TransitionEffect {
            action: Box::new(action),
        }
    }

    pub fn run(&self, env: &mut Env) -> Result<(), EffectError> {
        (self.action)(env)
    }
}

impl<Env> std::fmt::Debug for TransitionEffect<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TransitionEffect")
    }
}

/// Stored data for a registered transition.
///
/// Conditions and effects are append-only and keep registration order.
pub struct TransitionRecord<Env> {
    pub(crate) exists: bool,
    pub(crate) conditions: Vec<StartCondition<Env>>,
    pub(crate) effects: Vec<TransitionEffect<Env>>,
}

impl<Env> TransitionRecord<Env> {
    pub(crate) fn registered() -> Self {
        Self {
            exists: true,
            conditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// True if any start condition holds for `to`, scanning in registration
    /// order and stopping at the first satisfied one.
    pub fn is_triggered(&self, env: &Env, to: &StateId) -> bool {
        self.conditions.iter().any(|c| c.check(env, to))
    }

    /// Run every effect in registration order, stopping at the first
    /// failure. Returns the index of the failing effect with its error.
    pub(crate) fn run_effects(&self, env: &mut Env) -> Result<(), (usize, EffectError)> {
        for (index, effect) in self.effects.iter().enumerate() {
            effect.run(env).map_err(|e| (index, e))?;
        }
        Ok(())
    }
}
