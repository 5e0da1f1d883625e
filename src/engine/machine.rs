//! The state machine: graph store, permission table and setup gate.
//!
//! Setup operations live here. Operations that fire transitions are in
//! `cascade.rs`.

use crate::config::MachineConfig;
use crate::core::{
    transition_id, Selector, StartCondition, StateHistory, StateId, TransitionId,
};
use crate::engine::error::{EffectError, MachineError};
use crate::engine::permissions::PermissionTable;
use crate::engine::sink::{NoopSink, TransitionSink};
use crate::engine::transition::{TransitionEffect, TransitionRecord};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Finite state machine gating host entry points.
///
/// `Env` is the host environment that start conditions read and transition
/// effects mutate.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::{Selector, StateId};
/// use gatekeep::{MachineConfig, StateMachine};
///
/// #[derive(Clone, Default)]
/// struct Vault {
///     balance: u64,
/// }
///
/// let init = StateId::from_name("Init");
/// let active = StateId::from_name("Active");
/// let withdraw = Selector::from_signature("withdraw()");
///
/// let mut machine = StateMachine::<Vault>::new(MachineConfig::default());
/// machine.set_initial_state(init).unwrap();
/// machine.create_transition(init, active).unwrap();
/// machine
///     .add_start_condition(init, active, |v: &Vault, _: &StateId| v.balance >= 100)
///     .unwrap();
/// machine.allow_function(active, withdraw).unwrap();
///
/// let mut vault = Vault::default();
/// assert!(machine.guard(&mut vault, withdraw).is_err());
///
/// vault.balance = 150;
/// assert_eq!(machine.guard(&mut vault, withdraw).unwrap(), active);
/// assert!(machine.is_immutable());
/// ```
pub struct StateMachine<Env> {
    pub(crate) config: MachineConfig,
    pub(crate) current: StateId,
    pub(crate) immutable: bool,
    pub(crate) sequence: u64,
    pub(crate) outgoing: HashMap<StateId, Vec<StateId>>,
    pub(crate) transitions: HashMap<TransitionId, TransitionRecord<Env>>,
    pub(crate) permissions: PermissionTable,
    pub(crate) history: StateHistory,
    pub(crate) sink: Box<dyn TransitionSink>,
}

impl<Env> StateMachine<Env> {
    /// Create an uninitialized machine in its setup phase.
    pub fn new(config: MachineConfig) -> Self {
        let history = StateHistory::with_capacity_limit(config.history_limit);
        Self {
            config,
            current: StateId::ZERO,
            immutable: false,
            sequence: 0,
            outgoing: HashMap::new(),
            transitions: HashMap::new(),
            permissions: PermissionTable::new(),
            history,
            sink: Box::new(NoopSink),
        }
    }

    /// Replace the notification sink.
    pub fn with_sink<S: TransitionSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    fn ensure_mutable(&self) -> Result<(), MachineError> {
        if self.immutable {
            return Err(MachineError::AlreadyImmutable);
        }
        Ok(())
    }

    fn record_mut(
        &mut self,
        from: StateId,
        to: StateId,
    ) -> Result<&mut TransitionRecord<Env>, MachineError> {
        let id = transition_id(from, to)?;
        self.transitions
            .get_mut(&id)
            .filter(|record| record.exists)
            .ok_or(MachineError::TransitionNotFound { from, to })
    }

    /// Set the state the machine starts in. Allowed once.
    pub fn set_initial_state(&mut self, state: StateId) -> Result<(), MachineError> {
        self.ensure_mutable()?;
        if state.is_zero() {
            return Err(MachineError::InvalidArgument {
                reason: "initial state must be non-zero",
            });
        }
        if !self.current.is_zero() {
            return Err(MachineError::AlreadyInitialized {
                current: self.current,
            });
        }
        self.current = state;
        tracing::debug!(state = %state, "initial state set");
        Ok(())
    }

    /// Register the transition `from -> to` and append `to` to the
    /// candidate list of `from`.
    ///
    /// Registering the same pair twice appends `to` twice; the cascade
    /// resolver tolerates the duplicate.
    pub fn create_transition(
        &mut self,
        from: StateId,
        to: StateId,
    ) -> Result<TransitionId, MachineError> {
        self.ensure_mutable()?;
        let id = transition_id(from, to)?;
        self.outgoing.entry(from).or_default().push(to);
        self.transitions
            .entry(id)
            .or_insert_with(TransitionRecord::registered);
        tracing::debug!(from = %from, to = %to, transition = %id, "transition created");
        Ok(id)
    }

    /// Append a start condition to an existing transition.
    pub fn add_start_condition<F>(
        &mut self,
        from: StateId,
        to: StateId,
        condition: F,
    ) -> Result<(), MachineError>
    where
        F: Fn(&Env, &StateId) -> bool + Send + Sync + 'static,
    {
        self.push_start_condition(from, to, StartCondition::new(condition))
    }

    /// Append an already-wrapped start condition.
    pub fn push_start_condition(
        &mut self,
        from: StateId,
        to: StateId,
        condition: StartCondition<Env>,
    ) -> Result<(), MachineError> {
        self.ensure_mutable()?;
        self.record_mut(from, to)?.conditions.push(condition);
        Ok(())
    }

    /// Append an effect to an existing transition.
    pub fn add_transition_effect<F>(
        &mut self,
        from: StateId,
        to: StateId,
        effect: F,
    ) -> Result<(), MachineError>
    where
        F: Fn(&mut Env) -> Result<(), EffectError> + Send + Sync + 'static,
    {
        self.push_transition_effect(from, to, TransitionEffect::new(effect))
    }

    /// Append an already-wrapped effect.
    pub fn push_transition_effect(
        &mut self,
        from: StateId,
        to: StateId,
        effect: TransitionEffect<Env>,
    ) -> Result<(), MachineError> {
        self.ensure_mutable()?;
        self.record_mut(from, to)?.effects.push(effect);
        Ok(())
    }

    /// Permit the entry point `selector` while the machine is in `state`.
    pub fn allow_function(&mut self, state: StateId, selector: Selector) -> Result<(), MachineError> {
        self.ensure_mutable()?;
        if state.is_zero() {
            return Err(MachineError::InvalidArgument {
                reason: "permissions must name a non-zero state",
            });
        }
        self.permissions.allow(state, selector);
        tracing::debug!(state = %state, selector = %selector, "function allowed");
        Ok(())
    }

    /// Close the setup phase without firing a transition.
    ///
    /// The initial state must already be set.
    pub fn lock(&mut self) -> Result<(), MachineError> {
        self.ensure_mutable()?;
        if self.current.is_zero() {
            return Err(MachineError::InvalidArgument {
                reason: "cannot lock a machine without an initial state",
            });
        }
        self.immutable = true;
        tracing::debug!("machine locked");
        Ok(())
    }

    /// Current state. [`StateId::ZERO`] until initialized.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Ordering marker of the last committed transition (0 if none).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Candidate destinations of `state` in registration order.
    pub fn outgoing(&self, state: &StateId) -> &[StateId] {
        self.outgoing.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn transition_exists(&self, from: StateId, to: StateId) -> bool {
        transition_id(from, to)
            .ok()
            .and_then(|id| self.transitions.get(&id))
            .is_some_and(|record| record.exists)
    }

    /// Registered data for `from -> to`, if any.
    pub fn transition(&self, from: StateId, to: StateId) -> Option<&TransitionRecord<Env>> {
        let id = transition_id(from, to).ok()?;
        self.transitions.get(&id)
    }

    pub fn is_allowed(&self, state: &StateId, selector: &Selector) -> bool {
        self.permissions.is_allowed(state, selector)
    }

    pub fn permitted_selectors(&self, state: &StateId) -> Vec<Selector> {
        self.permissions.selectors(state).copied().collect()
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    /// Source states with at least one registered edge, in ascending order.
    pub fn source_states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = self.outgoing.keys().copied().collect();
        states.sort();
        states
    }

    /// Deterministic digest of the registered graph shape.
    ///
    /// Covers edge lists (in order), condition and effect counts per
    /// transition, and the permission table. Capabilities themselves are
    /// opaque and not covered.
    pub fn graph_digest(&self) -> String {
        let mut hasher = Sha256::new();

        for from in self.source_states() {
            hasher.update(b"E");
            hasher.update(from.as_bytes());
            for to in self.outgoing(&from) {
                hasher.update(to.as_bytes());
                let (conditions, effects) = self
                    .transition(from, *to)
                    .map(|r| (r.condition_count(), r.effect_count()))
                    .unwrap_or((0, 0));
                hasher.update((conditions as u64).to_be_bytes());
                hasher.update((effects as u64).to_be_bytes());
            }
        }

        let mut states: Vec<&StateId> = self.permissions.states().collect();
        states.sort();
        for state in states {
            hasher.update(b"P");
            hasher.update(state.as_bytes());
            for selector in self.permissions.selectors(state) {
                hasher.update(selector.as_bytes());
            }
        }

        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

impl<Env> Default for StateMachine<Env> {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
