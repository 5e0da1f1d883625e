//! Transition executor, cascade resolver and entry gate.
//!
//! Every call that can fire transitions works on a staged copy of the
//! machine's mutable fields and, once an effect needs it, a clone of the
//! host environment. Nothing is written back unless the whole call
//! succeeds, so a failing effect or a refused entry point leaves both the
//! machine and the environment untouched.

use crate::core::{transition_id, Selector, StateId, StateTransition, TransitionId};
use crate::engine::error::MachineError;
use crate::engine::machine::StateMachine;
use chrono::Utc;

/// Uncommitted result of a call.
struct Staged<Env> {
    current: StateId,
    sequence: u64,
    fired: Vec<StateTransition>,
    env: Option<Env>,
}

impl<Env: Clone> StateMachine<Env> {
    fn stage(&self) -> Staged<Env> {
        Staged {
            current: self.current,
            sequence: self.sequence,
            fired: Vec::new(),
            env: None,
        }
    }

    /// First candidate of `from`, in registration order, with a satisfied
    /// start condition.
    fn find_triggered(&self, from: StateId, env: &Env) -> Option<StateId> {
        self.outgoing(&from).iter().copied().find(|to| {
            self.transitions
                .get(&TransitionId::between(&from, to))
                .is_some_and(|record| record.exists && record.is_triggered(env, to))
        })
    }

    fn fire(&self, staged: &mut Staged<Env>, base: &Env, next: StateId) -> Result<(), MachineError> {
        let from = staged.current;
        let id = transition_id(from, next)?;
        let record = self
            .transitions
            .get(&id)
            .filter(|record| record.exists)
            .ok_or(MachineError::TransitionNotFound { from, to: next })?;

        let scratch = staged.env.get_or_insert_with(|| base.clone());
        record
            .run_effects(scratch)
            .map_err(|(index, source)| MachineError::EffectFailed {
                from,
                to: next,
                index,
                source,
            })?;

        staged.sequence += 1;
        staged.fired.push(StateTransition {
            from,
            to: next,
            sequence: staged.sequence,
            timestamp: Utc::now(),
        });
        staged.current = next;
        Ok(())
    }

    fn resolve(&self, base: &Env) -> Result<Staged<Env>, MachineError> {
        let mut staged = self.stage();
        loop {
            let view = staged.env.as_ref().unwrap_or(base);
            let Some(next) = self.find_triggered(staged.current, view) else {
                break;
            };
            if let Some(limit) = self.config.max_cascade_steps {
                if staged.fired.len() >= limit {
                    return Err(MachineError::CascadeLimitExceeded { limit });
                }
            }
            self.fire(&mut staged, base, next)?;
        }
        Ok(staged)
    }

    fn commit(&mut self, env: &mut Env, staged: Staged<Env>) {
        if let Some(scratch) = staged.env {
            *env = scratch;
        }
        self.current = staged.current;
        self.sequence = staged.sequence;

        if !staged.fired.is_empty() && !self.immutable {
            self.immutable = true;
            tracing::debug!("setup phase closed by first transition");
        }

        for transition in staged.fired {
            tracing::info!(
                from = %transition.from,
                to = %transition.to,
                sequence = transition.sequence,
                "transition committed"
            );
            self.sink.notify(&transition);
            self.history.record(transition);
        }
    }

    /// Move from the current state to `next`, running the transition's
    /// effects in registration order.
    ///
    /// The first successful call closes the setup phase.
    pub fn execute_transition(&mut self, env: &mut Env, next: StateId) -> Result<(), MachineError> {
        let mut staged = self.stage();
        self.fire(&mut staged, env, next)?;
        self.commit(env, staged);
        Ok(())
    }

    /// Fire automatic transitions until none is triggered.
    ///
    /// Each pass scans the current state's candidates in registration order
    /// and fires the first one with a satisfied start condition, then
    /// rescans from the new state. Returns the settled state.
    ///
    /// A cycle whose conditions stay true never settles unless
    /// [`MachineConfig::max_cascade_steps`](crate::MachineConfig) is set.
    pub fn settle(&mut self, env: &mut Env) -> Result<StateId, MachineError> {
        let staged = self.resolve(env)?;
        let settled = staged.current;
        tracing::debug!(state = %settled, fired = staged.fired.len(), "machine settled");
        self.commit(env, staged);
        Ok(settled)
    }

    /// Resolve the cascade and check `selector` against the settled state
    /// without committing anything.
    fn admit(&self, env: &Env, selector: Selector) -> Result<Staged<Env>, MachineError> {
        let staged = self.resolve(env)?;
        if !self.permissions.is_allowed(&staged.current, &selector) {
            tracing::warn!(state = %staged.current, selector = %selector, "entry point refused");
            return Err(MachineError::NotPermitted {
                state: staged.current,
                selector,
            });
        }
        Ok(staged)
    }

    /// Settle, then require `selector` to be permitted in the settled state.
    ///
    /// A refused call does not commit the cascade it computed.
    pub fn guard(&mut self, env: &mut Env, selector: Selector) -> Result<StateId, MachineError> {
        let staged = self.admit(env, selector)?;
        let settled = staged.current;
        self.commit(env, staged);
        Ok(settled)
    }

    /// Run `body` behind [`guard`](Self::guard).
    ///
    /// The body receives the environment and the settled state.
    pub fn guarded<R, F>(&mut self, env: &mut Env, selector: Selector, body: F) -> Result<R, MachineError>
    where
        F: FnOnce(&mut Env, StateId) -> R,
    {
        let state = self.guard(env, selector)?;
        Ok(body(env, state))
    }

    /// Fallible variant of [`guarded`](Self::guarded).
    ///
    /// The body runs against the staged environment. The cascade and the
    /// body's changes are committed together, and only if the body returns
    /// `Ok`.
    pub fn try_guarded<R, E, F>(&mut self, env: &mut Env, selector: Selector, body: F) -> Result<R, E>
    where
        E: From<MachineError>,
        F: FnOnce(&mut Env, StateId) -> Result<R, E>,
    {
        let mut staged = self.admit(env, selector)?;
        let settled = staged.current;
        let mut scratch = match staged.env.take() {
            Some(scratch) => scratch,
            None => env.clone(),
        };
        let value = body(&mut scratch, settled)?;
        staged.env = Some(scratch);
        self.commit(env, staged);
        Ok(value)
    }
}
