//! Builder for constructing state machines.

use crate::audit::audit;
use crate::builder::error::BuildError;
use crate::builder::transition::{TransitionBuilder, TransitionSpec};
use crate::config::MachineConfig;
use crate::core::{Selector, StateId};
use crate::engine::{StateMachine, TransitionSink};
use stillwater::validation::Validation;

/// Builder for constructing state machines with a fluent API.
///
/// `build` replays the declarations through the machine's setup
/// operations in the order they were given.
pub struct MachineBuilder<Env> {
    config: MachineConfig,
    sink: Option<Box<dyn TransitionSink>>,
    initial: Option<StateId>,
    transitions: Vec<TransitionSpec<Env>>,
    permissions: Vec<(StateId, Selector)>,
    strict: bool,
}

impl<Env> MachineBuilder<Env> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            sink: None,
            initial: None,
            transitions: Vec::new(),
            permissions: Vec::new(),
            strict: false,
        }
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sink<S: TransitionSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<Env>) -> Result<Self, BuildError> {
        let spec = builder.build()?;
        self.transitions.push(spec);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, spec: TransitionSpec<Env>) -> Self {
        self.transitions.push(spec);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, specs: Vec<TransitionSpec<Env>>) -> Self {
        self.transitions.extend(specs);
        self
    }

    /// Permit `selector` in `state`.
    pub fn allow(mut self, state: StateId, selector: Selector) -> Self {
        self.permissions.push((state, selector));
        self
    }

    /// Reject setups the audit finds issues with.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the state machine, still in its setup phase.
    pub fn build(self) -> Result<StateMachine<Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = StateMachine::new(self.config);
        if let Some(sink) = self.sink {
            machine.sink = sink;
        }
        machine.set_initial_state(initial)?;

        for spec in self.transitions {
            machine.create_transition(spec.from, spec.to)?;
            for condition in spec.conditions {
                machine.push_start_condition(spec.from, spec.to, condition)?;
            }
            for effect in spec.effects {
                machine.push_transition_effect(spec.from, spec.to, effect)?;
            }
        }

        for (state, selector) in self.permissions {
            machine.allow_function(state, selector)?;
        }

        if self.strict {
            if let Validation::Failure(issues) = audit(&machine) {
                return Err(BuildError::Audit(issues.iter().cloned().collect()));
            }
        }

        Ok(machine)
    }
}

impl<Env> Default for MachineBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}
