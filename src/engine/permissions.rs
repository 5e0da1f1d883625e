//! Per-state whitelist of callable entry points.

use crate::core::{Selector, StateId};
use std::collections::{BTreeSet, HashMap};

/// Mapping from `(state, selector)` to "permitted". Absence means denied.
#[derive(Clone, Debug, Default)]
pub struct PermissionTable {
    allowed: HashMap<StateId, BTreeSet<Selector>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit `selector` in `state`. Returns false if it was already permitted.
    pub fn allow(&mut self, state: StateId, selector: Selector) -> bool {
        self.allowed.entry(state).or_default().insert(selector)
    }

    pub fn is_allowed(&self, state: &StateId, selector: &Selector) -> bool {
        self.allowed
            .get(state)
            .is_some_and(|selectors| selectors.contains(selector))
    }

    /// Selectors permitted in `state`, in ascending byte order.
    pub fn selectors(&self, state: &StateId) -> impl Iterator<Item = &Selector> {
        self.allowed.get(state).into_iter().flatten()
    }

    /// States that have at least one permitted selector.
    pub fn states(&self) -> impl Iterator<Item = &StateId> {
        self.allowed.keys()
    }
}
