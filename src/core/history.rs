//! Committed transition history.
//!
//! Every transition the machine commits is recorded here with its ordering
//! marker and wall-clock time. The same record is handed to notification
//! sinks.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed state transition.
///
/// `sequence` is the machine's monotonically increasing ordering marker;
/// the first committed transition carries `1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// Ordering marker for external observers
    pub sequence: u64,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// An optional capacity bounds memory use; the oldest entries are dropped
/// first.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::{StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// let init = StateId::from_name("Init");
/// let active = StateId::from_name("Active");
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: init,
///     to: active,
///     sequence: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&init, &active]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default)]
    capacity: Option<usize>,
}

impl StateHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `capacity` entries.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity,
        }
    }

    /// Append a committed transition.
    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(cap) = self.capacity {
            while self.transitions.len() > cap {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the first and last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterate retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }
}
