//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures the committed, serializable part of a machine:
//! current state, setup latch, ordering marker and history. Start
//! conditions and effects are host code and are NOT captured; a host
//! resumes by rebuilding the same graph and applying the checkpoint while
//! the rebuilt machine is still in its setup phase.

use crate::core::{StateHistory, StateId};
use crate::engine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a machine's committed state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Digest of the graph the checkpoint belongs to
    pub graph_digest: String,

    /// Current state of the machine
    pub current_state: StateId,

    /// Whether the setup phase had closed
    pub immutable: bool,

    /// Ordering marker of the last committed transition
    pub sequence: u64,

    /// Retained transition history
    pub history: StateHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Checkpoint = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.current_state.is_zero() {
            return Err(CheckpointError::ValidationFailed(
                "checkpoint of an uninitialized machine".to_string(),
            ));
        }
        if self.sequence > 0 && !self.immutable {
            return Err(CheckpointError::ValidationFailed(
                "committed transitions without a closed setup phase".to_string(),
            ));
        }
        if let Some(last) = self.history.last() {
            if last.to != self.current_state || last.sequence != self.sequence {
                return Err(CheckpointError::ValidationFailed(
                    "history does not end at the current state".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl<Env> StateMachine<Env> {
    /// Capture the machine's committed state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            graph_digest: self.graph_digest(),
            current_state: self.current,
            immutable: self.immutable,
            sequence: self.sequence,
            history: self.history.clone(),
        }
    }

    /// Restore committed state from `checkpoint`.
    ///
    /// Only legal while the machine is still in its setup phase, and only
    /// onto a machine whose graph digest matches the checkpoint's. Replaces
    /// any initial state set during setup.
    pub fn resume(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.validate()?;
        if self.immutable {
            return Err(CheckpointError::ValidationFailed(
                "cannot resume onto an immutable machine".to_string(),
            ));
        }
        let found = self.graph_digest();
        if found != checkpoint.graph_digest {
            return Err(CheckpointError::GraphMismatch {
                expected: checkpoint.graph_digest.clone(),
                found,
            });
        }

        self.current = checkpoint.current_state;
        self.immutable = checkpoint.immutable;
        self.sequence = checkpoint.sequence;
        self.history = StateHistory::with_capacity_limit(self.config.history_limit);
        for transition in checkpoint.history.transitions() {
            self.history.record(transition.clone());
        }
        tracing::debug!(
            checkpoint = %checkpoint.id,
            state = %self.current,
            sequence = self.sequence,
            "machine resumed from checkpoint"
        );
        Ok(())
    }
}
