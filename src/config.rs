//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`StateMachine`](crate::engine::StateMachine).
///
/// Deserializable so hosts can embed it in their own configuration files;
/// omitted fields take their defaults.
///
/// # Example
///
/// ```rust
/// use gatekeep::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "max_cascade_steps": 16 }"#).unwrap();
/// assert_eq!(config.max_cascade_steps, Some(16));
/// assert_eq!(config.history_limit, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Upper bound on transitions fired by one call. `None` lets a cascade
    /// run until it settles.
    pub max_cascade_steps: Option<usize>,

    /// Maximum number of committed transitions kept in history.
    /// `None` keeps all of them.
    pub history_limit: Option<usize>,
}

impl MachineConfig {
    pub fn with_max_cascade_steps(mut self, limit: usize) -> Self {
        self.max_cascade_steps = Some(limit);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let config = MachineConfig::default();
        assert_eq!(config.max_cascade_steps, None);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: MachineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn builder_methods_set_limits() {
        let config = MachineConfig::default()
            .with_max_cascade_steps(8)
            .with_history_limit(100);

        assert_eq!(config.max_cascade_steps, Some(8));
        assert_eq!(config.history_limit, Some(100));
    }
}
