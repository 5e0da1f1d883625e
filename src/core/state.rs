//! Naming trait for host-defined state enums.
//!
//! The engine itself only knows opaque [`StateId`] values. Hosts usually
//! describe their states as an enum; implementing `State` gives each variant
//! a stable id derived from its name.

use super::id::StateId;
use std::fmt::Debug;

/// Trait for host state types.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::{State, StateId};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Escrow {
///     Funding,
///     Released,
/// }
///
/// impl State for Escrow {
///     fn name(&self) -> &str {
///         match self {
///             Self::Funding => "Funding",
///             Self::Released => "Released",
///         }
///     }
/// }
///
/// assert_eq!(Escrow::Funding.state_id(), StateId::from_name("Funding"));
/// ```
pub trait State: Clone + PartialEq + Debug {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Identifier the engine uses for this state.
    ///
    /// Default implementation hashes [`State::name`].
    fn state_id(&self) -> StateId {
        StateId::from_name(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Active,
        Closed,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Active => "Active",
                Self::Closed => "Closed",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Active.name(), "Active");
        assert_eq!(TestState::Closed.name(), "Closed");
    }

    #[test]
    fn state_ids_are_distinct_per_variant() {
        let ids = [
            TestState::Initial.state_id(),
            TestState::Active.state_id(),
            TestState::Closed.state_id(),
        ];

        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
        assert!(ids.iter().all(|id| !id.is_zero()));
    }

    #[test]
    fn state_id_matches_name_hash() {
        assert_eq!(TestState::Active.state_id(), StateId::from_name("Active"));
    }
}
