//! Identifier scheme for states, transitions and entry-point selectors.
//!
//! All identifiers are fixed-width binary values. Transition identities are
//! derived from the ordered `(from, to)` pair with SHA-256, so `(A, B)` and
//! `(B, A)` map to different transitions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::engine::MachineError;

fn digest32(hasher: Sha256) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// Opaque 32-byte state identifier.
///
/// The all-zero value is reserved: it marks an uninitialized machine and is
/// never a valid state.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::StateId;
///
/// let active = StateId::from_name("Active");
/// assert_eq!(active, StateId::from_name("Active"));
/// assert!(!active.is_zero());
/// assert!(StateId::ZERO.is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId([u8; 32]);

impl StateId {
    /// The reserved "no state" identifier.
    pub const ZERO: StateId = StateId([0u8; 32]);

    /// Wrap raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        StateId(bytes)
    }

    /// Derive a state id from a human readable name (SHA-256 of the name).
    pub fn from_name(name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        StateId(digest32(hasher))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateId(")?;
        write_hex(f, &self.0[..4])?;
        f.write_str("..)")
    }
}

/// Identity of a directed transition between two states.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId([u8; 32]);

impl TransitionId {
    /// Hash the ordered pair without validating it.
    pub(crate) fn between(from: &StateId, to: &StateId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(from.as_bytes());
        hasher.update(to.as_bytes());
        TransitionId(digest32(hasher))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransitionId(")?;
        write_hex(f, &self.0[..4])?;
        f.write_str("..)")
    }
}

/// Derive the transition identity for the ordered pair `(from, to)`.
///
/// Pure and deterministic. Fails with [`MachineError::InvalidArgument`] if
/// either endpoint is the zero state.
///
/// # Example
///
/// ```rust
/// use gatekeep::core::{transition_id, StateId};
///
/// let a = StateId::from_name("A");
/// let b = StateId::from_name("B");
///
/// assert_eq!(transition_id(a, b).unwrap(), transition_id(a, b).unwrap());
/// assert_ne!(transition_id(a, b).unwrap(), transition_id(b, a).unwrap());
/// assert!(transition_id(StateId::ZERO, b).is_err());
/// ```
pub fn transition_id(from: StateId, to: StateId) -> Result<TransitionId, MachineError> {
    if from.is_zero() || to.is_zero() {
        return Err(MachineError::InvalidArgument {
            reason: "transition endpoints must be non-zero states",
        });
    }
    Ok(TransitionId::between(&from, &to))
}

/// Four-byte entry-point selector used by the permission table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }

    /// First four bytes of the SHA-256 of a function signature.
    ///
    /// ```rust
    /// use gatekeep::core::Selector;
    ///
    /// let withdraw = Selector::from_signature("withdraw(uint256)");
    /// assert_eq!(withdraw, Selector::from_signature("withdraw(uint256)"));
    /// assert_ne!(withdraw, Selector::from_signature("deposit(uint256)"));
    /// ```
    pub fn from_signature(signature: &str) -> Self {
        let digest = Sha256::digest(signature.as_bytes());
        Selector([digest[0], digest[1], digest[2], digest[3]])
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_stable() {
        assert_eq!(StateId::from_name("Init"), StateId::from_name("Init"));
        assert_ne!(StateId::from_name("Init"), StateId::from_name("Active"));
    }

    #[test]
    fn zero_is_reserved() {
        assert!(StateId::ZERO.is_zero());
        assert!(!StateId::from_bytes([1u8; 32]).is_zero());
    }

    #[test]
    fn transition_id_is_ordered() {
        let a = StateId::from_name("A");
        let b = StateId::from_name("B");

        let ab = transition_id(a, b).unwrap();
        let ba = transition_id(b, a).unwrap();

        assert_ne!(ab, ba);
        assert_eq!(ab, transition_id(a, b).unwrap());
    }

    #[test]
    fn self_loop_has_an_id() {
        let a = StateId::from_name("A");
        assert!(transition_id(a, a).is_ok());
    }

    #[test]
    fn transition_id_rejects_zero_endpoints() {
        let a = StateId::from_name("A");

        assert!(matches!(
            transition_id(StateId::ZERO, a),
            Err(MachineError::InvalidArgument { .. })
        ));
        assert!(matches!(
            transition_id(a, StateId::ZERO),
            Err(MachineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let id = StateId::from_bytes([0xab; 32]);
        assert_eq!(id.to_string(), "ab".repeat(32));
        assert_eq!(Selector::new([0xde, 0xad, 0xbe, 0xef]).to_string(), "0xdeadbeef");
    }

    #[test]
    fn state_id_serializes_correctly() {
        let id = StateId::from_name("Closed");
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
