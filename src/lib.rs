//! Gatekeep: an embeddable finite state machine for gating entry points.
//!
//! A host declares a graph of states, transitions guarded by start
//! conditions, ordered effects per transition, and per-state whitelists of
//! entry points. Before any gated entry point runs, the machine settles into
//! the furthest state reachable under currently-true conditions and then
//! checks that the entry point is permitted there.
//!
//! # Core Concepts
//!
//! - **StateId**: opaque 32-byte state identifier; the zero id is reserved
//! - **Transition**: an edge identified by the hash of its ordered endpoints,
//!   with ordered start conditions and ordered effects
//! - **Settle**: fire the first triggered candidate, rescan, repeat
//! - **Guard**: settle, then require the selector to be permitted
//! - **Setup phase**: the graph can only be changed until the first
//!   transition commits
//!
//! # Example
//!
//! ```rust
//! use gatekeep::builder::{MachineBuilder, TransitionBuilder};
//! use gatekeep::core::{Selector, StateId};
//! use gatekeep::MachineError;
//!
//! #[derive(Clone, Default)]
//! struct Escrow {
//!     balance: u64,
//!     now: u64,
//!     deadline: u64,
//! }
//!
//! let init = StateId::from_name("Init");
//! let active = StateId::from_name("Active");
//! let closed = StateId::from_name("Closed");
//! let withdraw = Selector::from_signature("withdraw()");
//!
//! let mut machine = MachineBuilder::<Escrow>::new()
//!     .initial(init)
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(init)
//!             .to(active)
//!             .when(|e: &Escrow, _| e.balance >= 100),
//!     )?
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(active)
//!             .to(closed)
//!             .when(|e: &Escrow, _| e.now > e.deadline),
//!     )?
//!     .allow(closed, withdraw)
//!     .build()?;
//!
//! let mut escrow = Escrow { deadline: 10, ..Escrow::default() };
//! assert!(matches!(
//!     machine.guard(&mut escrow, withdraw),
//!     Err(MachineError::NotPermitted { .. })
//! ));
//!
//! escrow.balance = 150;
//! escrow.now = 11;
//! assert_eq!(machine.guard(&mut escrow, withdraw)?, closed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use config::MachineConfig;
pub use self::core::{transition_id, Selector, StateId, StateTransition, TransitionId};
pub use engine::{EffectError, MachineError, StateMachine, TransitionSink};
