//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Setup phase**: the graph, the permission table and the initial state
//!   can be changed until the first transition commits (or `lock` is called)
//! - **Transitions**: registered edges carrying ordered start conditions and
//!   ordered effects
//! - **Settle**: fire automatic transitions until none is triggered
//! - **Guard**: settle, then check the entry point against the settled state
//!
//! Calls are all-or-nothing: state, sequence, history, notifications and the
//! host environment are only updated when the whole call succeeds.

mod cascade;
mod error;
mod machine;
mod permissions;
mod sink;
mod transition;

pub use error::{EffectError, MachineError};
pub use machine::StateMachine;
pub use permissions::PermissionTable;
pub use sink::{ChannelSink, NoopSink, TransitionSink};
pub use transition::{TransitionEffect, TransitionRecord};
