//! Core identifiers and pure building blocks.
//!
//! This module contains everything that carries no machine state:
//! - The identifier scheme (`StateId`, `TransitionId`, `Selector`)
//! - The `State` naming trait for host enums
//! - Start-condition predicates
//! - Committed transition history

mod condition;
mod history;
mod id;
mod state;

pub use condition::StartCondition;
pub use history::{StateHistory, StateTransition};
pub use id::{transition_id, Selector, StateId, TransitionId};
pub use state::State;
