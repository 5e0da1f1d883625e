//! Setup audit for state machine graphs.
//!
//! The engine accepts any graph the setup operations can express. This
//! module points out setups that are legal but probably unintended, using
//! Stillwater's `Validation` to report every issue in one pass.
//!
//! # Example
//!
//! ```rust
//! use gatekeep::audit::{audit, SetupIssue};
//! use gatekeep::core::StateId;
//! use gatekeep::StateMachine;
//! use stillwater::validation::Validation;
//!
//! let mut machine = StateMachine::<()>::default();
//! machine.create_transition(StateId::from_name("A"), StateId::from_name("B")).unwrap();
//!
//! match audit(&machine) {
//!     Validation::Failure(issues) => {
//!         assert!(issues.iter().any(|i| matches!(i, SetupIssue::MissingInitialState)));
//!     }
//!     Validation::Success(_) => panic!("expected issues"),
//! }
//! ```

pub mod issues;
pub mod rules;

pub use issues::SetupIssue;
pub use rules::{audit, reachable_states};
