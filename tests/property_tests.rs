//! Property-based tests for the identifier scheme and the cascade resolver.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use gatekeep::core::{transition_id, Selector, StateId};
use gatekeep::{MachineError, StateMachine};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_state()(bytes in any::<[u8; 32]>()) -> StateId {
        let mut bytes = bytes;
        bytes[0] |= 1;
        StateId::from_bytes(bytes)
    }
}

prop_compose! {
    /// Edges of an acyclic graph over `n` states: only `i -> j` with `i < j`,
    /// each with a constant condition outcome.
    fn arbitrary_dag()(n in 2usize..7)(
        edges in prop::collection::vec((0..n, 0..n, any::<bool>()), 0..20),
        n in Just(n),
    ) -> (usize, Vec<(usize, usize, bool)>) {
        let edges = edges
            .into_iter()
            .filter(|(i, j, _)| i < j)
            .collect();
        (n, edges)
    }
}

fn node(i: usize) -> StateId {
    StateId::from_name(&format!("S{}", i))
}

proptest! {
    #[test]
    fn transition_id_is_deterministic(a in arbitrary_state(), b in arbitrary_state()) {
        prop_assert_eq!(transition_id(a, b).unwrap(), transition_id(a, b).unwrap());
    }

    #[test]
    fn transition_id_is_ordered(a in arbitrary_state(), b in arbitrary_state()) {
        prop_assume!(a != b);
        prop_assert_ne!(transition_id(a, b).unwrap(), transition_id(b, a).unwrap());
    }

    #[test]
    fn setup_is_locked_after_any_transition(
        a in arbitrary_state(),
        b in arbitrary_state(),
        selector in any::<[u8; 4]>(),
    ) {
        let start = node(0);
        let next = node(1);
        let mut machine = StateMachine::<()>::default();
        machine.set_initial_state(start).unwrap();
        machine.create_transition(start, next).unwrap();
        machine.execute_transition(&mut (), next).unwrap();

        prop_assert_eq!(machine.set_initial_state(a), Err(MachineError::AlreadyImmutable));
        prop_assert_eq!(machine.create_transition(a, b), Err(MachineError::AlreadyImmutable));
        prop_assert_eq!(
            machine.add_start_condition(a, b, |_, _| true),
            Err(MachineError::AlreadyImmutable)
        );
        prop_assert_eq!(
            machine.add_transition_effect(a, b, |_| Ok(())),
            Err(MachineError::AlreadyImmutable)
        );
        prop_assert_eq!(
            machine.allow_function(a, Selector::new(selector)),
            Err(MachineError::AlreadyImmutable)
        );
    }

    #[test]
    fn acyclic_cascade_settles_where_nothing_triggers((n, edges) in arbitrary_dag()) {
        let mut machine = StateMachine::<()>::default();
        machine.set_initial_state(node(0)).unwrap();
        for (i, j, open) in &edges {
            let open = *open;
            machine.create_transition(node(*i), node(*j)).unwrap();
            machine.add_start_condition(node(*i), node(*j), move |_, _| open).unwrap();
        }

        let settled = machine.settle(&mut ()).unwrap();

        prop_assert!((0..n).any(|i| node(i) == settled));
        let still_open = edges
            .iter()
            .any(|(i, _, open)| node(*i) == settled && *open);
        prop_assert!(!still_open);
    }

    #[test]
    fn first_registered_candidate_wins(extra in 1usize..5) {
        let start = node(0);
        let mut machine = StateMachine::<()>::default();
        machine.set_initial_state(start).unwrap();
        for j in 1..=extra + 1 {
            machine.create_transition(start, node(j)).unwrap();
            machine.add_start_condition(start, node(j), |_, _| true).unwrap();
        }

        prop_assert_eq!(machine.settle(&mut ()).unwrap(), node(1));
        prop_assert_eq!(machine.sequence(), 1);
    }
}
