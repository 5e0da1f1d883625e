//! Audit checks over a machine's registered graph.

use crate::audit::issues::SetupIssue;
use crate::core::StateId;
use crate::engine::StateMachine;
use std::collections::{HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<SetupIssue>>;

/// States reachable from `start` over registered edges, `start` included.
pub fn reachable_states<Env>(machine: &StateMachine<Env>, start: StateId) -> HashSet<StateId> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(state) = queue.pop_front() {
        for next in machine.outgoing(&state) {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    seen
}

/// Audit the machine's setup, accumulating ALL issues.
/// Returns Validation::Success(()) if nothing was found.
pub fn audit<Env>(machine: &StateMachine<Env>) -> Validation<(), NonEmptyVec<SetupIssue>> {
    let mut checks: Vec<Check> = Vec::new();
    let current = machine.current_state();

    checks.push(if current.is_zero() {
        Validation::fail(SetupIssue::MissingInitialState)
    } else {
        Validation::success(())
    });

    for from in machine.source_states() {
        let mut seen = HashSet::new();
        for to in machine.outgoing(&from) {
            if !seen.insert(*to) {
                checks.push(Validation::fail(SetupIssue::DuplicateEdge { from, to: *to }));
                continue;
            }
            let inert = machine
                .transition(from, *to)
                .is_some_and(|record| record.condition_count() == 0);
            if inert {
                checks.push(Validation::fail(SetupIssue::InertTransition { from, to: *to }));
            }
        }
    }

    if !current.is_zero() {
        let reachable = reachable_states(machine, current);
        let mut permitted: Vec<StateId> = machine.permissions().states().copied().collect();
        permitted.sort();
        for state in permitted {
            if !reachable.contains(&state) {
                checks.push(Validation::fail(SetupIssue::UnreachablePermission { state }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
