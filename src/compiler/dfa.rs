use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashSet;

use super::{Automaton, Label, StateId, Transition};
use crate::Error;

/// Largest NFA, in states, that can be determinized.
///
/// DFA states are `u64` bitmasks with one bit per NFA state, so an NFA
/// needing more states than a `u64` has bits fails with
/// [`Error::PatternTooComplex`] before any encoding happens.
pub const MAX_NFA_STATES: u32 = u64::BITS;

/// Converts an NFA into an equivalent DFA by subset construction.
///
/// Every NFA state `s` is re-expressed as the bitmask `1 << (s - 1)`, so a
/// set of NFA states collapses losslessly into the bitwise OR of its
/// members and no lookup table is needed. The DFA start state is the
/// epsilon-closure of the NFA start; from there, every reachable state set
/// is expanded once per distinct literal label until no new sets appear.
/// A DFA state accepts iff its mask contains the NFA accepting bit.
///
/// # Panics
///
/// Panics if the NFA has more than one accepting state; [`super::build_nfa`]
/// never produces one.
pub fn determinize(nfa: &Automaton) -> Result<Automaton, Error> {
    let accept_state = *nfa
        .accepting
        .iter()
        .exactly_one()
        .expect("NFA must have exactly one accepting state");

    let max_state = nfa
        .transitions
        .iter()
        .flat_map(|t| [t.from, t.to])
        .chain([nfa.start, accept_state])
        .max()
        .unwrap_or(nfa.start);
    if max_state > MAX_NFA_STATES as StateId {
        return Err(Error::PatternTooComplex);
    }

    let encode = |state: StateId| 1u64 << (state - 1);

    let transitions: Vec<Transition> = nfa
        .transitions
        .iter()
        .map(|t| Transition::new(encode(t.from), encode(t.to), t.label.clone()))
        .collect();
    let accept_mask = encode(accept_state);

    let labels: Vec<Label> = transitions
        .iter()
        .filter(|t| t.label != Label::Epsilon)
        .map(|t| t.label.clone())
        .unique()
        .collect();

    let start = collapse(&epsilon_closure(&transitions, [encode(nfa.start)]));

    let mut dfa_transitions: FxHashSet<Transition> = FxHashSet::default();
    let mut unmarked = vec![start];
    let mut visited = FxHashSet::default();
    visited.insert(start);

    while let Some(from) = unmarked.pop() {
        for label in &labels {
            let reachable = follow(&transitions, from, label);
            if reachable.is_empty() {
                continue;
            }
            let to = collapse(&epsilon_closure(&transitions, reachable));
            if visited.insert(to) {
                unmarked.push(to);
            }
            dfa_transitions.insert(Transition::new(from, to, label.clone()));
        }
    }

    // OR-collapsing never loses membership, so testing the accepting bit
    // marks every state that subsumes acceptance, not just the literal one.
    let mut accepting = FxHashSet::default();
    for state in dfa_transitions
        .iter()
        .flat_map(|t| [t.from, t.to])
        .chain([start])
    {
        if state & accept_mask == accept_mask {
            accepting.insert(state);
        }
    }

    debug!(
        "determinized NFA: {} DFA states, {} transitions",
        visited.len(),
        dfa_transitions.len()
    );

    Ok(Automaton { start, accepting, transitions: dfa_transitions })
}

/// Encoded NFA states reachable on `label` from any member of the state
/// set `from`.
fn follow(transitions: &[Transition], from: StateId, label: &Label) -> Vec<StateId> {
    let mut result = Vec::new();
    for member in expand(from) {
        for t in transitions {
            if t.from == member && t.label == *label && !result.contains(&t.to) {
                result.push(t.to);
            }
        }
    }
    result
}

/// States reachable from `seeds` using only epsilon edges, `seeds`
/// included. Worklist-based; visited states are never re-expanded, which
/// also breaks epsilon cycles.
fn epsilon_closure(
    transitions: &[Transition],
    seeds: impl IntoIterator<Item = StateId>,
) -> FxHashSet<StateId> {
    let mut closure: FxHashSet<StateId> = FxHashSet::default();
    let mut pending: Vec<StateId> = Vec::new();

    for seed in seeds {
        if closure.insert(seed) {
            pending.push(seed);
        }
    }
    while let Some(state) = pending.pop() {
        for t in transitions {
            if t.from == state && t.label == Label::Epsilon && closure.insert(t.to) {
                pending.push(t.to);
            }
        }
    }
    closure
}

/// Collapses a set of encoded states into the single state subsuming them.
fn collapse(states: &FxHashSet<StateId>) -> StateId {
    states.iter().fold(0, |acc, state| acc | state)
}

/// The individual encoded states stored in a collapsed state.
fn expand(state: StateId) -> impl Iterator<Item = StateId> {
    (0..MAX_NFA_STATES)
        .map(|bit| 1u64 << bit)
        .filter(move |mask| state & mask == *mask)
}
