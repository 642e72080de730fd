/*! Lowering of [`Expression`](crate::ast::Expression) trees into automata.

[`build_nfa`] produces a non-deterministic automaton with epsilon
transitions and exactly one accepting state. [`determinize`] turns that NFA
into a DFA by subset construction, encoding each DFA state as a `u64`
bitmask of the NFA states it subsumes. Both automata are immutable value
objects consumed by the scanner and then discarded; nothing is cached
across calls.
*/

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashSet;

mod dfa;
mod nfa;


pub use dfa::{determinize, MAX_NFA_STATES};
pub use nfa::build_nfa;

/// Automaton state identifier.
///
/// NFA states are small consecutive integers starting at 1. DFA states are
/// bitmasks: bit `s - 1` is set iff NFA state `s` belongs to the subset the
/// DFA state represents, so the identifier *is* the state set.
pub type StateId = u64;

/// Condition under which a transition can be taken.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Label {
    /// Taken unconditionally, without consuming input. NFA only; subset
    /// construction eliminates every epsilon edge.
    Epsilon,
    /// Taken iff the remaining input starts with the given text, which is
    /// then consumed.
    Literal(String),
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Epsilon => f.write_str("Eps"),
            Label::Literal(value) => f.write_str(value),
        }
    }
}

/// A labeled edge between two states.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Transition {
    /// Originating state.
    pub from: StateId,
    /// Destination state.
    pub to: StateId,
    /// Condition for taking the edge.
    pub label: Label,
}

impl Transition {
    /// A transition with an arbitrary label.
    pub fn new(from: StateId, to: StateId, label: Label) -> Self {
        Self { from, to, label }
    }

    pub(crate) fn epsilon(from: StateId, to: StateId) -> Self {
        Self::new(from, to, Label::Epsilon)
    }

    pub(crate) fn literal(from: StateId, to: StateId, value: impl Into<String>) -> Self {
        Self::new(from, to, Label::Literal(value.into()))
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --{}-> {}", self.from, self.label, self.to)
    }
}

/// A directed labeled multigraph used both as NFA and DFA.
///
/// Every state referenced by a transition is reachable from `start`; states
/// are introduced only as construction needs them, so orphans don't occur.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Automaton {
    /// The state every walk begins in.
    pub start: StateId,
    /// Accepting states. The NFA built by [`build_nfa`] has exactly one;
    /// a DFA may have several.
    pub accepting: FxHashSet<StateId>,
    /// The edges of the graph.
    pub transitions: FxHashSet<Transition>,
}

impl Automaton {
    /// Whether `state` is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }
}
