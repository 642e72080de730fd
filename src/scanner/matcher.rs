/*! The matching strategies: a suffix scan that walks the automaton from
every start offset, and a brute-force exact-substring test that serves as
the semantic ground truth the scan must agree with. */

use std::ops::Range;

use rustc_hash::{FxHashMap, FxHashSet};

use super::MatchSet;
use crate::compiler::{Automaton, Label, StateId, Transition};

/// An automaton with its transitions indexed by source state.
///
/// The automaton itself stores transitions as a flat set; a walk needs the
/// outgoing edges of one state at a time, so the index is built once per
/// scan and shared (read-only) by every walk, sequential or parallel.
pub(crate) struct TransitionIndex<'a> {
    automaton: &'a Automaton,
    outgoing: FxHashMap<StateId, Vec<&'a Transition>>,
}

impl<'a> TransitionIndex<'a> {
    pub(crate) fn new(automaton: &'a Automaton) -> Self {
        let mut outgoing: FxHashMap<StateId, Vec<&Transition>> = FxHashMap::default();
        for transition in &automaton.transitions {
            outgoing.entry(transition.from).or_default().push(transition);
        }
        Self { automaton, outgoing }
    }

    fn from_state(&self, state: StateId) -> &[&'a Transition] {
        self.outgoing.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Finds all matches by walking the automaton from every start offset.
///
/// Covers start offsets `0..=len`; the final offset exists so that a
/// pattern matching the empty string is reported at the very end of the
/// text too.
///
/// Works on the NFA and on the DFA alike; a determinized automaton simply
/// has no epsilon edges left to follow.
pub fn scan(automaton: &Automaton, text: &[char]) -> MatchSet {
    let index = TransitionIndex::new(automaton);
    let mut results = MatchSet::default();
    scan_offsets(&index, text, 0..text.len() + 1, &mut results);
    results
}

/// Runs the per-offset walk for every start offset in `range`, adding a
/// `(start, end)` pair for every match end the walk reaches.
pub(crate) fn scan_offsets(
    index: &TransitionIndex,
    text: &[char],
    range: Range<usize>,
    results: &mut MatchSet,
) {
    for start in range {
        let mut ends = FxHashSet::default();
        walk(index, text, index.automaton.start, start, &mut Seen::default(), &mut ends);
        results.extend(ends.into_iter().map(|end| (start, end)));
    }
}

type Seen = FxHashSet<(StateId, usize)>;

/// Walks the automaton against `text[offset..]`, recording the absolute
/// offset every time an accepting state is visited, even mid-walk; that
/// yields all match lengths, not just the longest.
///
/// Epsilon edges recurse without consuming input, literal edges require the
/// remaining input to start with their text and consume it. Revisits of a
/// `(state, offset)` pair are pruned, which both avoids rescanning and
/// breaks epsilon cycles; recursion depth is otherwise bounded by the
/// remaining input.
fn walk(
    index: &TransitionIndex,
    text: &[char],
    state: StateId,
    offset: usize,
    seen: &mut Seen,
    ends: &mut FxHashSet<usize>,
) {
    if !seen.insert((state, offset)) {
        return;
    }
    if index.automaton.is_accepting(state) {
        ends.insert(offset);
    }
    for transition in index.from_state(state) {
        match &transition.label {
            Label::Epsilon => walk(index, text, transition.to, offset, seen, ends),
            Label::Literal(value) => {
                if let Some(len) = consume(text, offset, value) {
                    walk(index, text, transition.to, offset + len, seen, ends);
                }
            }
        }
    }
}

/// Ground-truth matcher: tests every `(i, j)` substring for exact
/// acceptance. Quadratic in the text length, used for validation and short
/// texts; the suffix scan must agree with it exactly.
pub fn scan_brute_force(automaton: &Automaton, text: &[char]) -> MatchSet {
    let index = TransitionIndex::new(automaton);
    let mut results = MatchSet::default();
    for i in 0..=text.len() {
        for j in i..=text.len() {
            if accepts(&index, &text[i..j]) {
                results.insert((i, j));
            }
        }
    }
    results
}

/// Whether `input`, consumed in full, drives the automaton from its start
/// state into an accepting state.
pub(crate) fn accepts(index: &TransitionIndex, input: &[char]) -> bool {
    accepts_from(index, input, index.automaton.start, 0, &mut Seen::default())
}

fn accepts_from(
    index: &TransitionIndex,
    input: &[char],
    state: StateId,
    offset: usize,
    seen: &mut Seen,
) -> bool {
    if !seen.insert((state, offset)) {
        return false;
    }
    if offset == input.len() && index.automaton.is_accepting(state) {
        return true;
    }
    index.from_state(state).iter().any(|transition| match &transition.label {
        Label::Epsilon => accepts_from(index, input, transition.to, offset, seen),
        Label::Literal(value) => match consume(input, offset, value) {
            Some(len) => accepts_from(index, input, transition.to, offset + len, seen),
            None => false,
        },
    })
}

/// Length of `value` in chars if `text[offset..]` starts with it.
fn consume(text: &[char], offset: usize, value: &str) -> Option<usize> {
    let mut len = 0;
    for c in value.chars() {
        if text.get(offset + len) != Some(&c) {
            return None;
        }
        len += 1;
    }
    Some(len)
}
