use log::debug;
use rustc_hash::FxHashSet;

use super::{Automaton, StateId, Transition};
use crate::ast::{Expression, Quantifier};

/// State every NFA starts in.
pub(crate) const START: StateId = 1;

/// The single accepting state of every built NFA.
pub(crate) const ACCEPT: StateId = 2;

/// First state id available to the recursive construction.
const FIRST_FREE: StateId = 3;

/// Builds a non-deterministic automaton for `expression`.
///
/// The automaton starts in state 1, accepts in state 2, and allocates
/// further states from a counter threaded through the recursive
/// construction, so the numbering is deterministic and reproducible for a
/// given tree shape.
pub fn build_nfa(expression: &Expression) -> Automaton {
    let simplified = simplify(expression);

    let mut transitions = FxHashSet::default();
    make(&simplified, START, ACCEPT, FIRST_FREE, &mut transitions);

    debug!("built NFA with {} transitions", transitions.len());

    Automaton {
        start: START,
        accepting: FxHashSet::from_iter([ACCEPT]),
        transitions,
    }
}

/// Rewrites `(e)+` into `(e)(e)*`, recursively, so that no
/// [`Quantifier::AtLeast`] survives into the construction. The rewrite is
/// applied inside the duplicated sub-expression as well.
fn simplify(expression: &Expression) -> Expression {
    match expression {
        Expression::Exact(_) => expression.clone(),
        Expression::Group(inner, Quantifier::AtLeast) => {
            let inner = simplify(inner);
            Expression::sequence(
                Expression::group(inner.clone(), Quantifier::None),
                Expression::group(inner, Quantifier::Repeat),
            )
        }
        Expression::Group(inner, quantifier) => {
            Expression::group(simplify(inner), *quantifier)
        }
        Expression::Sequence(first, second) => {
            Expression::sequence(simplify(first), simplify(second))
        }
    }
}

/// Emits the transitions for `expression` between `start` and `end`.
///
/// `next` is the lowest state id the call may allocate; the returned value
/// is the lowest id still free afterwards. Fresh states are always taken
/// from the low end, which pins the numbering asserted by the fixtures in
/// the test module.
fn make(
    expression: &Expression,
    start: StateId,
    end: StateId,
    next: StateId,
    transitions: &mut FxHashSet<Transition>,
) -> StateId {
    match expression {
        Expression::Exact(value) => {
            transitions.insert(Transition::literal(start, end, value.clone()));
            next
        }
        // A bare group adds nothing over its content.
        Expression::Group(inner, Quantifier::None) => {
            make(inner, start, end, next, transitions)
        }
        Expression::Group(inner, quantifier) => {
            // `AtLeast` was rewritten away by `simplify`.
            debug_assert!(!matches!(quantifier, Quantifier::AtLeast));

            // The content lives between two fresh states; epsilon edges
            // enter it, skip it, and leave it.
            let next_free = make(inner, next, next + 1, next + 2, transitions);
            transitions.insert(Transition::epsilon(start, next));
            transitions.insert(Transition::epsilon(start, end));
            transitions.insert(Transition::epsilon(next + 1, end));
            if matches!(quantifier, Quantifier::Repeat) {
                // Loop back for further repetitions.
                transitions.insert(Transition::epsilon(next + 1, next));
            }
            next_free
        }
        Expression::Sequence(first, second) => {
            // Each half gets a fresh midpoint; one epsilon edge joins them.
            let next_free = make(first, start, next, next + 2, transitions);
            let next_free = make(second, next + 1, end, next_free, transitions);
            transitions.insert(Transition::epsilon(next, next + 1));
            next_free
        }
    }
}
