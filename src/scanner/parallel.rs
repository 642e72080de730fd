use std::ops::Range;
use std::sync::{Mutex, PoisonError};

use super::matcher::{scan_offsets, TransitionIndex};
use super::MatchSet;
use crate::compiler::Automaton;

/// Partition size under which the scan stops splitting and walks the
/// offsets sequentially.
pub(crate) const DEFAULT_SPLIT_THRESHOLD: usize = 10;

/// Parallel variant of [`matcher::scan`](super::matcher::scan).
///
/// The range of start offsets is halved recursively, fork-join style: one
/// half is spawned on the rayon pool while the other runs inline, and the
/// split joins before returning. Leaf partitions run the ordinary
/// sequential walk and merge their matches into a single mutex-guarded
/// accumulator, the only shared mutable state; text and automaton are
/// read-only throughout. The result set is identical to the sequential
/// scan's for every input and pool size.
pub(crate) fn scan(
    automaton: &Automaton,
    text: &[char],
    split_threshold: usize,
) -> MatchSet {
    let index = TransitionIndex::new(automaton);
    let results = Mutex::new(MatchSet::default());

    // Offset `len` is included so the empty match at the end of the text
    // is found here too.
    scan_partition(
        &index,
        text,
        0..text.len() + 1,
        split_threshold.max(1),
        &results,
    );

    results.into_inner().unwrap_or_else(PoisonError::into_inner)
}

fn scan_partition(
    index: &TransitionIndex,
    text: &[char],
    range: Range<usize>,
    threshold: usize,
    results: &Mutex<MatchSet>,
) {
    if range.len() <= threshold {
        let mut local = MatchSet::default();
        scan_offsets(index, text, range, &mut local);
        let mut shared = results.lock().unwrap_or_else(PoisonError::into_inner);
        shared.extend(local);
        return;
    }

    let mid = range.start + range.len() / 2;
    rayon::join(
        || scan_partition(index, text, range.start..mid, threshold, results),
        || scan_partition(index, text, mid..range.end, threshold, results),
    );
}
