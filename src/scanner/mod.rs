/*! Pattern compilation and caret-aware matching over a host buffer.

[`Scanner`] is the orchestrator: compiling it runs the whole
validate → parse → NFA → DFA pipeline once, and the resulting scanner can
then be used to scan any number of buffers. Scanning splices a reserved
marker character into the text at every caret position, matches the DFA
over the marked text, and maps the resulting offsets back into
original-text coordinates.
*/

use std::time::Instant;

use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::compiler::{build_nfa, determinize, Automaton};
use crate::parser::{validate, Parser};
use crate::Error;

pub mod matcher;
mod parallel;

#[cfg(test)]
mod tests;

/// Marker character spliced into the text at every caret position.
///
/// Patterns are ASCII-only, so this non-ASCII character can never occur in
/// ordinary pattern text; the `\c` escape is the only sanctioned way for a
/// pattern to refer to it.
pub const CARET_MARK: char = '\u{00A9}';

/// A half-open `[start, end)` character span.
pub type Span = (usize, usize);

/// The matches found in a buffer. An unordered set of spans; the result
/// contract is set equality, duplicates collapse naturally.
pub type MatchSet = FxHashSet<Span>;

/// Capability through which the host editor exposes its buffer.
pub trait TextSource {
    /// The full text of the buffer.
    fn text(&self) -> &str;

    /// Caret character offsets, in the order the host maintains them.
    fn carets(&self) -> &[usize];
}

/// A plain in-memory [`TextSource`], handy for hosts that already have the
/// text as a string, and for tests.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    text: String,
    carets: Vec<usize>,
}

impl Buffer {
    /// A buffer holding `text` with carets at `carets`.
    pub fn new(text: impl Into<String>, carets: Vec<usize>) -> Self {
        Self { text: text.into(), carets }
    }
}

impl TextSource for Buffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn carets(&self) -> &[usize] {
        &self.carets
    }
}

/// A compiled pattern, ready to scan buffers.
pub struct Scanner {
    dfa: Automaton,
    split_threshold: usize,
}

impl Scanner {
    /// Compiles `pattern` into a scanner.
    ///
    /// Runs the whole pipeline up front: validation, parsing, NFA
    /// construction and determinization. Everything that can fail fails
    /// here, before any matching work.
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        validate(pattern)?;
        let expression = Parser::new(pattern).parse()?;
        let nfa = build_nfa(&expression);
        let dfa = determinize(&nfa)?;

        debug!(
            "compiled `{}`: NFA {} transitions, DFA {} transitions",
            pattern,
            nfa.transitions.len(),
            dfa.transitions.len()
        );

        Ok(Self { dfa, split_threshold: parallel::DEFAULT_SPLIT_THRESHOLD })
    }

    /// Sets the partition size under which [`par_scan`](Self::par_scan)
    /// stops splitting. Values below 1 are treated as 1.
    pub fn split_threshold(mut self, threshold: usize) -> Self {
        self.split_threshold = threshold.max(1);
        self
    }

    /// Finds every matching span in `source`, in original-text coordinates.
    pub fn scan<S: TextSource>(&self, source: &S) -> MatchSet {
        self.scan_with(source, |text| matcher::scan(&self.dfa, text))
    }

    /// Like [`scan`](Self::scan), splitting the work across the rayon pool.
    /// Produces exactly the same result set.
    pub fn par_scan<S: TextSource>(&self, source: &S) -> MatchSet {
        self.scan_with(source, |text| {
            parallel::scan(&self.dfa, text, self.split_threshold)
        })
    }

    fn scan_with<S, F>(&self, source: &S, scan: F) -> MatchSet
    where
        S: TextSource,
        F: Fn(&[char]) -> MatchSet,
    {
        let start = Instant::now();
        let marked = MarkedText::new(source);

        let matches: MatchSet = scan(&marked.chars)
            .into_iter()
            .map(|(from, to)| (marked.to_original(from), marked.to_original(to)))
            .collect();

        info!("found {} matches in {:?}", matches.len(), start.elapsed());
        matches
    }
}

/// Compiles `pattern` and scans `source` once.
pub fn match_all<S: TextSource>(source: &S, pattern: &str) -> Result<MatchSet, Error> {
    Ok(Scanner::compile(pattern)?.scan(source))
}

/// The host text with one [`CARET_MARK`] spliced in per caret, plus the
/// bookkeeping needed to map marked offsets back to original ones.
///
/// Carets are processed in host order and inserted into the already-marked
/// buffer, so earlier insertions shift later insertion points. A prefix
/// count of markers is kept per offset; an offset in marked coordinates
/// maps back by subtracting the number of markers strictly before it.
struct MarkedText {
    chars: Vec<char>,
    markers_before: Vec<usize>,
}

impl MarkedText {
    fn new<S: TextSource>(source: &S) -> Self {
        let mut chars: Vec<char> = source.text().chars().collect();
        let mut is_marker = vec![false; chars.len()];

        for &caret in source.carets() {
            // Caret validity is the host's concern; refuse to index out of
            // bounds rather than panic.
            let at = caret.min(chars.len());
            chars.insert(at, CARET_MARK);
            is_marker.insert(at, true);
        }

        let mut markers_before = Vec::with_capacity(chars.len() + 1);
        let mut count = 0;
        markers_before.push(0);
        for &flag in &is_marker {
            count += usize::from(flag);
            markers_before.push(count);
        }

        Self { chars, markers_before }
    }

    fn to_original(&self, offset: usize) -> usize {
        offset - self.markers_before[offset]
    }
}
