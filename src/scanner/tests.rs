use pretty_assertions::assert_eq;

use super::matcher::{self, TransitionIndex};
use super::{match_all, Buffer, MarkedText, MatchSet, Scanner, Span};
use crate::compiler::{build_nfa, determinize, Automaton};
use crate::parser::Parser;

fn nfa(pattern: &str) -> Automaton {
    build_nfa(&Parser::new(pattern).parse().unwrap())
}

fn dfa(pattern: &str) -> Automaton {
    determinize(&nfa(pattern)).unwrap()
}

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

fn spans(pairs: &[Span]) -> MatchSet {
    pairs.iter().copied().collect()
}

#[test]
fn scan_finds_a_single_exact_match() {
    assert_eq!(matcher::scan(&nfa("Vim"), &chars("Vim")), spans(&[(0, 3)]));
    assert_eq!(matcher::scan(&dfa("Vim"), &chars("Vim")), spans(&[(0, 3)]));
}

#[test]
fn scan_finds_every_occurrence() {
    let expected = spans(&[(0, 3), (3, 6)]);
    assert_eq!(matcher::scan(&nfa("Vim"), &chars("VimVim")), expected);
    assert_eq!(matcher::scan(&dfa("Vim"), &chars("VimVim")), expected);
}

#[test]
fn scan_reports_all_match_lengths() {
    // The optional group contributes both the one-char and three-char form.
    let expected = spans(&[(0, 1), (0, 3), (4, 5), (4, 7), (7, 8)]);
    assert_eq!(matcher::scan(&nfa("a(bc)?"), &chars("abc abca")), expected);
    assert_eq!(matcher::scan(&dfa("a(bc)?"), &chars("abc abca")), expected);
}

#[test]
fn scan_reports_empty_matches_at_every_offset() {
    let expected =
        spans(&[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    assert_eq!(matcher::scan(&dfa("(a)*"), &chars("aa")), expected);
}

#[test]
fn epsilon_cycles_do_not_hang_the_walk() {
    // `((a)*)*` contains an epsilon cycle; it must match like `(a)*`.
    let text = chars("aa");
    assert_eq!(
        matcher::scan(&nfa("((a)*)*"), &text),
        matcher::scan(&nfa("(a)*"), &text)
    );
}

#[test]
fn acceptance_consumes_the_whole_input() {
    let automaton = nfa("(ab)?(d)+");
    let index = TransitionIndex::new(&automaton);
    assert!(matcher::accepts(&index, &chars("abd")));
    assert!(matcher::accepts(&index, &chars("d")));
    assert!(matcher::accepts(&index, &chars("ddd")));
    assert!(!matcher::accepts(&index, &chars("ab")));
    assert!(!matcher::accepts(&index, &chars("abdx")));
    assert!(!matcher::accepts(&index, &chars("")));
}

#[test]
fn brute_force_agrees_with_the_suffix_scan() {
    let automaton = nfa("a(bc)?");
    let text = chars("abc abca");
    assert_eq!(
        matcher::scan_brute_force(&automaton, &text),
        matcher::scan(&automaton, &text)
    );
}

#[test]
fn marked_text_tracks_interleaved_carets() {
    let marked = MarkedText::new(&Buffer::new("abab", vec![1, 3]));

    let expected: Vec<char> = "a\u{00A9}b\u{00A9}ab".chars().collect();
    assert_eq!(marked.chars, expected);
    assert_eq!(marked.markers_before, vec![0, 0, 1, 1, 2, 2, 2]);

    assert_eq!(marked.to_original(0), 0);
    assert_eq!(marked.to_original(2), 1);
    assert_eq!(marked.to_original(4), 2);
    assert_eq!(marked.to_original(6), 4);
}

#[test]
fn out_of_bounds_carets_are_clamped() {
    let marked = MarkedText::new(&Buffer::new("ab", vec![99]));
    let expected: Vec<char> = "ab\u{00A9}".chars().collect();
    assert_eq!(marked.chars, expected);
}

#[test]
fn matches_around_interleaved_carets_use_original_offsets() {
    let buffer = Buffer::new("abab", vec![1, 3]);
    assert_eq!(match_all(&buffer, "a").unwrap(), spans(&[(0, 1), (2, 3)]));
}

#[test]
fn match_before_a_caret_is_unaffected() {
    let buffer = Buffer::new("Vimfoo", vec![3]);
    assert_eq!(match_all(&buffer, "Vim").unwrap(), spans(&[(0, 3)]));
}

#[test]
fn a_caret_splits_would_be_matches() {
    let buffer = Buffer::new("ab", vec![1]);
    assert_eq!(match_all(&buffer, "ab").unwrap(), spans(&[]));
}

#[test]
fn caret_escape_matches_the_marker() {
    let buffer = Buffer::new("ab", vec![1]);
    assert_eq!(match_all(&buffer, r"\c").unwrap(), spans(&[(1, 1)]));
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let scanner = Scanner::compile("(ab)?(d)+").unwrap();
    let buffer = Buffer::new("d ddd abd abdddd ab d", vec![2, 7]);
    let sequential = scanner.scan(&buffer);

    assert_eq!(scanner.par_scan(&buffer), sequential);
    // Degenerate thresholds must not change the result.
    assert_eq!(
        Scanner::compile("(ab)?(d)+").unwrap().split_threshold(0).par_scan(&buffer),
        sequential
    );
    assert_eq!(
        Scanner::compile("(ab)?(d)+").unwrap().split_threshold(1000).par_scan(&buffer),
        sequential
    );
}
