/*! End-to-end scenarios and cross-strategy agreement tests. */

use itertools::Itertools;
use pretty_assertions::assert_eq;

use crate::compiler::{build_nfa, determinize};
use crate::parser::Parser;
use crate::scanner::matcher;
use crate::{match_all, Buffer, Error, MatchSet, Scanner, Span};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn buffer(text: &str) -> Buffer {
    Buffer::new(text, vec![])
}

fn spans(pairs: &[Span]) -> MatchSet {
    pairs.iter().copied().collect()
}

const PATTERNS: &[&str] = &[
    "Vim",
    "a(bc)?",
    "(ab)?(d)+",
    "(a)*",
    "((a)*)*",
    "Ho(-ho)*",
    r"\?",
    "(a(b)?)+",
    "(d)+",
];

const TEXTS: &[&str] = &[
    "",
    "Vim",
    "abc abca",
    "d ddd abd",
    "aaa",
    "Ho-ho-ho",
    "a?b",
    "ababb",
    "VimVim",
];

/// The brute-force substring test is the semantic ground truth; both
/// suffix-scan variants must agree with it on every pattern/text pair.
#[test]
fn all_strategies_agree() {
    init_logging();
    for (pattern, text) in PATTERNS.iter().cartesian_product(TEXTS) {
        let expression = Parser::new(pattern).parse().unwrap();
        let nfa = build_nfa(&expression);
        let dfa = determinize(&nfa).unwrap();
        let text_chars: Vec<char> = text.chars().collect();

        let ground_truth = matcher::scan_brute_force(&nfa, &text_chars);
        assert_eq!(
            ground_truth,
            matcher::scan(&nfa, &text_chars),
            "NFA suffix scan disagrees for /{pattern}/ on {text:?}"
        );
        assert_eq!(
            ground_truth,
            matcher::scan(&dfa, &text_chars),
            "DFA suffix scan disagrees for /{pattern}/ on {text:?}"
        );
    }
}

#[test]
fn parallel_scan_agrees_with_sequential() {
    init_logging();
    for (pattern, text) in PATTERNS.iter().cartesian_product(TEXTS) {
        let sequential = Scanner::compile(pattern).unwrap().scan(&buffer(text));
        for threshold in [1, 3, 1000] {
            let parallel = Scanner::compile(pattern)
                .unwrap()
                .split_threshold(threshold)
                .par_scan(&buffer(text));
            assert_eq!(
                sequential, parallel,
                "threshold {threshold}, /{pattern}/ on {text:?}"
            );
        }
    }
}

/// `(e)+` must accept exactly the language of `(e)(e)*`.
#[test]
fn at_least_is_one_then_any_number() {
    for (inner, text) in ["a", "ab", "-ho"].iter().cartesian_product(TEXTS) {
        let at_least = Scanner::compile(&format!("({inner})+")).unwrap();
        let desugared =
            Scanner::compile(&format!("({inner})({inner})*")).unwrap();
        assert_eq!(
            at_least.scan(&buffer(text)),
            desugared.scan(&buffer(text)),
            "({inner})+ on {text:?}"
        );
    }
}

#[test]
fn exact_word() {
    assert_eq!(match_all(&buffer("Vim"), "Vim").unwrap(), spans(&[(0, 3)]));
}

#[test]
fn optional_group_matches_both_branches() {
    assert_eq!(
        match_all(&buffer("abc abca"), "a(bc)?").unwrap(),
        spans(&[(0, 1), (0, 3), (4, 5), (4, 7), (7, 8)])
    );
}

#[test]
fn optional_prefix_and_repeated_suffix() {
    assert_eq!(
        match_all(&buffer("d ddd abd"), "(ab)?(d)+").unwrap(),
        spans(&[
            (0, 1),
            (2, 3),
            (2, 4),
            (2, 5),
            (3, 4),
            (3, 5),
            (4, 5),
            (6, 9),
            (8, 9),
        ])
    );
}

#[test]
fn escaped_quantifier_matches_literally() {
    assert_eq!(match_all(&buffer("a?b"), r"\?").unwrap(), spans(&[(1, 2)]));
}

#[test]
fn caret_after_the_match_region_changes_nothing() {
    let editor = Buffer::new("Vimfoo", vec![3]);
    assert_eq!(match_all(&editor, "Vim").unwrap(), spans(&[(0, 3)]));
}

#[test]
fn invalid_patterns_fail_before_matching() {
    for pattern in ["(", "()", "a?", r"a\", "héllo"] {
        assert_eq!(
            match_all(&buffer("whatever"), pattern),
            Err(Error::InvalidPattern),
            "{pattern}"
        );
    }
}

#[test]
fn oversized_patterns_fail_at_compile_time() {
    let pattern = "(a)?".repeat(40);
    assert_eq!(Scanner::compile(&pattern).err(), Some(Error::PatternTooComplex));
}
