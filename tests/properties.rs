// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Property-based tests for the "Universal invariants" of spec §8:
//! determinism, capture well-formedness, and UTF-8 safety, checked
//! against a representative set of patterns over arbitrary input text
//! rather than a handful of hand-picked examples.

use proptest::prelude::*;

use tre_core::{compile, Flags};

/// Patterns chosen to exercise alternation, repetition (greedy and
/// lazy), classes, captures, and anchors — the shapes whose capture
/// bookkeeping and restart logic are most likely to break.
const PATTERNS: &[&str] = &[
    r"a(b|c)*d",
    r"(a+)(b+)?",
    r"\d{2,4}-\d{2}",
    r"(?i)[a-z]+\s*(\w+)",
    r"(a|ab)(c|bcd)(d*)",
    r"^(a*)(b*)$",
    r"\b\w+\b",
    r".*?,",
    r"(a)(b)?(c)",
];

fn arb_text() -> impl Strategy<Value = String> {
    // Mix ASCII with a few multi-byte runes so UTF-8 boundary checks are
    // actually exercised, not just vacuously true over ASCII input.
    proptest::collection::vec(
        prop_oneof![
            3 => prop::char::range('a', 'z'),
            1 => prop::char::range('0', '9'),
            1 => Just(' '),
            1 => Just(','),
            1 => Just('-'),
            1 => Just('\u{3b1}'), // Greek alpha, 2 bytes
            1 => Just('\u{4e2d}'), // CJK, 3 bytes
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn is_rune_boundary(text: &str, byte_pos: usize) -> bool {
    byte_pos == text.len() || text.is_char_boundary(byte_pos)
}

proptest! {
    #[test]
    fn determinism(idx in 0..PATTERNS.len(), text in arb_text()) {
        let prog = compile(PATTERNS[idx], Flags::empty()).unwrap();
        let first = prog.find_at(&text, 0, &Default::default()).unwrap();
        let second = prog.find_at(&text, 0, &Default::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn capture_well_formedness(idx in 0..PATTERNS.len(), text in arb_text()) {
        let prog = compile(PATTERNS[idx], Flags::empty()).unwrap();
        if let Some(slots) = prog.find_at(&text, 0, &Default::default()).unwrap() {
            prop_assert_eq!(slots.len() % 2, 0);
            for pair in slots.chunks(2) {
                match (pair[0], pair[1]) {
                    (Some(start), Some(end)) => {
                        prop_assert!(start <= end);
                        prop_assert!(end <= text.len());
                    }
                    (None, None) => {}
                    other => prop_assert!(false, "capture slot half-set: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn utf8_safety(idx in 0..PATTERNS.len(), text in arb_text()) {
        let prog = compile(PATTERNS[idx], Flags::empty()).unwrap();
        if let Some(slots) = prog.find_at(&text, 0, &Default::default()).unwrap() {
            for slot in slots.into_iter().flatten() {
                prop_assert!(is_rune_boundary(&text, slot));
            }
        }
    }

    #[test]
    fn empty_pattern_matches_every_position(text in arb_text()) {
        let prog = compile("", Flags::empty()).unwrap();
        let caps = prog.captures(&text).unwrap();
        prop_assert_eq!(caps.get(0), Some((0, 0)));
    }
}

/// The "(a+)+b" family from spec §8, scaled across several `n` rather
/// than the single size in `tests/scenarios.rs`: each must terminate
/// (not hang or blow the stack) and correctly fail to match.
#[test]
fn catastrophic_backtracking_family_stays_linear_at_every_size() {
    let prog = compile("(a+)+b", Flags::empty()).unwrap();
    for n in [8usize, 16, 32, 64, 128] {
        let text = "a".repeat(n) + "c";
        assert!(!prog.is_match(&text), "n={n}");
    }
}
