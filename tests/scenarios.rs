// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The eight end-to-end scenarios.

use tre_core::{compile, Flags};

#[test]
fn alternation_first_branch() {
    let prog = compile("a(b|c)d", Flags::empty()).unwrap();
    let caps = prog.captures("abd").unwrap();
    assert_eq!(caps.get(0), Some((0, 3)));
    assert_eq!(caps.get(1), Some((1, 2)));
}

#[test]
fn alternation_second_branch() {
    let prog = compile("a(b|c)d", Flags::empty()).unwrap();
    let caps = prog.captures("acd").unwrap();
    assert_eq!(caps.get(0), Some((0, 3)));
    assert_eq!(caps.get(1), Some((1, 2)));
}

#[test]
fn case_insensitive_inline_flag() {
    let prog = compile(r"(?i)Hello, (\w+)!", Flags::empty()).unwrap();
    let caps = prog.captures("hello, WORLD!").unwrap();
    assert_eq!(caps.get(0), Some((0, 13)));
    assert_eq!(caps.get(1), Some((7, 12)));
}

#[test]
fn bounded_repeat_date_like() {
    let prog = compile(r"\d{2,4}-\d{2}-\d{2}", Flags::empty()).unwrap();
    let caps = prog.captures("log 2024-01-02 end").unwrap();
    assert_eq!(caps.get(0), Some((4, 14)));
    assert_eq!(caps.len(), 1);
}

#[test]
fn nested_plus_does_not_match_and_stays_linear() {
    let prog = compile("(a+)+b", Flags::empty()).unwrap();
    let text = "a".repeat(32) + "c";
    // Linearity is the point of this scenario: this must return promptly
    // rather than exhibit backtracking blow-up. We don't assert a
    // wall-clock bound (per spec §8's own caveat), just that it
    // terminates with the correct answer.
    assert!(!prog.is_match(&text));
}

#[test]
fn word_boundaries() {
    let prog = compile(r"\bword\b", Flags::empty()).unwrap();
    let caps = prog.captures("sword wordy word!").unwrap();
    assert_eq!(caps.get(0), Some((12, 16)));
    assert_eq!(caps.len(), 1);
}

#[test]
fn multiline_anchors() {
    let prog = compile("(?m)^foo$", Flags::empty()).unwrap();
    let caps = prog.captures("bar\nfoo\nbaz").unwrap();
    assert_eq!(caps.get(0), Some((4, 7)));
}

#[test]
fn unicode_script_property() {
    let prog = compile(r"\p{Greek}+", Flags::empty()).unwrap();
    let caps = prog.captures("hello \u{3b1}\u{3b2}\u{3b3} world").unwrap();
    assert_eq!(caps.get(0), Some((6, 12)));
}
