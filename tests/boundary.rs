// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Boundary behaviors (spec §8): empty pattern, empty input, and the
//! zero-width-loop termination guarantee.

use tre_core::{compile, Flags};

#[test]
fn empty_pattern_matches_empty_string_at_every_position() {
    let prog = compile("", Flags::empty()).unwrap();
    let caps = prog.captures("xyz").unwrap();
    assert_eq!(caps.get(0), Some((0, 0)));
}

#[test]
fn empty_input_anchored_matches() {
    let prog = compile("^$", Flags::empty()).unwrap();
    assert!(prog.is_match(""));
}

#[test]
fn empty_input_dot_does_not_match() {
    let prog = compile(".", Flags::empty()).unwrap();
    assert!(!prog.is_match(""));
}

#[test]
fn empty_input_star_matches_empty_at_zero() {
    let prog = compile("a*", Flags::empty()).unwrap();
    let caps = prog.captures("").unwrap();
    assert_eq!(caps.get(0), Some((0, 0)));
}

#[test]
fn zero_width_star_terminates_with_one_empty_match() {
    let prog = compile("()*", Flags::empty()).unwrap();
    let caps = prog.captures("abc").unwrap();
    assert_eq!(caps.get(0), Some((0, 0)));
}

#[test]
fn zero_width_star_terminates_on_empty_input() {
    let prog = compile("()*", Flags::empty()).unwrap();
    let caps = prog.captures("").unwrap();
    assert_eq!(caps.get(0), Some((0, 0)));
}

#[test]
fn duplicate_capture_name_is_rejected() {
    let err = compile("(?P<x>a)(?P<x>b)", Flags::empty()).unwrap_err();
    assert_eq!(*err.kind(), tre_core::ErrorKind::DuplicateCaptureName);
}

#[test]
fn unclosed_group_is_rejected() {
    let err = compile("(a", Flags::empty()).unwrap_err();
    assert_eq!(*err.kind(), tre_core::ErrorKind::MissingParen);
}

#[test]
fn unclosed_class_is_rejected() {
    let err = compile("[abc", Flags::empty()).unwrap_err();
    assert_eq!(*err.kind(), tre_core::ErrorKind::MissingBracket);
}

#[test]
fn anchored_flag_rejects_a_match_starting_later() {
    // `bc` carries no `\A`/`^` of its own; the compile-time `Anchored`
    // flag must still force the search to fail rather than restart at
    // byte offset 1.
    let prog = compile("bc", Flags::ANCHORED).unwrap();
    assert!(!prog.is_match("abc"));
    assert!(prog.is_match("bc"));
}
