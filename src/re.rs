// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The public surface (spec §6): compiling a pattern and reading back
//! matches and captures.

use crate::ast::Flags;
use crate::error::Error;
use crate::program::{Limits, Program};

pub use crate::pikevm::MatchOptions;

/// Compile `pattern` with the default limits.
pub fn compile(pattern: &str, flags: Flags) -> Result<Program, Error> {
    Program::new(pattern, flags, Limits::default())
}

/// Compile `pattern`, overriding the default parse/compile limits.
pub fn compile_with_limits(pattern: &str, flags: Flags, limits: Limits) -> Result<Program, Error> {
    Program::new(pattern, flags, limits)
}

/// A view over one match's capture slots, paired with the program's
/// name table so captures can be looked up by name as well as index.
#[derive(Clone, Debug)]
pub struct Captures<'p> {
    slots: Vec<Option<usize>>,
    program: &'p Program,
}

impl<'p> Captures<'p> {
    fn new(slots: Vec<Option<usize>>, program: &'p Program) -> Captures<'p> {
        Captures { slots, program }
    }

    /// The byte-offset span of capture group `i` (group 0 is the whole
    /// match), or `None` if that group didn't participate.
    pub fn get(&self, i: usize) -> Option<(usize, usize)> {
        let start = *self.slots.get(2 * i)?;
        let end = *self.slots.get(2 * i + 1)?;
        Some((start?, end?))
    }

    /// The byte-offset span of the named capture group `name`.
    pub fn name(&self, name: &str) -> Option<(usize, usize)> {
        self.get(self.program.capture_index(name)?)
    }

    pub fn len(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Program {
    /// Find the first match in `text` and return its captures.
    pub fn captures<'p>(&'p self, text: &str) -> Option<Captures<'p>> {
        let slots = self.find_at(text, 0, &MatchOptions::default()).ok().flatten()?;
        Some(Captures::new(slots, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_and_match_literal() {
        let prog = compile("hello", Flags::empty()).unwrap();
        assert!(prog.is_match("say hello world"));
        assert_eq!(prog.find("say hello world"), Some((4, 9)));
    }

    #[test]
    fn captures_expose_named_groups() {
        let prog = compile(r"(?P<year>\d{4})-(?P<month>\d{2})", Flags::empty()).unwrap();
        let caps = prog.captures("born 1999-07").unwrap();
        assert_eq!(caps.name("year"), Some((5, 9)));
        assert_eq!(caps.name("month"), Some((10, 12)));
    }

    #[test]
    fn no_match_gives_no_captures() {
        let prog = compile("xyz", Flags::empty()).unwrap();
        assert!(prog.captures("abc").is_none());
    }

    #[test]
    fn bad_pattern_reports_an_error() {
        let err = compile("a(b", Flags::empty()).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
