// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Literal-prefix acceleration (spec §4.3's addition): a set of literal
//! strings that must appear at the start of any match, extracted by
//! walking the compiled program. The simulator only ever uses this to
//! pick a later starting position to resume its own scan from — it is
//! a conservative skip-ahead, never a second matcher. See `pikevm.rs`.

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use memchr::memchr;

use crate::classes::ClassRanges;
use crate::inst::{Inst, InstIdx, Insts};

const LITERAL_BYTE_LIMIT: usize = 3000;
const CLASS_EXPANSION_LIMIT: usize = 64;

struct AlternateLiterals {
    at_match: bool,
    literals: Vec<Vec<u8>>,
}

impl AlternateLiterals {
    fn empty() -> AlternateLiterals {
        AlternateLiterals { at_match: false, literals: vec![] }
    }

    fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    fn num_bytes(&self) -> usize {
        self.literals.iter().map(Vec::len).sum()
    }

    fn add_alternates(&mut self, other: AlternateLiterals) {
        self.at_match = self.at_match && other.at_match;
        self.literals.extend(other.literals);
    }

    fn add_literal_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf).as_bytes();
        for lit in &mut self.literals {
            lit.extend_from_slice(encoded);
        }
    }

    fn add_literal_class(&mut self, class: &ClassRanges) {
        let orig = std::mem::replace(&mut self.literals, Vec::new());
        let mut buf = [0u8; 4];
        for &(lo, hi) in class.ranges() {
            for codepoint in (lo as u32)..=(hi as u32) {
                let c = match char::from_u32(codepoint) {
                    Some(c) => c,
                    None => continue,
                };
                let encoded = c.encode_utf8(&mut buf).as_bytes();
                for lit in &orig {
                    let mut lit = lit.clone();
                    lit.extend_from_slice(encoded);
                    self.literals.push(lit);
                }
            }
        }
    }
}

/// Walks a compiled program's required-literal path and builds the
/// alternate literal set that must appear at the start of a match.
struct BuildPrefixes<'a> {
    insts: &'a Insts,
    alts: AlternateLiterals,
}

impl<'a> BuildPrefixes<'a> {
    fn new(insts: &'a Insts) -> BuildPrefixes<'a> {
        BuildPrefixes { insts, alts: AlternateLiterals { at_match: true, literals: vec![] } }
    }

    fn literals(mut self) -> AlternateLiterals {
        let mut stack = vec![self.insts.skip_saves(1)];
        let mut seen = HashSet::new();
        while let Some(mut pc) = stack.pop() {
            if !seen.insert(pc) {
                continue;
            }
            pc = self.insts.skip_saves(pc);
            if let Inst::Split { goto1, goto2 } = *self.insts.get(pc) {
                if !seen.contains(&goto2) {
                    stack.push(goto2);
                }
                if !seen.contains(&goto1) {
                    stack.push(goto1);
                }
                continue;
            }
            let alts = BuildRequiredLiterals::new(self.insts).literals(pc);
            if alts.is_empty() {
                return AlternateLiterals::empty();
            }
            if self.alts.num_bytes() + alts.num_bytes() > LITERAL_BYTE_LIMIT {
                return AlternateLiterals::empty();
            }
            self.alts.add_alternates(alts);
        }
        self.alts
    }
}

/// Walks a single straight-line path from `pc`, collecting every
/// literal rune or class it consumes before hitting a branch, a
/// wildcard, an assertion, or `Match`.
struct BuildRequiredLiterals<'a> {
    insts: &'a Insts,
    alts: AlternateLiterals,
}

impl<'a> BuildRequiredLiterals<'a> {
    fn new(insts: &'a Insts) -> BuildRequiredLiterals<'a> {
        BuildRequiredLiterals { insts, alts: AlternateLiterals { at_match: true, literals: vec![vec![]] } }
    }

    fn literals(mut self, mut pc: InstIdx) -> AlternateLiterals {
        loop {
            match *self.insts.get(pc) {
                Inst::Save { goto, .. } => pc = goto,
                Inst::Char { goto, c } => {
                    if self.alts.num_bytes() + 4 > LITERAL_BYTE_LIMIT {
                        self.alts.at_match = false;
                        break;
                    }
                    self.alts.add_literal_char(c);
                    pc = goto;
                }
                Inst::CharClass { goto, class } => {
                    let ranges = self.insts.class(class);
                    let count: usize = ranges.ranges().iter().map(|&(lo, hi)| hi as usize - lo as usize + 1).sum();
                    if count > CLASS_EXPANSION_LIMIT || self.alts.num_bytes() * count > LITERAL_BYTE_LIMIT {
                        self.alts.at_match = false;
                        break;
                    }
                    self.alts.add_literal_class(ranges);
                    pc = goto;
                }
                Inst::AnyChar { .. }
                | Inst::AnyByteNl { .. }
                | Inst::EmptyAssert { .. }
                | Inst::Split { .. }
                | Inst::Match => {
                    self.alts.at_match = self.insts.leads_to_match(pc);
                    break;
                }
            }
        }
        if self.alts.literals.len() == 1 && self.alts.literals[0].is_empty() {
            AlternateLiterals::empty()
        } else {
            self.alts
        }
    }
}

/// The literal prefixes extracted from a compiled program, and a
/// matcher over them.
#[derive(Clone, Debug)]
pub struct Literals {
    at_match: bool,
    matcher: Matcher,
}

#[derive(Clone, Debug)]
enum Matcher {
    Empty,
    Byte(u8),
    Automaton(Box<AhoCorasick>),
}

impl Literals {
    fn empty() -> Literals {
        Literals { at_match: false, matcher: Matcher::Empty }
    }

    /// True if a literal match at position `p` guarantees the full
    /// program also matches starting at `p` (the literal *is* the
    /// entire matched text up to an optional trailing epsilon).
    pub fn at_match(&self) -> bool {
        self.at_match
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.matcher, Matcher::Empty)
    }

    /// Find the first occurrence of any prefix literal in `haystack`.
    /// Only the start is used by the simulator to skip ahead; the end
    /// is reported too since an `at_match` hit needs it.
    pub fn find(&self, haystack: &[u8]) -> Option<(usize, usize)> {
        match &self.matcher {
            Matcher::Empty => Some((0, 0)),
            Matcher::Byte(b) => memchr(*b, haystack).map(|i| (i, i + 1)),
            Matcher::Automaton(ac) => ac.find(haystack).map(|m| (m.start(), m.end())),
        }
    }
}

/// Build the literal-prefix matcher for a compiled program. Grounded on
/// the teacher's `BuildPrefixes`/`AlternateLiterals` (itself rebuilt
/// here using the `aho-corasick` crate's modern `AhoCorasick` type
/// instead of hand-rolled Boyer-Moore/sparse-map/full-DFA variants —
/// the crate already picks the right internal strategy per pattern
/// set).
pub fn build_prefixes(insts: &Insts) -> Literals {
    if insts.is_empty() {
        return Literals::empty();
    }
    let alts = BuildPrefixes::new(insts).literals();
    if alts.is_empty() {
        return Literals::empty();
    }
    let at_match = alts.at_match;
    if alts.literals.len() == 1 && alts.literals[0].len() == 1 {
        return Literals { at_match, matcher: Matcher::Byte(alts.literals[0][0]) };
    }
    let ac = AhoCorasickBuilder::new()
        .match_kind(MatchKind::LeftmostFirst)
        .build(&alts.literals)
        .expect("literal set extracted from a compiled program is always buildable");
    Literals { at_match, matcher: Matcher::Automaton(Box::new(ac)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Flags;
    use crate::compile::{compile, CompileLimits};
    use crate::parse::{parse, ParseLimits};

    fn prefixes_for(pattern: &str) -> Literals {
        let parsed = parse(pattern, Flags::empty(), ParseLimits::default()).unwrap();
        let insts = compile(&parsed.ast, parsed.capture_count, pattern, CompileLimits::default()).unwrap();
        build_prefixes(&insts)
    }

    #[test]
    fn single_literal_finds_its_full_span() {
        let lits = prefixes_for("abc");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"xxabcyy"), Some((2, 5)));
    }

    #[test]
    fn required_prefix_of_repeat_is_not_at_match() {
        let lits = prefixes_for("ab+");
        assert!(!lits.at_match());
        assert_eq!(lits.find(b"xxaby"), Some((2, 4)));
    }

    #[test]
    fn unanchored_dot_has_no_literal() {
        let lits = prefixes_for(".*");
        assert!(lits.is_empty());
    }

    #[test]
    fn alternation_of_literals_builds_automaton() {
        let lits = prefixes_for("cat|dog");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"a dog ran"), Some((2, 5)));
    }
}
