// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Thompson construction (spec §4.3): turns a simplified `Ast` into a
//! flat `Insts` sequence.
//!
//! Every sub-expression compiles to a fragment: an entry point plus a
//! set of dangling "holes" — successor slots not yet pointed anywhere.
//! A fragment is wired into its surrounding context by patching its
//! holes to point at whatever comes next, which is exactly how a
//! single forward pass builds a graph full of forward references
//! without a second pass.

use crate::ast::{Ast, EmptyAssertKind, Flags, RepeatMax};
use crate::classes::ClassRanges;
use crate::error::{Error, ErrorKind};
use crate::inst::{Inst, InstIdx, Insts};
use crate::unicode;

/// Limits enforced during compilation.
#[derive(Clone, Copy, Debug)]
pub struct CompileLimits {
    pub max_instructions: usize,
}

impl Default for CompileLimits {
    fn default() -> CompileLimits {
        CompileLimits { max_instructions: 10 * (1 << 20) }
    }
}

/// A dangling successor reference: a field of an already-emitted
/// instruction that has not been pointed anywhere yet.
enum Hole {
    None,
    Goto(InstIdx),
    Goto1(InstIdx),
    Goto2(InstIdx),
    Many(Vec<Hole>),
}

/// A compiled sub-expression: where it starts, and what still needs
/// patching once its successor is known.
struct Frag {
    start: InstIdx,
    hole: Hole,
}

struct Compiler {
    insts: Vec<Inst>,
    classes: Vec<ClassRanges>,
    limits: CompileLimits,
}

/// Compile a simplified AST into a flat instruction sequence, given the
/// total number of captures (including the implicit whole-match capture
/// at index 0).
pub fn compile(ast: &Ast, capture_count: u32, pattern: &str, limits: CompileLimits) -> Result<Insts, Error> {
    let mut c = Compiler { insts: Vec::new(), classes: Vec::new(), limits };
    c.compile_program(ast, capture_count, pattern)
}

impl Compiler {
    fn compile_program(&mut self, ast: &Ast, capture_count: u32, pattern: &str) -> Result<Insts, Error> {
        let open = self.push(Inst::Save { goto: 0, slot: 0 })?;
        let body = self.compile_ast(ast)?;
        self.set_goto(open, body.start);
        let close = self.push(Inst::Save { goto: 0, slot: 1 })?;
        self.patch(body.hole, close);
        let match_pc = self.push(Inst::Match)?;
        self.set_goto(close, match_pc);

        if self.insts.len() > self.limits.max_instructions {
            return Err(Error::new(ErrorKind::PatternTooLarge, pattern, 0));
        }
        let _ = capture_count; // slots are sized by the caller from capture_count
        Ok(Insts::new(std::mem::take(&mut self.insts), std::mem::take(&mut self.classes)))
    }

    fn push(&mut self, inst: Inst) -> Result<InstIdx, Error> {
        let pc = self.insts.len();
        if pc >= self.limits.max_instructions {
            return Err(Error::new(ErrorKind::PatternTooLarge, "", 0));
        }
        self.insts.push(inst);
        Ok(pc)
    }

    fn intern_class(&mut self, ranges: ClassRanges) -> usize {
        let id = self.classes.len();
        self.classes.push(ranges);
        id
    }

    fn set_goto(&mut self, pc: InstIdx, goto: InstIdx) {
        match &mut self.insts[pc] {
            Inst::Char { goto: g, .. }
            | Inst::CharClass { goto: g, .. }
            | Inst::AnyChar { goto: g }
            | Inst::AnyByteNl { goto: g }
            | Inst::Save { goto: g, .. }
            | Inst::EmptyAssert { goto: g, .. } => *g = goto,
            Inst::Match | Inst::Split { .. } => unreachable!("no single goto on this instruction"),
        }
    }

    fn set_split_goto1(&mut self, pc: InstIdx, goto: InstIdx) {
        if let Inst::Split { goto1, .. } = &mut self.insts[pc] {
            *goto1 = goto;
        }
    }

    fn set_split_goto2(&mut self, pc: InstIdx, goto: InstIdx) {
        if let Inst::Split { goto2, .. } = &mut self.insts[pc] {
            *goto2 = goto;
        }
    }

    fn patch(&mut self, hole: Hole, goto: InstIdx) {
        match hole {
            Hole::None => {}
            Hole::Goto(pc) => self.set_goto(pc, goto),
            Hole::Goto1(pc) => self.set_split_goto1(pc, goto),
            Hole::Goto2(pc) => self.set_split_goto2(pc, goto),
            Hole::Many(holes) => {
                for h in holes {
                    self.patch(h, goto);
                }
            }
        }
    }

    fn compile_ast(&mut self, ast: &Ast) -> Result<Frag, Error> {
        match *ast {
            Ast::NoMatch => self.compile_nomatch(),
            Ast::EmptyMatch => self.compile_empty(),
            Ast::Literal { ref runes, flags } => self.compile_literal(runes, flags),
            Ast::CharClass { ref ranges, .. } => self.compile_class(ranges.clone()),
            Ast::AnyChar { .. } => {
                let pc = self.push(Inst::AnyChar { goto: 0 })?;
                Ok(Frag { start: pc, hole: Hole::Goto(pc) })
            }
            Ast::AnyByte { .. } => {
                let pc = self.push(Inst::AnyByteNl { goto: 0 })?;
                Ok(Frag { start: pc, hole: Hole::Goto(pc) })
            }
            Ast::Concat(ref children) => self.compile_concat(children),
            Ast::Alt(ref children) => self.compile_alt(children),
            Ast::Star { ref child, greedy } => self.compile_star(child, greedy),
            Ast::Plus { ref child, greedy } => self.compile_plus(child, greedy),
            Ast::Quest { ref child, greedy } => self.compile_quest(child, greedy),
            Ast::Repeat { ref child, min, max, greedy } => {
                // simplify() lowers every Repeat before the compiler runs;
                // reaching here means an AST was compiled without going
                // through simplify() first.
                let _ = (min, max, greedy);
                self.compile_ast(child)
            }
            Ast::Capture { index, ref child, .. } => self.compile_capture(index, child),
            Ast::EmptyAssert(kind) => self.compile_assert(kind),
        }
    }

    fn compile_nomatch(&mut self) -> Result<Frag, Error> {
        // A Split whose both arms loop back to itself. Any thread that
        // reaches it is immediately deduplicated away on revisit and
        // never produces a successor: a dead end with no dedicated
        // instruction of its own.
        let pc = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
        self.set_split_goto1(pc, pc);
        self.set_split_goto2(pc, pc);
        Ok(Frag { start: pc, hole: Hole::None })
    }

    fn compile_empty(&mut self) -> Result<Frag, Error> {
        // An unconditional epsilon move: both arms of the split lead to
        // the same place, once patched.
        let pc = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
        Ok(Frag { start: pc, hole: Hole::Many(vec![Hole::Goto1(pc), Hole::Goto2(pc)]) })
    }

    fn compile_literal(&mut self, runes: &[char], flags: Flags) -> Result<Frag, Error> {
        let fold = flags.contains(Flags::CASE_FOLD);
        let mut start = None;
        let mut prev_hole = Hole::None;
        for &c in runes {
            let pc = if fold {
                let mut ranges = ClassRanges::single(c);
                for f in unicode::simple_case_fold(c) {
                    ranges.push(f, f);
                }
                ranges.normalize();
                let class = self.intern_class(ranges);
                self.push(Inst::CharClass { goto: 0, class })?
            } else {
                self.push(Inst::Char { goto: 0, c })?
            };
            if start.is_none() {
                start = Some(pc);
            } else {
                self.patch(prev_hole, pc);
            }
            prev_hole = Hole::Goto(pc);
        }
        match start {
            Some(start) => Ok(Frag { start, hole: prev_hole }),
            None => self.compile_empty(),
        }
    }

    fn compile_class(&mut self, ranges: Vec<(char, char)>) -> Result<Frag, Error> {
        if ranges.is_empty() {
            return self.compile_nomatch();
        }
        let class = self.intern_class(ClassRanges::from_ranges(ranges));
        let pc = self.push(Inst::CharClass { goto: 0, class })?;
        Ok(Frag { start: pc, hole: Hole::Goto(pc) })
    }

    fn compile_concat(&mut self, children: &[Ast]) -> Result<Frag, Error> {
        if children.is_empty() {
            return self.compile_empty();
        }
        let mut iter = children.iter();
        let mut frag = self.compile_ast(iter.next().unwrap())?;
        let start = frag.start;
        for child in iter {
            let next = self.compile_ast(child)?;
            self.patch(frag.hole, next.start);
            frag = next;
        }
        Ok(Frag { start, hole: frag.hole })
    }

    fn compile_alt(&mut self, children: &[Ast]) -> Result<Frag, Error> {
        match children.len() {
            0 => self.compile_nomatch(),
            1 => self.compile_ast(&children[0]),
            _ => {
                let first = self.compile_ast(&children[0])?;
                let rest = self.compile_alt(&children[1..])?;
                let split = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
                self.set_split_goto1(split, first.start);
                self.set_split_goto2(split, rest.start);
                Ok(Frag { start: split, hole: Hole::Many(vec![first.hole, rest.hole]) })
            }
        }
    }

    fn compile_star(&mut self, child: &Ast, greedy: bool) -> Result<Frag, Error> {
        let split = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
        let body = self.compile_ast(child)?;
        self.patch(body.hole, split);
        if greedy {
            self.set_split_goto1(split, body.start);
            Ok(Frag { start: split, hole: Hole::Goto2(split) })
        } else {
            self.set_split_goto2(split, body.start);
            Ok(Frag { start: split, hole: Hole::Goto1(split) })
        }
    }

    fn compile_plus(&mut self, child: &Ast, greedy: bool) -> Result<Frag, Error> {
        let body = self.compile_ast(child)?;
        let split = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
        self.patch(body.hole, split);
        if greedy {
            self.set_split_goto1(split, body.start);
            Ok(Frag { start: body.start, hole: Hole::Goto2(split) })
        } else {
            self.set_split_goto2(split, body.start);
            Ok(Frag { start: body.start, hole: Hole::Goto1(split) })
        }
    }

    fn compile_quest(&mut self, child: &Ast, greedy: bool) -> Result<Frag, Error> {
        let split = self.push(Inst::Split { goto1: 0, goto2: 0 })?;
        let body = self.compile_ast(child)?;
        if greedy {
            self.set_split_goto1(split, body.start);
            Ok(Frag { start: split, hole: Hole::Many(vec![body.hole, Hole::Goto2(split)]) })
        } else {
            self.set_split_goto2(split, body.start);
            Ok(Frag { start: split, hole: Hole::Many(vec![body.hole, Hole::Goto1(split)]) })
        }
    }

    fn compile_capture(&mut self, index: u32, child: &Ast) -> Result<Frag, Error> {
        let open = self.push(Inst::Save { goto: 0, slot: 2 * index as usize })?;
        let body = self.compile_ast(child)?;
        self.set_goto(open, body.start);
        let close = self.push(Inst::Save { goto: 0, slot: 2 * index as usize + 1 })?;
        self.patch(body.hole, close);
        Ok(Frag { start: open, hole: Hole::Goto(close) })
    }

    fn compile_assert(&mut self, kind: EmptyAssertKind) -> Result<Frag, Error> {
        let pc = self.push(Inst::EmptyAssert { goto: 0, kind })?;
        Ok(Frag { start: pc, hole: Hole::Goto(pc) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Flags;
    use crate::parse::{parse, ParseLimits};

    fn compile_pattern(pattern: &str) -> Insts {
        let parsed = parse(pattern, Flags::empty(), ParseLimits::default()).unwrap();
        compile(&parsed.ast, parsed.capture_count, pattern, CompileLimits::default()).unwrap()
    }

    #[test]
    fn literal_compiles_to_char_chain() {
        let insts = compile_pattern("ab");
        let chars: Vec<char> = insts
            .iter()
            .filter_map(|i| match *i {
                Inst::Char { c, .. } => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(chars, vec!['a', 'b']);
    }

    #[test]
    fn every_program_ends_reachable_at_match() {
        let insts = compile_pattern("a(b|c)*d");
        assert!(insts.iter().any(|i| matches!(i, Inst::Match)));
    }

    #[test]
    fn empty_pattern_compiles() {
        let insts = compile_pattern("");
        assert!(insts.iter().any(|i| matches!(i, Inst::Match)));
    }

    #[test]
    fn class_is_interned_once_per_use_site() {
        let insts = compile_pattern("[a-z]+");
        let class_ids: Vec<usize> = insts
            .iter()
            .filter_map(|i| match *i {
                Inst::CharClass { class, .. } => Some(class),
                _ => None,
            })
            .collect();
        assert_eq!(class_ids.len(), 1);
    }

    #[test]
    fn too_many_instructions_is_rejected() {
        let parsed = parse("a{1000}", Flags::empty(), ParseLimits::default()).unwrap();
        let limits = CompileLimits { max_instructions: 10 };
        let err = compile(&parsed.ast, parsed.capture_count, "a{1000}", limits).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::PatternTooLarge);
    }
}
