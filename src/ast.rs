// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The AST produced by the parser (spec §3): a tagged sum type, one
//! variant per operator, each carrying exactly the fields that operator
//! needs. There is no generic/untyped node (spec §9).

use std::collections::HashMap;

bitflags::bitflags! {
    /// Per-node flags, propagated top-down from the parser's active flag
    /// set at the point each node was built. `UNICODE` and `ANCHORED`
    /// are whole-pattern flags rather than per-node ones (there is no
    /// inline `(?...)` letter for either, matching RE2); they are read
    /// straight off the flags the caller passed to `compile`, not off
    /// any particular AST node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const CASE_FOLD    = 1 << 0;
        const MULTI_LINE   = 1 << 1;
        const DOT_ALL      = 1 << 2;
        const UNGREEDY     = 1 << 3;
        const UNICODE      = 1 << 4;
        const ANCHORED     = 1 << 5;
    }
}

/// A zero-width assertion kind (spec §3, §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyAssertKind {
    BeginText,
    EndText,
    BeginLine,
    EndLine,
    WordBoundary,
    NoWordBoundary,
}

/// The repeat upper bound: a specific count, or unbounded (`*`/`+`/`{m,}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatMax {
    Bounded(u32),
    Unbounded,
}

/// The abstract syntax tree of a pattern, after parsing and
/// simplification (spec §3, §4.1).
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// Matches nothing, ever. Produced when a character class normalizes
    /// to empty, among other degenerate cases.
    NoMatch,
    /// Matches the empty string unconditionally.
    EmptyMatch,
    /// A run of consecutive literal runes (adjacent literals with equal
    /// flags are merged into one node during simplification).
    Literal { runes: Vec<char>, flags: Flags },
    /// A character class: sorted non-overlapping ranges. Case-folding and
    /// negation have already been resolved into `ranges` by the parser;
    /// `negated` records whether the class was written with `^`. for
    /// fidelity/debugging, not further use.
    CharClass { ranges: Vec<(char, char)>, negated: bool, flags: Flags },
    /// `.` — any rune except newline unless `DOT_ALL` is set.
    AnyChar { flags: Flags },
    /// `.` under `(?s)` — any rune, including newline.
    AnyByte { flags: Flags },
    Concat(Vec<Ast>),
    Alt(Vec<Ast>),
    Star { child: Box<Ast>, greedy: bool },
    Plus { child: Box<Ast>, greedy: bool },
    Quest { child: Box<Ast>, greedy: bool },
    /// `{m,n}` (or `{m,}`/`{m}`) before lowering. The simplifier (§4.1)
    /// rewrites every `Repeat` into `Concat`/`Star`/`Quest` before the
    /// compiler ever sees it, so the compiler never matches on this
    /// variant; it exists so the parser has a node to build before
    /// lowering and so tests can assert the lowering is correct.
    Repeat { child: Box<Ast>, min: u32, max: RepeatMax, greedy: bool },
    Capture { index: u32, name: Option<String>, child: Box<Ast> },
    EmptyAssert(EmptyAssertKind),
}

impl Ast {
    /// Lower a `Repeat` node into the `Concat`/`Star`/`Quest` expansion
    /// described in spec §4.1. Leaves all other variants alone (but
    /// recurses into children so nested repeats are lowered too).
    pub fn simplify(self) -> Ast {
        match self {
            Ast::Repeat { child, min, max, greedy } => {
                let child = child.simplify();
                lower_repeat(child, min, max, greedy)
            }
            Ast::Concat(children) => {
                let mut out: Vec<Ast> = children.into_iter().map(Ast::simplify).collect();
                out.retain(|a| !matches!(a, Ast::EmptyMatch));
                merge_adjacent_literals(&mut out);
                match out.len() {
                    0 => Ast::EmptyMatch,
                    1 => out.into_iter().next().unwrap(),
                    _ => Ast::Concat(out),
                }
            }
            Ast::Alt(children) => {
                let out: Vec<Ast> = children.into_iter().map(Ast::simplify).collect();
                if out.len() == 1 {
                    out.into_iter().next().unwrap()
                } else {
                    Ast::Alt(out)
                }
            }
            Ast::Star { child, greedy } => Ast::Star { child: Box::new(child.simplify()), greedy },
            Ast::Plus { child, greedy } => Ast::Plus { child: Box::new(child.simplify()), greedy },
            Ast::Quest { child, greedy } => Ast::Quest { child: Box::new(child.simplify()), greedy },
            Ast::Capture { index, name, child } => {
                Ast::Capture { index, name, child: Box::new(child.simplify()) }
            }
            other => other,
        }
    }
}

/// `X{m,n}` lowering (spec §4.1):
/// - `X{0}` -> EmptyMatch
/// - `X{1}` -> X
/// - `X{m,m}` -> m-fold Concat of X
/// - `X{m,n}` (m<n) -> X{m} Concat (n-m) copies of X?
/// - `X{m,}` -> X{m} Concat X*
fn lower_repeat(child: Ast, min: u32, max: RepeatMax, greedy: bool) -> Ast {
    match max {
        RepeatMax::Bounded(max) if max == 0 && min == 0 => Ast::EmptyMatch,
        RepeatMax::Bounded(n) if min == 1 && n == 1 => child,
        RepeatMax::Bounded(n) => {
            let mut parts = Vec::new();
            for _ in 0..min {
                parts.push(child.clone());
            }
            for _ in min..n {
                parts.push(Ast::Quest { child: Box::new(child.clone()), greedy });
            }
            concat(parts)
        }
        RepeatMax::Unbounded if min == 0 => Ast::Star { child: Box::new(child), greedy },
        RepeatMax::Unbounded => {
            let mut parts = Vec::new();
            for _ in 0..min {
                parts.push(child.clone());
            }
            parts.push(Ast::Star { child: Box::new(child), greedy });
            concat(parts)
        }
    }
}

fn concat(mut parts: Vec<Ast>) -> Ast {
    parts.retain(|a| !matches!(a, Ast::EmptyMatch));
    match parts.len() {
        0 => Ast::EmptyMatch,
        1 => parts.into_iter().next().unwrap(),
        _ => Ast::Concat(parts),
    }
}

/// Fold consecutive `Literal` siblings that share the same flags into a
/// single node (spec §4.1: "adjacent literal runes concatenate into a
/// single Literal"). Literals separated by a different flag set (e.g.
/// one side case-folded via `(?i)`, the other not) are left distinct,
/// since `compile_literal` compiles every rune in a node under one
/// shared flag set.
fn merge_adjacent_literals(nodes: &mut Vec<Ast>) {
    let mut merged: Vec<Ast> = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        match (merged.last_mut(), node) {
            (
                Some(Ast::Literal { runes: prev_runes, flags: prev_flags }),
                Ast::Literal { runes, flags },
            ) if *prev_flags == flags => {
                prev_runes.extend(runes);
            }
            (_, node) => merged.push(node),
        }
    }
    *nodes = merged;
}

/// The name -> capture-index table built while parsing.
pub type NamedCaptures = HashMap<String, u32>;
