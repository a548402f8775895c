// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `Program`: a compiled, immutable regular expression (spec §5).
//!
//! Unlike the matching engine this crate is grounded on, `Program`
//! caches nothing between calls — no `Pool` of reusable thread-lists or
//! backtracking state. Every call to `find_at` allocates its own
//! simulator state and frees it on return, which is what keeps
//! `Program` plain old `Send + Sync` data with no interior mutability.

use std::collections::HashMap;

use crate::ast::{EmptyAssertKind, Flags};
use crate::compile::{self, CompileLimits};
use crate::error::Error;
use crate::inst::{Inst, Insts};
use crate::literals::{self, Literals};
use crate::parse::{self, ParseLimits};
use crate::pikevm::{self, MatchOptions};

/// Limits enforced while turning a pattern into a `Program`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Limits {
    pub parse: ParseLimits,
    pub compile: CompileLimits,
}

/// A compiled regular expression.
#[derive(Clone, Debug)]
pub struct Program {
    original: String,
    insts: Insts,
    named_captures: HashMap<String, u32>,
    capture_count: u32,
    flags: Flags,
    prefixes: Literals,
    anchored_begin: bool,
    anchored_end: bool,
}

impl Program {
    /// Parse and compile `pattern` under `flags`, using `limits` to
    /// bound both stages.
    pub fn new(pattern: &str, flags: Flags, limits: Limits) -> Result<Program, Error> {
        let parsed = parse::parse(pattern, flags, limits.parse)?;
        let insts = compile::compile(&parsed.ast, parsed.capture_count, pattern, limits.compile)?;
        let prefixes = literals::build_prefixes(&insts);
        // `Flags::ANCHORED` (spec §6) forces anchored-at-0 behavior even
        // when the pattern text itself carries no `\A`/`^` the structural
        // check below would notice.
        let anchored_begin = is_anchored_begin(&insts) || flags.contains(Flags::ANCHORED);
        let anchored_end = is_anchored_end(&insts);
        Ok(Program {
            original: pattern.to_string(),
            insts,
            named_captures: parsed.named_captures,
            capture_count: parsed.capture_count,
            flags,
            prefixes,
            anchored_begin,
            anchored_end,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn capture_count(&self) -> usize {
        self.capture_count as usize
    }

    pub fn capture_index(&self, name: &str) -> Option<usize> {
        self.named_captures.get(name).map(|&i| i as usize)
    }

    pub fn anchored_begin(&self) -> bool {
        self.anchored_begin
    }

    pub fn anchored_end(&self) -> bool {
        self.anchored_end
    }

    /// Run the simulator starting no earlier than byte offset `start`,
    /// returning the raw capture-slot vector of the best match, if any.
    pub fn find_at(&self, text: &str, start: usize, opts: &MatchOptions) -> Result<Option<Vec<Option<usize>>>, Error> {
        pikevm::exec(
            &self.insts,
            &self.prefixes,
            text,
            start,
            self.capture_count as usize,
            self.flags.contains(Flags::UNICODE),
            self.anchored_begin,
            opts,
        )
    }

    pub fn is_match(&self, text: &str) -> bool {
        let opts = MatchOptions { first_match: true, ..MatchOptions::default() };
        self.find_at(text, 0, &opts).unwrap_or(None).is_some()
    }

    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        self.find_at(text, 0, &MatchOptions::default())
            .unwrap_or(None)
            .and_then(|caps| Some((caps[0]?, caps[1]?)))
    }
}

/// True when every path into the program reaches its body through a
/// `\A`/`^`-without-multiline assertion, so no scan before position 0
/// can ever succeed.
fn is_anchored_begin(insts: &Insts) -> bool {
    let pc = insts.skip_saves(0);
    matches!(insts.get(pc), Inst::EmptyAssert { kind: EmptyAssertKind::BeginText, .. })
}

/// A structural heuristic, not a full analysis: true only when the
/// instruction immediately preceding the program's closing `Save` is a
/// `\z`/`$`-without-multiline assertion that feeds it directly. Good
/// enough to skip trailing-unanchored bookkeeping in the common case
/// (`foo$`); patterns that reach the end through other paths (e.g.
/// `a$|b`) are conservatively reported as not end-anchored.
fn is_anchored_end(insts: &Insts) -> bool {
    if insts.len() < 2 {
        return false;
    }
    let close_pc = insts.len() - 2;
    if close_pc == 0 {
        return false;
    }
    matches!(
        insts.get(close_pc - 1),
        Inst::EmptyAssert { kind: EmptyAssertKind::EndText, goto } if *goto == close_pc
    )
}
