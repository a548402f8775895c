// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The PikeVM: a breadth-first NFA simulation that runs every live
//! thread one rune at a time, in priority order, so that the first
//! thread to reach `Match` is the leftmost-first answer (spec §4.4).
//!
//! Threads are deduplicated per step with the classic dense/sparse set
//! trick: `contains`/`add` are O(1) and `clear` is O(1), so a full
//! epsilon-closure pass costs no more than the number of instructions
//! in the program, which is what keeps the whole simulation linear in
//! `len(program) * len(text)`.
//!
//! Epsilon-closure (`add_thread`) is an explicit stack, not recursion:
//! unlike the historical NFA engine this is grounded on, a pattern with
//! instruction count N must never risk recursing N stack frames deep
//! at match time.

use crate::ast::EmptyAssertKind;
use crate::error::{Error, ErrorKind};
use crate::inst::{Inst, InstIdx, Insts};
use crate::literals::Literals;
use crate::unicode;
use crate::utf8;

/// Per-call knobs (spec §6's `options` enumeration). None of these
/// change *what* the program is; `leftmost_first` is the default and
/// only behavior `exec` implements unless `first_match` is set.
pub struct MatchOptions<'a> {
    /// Polled once per outer position; if it returns `true` the search
    /// stops with `ErrorKind::Canceled`.
    pub cancel: Option<&'a dyn Fn() -> bool>,
    /// Upper bound on the number of live instruction slots the thread
    /// lists may hold. `None` means the program's own instruction count
    /// is the only bound.
    pub max_memory: Option<usize>,
    /// Force anchored-at-`start` behavior for this call regardless of
    /// whether the program's own `\A`/`^`/`Flags::ANCHORED` would imply
    /// it. Never makes an otherwise-matching search fail to restart
    /// when this is `false`; only ever narrows.
    pub anchored: bool,
    /// Stop as soon as any thread reaches `Match`, without letting
    /// still-live higher-priority threads keep running for a better
    /// capture placement (spec §6: "stop at earliest match without
    /// exploring lazier alternatives for capture placement"). Cheaper
    /// than `leftmost_first` when the caller only wants a boolean.
    pub first_match: bool,
}

impl<'a> Default for MatchOptions<'a> {
    fn default() -> MatchOptions<'a> {
        MatchOptions { cancel: None, max_memory: None, anchored: false, first_match: false }
    }
}

/// Run the simulation starting the search no earlier than byte offset
/// `start`. Returns the slot vector of the first (leftmost, then
/// highest-priority) match found, or `None`.
pub fn exec(
    insts: &Insts,
    prefixes: &Literals,
    text: &str,
    start: usize,
    ncaps: usize,
    unicode_word: bool,
    anchored_begin: bool,
    opts: &MatchOptions,
) -> Result<Option<Vec<Option<usize>>>, Error> {
    if let Some(max) = opts.max_memory {
        if insts.len() > max {
            return Err(Error::new(ErrorKind::MemoryBudget, "", 0));
        }
    }

    let bytes = text.as_bytes();
    let mut clist = Threads::new(insts.len(), ncaps);
    let mut nlist = Threads::new(insts.len(), ncaps);
    let mut pos = start.min(bytes.len());
    let mut matched: Option<Vec<Option<usize>>> = None;
    let anchored_begin = anchored_begin || opts.anchored;

    loop {
        if let Some(cancel) = opts.cancel {
            if cancel() {
                return Err(Error::new(ErrorKind::Canceled, "", 0));
            }
        }

        if clist.size == 0 {
            if matched.is_some() || (pos > start && anchored_begin) {
                break;
            }
            if !prefixes.is_empty() {
                match prefixes.find(&bytes[pos..]) {
                    None => break,
                    Some((s, _)) => pos += s,
                }
            }
        }

        // An implicit, unanchored `.*?` prefix: keep seeding a fresh
        // thread at the program's entry point at every position until
        // something matches.
        if clist.size == 0 || (!anchored_begin && matched.is_none()) {
            add_thread(insts, &mut clist, 0, vec![None; 2 * ncaps], pos, bytes, unicode_word);
        }

        let next_pos = match utf8::decode_at(bytes, pos) {
            Some((_, width)) => pos + width,
            None => bytes.len(),
        };

        for i in 0..clist.size {
            let pc = clist.pc(i);
            let caps = clist.caps(i).to_vec();
            match *insts.get(pc) {
                Inst::Match => {
                    matched = Some(caps);
                    if opts.first_match {
                        return Ok(matched);
                    }
                    // Higher-priority threads run before lower-priority
                    // ones in `clist`; once one matches, nothing later
                    // in this step can beat it.
                    break;
                }
                Inst::Char { goto, c } => {
                    if let Some((rune, _)) = utf8::decode_at(bytes, pos) {
                        if rune == c {
                            add_thread(insts, &mut nlist, goto, caps, next_pos, bytes, unicode_word);
                        }
                    }
                }
                Inst::CharClass { goto, class } => {
                    if let Some((rune, _)) = utf8::decode_at(bytes, pos) {
                        if insts.class(class).contains(rune) {
                            add_thread(insts, &mut nlist, goto, caps, next_pos, bytes, unicode_word);
                        }
                    }
                }
                Inst::AnyChar { goto } => {
                    if let Some((rune, _)) = utf8::decode_at(bytes, pos) {
                        if rune != '\n' {
                            add_thread(insts, &mut nlist, goto, caps, next_pos, bytes, unicode_word);
                        }
                    }
                }
                Inst::AnyByteNl { goto } => {
                    if utf8::decode_at(bytes, pos).is_some() {
                        add_thread(insts, &mut nlist, goto, caps, next_pos, bytes, unicode_word);
                    }
                }
                Inst::Save { .. } | Inst::Split { .. } | Inst::EmptyAssert { .. } => {}
            }
        }

        if pos >= bytes.len() {
            break;
        }
        pos = next_pos;
        std::mem::swap(&mut clist, &mut nlist);
        nlist.clear();
    }
    Ok(matched)
}

/// Push `pc` and everything reachable from it by epsilon moves into
/// `list`, skipping anything already present this step.
fn add_thread(
    insts: &Insts,
    list: &mut Threads,
    pc: InstIdx,
    caps: Vec<Option<usize>>,
    pos: usize,
    text: &[u8],
    unicode_word: bool,
) {
    let mut stack = vec![(pc, caps)];
    while let Some((pc, mut caps)) = stack.pop() {
        if list.contains(pc) {
            continue;
        }
        let ti = list.add(pc);
        match *insts.get(pc) {
            Inst::Save { goto, slot } => {
                if slot < caps.len() {
                    caps[slot] = Some(pos);
                }
                stack.push((goto, caps));
            }
            Inst::Split { goto1, goto2 } => {
                // Pushed in reverse so `goto1` (higher priority) is
                // popped, and therefore fully explored, first.
                stack.push((goto2, caps.clone()));
                stack.push((goto1, caps));
            }
            Inst::EmptyAssert { goto, kind } => {
                if assertion_holds(kind, text, pos, unicode_word) {
                    stack.push((goto, caps));
                }
            }
            Inst::Match | Inst::Char { .. } | Inst::CharClass { .. } | Inst::AnyChar { .. } | Inst::AnyByteNl { .. } => {
                list.set_caps(ti, caps);
            }
        }
    }
}

fn assertion_holds(kind: EmptyAssertKind, text: &[u8], pos: usize, unicode_word: bool) -> bool {
    let prev = utf8::prev_rune(text, pos).map(|(c, _)| c);
    let next = utf8::decode_at(text, pos).map(|(c, _)| c);
    match kind {
        EmptyAssertKind::BeginText => prev.is_none(),
        EmptyAssertKind::EndText => next.is_none(),
        EmptyAssertKind::BeginLine => prev.is_none() || prev == Some('\n'),
        EmptyAssertKind::EndLine => next.is_none() || next == Some('\n'),
        EmptyAssertKind::WordBoundary => is_word(prev, unicode_word) != is_word(next, unicode_word),
        EmptyAssertKind::NoWordBoundary => is_word(prev, unicode_word) == is_word(next, unicode_word),
    }
}

fn is_word(c: Option<char>, unicode_word: bool) -> bool {
    match c {
        None => false,
        Some(c) if unicode_word => unicode::is_word_char(c),
        Some(c) => unicode::is_word_char_ascii(c),
    }
}

/// The dense/sparse pair behind one generation of live threads.
struct Threads {
    dense: Vec<Thread>,
    sparse: Vec<usize>,
    size: usize,
}

struct Thread {
    pc: InstIdx,
    caps: Vec<Option<usize>>,
}

impl Threads {
    fn new(num_insts: usize, ncaps: usize) -> Threads {
        let t = Thread { pc: 0, caps: vec![None; 2 * ncaps] };
        Threads { dense: vec![t; num_insts], sparse: vec![0; num_insts], size: 0 }
    }

    fn add(&mut self, pc: InstIdx) -> usize {
        let i = self.size;
        self.dense[i].pc = pc;
        self.sparse[pc] = i;
        self.size += 1;
        i
    }

    fn set_caps(&mut self, i: usize, caps: Vec<Option<usize>>) {
        self.dense[i].caps = caps;
    }

    fn contains(&self, pc: InstIdx) -> bool {
        let s = self.sparse[pc];
        s < self.size && self.dense[s].pc == pc
    }

    fn clear(&mut self) {
        self.size = 0;
    }

    fn pc(&self, i: usize) -> InstIdx {
        self.dense[i].pc
    }

    fn caps(&self, i: usize) -> &[Option<usize>] {
        &self.dense[i].caps
    }
}

impl Clone for Thread {
    fn clone(&self) -> Thread {
        Thread { pc: self.pc, caps: self.caps.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Flags;
    use crate::compile::{compile, CompileLimits};
    use crate::literals::build_prefixes;
    use crate::parse::{parse, ParseLimits};

    fn run(pattern: &str, text: &str, start: usize) -> Option<Vec<Option<usize>>> {
        let parsed = parse(pattern, Flags::empty(), ParseLimits::default()).unwrap();
        let insts = compile(&parsed.ast, parsed.capture_count, pattern, CompileLimits::default()).unwrap();
        let prefixes = build_prefixes(&insts);
        exec(
            &insts,
            &prefixes,
            text,
            start,
            parsed.capture_count as usize,
            false,
            false,
            &MatchOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn literal_match_reports_whole_match_slots() {
        let caps = run("abc", "xxabcyy", 0).unwrap();
        assert_eq!(caps[0], Some(2));
        assert_eq!(caps[1], Some(5));
    }

    #[test]
    fn no_match_returns_none() {
        assert!(run("xyz", "abc", 0).is_none());
    }

    #[test]
    fn leftmost_first_prefers_first_alternative() {
        let caps = run("a|ab", "ab", 0).unwrap();
        assert_eq!((caps[0], caps[1]), (Some(0), Some(1)));
    }

    #[test]
    fn greedy_star_consumes_maximally() {
        let caps = run("a*", "aaa", 0).unwrap();
        assert_eq!((caps[0], caps[1]), (Some(0), Some(3)));
    }

    #[test]
    fn lazy_star_consumes_minimally() {
        let caps = run("a*?", "aaa", 0).unwrap();
        assert_eq!((caps[0], caps[1]), (Some(0), Some(0)));
    }

    #[test]
    fn captures_record_group_boundaries() {
        let caps = run("(a)(b)", "ab", 0).unwrap();
        assert_eq!(caps, vec![Some(0), Some(2), Some(0), Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn zero_width_star_terminates() {
        // `()*` loops on an empty-matching body; the engine must not
        // spin forever re-adding the same pc.
        let caps = run("()*", "", 0).unwrap();
        assert_eq!((caps[0], caps[1]), (Some(0), Some(0)));
    }

    #[test]
    fn anchored_option_rejects_a_match_that_starts_later() {
        let parsed = parse("bc", Flags::empty(), ParseLimits::default()).unwrap();
        let insts = compile(&parsed.ast, parsed.capture_count, "bc", CompileLimits::default()).unwrap();
        let prefixes = build_prefixes(&insts);
        let opts = MatchOptions { anchored: true, ..MatchOptions::default() };
        let result = exec(&insts, &prefixes, "abc", 0, parsed.capture_count as usize, false, false, &opts).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn first_match_option_still_finds_a_match() {
        let parsed = parse("a+", Flags::empty(), ParseLimits::default()).unwrap();
        let insts = compile(&parsed.ast, parsed.capture_count, "a+", CompileLimits::default()).unwrap();
        let prefixes = build_prefixes(&insts);
        let opts = MatchOptions { first_match: true, ..MatchOptions::default() };
        let result =
            exec(&insts, &prefixes, "xaaay", 0, parsed.capture_count as usize, false, false, &opts).unwrap();
        assert!(result.is_some());
    }
}
