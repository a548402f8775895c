// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The parser (spec §4.1): recursive descent by precedence
//! `Alt > Concat > Quantifier > Atom`, carrying a mutable cursor (byte
//! offset, active flag set, next capture index) rather than recursing
//! through a borrowed slice, so error offsets are always reported in
//! terms of the original pattern.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::ast::{Ast, EmptyAssertKind, Flags, RepeatMax};
use crate::classes::ClassRanges;
use crate::error::{Error, ErrorKind};
use crate::unicode;

/// Limits enforced by the parser (spec §4.1, §7).
#[derive(Clone, Copy, Debug)]
pub struct ParseLimits {
    pub max_depth: usize,
    pub max_repeat: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits { max_depth: 1000, max_repeat: 1000 }
    }
}

/// The parser's output: the simplified AST plus bookkeeping the
/// compiler needs (total capture count, name table).
pub struct Parsed {
    pub ast: Ast,
    pub capture_count: u32,
    pub named_captures: HashMap<String, u32>,
}

pub fn parse(pattern: &str, flags: Flags, limits: ParseLimits) -> Result<Parsed, Error> {
    let mut p = Parser {
        pattern,
        pos: 0,
        flags,
        next_capture: 1,
        named: HashMap::new(),
        seen_names: HashSet::new(),
        depth: 0,
        limits,
    };
    let ast = p.parse_alt()?;
    if p.pos != pattern.len() {
        // An unconsumed `)` at top level.
        return Err(p.err(ErrorKind::UnexpectedParen));
    }
    let ast = ast.simplify();
    Ok(Parsed { ast, capture_count: p.next_capture, named_captures: p.named })
}

struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    flags: Flags,
    next_capture: u32,
    named: HashMap<String, u32>,
    seen_names: HashSet<String>,
    depth: usize,
    limits: ParseLimits,
}

impl<'a> Parser<'a> {
    fn err(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.pattern, self.pos)
    }

    fn err_at(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::new(kind, self.pattern, offset)
    }

    fn eof(&self) -> bool {
        self.pos >= self.pattern.len()
    }

    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.pattern[self.pos..].chars();
        it.next();
        it.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(self.err(ErrorKind::TooDeep));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // Alt = Concat ('|' Concat)*
    fn parse_alt(&mut self) -> Result<Ast, Error> {
        self.enter()?;
        let mut branches = vec![self.parse_concat()?];
        while self.eat('|') {
            branches.push(self.parse_concat()?);
        }
        self.leave();
        Ok(if branches.len() == 1 { branches.pop().unwrap() } else { Ast::Alt(branches) })
    }

    // Concat = Quantified*
    fn parse_concat(&mut self) -> Result<Ast, Error> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                None | Some('|') | Some(')') => break,
                _ => parts.push(self.parse_quantified()?),
            }
        }
        Ok(match parts.len() {
            0 => Ast::EmptyMatch,
            1 => parts.pop().unwrap(),
            _ => Ast::Concat(parts),
        })
    }

    // Quantified = Atom Quantifier?
    fn parse_quantified(&mut self) -> Result<Ast, Error> {
        let atom = self.parse_atom()?;
        self.parse_quantifier(atom)
    }

    fn parse_quantifier(&mut self, atom: Ast) -> Result<Ast, Error> {
        let start = self.pos;
        enum Kind {
            Star,
            Plus,
            Quest,
            Brace(u32, RepeatMax),
        }
        let kind = match self.peek() {
            Some('*') => {
                self.bump();
                Kind::Star
            }
            Some('+') => {
                self.bump();
                Kind::Plus
            }
            Some('?') => {
                self.bump();
                Kind::Quest
            }
            Some('{') => match self.try_parse_brace(start)? {
                Some((min, max)) => Kind::Brace(min, max),
                None => return Ok(atom),
            },
            _ => return Ok(atom),
        };
        if let Kind::Brace(min, max) = &kind {
            if let RepeatMax::Bounded(n) = max {
                if *n < *min {
                    return Err(self.err_at(ErrorKind::InvalidRepeatSize, start));
                }
            }
            if *min > self.limits.max_repeat
                || matches!(max, RepeatMax::Bounded(n) if *n > self.limits.max_repeat)
            {
                return Err(self.err_at(ErrorKind::BadRepeatSize, start));
            }
        }
        if matches!(self.peek(), Some('*') | Some('+')) {
            return Err(self.err(ErrorKind::BadRepeatOp));
        }
        let greedy = !self.eat('?') ^ self.flags.contains(Flags::UNGREEDY);
        let quantified = match kind {
            Kind::Star => Ast::Star { child: Box::new(atom), greedy },
            Kind::Plus => Ast::Plus { child: Box::new(atom), greedy },
            Kind::Quest => Ast::Quest { child: Box::new(atom), greedy },
            Kind::Brace(min, max) => Ast::Repeat { child: Box::new(atom), min, max, greedy },
        };
        // Disallow stacking a second quantifier directly (e.g. `a**`).
        if matches!(self.peek(), Some('*') | Some('+') | Some('{')) {
            return Err(self.err(ErrorKind::BadRepeatOp));
        }
        Ok(quantified)
    }

    /// Try to parse `{m}` / `{m,}` / `{m,n}` starting at `{`. If the
    /// brace doesn't parse as a repeat (e.g. a literal `{` with no
    /// matching form), returns `Ok(None)` and leaves `self.pos` where it
    /// was: RE2 treats a malformed `{...}` as a literal `{`.
    fn try_parse_brace(&mut self, start: usize) -> Result<Option<(u32, RepeatMax)>, Error> {
        let save = self.pos;
        self.bump(); // '{'
        let min = self.parse_decimal();
        let min = match min {
            Some(n) => n,
            None => {
                self.pos = save;
                return Ok(None);
            }
        };
        let max = if self.eat(',') {
            match self.parse_decimal() {
                Some(n) => RepeatMax::Bounded(n),
                None => RepeatMax::Unbounded,
            }
        } else {
            RepeatMax::Bounded(min)
        };
        if !self.eat('}') {
            self.pos = save;
            return Ok(None);
        }
        let _ = start;
        Ok(Some((min, max)))
    }

    fn parse_decimal(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == start {
            return None;
        }
        self.pattern[start..self.pos].parse().ok()
    }

    fn parse_atom(&mut self) -> Result<Ast, Error> {
        let start = self.pos;
        match self.peek() {
            None => Err(self.err(ErrorKind::InternalError)),
            Some('(') => self.parse_group(),
            Some('[') => self.parse_class().map(class_to_ast(self.flags)),
            Some('.') => {
                self.bump();
                Ok(if self.flags.contains(Flags::DOT_ALL) {
                    Ast::AnyByte { flags: self.flags }
                } else {
                    Ast::AnyChar { flags: self.flags }
                })
            }
            Some('^') => {
                self.bump();
                Ok(Ast::EmptyAssert(if self.flags.contains(Flags::MULTI_LINE) {
                    EmptyAssertKind::BeginLine
                } else {
                    EmptyAssertKind::BeginText
                }))
            }
            Some('$') => {
                self.bump();
                Ok(Ast::EmptyAssert(if self.flags.contains(Flags::MULTI_LINE) {
                    EmptyAssertKind::EndLine
                } else {
                    EmptyAssertKind::EndText
                }))
            }
            Some(')') => Err(self.err(ErrorKind::UnexpectedParen)),
            Some('*') | Some('+') | Some('?') => Err(self.err(ErrorKind::BadRepeatOp)),
            Some('\\') => self.parse_escape(),
            Some(c) => {
                self.bump();
                let _ = start;
                Ok(literal(c, self.flags))
            }
        }
    }

    fn parse_escape(&mut self) -> Result<Ast, Error> {
        let start = self.pos;
        self.bump(); // '\'
        let c = match self.peek() {
            None => return Err(self.err_at(ErrorKind::TrailingBackslash, start)),
            Some(c) => c,
        };
        match c {
            'A' => {
                self.bump();
                Ok(Ast::EmptyAssert(EmptyAssertKind::BeginText))
            }
            'z' => {
                self.bump();
                Ok(Ast::EmptyAssert(EmptyAssertKind::EndText))
            }
            'b' => {
                self.bump();
                Ok(Ast::EmptyAssert(EmptyAssertKind::WordBoundary))
            }
            'B' => {
                self.bump();
                Ok(Ast::EmptyAssert(EmptyAssertKind::NoWordBoundary))
            }
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                self.bump();
                let base = match c.to_ascii_lowercase() {
                    'd' => unicode::perl_digit(),
                    's' => unicode::perl_space(),
                    'w' => unicode::perl_word(),
                    _ => unreachable!(),
                };
                let negated = c.is_uppercase();
                Ok(class_to_ast(self.flags)(finish_class(base, negated, self.flags)))
            }
            'p' | 'P' => self.parse_unicode_class(),
            _ => {
                self.bump();
                match escape_literal(c) {
                    Some(lit) => Ok(literal(lit, self.flags)),
                    None if is_ascii_punct(c) => Ok(literal(c, self.flags)),
                    None => Err(self.err_at(ErrorKind::BadEscape, start)),
                }
            }
        }
    }

    fn parse_unicode_class(&mut self) -> Result<Ast, Error> {
        let start = self.pos;
        let negate_escape = self.bump() == Some('P');
        let name = if self.eat('{') {
            let name_start = self.pos;
            while self.peek().map_or(false, |c| c != '}') {
                self.bump();
            }
            if !self.eat('}') {
                return Err(self.err_at(ErrorKind::BadCharClass, start));
            }
            self.pattern[name_start..self.pos - 1].to_string()
        } else {
            match self.bump() {
                Some(c) => c.to_string(),
                None => return Err(self.err_at(ErrorKind::BadCharClass, start)),
            }
        };
        let (mut name_ref, mut local_negate) = (name.as_str(), false);
        if let Some(stripped) = name_ref.strip_prefix('^') {
            name_ref = stripped;
            local_negate = true;
        }
        let base = unicode::general_category(name_ref)
            .or_else(|| unicode::script(name_ref))
            .ok_or_else(|| self.err_at(ErrorKind::BadCharClass, start))?;
        let negated = negate_escape ^ local_negate;
        Ok(class_to_ast(self.flags)(finish_class(base, negated, self.flags)))
    }

    fn parse_class(&mut self) -> Result<ClassRanges, Error> {
        let start = self.pos;
        self.bump(); // '['
        let negated = self.eat('^');
        let mut ranges: Vec<(char, char)> = Vec::new();
        let mut first = true;
        loop {
            match self.peek() {
                None => return Err(self.err_at(ErrorKind::MissingBracket, start)),
                Some(']') if !first => {
                    self.bump();
                    break;
                }
                Some('[') if self.peek2() == Some(':') => {
                    ranges.extend(self.parse_posix_class()?.ranges());
                }
                _ => {
                    let lo = self.parse_class_char()?;
                    if self.peek() == Some('-') && self.peek2() != Some(']') && self.peek2().is_some() {
                        self.bump(); // '-'
                        let hi = self.parse_class_char()?;
                        if hi < lo {
                            return Err(self.err_at(ErrorKind::InvalidCharRange, start));
                        }
                        ranges.push((lo, hi));
                    } else {
                        ranges.push((lo, lo));
                    }
                }
            }
            first = false;
        }
        let mut class = ClassRanges::from_ranges(ranges);
        if self.flags.contains(Flags::CASE_FOLD) {
            class = class.case_fold();
        }
        if negated {
            class = class.negate();
        }
        Ok(class)
    }

    fn parse_posix_class(&mut self) -> Result<ClassRanges, Error> {
        let start = self.pos;
        self.bump(); // '['
        self.bump(); // ':'
        let negated = self.eat('^');
        let name_start = self.pos;
        while self.peek().map_or(false, |c| c != ':') {
            self.bump();
        }
        let name = &self.pattern[name_start..self.pos];
        if !self.eat(':') || !self.eat(']') {
            return Err(self.err_at(ErrorKind::BadCharClass, start));
        }
        let base = unicode::posix_class(name).ok_or_else(|| self.err_at(ErrorKind::BadCharClass, start))?;
        Ok(if negated { base.negate() } else { base })
    }

    /// Parse a single char inside a class, handling escapes (a reduced
    /// set compared to top-level escapes: Perl/Unicode classes aren't
    /// legal here as range endpoints, only as standalone class members,
    /// which `parse_class` handles by falling back to this for a single
    /// escaped char).
    fn parse_class_char(&mut self) -> Result<char, Error> {
        let start = self.pos;
        if self.peek() == Some('\\') {
            self.bump();
            let c = self.bump().ok_or_else(|| self.err_at(ErrorKind::TrailingBackslash, start))?;
            return escape_literal(c)
                .or_else(|| if is_ascii_punct(c) { Some(c) } else { None })
                .ok_or_else(|| self.err_at(ErrorKind::BadEscape, start));
        }
        self.bump().ok_or_else(|| self.err_at(ErrorKind::MissingBracket, start))
    }

    fn parse_group(&mut self) -> Result<Ast, Error> {
        self.enter()?;
        let start = self.pos;
        self.bump(); // '('
        let result = self.parse_group_body(start);
        self.leave();
        result
    }

    fn parse_group_body(&mut self, start: usize) -> Result<Ast, Error> {
        if self.eat('?') {
            if self.eat(':') {
                let saved = self.flags;
                let inner = self.parse_alt()?;
                self.flags = saved;
                if !self.eat(')') {
                    return Err(self.err_at(ErrorKind::MissingParen, start));
                }
                return Ok(inner);
            }
            if self.peek() == Some('P') && self.peek2() == Some('<') {
                self.bump();
                self.bump();
                let name_start = self.pos;
                while self.peek().map_or(false, |c| c != '>') {
                    self.bump();
                }
                if !self.eat('>') {
                    return Err(self.err_at(ErrorKind::MissingParen, start));
                }
                let name = self.pattern[name_start..self.pos - 1].to_string();
                if !self.seen_names.insert(name.clone()) {
                    return Err(self.err_at(ErrorKind::DuplicateCaptureName, name_start));
                }
                let index = self.next_capture;
                self.next_capture += 1;
                self.named.insert(name.clone(), index);
                let saved = self.flags;
                let inner = self.parse_alt()?;
                self.flags = saved;
                if !self.eat(')') {
                    return Err(self.err_at(ErrorKind::MissingParen, start));
                }
                return Ok(Ast::Capture { index, name: Some(name), child: Box::new(inner) });
            }
            // (?flags) or (?flags:...)
            let saved = self.flags;
            let mut new_flags = self.flags;
            let mut invert = false;
            let mut saw_any = false;
            loop {
                match self.peek() {
                    Some('-') => {
                        invert = true;
                        self.bump();
                    }
                    Some('i') => {
                        set_flag(&mut new_flags, Flags::CASE_FOLD, invert);
                        saw_any = true;
                        self.bump();
                    }
                    Some('m') => {
                        set_flag(&mut new_flags, Flags::MULTI_LINE, invert);
                        saw_any = true;
                        self.bump();
                    }
                    Some('s') => {
                        set_flag(&mut new_flags, Flags::DOT_ALL, invert);
                        saw_any = true;
                        self.bump();
                    }
                    Some('U') => {
                        set_flag(&mut new_flags, Flags::UNGREEDY, invert);
                        saw_any = true;
                        self.bump();
                    }
                    Some(':') | Some(')') => break,
                    _ => return Err(self.err(ErrorKind::UnrecognizedFlag)),
                }
            }
            if !saw_any && !invert {
                return Err(self.err_at(ErrorKind::UnrecognizedFlag, start));
            }
            if self.eat(':') {
                self.flags = new_flags;
                let inner = self.parse_alt()?;
                self.flags = saved;
                if !self.eat(')') {
                    return Err(self.err_at(ErrorKind::MissingParen, start));
                }
                return Ok(inner);
            }
            if self.eat(')') {
                self.flags = new_flags;
                return Ok(Ast::EmptyMatch);
            }
            return Err(self.err_at(ErrorKind::MissingParen, start));
        }
        // A plain capturing group. Inline flags set inside (`a(?i)b`)
        // must not leak past this group's own closing paren.
        let index = self.next_capture;
        self.next_capture += 1;
        let saved = self.flags;
        let inner = self.parse_alt()?;
        self.flags = saved;
        if !self.eat(')') {
            return Err(self.err_at(ErrorKind::MissingParen, start));
        }
        Ok(Ast::Capture { index, name: None, child: Box::new(inner) })
    }
}

fn set_flag(flags: &mut Flags, bit: Flags, invert: bool) {
    if invert {
        flags.remove(bit);
    } else {
        flags.insert(bit);
    }
}

fn class_to_ast(flags: Flags) -> impl Fn(ClassRanges) -> Ast {
    move |class| {
        if class.is_empty() {
            Ast::NoMatch
        } else {
            Ast::CharClass { ranges: class.ranges().to_vec(), negated: false, flags }
        }
    }
}

fn finish_class(base: ClassRanges, negated: bool, flags: Flags) -> ClassRanges {
    let mut class = if flags.contains(Flags::CASE_FOLD) { base.case_fold() } else { base };
    if negated {
        class = class.negate();
    }
    class
}

fn literal(c: char, flags: Flags) -> Ast {
    if flags.contains(Flags::CASE_FOLD) {
        let mut ranges = vec![(c, c)];
        for folded in unicode::simple_case_fold(c) {
            ranges.push((folded, folded));
        }
        let class = ClassRanges::from_ranges(ranges);
        Ast::CharClass { ranges: class.ranges().to_vec(), negated: false, flags }
    } else {
        Ast::Literal { runes: vec![c], flags }
    }
}

fn escape_literal(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\u{C}',
        'v' => '\u{B}',
        'a' => '\u{7}',
        '\\' => '\\',
        '.' => '.',
        '*' => '*',
        '+' => '+',
        '?' => '?',
        '(' => '(',
        ')' => ')',
        '[' => '[',
        ']' => ']',
        '{' => '{',
        '}' => '}',
        '|' => '|',
        '^' => '^',
        '$' => '$',
        _ => return None,
    })
}

fn is_ascii_punct(c: char) -> bool {
    c.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(pattern: &str) -> Result<Ast, Error> {
        parse(pattern, Flags::empty(), ParseLimits::default()).map(|p| p.ast)
    }

    #[test]
    fn literal_concat() {
        assert_eq!(parse_default("abc").unwrap(), Ast::Literal { runes: vec!['a', 'b', 'c'], flags: Flags::empty() });
    }

    #[test]
    fn alternation() {
        match parse_default("a|b").unwrap() {
            Ast::Alt(v) => assert_eq!(v.len(), 2),
            other => panic!("expected Alt, got {:?}", other),
        }
    }

    #[test]
    fn capture_indices_left_to_right() {
        let parsed = parse("a(b)(c(d))", Flags::empty(), ParseLimits::default()).unwrap();
        assert_eq!(parsed.capture_count, 4); // 0 implicit + 3 explicit
    }

    #[test]
    fn named_capture() {
        let parsed = parse("(?P<year>\\d{4})", Flags::empty(), ParseLimits::default()).unwrap();
        assert_eq!(parsed.named_captures.get("year"), Some(&1));
    }

    #[test]
    fn duplicate_name_rejected() {
        let e = parse("(?P<x>a)(?P<x>b)", Flags::empty(), ParseLimits::default()).unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::DuplicateCaptureName);
    }

    #[test]
    fn unclosed_group() {
        let e = parse_default("(a").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::MissingParen);
    }

    #[test]
    fn unclosed_class() {
        let e = parse_default("[a").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::MissingBracket);
    }

    #[test]
    fn trailing_backslash() {
        let e = parse_default("a\\").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::TrailingBackslash);
    }

    #[test]
    fn bad_repeat_size() {
        let e = parse_default("a{3,1}").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::InvalidRepeatSize);
    }

    #[test]
    fn perl_class_digit() {
        match parse_default("\\d").unwrap() {
            Ast::CharClass { ranges, .. } => assert_eq!(ranges, vec![('0', '9')]),
            other => panic!("expected CharClass, got {:?}", other),
        }
    }

    #[test]
    fn unicode_script_class() {
        match parse_default("\\p{Greek}").unwrap() {
            Ast::CharClass { .. } => {}
            other => panic!("expected CharClass, got {:?}", other),
        }
    }

    #[test]
    fn unknown_unicode_class_errors() {
        let e = parse_default("\\p{NotAThing}").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::BadCharClass);
    }

    #[test]
    fn repeat_lowering_exact() {
        // a{3} lowers to Concat(a, a, a)
        match parse_default("a{3}").unwrap() {
            Ast::Concat(v) => assert_eq!(v.len(), 3),
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn repeat_lowering_zero() {
        assert_eq!(parse_default("a{0}").unwrap(), Ast::EmptyMatch);
    }

    #[test]
    fn too_deep_nesting_rejected() {
        let pattern = "(".repeat(1001) + &")".repeat(1001);
        let e = parse_default(&pattern).unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::TooDeep);
    }

    #[test]
    fn inline_flag_does_not_leak_past_capturing_group_close() {
        // `(?i)` inside `(a(?i)b)` scopes to the rest of that group only;
        // the literal `c` after the group closes must stay case-sensitive.
        match parse_default("(a(?i)b)c").unwrap() {
            Ast::Concat(v) => match v.last().unwrap() {
                Ast::Literal { runes, flags } => {
                    assert_eq!(runes, &['c']);
                    assert!(!flags.contains(Flags::CASE_FOLD));
                }
                other => panic!("expected trailing literal 'c', got {:?}", other),
            },
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn inline_flag_does_not_leak_past_named_group_close() {
        match parse_default("(?P<x>a(?i)b)c").unwrap() {
            Ast::Concat(v) => match v.last().unwrap() {
                Ast::Literal { runes, flags } => {
                    assert_eq!(runes, &['c']);
                    assert!(!flags.contains(Flags::CASE_FOLD));
                }
                other => panic!("expected trailing literal 'c', got {:?}", other),
            },
            other => panic!("expected Concat, got {:?}", other),
        }
    }
}
