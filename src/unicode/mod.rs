// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Unicode data consulted only at compile time (spec §4.2): general
//! categories, scripts, simple case-folding, and the Unicode-aware
//! word-character test used by `\b`/`\w` under the `Unicode` flag.

mod tables;

use crate::classes::ClassRanges;

fn ranges(r: tables::Ranges) -> ClassRanges {
    ClassRanges::from_ranges(r.to_vec())
}

/// Resolve a general-category name (`L`, `Lu`, `N`, `Nd`, ...) to its
/// range table. Two-letter forms and their parent one-letter category are
/// both recognized; the one-letter form is the union of its children.
pub fn general_category(name: &str) -> Option<ClassRanges> {
    use tables::*;
    Some(match name {
        "Lu" => ranges(UPPERCASE_LETTER),
        "Ll" => ranges(LOWERCASE_LETTER),
        "Lt" => ranges(TITLECASE_LETTER),
        "Lm" => ranges(MODIFIER_LETTER),
        "Lo" => ranges(OTHER_LETTER),
        "L" => ranges(UPPERCASE_LETTER)
            .union(&ranges(LOWERCASE_LETTER))
            .union(&ranges(TITLECASE_LETTER))
            .union(&ranges(MODIFIER_LETTER))
            .union(&ranges(OTHER_LETTER)),
        "Mn" => ranges(NONSPACING_MARK),
        "Mc" => ranges(SPACING_MARK),
        "Me" => ranges(ENCLOSING_MARK),
        "M" => ranges(NONSPACING_MARK).union(&ranges(SPACING_MARK)).union(&ranges(ENCLOSING_MARK)),
        "Nd" => ranges(DECIMAL_NUMBER),
        "Nl" => ranges(LETTER_NUMBER),
        "No" => ranges(OTHER_NUMBER),
        "N" => ranges(DECIMAL_NUMBER).union(&ranges(LETTER_NUMBER)).union(&ranges(OTHER_NUMBER)),
        "Pc" => ranges(CONNECTOR_PUNCTUATION),
        "Pd" => ranges(DASH_PUNCTUATION),
        "Ps" => ranges(OPEN_PUNCTUATION),
        "Pe" => ranges(CLOSE_PUNCTUATION),
        "Pi" => ranges(INITIAL_PUNCTUATION),
        "Pf" => ranges(FINAL_PUNCTUATION),
        "Po" => ranges(OTHER_PUNCTUATION),
        "P" => ranges(CONNECTOR_PUNCTUATION)
            .union(&ranges(DASH_PUNCTUATION))
            .union(&ranges(OPEN_PUNCTUATION))
            .union(&ranges(CLOSE_PUNCTUATION))
            .union(&ranges(INITIAL_PUNCTUATION))
            .union(&ranges(FINAL_PUNCTUATION))
            .union(&ranges(OTHER_PUNCTUATION)),
        "Sm" => ranges(MATH_SYMBOL),
        "Sc" => ranges(CURRENCY_SYMBOL),
        "Sk" => ranges(MODIFIER_SYMBOL),
        "So" => ranges(OTHER_SYMBOL),
        "S" => ranges(MATH_SYMBOL)
            .union(&ranges(CURRENCY_SYMBOL))
            .union(&ranges(MODIFIER_SYMBOL))
            .union(&ranges(OTHER_SYMBOL)),
        "Zs" => ranges(SPACE_SEPARATOR),
        "Zl" => ranges(LINE_SEPARATOR),
        "Zp" => ranges(PARAGRAPH_SEPARATOR),
        "Z" => ranges(SPACE_SEPARATOR).union(&ranges(LINE_SEPARATOR)).union(&ranges(PARAGRAPH_SEPARATOR)),
        "Cc" => ranges(CONTROL),
        "Cf" => ranges(FORMAT),
        "Cs" => ranges(SURROGATE),
        "Co" => ranges(PRIVATE_USE),
        "Cn" => ranges(UNASSIGNED),
        "C" => ranges(CONTROL)
            .union(&ranges(FORMAT))
            .union(&ranges(SURROGATE))
            .union(&ranges(PRIVATE_USE))
            .union(&ranges(UNASSIGNED)),
        _ => return None,
    })
}

/// Resolve a script name (`Latin`, `Greek`, ...) to its range table.
pub fn script(name: &str) -> Option<ClassRanges> {
    use tables::*;
    Some(match name {
        "Latin" => ranges(SCRIPT_LATIN),
        "Greek" => ranges(SCRIPT_GREEK),
        "Cyrillic" => ranges(SCRIPT_CYRILLIC),
        "Han" => ranges(SCRIPT_HAN),
        "Hiragana" => ranges(SCRIPT_HIRAGANA),
        "Katakana" => ranges(SCRIPT_KATAKANA),
        "Hangul" => ranges(SCRIPT_HANGUL),
        "Arabic" => ranges(SCRIPT_ARABIC),
        "Hebrew" => ranges(SCRIPT_HEBREW),
        "Devanagari" => ranges(SCRIPT_DEVANAGARI),
        "Thai" => ranges(SCRIPT_THAI),
        "Armenian" => ranges(SCRIPT_ARMENIAN),
        "Georgian" => ranges(SCRIPT_GEORGIAN),
        "Cherokee" => ranges(SCRIPT_CHEROKEE),
        _ => return None,
    })
}

/// POSIX bracket classes, e.g. `[:alpha:]`.
pub fn posix_class(name: &str) -> Option<ClassRanges> {
    Some(match name {
        "alpha" => general_category("L").unwrap(),
        "digit" => ClassRanges::from_ranges(vec![('0', '9')]),
        "alnum" => general_category("L").unwrap().union(&ClassRanges::from_ranges(vec![('0', '9')])),
        "upper" => general_category("Lu").unwrap(),
        "lower" => general_category("Ll").unwrap(),
        "space" => ClassRanges::from_ranges(vec![
            (' ', ' '), ('\t', '\t'), ('\n', '\n'), ('\r', '\r'), ('\u{B}', '\u{C}'),
        ]),
        "punct" => general_category("P").unwrap().union(&general_category("S").unwrap()),
        "xdigit" => ClassRanges::from_ranges(vec![('0', '9'), ('A', 'F'), ('a', 'f')]),
        "print" => ClassRanges::from_ranges(vec![(' ', '~')]),
        "graph" => ClassRanges::from_ranges(vec![('!', '~')]),
        "cntrl" => general_category("Cc").unwrap(),
        "word" => perl_word(),
        "blank" => ClassRanges::from_ranges(vec![(' ', ' '), ('\t', '\t')]),
        "ascii" => ClassRanges::from_ranges(vec![('\u{0}', '\u{7F}')]),
        _ => return None,
    })
}

/// `\d` — decimal digits.
pub fn perl_digit() -> ClassRanges {
    ClassRanges::from_ranges(vec![('0', '9')])
}

/// `\s` — whitespace.
pub fn perl_space() -> ClassRanges {
    ClassRanges::from_ranges(vec![
        ('\t', '\n'), ('\u{B}', '\r'), (' ', ' '),
    ])
}

/// `\w` — word characters: `[0-9A-Za-z_]`.
pub fn perl_word() -> ClassRanges {
    ClassRanges::from_ranges(vec![('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')])
}

/// ASCII word-character test used by `\b` by default (no `Unicode` flag).
pub fn is_word_char_ascii(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Unicode-aware word-character test used by `\b` under the `Unicode`
/// flag: any alphanumeric rune, or underscore.
pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// The simple case-fold equivalents of `c` (may be empty if `c` has no
/// alternate case form). Built from `char::to_uppercase`/`to_lowercase`
/// rather than a hand-maintained Unicode `CaseFolding.txt` table — see
/// DESIGN.md for why a full simple-case-fold table was not hand-copied.
pub fn simple_case_fold(c: char) -> Vec<char> {
    let mut out = Vec::new();
    for u in c.to_uppercase() {
        if u != c {
            out.push(u);
        }
    }
    for l in c.to_lowercase() {
        if l != c {
            out.push(l);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_case_fold() {
        assert_eq!(simple_case_fold('a'), vec!['A']);
        assert_eq!(simple_case_fold('H'), vec!['h']);
    }

    #[test]
    fn greek_script_contains_alpha() {
        let greek = script("Greek").unwrap();
        assert!(greek.contains('\u{3B1}')); // alpha
        assert!(greek.contains('\u{3B2}')); // beta
        assert!(greek.contains('\u{3B3}')); // gamma
        assert!(!greek.contains('a'));
    }

    #[test]
    fn word_char_includes_underscore() {
        assert!(is_word_char_ascii('_'));
        assert!(is_word_char_ascii('9'));
        assert!(!is_word_char_ascii(' '));
    }
}
