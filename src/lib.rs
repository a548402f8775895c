// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A linear-time regular expression engine.
//!
//! Patterns are parsed into an AST (`ast`), compiled with a Thompson
//! construction (`compile`) into a flat instruction sequence (`inst`),
//! and matched with a PikeVM-style NFA simulation (`pikevm`) that is
//! guaranteed to run in `O(len(pattern) * len(text))` time — no
//! backreferences, no lookaround, no catastrophic backtracking.
//!
//! ```
//! use tre_core::{compile, Flags};
//!
//! let prog = compile(r"(?P<year>\d{4})-\d{2}-\d{2}", Flags::empty()).unwrap();
//! let caps = prog.captures("born 1999-07-16").unwrap();
//! assert_eq!(caps.name("year"), Some((5, 9)));
//! ```

mod ast;
mod classes;
mod compile;
mod error;
mod inst;
mod literals;
mod parse;
mod pikevm;
mod program;
mod re;
mod unicode;
mod utf8;

pub use crate::ast::Flags;
pub use crate::error::{Error, ErrorKind};
pub use crate::parse::ParseLimits;
pub use crate::pikevm::MatchOptions;
pub use crate::program::{Limits, Program};
pub use crate::re::{compile, compile_with_limits, Captures};
pub use crate::compile::CompileLimits;
