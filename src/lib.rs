/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     lib.rs
 * Purpose:  Crate root: module tree, re-exports and the one-call entry point.
 *
 * Author:   Sam Wilcox
 * Github:   https://github.com/samwilcox/cisp
 *
 * License:
 * This file is part of the CISP language project.
 *
 * CISP is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! CISP is a small cascading rule language: every rule-set is also a
//! function. Source text goes through
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Interpreter
//! ```
//!
//! and the program's result is whatever its `main` rule returns.
//!
//! ```
//! let mut out = Vec::new();
//! let result = cisp::run_source(
//!     "greet[name][times=1] { print: $name; @return $times; }\n\
//!      main { @return greet(\"hi\"); }",
//!     &mut out,
//! )
//! .unwrap();
//!
//! assert_eq!(result, cisp::Value::Int(1));
//! assert_eq!(out, b"hi\n");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod value;

use std::io::Write;

pub use diagnostics::DiagnosticPrinter;
pub use error::{CispError, CispResult, ErrorKind};
pub use interpreter::Interpreter;
pub use span::{Loc, Span};
pub use value::Value;

/// Lexes, parses and runs `source`, writing `print` output to `out`.
pub fn run_source<W: Write>(source: &str, out: W) -> CispResult<Value> {
    let program = parser::parse(source)?;
    Interpreter::new(out).run(&program)
}
