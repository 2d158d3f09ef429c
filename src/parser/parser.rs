/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/parser.rs
 * Purpose:  The Parser struct and the program-level entry point.
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

use crate::ast::{Program, TopLevel};
use crate::error::CispResult;
use crate::lexer::{Lexer, TokenKind};
use std::rc::Rc;

/// The core CISP recursive-descent parser.
///
/// The parser pulls tokens lazily from its `Lexer` with one token of
/// lookahead. The actual grammar logic is implemented through extension
/// modules (`statements`, `selectors`, `expressions`, `helpers`) via
/// additional `impl Parser` blocks.
pub struct Parser {
    pub(crate) lexer: Lexer,
}

/// Public entry point for the CISP parsing phase.
///
/// This function:
/// 1. Creates a new `Parser` over `source`
/// 2. Parses top-level rules and at-rules until end of file
/// 3. Returns the resulting `Program`, or the first error encountered
///
/// # Compilation Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → AST → Interpreter
/// ```
///
/// # Example
/// ```
/// let program = cisp::parser::parse("main { @return 1; }").unwrap();
/// assert_eq!(program.items.len(), 1);
/// ```
pub fn parse(source: &str) -> CispResult<Program> {
    Parser::new(source).parse_program()
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Parses the whole token stream into a `Program`.
    ///
    /// # Behavior
    /// - Stray `;` between top-level items are skipped
    /// - `@` starts an at-rule, anything else must be a rule
    /// - The first error aborts the parse; there is no recovery
    pub fn parse_program(&mut self) -> CispResult<Program> {
        let mut items = Vec::new();

        loop {
            while self.match_kind(TokenKind::Semicolon)?.is_some() {}

            if self.is_at_end()? {
                break;
            }

            let item = if self.check(TokenKind::At)? {
                TopLevel::AtRule(self.at_rule()?)
            } else {
                TopLevel::Rule(Rc::new(self.rule()?))
            };
            items.push(item);
        }

        tracing::debug!(items = items.len(), "parsed program");
        Ok(Program { items })
    }
}
