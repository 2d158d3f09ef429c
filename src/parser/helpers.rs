/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/helpers.rs
 * Purpose:  Token-level helpers shared by the statement and expression parsers.
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

use crate::error::{CispError, CispResult};
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Returns the next token without consuming it.
    pub(crate) fn peek(&mut self) -> CispResult<&Token> {
        self.lexer.peek_token()
    }

    /// Kind of the next token.
    pub(crate) fn peek_kind(&mut self) -> CispResult<TokenKind> {
        Ok(self.peek()?.kind)
    }

    /// Checks the next token's kind without advancing.
    pub(crate) fn check(&mut self, kind: TokenKind) -> CispResult<bool> {
        Ok(self.peek_kind()? == kind)
    }

    /// Returns true if the parser is at EOF.
    pub(crate) fn is_at_end(&mut self) -> CispResult<bool> {
        self.check(TokenKind::Eof)
    }

    /// Advances one token forward, returning the consumed token.
    pub(crate) fn advance(&mut self) -> CispResult<Token> {
        self.lexer.next_token()
    }

    /// Consumes the next token if it is of `kind`.
    ///
    /// # Returns
    /// - `Some(token)` if it matched and was consumed
    /// - `None` otherwise, leaving the stream untouched
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> CispResult<Option<Token>> {
        if self.check(kind)? {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consumes a required token or fails with a parse error.
    ///
    /// `context` completes the sentence "expected `X` ...", for example
    /// `"after declaration"`.
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> CispResult<Token> {
        let token = self.advance()?;

        if token.kind == kind {
            return Ok(token);
        }

        Err(CispError::parse(
            format!("expected {} {}, found {}", kind, context, found(&token)),
            token.span,
        ))
    }
}

/// How an unexpected token is named in a parse error.
pub(crate) fn found(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of file".to_string(),
        TokenKind::String => format!("string {:?}", token.lexeme),
        _ => format!("`{}`", token.lexeme),
    }
}
