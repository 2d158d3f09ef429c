/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/statements.rs
 * Purpose:  Rules, declarations, at-rules and rule bodies.
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

use crate::ast::{AtRule, Declaration, Identifier, Rule, Stmt};
use crate::error::{CispError, CispResult};
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::Parser;
use crate::span::Span;
use std::rc::Rc;

impl Parser {
    /// Parses a top-level rule: `IDENT selector? '{' stmt* '}'`.
    pub fn rule(&mut self) -> CispResult<Rule> {
        let name = self.expect(TokenKind::Identifier, "at the start of a rule")?;
        self.rule_after_name(name)
    }

    /// Parses the selector and body of a rule whose name is already consumed.
    fn rule_after_name(&mut self, name: Token) -> CispResult<Rule> {
        let selector = self.selector(Identifier::new(name.lexeme, name.span))?;
        let (body, body_span) = self.block()?;

        tracing::trace!(rule = %selector.name.name, statements = body.len(), "parsed rule");

        Ok(Rule {
            span: selector.span.to(body_span),
            selector,
            body,
        })
    }

    /// Parses one statement inside a rule body.
    ///
    /// ```text
    /// stmt := atRule | IDENT ':' value+ ';' | IDENT selector? '{' stmt* '}'
    /// ```
    pub fn statement(&mut self) -> CispResult<Stmt> {
        if self.check(TokenKind::At)? {
            return Ok(Stmt::AtRule(self.at_rule()?));
        }

        let name = self.expect(TokenKind::Identifier, "at the start of a statement")?;

        if self.check(TokenKind::Colon)? {
            return Ok(Stmt::Declaration(self.declaration(name)?));
        }

        Ok(Stmt::Rule(Rc::new(self.rule_after_name(name)?)))
    }

    /// Parses `':' value+ ';'` after a declaration's property name.
    fn declaration(&mut self, name: Token) -> CispResult<Declaration> {
        let colon = self.expect(TokenKind::Colon, "after property name")?;

        let mut values = Vec::new();
        while !self.check(TokenKind::Semicolon)? {
            values.push(self.expression()?);
        }

        if values.is_empty() {
            return Err(CispError::parse(
                format!("expected a value after `{}:`", name.lexeme),
                colon.span,
            ));
        }

        let semi = self.expect(TokenKind::Semicolon, "after declaration")?;

        Ok(Declaration {
            span: name.span.to(semi.span),
            name: Identifier::new(name.lexeme, name.span),
            values,
        })
    }

    /// Parses `'@' IDENT value* (';' | block)`.
    pub fn at_rule(&mut self) -> CispResult<AtRule> {
        let at = self.expect(TokenKind::At, "to start an at-rule")?;
        let name = self.expect(TokenKind::Identifier, "after `@`")?;

        let mut params = Vec::new();
        while !self.check(TokenKind::LBrace)? && !self.check(TokenKind::Semicolon)? {
            params.push(self.expression()?);
        }

        let (body, end) = if self.check(TokenKind::LBrace)? {
            let (body, span) = self.block()?;
            (Some(body), span)
        } else {
            let semi = self.expect(TokenKind::Semicolon, "after at-rule")?;
            (None, semi.span)
        };

        Ok(AtRule {
            span: at.span.to(end),
            name: Identifier::new(name.lexeme, name.span),
            params,
            body,
        })
    }

    /// Parses `'{' stmt* '}'`, returning the statements and the span of
    /// the whole block, braces included.
    pub(crate) fn block(&mut self) -> CispResult<(Vec<Stmt>, Span)> {
        let open = self.expect(TokenKind::LBrace, "to open a block")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace)? {
            if self.is_at_end()? {
                let eof = self.advance()?;
                return Err(CispError::parse("expected `}` to close the block, found end of file", eof.span)
                    .with_help(format!("the block opened at {} is never closed", open.span)));
            }
            body.push(self.statement()?);
        }

        let close = self.advance()?;
        Ok((body, open.span.to(close.span)))
    }
}
