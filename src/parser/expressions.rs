/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/expressions.rs
 * Purpose:  Expression parsing: the precedence ladder down to primaries.
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

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{CispError, CispResult};
use crate::lexer::{Token, TokenKind};
use crate::parser::helpers::found;
use crate::parser::parser::Parser;

/// One rung of the binary precedence ladder.
type Level = fn(&mut Parser) -> CispResult<Expr>;

impl Parser {
    /// Entry point for expression parsing.
    ///
    /// Precedence, lowest to highest:
    /// ```text
    /// ||  →  &&  →  == !=  →  < <= > >=  →  + -  →  * /  →  unary  →  primary
    /// ```
    pub fn expression(&mut self) -> CispResult<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> CispResult<Expr> {
        self.binary_level(&[BinaryOperator::Or], Parser::logical_and)
    }

    fn logical_and(&mut self) -> CispResult<Expr> {
        self.binary_level(&[BinaryOperator::And], Parser::equality)
    }

    fn equality(&mut self) -> CispResult<Expr> {
        self.binary_level(
            &[BinaryOperator::Equal, BinaryOperator::NotEqual],
            Parser::relational,
        )
    }

    fn relational(&mut self) -> CispResult<Expr> {
        self.binary_level(
            &[
                BinaryOperator::Less,
                BinaryOperator::LessEqual,
                BinaryOperator::Greater,
                BinaryOperator::GreaterEqual,
            ],
            Parser::additive,
        )
    }

    fn additive(&mut self) -> CispResult<Expr> {
        self.binary_level(
            &[BinaryOperator::Add, BinaryOperator::Subtract],
            Parser::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> CispResult<Expr> {
        self.binary_level(
            &[BinaryOperator::Multiply, BinaryOperator::Divide],
            Parser::unary,
        )
    }

    /// Folds a left-associative run of same-precedence operators.
    ///
    /// `a - b - c` becomes `((a - b) - c)`. The span of each new node runs
    /// from its left operand's start to its right operand's end.
    fn binary_level(&mut self, operators: &[BinaryOperator], next: Level) -> CispResult<Expr> {
        let mut left = next(self)?;

        loop {
            let kind = self.peek_kind()?;
            let Some(operator) = BinaryOperator::from_token(kind).filter(|op| operators.contains(op))
            else {
                break;
            };
            self.advance()?;

            let right = next(self)?;
            let span = left.span().to(right.span());
            left = Expr::BinaryOp {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Parses prefix operators and `$name` variable reads.
    ///
    /// The operand of a prefix operator is itself unary, so `!!x` and
    /// `-$count` nest as expected.
    fn unary(&mut self) -> CispResult<Expr> {
        let kind = self.peek_kind()?;

        if kind == TokenKind::Dollar {
            let dollar = self.advance()?;
            let name = self.expect(TokenKind::Identifier, "after `$`")?;
            return Ok(Expr::VariableDeref {
                name: name.lexeme,
                span: dollar.span.to(name.span),
            });
        }

        if let Some(operator) = UnaryOperator::from_token(kind) {
            let op_token = self.advance()?;
            let operand = self.unary()?;
            let span = op_token.span.to(operand.span());
            return Ok(Expr::UnaryOp {
                operator,
                operand: Box::new(operand),
                span,
            });
        }

        self.primary()
    }

    /// Parses literals, grouped sub-expressions, calls and bare names.
    fn primary(&mut self) -> CispResult<Expr> {
        let token = self.advance()?;

        match token.kind {
            TokenKind::Identifier => match self.peek_kind()? {
                TokenKind::LParen => self.call(token),
                TokenKind::Empty => {
                    let empty = self.advance()?;
                    Ok(Expr::FunctionCall {
                        name: token.lexeme,
                        arguments: Vec::new(),
                        span: token.span.to(empty.span),
                    })
                }
                _ => Ok(Expr::Identifier {
                    name: token.lexeme,
                    span: token.span,
                }),
            },

            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "to close the group")?;
                Ok(inner)
            }

            _ if is_literal_token(token.kind) => literal(token),

            _ => Err(CispError::parse(
                format!("expected an expression, found {}", found(&token)),
                token.span,
            )),
        }
    }

    /// Parses the argument list of `name(...)`; `name` is already consumed.
    fn call(&mut self, name: Token) -> CispResult<Expr> {
        self.expect(TokenKind::LParen, "to start the argument list")?;

        let mut arguments = Vec::new();

        if !self.check(TokenKind::RParen)? {
            loop {
                arguments.push(self.expression()?);

                if self.match_kind(TokenKind::Comma)?.is_none() {
                    break;
                }
            }
        }

        let rparen = self.expect(TokenKind::RParen, "to close the argument list")?;

        Ok(Expr::FunctionCall {
            name: name.lexeme,
            arguments,
            span: name.span.to(rparen.span),
        })
    }

    /// Parses a literal, as required for attribute defaults.
    pub(crate) fn literal(&mut self) -> CispResult<Expr> {
        let token = self.advance()?;

        if is_literal_token(token.kind) {
            return literal(token);
        }

        Err(CispError::parse(
            format!("expected a literal value, found {}", found(&token)),
            token.span,
        )
        .with_help("defaults must be a number, string, `true`, `false` or `()`"))
    }
}

fn is_literal_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Empty
    )
}

/// Converts a literal token into its expression node.
///
/// Numeric lexemes may carry hex letters from the lexer's digit run;
/// those do not convert and are rejected here.
fn literal(token: Token) -> CispResult<Expr> {
    let span = token.span;

    let is_numeric = matches!(token.kind, TokenKind::Int | TokenKind::Float);
    if is_numeric && !token.lexeme.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(malformed_number(&token));
    }

    let expr = match token.kind {
        TokenKind::Int => Expr::Int {
            value: token
                .lexeme
                .parse()
                .map_err(|_| malformed_number(&token))?,
            span,
        },
        TokenKind::Float => Expr::Float {
            value: token
                .lexeme
                .parse()
                .map_err(|_| malformed_number(&token))?,
            span,
        },
        TokenKind::String => Expr::String {
            value: token.lexeme,
            span,
        },
        TokenKind::True => Expr::Boolean { value: true, span },
        TokenKind::False => Expr::Boolean { value: false, span },
        TokenKind::Empty => Expr::Nil { span },
        _ => {
            return Err(CispError::parse(
                format!("expected a literal value, found {}", found(&token)),
                span,
            ));
        }
    };

    Ok(expr)
}

fn malformed_number(token: &Token) -> CispError {
    let err = CispError::parse(
        format!("malformed number literal `{}`", token.lexeme),
        token.span,
    );

    if token.lexeme.chars().any(|c| c.is_ascii_alphabetic()) {
        err.with_help("hexadecimal literals are not supported")
    } else {
        err.with_help("integers must fit in 64 bits")
    }
}
