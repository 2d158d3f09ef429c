/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     ast/expr.rs
 * Purpose:  Expression nodes: literals, variable reads, calls and operators.
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

use crate::lexer::TokenKind;
use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// An expression as written in the source.
///
/// Expressions appear as declaration values, call arguments, at-rule
/// parameters and attribute defaults. Every variant carries the span of the
/// text it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    /// `()`
    Nil { span: Span },

    /// A bare name. Never a value on its own; evaluating one is a name error.
    Identifier { name: String, span: Span },

    String { value: String, span: Span },

    Int { value: i64, span: Span },

    Float { value: f64, span: Span },

    Boolean { value: bool, span: Span },

    /// `$name`
    VariableDeref { name: String, span: Span },

    /// `name(arg, ...)` or `name()`
    FunctionCall {
        name: String,
        arguments: Vec<Expr>,
        span: Span,
    },

    UnaryOp {
        operator: UnaryOperator,
        operand: Box<Expr>,
        span: Span,
    },

    BinaryOp {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Nil { span }
            | Expr::Identifier { span, .. }
            | Expr::String { span, .. }
            | Expr::Int { span, .. }
            | Expr::Float { span, .. }
            | Expr::Boolean { span, .. }
            | Expr::VariableDeref { span, .. }
            | Expr::FunctionCall { span, .. }
            | Expr::UnaryOp { span, .. }
            | Expr::BinaryOp { span, .. } => *span,
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the expression fully parenthesized, so the shape of the tree
    /// is visible: `1 + 2 * 3` prints as `(1 + (2 * 3))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nil { .. } => f.write_str("()"),
            Expr::Identifier { name, .. } => f.write_str(name),
            Expr::String { value, .. } => write!(f, "{:?}", value),
            Expr::Int { value, .. } => write!(f, "{}", value),
            Expr::Float { value, .. } => write!(f, "{:?}", value),
            Expr::Boolean { value, .. } => write!(f, "{}", value),
            Expr::VariableDeref { name, .. } => write!(f, "${}", name),
            Expr::FunctionCall {
                name, arguments, ..
            } => {
                write!(f, "{}(", name)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::UnaryOp {
                operator, operand, ..
            } => write!(f, "{}{}", operator, operand),
            Expr::BinaryOp {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// `!`
    Not,
    /// `-`
    Negate,
    /// `+`
    Plus,
    /// `~`, parsed but not evaluated.
    BitNot,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(UnaryOperator::Not),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Tilde => Some(UnaryOperator::BitNot),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitNot => "~",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Infix operators, grouped by precedence level (lowest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Or,
    And,

    Equal,
    NotEqual,

    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    Add,
    Subtract,

    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Or => BinaryOperator::Or,
            TokenKind::And => BinaryOperator::And,
            TokenKind::DoubleEqual => BinaryOperator::Equal,
            TokenKind::NotEqual => BinaryOperator::NotEqual,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEqual => BinaryOperator::LessEqual,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Asterisk => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            _ => return None,
        };
        Some(op)
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
