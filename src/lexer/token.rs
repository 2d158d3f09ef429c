/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     lexer/token.rs
 * Purpose:  Token kinds and positioned tokens produced by the lexer.
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

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Represents the **category of a lexical token** in CISP.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// End-of-file marker, always the last token of a stream.
    Eof,

    /// A name: `main`, `--count`, `.button`, `#header`, `font-size`.
    Identifier,
    /// A quoted string literal, lexeme holds the text between the quotes.
    String,
    Int,
    Float,
    True,
    False,

    // Unary operators
    Bang,
    Tilde,

    // Binary operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Caret,
    Equal,
    DoubleEqual,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
    Dollar,

    // Expressions
    LParen,
    RParen,
    /// The empty tuple `()`, which is the nil literal.
    Empty,
    Comma,

    // Selectors
    Dot,
    Hash,
    LBracket,
    RBracket,

    // Rules
    At,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
}

impl TokenKind {
    /// How the token kind is named in parse errors.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Bang => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Asterisk => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Caret => "`^`",
            TokenKind::Equal => "`=`",
            TokenKind::DoubleEqual => "`==`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::And => "`&&`",
            TokenKind::Or => "`||`",
            TokenKind::Dollar => "`$`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Empty => "`()`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Hash => "`#`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::At => "`@`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Represents a **single lexical token** produced by the CISP lexer.
///
/// # Example Tokens
/// ```text
/// main   →  { kind: Identifier, lexeme: "main" }
/// --x    →  { kind: Identifier, lexeme: "--x" }
/// 4.5    →  { kind: Float,      lexeme: "4.5" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    ///
    /// For strings this is the text between the quotes.
    pub lexeme: String,

    /// Where the token starts and ends.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    /// Formats a token for **user-facing output**: only the lexeme, since
    /// that is what the user wrote. `Debug` carries the full structure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of file"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
