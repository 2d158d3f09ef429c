/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     error.rs
 * Purpose:  The single error type shared by the lexer, parser and evaluator.
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
use std::fmt;

/// Which stage rejected the program, and why.
///
/// Every error is terminal: the first one aborts the lex, parse or
/// evaluation pass it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected character, malformed number, unterminated string.
    Lex,
    /// Unexpected or missing token, malformed literal.
    Parse,
    /// Unresolved variable or rule, literal identifier misuse, redefinition.
    Name,
    /// Operand types do not fit the operator, non-boolean condition.
    Type,
    /// Argument count mismatch, missing required parameter.
    Arity,
    /// `@elif` / `@else` without an open `@if` chain.
    ControlFlow,
    /// Recognised syntax that the language does not implement.
    Unsupported,
    /// Integer division by zero.
    Arithmetic,
    /// Writing program output failed.
    Io,
}

impl ErrorKind {
    /// Stable error code (E_LEX, E_PARSE, ...).
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Lex => "E_LEX",
            ErrorKind::Parse => "E_PARSE",
            ErrorKind::Name => "E_NAME",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::Arity => "E_ARITY",
            ErrorKind::ControlFlow => "E_CONTROL_FLOW",
            ErrorKind::Unsupported => "E_UNSUPPORTED",
            ErrorKind::Arithmetic => "E_ARITHMETIC",
            ErrorKind::Io => "E_IO",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A located CISP error.
///
/// `Display` renders the canonical one-line diagnostic `{line}:{col} message`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}:{} {}", .span.start.line, .span.start.column, .message)]
pub struct CispError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

pub type CispResult<T> = Result<T, CispError>;

impl CispError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lex, message, span)
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Parse, message, span)
    }

    /// Name error (unknown variable or rule, bare identifier used as a value)
    pub fn name(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Name, message, span)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Type, message, span)
    }

    pub fn arity(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Arity, message, span)
    }

    pub fn control_flow(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ControlFlow, message, span)
    }

    pub fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Unsupported, message, span)
    }

    pub fn arithmetic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Arithmetic, message, span)
    }

    /// Output sink failure, located at the call that wrote.
    pub fn io(err: &std::io::Error, span: Span) -> Self {
        Self::new(ErrorKind::Io, format!("failed to write output: {}", err), span)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Loc;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_uses_line_and_column_prefix() {
        let loc = Loc {
            offset: 14,
            line: 3,
            column: 7,
        };
        let err = CispError::type_error("invalid types for +: int and string", Span::point(loc));

        assert_eq!(err.to_string(), "3:7 invalid types for +: int and string");
        assert_eq!(err.code(), "E_TYPE");
    }

    #[test]
    fn help_is_attached_without_touching_the_message() {
        let err = CispError::name("unknown name `foo`", Span::default())
            .with_help("use $foo to read a variable");

        assert_eq!(err.message, "unknown name `foo`");
        assert_eq!(err.help.as_deref(), Some("use $foo to read a variable"));
        assert_eq!(err.to_string(), "1:1 unknown name `foo`");
    }
}
