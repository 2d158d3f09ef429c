/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     span.rs
 * Purpose:  Source positions attached to every token and AST node.
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

use serde::Serialize;
use std::fmt;

/// A single position inside the source text.
///
/// - `offset` is the absolute byte offset (0-based)
/// - `line` and `column` are 1-based, matching what editors show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loc {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Loc {
    /// Position of the very first character of a file.
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Loc {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Loc,
    pub end: Loc,
}

impl Span {
    pub const fn new(start: Loc, end: Loc) -> Self {
        Self { start, end }
    }

    /// Zero-width span sitting at `loc`.
    pub const fn point(loc: Loc) -> Self {
        Self { start: loc, end: loc }
    }

    /// Span running from the start of `self` to the end of `other`.
    ///
    /// Composite nodes use this to cover their leftmost and rightmost children.
    pub const fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub const fn line(&self) -> usize {
        self.start.line
    }

    pub const fn column(&self) -> usize {
        self.start.column
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
