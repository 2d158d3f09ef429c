/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Lexer module root and the eager `tokenize` entry point.
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

/// Character scanner producing positioned tokens on demand.
pub mod lexer;

/// Reserved words and identifier / number character classes.
pub mod keywords;

/// `TokenKind` and `Token`.
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use crate::error::CispResult;

/// Lexes the whole of `source` up front.
///
/// The returned vector always ends with a single `Eof` token. Used by
/// `--emit tokens` and by tests; the parser pulls tokens lazily instead.
pub fn tokenize(source: &str) -> CispResult<Vec<Token>> {
    let tokens = Lexer::new(source).collect::<CispResult<Vec<_>>>()?;
    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
