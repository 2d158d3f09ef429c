/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     lexer/keywords.rs
 * Purpose:  Reserved words and the character classes the lexer scans with.
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

use crate::lexer::token::TokenKind;

/// Maps a scanned identifier to the token kind of a **reserved word**.
///
/// Only the boolean literals are reserved. Control flow lives behind `@`
/// (`@if`, `@return`, ...), so `if` and `return` stay ordinary identifiers.
///
/// # Returns
/// - `Some(kind)` for `true` / `false`
/// - `None` if the word should be treated as a normal identifier
pub fn reserved_word(word: &str) -> Option<TokenKind> {
    match word {
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        _ => None,
    }
}

/// `_` or an ASCII letter.
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Identifiers continue through letters, digits, `-`, `.` and `#`, so
/// selector-shaped names like `font-size` or `.card#main` stay one token.
pub fn is_identifier_continue(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit() || matches!(ch, '-' | '.' | '#')
}

/// Digit run of a numeric literal.
///
/// Hex letters `a-f` / `A-F` are accepted inside the run. There is no hex
/// prefix, so such lexemes are rejected later when the parser converts them.
pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}
