/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     lexer/lexer.rs
 * Purpose:  Turns raw source text into a lazy stream of positioned tokens.
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
use crate::lexer::keywords::{is_identifier_continue, is_identifier_start, is_number_char, reserved_word};
use crate::lexer::token::{Token, TokenKind};
use crate::span::{Loc, Span};

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    loc: Loc,
    peeked: Option<Token>,
    finished: bool,
}

impl Lexer {
    /// Creates a new CISP lexer instance from raw source code.
    ///
    /// # Returns
    /// A fully initialized `Lexer` with:
    /// - Cursor at offset `0`
    /// - Position set to line `1`, column `1`
    /// - No buffered lookahead
    ///
    /// Tokens are produced on demand; nothing is scanned until the first
    /// call to [`Lexer::next_token`] or [`Lexer::peek_token`].
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            loc: Loc::start(),
            peeked: None,
            finished: false,
        }
    }

    /// Returns the next token and advances past it.
    ///
    /// Once the input is exhausted every further call yields an `Eof` token.
    ///
    /// # Errors
    /// A `Lex` error for an unexpected character, a malformed number or an
    /// unterminated string.
    pub fn next_token(&mut self) -> CispResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }

    /// Returns the upcoming token without consuming it.
    ///
    /// Repeated calls return the same token until [`Lexer::next_token`]
    /// is called.
    pub fn peek_token(&mut self) -> CispResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Scans and emits a single token from the source stream.
    ///
    /// # Behavior
    /// - Skips whitespace first
    /// - Recognises two-character operators with one character of lookahead
    /// - Routes to specialized scanners for strings, numbers and identifiers
    fn scan_token(&mut self) -> CispResult<Token> {
        self.skip_whitespace();

        let start_index = self.current;
        let start = self.loc;

        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, "", Span::point(start)));
        };
        let next = self.peek();

        let kind = match ch {
            '!' => self.pick_if(next == Some('='), TokenKind::NotEqual, TokenKind::Bang),
            '=' => self.pick_if(next == Some('='), TokenKind::DoubleEqual, TokenKind::Equal),
            '>' => self.pick_if(next == Some('='), TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.pick_if(next == Some('='), TokenKind::LessEqual, TokenKind::Less),
            '(' => self.pick_if(next == Some(')'), TokenKind::Empty, TokenKind::LParen),

            '&' | '|' if next == Some(ch) => {
                self.advance();
                if ch == '&' {
                    TokenKind::And
                } else {
                    TokenKind::Or
                }
            }
            '&' | '|' => {
                return Err(CispError::lex(
                    format!("unexpected character `{}`", ch),
                    Span::new(start, self.loc),
                )
                .with_help(format!("did you mean `{}{}`?", ch, ch)));
            }

            // `--name` is a variable binding name, never two minus signs
            '-' if next == Some('-') => return Ok(self.identifier(start_index, start)),
            '.' | '#' if next.is_some_and(is_identifier_start) => {
                return Ok(self.identifier(start_index, start));
            }
            '.' if next.is_some_and(|c| c.is_ascii_digit()) => {
                return self.number(start_index, start, true);
            }

            '~' => TokenKind::Tilde,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '$' => TokenKind::Dollar,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '#' => TokenKind::Hash,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '@' => TokenKind::At,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,

            '"' | '\'' => return self.string(ch, start),

            c if is_identifier_start(c) => return Ok(self.identifier(start_index, start)),
            c if c.is_ascii_digit() => return self.number(start_index, start, false),

            other => {
                return Err(CispError::lex(
                    format!("unexpected character `{}`", other),
                    Span::new(start, self.loc),
                ));
            }
        };

        Ok(self.token(kind, start_index, start))
    }

    /// Consumes the lookahead character when `two_char` holds and returns
    /// the matching kind.
    fn pick_if(&mut self, two_char: bool, long: TokenKind, short: TokenKind) -> TokenKind {
        if two_char {
            self.advance();
            long
        } else {
            short
        }
    }

    /// Parses a string literal using the provided quote delimiter.
    ///
    /// There are no escape sequences: everything up to the matching quote,
    /// newlines included, becomes the lexeme.
    fn string(&mut self, quote: char, start: Loc) -> CispResult<Token> {
        let content_start = self.current;

        loop {
            match self.advance() {
                None => {
                    return Err(CispError::lex(
                        "unterminated string literal",
                        Span::point(self.loc),
                    )
                    .with_help(format!("add a closing {}", quote)));
                }
                Some(ch) if ch == quote => break,
                Some(_) => {}
            }
        }

        let value: String = self.chars[content_start..self.current - 1].iter().collect();
        Ok(Token::new(TokenKind::String, value, Span::new(start, self.loc)))
    }

    /// Parses an identifier or reserved word.
    ///
    /// The first character (or the `--`, `.`, `#` trigger) has already been
    /// consumed; this reads the rest of the identifier run.
    fn identifier(&mut self, start_index: usize, start: Loc) -> Token {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }

        let text = self.lexeme(start_index);
        let kind = reserved_word(&text).unwrap_or(TokenKind::Identifier);

        Token::new(kind, text, Span::new(start, self.loc))
    }

    /// Parses an integer or floating-point numeric literal.
    ///
    /// A single `.` turns the literal into a float; a second one is an error.
    fn number(&mut self, start_index: usize, start: Loc, mut seen_dot: bool) -> CispResult<Token> {
        loop {
            match self.peek() {
                Some('.') => {
                    if seen_dot {
                        let here = self.loc;
                        self.advance();
                        return Err(CispError::lex(
                            "unexpected character `.` after `.` in number",
                            Span::new(here, self.loc),
                        )
                        .with_help("is that a typo?"));
                    }
                    seen_dot = true;
                    self.advance();
                }
                Some(ch) if is_number_char(ch) => {
                    self.advance();
                }
                _ => break,
            }
        }

        let kind = if seen_dot { TokenKind::Float } else { TokenKind::Int };
        Ok(self.token(kind, start_index, start))
    }

    fn token(&self, kind: TokenKind, start_index: usize, start: Loc) -> Token {
        Token::new(kind, self.lexeme(start_index), Span::new(start, self.loc))
    }

    fn lexeme(&self, start_index: usize) -> String {
        self.chars[start_index..self.current].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    /// Advances the cursor by one character and updates the position.
    ///
    /// `\r\n` counts as a single line break.
    fn advance(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.current)?;
        self.current += 1;
        self.loc.offset += ch.len_utf8();
        self.loc.column += 1;

        if ch == '\n' || ch == '\r' {
            self.loc.line += 1;
            self.loc.column = 1;

            if ch == '\r' && self.peek() == Some('\n') {
                self.current += 1;
                self.loc.offset += 1;
            }
        }

        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }
}

impl Iterator for Lexer {
    type Item = CispResult<Token>;

    /// Yields every token up to and including `Eof`, or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.is(TokenKind::Eof) => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn scans_a_small_rule() {
        use TokenKind::*;

        assert_eq!(
            kinds("main { --x: 1 + 2.5; @return $x; }"),
            vec![
                Identifier, LBrace, Identifier, Colon, Int, Plus, Float, Semicolon, At,
                Identifier, Dollar, Identifier, Semicolon, RBrace, Eof
            ]
        );
    }

    #[test]
    fn two_character_operators_use_one_character_lookahead() {
        use TokenKind::*;

        assert_eq!(
            kinds("== != >= <= && || = ! > <"),
            vec![
                DoubleEqual, NotEqual, GreaterEqual, LessEqual, And, Or, Equal, Bang, Greater,
                Less, Eof
            ]
        );
    }

    #[test]
    fn selector_shaped_identifiers_stay_whole() {
        assert_eq!(
            lexemes("--count .card#main font-size a.b"),
            vec!["--count", ".card#main", "font-size", "a.b", ""]
        );
    }

    #[test]
    fn booleans_are_reserved_words() {
        assert_eq!(
            kinds("true false truthy"),
            vec![TokenKind::True, TokenKind::False, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn empty_parens_are_a_single_nil_token() {
        assert_eq!(kinds("()"), vec![TokenKind::Empty, TokenKind::Eof]);
        assert_eq!(
            kinds("( )"),
            vec![TokenKind::LParen, TokenKind::RParen, TokenKind::Eof]
        );
    }

    #[test]
    fn strings_have_no_escapes_and_either_quote() {
        let tokens = tokenize("'a\\n' \"it's\"").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "a\\n");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].lexeme, "it's");
    }

    #[test]
    fn number_run_accepts_hex_letters_without_moving_boundaries() {
        assert_eq!(lexemes("12ab 3.5 .5 7"), vec!["12ab", "3.5", ".5", "7", ""]);
        assert_eq!(
            kinds("12ab 3.5 .5 7"),
            vec![
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Int,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn minus_before_digit_is_an_operator() {
        assert_eq!(
            kinds("1-2"),
            vec![TokenKind::Int, TokenKind::Minus, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn tracks_lines_columns_and_offsets() {
        let tokens = tokenize("a\r\n  bc\n$").unwrap();

        assert_eq!(tokens[0].span.start, Loc { offset: 0, line: 1, column: 1 });
        assert_eq!(tokens[0].span.end, Loc { offset: 1, line: 1, column: 2 });
        assert_eq!(tokens[1].span.start, Loc { offset: 5, line: 2, column: 3 });
        assert_eq!(tokens[1].span.end, Loc { offset: 7, line: 2, column: 5 });
        assert_eq!(tokens[2].span.start, Loc { offset: 8, line: 3, column: 1 });
    }

    #[test]
    fn peek_does_not_advance() {
        let mut lexer = Lexer::new("a b");

        assert_eq!(lexer.peek_token().unwrap().lexeme, "a");
        assert_eq!(lexer.peek_token().unwrap().lexeme, "a");
        assert_eq!(lexer.next_token().unwrap().lexeme, "a");
        assert_eq!(lexer.next_token().unwrap().lexeme, "b");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn second_decimal_point_is_a_lex_error() {
        let err = tokenize("1.2.3").unwrap_err();

        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.span.start.column, 4);
    }

    #[test]
    fn lone_ampersand_and_pipe_are_rejected() {
        for source in ["a & b", "a | b"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Lex);
            assert_eq!(err.span.start.column, 3);
            assert!(err.help.is_some());
        }
    }

    #[test]
    fn unterminated_string_fails_at_end_of_input() {
        let err = tokenize("main { print: \"oops; }").unwrap_err();

        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.span.start.offset, 22);
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn unknown_character_is_reported_where_it_starts() {
        let err = tokenize("main {\n  ?\n}").unwrap_err();

        assert_eq!(err.to_string(), "2:3 unexpected character `?`");
    }
}
