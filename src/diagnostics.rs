/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     diagnostics.rs
 * Purpose:  Compiler-style rendering of CISP errors for the command line.
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

use crate::error::CispError;
use std::io::{self, Write};

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for CISP errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// The output stays readable without color.
pub struct DiagnosticPrinter {
    /// Full source code of the file being interpreted.
    source: String,

    /// Name of the source file, used only for display.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Writes the diagnostic for `error` to `out`.
    ///
    /// # Output Example
    /// ```text
    /// error[E_TYPE]: 3:13 invalid types for +: int and string
    ///   --> example.cisp:3:13
    ///    |
    ///  3 |     --x: 1 + "a";
    ///    |             ^
    /// ```
    pub fn write_to(&self, error: &CispError, out: &mut dyn Write) -> io::Result<()> {
        let line = error.span.line();
        let column = error.span.column();

        // Lines are 1-indexed in diagnostics, iterators are 0-indexed.
        let src_line = source_lines(&self.source)
            .nth(line.saturating_sub(1))
            .unwrap_or("");

        writeln!(out, "error[{}]: {}", error.code(), error)?;
        writeln!(out, "  --> {}:{}:{}", self.file_name, line, column)?;
        writeln!(out, "   |")?;
        writeln!(out, "{:>3} | {}", line, src_line)?;

        let underline = " ".repeat(column.saturating_sub(1));
        writeln!(out, "   | {}^", underline)?;

        if let Some(help) = &error.help {
            writeln!(out, "\nhelp: {}", help)?;
        }

        Ok(())
    }

    /// Renders the diagnostic into a `String`.
    pub fn render(&self, error: &CispError) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(error, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Prints a formatted error diagnostic to stderr.
    pub fn print(&self, error: &CispError) {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = self.write_to(error, &mut handle);
    }
}

/// Splits on `\r\n`, `\r` and `\n`, the same line breaks the lexer counts.
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Loc, Span};
    use pretty_assertions::assert_eq;

    #[test]
    fn caret_points_at_the_error_column() {
        let source = "main {\n    --x: 1 + \"a\";\n}\n";
        let loc = Loc {
            offset: 16,
            line: 2,
            column: 10,
        };
        let err = CispError::type_error("invalid types for +: int and string", Span::point(loc))
            .with_help("only ints and floats mix");

        let rendered = DiagnosticPrinter::new("demo.cisp", source).render(&err);

        assert_eq!(
            rendered,
            "error[E_TYPE]: 2:10 invalid types for +: int and string\n\
             \x20 --> demo.cisp:2:10\n\
             \x20  |\n\
             \x20 2 |     --x: 1 + \"a\";\n\
             \x20  |          ^\n\
             \n\
             help: only ints and floats mix\n"
        );
    }

    #[test]
    fn carriage_returns_end_lines_like_the_lexer() {
        let source = "main {\r    @return 1 + \"a\";\r}\r";
        let err = crate::run_source(source, &mut Vec::new()).unwrap_err();

        assert_eq!(err.span.line(), 2);
        let rendered = DiagnosticPrinter::new("cr.cisp", source).render(&err);
        assert!(
            rendered.contains("  2 |     @return 1 + \"a\";\n"),
            "{}",
            rendered
        );
    }

    #[test]
    fn mixed_line_endings_count_once_each() {
        let lines: Vec<_> = source_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);
    }
}
