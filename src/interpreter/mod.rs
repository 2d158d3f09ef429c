/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/mod.rs
 * Purpose:  The tree-walking interpreter and its program entry point.
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

pub mod at_rules;
pub mod calls;
pub mod environment;
pub mod expressions;
pub mod natives;
pub mod operators;
pub mod statements;

use std::io::Write;
use std::rc::Rc;

pub use environment::Environment;
pub use statements::ExecSignal;

use crate::ast::{Program, TopLevel};
use crate::error::{CispError, CispResult};
use crate::span::Span;
use crate::value::Value;

/// Name of the rule a program starts from.
pub const ENTRY_RULE: &str = "main";

/// Walks a parsed `Program`, writing native output to `out`.
///
/// # Example
/// ```
/// use cisp::interpreter::Interpreter;
/// use cisp::value::Value;
///
/// let program = cisp::parser::parse("main { print: \"hi\"; @return 1; }").unwrap();
/// let mut interpreter = Interpreter::new(Vec::new());
///
/// assert_eq!(interpreter.run(&program).unwrap(), Value::Int(1));
/// assert_eq!(interpreter.into_output(), b"hi\n");
/// ```
pub struct Interpreter<W: Write> {
    pub(crate) out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Executes a full CISP program.
    ///
    /// 1. Registers every top-level rule in a fresh root environment
    /// 2. Looks up `main`, which must take no attributes
    /// 3. Invokes it and returns its result
    pub fn run(&mut self, program: &Program) -> CispResult<Value> {
        let mut root = Environment::root();

        for item in &program.items {
            match item {
                TopLevel::Rule(rule) => root.define_rule(Rc::clone(rule))?,
                TopLevel::AtRule(at_rule) => {
                    return Err(CispError::unsupported(
                        format!("`@{}` is not supported at the top level", at_rule.name.name),
                        at_rule.span,
                    )
                    .with_help("at-rules belong inside a rule body"));
                }
            }
        }

        let main = root.find_rule(ENTRY_RULE).cloned().ok_or_else(|| {
            CispError::name("no `main` rule defined", Span::default())
                .with_help("add an entry point: `main { ... }`")
        })?;

        if !main.selector.attributes.is_empty() {
            return Err(CispError::arity(
                "`main` must not declare attributes",
                main.selector.span,
            ));
        }

        tracing::debug!(rules = program.items.len(), "entering main");
        let result = self.invoke(&main, Vec::new(), &root, main.selector.name.span)?;

        self.out
            .flush()
            .map_err(|err| CispError::io(&err, main.span))?;

        Ok(result)
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> CispResult<(Value, String)> {
        let program = parse(source)?;
        let mut interpreter = Interpreter::new(Vec::new());
        let value = interpreter.run(&program)?;
        let out = String::from_utf8(interpreter.into_output()).unwrap();
        Ok((value, out))
    }

    #[test]
    fn main_result_is_its_return_value() {
        assert_eq!(run("main { @return 1 + 2 * 3; }").unwrap().0, Value::Int(7));
    }

    #[test]
    fn main_without_return_yields_nil() {
        assert_eq!(run("main { --x: 5; }").unwrap().0, Value::Nil);
    }

    #[test]
    fn missing_main_is_a_name_error() {
        let err = run("other { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
    }

    #[test]
    fn main_takes_no_attributes() {
        let err = run("main[x] { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arity);
    }

    #[test]
    fn top_level_at_rules_are_unsupported() {
        let err = run("@import \"x\"; main { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[test]
    fn top_level_names_are_unique() {
        let err = run("a { } a { } main { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);

        let err = run("print[value] { } main { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
    }

    #[test]
    fn print_writes_to_the_sink() {
        let (_, out) = run("main { print: 1; print: \"two\"; print: 3.5; print: (); }").unwrap();
        assert_eq!(out, "1\ntwo\n3.5\nnil\n");
    }

    /// An output sink that rejects every write.
    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn print_write_failures_are_io_errors_at_the_call() {
        let program = parse("main {\n    print: 1;\n}").unwrap();
        let err = Interpreter::new(ClosedSink).run(&program).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.code(), "E_IO");
        assert_eq!(err.to_string(), "2:5 failed to write output: sink closed");
    }

    #[test]
    fn chain_state_is_local_to_each_block() {
        let source = "main { @if false { } inner { } @else { } }";
        let err = run(source).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ControlFlow);
    }

    #[test]
    fn variable_declarations_keep_the_chain_open() {
        let source = "main { @if false { } --x: 1; @else { @return $x; } }";
        assert_eq!(run(source).unwrap().0, Value::Int(1));
    }

    #[test]
    fn declaration_calls_close_the_chain() {
        let source = "main { @if false { } print: 1; @else { } }";
        let err = run(source).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ControlFlow);
    }

    #[test]
    fn branch_bodies_share_the_rule_scope() {
        let source = "main { @if true { --x: 2; } @return $x; }";
        assert_eq!(run(source).unwrap().0, Value::Int(2));
    }

    #[test]
    fn return_inside_a_branch_unwinds_the_rule() {
        let source = "main { @if true { @return 1; } print: \"unreachable\"; @return 2; }";
        let (value, out) = run(source).unwrap();

        assert_eq!(value, Value::Int(1));
        assert_eq!(out, "");
    }

    #[test]
    fn non_boolean_condition_is_a_type_error() {
        let err = run("main { @if 1 { } }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.span.start.column, 12);
    }

    #[test]
    fn at_rule_parameter_counts_are_checked() {
        assert_eq!(run("main { @if { } }").unwrap_err().kind, ErrorKind::Arity);
        assert_eq!(run("main { @return 1 2; }").unwrap_err().kind, ErrorKind::Arity);
        assert_eq!(
            run("main { @while true { } }").unwrap_err().kind,
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn variable_declaration_takes_one_value() {
        let err = run("main { --x: 1 2; }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arity);
    }

    #[test]
    fn int_division_by_zero_is_reported() {
        let err = run("main { @return 1 / 0; }").unwrap_err();

        assert_eq!(err.kind, ErrorKind::Arithmetic);
        assert_eq!(err.to_string(), "1:16 division by zero");
    }
}
