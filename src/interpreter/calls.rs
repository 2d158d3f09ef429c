/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/calls.rs
 * Purpose:  Rule invocation: argument evaluation, attribute binding, scoping.
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

use std::io::Write;

use crate::ast::{Expr, Rule};
use crate::error::{CispError, CispResult, ErrorKind};
use crate::interpreter::environment::Environment;
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

impl<W: Write> Interpreter<W> {
    /// Resolves `name` from the caller's scope and calls it.
    ///
    /// Arguments are evaluated eagerly, left to right, in the caller's
    /// environment before the callee scope exists.
    pub(crate) fn call_rule(
        &mut self,
        name: &str,
        arguments: &[Expr],
        env: &Environment<'_>,
        span: Span,
    ) -> CispResult<Value> {
        let rule = env.lookup_rule(name, span)?;

        let args = arguments
            .iter()
            .map(|arg| self.evaluate(arg, env))
            .collect::<CispResult<Vec<_>>>()?;

        self.invoke(&rule, args, env, span)
    }

    /// Invokes `rule` with already-evaluated argument values.
    ///
    /// This function:
    /// 1. Forks a new scope from the **caller's** environment
    /// 2. Binds each attribute, in order, to its argument
    /// 3. Executes the body
    /// 4. Unwraps an early `@return`
    ///
    /// # Binding
    /// - Missing trailing arguments count as `()`
    /// - `()` takes the attribute's default, evaluated in the new scope
    /// - `()` with no default is an arity error naming the attribute
    ///
    /// # Returns
    /// The value given to `@return`, or Nil when the body finishes without
    /// returning.
    pub(crate) fn invoke(
        &mut self,
        rule: &Rule,
        args: Vec<Value>,
        caller: &Environment<'_>,
        span: Span,
    ) -> CispResult<Value> {
        let attributes = &rule.selector.attributes;

        if args.len() > attributes.len() {
            return Err(CispError::arity(
                format!(
                    "`{}` takes {} argument{}, but {} were given",
                    rule.name(),
                    attributes.len(),
                    if attributes.len() == 1 { "" } else { "s" },
                    args.len()
                ),
                span,
            ));
        }

        tracing::debug!(
            rule = rule.name(),
            args = args.len(),
            depth = caller.depth() + 1,
            "invoke rule"
        );

        let mut scope = caller.fork();
        let mut args = args.into_iter();

        for attribute in attributes {
            let value = match args.next() {
                Some(value) if !value.is_nil() => value,
                _ => match &attribute.default {
                    Some(default) => self.evaluate(default, &scope)?,
                    None => {
                        return Err(CispError::arity(
                            format!(
                                "missing required argument `{}` for `{}`",
                                attribute.name.name,
                                rule.name()
                            ),
                            span,
                        )
                        .with_help(format!(
                            "`{}` has no default; declare one with `[{}=...]`",
                            attribute.name.name, attribute.name.name
                        )));
                    }
                },
            };

            scope.set_variable(attribute.name.name.as_str(), value);
        }

        // Native handlers have no source location of their own; their output
        // failures are reported at the call.
        let signal = self.execute_block(&rule.body, &mut scope).map_err(|err| match err.kind {
            ErrorKind::Io if err.span == Span::default() => CispError { span, ..err },
            _ => err,
        })?;

        match signal {
            ExecSignal::Return(value) => Ok(value),
            ExecSignal::Normal(_) => Ok(Value::Nil),
        }
    }
}
