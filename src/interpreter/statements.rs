/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/statements.rs
 * Purpose:  Statement execution and early-return signalling.
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
/*
 * Handles:
 *
 *  • Variable declarations (`--name: value;`)
 *  • Declaration calls (`name: args...;`)
 *  • Nested rule definitions
 *  • At-rules (delegated to `at_rules`)
 *  • Native rule bodies
 */

use std::io::Write;
use std::rc::Rc;

use crate::ast::{Declaration, Stmt};
use crate::error::{CispError, CispResult};
use crate::interpreter::at_rules::ChainState;
use crate::interpreter::environment::Environment;
use crate::interpreter::Interpreter;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Outcome of executing a statement or statement list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecSignal {
    /// Normal fall-through, carrying the statement's value.
    Normal(Value),

    /// `@return` was reached; unwound up to the enclosing rule invocation.
    Return(Value),
}

/* ============================================================================
 * Statement Execution Entry Points
 * ============================================================================
 */

impl<W: Write> Interpreter<W> {
    /// Executes `stmts` in order against one fresh conditional chain.
    ///
    /// # Returns
    /// - `Return(value)` as soon as any statement returns
    /// - otherwise `Normal` with the last statement's value (Nil if empty)
    pub(crate) fn execute_block(
        &mut self,
        stmts: &[Stmt],
        env: &mut Environment<'_>,
    ) -> CispResult<ExecSignal> {
        let mut chain = ChainState::default();
        let mut last = Value::Nil;

        for stmt in stmts {
            match self.execute(stmt, env, &mut chain)? {
                ExecSignal::Normal(value) => last = value,
                signal @ ExecSignal::Return(_) => return Ok(signal),
            }
        }

        Ok(ExecSignal::Normal(last))
    }

    /// Executes a single statement.
    ///
    /// This is the **core dispatch function for all statement execution**.
    fn execute(
        &mut self,
        stmt: &Stmt,
        env: &mut Environment<'_>,
        chain: &mut ChainState,
    ) -> CispResult<ExecSignal> {
        tracing::trace!(span = %stmt.span(), "execute statement");

        match stmt {
            /* ------------------------------------------------------------------
             * Declarations
             * ---------------------------------------------------------------- */
            Stmt::Declaration(decl) => match decl.variable_name() {
                Some(name) => self.bind_variable(name, decl, env),
                None => {
                    chain.close();
                    self.declaration_call(decl, env).map(ExecSignal::Normal)
                }
            },

            /* ------------------------------------------------------------------
             * Nested Rule Definition
             * ---------------------------------------------------------------- */
            Stmt::Rule(rule) => {
                chain.close();
                tracing::debug!(rule = rule.name(), depth = env.depth(), "define rule");
                env.define_rule(Rc::clone(rule))?;
                Ok(ExecSignal::Normal(Value::Nil))
            }

            /* ------------------------------------------------------------------
             * Control Flow
             * ---------------------------------------------------------------- */
            Stmt::AtRule(at_rule) => self.execute_at_rule(at_rule, env, chain),

            /* ------------------------------------------------------------------
             * Native Bridge
             * ---------------------------------------------------------------- */
            Stmt::NativeCall(native) => {
                chain.close();
                tracing::trace!(native = native.name, "native call");
                let value = (native.handler)(env, &mut self.out)?;
                Ok(ExecSignal::Normal(value))
            }
        }
    }

    /// `--name: value;` binds `name` in the current scope.
    fn bind_variable(
        &mut self,
        name: &str,
        decl: &Declaration,
        env: &mut Environment<'_>,
    ) -> CispResult<ExecSignal> {
        let [value] = decl.values.as_slice() else {
            return Err(CispError::arity(
                format!(
                    "variable `{}` takes exactly one value, found {}",
                    decl.name.name,
                    decl.values.len()
                ),
                decl.span,
            ));
        };

        let value = self.evaluate(value, env)?;
        tracing::trace!(variable = name, value = %value, "bind variable");
        env.set_variable(name, value.clone());

        Ok(ExecSignal::Normal(value))
    }

    /// `name: args...;` calls the rule `name` with the listed values.
    fn declaration_call(&mut self, decl: &Declaration, env: &Environment<'_>) -> CispResult<Value> {
        let name = &decl.name;

        if env.find_rule(&name.name).is_none() {
            return Err(CispError::name(format!("undefined rule `{}`", name.name), name.span)
                .with_help(format!("to bind a variable, write `--{}: ...;`", name.name)));
        }

        self.call_rule(&name.name, &decl.values, env, decl.span)
    }
}
