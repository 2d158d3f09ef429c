/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/at_rules.rs
 * Purpose:  @if / @elif / @else chains and @return.
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

use crate::ast::{AtRule, Expr};
use crate::error::{CispError, CispResult};
use crate::interpreter::environment::Environment;
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Where a statement list stands in an `@if` / `@elif` / `@else` run.
///
/// ```text
/// Closed ──@if false──► OpenPending ──@elif true──► OpenSatisfied
/// Closed ──@if true───────────────────────────────► OpenSatisfied
/// open   ──@else, a call or a rule definition─────► Closed
/// ```
///
/// Each statement list owns its own chain; branch bodies start fresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainState {
    /// No `@if` is in progress; `@elif` / `@else` are errors.
    #[default]
    Closed,
    /// Every condition so far was false, a later branch may still run.
    OpenPending,
    /// A branch already ran, the rest of the chain is skipped.
    OpenSatisfied,
}

impl ChainState {
    pub fn close(&mut self) {
        if *self != ChainState::Closed {
            tracing::trace!(from = ?*self, "chain closed");
        }
        *self = ChainState::Closed;
    }

    pub fn is_open(self) -> bool {
        self != ChainState::Closed
    }
}

impl<W: Write> Interpreter<W> {
    /// Dispatches an at-rule by name.
    pub(crate) fn execute_at_rule(
        &mut self,
        at_rule: &AtRule,
        env: &mut Environment<'_>,
        chain: &mut ChainState,
    ) -> CispResult<ExecSignal> {
        match at_rule.name.name.as_str() {
            "if" => self.conditional_branch(at_rule, env, chain),

            "elif" => match *chain {
                ChainState::Closed => Err(orphan_branch(at_rule)),
                ChainState::OpenPending => self.conditional_branch(at_rule, env, chain),
                ChainState::OpenSatisfied => Ok(ExecSignal::Normal(Value::Nil)),
            },

            "else" => {
                if !chain.is_open() {
                    return Err(orphan_branch(at_rule));
                }

                let pending = *chain == ChainState::OpenPending;
                chain.close();

                if pending {
                    self.branch_body(at_rule, env)
                } else {
                    Ok(ExecSignal::Normal(Value::Nil))
                }
            }

            "return" => {
                let value = single_param(at_rule)?;
                let value = self.evaluate(value, env)?;
                tracing::trace!(value = %value, "return");
                Ok(ExecSignal::Return(value))
            }

            other => Err(CispError::unsupported(
                format!("unknown at-rule `@{}`", other),
                at_rule.name.span,
            )
            .with_help("supported at-rules are @if, @elif, @else and @return")),
        }
    }

    /// Shared by `@if` and a pending `@elif`: test the condition, run the
    /// body when it holds, and record the outcome in `chain`.
    fn conditional_branch(
        &mut self,
        at_rule: &AtRule,
        env: &mut Environment<'_>,
        chain: &mut ChainState,
    ) -> CispResult<ExecSignal> {
        let condition = single_param(at_rule)?;

        let holds = match self.evaluate(condition, env)? {
            Value::Boolean(b) => b,
            other => {
                return Err(CispError::type_error(
                    format!(
                        "`@{}` condition must be a boolean, found {}",
                        at_rule.name.name,
                        other.type_name()
                    ),
                    condition.span(),
                ));
            }
        };

        tracing::trace!(at_rule = %at_rule.name.name, holds, "conditional");

        if holds {
            *chain = ChainState::OpenSatisfied;
            self.branch_body(at_rule, env)
        } else {
            *chain = ChainState::OpenPending;
            Ok(ExecSignal::Normal(Value::Nil))
        }
    }

    /// Runs a branch body in the current scope with its own chain.
    fn branch_body(&mut self, at_rule: &AtRule, env: &mut Environment<'_>) -> CispResult<ExecSignal> {
        match &at_rule.body {
            Some(body) => self.execute_block(body, env),
            None => Ok(ExecSignal::Normal(Value::Nil)),
        }
    }
}

/// The one parameter `@if`, `@elif` and `@return` require.
fn single_param(at_rule: &AtRule) -> CispResult<&Expr> {
    match at_rule.params.as_slice() {
        [param] => Ok(param),
        params => Err(CispError::arity(
            format!(
                "`@{}` takes exactly one parameter, found {}",
                at_rule.name.name,
                params.len()
            ),
            at_rule.span,
        )),
    }
}

fn orphan_branch(at_rule: &AtRule) -> CispError {
    CispError::control_flow(
        format!("`@{}` without a preceding `@if`", at_rule.name.name),
        at_rule.name.span,
    )
}
