/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/expressions.rs
 * Purpose:  Expression evaluation.
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

use crate::ast::Expr;
use crate::error::{CispError, CispResult};
use crate::interpreter::environment::Environment;
use crate::interpreter::operators::{binary, unary};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

impl<W: Write> Interpreter<W> {
    /// Evaluates an expression to a runtime `Value`.
    ///
    /// Binary operators always evaluate both operands, left first; `&&` and
    /// `||` do not short-circuit.
    pub fn evaluate(&mut self, expr: &Expr, env: &Environment<'_>) -> CispResult<Value> {
        match expr {
            Expr::Nil { .. } => Ok(Value::Nil),
            Expr::Int { value, .. } => Ok(Value::Int(*value)),
            Expr::Float { value, .. } => Ok(Value::Float(*value)),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),

            Expr::Identifier { name, span } => Err(bare_identifier(name, *span, env)),

            Expr::VariableDeref { name, span } => env.lookup_variable(name, *span),

            Expr::FunctionCall {
                name,
                arguments,
                span,
            } => self.call_rule(name, arguments, env, *span),

            Expr::UnaryOp {
                operator,
                operand,
                span,
            } => {
                let value = self.evaluate(operand, env)?;
                unary(*operator, value, *span)
            }

            Expr::BinaryOp {
                left,
                operator,
                right,
                span,
            } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                binary(*operator, left, right, *span)
            }
        }
    }
}

/// A bare name is never a value. Points the user at what they likely meant.
fn bare_identifier(name: &str, span: Span, env: &Environment<'_>) -> CispError {
    if env.find_variable(name).is_some() {
        CispError::name(format!("`{}` is a variable, not a value", name), span)
            .with_help(format!("use `${}` to read it", name))
    } else if env.find_rule(name).is_some() {
        CispError::name(format!("`{}` is a rule, not a value", name), span)
            .with_help(format!("use `{}()` to call it", name))
    } else {
        CispError::name(format!("unknown name `{}`", name), span)
            .with_help("literal identifiers are not values; quote it to make a string")
    }
}
