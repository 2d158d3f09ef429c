/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/natives.rs
 * Purpose:  Built-in rules backed by Rust functions.
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

use crate::ast::{Attribute, Expr, Identifier, NativeCall, NativeHandler, Rule, Selector, Stmt};
use crate::error::{CispError, CispResult};
use crate::interpreter::Environment;
use crate::span::Span;
use crate::value::Value;

/// All native rules installed into the root environment.
///
/// ```text
/// print[value=()]
/// ```
pub fn registry() -> Vec<Rule> {
    vec![native_rule("print", &["value"], print)]
}

/// Wraps a native handler in an ordinary rule so it is called exactly like
/// a user rule: arguments are bound to `params` (each defaulting to `()`)
/// and the body is a single `NativeCall`.
fn native_rule(name: &'static str, params: &[&str], handler: NativeHandler) -> Rule {
    let span = Span::default();

    let attributes = params
        .iter()
        .map(|param| Attribute {
            name: Identifier::new(*param, span),
            default: Some(Expr::Nil { span }),
            span,
        })
        .collect();

    Rule {
        selector: Selector {
            name: Identifier::new(name, span),
            attributes,
            span,
        },
        body: vec![Stmt::NativeCall(NativeCall {
            name,
            handler,
            span,
        })],
        span,
    }
}

/// `print[value=()]`: writes the value followed by a newline.
fn print(env: &Environment<'_>, out: &mut dyn Write) -> CispResult<Value> {
    let value = env.find_variable("value").cloned().unwrap_or_default();

    writeln!(out, "{}", value).map_err(|err| CispError::io(&err, Span::default()))?;

    Ok(Value::Nil)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_renders_its_bound_value() {
        let root = Environment::root();
        let mut scope = root.fork();
        scope.set_variable("value", Value::Float(1.5));

        let mut out = Vec::new();
        let result = print(&scope, &mut out).unwrap();

        assert_eq!(result, Value::Nil);
        assert_eq!(String::from_utf8(out).unwrap(), "1.5\n");
    }

    #[test]
    fn print_rule_defaults_to_nil() {
        let rules = registry();

        assert_eq!(rules[0].name(), "print");
        assert_eq!(
            rules[0].selector.attributes[0].default,
            Some(Expr::Nil { span: Span::default() })
        );
    }
}
