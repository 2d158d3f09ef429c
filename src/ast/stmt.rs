/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     ast/stmt.rs
 * Purpose:  Statements, rules, at-rules and the program root.
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

use crate::ast::{Expr, Identifier, Selector};
use crate::error::CispResult;
use crate::interpreter::Environment;
use crate::span::Span;
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

/// All executable CISP statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    /// `name: value ...;`
    Declaration(Declaration),

    /// A nested rule definition.
    Rule(Rc<Rule>),

    /// `@name value ... ;` or `@name value ... { ... }`
    AtRule(AtRule),

    /// Body of a built-in rule. Never produced by the parser.
    NativeCall(NativeCall),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Declaration(decl) => decl.span,
            Stmt::Rule(rule) => rule.span,
            Stmt::AtRule(at_rule) => at_rule.span,
            Stmt::NativeCall(native) => native.span,
        }
    }
}

/// `name: value ...;`
///
/// A `--` prefixed name binds a variable, anything else calls the rule of
/// that name with `values` as arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: Identifier,
    pub values: Vec<Expr>,
    pub span: Span,
}

impl Declaration {
    /// The bound variable name (`--count` → `count`), or `None` for a call.
    pub fn variable_name(&self) -> Option<&str> {
        self.name
            .name
            .strip_prefix("--")
            .filter(|name| !name.is_empty())
    }
}

/// `@name params... (';' | { body })`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    pub name: Identifier,
    pub params: Vec<Expr>,
    pub body: Option<Vec<Stmt>>,
    pub span: Span,
}

/// A selector plus a body. Both a style block and a callable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub selector: Selector,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.selector.name.name
    }
}

/// Signature of a built-in function.
///
/// Receives the callee environment, with the rule's attributes already
/// bound, and the interpreter's output sink.
pub type NativeHandler = fn(&Environment<'_>, &mut dyn Write) -> CispResult<Value>;

/// Bridges a built-in into the ordinary rule invocation path.
#[derive(Clone, Serialize)]
pub struct NativeCall {
    pub name: &'static str,
    #[serde(skip)]
    pub handler: NativeHandler,
    pub span: Span,
}

impl fmt::Debug for NativeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCall").field("name", &self.name).finish()
    }
}

impl PartialEq for NativeCall {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Items allowed at the top level of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TopLevel {
    Rule(Rc<Rule>),
    AtRule(AtRule),
}

/// The parsed file: its top-level items in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub items: Vec<TopLevel>,
}
