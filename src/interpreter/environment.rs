/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/environment.rs
 * Purpose:  Parent-linked scopes holding variables and rule definitions.
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

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Rule;
use crate::error::{CispError, CispResult};
use crate::interpreter::natives;
use crate::span::Span;
use crate::value::Value;

/// One lexical scope.
///
/// A child borrows its parent for the duration of the call that created
/// it, so lookups may walk up the chain but a child can never write into
/// a parent's tables.
#[derive(Debug, Default)]
pub struct Environment<'p> {
    parent: Option<&'p Environment<'p>>,
    rules: HashMap<String, Rc<Rule>>,
    variables: HashMap<String, Value>,
}

impl Environment<'static> {
    /// Creates the root scope, seeded with the native rules (`print`).
    pub fn root() -> Self {
        let mut env = Self::default();

        for rule in natives::registry() {
            env.rules.insert(rule.name().to_string(), Rc::new(rule));
        }

        env
    }
}

impl<'p> Environment<'p> {
    /// Creates a child scope with empty tables whose parent is `self`.
    pub fn fork(&self) -> Environment<'_> {
        Environment {
            parent: Some(self),
            rules: HashMap::new(),
            variables: HashMap::new(),
        }
    }

    /// Number of scopes above this one.
    pub fn depth(&self) -> usize {
        self.scopes().count() - 1
    }

    /// Registers `rule` in this scope.
    ///
    /// Shadowing a rule from an enclosing scope is allowed; defining the
    /// same name twice in one scope is a name error.
    pub fn define_rule(&mut self, rule: Rc<Rule>) -> CispResult<()> {
        let name = rule.name();

        if self.rules.contains_key(name) {
            return Err(CispError::name(
                format!("rule `{}` is already defined in this scope", name),
                rule.selector.name.span,
            ));
        }

        self.rules.insert(name.to_string(), rule);
        Ok(())
    }

    /// Binds `name` in this scope, shadowing any parent binding.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Finds a rule in this scope or the nearest enclosing one.
    pub fn find_rule(&self, name: &str) -> Option<&Rc<Rule>> {
        self.scopes().find_map(|scope| scope.rules.get(name))
    }

    /// Finds a variable in this scope or the nearest enclosing one.
    pub fn find_variable(&self, name: &str) -> Option<&Value> {
        self.scopes().find_map(|scope| scope.variables.get(name))
    }

    /// Like [`Environment::find_rule`], failing with a name error at `span`.
    pub fn lookup_rule(&self, name: &str, span: Span) -> CispResult<Rc<Rule>> {
        self.find_rule(name)
            .cloned()
            .ok_or_else(|| CispError::name(format!("undefined rule `{}`", name), span))
    }

    /// Like [`Environment::find_variable`], failing with a name error at `span`.
    pub fn lookup_variable(&self, name: &str, span: Span) -> CispResult<Value> {
        self.find_variable(name)
            .cloned()
            .ok_or_else(|| CispError::name(format!("undefined variable `${}`", name), span))
    }

    /// This scope followed by each ancestor, nearest first.
    fn scopes(&self) -> impl Iterator<Item = &Environment<'p>> + '_ {
        std::iter::successors(Some(self), |scope| scope.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse;
    use crate::ast::TopLevel;
    use pretty_assertions::assert_eq;

    fn rule(source: &str) -> Rc<Rule> {
        match parse(source).unwrap().items.remove(0) {
            TopLevel::Rule(rule) => rule,
            TopLevel::AtRule(_) => panic!("expected a rule"),
        }
    }

    #[test]
    fn root_is_seeded_with_print() {
        let root = Environment::root();

        assert!(root.find_rule("print").is_some());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn variable_lookup_walks_the_parent_chain() {
        let mut root = Environment::root();
        root.set_variable("x", Value::Int(1));

        let mut child = root.fork();
        assert_eq!(child.lookup_variable("x", Span::default()), Ok(Value::Int(1)));

        child.set_variable("x", Value::Int(2));
        assert_eq!(child.find_variable("x"), Some(&Value::Int(2)));
        assert_eq!(child.depth(), 1);
        drop(child);

        assert_eq!(root.find_variable("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn missing_names_are_name_errors() {
        let root = Environment::root();
        let grandchild_parent = root.fork();
        let grandchild = grandchild_parent.fork();

        let err = grandchild.lookup_variable("nope", Span::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.message, "undefined variable `$nope`");

        let err = grandchild.lookup_rule("nope", Span::default()).unwrap_err();
        assert_eq!(err.message, "undefined rule `nope`");
    }

    #[test]
    fn redefinition_is_rejected_only_within_one_scope() {
        let mut root = Environment::root();
        root.define_rule(rule("a { }")).unwrap();

        let err = root.define_rule(rule("a { }")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);

        let mut child = root.fork();
        child.define_rule(rule("a[x] { }")).unwrap();
        assert_eq!(child.find_rule("a").map(|r| r.selector.attributes.len()), Some(1));
    }
}
