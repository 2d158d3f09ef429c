/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     ast/mod.rs
 * Purpose:  The syntax tree shared by the parser and the interpreter.
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

/// Expressions and operators.
pub mod expr;

/// Identifiers, selectors and attributes.
pub mod param;

/// Statements, rules and the program root.
pub mod stmt;

pub use expr::{BinaryOperator, Expr, UnaryOperator};
pub use param::{Attribute, Identifier, Selector};
pub use stmt::{AtRule, Declaration, NativeCall, NativeHandler, Program, Rule, Stmt, TopLevel};
