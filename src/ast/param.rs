/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     ast/param.rs
 * Purpose:  Names, selectors and the attributes that act as formal parameters.
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

use crate::ast::Expr;
use crate::span::Span;
use serde::Serialize;

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A rule's name plus its ordered formal parameters.
///
/// ```text
/// greet[name][times=1]
/// ^^^^^ ^^^^^^^^^^^^^^
/// name  attributes
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    pub name: Identifier,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// Represents **one formal parameter** of a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Parameter name, bound as a variable inside the rule body.
    pub name: Identifier,

    /// Optional literal default: `[times=1]`.
    ///
    /// Used when the caller passes nothing or `()` for this position.
    pub default: Option<Expr>,

    pub span: Span,
}
