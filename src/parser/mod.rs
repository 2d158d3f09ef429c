/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Parser module root, public entry point and parser tests.
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(source)` entry point
pub mod parser;

/// Statement-level parsing:
/// - rules and nested rules
/// - declarations
/// - at-rules and blocks
pub mod statements;

/// Selector parsing:
/// - attribute lists `[name]`, `[name=literal]`
pub mod selectors;

/// Expression-level parsing:
/// - or → and → equality → relational → additive → multiplicative → unary → primary
/// - literals, groups, calls, variable reads
pub mod expressions;

/// Shared parser helpers:
/// - token matching
/// - lookahead checks
/// - expected-token errors
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::{parse, Parser};
