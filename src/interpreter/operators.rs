/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     interpreter/operators.rs
 * Purpose:  Unary and binary operator semantics with Int to Float widening.
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

use crate::ast::{BinaryOperator, UnaryOperator};
use crate::error::{CispError, CispResult};
use crate::span::Span;
use crate::value::Value;

/// Applies a prefix operator to an evaluated operand.
pub fn unary(operator: UnaryOperator, value: Value, span: Span) -> CispResult<Value> {
    match (operator, value) {
        (UnaryOperator::Plus, value) => Ok(value),

        (UnaryOperator::Negate, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOperator::Negate, Value::Float(n)) => Ok(Value::Float(-n)),

        (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),

        (UnaryOperator::BitNot, _) => Err(CispError::unsupported(
            "unary operator `~` is not supported",
            span,
        )),

        (operator, value) => Err(CispError::type_error(
            format!(
                "invalid type for unary {}: {}",
                operator,
                value.type_name()
            ),
            span,
        )),
    }
}

/// Operands after coercion to a common type.
enum Operands {
    Int(i64, i64),
    Float(f64, f64),
    String(String, String),
    Boolean(bool, bool),
    Nil,
}

/// Brings both operands to one type.
///
/// The only implicit conversion is Int → Float, on either side; every other
/// mismatch is a type error.
fn coerce(operator: BinaryOperator, left: Value, right: Value, span: Span) -> CispResult<Operands> {
    let operands = match (left, right) {
        (Value::Int(l), Value::Int(r)) => Operands::Int(l, r),
        (Value::Float(l), Value::Float(r)) => Operands::Float(l, r),
        (Value::Int(l), Value::Float(r)) => Operands::Float(l as f64, r),
        (Value::Float(l), Value::Int(r)) => Operands::Float(l, r as f64),
        (Value::String(l), Value::String(r)) => Operands::String(l, r),
        (Value::Boolean(l), Value::Boolean(r)) => Operands::Boolean(l, r),
        (Value::Nil, Value::Nil) => Operands::Nil,
        (left, right) => {
            return Err(invalid(operator, left.type_name(), right.type_name(), span));
        }
    };

    Ok(operands)
}

/// Applies an infix operator to two evaluated operands.
pub fn binary(operator: BinaryOperator, left: Value, right: Value, span: Span) -> CispResult<Value> {
    use BinaryOperator as Op;

    let types = (left.type_name(), right.type_name());
    let operands = coerce(operator, left, right, span)?;

    let value = match (operator, operands) {
        (Op::Add, Operands::Int(l, r)) => Value::Int(l.wrapping_add(r)),
        (Op::Add, Operands::Float(l, r)) => Value::Float(l + r),
        (Op::Add, Operands::String(l, r)) => Value::String(l + &r),

        (Op::Subtract, Operands::Int(l, r)) => Value::Int(l.wrapping_sub(r)),
        (Op::Subtract, Operands::Float(l, r)) => Value::Float(l - r),

        (Op::Multiply, Operands::Int(l, r)) => Value::Int(l.wrapping_mul(r)),
        (Op::Multiply, Operands::Float(l, r)) => Value::Float(l * r),

        (Op::Divide, Operands::Int(_, 0)) => {
            return Err(CispError::arithmetic("division by zero", span));
        }
        (Op::Divide, Operands::Int(l, r)) => Value::Int(l.wrapping_div(r)),
        (Op::Divide, Operands::Float(l, r)) => Value::Float(l / r),

        (Op::Less, Operands::Int(l, r)) => Value::Boolean(l < r),
        (Op::Less, Operands::Float(l, r)) => Value::Boolean(l < r),
        (Op::LessEqual, Operands::Int(l, r)) => Value::Boolean(l <= r),
        (Op::LessEqual, Operands::Float(l, r)) => Value::Boolean(l <= r),
        (Op::Greater, Operands::Int(l, r)) => Value::Boolean(l > r),
        (Op::Greater, Operands::Float(l, r)) => Value::Boolean(l > r),
        (Op::GreaterEqual, Operands::Int(l, r)) => Value::Boolean(l >= r),
        (Op::GreaterEqual, Operands::Float(l, r)) => Value::Boolean(l >= r),

        (Op::Equal, operands) => Value::Boolean(equals(operands)),
        (Op::NotEqual, operands) => Value::Boolean(!equals(operands)),

        (Op::And, Operands::Boolean(l, r)) => Value::Boolean(l && r),
        (Op::Or, Operands::Boolean(l, r)) => Value::Boolean(l || r),

        _ => return Err(invalid(operator, types.0, types.1, span)),
    };

    Ok(value)
}

/// Equality after coercion. A Nil left operand is equal by definition;
/// coercion has already rejected Nil against any other type.
fn equals(operands: Operands) -> bool {
    match operands {
        Operands::Int(l, r) => l == r,
        Operands::Float(l, r) => l == r,
        Operands::String(l, r) => l == r,
        Operands::Boolean(l, r) => l == r,
        Operands::Nil => true,
    }
}

fn invalid(operator: BinaryOperator, left: &str, right: &str, span: Span) -> CispError {
    CispError::type_error(
        format!("invalid types for {}: {} and {}", operator, left, right),
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn eval(operator: BinaryOperator, left: Value, right: Value) -> CispResult<Value> {
        binary(operator, left, right, Span::default())
    }

    #[test]
    fn ints_widen_to_floats_on_either_side() {
        assert_eq!(
            eval(BinaryOperator::Add, Value::Int(1), Value::Float(2.5)),
            Ok(Value::Float(3.5))
        );
        assert_eq!(
            eval(BinaryOperator::Less, Value::Float(0.5), Value::Int(1)),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn strings_only_concatenate() {
        assert_eq!(
            eval(
                BinaryOperator::Add,
                Value::String("a".into()),
                Value::String("b".into())
            ),
            Ok(Value::String("ab".into()))
        );

        let err = eval(
            BinaryOperator::Subtract,
            Value::String("a".into()),
            Value::String("b".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "invalid types for -: string and string");
    }

    #[test]
    fn mixed_types_do_not_coerce() {
        let err = eval(BinaryOperator::Add, Value::Int(1), Value::String("a".into())).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "invalid types for +: int and string");
    }

    #[test]
    fn nil_equals_nil_but_not_other_types() {
        assert_eq!(
            eval(BinaryOperator::Equal, Value::Nil, Value::Nil),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            eval(BinaryOperator::NotEqual, Value::Nil, Value::Nil),
            Ok(Value::Boolean(false))
        );
        assert!(eval(BinaryOperator::Equal, Value::Nil, Value::Int(0)).is_err());
    }

    #[test]
    fn equality_compares_after_widening() {
        assert_eq!(
            eval(BinaryOperator::Equal, Value::Int(2), Value::Float(2.0)),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            eval(BinaryOperator::NotEqual, Value::Boolean(true), Value::Boolean(false)),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn logical_operators_require_booleans() {
        assert_eq!(
            eval(BinaryOperator::Or, Value::Boolean(false), Value::Boolean(true)),
            Ok(Value::Boolean(true))
        );
        let err = eval(BinaryOperator::And, Value::Int(1), Value::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn integer_arithmetic_wraps_and_rejects_zero_division() {
        assert_eq!(
            eval(BinaryOperator::Add, Value::Int(i64::MAX), Value::Int(1)),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            eval(BinaryOperator::Divide, Value::Int(7), Value::Int(2)),
            Ok(Value::Int(3))
        );

        let err = eval(BinaryOperator::Divide, Value::Int(1), Value::Int(0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arithmetic);

        assert_eq!(
            eval(BinaryOperator::Divide, Value::Float(1.0), Value::Int(0)),
            Ok(Value::Float(f64::INFINITY))
        );
    }

    #[test]
    fn unary_operators() {
        let span = Span::default();

        assert_eq!(unary(UnaryOperator::Negate, Value::Int(3), span), Ok(Value::Int(-3)));
        assert_eq!(
            unary(UnaryOperator::Not, Value::Boolean(true), span),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            unary(UnaryOperator::Plus, Value::String("s".into()), span),
            Ok(Value::String("s".into()))
        );
        assert_eq!(
            unary(UnaryOperator::Negate, Value::Boolean(true), span).map_err(|e| e.kind),
            Err(ErrorKind::Type)
        );
        assert_eq!(
            unary(UnaryOperator::Not, Value::Int(0), span).map_err(|e| e.kind),
            Err(ErrorKind::Type)
        );
        assert_eq!(
            unary(UnaryOperator::BitNot, Value::Int(0), span).map_err(|e| e.kind),
            Err(ErrorKind::Unsupported)
        );
    }
}
