//! Variadic arithmetic folds (spec §4.7), grounded on `num.h`'s
//! `accumulate_l`/`accumulate_f`: the accumulator promotes to float the
//! instant any argument is a float, otherwise the whole fold stays int.

use crate::error::{InterpError, RunResult};
use crate::value::Value;

fn is_float(v: &Value) -> bool {
    matches!(v, Value::Float(_))
}

fn as_int(v: &Value) -> i64 {
    v.as_int().expect("vecex guarantees a numeric argument")
}

fn as_float(v: &Value) -> f32 {
    match v {
        Value::Float(f) => *f,
        other => as_int(other) as f32,
    }
}

pub fn add(args: &[Value]) -> Value {
    if args.iter().any(is_float) {
        Value::Float(args.iter().fold(0.0, |acc, v| acc + as_float(v)))
    } else {
        Value::Int(args.iter().fold(0_i64, |acc, v| acc.wrapping_add(as_int(v))))
    }
}

pub fn mul(args: &[Value]) -> Value {
    if args.iter().any(is_float) {
        Value::Float(args.iter().fold(1.0, |acc, v| acc * as_float(v)))
    } else {
        Value::Int(args.iter().fold(1_i64, |acc, v| acc.wrapping_mul(as_int(v))))
    }
}

pub fn sub(a: &Value, b: &Value) -> Value {
    if is_float(a) || is_float(b) {
        Value::Float(as_float(a) - as_float(b))
    } else {
        Value::Int(as_int(a).wrapping_sub(as_int(b)))
    }
}

pub fn div(a: &Value, b: &Value) -> RunResult<Value> {
    if is_float(a) || is_float(b) {
        let denom = as_float(b);
        if denom == 0.0 {
            return Err(InterpError::domain("division by zero"));
        }
        Ok(Value::Float(as_float(a) / denom))
    } else {
        let denom = as_int(b);
        if denom == 0 {
            return Err(InterpError::domain("division by zero"));
        }
        Ok(Value::Int(as_int(a) / denom))
    }
}

/// Integer-only, per spec §4.7: `mod` never promotes to float.
pub fn modulo(a: &Value, b: &Value) -> RunResult<Value> {
    let denom = as_int(b);
    if denom == 0 {
        return Err(InterpError::domain("modulo by zero"));
    }
    Ok(Value::Int(as_int(a) % denom))
}

pub fn neg(x: &Value) -> Value {
    match x {
        Value::Float(f) => Value::Float(-f),
        other => Value::Int(-as_int(other)),
    }
}

/// Bitwise NOT. Integer-only; `flip` of a non-int numeric (e.g. a `Float`)
/// has no definition.
pub fn flip(x: &Value) -> RunResult<Value> {
    match x {
        Value::Int(n) => Ok(Value::Int(!n)),
        Value::Bool(b) => Ok(Value::Int(!i64::from(*b))),
        other => Err(InterpError::not_implemented(other.type_of().name(), "flip")),
    }
}
