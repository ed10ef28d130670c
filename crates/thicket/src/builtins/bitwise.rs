//! Variadic bitwise folds (spec §4.7). Operate on the integer projection of
//! each argument — a `Bool` counts as `0`/`1`, a `Float` truncates.

use crate::error::RunResult;
use crate::value::Value;

fn as_int(v: &Value) -> i64 {
    v.as_int().expect("vecex guarantees a numeric argument")
}

pub fn and(args: &[Value]) -> RunResult<Value> {
    Ok(Value::Int(args.iter().fold(-1_i64, |acc, v| acc & as_int(v))))
}

pub fn or(args: &[Value]) -> RunResult<Value> {
    Ok(Value::Int(args.iter().fold(0_i64, |acc, v| acc | as_int(v))))
}

pub fn xor(args: &[Value]) -> RunResult<Value> {
    Ok(Value::Int(args.iter().fold(0_i64, |acc, v| acc ^ as_int(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_of_no_args_is_all_ones() {
        assert_eq!(and(&[]).unwrap(), Value::Int(-1));
    }

    #[test]
    fn or_combines_bits() {
        assert_eq!(or(&[Value::Int(0b01), Value::Int(0b10)]).unwrap(), Value::Int(0b11));
    }

    #[test]
    fn xor_of_equal_values_is_zero() {
        assert_eq!(xor(&[Value::Int(5), Value::Int(5)]).unwrap(), Value::Int(0));
    }
}
