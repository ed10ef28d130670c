//! Equality and order predicates (spec §4.7/§4.8).
//!
//! `eq`/`neq` fold over every consecutive pair (structural equality per
//! `Value::structural_eq`, so `1` and `1.0` compare equal).
//! Order predicates likewise fold over *consecutive* pairs of the numeric
//! projection of each argument — grounded on `num.h`'s `vector_is_ordered`,
//! not an all-pairs comparison — and both default to `Yes` on zero or one
//! argument (spec Open Question 4, resolved in `SPEC_FULL.md` §3).

use crate::error::RunResult;
use crate::value::Value;

pub fn eq(args: &[Value]) -> Value {
    Value::Bool(args.windows(2).all(|pair| pair[0].structural_eq(&pair[1])))
}

pub fn neq(args: &[Value]) -> Value {
    Value::Bool(!args.windows(2).any(|pair| pair[0].structural_eq(&pair[1])))
}

fn projections(args: &[Value]) -> Vec<f64> {
    args.iter()
        .map(|v| v.numeric_projection().expect("vecex guarantees a numeric argument"))
        .collect()
}

fn ordered(args: &[Value], holds: impl Fn(f64, f64) -> bool) -> RunResult<Value> {
    let nums = projections(args);
    Ok(Value::Bool(nums.windows(2).all(|pair| holds(pair[0], pair[1]))))
}

pub fn gt(args: &[Value]) -> RunResult<Value> {
    ordered(args, |a, b| a > b)
}

pub fn lt(args: &[Value]) -> RunResult<Value> {
    ordered(args, |a, b| a < b)
}

pub fn geq(args: &[Value]) -> RunResult<Value> {
    ordered(args, |a, b| a >= b)
}

pub fn leq(args: &[Value]) -> RunResult<Value> {
    ordered(args, |a, b| a <= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_with_no_arguments_is_true() {
        assert_eq!(eq(&[]), Value::Bool(true));
    }

    #[test]
    fn eq_crosses_int_and_float() {
        assert_eq!(eq(&[Value::Int(2), Value::Float(2.0)]), Value::Bool(true));
    }

    #[test]
    fn gt_checks_consecutive_pairs_not_all_pairs() {
        // 3 > 1 holds, but 1 > 2 does not: the whole chain fails.
        let args = [Value::Int(3), Value::Int(1), Value::Int(2)];
        assert_eq!(gt(&args).unwrap(), Value::Bool(false));
    }

    #[test]
    fn lt_of_a_strictly_increasing_chain_holds() {
        let args = [Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(lt(&args).unwrap(), Value::Bool(true));
    }

    #[test]
    fn order_predicate_with_zero_or_one_arg_defaults_true() {
        assert_eq!(gt(&[]).unwrap(), Value::Bool(true));
        assert_eq!(gt(&[Value::Int(1)]).unwrap(), Value::Bool(true));
    }
}
