//! Builtins that themselves call back into the evaluator (spec §4.7): `map`,
//! `fold`, and `accumulate` drive a callable over a collection; `apply` and
//! `call` invoke a callable value directly — the only way to invoke a
//! *computed* callable, since `(expr args...)` syntax requires the callee to
//! be a bare atom (see `evaluator.rs`'s depth-tree shape); `eval`/`eval_expr`
//! run a captured or freshly-parsed expression.

use crate::error::{InterpError, RunResult};
use crate::evaluator::{self, Flow};
use crate::reader;
use crate::value::Value;
use crate::{Interpreter, Io};

fn resolve(flow: Flow) -> RunResult<Value> {
    match flow {
        Flow::Value(v) | Flow::Return(v) => Ok(v),
        Flow::Break => Err(InterpError::domain("`break` used outside of a `while` loop")),
    }
}

fn elements(v: &Value) -> RunResult<Vec<Value>> {
    match v {
        Value::Vector(items) => Ok(items.clone()),
        Value::List(items) => Ok(items.iter().cloned().collect()),
        _ => unreachable!("vecex guarantees a vector argument"),
    }
}

/// `map` requires every vector to share a length; each call gets one element
/// from each vector, in order.
pub fn map(interp: &mut Interpreter, io: &mut Io, f: &Value, vectors: &[Value]) -> RunResult<Value> {
    let columns: Vec<Vec<Value>> = vectors.iter().map(elements).collect::<RunResult<_>>()?;
    let len = columns[0].len();
    if columns.iter().any(|c| c.len() != len) {
        return Err(InterpError::domain("`map` requires every vector argument to have the same length"));
    }
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let row: Vec<Value> = columns.iter().map(|c| c[i].clone()).collect();
        out.push(resolve(evaluator::dispatch(interp, io, f.clone(), row)?)?);
    }
    Ok(Value::Vector(out))
}

/// With one trailing argument, folds from the vector's head (the first
/// element seeds the accumulator); with two, the first is an explicit
/// initial accumulator.
pub fn fold(interp: &mut Interpreter, io: &mut Io, f: &Value, rest: &[Value]) -> RunResult<Value> {
    let (init, items) = fold_args(rest)?;
    let mut acc = init;
    for item in items {
        acc = resolve(evaluator::dispatch(interp, io, f.clone(), vec![acc, item])?)?;
    }
    Ok(acc)
}

/// Like `fold`, but returns every intermediate accumulator value (including
/// the seed) as a `Vector`.
pub fn accumulate(interp: &mut Interpreter, io: &mut Io, f: &Value, rest: &[Value]) -> RunResult<Value> {
    let (init, items) = fold_args(rest)?;
    let mut acc = init;
    let mut out = vec![acc.clone()];
    for item in items {
        acc = resolve(evaluator::dispatch(interp, io, f.clone(), vec![acc, item])?)?;
        out.push(acc.clone());
    }
    Ok(Value::Vector(out))
}

fn fold_args(rest: &[Value]) -> RunResult<(Value, Vec<Value>)> {
    match rest {
        [vector] => {
            let mut items = elements(vector)?;
            if items.is_empty() {
                return Err(InterpError::domain("`fold` of an empty vector with no explicit accumulator"));
            }
            let init = items.remove(0);
            Ok((init, items))
        }
        [init, vector] => Ok((init.clone(), elements(vector)?)),
        _ => Err(InterpError::domain(format!(
            "`fold`/`accumulate` expect 2 or 3 arguments total, got {}",
            rest.len() + 1
        ))),
    }
}

pub fn apply(interp: &mut Interpreter, io: &mut Io, f: &Value, vector: &Value) -> RunResult<Flow> {
    let args = elements(vector)?;
    evaluator::dispatch(interp, io, f.clone(), args)
}

pub fn call(interp: &mut Interpreter, io: &mut Io, f: &Value, args: Vec<Value>) -> RunResult<Flow> {
    evaluator::dispatch(interp, io, f.clone(), args)
}

pub fn eval(interp: &mut Interpreter, io: &mut Io, expr: &Value) -> RunResult<Flow> {
    let Value::Expression(tree) = expr else {
        unreachable!("vecex guarantees an expression argument")
    };
    evaluator::eval_captured(interp, io, tree)
}

pub fn eval_expr(interp: &mut Interpreter, io: &mut Io, src: &Value) -> RunResult<Flow> {
    let Value::Str(bytes) = src else {
        unreachable!("vecex guarantees a string argument")
    };
    let text = String::from_utf8_lossy(bytes);
    let Value::Expression(tree) = reader::read(&text)? else {
        unreachable!("reader::read always returns an Expression")
    };
    evaluator::run_program(interp, io, &tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn harness() -> (Interpreter, Vec<u8>) {
        (Interpreter::new(false, false), Vec::new())
    }

    #[test]
    fn map_requires_equal_length_vectors() {
        let (mut interp, mut stdout) = harness();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        let f = Value::Builtin(crate::builtins::Builtin::Add);
        let a = Value::Vector(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::Vector(vec![Value::Int(1)]);
        assert!(map(&mut interp, &mut io, &f, &[a, b]).is_err());
    }

    #[test]
    fn fold_without_explicit_accumulator_seeds_from_head() {
        let (mut interp, mut stdout) = harness();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        let f = Value::Builtin(crate::builtins::Builtin::Add);
        let v = Value::Vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(fold(&mut interp, &mut io, &f, &[v]).unwrap(), Value::Int(6));
    }

    #[test]
    fn accumulate_includes_the_seed() {
        let (mut interp, mut stdout) = harness();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        let f = Value::Builtin(crate::builtins::Builtin::Add);
        let v = Value::Vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let result = accumulate(&mut interp, &mut io, &f, &[Value::Int(0), v]).unwrap();
        assert_eq!(
            result,
            Value::Vector(vec![Value::Int(0), Value::Int(1), Value::Int(3), Value::Int(6)])
        );
    }
}
