//! Control-flow and process builtins (spec §4.7). `do` is dispatched
//! directly in `builtins::Builtin::call` (its arguments are already
//! evaluated left-to-right by the generic argument-collection pass; the
//! last one wins). `let` and `expression` never reach `call` at all — both
//! are special-cased in `evaluator::eval`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{InterpError, RunResult};
use crate::evaluator::{self, Flow};
use crate::reader;
use crate::value::Value;
use crate::{Interpreter, Io, MAX_WHILE_ITERATIONS};

/// Both branches are `{...}`-captured, so only the chosen one ever runs.
pub fn ternary(
    interp: &mut Interpreter,
    io: &mut Io,
    cond: &Value,
    then_branch: &Value,
    else_branch: &Value,
) -> RunResult<Flow> {
    let chosen = if cond.truthy()? { then_branch } else { else_branch };
    let Value::Expression(tree) = chosen else {
        unreachable!("vecex guarantees an expression branch")
    };
    evaluator::eval_captured(interp, io, tree)
}

/// Bounded at `MAX_WHILE_ITERATIONS` (spec §5); exceeding it is a fatal
/// `InfiniteLoop` error, the same way closure recursion is bounded in
/// `evaluator::call_closure`.
pub fn while_loop(interp: &mut Interpreter, io: &mut Io, cond: &Value, body: &Value) -> RunResult<Flow> {
    let (Value::Expression(cond_tree), Value::Expression(body_tree)) = (cond, body) else {
        unreachable!("vecex guarantees two expression arguments")
    };

    let mut iterations = 0u64;
    loop {
        if iterations >= MAX_WHILE_ITERATIONS {
            return Err(InterpError::InfiniteLoop);
        }
        let test = match evaluator::eval_captured(interp, io, cond_tree)? {
            Flow::Value(v) => v,
            other => return Ok(other),
        };
        if !test.truthy()? {
            break;
        }
        match evaluator::eval_captured(interp, io, body_tree)? {
            Flow::Value(_) => {}
            Flow::Break => break,
            ret @ Flow::Return(_) => return Ok(ret),
        }
        iterations += 1;
    }
    Ok(Flow::Value(Value::Nil))
}

/// Terminates the process immediately, matching `ouros-cli::main`'s use of
/// `ExitCode`/`std::process::exit` for explicit exit requests.
pub fn exit(args: &[Value]) -> RunResult<Flow> {
    let code = args.first().map_or(0, |v| v.as_int().expect("vecex guarantees an int code"));
    std::process::exit(code as i32);
}

pub fn assert(args: &[Value]) -> RunResult<Flow> {
    if args[0].truthy()? {
        return Ok(Flow::Value(Value::Nil));
    }
    let message = match args.get(1) {
        Some(Value::Str(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        _ => "assertion failed".to_string(),
    };
    Err(InterpError::Assertion { message })
}

pub fn seed(interp: &mut Interpreter, n: &Value) -> RunResult<Value> {
    let seed = n.as_int().expect("vecex guarantees an int seed");
    interp.rng = ChaCha8Rng::seed_from_u64(seed as u64);
    Ok(Value::Nil)
}

/// No argument: a `Float` in `[0, 1)`. One argument `n`: an `Int` in `[0, n)`.
pub fn rand(interp: &mut Interpreter, args: &[Value]) -> Value {
    match args.first() {
        None => Value::Float(interp.rng.gen::<f32>()),
        Some(v) => {
            let n = v.as_int().expect("vecex guarantees an int bound");
            if n <= 0 {
                Value::Int(0)
            } else {
                Value::Int(interp.rng.gen_range(0..n))
            }
        }
    }
}

/// Parses without evaluating — the function form of what the reader does to
/// a whole source file.
pub fn parse(src: &Value) -> RunResult<Value> {
    let Value::Str(bytes) = src else {
        unreachable!("vecex guarantees a string argument")
    };
    reader::read(&String::from_utf8_lossy(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn harness() -> (Interpreter, Vec<u8>) {
        (Interpreter::new(false, false), Vec::new())
    }

    #[test]
    fn assert_of_false_fails_with_message() {
        let err = assert(&[Value::Bool(false), Value::Str(b"nope".to_vec())]).unwrap_err();
        assert!(matches!(err, InterpError::Assertion { message } if message == "nope"));
    }

    #[test]
    fn assert_of_true_is_a_no_op() {
        assert!(assert(&[Value::Bool(true)]).is_ok());
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut interp = Interpreter::new(false, false);
        seed(&mut interp, &Value::Int(42)).unwrap();
        let a = rand(&mut interp, &[Value::Int(100)]);
        let mut interp2 = Interpreter::new(false, false);
        seed(&mut interp2, &Value::Int(42)).unwrap();
        let b = rand(&mut interp2, &[Value::Int(100)]);
        assert_eq!(a, b);
    }

    #[test]
    fn while_loop_runs_until_condition_is_falsy() {
        let (mut interp, mut stdout) = harness();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        interp.scope.set("i", Value::Int(0));
        let cond = reader::read("(lt i 3)").unwrap();
        let body = reader::read("(let i (add i 1))").unwrap();
        while_loop(&mut interp, &mut io, &cond, &body).unwrap();
        assert_eq!(interp.scope.get("i").unwrap(), Value::Int(3));
    }

    #[test]
    fn parse_does_not_evaluate() {
        let v = parse(&Value::Str(b"(add 1 2)".to_vec())).unwrap();
        assert!(matches!(v, Value::Expression(_)));
    }
}
