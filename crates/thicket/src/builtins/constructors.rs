//! Coercion and wrapping builtins (spec §4.7): `int`/`float`/`bool` convert
//! between numeric representations and strings; `type` names a `Type` value;
//! `vector`/`list` are the function forms of the `[...]` sugar and are
//! dispatched directly in `builtins::Builtin::call`; `closure` re-tags a
//! captured `{...}` expression as callable.

use crate::error::{InterpError, RunResult};
use crate::value::{Type, Value};

pub fn int(v: &Value) -> RunResult<Value> {
    match v {
        Value::Str(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| InterpError::domain(format!("`{text}` is not a valid int literal")))
        }
        other => Ok(Value::Int(other.as_int().expect("vecex guarantees a numeric or string argument"))),
    }
}

pub fn float(v: &Value) -> RunResult<Value> {
    match v {
        Value::Str(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim()
                .parse::<f32>()
                .map(Value::Float)
                .map_err(|_| InterpError::domain(format!("`{text}` is not a valid float literal")))
        }
        Value::Float(f) => Ok(Value::Float(*f)),
        other => Ok(Value::Float(other.as_int().expect("vecex guarantees a numeric or string argument") as f32)),
    }
}

pub fn type_ctor(v: &Value) -> RunResult<Value> {
    let Value::Str(bytes) = v else {
        unreachable!("vecex guarantees a string argument")
    };
    let name = String::from_utf8_lossy(bytes);
    Type::from_name(&name)
        .map(Value::Type)
        .ok_or_else(|| InterpError::domain(format!("`{name}` does not name a type")))
}

pub fn closure_ctor(v: &Value) -> RunResult<Value> {
    match v {
        Value::Expression(tree) => Ok(Value::Closure(tree.clone())),
        _ => unreachable!("vecex guarantees an expression argument"),
    }
}
