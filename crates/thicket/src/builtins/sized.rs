//! Index-aware sequence builtins (spec §4.7). Negative indices count from
//! the end (`-1` == last element). Mutating-looking operations (`push`,
//! `pop`, `insert`) are pure: they return a new collection rather than
//! aliasing the caller's binding, since builtins only ever see already-owned,
//! evaluated values — there is no handle to mutate through. Rebinding the
//! result (`(let v (push x v))`) is the idiom this language uses instead.

use crate::error::{InterpError, RunResult};
use crate::value::Value;

/// Resolve a (possibly negative) index against a collection of length `len`.
fn normalize(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    (0..len as i64).contains(&resolved).then_some(resolved as usize)
}

pub fn len(v: &Value) -> RunResult<Value> {
    Ok(Value::Int(v.len().expect("vecex guarantees an iterable argument") as i64))
}

pub fn get(index: &Value, target: &Value) -> RunResult<Value> {
    let i = index.as_int().expect("vecex guarantees an int index");
    match target {
        Value::Vector(items) => {
            let idx = normalize(i, items.len()).ok_or_else(|| InterpError::domain(format!("index {i} out of bounds")))?;
            Ok(items[idx].clone())
        }
        Value::List(items) => {
            let idx = normalize(i, items.len()).ok_or_else(|| InterpError::domain(format!("index {i} out of bounds")))?;
            Ok(items[idx].clone())
        }
        _ => unreachable!("vecex guarantees an indexable target"),
    }
}

/// `start`/`stop` are both inclusive (spec Open Question 2, resolved in
/// `SPEC_FULL.md` §3); `step` defaults to `1` and may run backwards. Unlike
/// `range`, a zero step is forbidden here (spec §4.7/§7) and is a domain
/// error rather than an empty result.
pub fn slice(args: &[Value]) -> RunResult<Value> {
    let start = args[1].as_int().expect("vecex guarantees an int start");
    let step = args.get(3).map_or(1, |v| v.as_int().expect("vecex guarantees an int step"));
    if step == 0 {
        return Err(InterpError::domain("`slice` step must not be zero"));
    }

    match &args[0] {
        Value::Vector(items) => {
            let stop = args.get(2).map_or(items.len() as i64 - 1, |v| v.as_int().expect("int stop"));
            Ok(Value::Vector(slice_indices(start, stop, step, items.len()).map(|i| items[i].clone()).collect()))
        }
        Value::Str(bytes) => {
            let stop = args.get(2).map_or(bytes.len() as i64 - 1, |v| v.as_int().expect("int stop"));
            Ok(Value::Str(slice_indices(start, stop, step, bytes.len()).map(|i| bytes[i]).collect()))
        }
        _ => unreachable!("vecex guarantees a vector or string target"),
    }
}

/// Indices visited by a `start..=stop` slice with the given nonzero `step`,
/// clamped to `[0, len)`. Callers (`slice`) are responsible for rejecting a
/// zero step before reaching here.
fn slice_indices(start: i64, stop: i64, step: i64, len: usize) -> impl Iterator<Item = usize> {
    debug_assert_ne!(step, 0, "slice_indices requires a nonzero step");
    let mut out = Vec::new();
    if len == 0 {
        return out.into_iter();
    }
    let Some(start) = normalize(start, len) else {
        return out.into_iter();
    };
    let stop = normalize(stop, len).unwrap_or(if stop < 0 { 0 } else { len - 1 });
    let mut i = start as i64;
    let stop = stop as i64;
    if step > 0 {
        while i <= stop {
            out.push(i as usize);
            i += step;
        }
    } else {
        while i >= stop {
            out.push(i as usize);
            i += step;
        }
    }
    out.into_iter()
}

/// Returns the full resulting vector (spec Open Question 3, resolved: not a
/// one-element vector). `index == len` appends. Argument order is
/// `(value, index, target)`, per spec §4.7's documented calling convention.
pub fn insert(args: &[Value]) -> RunResult<Value> {
    let Value::Vector(items) = &args[2] else {
        unreachable!("vecex guarantees a vector target")
    };
    let index = args[1].as_int().expect("vecex guarantees an int index");
    let len = items.len();
    let at = if index == len as i64 {
        len
    } else {
        normalize(index, len).ok_or_else(|| InterpError::domain(format!("index {index} out of bounds")))?
    };
    let mut result = items.clone();
    result.insert(at, args[0].clone());
    Ok(Value::Vector(result))
}

/// `List` only supports insertion at its ends; `linsert` always appends to
/// the back.
pub fn linsert(value: &Value, list: &Value) -> RunResult<Value> {
    let Value::List(items) = list else {
        unreachable!("vecex guarantees a list target")
    };
    let mut result = items.clone();
    result.push_back(value.clone());
    Ok(Value::List(result))
}

pub fn push(value: &Value, vector: &Value) -> RunResult<Value> {
    let Value::Vector(items) = vector else {
        unreachable!("vecex guarantees a vector target")
    };
    let mut result = items.clone();
    result.push(value.clone());
    Ok(Value::Vector(result))
}

pub fn pop(vector: &Value) -> RunResult<Value> {
    let Value::Vector(items) = vector else {
        unreachable!("vecex guarantees a vector target")
    };
    if items.is_empty() {
        return Err(InterpError::domain("`pop` of an empty vector"));
    }
    let mut result = items.clone();
    result.pop();
    Ok(Value::Vector(result))
}

/// First index of `needle` in `haystack`, or `-1` if absent. `Str` matches a
/// `Str` needle as a substring; `Vector`/`List` match elementwise.
pub fn find(needle: &Value, haystack: &Value) -> Value {
    let index = match haystack {
        Value::Str(bytes) => {
            let Value::Str(pat) = needle else { return Value::Int(-1) };
            bytes.windows(pat.len().max(1)).position(|w| w == pat.as_slice())
        }
        Value::Vector(items) => items.iter().position(|v| v.structural_eq(needle)),
        Value::List(items) => items.iter().position(|v| v.structural_eq(needle)),
        Value::Expression(tree) | Value::Closure(tree) => tree.nodes.iter().position(|v| v.structural_eq(needle)),
        _ => unreachable!("vecex guarantees an iterable haystack"),
    };
    Value::Int(index.map_or(-1, |i| i as i64))
}

pub fn repeat(count: &Value, value: &Value) -> RunResult<Value> {
    let n = count.as_int().expect("vecex guarantees an int count");
    if n < 0 {
        return Err(InterpError::domain(format!("`repeat` count must be non-negative, got {n}")));
    }
    Ok(Value::Vector(std::iter::repeat(value.clone()).take(n as usize).collect()))
}

/// `[start, stop)` with arbitrary step sign; a zero step yields an empty
/// vector rather than an error (spec §4.7, deliberately looser than
/// `original_source/lisp/gen.h`'s `range` signature — see `DESIGN.md`).
pub fn range(args: &[Value]) -> RunResult<Value> {
    let (start, stop) = match (args.first(), args.get(1)) {
        (Some(a), Some(b)) => (a.as_int().expect("int start"), b.as_int().expect("int stop")),
        (Some(a), None) => (0, a.as_int().expect("int stop")),
        (None, None) => (0, 0),
    };
    let step = args.get(2).map_or(1, |v| v.as_int().expect("int step"));

    let mut out = Vec::new();
    if step == 0 {
        return Ok(Value::Vector(out));
    }
    let mut i = start;
    if step > 0 {
        while i < stop {
            out.push(Value::Int(i));
            i += step;
        }
    } else {
        while i > stop {
            out.push(Value::Int(i));
            i += step;
        }
    }
    Ok(Value::Vector(out))
}

/// All arguments must share a tag (all `Str` or all `Vector`); mixing is a
/// domain error.
pub fn join(args: &[Value]) -> RunResult<Value> {
    if args.iter().all(|v| matches!(v, Value::Str(_))) {
        let mut out = Vec::new();
        for v in args {
            let Value::Str(bytes) = v else { unreachable!() };
            out.extend_from_slice(bytes);
        }
        return Ok(Value::Str(out));
    }
    if args.iter().all(|v| matches!(v, Value::Vector(_))) {
        let mut out = Vec::new();
        for v in args {
            let Value::Vector(items) = v else { unreachable!() };
            out.extend(items.iter().cloned());
        }
        return Ok(Value::Vector(out));
    }
    Err(InterpError::domain("`join` requires every argument to share a tag (all strings or all vectors)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_index_counts_from_end() {
        let v = Value::Vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(get(&Value::Int(-1), &v).unwrap(), Value::Int(3));
    }

    #[test]
    fn out_of_bounds_index_is_a_domain_error() {
        let v = Value::Vector(vec![Value::Int(1)]);
        assert!(get(&Value::Int(5), &v).is_err());
    }

    #[test]
    fn slice_is_inclusive_of_stop() {
        let v = Value::Vector(vec![10, 20, 30, 40, 50].into_iter().map(Value::Int).collect());
        let sliced = slice(&[v, Value::Int(1), Value::Int(3)]).unwrap();
        assert_eq!(
            sliced,
            Value::Vector(vec![Value::Int(20), Value::Int(30), Value::Int(40)])
        );
    }

    #[test]
    fn slice_zero_step_is_a_domain_error() {
        let v = Value::Vector(vec![10, 20, 30].into_iter().map(Value::Int).collect());
        assert!(slice(&[v, Value::Int(0), Value::Int(2), Value::Int(0)]).is_err());
    }

    #[test]
    fn insert_at_len_appends_and_returns_full_vector() {
        let v = Value::Vector(vec![Value::Int(1), Value::Int(2)]);
        let result = insert(&[Value::Int(3), Value::Int(2), v]).unwrap();
        assert_eq!(
            result,
            Value::Vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn push_and_pop_round_trip() {
        let v = Value::Vector(vec![Value::Int(1)]);
        let pushed = push(&Value::Int(2), &v).unwrap();
        assert_eq!(pushed, Value::Vector(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(pop(&pushed).unwrap(), v);
    }

    #[test]
    fn find_returns_negative_one_when_absent() {
        let v = Value::Vector(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(find(&Value::Int(9), &v), Value::Int(-1));
    }

    #[test]
    fn range_with_zero_step_is_empty_not_an_error() {
        assert_eq!(range(&[Value::Int(0), Value::Int(5), Value::Int(0)]).unwrap(), Value::Vector(vec![]));
    }

    #[test]
    fn range_excludes_stop() {
        let v = range(&[Value::Int(0), Value::Int(3)]).unwrap();
        assert_eq!(v, Value::Vector(vec![Value::Int(0), Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn join_requires_a_shared_tag() {
        let strs = [Value::Str(b"a".to_vec()), Value::Str(b"b".to_vec())];
        assert_eq!(join(&strs).unwrap(), Value::Str(b"ab".to_vec()));
        let mixed = [Value::Str(b"a".to_vec()), Value::Vector(vec![])];
        assert!(join(&mixed).is_err());
    }
}
