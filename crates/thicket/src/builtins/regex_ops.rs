//! Regex builtins (spec §4.7), the one place this interpreter calls out to a
//! host library rather than implementing everything itself. Uses
//! `regex::bytes::Regex` rather than the UTF-8-only `regex::Regex` since
//! `Value::Str` is an arbitrary byte sequence (spec §1 Non-goals: tokenization
//! and strings are byte-oriented, not Unicode-aware).

use regex::bytes::Regex;

use crate::error::{InterpError, RunResult};
use crate::value::Value;

fn compile(pattern: &Value) -> RunResult<Regex> {
    let Value::Str(bytes) = pattern else {
        unreachable!("vecex guarantees a string pattern")
    };
    let text = String::from_utf8_lossy(bytes);
    Regex::new(&text).map_err(|e| InterpError::Regex { message: e.to_string() })
}

fn target_bytes(target: &Value) -> &[u8] {
    let Value::Str(bytes) = target else {
        unreachable!("vecex guarantees a string target")
    };
    bytes
}

/// `match` is a *full* match (spec §4.7: "run fullmatch ... against the
/// second argument"), not a substring search — the pattern is anchored at
/// both ends.
pub fn match_(pattern: &Value, target: &Value) -> RunResult<Value> {
    let Value::Str(bytes) = pattern else {
        unreachable!("vecex guarantees a string pattern")
    };
    let text = String::from_utf8_lossy(bytes);
    let anchored = Regex::new(&format!("^(?:{text})$")).map_err(|e| InterpError::Regex { message: e.to_string() })?;
    Ok(Value::Bool(anchored.is_match(target_bytes(target))))
}

pub fn split(pattern: &Value, target: &Value) -> RunResult<Value> {
    let re = compile(pattern)?;
    let pieces = re.split(target_bytes(target)).map(|s| Value::Str(s.to_vec())).collect();
    Ok(Value::Vector(pieces))
}

pub fn findall(pattern: &Value, target: &Value) -> RunResult<Value> {
    let re = compile(pattern)?;
    let matches = re
        .find_iter(target_bytes(target))
        .map(|m| Value::Str(m.as_bytes().to_vec()))
        .collect();
    Ok(Value::Vector(matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::Str(text.as_bytes().to_vec())
    }

    #[test]
    fn match_requires_the_whole_target_to_match() {
        assert_eq!(match_(&s(r"\d+"), &s("123")).unwrap(), Value::Bool(true));
        assert_eq!(match_(&s(r"\d+"), &s("abc123")).unwrap(), Value::Bool(false));
    }

    #[test]
    fn split_breaks_on_every_match() {
        let v = split(&s(","), &s("a,b,c")).unwrap();
        assert_eq!(v, Value::Vector(vec![s("a"), s("b"), s("c")]));
    }

    #[test]
    fn findall_collects_every_match() {
        let v = findall(&s(r"\d+"), &s("a1 b22 c333")).unwrap();
        assert_eq!(v, Value::Vector(vec![s("1"), s("22"), s("333")]));
    }

    #[test]
    fn invalid_pattern_is_a_regex_error() {
        assert!(match_(&s("("), &s("x")).is_err());
    }
}
