//! Introspection builtins (spec §4.7): `typeof` reports a value's tag,
//! `typematch` exposes the `vecex` matcher to user code, `help` describes a
//! value or builtin, `copy`/`not` are dispatched directly in
//! `builtins::Builtin::call` since they need nothing beyond the argument
//! vector itself.

use crate::value::{Type, Value};
use crate::vecex::{self, Quantifier, Slot};

pub fn typeof_(args: &[Value]) -> Value {
    Value::Type(args[0].type_of())
}

/// A `typematch` pattern is a flat vector of `Type` values: a bare type is a
/// one-slot exact match, and a `Star`/`Plus`/`Qmark` marker immediately
/// followed by a type builds a repeating slot — the same convention
/// `original_source/lisp/gen.h` uses to write e.g. `['*' 'numeric']` for a
/// variadic-numeric signature.
pub fn typematch(values: &Value, pattern: &Value) -> Value {
    let (Value::Vector(items), Value::Vector(pat)) = (values, pattern) else {
        unreachable!("vecex guarantees two vector arguments")
    };
    match parse_pattern(pat) {
        Some(slots) => Value::Bool(vecex::fullmatch(&vecex::build_pattern(&slots), items)),
        None => Value::Bool(false),
    }
}

fn parse_pattern(pat: &[Value]) -> Option<Vec<Slot>> {
    let mut slots = Vec::new();
    let mut i = 0;
    while i < pat.len() {
        let Value::Type(t) = pat[i] else { return None };
        match t {
            Type::Star | Type::Plus | Type::Qmark => {
                let Value::Type(inner) = pat.get(i + 1)? else { return None };
                let quantifier = match t {
                    Type::Star => Quantifier::Star,
                    Type::Plus => Quantifier::Plus,
                    Type::Qmark => Quantifier::Qmark,
                    _ => unreachable!(),
                };
                slots.push(Slot {
                    types: vec![*inner],
                    quantifier,
                });
                i += 2;
            }
            concrete => {
                slots.push(Slot::one([concrete]));
                i += 1;
            }
        }
    }
    Some(slots)
}

pub fn help(args: &[Value]) -> Value {
    match args.first() {
        None => Value::Str(
            b"thicket: a small Lisp-family interpreter. Call `(help <value>)` for details on a specific value."
                .to_vec(),
        ),
        Some(Value::Builtin(b)) => {
            let text = format!("<Builtin '{b}'> expects arguments matching {}", vecex::describe(&b.slots()));
            Value::Str(text.into_bytes())
        }
        Some(other) => Value::Str(format!("a value of type '{}'", other.type_of()).into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typeof_reports_the_tag() {
        assert_eq!(typeof_(&[Value::Int(5)]), Value::Type(Type::Int));
    }

    #[test]
    fn typematch_checks_a_flat_type_pattern() {
        let values = Value::Vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let pattern = Value::Vector(vec![Value::Type(Type::Star), Value::Type(Type::Numeric)]);
        assert_eq!(typematch(&values, &pattern), Value::Bool(true));

        let bad_pattern = Value::Vector(vec![Value::Type(Type::Str)]);
        assert_eq!(typematch(&values, &bad_pattern), Value::Bool(false));
    }

    #[test]
    fn help_describes_a_builtin_signature() {
        let Value::Str(text) = help(&[Value::Builtin(crate::builtins::Builtin::Add)]) else {
            panic!("expected a string")
        };
        assert!(String::from_utf8(text).unwrap().contains("numeric"));
    }
}
