//! A small regex-like matcher over sequences of [`Value`], used by builtin
//! dispatch (when running in safe mode) as the sole gatekeeper for argument
//! shape. Grounded on `vecex.h`'s `Token`/`fullmatch`: same five node kinds,
//! same greedy, non-backtracking-across-positions matching strategy. Named
//! capture groups from the original are dropped — nothing here needs to
//! recover which positions matched which group, only whether the whole
//! argument vector matches.

use crate::value::{Type, Value};

/// One node of a compiled argument pattern.
#[derive(Debug, Clone)]
pub enum Node {
    /// Consume the child nodes in order.
    Just(Vec<Node>),
    /// Consume exactly one item, unconditionally.
    Dot,
    /// Consume one item that satisfies every listed type.
    Intersection(Vec<Type>),
    /// Consume one item that satisfies at least one listed type.
    Union(Vec<Type>),
    /// Repeat `inner` greedily, at least `min` times and at most `max` (`None` = unbounded).
    Between {
        min: usize,
        max: Option<usize>,
        inner: Box<Node>,
    },
}

impl Node {
    fn try_match(&self, items: &[Value], start: usize) -> Option<usize> {
        match self {
            Self::Just(children) => {
                let mut cursor = start;
                for child in children {
                    cursor = child.try_match(items, cursor)?;
                }
                Some(cursor)
            }
            Self::Dot => (start < items.len()).then_some(start + 1),
            Self::Union(types) => {
                let item = items.get(start)?;
                types.iter().any(|t| t.matches(item)).then_some(start + 1)
            }
            Self::Intersection(types) => {
                let item = items.get(start)?;
                types.iter().all(|t| t.matches(item)).then_some(start + 1)
            }
            Self::Between { min, max, inner } => {
                let mut cursor = start;
                let mut count = 0usize;
                while max.is_none_or(|m| count < m) {
                    match inner.try_match(items, cursor) {
                        Some(next) => {
                            cursor = next;
                            count += 1;
                        }
                        None => break,
                    }
                }
                (count >= *min).then_some(cursor)
            }
        }
    }
}

/// Whether `pattern` matches the whole of `items` (no leftover, no shortfall).
pub fn fullmatch(pattern: &Node, items: &[Value]) -> bool {
    matches!(pattern.try_match(items, 0), Some(end) if end == items.len())
}

/// How many times a slot in the surface pattern may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    Star,
    Plus,
    Qmark,
}

/// One position in a builtin's declared argument shape: the set of types
/// accepted there (OR'd together) and how many consecutive arguments it may
/// consume.
#[derive(Debug, Clone)]
pub struct Slot {
    pub types: Vec<Type>,
    pub quantifier: Quantifier,
}

impl Slot {
    pub fn one(types: impl Into<Vec<Type>>) -> Self {
        Self {
            types: types.into(),
            quantifier: Quantifier::One,
        }
    }

    pub fn star(types: impl Into<Vec<Type>>) -> Self {
        Self {
            types: types.into(),
            quantifier: Quantifier::Star,
        }
    }

    pub fn plus(types: impl Into<Vec<Type>>) -> Self {
        Self {
            types: types.into(),
            quantifier: Quantifier::Plus,
        }
    }

    pub fn qmark(types: impl Into<Vec<Type>>) -> Self {
        Self {
            types: types.into(),
            quantifier: Quantifier::Qmark,
        }
    }
}

/// Compile a builtin's declared argument shape into a matchable pattern.
pub fn build_pattern(slots: &[Slot]) -> Node {
    let children = slots
        .iter()
        .map(|slot| {
            let unit = if slot.types == [Type::Any] {
                Node::Dot
            } else {
                Node::Union(slot.types.clone())
            };
            match slot.quantifier {
                Quantifier::One => unit,
                Quantifier::Star => Node::Between {
                    min: 0,
                    max: None,
                    inner: Box::new(unit),
                },
                Quantifier::Plus => Node::Between {
                    min: 1,
                    max: None,
                    inner: Box::new(unit),
                },
                Quantifier::Qmark => Node::Between {
                    min: 0,
                    max: Some(1),
                    inner: Box::new(unit),
                },
            }
        })
        .collect();
    Node::Just(children)
}

/// Render a slot list back into the bracketed signature shown in
/// `[CastingError]` messages, e.g. `[int int*]`.
pub fn describe(slots: &[Slot]) -> String {
    let mut out = String::from("[");
    for (i, slot) in slots.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let names: Vec<_> = slot.types.iter().map(|t| t.name()).collect();
        out.push_str(&names.join("|"));
        out.push_str(match slot.quantifier {
            Quantifier::One => "",
            Quantifier::Star => "*",
            Quantifier::Plus => "+",
            Quantifier::Qmark => "?",
        });
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&n| Value::Int(n)).collect()
    }

    #[test]
    fn fixed_arity_matches_exact_count() {
        let pattern = build_pattern(&[Slot::one([Type::Int]), Slot::one([Type::Int])]);
        assert!(fullmatch(&pattern, &ints(&[1, 2])));
        assert!(!fullmatch(&pattern, &ints(&[1])));
        assert!(!fullmatch(&pattern, &ints(&[1, 2, 3])));
    }

    #[test]
    fn star_accepts_empty_and_many() {
        let pattern = build_pattern(&[Slot::star([Type::Numeric])]);
        assert!(fullmatch(&pattern, &[]));
        assert!(fullmatch(&pattern, &ints(&[1, 2, 3, 4])));
    }

    #[test]
    fn plus_requires_at_least_one() {
        let pattern = build_pattern(&[Slot::plus([Type::Numeric])]);
        assert!(!fullmatch(&pattern, &[]));
        assert!(fullmatch(&pattern, &ints(&[1])));
    }

    #[test]
    fn qmark_allows_missing_tail() {
        let pattern = build_pattern(&[Slot::one([Type::Str]), Slot::qmark([Type::Int])]);
        let s = Value::Str(b"x".to_vec());
        assert!(fullmatch(&pattern, &[s.clone()]));
        assert!(fullmatch(&pattern, &[s, Value::Int(1)]));
    }

    #[test]
    fn union_of_kinds_matches_either() {
        let pattern = build_pattern(&[Slot::one([Type::Str, Type::Vector])]);
        assert!(fullmatch(&pattern, &[Value::Str(b"x".to_vec())]));
        assert!(fullmatch(&pattern, &[Value::Vector(vec![])]));
        assert!(!fullmatch(&pattern, &[Value::Int(1)]));
    }

    #[test]
    fn any_matches_every_tag() {
        let pattern = build_pattern(&[Slot::one([Type::Any])]);
        assert!(fullmatch(&pattern, &[Value::Nil]));
        assert!(fullmatch(&pattern, &[Value::Bool(true)]));
    }
}
