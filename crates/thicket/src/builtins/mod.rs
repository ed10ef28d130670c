//! The built-in function catalogue (spec §4.7). `Builtin` is the dispatch
//! enum every builtin reference resolves to at read time (`reader::classify`);
//! `call` drives it to a `Flow` once its arguments have been evaluated.
//!
//! Organized one file per role (`arithmetic`, `bitwise`, …) rather than the
//! teacher's one-function-per-file layout: at ~70 functions this catalogue
//! reads more naturally grouped, and the dispatch enum still gives O(1)
//! lookup and a jump-table `match` regardless of how the implementations are
//! filed.

use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

use crate::error::RunResult;
use crate::evaluator::Flow;
use crate::value::Type;
use crate::vecex::Slot;
use crate::{Interpreter, Io};

mod arithmetic;
mod bitwise;
mod comparison;
mod constructors;
mod control;
mod higher_order;
mod introspection;
mod io;
mod regex_ops;
mod sized;

/// One builtin function or special form. `Display`/`EnumString` (via
/// `strum`, `serialize_all = "snake_case"`) give the reader its name lookup,
/// exactly as `ouros::builtins::BuiltinsFunctions` does for the teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    Flip,

    And,
    Or,
    Xor,

    Eq,
    Neq,
    Gt,
    Lt,
    Geq,
    Leq,

    Int,
    Float,
    Bool,
    #[strum(serialize = "type")]
    TypeCtor,
    Vector,
    List,
    #[strum(serialize = "closure")]
    ClosureCtor,

    Put,
    Input,
    Repr,
    Chr,
    Ord,

    Len,
    Get,
    Slice,
    Insert,
    Linsert,
    Push,
    Pop,
    Find,
    Repeat,
    Range,
    Join,

    Map,
    Fold,
    Accumulate,
    Apply,
    Call,
    Eval,
    EvalExpr,

    Typeof,
    Typematch,
    Help,
    Copy,
    Not,

    Match,
    Split,
    Findall,

    Do,
    Ternary,
    While,
    Break,
    Return,
    Exit,
    Assert,
    Let,
    Seed,
    Rand,
    Parse,

    /// The `{ … }` marker. Never reaches `call` — `evaluator::eval` special-cases
    /// it ahead of generic dispatch (spec §4.6 step 4).
    Expression,
}

impl Builtin {
    /// Look up a builtin by its source-text name, if any. Wraps the
    /// `strum`-derived `FromStr` so `reader::classify` doesn't need to know
    /// which derive crate is in play.
    pub fn lookup(word: &str) -> Option<Self> {
        Self::from_str(word).ok()
    }

    /// The declared argument shape checked by `vecex` in safe mode (spec
    /// §4.4). Grounded on `original_source/lisp/gen.h`'s `BUILTINS_TYPES`
    /// table; deviations from that early-revision table (`put`'s variadic
    /// arity, `range`'s dropped `truthy` constraint on `step`) are recorded
    /// in `DESIGN.md`.
    pub fn slots(self) -> Vec<Slot> {
        use Type::*;
        match self {
            Self::Add | Self::Mul | Self::And | Self::Or | Self::Xor | Self::Gt | Self::Geq | Self::Lt | Self::Leq => {
                vec![Slot::star([Numeric])]
            }
            Self::Eq | Self::Neq | Self::List => vec![Slot::star([Any])],
            Self::Sub | Self::Div | Self::Mod => vec![Slot::one([Numeric]), Slot::one([Numeric])],
            Self::Neg | Self::Flip => vec![Slot::one([Numeric])],

            Self::Int | Self::Float => vec![Slot::one([Numeric, Str])],
            Self::Bool => vec![Slot::one([Booly])],
            Self::TypeCtor => vec![Slot::one([Str])],
            Self::Vector => vec![Slot::star([Any])],
            Self::ClosureCtor => vec![Slot::one([Expression])],

            Self::Put => vec![Slot::star([Any])],
            Self::Input => vec![Slot::qmark([Str])],
            Self::Repr | Self::Typeof => vec![Slot::one([Any])],
            Self::Help => vec![Slot::qmark([Any])],
            Self::Chr => vec![Slot::one([Int])],
            Self::Ord => vec![Slot::one([Str])],

            Self::Len => vec![Slot::one([Iterable])],
            Self::Get => vec![Slot::one([Int]), Slot::one([Indexable])],
            Self::Slice => vec![
                Slot::one([Vector, Str]),
                Slot::one([Int]),
                Slot::qmark([Int]),
                Slot::qmark([Int]),
            ],
            // `(value, index, target)`, matching spec §4.7's documented calling
            // convention, not the `(target, index, value)` order an earlier
            // `gen.h` revision used — see DESIGN.md.
            Self::Insert => vec![Slot::one([Any]), Slot::one([Int]), Slot::one([Vector])],
            Self::Linsert => vec![Slot::one([Any]), Slot::one([List])],
            Self::Push => vec![Slot::one([Any]), Slot::one([Vector])],
            Self::Pop => vec![Slot::one([Vector])],
            Self::Find => vec![Slot::one([Any]), Slot::one([Iterable])],
            Self::Repeat => vec![Slot::one([Int]), Slot::one([Any])],
            Self::Range => vec![Slot::qmark([Int]), Slot::qmark([Int]), Slot::qmark([Int])],
            Self::Join => vec![Slot::star([Vector, Str])],

            Self::Map => vec![Slot::one([Callable]), Slot::plus([Vector])],
            Self::Fold | Self::Accumulate => vec![Slot::one([Callable]), Slot::plus([Any])],
            Self::Apply => vec![Slot::one([Callable]), Slot::one([Vector])],
            Self::Call => vec![Slot::one([Callable]), Slot::star([Any])],
            Self::Eval => vec![Slot::one([Expression])],
            Self::EvalExpr => vec![Slot::one([Str])],

            Self::Typematch => vec![Slot::one([Vector]), Slot::one([Vector])],
            Self::Not => vec![Slot::one([Booly])],

            Self::Match | Self::Split | Self::Findall => vec![Slot::one([Str]), Slot::one([Str])],

            Self::Do => vec![Slot::star([Any])],
            // Branches are `{...}`-captured `Expression`s, evaluated lazily —
            // like `while`'s body, only the chosen one ever runs.
            Self::Ternary => vec![Slot::one([Booly]), Slot::one([Expression]), Slot::one([Expression])],
            Self::While => vec![Slot::one([Expression]), Slot::one([Expression])],
            Self::Break => vec![],
            Self::Return => vec![Slot::qmark([Any])],
            Self::Exit => vec![Slot::qmark([Int])],
            Self::Assert => vec![Slot::one([Booly]), Slot::qmark([Str])],
            // `let` is special-cased in `evaluator::eval`; never reaches `call`.
            Self::Let => vec![Slot::one([Variable]), Slot::one([Any])],
            Self::Seed => vec![Slot::one([Int])],
            Self::Rand => vec![Slot::qmark([Int])],
            Self::Parse => vec![Slot::one([Str])],

            Self::Expression => vec![],
        }
    }

    /// Dispatch an already-pattern-checked, already-evaluated argument
    /// vector. Most builtins are pure `Value -> Value`; the ones touching
    /// I/O, the RNG, control flow, or recursive evaluation take `interp`/`io`
    /// explicitly.
    pub fn call(self, interp: &mut Interpreter, io: &mut Io, args: Vec<crate::value::Value>) -> RunResult<Flow> {
        use crate::value::Value;

        match self {
            Self::Add => Ok(Flow::Value(arithmetic::add(&args))),
            Self::Mul => Ok(Flow::Value(arithmetic::mul(&args))),
            Self::Sub => Ok(Flow::Value(arithmetic::sub(&args[0], &args[1]))),
            Self::Div => arithmetic::div(&args[0], &args[1]).map(Flow::Value),
            Self::Mod => arithmetic::modulo(&args[0], &args[1]).map(Flow::Value),
            Self::Neg => Ok(Flow::Value(arithmetic::neg(&args[0]))),
            Self::Flip => arithmetic::flip(&args[0]).map(Flow::Value),

            Self::And => bitwise::and(&args).map(Flow::Value),
            Self::Or => bitwise::or(&args).map(Flow::Value),
            Self::Xor => bitwise::xor(&args).map(Flow::Value),

            Self::Eq => Ok(Flow::Value(comparison::eq(&args))),
            Self::Neq => Ok(Flow::Value(comparison::neq(&args))),
            Self::Gt => comparison::gt(&args).map(Flow::Value),
            Self::Lt => comparison::lt(&args).map(Flow::Value),
            Self::Geq => comparison::geq(&args).map(Flow::Value),
            Self::Leq => comparison::leq(&args).map(Flow::Value),

            Self::Int => constructors::int(&args[0]).map(Flow::Value),
            Self::Float => constructors::float(&args[0]).map(Flow::Value),
            Self::Bool => Ok(Flow::Value(Value::Bool(args[0].truthy()?))),
            Self::TypeCtor => constructors::type_ctor(&args[0]).map(Flow::Value),
            Self::Vector => Ok(Flow::Value(Value::Vector(args))),
            Self::List => Ok(Flow::Value(Value::List(args.into_iter().collect()))),
            Self::ClosureCtor => constructors::closure_ctor(&args[0]).map(Flow::Value),

            Self::Put => io::put(io, &args).map(Flow::Value),
            Self::Input => io::input(io, &args).map(Flow::Value),
            Self::Repr => Ok(Flow::Value(io::repr(&args))),
            Self::Chr => io::chr(&args[0]).map(Flow::Value),
            Self::Ord => io::ord(&args[0]).map(Flow::Value),

            Self::Len => sized::len(&args[0]).map(Flow::Value),
            Self::Get => sized::get(&args[0], &args[1]).map(Flow::Value),
            Self::Slice => sized::slice(&args).map(Flow::Value),
            Self::Insert => sized::insert(&args).map(Flow::Value),
            Self::Linsert => sized::linsert(&args[0], &args[1]).map(Flow::Value),
            Self::Push => sized::push(&args[0], &args[1]).map(Flow::Value),
            Self::Pop => sized::pop(&args[0]).map(Flow::Value),
            Self::Find => Ok(Flow::Value(sized::find(&args[0], &args[1]))),
            Self::Repeat => sized::repeat(&args[0], &args[1]).map(Flow::Value),
            Self::Range => sized::range(&args).map(Flow::Value),
            Self::Join => sized::join(&args).map(Flow::Value),

            Self::Map => higher_order::map(interp, io, &args[0], &args[1..]).map(Flow::Value),
            Self::Fold => higher_order::fold(interp, io, &args[0], &args[1..]).map(Flow::Value),
            Self::Accumulate => higher_order::accumulate(interp, io, &args[0], &args[1..]).map(Flow::Value),
            Self::Apply => higher_order::apply(interp, io, &args[0], &args[1]),
            Self::Call => higher_order::call(interp, io, &args[0], args[1..].to_vec()),
            Self::Eval => higher_order::eval(interp, io, &args[0]),
            Self::EvalExpr => higher_order::eval_expr(interp, io, &args[0]),

            Self::Typeof => Ok(Flow::Value(introspection::typeof_(&args))),
            Self::Typematch => Ok(Flow::Value(introspection::typematch(&args[0], &args[1]))),
            Self::Help => Ok(Flow::Value(introspection::help(&args))),
            Self::Copy => Ok(Flow::Value(args[0].clone())),
            Self::Not => Ok(Flow::Value(Value::Bool(!args[0].truthy()?))),

            Self::Match => regex_ops::match_(&args[0], &args[1]).map(Flow::Value),
            Self::Split => regex_ops::split(&args[0], &args[1]).map(Flow::Value),
            Self::Findall => regex_ops::findall(&args[0], &args[1]).map(Flow::Value),

            Self::Do => Ok(Flow::Value(args.into_iter().last().unwrap_or(Value::Nil))),
            Self::Ternary => control::ternary(interp, io, &args[0], &args[1], &args[2]),
            Self::While => control::while_loop(interp, io, &args[0], &args[1]),
            Self::Break => Ok(Flow::Break),
            Self::Return => Ok(Flow::Return(args.into_iter().next().unwrap_or(Value::Nil))),
            Self::Exit => control::exit(&args),
            Self::Assert => control::assert(&args),
            Self::Seed => control::seed(interp, &args[0]).map(Flow::Value),
            Self::Rand => Ok(Flow::Value(control::rand(interp, &args))),
            Self::Parse => control::parse(&args[0]).map(Flow::Value),

            Self::Let | Self::Expression => {
                unreachable!("{self} is special-cased in the evaluator, never dispatched here")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_round_trips_through_display() {
        assert_eq!(Builtin::lookup("add"), Some(Builtin::Add));
        assert_eq!(Builtin::Add.to_string(), "add");
    }

    #[test]
    fn type_constructor_serializes_to_bare_type() {
        assert_eq!(Builtin::lookup("type"), Some(Builtin::TypeCtor));
        assert_eq!(Builtin::TypeCtor.to_string(), "type");
    }

    #[test]
    fn unknown_word_is_not_a_builtin() {
        assert_eq!(Builtin::lookup("frobnicate"), None);
    }
}
