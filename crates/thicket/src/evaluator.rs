//! Tree-walking evaluator (spec §4.6). Drives a [`DepthTree<Value>`] node by
//! node, resolving variables through [`Scope`] and dispatching callable nodes
//! to builtins or closures.
//!
//! Control flow (`return`/`break`) is modeled as [`Flow`], a sum type bubbled
//! by every evaluation call, per spec §9's suggestion — idiomatic Rust has no
//! lightweight exception mechanism, and the teacher's own bytecode VM
//! (`ouros::bytecode::vm`) returns a control-flow-shaped value from its
//! instruction loop for the same reason.

use crate::builtins::Builtin;
use crate::depth_tree::DepthTree;
use crate::error::{InterpError, RunResult};
use crate::value::Value;
use crate::{Interpreter, Io, MAX_RECURSION_DEPTH};

/// The outcome of evaluating one node: a plain value, or one of the two
/// recoverable control signals spec §4.6 describes.
#[derive(Debug, Clone)]
pub enum Flow {
    Value(Value),
    Return(Value),
    Break,
}

impl Flow {
    /// Unwrap a `Flow` that is known to carry a plain value (used once a
    /// caller has already confirmed it isn't handling `return`/`break`).
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(v) | Self::Return(v) => v,
            Self::Break => unreachable!("Break does not carry a value"),
        }
    }
}

/// Evaluate the node at `index` in `tree`, per spec §4.6's numbered
/// procedure.
pub fn eval(interp: &mut Interpreter, io: &mut Io, tree: &DepthTree<Value>, index: usize) -> RunResult<Flow> {
    let node = tree.nodes[index].clone();

    let node = match node {
        Value::Variable(name) => interp.scope.get(&name)?,
        other => other,
    };

    if !node.is_callable() {
        return Ok(Flow::Value(node));
    }

    if matches!(node, Value::Builtin(Builtin::Expression)) {
        return Ok(Flow::Value(Value::Expression(Box::new(tree.subtree(index)))));
    }

    if matches!(node, Value::Builtin(Builtin::Let)) {
        return eval_let(interp, io, tree, index);
    }

    let children = tree.direct_children(index);
    if children.is_empty() {
        // No call site detected (spec §4.6 step 7): the name was referenced,
        // not invoked.
        return Ok(Flow::Value(node));
    }

    let mut args = Vec::with_capacity(children.len());
    for child in children {
        match eval(interp, io, tree, child)? {
            Flow::Value(v) => args.push(v),
            other => return Ok(other),
        }
    }

    dispatch(interp, io, node, args)
}

/// `let`'s value subtree is evaluated, but its name node (`nodes[i+1]`) is
/// used verbatim for its identifier rather than evaluated — special-cased
/// ahead of the generic argument-collection pass (spec §4.6 step 5).
fn eval_let(interp: &mut Interpreter, io: &mut Io, tree: &DepthTree<Value>, index: usize) -> RunResult<Flow> {
    let children = tree.direct_children(index);
    let [name_idx, value_idx] = children[..] else {
        return Err(InterpError::domain(format!(
            "`let` expects exactly 2 arguments, got {}",
            children.len()
        )));
    };
    let name = match &tree.nodes[name_idx] {
        Value::Variable(name) => name.clone(),
        other => {
            return Err(InterpError::domain(format!(
                "`let`'s first argument must be a bare name, got `{}`",
                other.to_repr()
            )));
        }
    };
    let value = match eval(interp, io, tree, value_idx)? {
        Flow::Value(v) => v,
        other => return Ok(other),
    };
    interp.scope.set(&name, value.clone());
    Ok(Flow::Value(value))
}

/// A one-element argument vector holding the reader's `NoArgs` sentinel
/// (spec §4.2) is a zero-arity call; normalize it away before pattern
/// checking and dispatch so every other piece of the evaluator can simply
/// work with an empty `Vec`.
fn strip_noargs(args: Vec<Value>) -> Vec<Value> {
    if let [Value::NoArgs] = args[..] {
        Vec::new()
    } else {
        args
    }
}

/// Dispatch a resolved callable (`Builtin` or `Closure`) against an already
/// fully-evaluated argument vector (spec §4.6 step 8).
pub fn dispatch(interp: &mut Interpreter, io: &mut Io, callee: Value, args: Vec<Value>) -> RunResult<Flow> {
    let args = strip_noargs(args);
    match callee {
        Value::Builtin(b) => {
            if interp.safe {
                let slots = b.slots();
                let pattern = crate::vecex::build_pattern(&slots);
                if !crate::vecex::fullmatch(&pattern, &args) {
                    return Err(InterpError::casting(crate::vecex::describe(&slots), &args));
                }
            }
            b.call(interp, io, args)
        }
        Value::Closure(tree) => call_closure(interp, io, &tree, args),
        other => unreachable!("dispatch called on a non-callable value: {other:?}"),
    }
}

/// Invoke a closure (spec §4.6's "Closure call", numbered 4.9): bind
/// parameters at a fresh scope depth, evaluate the body, and — if the result
/// is itself a closure — inline free variables bound at the
/// about-to-exit depth before popping the scope.
pub fn call_closure(
    interp: &mut Interpreter,
    io: &mut Io,
    tree: &DepthTree<Value>,
    args: Vec<Value>,
) -> RunResult<Flow> {
    if interp.scope.depth() >= MAX_RECURSION_DEPTH {
        return Err(InterpError::ScopeOverflow);
    }

    let roots = tree.direct_children(0);
    let [params_idx, body_idxs @ ..] = roots[..] else {
        return Err(InterpError::domain("closure body is malformed: missing parameter list"));
    };
    let param_idxs = tree.direct_children(params_idx);
    if param_idxs.len() != args.len() {
        return Err(InterpError::domain(format!(
            "closure expected {} argument(s), got {}",
            param_idxs.len(),
            args.len()
        )));
    }

    interp.scope.increment();
    let outcome = (|| -> RunResult<Flow> {
        for (&param_idx, arg) in param_idxs.iter().zip(args) {
            let name = match &tree.nodes[param_idx] {
                Value::Variable(name) => name.clone(),
                other => {
                    return Err(InterpError::domain(format!(
                        "closure parameter must be a bare name, got `{}`",
                        other.to_repr()
                    )));
                }
            };
            interp.scope.set(&name, arg);
        }

        let mut result = Value::Nil;
        for &idx in body_idxs {
            match eval(interp, io, tree, idx)? {
                Flow::Value(v) => result = v,
                Flow::Return(v) => {
                    result = v;
                    break;
                }
                Flow::Break => return Err(InterpError::domain("`break` used outside of a `while` loop")),
            }
        }
        Ok(Flow::Value(result))
    })();

    let outcome = outcome.map(|flow| {
        if let Flow::Value(Value::Closure(mut inner)) = flow {
            inline_captures(interp, &mut inner);
            Flow::Value(Value::Closure(inner))
        } else {
            flow
        }
    });

    interp.scope.decrement();
    outcome
}

/// Substitute every free `Variable` node inside a returned closure's body
/// whose name is bound at the current (about-to-exit) scope depth with its
/// bound value. This is the mechanism that lets an inner closure close over
/// its enclosing closure's parameters by value rather than by slot — spec
/// §3 and §4.6 both flag this as a deliberate deviation from true lexical
/// closures over mutable state.
fn inline_captures(interp: &Interpreter, tree: &mut DepthTree<Value>) {
    let current_depth = interp.scope.depth();
    for node in &mut tree.nodes {
        inline_node(interp, node, current_depth);
    }
}

fn inline_node(interp: &Interpreter, node: &mut Value, current_depth: u32) {
    match node {
        Value::Variable(name) => {
            if interp.scope.bound_depth(name) == Some(current_depth) {
                if let Ok(value) = interp.scope.get(name) {
                    *node = value;
                }
            }
        }
        Value::Expression(inner) | Value::Closure(inner) => {
            for n in &mut inner.nodes {
                inline_node(interp, n, current_depth);
            }
        }
        _ => {}
    }
}

/// Run every top-level root of a "flat" tree (no wrapping marker) in
/// sequence — the shape `reader::read` produces, whether the whole source
/// file or a string handed to `parse`/`eval_expr`.
pub fn run_program(interp: &mut Interpreter, io: &mut Io, tree: &DepthTree<Value>) -> RunResult<Flow> {
    let mut roots = Vec::new();
    let mut idx = 0;
    while idx < tree.size() {
        roots.push(idx);
        idx = tree.subtree_range(idx).end;
    }
    run_sequence(interp, io, tree, &roots)
}

/// Evaluate the content of a value captured by `{...}` (spec §4.2/§4.6): if
/// the tree's root is the `expression` marker itself (the shape `subtree(i)`
/// produces at read-evaluation time), skip it and run its direct children as
/// a sequence; otherwise the tree is already "flat" (spec §4.2's reader
/// output shape) and is run the same way `run_program` runs a whole file.
///
/// Both shapes are legitimate: a `{...}` capture always wraps its content
/// behind the marker it was read as (`subtree` includes the node it's rooted
/// at), while text read by `parse`/`eval_expr` never does. A value typed
/// `Expression` may have come from either place, so `eval`/`eval_expr` and
/// `while`'s captured condition/body all go through this one entry point.
pub fn eval_captured(interp: &mut Interpreter, io: &mut Io, tree: &DepthTree<Value>) -> RunResult<Flow> {
    if matches!(tree.nodes.first(), Some(Value::Builtin(Builtin::Expression))) {
        run_sequence(interp, io, tree, &tree.direct_children(0))
    } else {
        run_program(interp, io, tree)
    }
}

fn run_sequence(interp: &mut Interpreter, io: &mut Io, tree: &DepthTree<Value>, roots: &[usize]) -> RunResult<Flow> {
    let mut last = Flow::Value(Value::Nil);
    for &idx in roots {
        last = eval(interp, io, tree, idx)?;
        if !matches!(last, Flow::Value(_)) {
            return Ok(last);
        }
    }
    Ok(last)
}
