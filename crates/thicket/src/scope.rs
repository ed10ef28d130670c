//! Runtime variable resolution, grounded on `scoping.h`'s `VariableScope<T>`.
//!
//! Each name maps to a stack of `(value, depth)` pairs, most recent on top.
//! `increment`/`decrement` track closure-call nesting; decrementing past a
//! binding's depth evicts it, giving lexical-looking shadowing without an
//! explicit stack of scope frames.

use std::collections::HashMap;

use crate::error::{InterpError, RunResult};

#[derive(Debug, Clone)]
pub struct Scope<T> {
    bindings: HashMap<String, Vec<(T, u32)>>,
    depth: u32,
}

impl<T: Clone> Default for Scope<T> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            depth: 0,
        }
    }
}

impl<T: Clone> Scope<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn increment(&mut self) {
        self.depth += 1;
    }

    /// Decrement the call depth and evict every binding made at a deeper
    /// level. Panics on underflow, same as the unsigned wraparound in the
    /// original — the evaluator is responsible for never calling this at
    /// depth `0`.
    pub fn decrement(&mut self) {
        self.depth -= 1;
        self.clean();
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> RunResult<T> {
        self.bindings
            .get(name)
            .and_then(|stack| stack.last())
            .map(|(value, _)| value.clone())
            .ok_or_else(|| InterpError::name(name))
    }

    pub fn get_or(&self, name: &str, fallback: T) -> T {
        self.get(name).unwrap_or(fallback)
    }

    /// The depth `name` was last bound at, if it is set.
    pub fn bound_depth(&self, name: &str) -> Option<u32> {
        self.bindings
            .get(name)
            .and_then(|stack| stack.last())
            .map(|(_, depth)| *depth)
    }

    /// Bind `name` to `value` at the current depth. Replaces any binding
    /// already made at this same depth rather than shadowing it, so
    /// re-assigning a variable inside one call frame mutates in place.
    pub fn set(&mut self, name: &str, value: T) {
        let stack = self.bindings.entry(name.to_string()).or_default();
        if matches!(stack.last(), Some((_, depth)) if *depth == self.depth) {
            stack.pop();
        }
        stack.push((value, self.depth));
    }

    /// Total number of live bindings across all names.
    pub fn tally(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    fn clean(&mut self) {
        self.bindings.retain(|_, stack| {
            while matches!(stack.last(), Some((_, depth)) if *depth > self.depth) {
                stack.pop();
            }
            !stack.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadowed_binding_restores_after_decrement() {
        let mut scope: Scope<i32> = Scope::new();
        scope.set("x", 1);
        scope.increment();
        scope.set("x", 2);
        assert_eq!(scope.get("x").unwrap(), 2);
        scope.decrement();
        assert_eq!(scope.get("x").unwrap(), 1);
    }

    #[test]
    fn decrement_drops_name_entirely_when_only_binding_was_deeper() {
        let mut scope: Scope<i32> = Scope::new();
        scope.increment();
        scope.set("y", 9);
        scope.decrement();
        assert!(!scope.is_set("y"));
    }

    #[test]
    fn reassignment_within_same_depth_replaces_rather_than_shadows() {
        let mut scope: Scope<i32> = Scope::new();
        scope.set("x", 1);
        scope.set("x", 2);
        assert_eq!(scope.tally(), 1);
        assert_eq!(scope.get("x").unwrap(), 2);
    }

    #[test]
    fn unset_variable_is_a_name_error() {
        let scope: Scope<i32> = Scope::new();
        assert!(scope.get("nope").is_err());
    }
}
