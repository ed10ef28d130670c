//! End-to-end scenarios straight from spec.md §8: literal source in, literal
//! stdout out. Unlike the unit tests embedded in each module, these exercise
//! the full pipeline — reader, evaluator, builtins, and the lazy trailing
//! newline — the way a user invoking the `thicket` binary would see it.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use thicket::{Interpreter, Io};

fn run(source: &str) -> String {
    let mut interp = Interpreter::new(false, false);
    let mut stdout = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let mut io = Io::new(&mut stdout, &mut stdin);
    interp
        .run_source(&mut io, source, &["thicket".to_string()])
        .unwrap_or_else(|e| panic!("{source}: {e}"));
    String::from_utf8(stdout).unwrap()
}

#[test]
fn scenario_1_sums_three_numbers() {
    assert_eq!(run("(put (add 1 2 3))"), "6\n");
}

#[test]
fn scenario_2_let_then_three_puts_share_one_trailing_newline() {
    assert_eq!(
        run(r#"(do (let x 10) (put x) (put " ") (put (mul x x)))"#),
        "10 100\n"
    );
}

#[test]
fn scenario_3_map_squares_every_element() {
    assert_eq!(
        run("(put (map (closure {{n} (mul n n)}) [1 2 3 4]))"),
        "[1 4 9 16]\n"
    );
}

#[test]
fn scenario_4_fold_sums_with_explicit_seed() {
    assert_eq!(
        run("(put (fold (closure {{a b} (add a b)}) [1 2 3 4 5] 0))"),
        "15\n"
    );
}

#[test]
fn scenario_5_while_loop_counts_up() {
    assert_eq!(
        run("(do (let i 0) (while {(lt i 3)} {(do (put i) (let i (add i 1)))}))"),
        "012\n"
    );
}

#[test]
fn scenario_6_slice_is_stop_inclusive() {
    assert_eq!(run("(put (slice [10 20 30 40 50] 1 3))"), "[20 30 40]\n");
}

#[test]
fn closures_capture_values_not_slots_at_return_time() {
    // A closure returned from another closure should see the outer
    // parameter's *value* at the moment it was returned, not a live slot
    // that later calls could mutate out from under it.
    let source = r#"
        (do
            (let make_adder (closure {{n} (closure {{x} (add x n)})}))
            (let add5 (call make_adder 5))
            (put (call add5 10)))
    "#;
    assert_eq!(run(source), "15\n");
}

#[test]
fn break_stops_a_while_loop_immediately() {
    let source = r#"
        (do
            (let i 0)
            (while {(lt i 10)} {(do (ternary (eq i 3) {(break)} {(do (put i) (let i (add i 1)))}))}))
    "#;
    assert_eq!(run(source), "012\n");
}

#[test]
fn return_escapes_a_closure_before_its_final_expression() {
    let source = r#"
        (do
            (let f (closure {{n} (do (ternary (gt n 0) {(return "positive")} {(return "non-positive")}) (put "unreachable"))}))
            (put (call f 5)))
    "#;
    assert_eq!(run(source), "positive\n");
}

#[test]
fn assert_failure_is_a_fatal_error() {
    let mut interp = Interpreter::new(false, false);
    let mut stdout = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let mut io = Io::new(&mut stdout, &mut stdin);
    let err = interp
        .run_source(&mut io, r#"(assert (eq 1 2) "one is not two")"#, &["thicket".to_string()])
        .unwrap_err();
    assert!(err.to_string().contains("one is not two"));
}

#[test]
fn safe_mode_rejects_a_malformed_argument_vector() {
    let mut interp = Interpreter::new(true, false);
    let mut stdout = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let mut io = Io::new(&mut stdout, &mut stdin);
    assert!(interp
        .run_source(&mut io, r#"(add 1 "two")"#, &["thicket".to_string()])
        .is_err());
}
