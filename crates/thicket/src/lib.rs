//! A small, dynamically-typed Lisp-family interpreter. See `value::Value` for
//! the runtime value universe, `reader::read` for source text parsing, and
//! `Interpreter::run_source` as the top-level entry point.
#![expect(clippy::unnecessary_wraps, reason = "builtin dispatch signatures are uniform")]

use std::io::{BufRead, Write};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod builtins;
pub mod depth_tree;
pub mod error;
pub mod evaluator;
pub mod reader;
pub mod scope;
pub mod value;
pub mod vecex;

pub use error::{InterpError, RunResult};
pub use evaluator::Flow;
pub use value::Value;

use scope::Scope;

/// Closure recursion depth bound (spec §5). Checked at every closure call.
pub const MAX_RECURSION_DEPTH: u32 = 2048;

/// `while` loop iteration bound (spec §5). Checked in `builtins::control::while_loop`.
pub const MAX_WHILE_ITERATIONS: u64 = 100_000;

/// Process-wide interpreter state: the variable scope, the RNG backing
/// `seed`/`rand`, and the two mode flags (`safe` gates vecex argument
/// checking, `debug` gates the AST dump). Threaded through the evaluator and
/// every builtin by `&mut` reference rather than kept in statics, matching
/// the teacher's preference for explicit state over globals.
pub struct Interpreter {
    pub scope: Scope<Value>,
    pub rng: ChaCha8Rng,
    pub safe: bool,
    pub debug: bool,
}

impl Interpreter {
    pub fn new(safe: bool, debug: bool) -> Self {
        Self {
            scope: Scope::new(),
            rng: ChaCha8Rng::from_entropy(),
            safe,
            debug,
        }
    }

    /// Parse and run `source` to completion, binding `argv` (program path at
    /// index 0, per spec §6) into the top-level scope first.
    pub fn run_source(&mut self, io: &mut Io, source: &str, argv: &[String]) -> RunResult<Value> {
        let Value::Expression(tree) = reader::read(source)? else {
            unreachable!("reader::read always returns an Expression")
        };

        if self.debug {
            writeln!(io.stdout, "[DEBUG]\n{}", value::pretty_tree(&tree)).ok();
        }

        self.scope.set(
            "argv",
            Value::Vector(argv.iter().map(|s| Value::Str(s.clone().into_bytes())).collect()),
        );

        let result = match evaluator::run_program(self, io, &tree)? {
            Flow::Value(v) | Flow::Return(v) => v,
            Flow::Break => return Err(InterpError::domain("`break` used outside of a `while` loop")),
        };

        // `put` never writes its own newline (spec §6): stdout gets exactly
        // one, lazily, on successful termination.
        io.stdout.write_all(b"\n").ok();
        Ok(result)
    }
}

/// The interpreter's two I/O handles, bundled so the evaluator and builtins
/// only need to thread one extra parameter. Kept separate from `Interpreter`
/// itself since `Interpreter` is state, while this is just borrowed streams —
/// mirroring the teacher's own split between `Heap`/`Interns` and its
/// `PrintWriter` trait object.
pub struct Io<'a> {
    pub stdout: &'a mut dyn Write,
    pub stdin: &'a mut dyn BufRead,
}

impl<'a> Io<'a> {
    pub fn new(stdout: &'a mut dyn Write, stdin: &'a mut dyn BufRead) -> Self {
        Self { stdout, stdin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(source: &str) -> RunResult<Value> {
        let mut interp = Interpreter::new(false, false);
        let mut stdout = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        interp.run_source(&mut io, source, &["thicket".to_string()])
    }

    #[test]
    fn argv_is_bound_before_evaluation() {
        assert_eq!(run("(get 0 argv)").unwrap(), Value::Str(b"thicket".to_vec()));
    }

    #[test]
    fn put_writes_to_the_provided_stdout() {
        let mut interp = Interpreter::new(false, false);
        let mut stdout = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        interp.run_source(&mut io, "(put (add 1 2 3))", &["thicket".to_string()]).unwrap();
        assert_eq!(stdout, b"6\n");
    }
}
