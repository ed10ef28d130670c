use std::io::{self, BufReader};
use std::{env, fs, process::ExitCode};

use thicket::{InterpError, Interpreter, Io};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: thicket <source-file> <debug:0|1> <safe:0|1> [argv...]");
        return ExitCode::FAILURE;
    }

    let file_path = &args[1];
    let debug = args[2] == "1";
    let safe = args[3] == "1";
    let argv: Vec<String> = std::iter::once(file_path.clone()).chain(args[4..].iter().cloned()).collect();

    let source = match read_file(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut interp = Interpreter::new(safe, debug);
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let stdin = io::stdin();
    let mut stdin = BufReader::new(stdin.lock());
    let mut io = Io::new(&mut stdout, &mut stdin);

    match interp.run_source(&mut io, &source, &argv) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) if !metadata.is_file() => return Err(format!("{file_path} is not a file")),
        Ok(_) => {}
        Err(err) => return Err(format!("reading {file_path}: {err}")),
    }
    fs::read_to_string(file_path).map_err(|err| format!("reading {file_path}: {err}"))
}

/// Mirrors `InterpError::exit_code`; kept separate so a future divergence
/// between the library's taxonomy and the CLI's process exit status doesn't
/// require touching `thicket` itself.
fn exit_code(err: &InterpError) -> u8 {
    err.exit_code()
}
