//! I/O builtins (spec §4.7): `put` concatenates `to_str` of each argument to
//! stdout (no newline — spec §6 adds exactly one, lazily, once the whole
//! program terminates successfully); `input` reads one line; `repr` escapes
//! strings and defers to `to_str` for everything else; `chr`/`ord` convert
//! between a single-byte string and its ordinal.

use std::io::{BufRead, Write};

use crate::error::{InterpError, RunResult};
use crate::value::Value;
use crate::Io;

pub fn put(io: &mut Io, args: &[Value]) -> RunResult<Value> {
    for arg in args {
        let _ = io.stdout.write_all(arg.to_display_string().as_bytes());
    }
    Ok(Value::Nil)
}

pub fn input(io: &mut Io, args: &[Value]) -> RunResult<Value> {
    if let [Value::Str(prompt)] = args {
        let _ = io.stdout.write_all(prompt);
    }
    let mut line = String::new();
    io.stdin
        .read_line(&mut line)
        .map_err(|e| InterpError::domain(format!("failed to read from stdin: {e}")))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Value::Str(line.into_bytes()))
}

pub fn repr(args: &[Value]) -> Value {
    Value::Str(args[0].to_repr().into_bytes())
}

pub fn chr(v: &Value) -> RunResult<Value> {
    let Value::Int(n) = v else {
        unreachable!("vecex guarantees an int argument")
    };
    let byte = u8::try_from(*n).map_err(|_| InterpError::domain(format!("{n} is not a valid byte ordinal")))?;
    Ok(Value::Str(vec![byte]))
}

pub fn ord(v: &Value) -> RunResult<Value> {
    let Value::Str(bytes) = v else {
        unreachable!("vecex guarantees a string argument")
    };
    let &first = bytes.first().ok_or_else(|| InterpError::domain("`ord` of an empty string"))?;
    Ok(Value::Int(i64::from(first)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn put_concatenates_without_separators_or_newline() {
        let mut stdout = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let mut io = Io::new(&mut stdout, &mut stdin);
        put(&mut io, &[Value::Int(10), Value::Str(b" ".to_vec()), Value::Int(100)]).unwrap();
        assert_eq!(stdout, b"10 100");
    }

    #[test]
    fn input_strips_trailing_newline() {
        let mut stdout = Vec::new();
        let mut stdin = Cursor::new(b"hello\n".to_vec());
        let mut io = Io::new(&mut stdout, &mut stdin);
        assert_eq!(input(&mut io, &[]).unwrap(), Value::Str(b"hello".to_vec()));
    }

    #[test]
    fn chr_and_ord_round_trip() {
        let c = chr(&Value::Int(65)).unwrap();
        assert_eq!(c, Value::Str(b"A".to_vec()));
        assert_eq!(ord(&c).unwrap(), Value::Int(65));
    }

    #[test]
    fn repr_escapes_strings_but_not_numbers() {
        assert_eq!(repr(&[Value::Str(b"a\"b".to_vec())]), Value::Str(b"\"a\\\"b\"".to_vec()));
        assert_eq!(repr(&[Value::Int(5)]), Value::Str(b"5".to_vec()));
    }
}
