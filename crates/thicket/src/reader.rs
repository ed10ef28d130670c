//! Source text → depth-tree of atoms.
//!
//! Two phases, per the cleaner redesign the original design notes call for:
//! a tokenizer that also expands the `[...]`/`{...}` sugars into plain
//! `(vector ...)`/`(expression ...)` token streams, then a recursive builder
//! that lowers the token stream into a [`DepthTree<Value>`]. Zero-arity is
//! detected structurally — an opening bracket whose very next token is its
//! matching closer — so the `NoArgs` sentinel is only ever inserted where it
//! is truly needed, and the elision post-pass the original state machine
//! requires never has anything to elide.

use std::str::FromStr;

use crate::builtins::Builtin;
use crate::depth_tree::DepthTree;
use crate::error::{InterpError, RunResult};
use crate::value::{unescape_bytes, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Paren,
    Square,
    Curly,
}

impl Bracket {
    fn closer(self) -> u8 {
        match self {
            Self::Paren => b')',
            Self::Square => b']',
            Self::Curly => b'}',
        }
    }
}

#[derive(Debug, Clone)]
enum Token {
    Open(Bracket),
    Close(Bracket),
    Word(String),
    Str(Vec<u8>),
}

/// Parse `source` into the top-level `Expression` the evaluator runs.
pub fn read(source: &str) -> RunResult<Value> {
    let tokens = tokenize(source.as_bytes())?;
    let mut tree = DepthTree::new();
    let mut idx = 0;
    while idx < tokens.len() {
        idx = parse_one(&tokens, idx, 0, &mut tree)?;
    }
    Ok(Value::Expression(Box::new(tree)))
}

fn tokenize(src: &[u8]) -> RunResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut stack: Vec<(Bracket, usize)> = Vec::new();
    let mut i = 0;
    let mut word = String::new();

    macro_rules! flush_word {
        () => {
            if !word.is_empty() {
                tokens.push(Token::Word(std::mem::take(&mut word)));
            }
        };
    }

    while i < src.len() {
        let b = src[i];
        match b {
            b';' => {
                flush_word!();
                while i < src.len() && src[i] != b'\n' {
                    i += 1;
                }
            }
            b'"' => {
                flush_word!();
                let start = i;
                i += 1;
                let mut buf = Vec::new();
                loop {
                    if i >= src.len() {
                        return Err(InterpError::Parse {
                            message: format!("unterminated string literal starting at byte {start}"),
                        });
                    }
                    match src[i] {
                        b'\\' if i + 1 < src.len() => {
                            buf.push(src[i]);
                            buf.push(src[i + 1]);
                            i += 2;
                        }
                        b'"' => {
                            i += 1;
                            break;
                        }
                        other => {
                            buf.push(other);
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::Str(buf));
            }
            b'(' | b'[' | b'{' => {
                flush_word!();
                let bracket = match b {
                    b'(' => Bracket::Paren,
                    b'[' => Bracket::Square,
                    _ => Bracket::Curly,
                };
                stack.push((bracket, i));
                tokens.push(Token::Open(bracket));
                match bracket {
                    Bracket::Square => tokens.push(Token::Word("vector".to_string())),
                    Bracket::Curly => tokens.push(Token::Word("expression".to_string())),
                    Bracket::Paren => {}
                }
                i += 1;
            }
            b')' | b']' | b'}' => {
                flush_word!();
                let bracket = match b {
                    b')' => Bracket::Paren,
                    b']' => Bracket::Square,
                    _ => Bracket::Curly,
                };
                match stack.pop() {
                    Some((open, _)) if open == bracket => {}
                    Some((open, pos)) => {
                        return Err(InterpError::Parse {
                            message: format!(
                                "expected '{}' to close bracket opened at byte {pos}, found '{}' at byte {i}",
                                open.closer() as char,
                                b as char
                            )
                        });
                    }
                    None => {
                        return Err(InterpError::Parse {
                            message: format!("unmatched closing bracket '{}' at byte {i}", b as char),
                        });
                    }
                }
                tokens.push(Token::Close(bracket));
                i += 1;
            }
            b' ' | b'\t' | b'\r' | b'\n' => {
                flush_word!();
                i += 1;
            }
            _ => {
                word.push(b as char);
                i += 1;
            }
        }
    }
    flush_word!();

    if let Some((bracket, pos)) = stack.pop() {
        return Err(InterpError::Parse {
            message: format!(
                "unbalanced bracket: '{}' opened at byte {pos} was never closed",
                bracket.closer() as char
            ),
        });
    }

    Ok(tokens)
}

/// Parse exactly one top-level form (an atom, or a bracketed call) starting
/// at `tokens[idx]`, pushing it (and, for a call, its whole subtree) into
/// `tree` at `depth`. Returns the index just past what was consumed.
fn parse_one(tokens: &[Token], idx: usize, depth: u32, tree: &mut DepthTree<Value>) -> RunResult<usize> {
    match &tokens[idx] {
        Token::Open(_) => parse_call(tokens, idx, depth, tree),
        Token::Word(word) => {
            tree.push(classify(word), depth);
            Ok(idx + 1)
        }
        Token::Str(bytes) => {
            tree.push(Value::Str(unescape_bytes(bytes)), depth);
            Ok(idx + 1)
        }
        Token::Close(_) => unreachable!("tokenizer guarantees balanced brackets"),
    }
}

/// Parse `(callee arg arg ...)` (post-sugar-expansion) starting at the
/// `Open` token. The callee occupies `depth`; arguments occupy `depth + 1`.
/// An empty argument list gets a single `NoArgs` sentinel at `depth + 1`.
fn parse_call(tokens: &[Token], idx: usize, depth: u32, tree: &mut DepthTree<Value>) -> RunResult<usize> {
    let mut cursor = idx + 1;
    cursor = parse_one(tokens, cursor, depth, tree)?;

    if matches!(tokens[cursor], Token::Close(_)) {
        tree.push(Value::NoArgs, depth + 1);
        return Ok(cursor + 1);
    }

    while !matches!(tokens[cursor], Token::Close(_)) {
        cursor = parse_one(tokens, cursor, depth + 1, tree)?;
    }
    Ok(cursor + 1)
}

/// The constant evaluator (atom classifier): a nonempty bare word becomes a
/// builtin reference, a literal, or an unresolved `Variable`.
fn classify(word: &str) -> Value {
    if let Ok(builtin) = Builtin::from_str(word) {
        return Value::Builtin(builtin);
    }
    match word {
        "Yes" => return Value::Bool(true),
        "No" => return Value::Bool(false),
        "Nil" => return Value::Nil,
        _ => {}
    }
    if word.contains('.') {
        if let Ok(f) = word.parse::<f32>() {
            return Value::Float(f);
        }
    }
    if let Ok(n) = word.parse::<i64>() {
        return Value::Int(n);
    }
    Value::Variable(word.to_string())
}
