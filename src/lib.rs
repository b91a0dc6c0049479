pub mod ast;
pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

pub use environment::Environment;
pub use evaluator::Evaluator;
pub use lexer::{tokenize, LexError, Lexer};
pub use object::{EvalError, Object};
pub use parser::{parse, ParseError, Parser};

use custom_error::custom_error;
use std::io::Write;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Error

    Lex{source: LexError} = "{source}",
    Parse{source: ParseError} = "{source}",
    Eval{source: EvalError} = "{source}",
}

/// Lexes, parses and evaluates `source` against `env`, sending `println`
/// output to `out`.
pub fn run<W: Write>(source: &str, env: &mut Environment, out: W) -> Result<Option<Object>, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    let value = Evaluator::new(out).eval_program(&program, env)?;
    Ok(value)
}
