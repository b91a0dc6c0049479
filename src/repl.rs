use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::tokenize;
use crate::parser::parse;
use std::io::{self, Write};

static PROMPT: &str = ">> ";

/// Reads one line at a time and evaluates it against a single top-level
/// environment, so bindings persist between lines.
pub fn start() {
    let mut env = Environment::new();
    let mut evaluator = Evaluator::new(io::stdout());

    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let tokens = match tokenize(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                println!("\t{}", err);
                continue;
            }
        };

        match parse(&tokens) {
            Err(err) => println!("\t{}", err),
            Ok(program) => match evaluator.eval_program(&program, &mut env) {
                Ok(Some(val)) => println!("{}", val),
                Ok(None) => {}
                Err(err) => println!("ERROR: {}", err),
            },
        }
    }
}
