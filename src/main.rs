use std::env;
use std::fs;
use std::io;
use std::process;
use sy_interpreter::{parse, repl, tokenize, Environment, Error, Evaluator};

fn run_file(path: &str, show_ast: bool) -> Result<(), Error> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("ERROR: cannot read {}: {}", path, err);
            process::exit(1);
        }
    };

    let tokens = tokenize(&source)?;
    let program = parse(&tokens)?;
    if show_ast {
        print!("{}", program);
    }

    Evaluator::new(io::stdout()).eval_program(&program, &mut Environment::new())?;
    Ok(())
}

fn main() {
    let show_ast = env::var("SY_SHOW_AST").is_ok();

    match env::args().nth(1) {
        Some(path) => {
            if let Err(err) = run_file(&path, show_ast) {
                eprintln!("ERROR: {}", err);
                process::exit(1);
            }
        }
        None => {
            println!("Hello! This is the sy scripting language!");
            println!("Feel free to type in commands");
            repl::start()
        }
    }
}
