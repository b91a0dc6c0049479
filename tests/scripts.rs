use sy_interpreter::{run, EvalError, Environment, Error, LexError, Object, ParseError};

fn run_script(source: &str) -> (Result<Option<Object>, Error>, String) {
    let mut out = Vec::new();
    let result = run(source, &mut Environment::new(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn functions_demo_runs() {
    let (result, output) = run_script(include_str!("../demos/functions.sy"));

    assert_eq!(result, Ok(Some(Object::Number(115))));
    assert_eq!(output, "hello world\ntotal: 15\nright nested 2\n");
}

#[test]
fn errors_surface_by_stage() {
    let cases = vec![
        (
            "let s = \"open;",
            Error::Lex {
                source: LexError::UnterminatedString { offset: 8 },
            },
        ),
        (
            "let x 1;",
            Error::Parse {
                source: ParseError::MalformedDeclaration {
                    expected: "=",
                    found: "1".to_owned(),
                },
            },
        ),
        (
            "let a = 1; let a = 2;",
            Error::Eval {
                source: EvalError::RedeclaredVariable {
                    name: "a".to_owned(),
                },
            },
        ),
    ];

    for (input, error) in cases.into_iter() {
        assert_eq!(run_script(input).0, Err(error), "{}", input);
    }
}

#[test]
fn environment_persists_between_runs() {
    let mut env = Environment::new();
    let mut out = Vec::new();

    run("let a = 2; func square(x) { return x * x; }", &mut env, &mut out).unwrap();
    let value = run("square(a) + 1;", &mut env, &mut out).unwrap();

    assert_eq!(value, Some(Object::Number(5)));
    assert!(env.contains("square"));
    assert!(!env.contains("x"));
}

#[test]
fn error_messages() {
    let (result, _) = run_script("println(nope);");

    assert_eq!(
        result.unwrap_err().to_string(),
        "undefined variable: nope"
    );
}
