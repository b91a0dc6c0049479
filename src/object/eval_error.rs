use crate::ast;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    UndefinedVariable{name: String} = "undefined variable: {name}",
    RedeclaredVariable{name: String} = "variable already declared: {name}",
    InvalidFunctionCallTarget{name: String, type_name: &'static str} = "not a function: {name} is {type_name}",
    TypeMismatch{left: &'static str, operator: ast::Operator, right: &'static str} = "type mismatch: {left} {operator} {right}",
    IncorrectArity{name: String, got: usize, want: usize} = "wrong number of arguments to {name}. got={got}, want={want}",
    DivisionByZero = "division by zero",
    Overflow{operator: ast::Operator} = "integer overflow in {operator}",
    NumberOutOfRange{raw: String} = "number literal out of range: {raw}",
    NoValue{name: String} = "{name} does not produce a value",
    Output{message: String} = "failed to write output: {message}",
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }
}
