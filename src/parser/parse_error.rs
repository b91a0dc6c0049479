use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedOperator{token: String} = "unexpected operator `{token}`",
    MalformedDeclaration{expected: &'static str, found: String} = "expected `{expected}` in declaration, found `{found}`",
    UnexpectedToken{token: String} = "unexpected token `{token}`",
    UnexpectedEnd{context: &'static str} = "unexpected end of input while parsing {context}",
    InvalidName{token: String} = "`{token}` cannot be used as a name",
    UnterminatedArguments{callee: String} = "argument list of `{callee}` is never closed",
    UnclosedBlock{unit: String} = "block opened after `{unit}` is never closed",
}

impl ParseError {
    pub fn unexpected_end(context: &'static str) -> Self {
        Self::UnexpectedEnd { context }
    }
}
