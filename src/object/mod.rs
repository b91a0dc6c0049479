use crate::ast;
use crate::builtins::Builtin;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

mod eval_error;
pub use eval_error::EvalError;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Number(i64),
    Text(String),
    Function(FunctionObject),
    Builtin(Builtin),
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Function(func) => write!(f, "{}", func),
            Self::Builtin(builtin) => write!(f, "{}", builtin),
        }
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "NUMBER",
            Self::Text(_) => "TEXT",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
        }
    }
}

/// A user-defined function. It keeps only its definition: calls do not see
/// the variables of the scope it was defined in.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionObject {
    pub definition: Rc<ast::FunctionDefinition>,
}

impl FunctionObject {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn arity(&self) -> usize {
        self.definition.parameters.len()
    }
}

impl Display for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.definition.signature())
    }
}

impl From<Rc<ast::FunctionDefinition>> for FunctionObject {
    fn from(definition: Rc<ast::FunctionDefinition>) -> Self {
        Self { definition }
    }
}
