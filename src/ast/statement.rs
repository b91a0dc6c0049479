use super::{Expression, Variable};
use std::fmt::{Display, Formatter};
use strum_macros::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(VariableDeclaration),
    Return(ReturnStatement),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Declaration(stmt) => write!(f, "{}", stmt),
            Self::Return(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Declared intent only: neither form can be reassigned by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mutability {
    #[strum(to_string = "let")]
    Let,
    #[strum(to_string = "const")]
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub mutability: Mutability,
    pub name: Variable,
    pub initializer: Expression,
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} = {};", self.mutability, self.name, self.initializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Expression,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}
