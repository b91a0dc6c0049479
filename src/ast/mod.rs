mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use std::fmt::{Display, Formatter};

/// Anything that can appear in a statement sequence: the top level of a
/// program or the body of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Statement(Statement),
    Expression(Expression),
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Statement(stmt) => write!(f, "{}", stmt),
            Self::Expression(expr @ Expression::FunctionDefinition(_)) => write!(f, "{}", expr),
            Self::Expression(expr) => write!(f, "{};", expr),
        }
    }
}

impl From<Statement> for Node {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<Expression> for Node {
    fn from(expression: Expression) -> Self {
        Self::Expression(expression)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for node in self.nodes.iter() {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl From<Vec<Node>> for Program {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: String,
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}
