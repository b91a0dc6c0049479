use super::{Node, Variable};
use crate::token::Token;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Digits exactly as written; converted when evaluated.
    Number(String),
    /// Content between the quotes.
    String(String),
    Variable(Variable),
    BinaryOp(BinaryOperation),
    FunctionCall(FunctionCall),
    FunctionDefinition(Rc<FunctionDefinition>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Number(raw) => write!(f, "{}", raw),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Variable(var) => write!(f, "{}", var),
            Self::BinaryOp(expr) => write!(f, "{}", expr),
            Self::FunctionCall(expr) => write!(f, "{}", expr),
            Self::FunctionDefinition(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Operator {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Subtract,
    #[strum(to_string = "*")]
    Multiply,
    #[strum(to_string = "/")]
    Divide,
}

impl Operator {
    pub fn from_token(token: Token) -> Option<Self> {
        Self::from_str(token.text()).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub operator: Operator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Variable,
    pub arguments: Vec<Expression>,
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(Expression::to_string).collect();

        write!(f, "{}({})", self.callee, arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<Variable>,
    pub body: Vec<Node>,
}

impl FunctionDefinition {
    pub fn signature(&self) -> String {
        let parameters: Vec<String> = self.parameters.iter().map(Variable::to_string).collect();

        format!("func {}({})", self.name, parameters.join(", "))
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {{", self.signature())?;
        for node in self.body.iter() {
            write!(f, " {}", node)?;
        }
        write!(f, " }}")
    }
}
