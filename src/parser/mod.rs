mod parse_error;
pub use parse_error::ParseError;


use crate::ast::{
    BinaryOperation, Expression, FunctionCall, FunctionDefinition, Mutability, Node, Operator,
    Program, ReturnStatement, Statement, Variable, VariableDeclaration,
};
use crate::token::{Keyword, Symbol, Token, TokenKind};
use std::rc::Rc;

pub type Result<T> = std::result::Result<T, ParseError>;

pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

/// Walks the token stream one logical unit at a time. A unit ends at a `;`
/// outside of any braces, or at the `}` that closes its first brace block.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse_program(mut self) -> Result<Program> {
        let mut program = Program::default();

        while let Some(unit) = self.next_unit()? {
            if !unit.is_empty() {
                program.nodes.push(parse_node(unit)?);
            }
        }

        Ok(program)
    }

    fn next_unit(&mut self) -> Result<Option<&'a [Token<'a>]>> {
        let tokens = self.tokens;
        if self.position >= tokens.len() {
            return Ok(None);
        }

        let start = self.position;
        let mut depth = 0usize;

        while let Some(token) = tokens.get(self.position) {
            self.position += 1;
            match token.kind() {
                TokenKind::Symbol(Symbol::Semicolon) if depth == 0 => {
                    return Ok(Some(&tokens[start..self.position - 1]));
                }
                TokenKind::Symbol(Symbol::LBrace) => depth += 1,
                TokenKind::Symbol(Symbol::RBrace) => {
                    if depth == 0 {
                        return Err(ParseError::UnexpectedToken {
                            token: token.to_string(),
                        });
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Some(&tokens[start..self.position]));
                    }
                }
                _ => {}
            }
        }

        if depth > 0 {
            return Err(ParseError::UnclosedBlock {
                unit: tokens[start].to_string(),
            });
        }

        // Trailing unit without a terminating `;`.
        Ok(Some(&tokens[start..]))
    }
}

fn parse_node(unit: &[Token]) -> Result<Node> {
    let (first, rest) = match unit.split_first() {
        Some(split) => split,
        None => return Err(ParseError::unexpected_end("statement")),
    };

    match first.kind() {
        TokenKind::Keyword(Keyword::Let) => parse_declaration(Mutability::Let, rest).map(Node::from),
        TokenKind::Keyword(Keyword::Const) => {
            parse_declaration(Mutability::Const, rest).map(Node::from)
        }
        TokenKind::Keyword(Keyword::Return) => {
            let value = parse_expression(rest)?;
            Ok(Statement::Return(ReturnStatement { value }).into())
        }
        TokenKind::Keyword(Keyword::Func) => {
            let definition = parse_function_definition(rest)?;
            Ok(Expression::FunctionDefinition(Rc::new(definition)).into())
        }
        _ => parse_expression(unit).map(Node::from),
    }
}

fn parse_declaration(mutability: Mutability, tokens: &[Token]) -> Result<Statement> {
    let name = parse_name(tokens.first(), "variable name")?;

    match tokens.get(1) {
        Some(token) if token.is(Symbol::Assign) => {}
        other => {
            return Err(ParseError::MalformedDeclaration {
                expected: "=",
                found: other.map_or_else(|| "end of input".to_owned(), Token::to_string),
            })
        }
    }

    let initializer = parse_expression(&tokens[2..])?;

    Ok(Statement::Declaration(VariableDeclaration {
        mutability,
        name,
        initializer,
    }))
}

fn parse_function_definition(tokens: &[Token]) -> Result<FunctionDefinition> {
    let name = parse_name(tokens.first(), "function name")?.name;

    expect(tokens.get(1), Symbol::LParen, "parameter list")?;
    let params_end = find_closing(tokens, 1, Symbol::LParen, Symbol::RParen)
        .ok_or_else(|| ParseError::unexpected_end("parameter list"))?;

    let parameters = split_arguments(&tokens[2..params_end])
        .into_iter()
        .map(|param| match param {
            [token] => parse_name(Some(token), "parameter"),
            [] => Err(ParseError::unexpected_end("parameter")),
            [_, extra, ..] => Err(ParseError::UnexpectedToken {
                token: extra.to_string(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let body_start = params_end + 1;
    expect(tokens.get(body_start), Symbol::LBrace, "function body")?;
    let body_end = find_closing(tokens, body_start, Symbol::LBrace, Symbol::RBrace)
        .ok_or_else(|| ParseError::UnclosedBlock { unit: name.clone() })?;

    if let Some(extra) = tokens.get(body_end + 1) {
        return Err(ParseError::UnexpectedToken {
            token: extra.to_string(),
        });
    }

    let body = Parser::new(&tokens[body_start + 1..body_end])
        .parse_program()?
        .nodes;

    Ok(FunctionDefinition {
        name,
        parameters,
        body,
    })
}

/// Parses a whole token slice as one expression.
///
/// A primary (literal, variable or call) is read first. Anything after it
/// must be an operator followed by another expression, so every operator
/// binds with equal priority and nests to the right: `1 - 2 - 3` is
/// `1 - (2 - 3)`.
pub fn parse_expression(tokens: &[Token]) -> Result<Expression> {
    let (left, rest) = parse_primary(tokens)?;

    let (operator, right) = match rest.split_first() {
        None => return Ok(left),
        Some(split) => split,
    };

    let operator = Operator::from_token(*operator).ok_or_else(|| ParseError::UnexpectedOperator {
        token: operator.to_string(),
    })?;
    let right = parse_expression(right)?;

    Ok(Expression::BinaryOp(BinaryOperation {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

fn parse_primary<'t, 'a>(tokens: &'t [Token<'a>]) -> Result<(Expression, &'t [Token<'a>])> {
    let (first, rest) = tokens
        .split_first()
        .ok_or_else(|| ParseError::unexpected_end("expression"))?;

    if first.is_ident() && rest.first().map_or(false, |t| t.is(Symbol::LParen)) {
        parse_function_call(*first, rest)
    } else {
        Ok((parse_value(*first)?, rest))
    }
}

/// `rest` starts at the opening parenthesis of the argument list.
fn parse_function_call<'t, 'a>(
    callee: Token,
    rest: &'t [Token<'a>],
) -> Result<(Expression, &'t [Token<'a>])> {
    let close = find_closing(rest, 0, Symbol::LParen, Symbol::RParen).ok_or_else(|| {
        ParseError::UnterminatedArguments {
            callee: callee.to_string(),
        }
    })?;

    let arguments = split_arguments(&rest[1..close])
        .into_iter()
        .map(parse_expression)
        .collect::<Result<Vec<_>>>()?;

    let call = FunctionCall {
        callee: callee.text().into(),
        arguments,
    };

    Ok((Expression::FunctionCall(call), &rest[close + 1..]))
}

/// Classifies a single token in value position.
pub fn parse_value(token: Token) -> Result<Expression> {
    let text = token.text();
    match token.kind() {
        TokenKind::String => Ok(Expression::String(text[1..text.len() - 1].to_owned())),
        TokenKind::Number => Ok(Expression::Number(text.to_owned())),
        TokenKind::Ident => Ok(Expression::Variable(text.into())),
        _ => Err(ParseError::UnexpectedToken {
            token: text.to_owned(),
        }),
    }
}

fn parse_name(token: Option<&Token>, context: &'static str) -> Result<Variable> {
    match token {
        Some(token) if token.is_ident() => Ok(token.text().into()),
        Some(token) => Err(ParseError::InvalidName {
            token: token.to_string(),
        }),
        None => Err(ParseError::unexpected_end(context)),
    }
}

fn expect(token: Option<&Token>, expected: Symbol, context: &'static str) -> Result<()> {
    match token {
        Some(token) if token.is(expected) => Ok(()),
        Some(token) => Err(ParseError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Err(ParseError::unexpected_end(context)),
    }
}

/// Index of the token closing the `open` at `start`, counting nesting depth.
fn find_closing(tokens: &[Token], start: usize, open: Symbol, close: Symbol) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(start) {
        if token.is(open) {
            depth += 1;
        } else if token.is(close) {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Splits on commas that are not nested inside parentheses. An empty slice
/// yields no arguments at all.
fn split_arguments<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
    if tokens.is_empty() {
        return vec![];
    }

    let mut arguments = vec![];
    let mut depth = 0usize;
    let mut start = 0;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind() {
            TokenKind::Symbol(Symbol::LParen) => depth += 1,
            TokenKind::Symbol(Symbol::RParen) => depth = depth.saturating_sub(1),
            TokenKind::Symbol(Symbol::Comma) if depth == 0 => {
                arguments.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    arguments.push(&tokens[start..]);

    arguments
}
