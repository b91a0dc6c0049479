use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Keyword {
    #[strum(to_string = "let")]
    Let,
    #[strum(to_string = "const")]
    Const,
    #[strum(to_string = "return")]
    Return,
    #[strum(to_string = "func")]
    Func,
}

/// Single characters that always end the pending token and are emitted on
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Symbol {
    #[strum(to_string = ";")]
    Semicolon,
    #[strum(to_string = "\"")]
    Quote,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "=")]
    Assign,
    #[strum(to_string = "(")]
    LParen,
    #[strum(to_string = ")")]
    RParen,
    #[strum(to_string = "{")]
    LBrace,
    #[strum(to_string = "}")]
    RBrace,
    #[strum(to_string = ",")]
    Comma,
}

impl Symbol {
    pub fn is_control(c: char) -> bool {
        matches!(
            c,
            ';' | '"' | '+' | '-' | '*' | '/' | '=' | '(' | ')' | '{' | '}' | ','
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    String,
    Number,
    Keyword(Keyword),
    Symbol(Symbol),
    Ident,
}

/// A slice of the source text. Tokens carry no position; their kind is
/// recovered from their shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub fn text(&self) -> &'a str {
        self.0
    }

    pub fn kind(&self) -> TokenKind {
        let text = self.0;
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            TokenKind::String
        } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::Number
        } else if let Ok(keyword) = Keyword::from_str(text) {
            TokenKind::Keyword(keyword)
        } else if let Ok(symbol) = Symbol::from_str(text) {
            TokenKind::Symbol(symbol)
        } else {
            TokenKind::Ident
        }
    }

    pub fn is(&self, symbol: Symbol) -> bool {
        self.kind() == TokenKind::Symbol(symbol)
    }

    pub fn is_ident(&self) -> bool {
        self.kind() == TokenKind::Ident
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
