use crate::token::{Symbol, Token};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub LexError

    UnterminatedString{offset: usize} = "unterminated string literal starting at byte {offset}",
}

pub type Result<T> = std::result::Result<T, LexError>;

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Splits `source` into tokens, failing on the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    Lexer::new(source).collect()
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn read_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.position += c.len_utf8();
        }
    }

    pub fn next_token(&mut self) -> Option<Result<Token<'a>>> {
        self.skip_whitespace();

        let start = self.position;
        let c = self.peek_char()?;

        if c == '"' {
            return Some(self.read_string());
        }

        if Symbol::is_control(c) {
            self.read_char();
        } else {
            while let Some(c) = self.peek_char() {
                if c.is_ascii_whitespace() || Symbol::is_control(c) {
                    break;
                }
                self.read_char();
            }
        }

        let input = self.input;
        Some(Ok(Token::new(&input[start..self.position])))
    }

    // The emitted token keeps both quotes.
    fn read_string(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.position;
        match input[start + 1..].find('"') {
            Some(len) => {
                self.position = start + len + 2;
                Ok(Token::new(&input[start..self.position]))
            }
            None => {
                self.position = input.len();
                Err(LexError::UnterminatedString { offset: start })
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_whitespace()) {
            self.read_char();
        }
    }
}
