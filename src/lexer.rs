use phf::phf_map;
use std::{iter::Peekable, str::Chars};

/// A single lexical unit of a source file.
///
/// There is no error token: a character that starts nothing recognizable is
/// handed to the parser as [`Token::Char`] and rejected there.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Token {
    /// End of input. Returned forever once reached.
    Eof,
    /// An unsigned base-10 integer literal.
    Number(i32),
    /// A name that is not a keyword.
    Identifier(String),
    Def,
    If,
    Then,
    Else,
    For,
    In,
    Unary,
    Binary,
    /// Any other non-space character: operators and punctuation.
    Char(char),
}

static KEYWORDS: phf::Map<&'static str, Token> = phf_map! {
    "def" => Token::Def,
    "if" => Token::If,
    "then" => Token::Then,
    "else" => Token::Else,
    "for" => Token::For,
    "in" => Token::In,
    "unary" => Token::Unary,
    "binary" => Token::Binary,
};

/// Produces [`Token`]s one at a time from a source string.
///
/// The cursor keeps one character of lookahead, which is exactly what the
/// longest-run rules (identifiers, numbers) need.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        while let Some(c) = self.chars.peek().copied() {
            if c.is_whitespace() {
                self.chars.next();
            } else if c == '#' {
                self.skip_comment();
            } else if c.is_alphabetic() {
                return self.identifier_or_keyword();
            } else if c.is_ascii_digit() {
                return self.number();
            } else {
                self.chars.next();
                return Token::Char(c);
            }
        }
        Token::Eof
    }

    fn skip_comment(&mut self) {
        for c in self.chars.by_ref() {
            if c == '\n' || c == '\r' {
                break;
            }
        }
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if c.is_alphanumeric() {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        match KEYWORDS.get(name.as_str()) {
            Some(keyword) => keyword.clone(),
            None => Token::Identifier(name),
        }
    }

    fn number(&mut self) -> Token {
        let mut digits = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        // Overlong runs saturate rather than erroring; there is no error token.
        Token::Number(digits.parse::<i64>().unwrap_or(i64::MAX) as i32)
    }
}
