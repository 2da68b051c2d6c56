use crate::{ast::Parser, lexer::Token};

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct IntegerLiteral(pub i32);

impl From<i32> for IntegerLiteral {
    fn from(value: i32) -> Self {
        IntegerLiteral(value)
    }
}

pub(in crate::ast) fn parse(parser: &mut Parser) -> Option<IntegerLiteral> {
    match *parser.current() {
        Token::Number(value) => {
            parser.advance();
            Some(IntegerLiteral(value))
        }
        _ => None,
    }
}
