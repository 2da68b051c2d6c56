use super::Expression;
use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

/// `for <id> = <start> , <end> [, <step>] in <body>`.
///
/// An absent step clause stays absent here; the generator substitutes the
/// literal 1 when lowering.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ForExpression {
    pub variable: String,
    pub start: Box<Expression>,
    pub end: Box<Expression>,
    pub step: Option<Box<Expression>>,
    pub body: Box<Expression>,
}

/// Parse a `for` expression; the caller has seen the `for` token.
pub(in crate::ast) fn parse(
    parser: &mut Parser,
    precedence: &PrecedenceTable,
) -> Option<ForExpression> {
    parser.advance();
    let variable = match parser.current() {
        Token::Identifier(name) => name.clone(),
        _ => return None,
    };
    parser.advance();
    if !parser.eat_char('=') {
        return None;
    }
    let start = super::parse(parser, precedence)?;
    if !parser.eat_char(',') {
        return None;
    }
    let end = super::parse(parser, precedence)?;
    let step = if parser.eat_char(',') {
        Some(Box::new(super::parse(parser, precedence)?))
    } else {
        None
    };
    if !parser.eat(&Token::In) {
        return None;
    }
    let body = super::parse(parser, precedence)?;
    Some(ForExpression {
        variable,
        start: Box::new(start),
        end: Box::new(end),
        step,
        body: Box::new(body),
    })
}
