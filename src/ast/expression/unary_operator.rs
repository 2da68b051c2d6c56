use super::Expression;
use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

/// A prefix application of a user-defined operator, lowered as a call of
/// `unary<operator>`.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct UnaryOperatorResult {
    pub operator: char,
    pub operand: Box<Expression>,
}

/// The prefix layer. Any operator character except `(` and `,` is taken as a
/// prefix operator and the operand is parsed through this same layer, so
/// prefix operators chain right-associatively. Everything else falls through
/// to the primary parser.
pub(in crate::ast) fn parse(parser: &mut Parser, precedence: &PrecedenceTable) -> Option<Expression> {
    match *parser.current() {
        Token::Char(operator) if operator != '(' && operator != ',' => {
            parser.advance();
            let operand = parse(parser, precedence)?;
            Some(
                UnaryOperatorResult {
                    operator,
                    operand: Box::new(operand),
                }
                .into(),
            )
        }
        _ => super::parse_primary(parser, precedence),
    }
}
