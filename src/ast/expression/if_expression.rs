use super::Expression;
use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

/// `if <condition> then <expr> else <expr>`. Both branches are expressions
/// and must produce a value; the merge is a phi at lowering time.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub then_branch: Box<Expression>,
    pub else_branch: Box<Expression>,
}

/// Parse an `if` expression; the caller has seen the `if` token.
pub(in crate::ast) fn parse(
    parser: &mut Parser,
    precedence: &PrecedenceTable,
) -> Option<IfExpression> {
    parser.advance();
    let condition = super::parse(parser, precedence)?;
    if !parser.eat(&Token::Then) {
        return None;
    }
    let then_branch = super::parse(parser, precedence)?;
    if !parser.eat(&Token::Else) {
        return None;
    }
    let else_branch = super::parse(parser, precedence)?;
    Some(IfExpression {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}
