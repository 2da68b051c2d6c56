use super::{variable_ref::VariableRef, Expression};
use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Expression>,
}

/// An identifier leads either a variable reference or a call; the token after
/// it decides which.
pub(in crate::ast) fn parse(parser: &mut Parser, precedence: &PrecedenceTable) -> Option<Expression> {
    let name = match parser.current() {
        Token::Identifier(name) => name.clone(),
        _ => return None,
    };
    parser.advance();
    if !parser.eat_char('(') {
        return Some(VariableRef(name).into());
    }
    let mut arguments = Vec::new();
    if *parser.current() != Token::Char(')') {
        loop {
            arguments.push(super::parse(parser, precedence)?);
            if *parser.current() == Token::Char(')') {
                break;
            }
            // No trailing comma: after a `,` another argument is mandatory.
            if !parser.eat_char(',') {
                return None;
            }
        }
    }
    parser.advance();
    Some(FunctionCall { name, arguments }.into())
}
