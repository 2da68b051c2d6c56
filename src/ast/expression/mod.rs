use enum_dispatch::enum_dispatch;

use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

pub mod binary_operator;
pub mod for_expression;
pub mod function_call;
pub mod if_expression;
pub mod integer_literal;
pub mod unary_operator;
pub mod variable_ref;

pub use binary_operator::BinaryOperatorResult;
pub use for_expression::ForExpression;
pub use function_call::FunctionCall;
pub use if_expression::IfExpression;
pub use integer_literal::IntegerLiteral;
pub use unary_operator::UnaryOperatorResult;
pub use variable_ref::VariableRef;

/// Tag trait for [`Expression`].
#[enum_dispatch]
trait IsExpression {}

/// Every form an expression can take. Lowering dispatches exhaustively on
/// this, one arm per variant.
#[enum_dispatch(IsExpression)]
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Expression {
    IntegerLiteral,
    VariableRef,
    UnaryOperatorResult,
    BinaryOperatorResult,
    FunctionCall,
    IfExpression,
    ForExpression,
}

/// Parse one full expression: the prefix layer produces the first operand,
/// then precedence climbing folds the binary chain.
pub fn parse(parser: &mut Parser, precedence: &PrecedenceTable) -> Option<Expression> {
    let lhs = unary_operator::parse(parser, precedence)?;
    binary_operator::parse(parser, precedence, 0, lhs)
}

/// Dispatch a primary form on the current token. Anything unexpected is a
/// parse failure, reported as `None`.
pub(in crate::ast) fn parse_primary(
    parser: &mut Parser,
    precedence: &PrecedenceTable,
) -> Option<Expression> {
    match parser.current() {
        Token::Number(_) => integer_literal::parse(parser).map(Into::into),
        Token::Identifier(_) => function_call::parse(parser, precedence),
        Token::Char('(') => {
            parser.advance();
            let inner = parse(parser, precedence)?;
            parser.eat_char(')').then_some(inner)
        }
        Token::If => if_expression::parse(parser, precedence).map(Into::into),
        Token::For => for_expression::parse(parser, precedence).map(Into::into),
        _ => None,
    }
}
