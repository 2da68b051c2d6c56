use super::{unary_operator, Expression};
use crate::{
    ast::{precedence::PrecedenceTable, Parser},
    lexer::Token,
};

/// An infix application. `+ - * / <` lower to built-in instructions, any
/// other operator to a call of `binary<operator>`.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BinaryOperatorResult {
    pub operator: char,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
}

fn peek_precedence(parser: &Parser, precedence: &PrecedenceTable) -> Option<i32> {
    match *parser.current() {
        Token::Char(symbol) => precedence.get(symbol),
        _ => None,
    }
}

/// Precedence climbing: keep folding `lhs <op> rhs` while the next operator
/// binds at least as tightly as `lowest`. Equal precedence folds left; a
/// strictly tighter follow-on operator extends the right-hand side first.
pub(in crate::ast) fn parse(
    parser: &mut Parser,
    precedence: &PrecedenceTable,
    lowest: i32,
    mut lhs: Expression,
) -> Option<Expression> {
    loop {
        let (operator, current) = match *parser.current() {
            Token::Char(symbol) => match precedence.get(symbol) {
                Some(bind) if bind >= lowest => (symbol, bind),
                _ => return Some(lhs),
            },
            _ => return Some(lhs),
        };
        parser.advance();
        let mut rhs = unary_operator::parse(parser, precedence)?;
        if let Some(next) = peek_precedence(parser, precedence) {
            if current < next {
                rhs = parse(parser, precedence, current + 1, rhs)?;
            }
        }
        lhs = BinaryOperatorResult {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{self, IntegerLiteral};

    fn parse_source(source: &str, precedence: &PrecedenceTable) -> Option<Expression> {
        let mut parser = Parser::new(source);
        expression::parse(&mut parser, precedence)
    }

    fn binary(operator: char, lhs: Expression, rhs: Expression) -> Expression {
        BinaryOperatorResult {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    fn literal(value: i32) -> Expression {
        IntegerLiteral(value).into()
    }

    #[test]
    fn tighter_follow_on_operator_extends_right() {
        let table = PrecedenceTable::default();
        assert_eq!(
            parse_source("1 - 2 * 3", &table),
            Some(binary('-', literal(1), binary('*', literal(2), literal(3))))
        );
    }

    #[test]
    fn looser_follow_on_operator_folds_left() {
        let table = PrecedenceTable::default();
        assert_eq!(
            parse_source("2 * 3 - 1", &table),
            Some(binary('-', binary('*', literal(2), literal(3)), literal(1)))
        );
    }

    #[test]
    fn equal_precedence_folds_left() {
        let table = PrecedenceTable::default();
        assert_eq!(
            parse_source("1 + 2 + 3", &table),
            Some(binary('+', binary('+', literal(1), literal(2)), literal(3)))
        );
    }

    #[test]
    fn comparison_binds_loosest() {
        let table = PrecedenceTable::default();
        assert_eq!(
            parse_source("1 < 2 + 3", &table),
            Some(binary('<', literal(1), binary('+', literal(2), literal(3))))
        );
    }

    #[test]
    fn parentheses_override_the_table() {
        let table = PrecedenceTable::default();
        assert_eq!(
            parse_source("(1 - 2) * 3", &table),
            Some(binary('*', binary('-', literal(1), literal(2)), literal(3)))
        );
    }

    #[test]
    fn user_operators_use_their_declared_precedence() {
        let mut table = PrecedenceTable::default();
        table.set('%', 40);
        // `%` at 40 binds tighter than `*` at 4.
        assert_eq!(
            parse_source("6 % 2 * 3", &table),
            Some(binary('*', binary('%', literal(6), literal(2)), literal(3)))
        );
        assert_eq!(
            parse_source("6 % 2 % 3", &table),
            Some(binary('%', binary('%', literal(6), literal(2)), literal(3)))
        );
    }

    #[test]
    fn unknown_operator_stops_the_climb() {
        let table = PrecedenceTable::default();
        let mut parser = Parser::new("1 ? 2");
        let result = expression::parse(&mut parser, &table);
        assert_eq!(result, Some(literal(1)));
        assert_eq!(*parser.current(), Token::Char('?'));
    }
}
