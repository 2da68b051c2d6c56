use crate::{
    ir::{
        function::statement::IsIRStatement,
        quantity::{self, local, Quantity, RegisterName},
    },
    utility::data_type::{self, Type},
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{space0, space1},
    combinator::map,
    sequence::tuple,
    IResult,
};
use std::fmt;

/// [`BinaryOperation`] represents a built-in binary operation. Division and
/// the ordered comparison are unsigned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    Divide,
    LessThan,
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperation::Add => write!(f, "add"),
            BinaryOperation::Sub => write!(f, "sub"),
            BinaryOperation::Mul => write!(f, "mul"),
            BinaryOperation::Divide => write!(f, "udiv"),
            BinaryOperation::LessThan => write!(f, "ult"),
        }
    }
}

/// Parse ir code to get a [`BinaryOperation`].
fn binary_operation(code: &str) -> IResult<&str, BinaryOperation> {
    alt((
        map(tag("add"), |_| BinaryOperation::Add),
        map(tag("sub"), |_| BinaryOperation::Sub),
        map(tag("mul"), |_| BinaryOperation::Mul),
        map(tag("udiv"), |_| BinaryOperation::Divide),
        map(tag("ult"), |_| BinaryOperation::LessThan),
    ))(code)
}

/// [`BinaryCalculate`] represents a binary operation statement.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BinaryCalculate {
    pub operation: BinaryOperation,
    pub operand1: Quantity,
    pub operand2: Quantity,
    pub to: RegisterName,
    pub data_type: Type,
}

impl IsIRStatement for BinaryCalculate {
    fn use_register(&self) -> Vec<RegisterName> {
        let mut result = Vec::new();
        if let Quantity::RegisterName(register) = &self.operand1 {
            result.push(register.clone());
        }
        if let Quantity::RegisterName(register) = &self.operand2 {
            result.push(register.clone());
        }
        result
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        Some((self.to.clone(), self.data_type.clone()))
    }
}

impl fmt::Display for BinaryCalculate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} {} {}, {}",
            self.to, self.operation, self.data_type, self.operand1, self.operand2
        )
    }
}

/// Parse ir code to get a [`BinaryCalculate`].
pub fn parse(code: &str) -> IResult<&str, BinaryCalculate> {
    map(
        tuple((
            local::parse,
            space0,
            tag("="),
            space0,
            binary_operation,
            space1,
            data_type::parse,
            space1,
            quantity::parse,
            space0,
            tag(","),
            space0,
            quantity::parse,
        )),
        |(to, _, _, _, operation, _, data_type, _, operand1, _, _, _, operand2)| BinaryCalculate {
            operation,
            operand1,
            operand2,
            to,
            data_type,
        },
    )(code)
}
