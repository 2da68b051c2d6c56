use crate::{
    ir::{
        function::statement::IsIRStatement,
        quantity::{self, Quantity, RegisterName},
    },
    utility::data_type::Type,
};
use nom::{
    bytes::complete::tag,
    character::complete::space0,
    combinator::{map, opt},
    sequence::tuple,
    IResult,
};
use std::fmt;

/// [`Ret`] instruction.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Ret {
    pub value: Option<Quantity>,
}

impl IsIRStatement for Ret {
    fn use_register(&self) -> Vec<RegisterName> {
        if let Some(Quantity::RegisterName(register)) = &self.value {
            vec![register.clone()]
        } else {
            Vec::new()
        }
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        None
    }
}

impl fmt::Display for Ret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.value {
            write!(f, "ret {value}")
        } else {
            write!(f, "ret")
        }
    }
}

/// Parse a [`Ret`] instruction.
pub fn parse(code: &str) -> IResult<&str, Ret> {
    map(
        tuple((tag("ret"), space0, opt(quantity::parse))),
        |(_, _, value)| Ret { value },
    )(code)
}
