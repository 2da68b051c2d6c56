pub mod local;

use crate::utility::parsing;
use enum_dispatch::enum_dispatch;
pub use local::RegisterName;
use nom::{branch::alt, combinator::map, IResult};
use std::fmt::{self, Display, Formatter};

/// Tag trait for [`Quantity`].
#[enum_dispatch]
trait IsQuantity {}

/// [`Quantity`] represents an operand: a register or a literal constant.
#[enum_dispatch(IsQuantity)]
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Quantity {
    RegisterName,
    NumberLiteral(i32),
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::RegisterName(register) => write!(f, "{}", register),
            Quantity::NumberLiteral(number) => write!(f, "{}", number),
        }
    }
}

/// Parse ir code to get a [`Quantity`].
pub fn parse(code: &str) -> IResult<&str, Quantity> {
    alt((
        map(local::parse, Quantity::RegisterName),
        map(parsing::integer, Quantity::NumberLiteral),
    ))(code)
}
