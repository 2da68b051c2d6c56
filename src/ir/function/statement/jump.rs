use crate::{
    ir::{function::statement::IsIRStatement, quantity::RegisterName},
    utility::{data_type::Type, parsing},
};
use nom::{
    bytes::complete::tag, character::complete::space1, combinator::map, sequence::tuple, IResult,
};
use std::{
    fmt,
    fmt::{Display, Formatter},
};

/// [`Jump`] instruction.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Jump {
    pub label: String,
}

impl IsIRStatement for Jump {
    fn use_register(&self) -> Vec<RegisterName> {
        vec![]
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        None
    }
}

impl Display for Jump {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "j {}", self.label)
    }
}

/// Parse ir code to get a [`Jump`] instruction.
pub fn parse(code: &str) -> IResult<&str, Jump> {
    map(
        tuple((tag("j"), space1, parsing::ident)),
        |(_, _, label)| Jump { label },
    )(code)
}
