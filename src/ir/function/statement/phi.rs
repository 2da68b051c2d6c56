use crate::{
    ir::{
        function::statement::IsIRStatement,
        quantity::{self, Quantity, RegisterName},
    },
    utility::{
        data_type::{self, Type},
        parsing::{self, in_multispace},
    },
};
use nom::{
    bytes::complete::tag,
    character::complete::space0,
    combinator::map,
    multi::separated_list1,
    sequence::{delimited, tuple},
    IResult,
};
use std::fmt;

/// [`Phi`]'s source: a value and the predecessor block it arrives from.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct PhiSource {
    pub value: Quantity,
    pub block: String,
}

fn parse_phi_source(code: &str) -> IResult<&str, PhiSource> {
    map(
        delimited(
            tag("["),
            tuple((quantity::parse, space0, tag(","), space0, parsing::ident)),
            tag("]"),
        ),
        |(value, _, _, _, block)| PhiSource { value, block },
    )(code)
}

/// [`Phi`] instruction: selects among incoming values by the block control
/// arrived from. Must sit at the head of its basic block.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Phi {
    /// Where to store the result of the phi.
    pub to: RegisterName,
    /// Type of the phi.
    pub data_type: Type,
    /// Sources of the phi, one per predecessor.
    pub from: Vec<PhiSource>,
}

impl IsIRStatement for Phi {
    fn use_register(&self) -> Vec<RegisterName> {
        self.from
            .iter()
            .filter_map(|source| match &source.value {
                Quantity::RegisterName(register) => Some(register.clone()),
                Quantity::NumberLiteral(_) => None,
            })
            .collect()
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        Some((self.to.clone(), self.data_type.clone()))
    }
}

impl fmt::Display for Phi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = phi {}", self.to, self.data_type)?;
        for (i, source) in self.from.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }
            write!(f, " [{}, {}]", source.value, source.block)?;
        }
        Ok(())
    }
}

/// Parse ir code to get a [`Phi`] instruction.
pub fn parse(code: &str) -> IResult<&str, Phi> {
    map(
        tuple((
            crate::ir::quantity::local::parse,
            space0,
            tag("="),
            space0,
            tag("phi"),
            space0,
            data_type::parse,
            space0,
            separated_list1(in_multispace(tag(",")), in_multispace(parse_phi_source)),
        )),
        |(to, _, _, _, _, _, data_type, _, from)| Phi {
            to,
            data_type,
            from,
        },
    )(code)
}
