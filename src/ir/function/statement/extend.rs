use crate::{
    ir::{
        function::statement::IsIRStatement,
        quantity::{self, local, Quantity, RegisterName},
    },
    utility::data_type::{self, Type},
};
use nom::{
    bytes::complete::tag,
    character::complete::{space0, space1},
    combinator::map,
    sequence::tuple,
    IResult,
};
use std::fmt;

/// [`ZeroExtend`] widens a comparison result back to the working integer
/// width, filling with zero bits.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ZeroExtend {
    pub to: RegisterName,
    pub operand: Quantity,
    pub from_type: Type,
    pub to_type: Type,
}

impl IsIRStatement for ZeroExtend {
    fn use_register(&self) -> Vec<RegisterName> {
        if let Quantity::RegisterName(register) = &self.operand {
            vec![register.clone()]
        } else {
            Vec::new()
        }
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        Some((self.to.clone(), self.to_type.clone()))
    }
}

impl fmt::Display for ZeroExtend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = zext {} {} to {}",
            self.to, self.from_type, self.operand, self.to_type
        )
    }
}

/// Parse ir code to get a [`ZeroExtend`] instruction.
pub fn parse(code: &str) -> IResult<&str, ZeroExtend> {
    map(
        tuple((
            local::parse,
            space0,
            tag("="),
            space0,
            tag("zext"),
            space1,
            data_type::parse,
            space1,
            quantity::parse,
            space1,
            tag("to"),
            space1,
            data_type::parse,
        )),
        |(to, _, _, _, _, _, from_type, _, operand, _, _, _, to_type)| ZeroExtend {
            to,
            operand,
            from_type,
            to_type,
        },
    )(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::data_type::{BIT, WORD};

    #[test]
    fn can_parse() {
        let result = parse("%2 = zext u1 %1 to i32").unwrap().1;
        assert_eq!(
            result,
            ZeroExtend {
                to: RegisterName("2".to_string()),
                operand: RegisterName("1".to_string()).into(),
                from_type: BIT,
                to_type: WORD,
            }
        );
        assert_eq!(result.to_string(), "%2 = zext u1 %1 to i32");
    }
}
