use crate::{
    ir::quantity::{local, RegisterName},
    utility::data_type::{self, Type},
};
use nom::{
    bytes::complete::tag, character::complete::space0, combinator::map, sequence::tuple, IResult,
};
use std::fmt;

/// [`Parameter`] represents a function's parameter. Inside the body the
/// parameter is the register named after it.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Parameter {
    /// Name of the parameter.
    pub name: RegisterName,
    /// Type of the parameter.
    pub data_type: Type,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.data_type, self.name)
    }
}

pub fn parse(code: &str) -> IResult<&str, Parameter> {
    map(
        tuple((data_type::parse, space0, local::parse)),
        |(data_type, _, name)| Parameter { name, data_type },
    )(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::data_type::WORD;

    #[test]
    fn can_parse() {
        let parameter = parse("i32 %a").unwrap().1;
        assert_eq!(
            parameter,
            Parameter {
                name: RegisterName("a".to_string()),
                data_type: WORD,
            }
        );
        assert_eq!(parameter.to_string(), "i32 %a");
    }
}
