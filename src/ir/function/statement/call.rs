use crate::{
    ir::{
        function::statement::IsIRStatement,
        quantity::{self, local, Quantity, RegisterName},
    },
    utility::{
        data_type::{self, Type},
        parsing,
    },
};
use itertools::Itertools;
use nom::{
    bytes::complete::tag,
    character::complete::space0,
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, tuple},
    IResult,
};
use std::fmt::{self, Display, Formatter};

/// [`Call`] instruction. Every user-defined operator application becomes one
/// of these.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Call {
    /// Where to store the result of the call.
    pub to: Option<RegisterName>,
    /// Name of the function to call.
    pub name: String,
    /// Result type.
    pub data_type: Type,
    /// Arguments to pass to the function.
    pub params: Vec<Quantity>,
}

impl IsIRStatement for Call {
    fn use_register(&self) -> Vec<RegisterName> {
        self.params
            .iter()
            .filter_map(|param| match param {
                Quantity::RegisterName(register) => Some(register.clone()),
                Quantity::NumberLiteral(_) => None,
            })
            .collect()
    }
    fn generate_register(&self) -> Option<(RegisterName, Type)> {
        self.to.clone().map(|to| (to, self.data_type.clone()))
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(to_register) = &self.to {
            write!(f, "{} = ", to_register)?;
        }
        write!(
            f,
            "call {} {}({})",
            self.data_type,
            self.name,
            self.params.iter().map(|it| it.to_string()).join(", ")
        )
    }
}

/// Parse a [`Call`] instruction.
pub fn parse(code: &str) -> IResult<&str, Call> {
    map(
        tuple((
            opt(map(tuple((local::parse, space0, tag("="), space0)), |x| {
                x.0
            })),
            tag("call"),
            space0,
            data_type::parse,
            space0,
            parsing::ident,
            delimited(
                tag("("),
                separated_list0(tuple((space0, tag(","), space0)), quantity::parse),
                tag(")"),
            ),
        )),
        |(to, _, _, data_type, _, name, params)| Call {
            to,
            data_type,
            name,
            params,
        },
    )(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::data_type::WORD;

    #[test]
    fn can_parse() {
        let result = parse("%1 = call i32 fib(%0, 2)").unwrap().1;
        assert_eq!(
            result,
            Call {
                to: Some(RegisterName("1".to_string())),
                data_type: WORD,
                name: "fib".to_string(),
                params: vec![RegisterName("0".to_string()).into(), 2.into()],
            }
        );
        assert_eq!(result.to_string(), "%1 = call i32 fib(%0, 2)");

        let result = parse("call i32 noise()").unwrap().1;
        assert_eq!(result.to, None);
        assert_eq!(result.params, vec![]);
    }
}
