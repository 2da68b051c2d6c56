use crate::utility::parsing;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map, recognize},
    sequence::pair,
    IResult,
};
use std::fmt::{self, Display, Formatter};

/// Name of an SSA register: a generated `%<n>` or a parameter `%<name>`.
#[derive(Debug, Eq, PartialEq, Clone, Hash, PartialOrd, Ord)]
pub struct RegisterName(pub String);

impl Display for RegisterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

pub fn parse(code: &str) -> IResult<&str, RegisterName> {
    map(
        pair(tag("%"), alt((digit1, recognize(parsing::ident)))),
        |(_, name): (_, &str)| RegisterName(name.to_string()),
    )(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse() {
        assert_eq!(parse("%0").unwrap().1, RegisterName("0".to_string()));
        assert_eq!(parse("%foo").unwrap().1, RegisterName("foo".to_string()));
        assert!(parse("foo").is_err());
    }
}
