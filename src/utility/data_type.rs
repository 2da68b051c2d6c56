use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::map,
    sequence::preceded,
    IResult,
};
use std::fmt;

/// An integer type
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Integer {
    /// Whether the integer is signed.
    pub signed: bool,
    /// Bit width of this type.
    pub width: usize,
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.signed { "i" } else { "u" }, self.width)
    }
}

/// Type in IR
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Type {
    Integer(Integer),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer(i) => i.fmt(f),
        }
    }
}

impl From<Integer> for Type {
    fn from(integer: Integer) -> Self {
        Type::Integer(integer)
    }
}

/// The working value type of the language: a 32 bit integer.
pub const WORD: Type = Type::Integer(Integer {
    signed: true,
    width: 32,
});

/// Result type of a comparison, widened back to [`WORD`] before use.
pub const BIT: Type = Type::Integer(Integer {
    signed: false,
    width: 1,
});

/// Parse source code to get an [`Integer`] type.
pub fn parse_integer(code: &str) -> IResult<&str, Integer> {
    alt((
        map(preceded(tag("i"), digit1), |width: &str| Integer {
            signed: true,
            width: width.parse::<usize>().unwrap_or(0),
        }),
        map(preceded(tag("u"), digit1), |width: &str| Integer {
            signed: false,
            width: width.parse::<usize>().unwrap_or(0),
        }),
    ))(code)
}

/// Parse source code to get a [`Type`].
pub fn parse(code: &str) -> IResult<&str, Type> {
    map(parse_integer, Type::Integer)(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse() {
        assert_eq!(parse("i32").unwrap().1, WORD);
        assert_eq!(parse("u1").unwrap().1, BIT);
        assert_eq!(parse("i32").unwrap().1.to_string(), "i32");
    }
}
