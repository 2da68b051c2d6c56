use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, digit1, multispace0},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};

/// Parse source code to get an ident.
pub fn ident(code: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| s.to_string(),
    )(code)
}

/// Wrap parser `f`, so we can ignore the multispaces around the content we want to parse.
pub fn in_multispace<F, I, O>(f: F) -> impl FnMut(I) -> IResult<I, O>
where
    I: nom::InputTakeAtPosition + Clone,
    <I as nom::InputTakeAtPosition>::Item: nom::AsChar + Clone,
    F: FnMut(I) -> IResult<I, O>,
{
    map(tuple((multispace0, f, multispace0)), |(_, x, _)| x)
}

/// Parse source code to get a base-10 integer literal, optionally negated.
pub fn integer(code: &str) -> IResult<&str, i32> {
    map(
        pair(opt(tag("-")), digit1),
        |(neg, digits): (Option<&str>, &str)| {
            let n = digits.parse::<i64>().unwrap_or(i64::MAX) as i32;
            if neg.is_some() {
                n.wrapping_neg()
            } else {
                n
            }
        },
    )(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_ident() {
        let result = ident("a").unwrap().1;
        assert_eq!(result, "a".to_string());
        let result = ident("a_b_c").unwrap().1;
        assert_eq!(result, "a_b_c".to_string());
        let result = ident("loop_0_body").unwrap().1;
        assert_eq!(result, "loop_0_body".to_string());

        let result = ident("1a").is_err();
        assert!(result);
    }

    #[test]
    fn can_parse_integer() {
        let result = integer("0").unwrap().1;
        assert_eq!(result, 0);
        let result = integer("99").unwrap().1;
        assert_eq!(result, 99);
        let result = integer("-99").unwrap().1;
        assert_eq!(result, -99);
    }
}
