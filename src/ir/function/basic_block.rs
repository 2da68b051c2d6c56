use super::statement::{self, IRStatement};
use crate::utility::parsing;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, opt},
    multi::{many0, many1},
    sequence::{pair, tuple},
    IResult,
};
use std::fmt;

/// A basic block: a straight-line run of statements ending in a terminator,
/// entered only at its label.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BasicBlock {
    /// Name of the basic block.
    pub name: Option<String>,
    /// Statements of the basic block.
    pub content: Vec<IRStatement>,
}

impl BasicBlock {
    /// Create an empty basic block.
    pub fn new() -> Self {
        Self {
            name: None,
            content: Vec::new(),
        }
    }

    /// Append a statement to the basic block.
    pub fn append_statement(&mut self, statement: impl Into<IRStatement>) {
        self.content.push(statement.into());
    }

    /// Whether the basic block is empty.
    pub fn empty(&self) -> bool {
        self.name.is_none() && self.content.is_empty()
    }
}

impl Default for BasicBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "  {}:", name)?;
        }
        for statement in &self.content {
            writeln!(f, "    {}", statement)?;
        }
        Ok(())
    }
}

/// Parse a basic block's name.
fn parse_tag(code: &str) -> IResult<&str, String> {
    map(pair(parsing::ident, tag(":")), |(name, _)| name)(code)
}

/// Parse the ir code to get a [`BasicBlock`]. A block is a label, a run of
/// statements, or both; the next label starts the next block.
pub fn parse(code: &str) -> IResult<&str, BasicBlock> {
    let labelled = tuple((
        map(parsing::in_multispace(parse_tag), Some),
        many0(parsing::in_multispace(statement::parse)),
    ));
    let unlabelled = tuple((
        opt(parsing::in_multispace(parse_tag)),
        many1(parsing::in_multispace(statement::parse)),
    ));
    map(alt((labelled, unlabelled)), |(name, content)| BasicBlock {
        name,
        content,
    })(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse() {
        let code = "loop_0_body:
    %1 = phi i32 [1, _entry], [%2, loop_0_body]
    %2 = add i32 %1, 1
    %3 = ult u1 %1, 5
    bne %3, 0, loop_0_body, loop_0_end";
        let block = parse(code).unwrap().1;
        assert_eq!(block.name.as_deref(), Some("loop_0_body"));
        assert_eq!(block.content.len(), 4);
        assert!(block.content.last().unwrap().is_terminator());
    }

    #[test]
    fn label_starts_a_new_block() {
        let code = "a:
    j b
b:
    ret 0";
        let blocks = many0(parse)(code).unwrap().1;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name.as_deref(), Some("a"));
        assert_eq!(blocks[1].name.as_deref(), Some("b"));
    }
}
