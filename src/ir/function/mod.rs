use crate::{
    ast::{self, function_definition::FunctionKind, precedence::PrecedenceTable},
    ir::quantity::RegisterName,
    utility::{
        data_type::{self, Type, WORD},
        parsing,
    },
};
use basic_block::BasicBlock;
use ir_generator::{expression_from_ast, CodegenError, IRGeneratingContext};
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, space0},
    combinator::map,
    multi::{many0, separated_list0},
    sequence::{delimited, tuple},
    IResult,
};
use parameter::Parameter;
use statement::Ret;
use std::fmt;

/// Data structure, parser and ir generator for basic blocks.
pub mod basic_block;
/// Functions to generate IR from AST.
pub mod ir_generator;
/// Data structure and parser for a function's parameter.
pub mod parameter;
/// Data structure, parser and ir generator for ir statements.
pub mod statement;

/// The callable surface of a function: name, parameters, return type.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct FunctionHeader {
    /// Name of the function.
    pub name: String,
    /// Parameters of the function.
    pub parameters: Vec<Parameter>,
    /// Return type of the function.
    pub return_type: Type,
}

/// [`FunctionDefinition`] represents a whole lowered function.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct FunctionDefinition {
    pub header: FunctionHeader,
    /// Basic blocks of the function.
    pub content: Vec<BasicBlock>,
}

impl fmt::Display for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.header.name)?;
        for (i, parameter) in self.header.parameters.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        writeln!(f, ") -> {} {{", self.header.return_type)?;
        for basic_block in &self.content {
            write!(f, "{basic_block}")?;
        }
        write!(f, "}}")
    }
}

/// Parse ir code to get a [`FunctionDefinition`].
pub fn parse(code: &str) -> IResult<&str, FunctionDefinition> {
    map(
        tuple((
            tag("fn"),
            space0,
            parsing::ident,
            delimited(
                tag("("),
                separated_list0(parsing::in_multispace(tag(",")), parameter::parse),
                tag(")"),
            ),
            multispace0,
            tag("->"),
            multispace0,
            data_type::parse,
            multispace0,
            delimited(
                tag("{"),
                many0(parsing::in_multispace(basic_block::parse)),
                tag("}"),
            ),
        )),
        |(_, _, name, parameters, _, _, _, return_type, _, basic_blocks)| FunctionDefinition {
            header: FunctionHeader {
                name,
                parameters,
                return_type,
            },
            content: basic_blocks,
        },
    )(code)
}

/// Lower one definition to IR.
///
/// The header is registered before the body is lowered, so a definition can
/// call itself; a `binary` definition's precedence likewise becomes live
/// first. If the body fails to lower or the result fails verification, the
/// registration is rolled back so the name never resolves to a half-built
/// function. The precedence entry stays either way.
pub fn from_ast(
    ast: &ast::FunctionDefinition,
    ctx: &mut crate::ir::IRGeneratingContext,
    precedence: &mut PrecedenceTable,
) -> Result<FunctionDefinition, CodegenError> {
    let prototype = &ast.prototype;
    let header = FunctionHeader {
        name: prototype.name.clone(),
        parameters: prototype
            .parameters
            .iter()
            .map(|name| Parameter {
                name: RegisterName(name.clone()),
                data_type: WORD,
            })
            .collect(),
        return_type: WORD,
    };
    ctx.function_headers
        .insert(header.name.clone(), header.clone());
    if let FunctionKind::BinaryOperator {
        precedence: declared,
    } = prototype.kind
    {
        if let Some(symbol) = prototype.operator_symbol() {
            precedence.set(symbol, declared);
        }
    }
    match lower_body(ast, &header, ctx) {
        Ok(definition) => Ok(definition),
        Err(error) => {
            ctx.function_headers.shift_remove(&header.name);
            Err(error)
        }
    }
}

fn lower_body(
    ast: &ast::FunctionDefinition,
    header: &FunctionHeader,
    ctx: &mut crate::ir::IRGeneratingContext,
) -> Result<FunctionDefinition, CodegenError> {
    let mut function_ctx = IRGeneratingContext::new(ctx);
    function_ctx.start_new_basic_block(format!("{}_entry", header.name));
    for parameter in &header.parameters {
        function_ctx
            .symbol_table
            .insert(parameter.name.0.clone(), parameter.name.clone());
    }
    let value = expression_from_ast(&ast.body, &mut function_ctx)?;
    function_ctx.end_current_basic_block_with(Ret { value: Some(value) });
    let definition = FunctionDefinition {
        header: header.clone(),
        content: function_ctx.done(),
    };
    crate::ir::verifier::verify(&definition)?;
    Ok(definition)
}
