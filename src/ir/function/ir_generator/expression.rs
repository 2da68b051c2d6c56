use super::{for_expression, if_expression, CodegenError, IRGeneratingContext};
use crate::{
    ast::expression::{BinaryOperatorResult, Expression, FunctionCall, UnaryOperatorResult},
    ir::{
        function::statement::{BinaryCalculate, BinaryOperation, Call, ZeroExtend},
        quantity::Quantity,
    },
    utility::data_type::{BIT, WORD},
};

/// Lower one expression into the current block. The returned [`Quantity`]
/// holds the expression's value.
pub fn expression_from_ast(
    ast: &Expression,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    match ast {
        Expression::IntegerLiteral(literal) => Ok(literal.0.into()),
        Expression::VariableRef(variable) => ctx
            .symbol_table
            .get(&variable.0)
            .cloned()
            .map(Into::into)
            .ok_or_else(|| CodegenError::UnboundVariable(variable.0.clone())),
        Expression::UnaryOperatorResult(unary) => unary_from_ast(unary, ctx),
        Expression::BinaryOperatorResult(binary) => binary_from_ast(binary, ctx),
        Expression::FunctionCall(call) => call_from_ast(call, ctx),
        Expression::IfExpression(if_expression) => if_expression::from_ast(if_expression, ctx),
        Expression::ForExpression(for_expression) => for_expression::from_ast(for_expression, ctx),
    }
}

fn binary_from_ast(
    ast: &BinaryOperatorResult,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let lhs = expression_from_ast(&ast.lhs, ctx)?;
    let rhs = expression_from_ast(&ast.rhs, ctx)?;
    let operation = match ast.operator {
        '+' => BinaryOperation::Add,
        '-' => BinaryOperation::Sub,
        '*' => BinaryOperation::Mul,
        '/' => BinaryOperation::Divide,
        '<' => BinaryOperation::LessThan,
        symbol => {
            // Not a built-in: dispatch to the user's `binary<symbol>`.
            return emit_call(&format!("binary{symbol}"), vec![lhs, rhs], ctx).map_err(
                |error| match error {
                    CodegenError::UnknownFunction(_) => CodegenError::UnknownOperator(symbol),
                    other => other,
                },
            );
        }
    };
    if operation == BinaryOperation::LessThan {
        // The comparison result is a single bit; widen it back to the word.
        let compared = ctx.next_register();
        ctx.current_basic_block.append_statement(BinaryCalculate {
            operation,
            operand1: lhs,
            operand2: rhs,
            to: compared.clone(),
            data_type: BIT,
        });
        let widened = ctx.next_register();
        ctx.current_basic_block.append_statement(ZeroExtend {
            to: widened.clone(),
            operand: compared.into(),
            from_type: BIT,
            to_type: WORD,
        });
        Ok(widened.into())
    } else {
        let to = ctx.next_register();
        ctx.current_basic_block.append_statement(BinaryCalculate {
            operation,
            operand1: lhs,
            operand2: rhs,
            to: to.clone(),
            data_type: WORD,
        });
        Ok(to.into())
    }
}

fn unary_from_ast(
    ast: &UnaryOperatorResult,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let operand = expression_from_ast(&ast.operand, ctx)?;
    emit_call(&format!("unary{}", ast.operator), vec![operand], ctx).map_err(
        |error| match error {
            CodegenError::UnknownFunction(_) => CodegenError::UnknownOperator(ast.operator),
            other => other,
        },
    )
}

fn call_from_ast(
    ast: &FunctionCall,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let mut arguments = Vec::new();
    for argument in &ast.arguments {
        arguments.push(expression_from_ast(argument, ctx)?);
    }
    emit_call(&ast.name, arguments, ctx)
}

/// Emit a call of `name`, checking that the callee is known and that the
/// argument count matches its arity.
fn emit_call(
    name: &str,
    arguments: Vec<Quantity>,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let expected = match ctx.parent_context.function_headers.get(name) {
        Some(header) => header.parameters.len(),
        None => return Err(CodegenError::UnknownFunction(name.to_string())),
    };
    if expected != arguments.len() {
        return Err(CodegenError::ArityMismatch {
            name: name.to_string(),
            expected,
            actual: arguments.len(),
        });
    }
    let to = ctx.next_register();
    ctx.current_basic_block.append_statement(Call {
        to: Some(to.clone()),
        name: name.to_string(),
        data_type: WORD,
        params: arguments,
    });
    Ok(to.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::expression::{IntegerLiteral, VariableRef},
        ir::{function::statement::IRStatement, quantity::RegisterName},
    };

    fn fresh<'a>(
        parent: &'a mut crate::ir::IRGeneratingContext,
    ) -> IRGeneratingContext<'a> {
        let mut ctx = IRGeneratingContext::new(parent);
        ctx.start_new_basic_block("test_entry".to_string());
        ctx
    }

    fn binary(operator: char, lhs: Expression, rhs: Expression) -> Expression {
        BinaryOperatorResult {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    #[test]
    fn literals_lower_to_constants() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = fresh(&mut parent);
        let result = expression_from_ast(&IntegerLiteral(9).into(), &mut ctx).unwrap();
        assert_eq!(result, Quantity::NumberLiteral(9));
        assert!(ctx.current_basic_block.content.is_empty());
    }

    #[test]
    fn variables_resolve_against_the_symbol_table() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = fresh(&mut parent);
        ctx.symbol_table
            .insert("x".to_string(), RegisterName("x".to_string()));
        let result =
            expression_from_ast(&VariableRef("x".to_string()).into(), &mut ctx).unwrap();
        assert_eq!(result, RegisterName("x".to_string()).into());

        let error = expression_from_ast(&VariableRef("y".to_string()).into(), &mut ctx)
            .unwrap_err();
        assert_eq!(error, CodegenError::UnboundVariable("y".to_string()));
    }

    #[test]
    fn builtin_operators_lower_to_calculations() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = fresh(&mut parent);
        let ast = binary('+', IntegerLiteral(1).into(), IntegerLiteral(2).into());
        let result = expression_from_ast(&ast, &mut ctx).unwrap();
        assert_eq!(result, RegisterName("0".to_string()).into());
        assert_eq!(
            ctx.current_basic_block.content[0].to_string(),
            "%0 = add i32 1, 2"
        );
    }

    #[test]
    fn comparison_lowers_to_ult_then_zext() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = fresh(&mut parent);
        let ast = binary('<', IntegerLiteral(1).into(), IntegerLiteral(2).into());
        let result = expression_from_ast(&ast, &mut ctx).unwrap();
        assert_eq!(result, RegisterName("1".to_string()).into());
        let rendered: Vec<String> = ctx
            .current_basic_block
            .content
            .iter()
            .map(IRStatement::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec!["%0 = ult u1 1, 2", "%1 = zext u1 %0 to i32"]
        );
    }

    #[test]
    fn unknown_binary_operator_fails() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = fresh(&mut parent);
        let ast = binary('%', IntegerLiteral(6).into(), IntegerLiteral(2).into());
        let error = expression_from_ast(&ast, &mut ctx).unwrap_err();
        assert_eq!(error, CodegenError::UnknownOperator('%'));
    }

    #[test]
    fn calls_check_existence_and_arity() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        parent.function_headers.insert(
            "f".to_string(),
            crate::ir::function::FunctionHeader {
                name: "f".to_string(),
                parameters: vec![crate::ir::function::parameter::Parameter {
                    name: RegisterName("a".to_string()),
                    data_type: WORD,
                }],
                return_type: WORD,
            },
        );
        let mut ctx = fresh(&mut parent);

        let good: Expression = FunctionCall {
            name: "f".to_string(),
            arguments: vec![IntegerLiteral(1).into()],
        }
        .into();
        assert!(expression_from_ast(&good, &mut ctx).is_ok());
        assert_eq!(
            ctx.current_basic_block.content[0].to_string(),
            "%0 = call i32 f(1)"
        );

        let missing: Expression = FunctionCall {
            name: "g".to_string(),
            arguments: vec![],
        }
        .into();
        assert_eq!(
            expression_from_ast(&missing, &mut ctx).unwrap_err(),
            CodegenError::UnknownFunction("g".to_string())
        );

        let wrong_arity: Expression = FunctionCall {
            name: "f".to_string(),
            arguments: vec![],
        }
        .into();
        assert_eq!(
            expression_from_ast(&wrong_arity, &mut ctx).unwrap_err(),
            CodegenError::ArityMismatch {
                name: "f".to_string(),
                expected: 1,
                actual: 0,
            }
        );
    }
}
