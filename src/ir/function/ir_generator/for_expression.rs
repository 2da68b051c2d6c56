use super::{expression_from_ast, CodegenError, IRGeneratingContext};
use crate::{
    ast::expression::ForExpression,
    ir::{
        function::statement::{
            branch::BranchType,
            phi::{Phi, PhiSource},
            BinaryCalculate, BinaryOperation, Branch, Jump,
        },
        quantity::Quantity,
        RegisterName,
    },
    utility::data_type::WORD,
};

/// Lower a `for` expression.
///
/// The preheader jumps into the body block, whose phi carries the loop
/// variable: seeded with the start value from the preheader, extended with
/// `(next, exit block)` once the back edge is known. The end condition is
/// evaluated after the body and the step, so the body runs at least once.
/// The expression's own value is always the literal 0.
pub fn from_ast(
    ast: &ForExpression,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let loop_id = ctx.parent_context.next_loop_id;
    ctx.parent_context.next_loop_id += 1;
    let body_label = format!("loop_{loop_id}_body");
    let end_label = format!("loop_{loop_id}_end");

    let start = expression_from_ast(&ast.start, ctx)?;
    let preheader = ctx.current_block_label();
    ctx.end_current_basic_block_with(Jump {
        label: body_label.clone(),
    });

    ctx.start_new_basic_block(body_label.clone());
    let variable = ctx.next_register();
    ctx.current_basic_block.append_statement(Phi {
        to: variable.clone(),
        data_type: WORD,
        from: vec![PhiSource {
            value: start,
            block: preheader,
        }],
    });

    let shadowed = ctx
        .symbol_table
        .insert(ast.variable.clone(), variable.clone());
    let result = lower_body(ast, &variable, &body_label, &end_label, ctx);
    // Restore the shadowed binding whether or not the body lowered.
    match shadowed {
        Some(previous) => {
            ctx.symbol_table.insert(ast.variable.clone(), previous);
        }
        None => {
            ctx.symbol_table.remove(&ast.variable);
        }
    }
    result
}

fn lower_body(
    ast: &ForExpression,
    variable: &RegisterName,
    body_label: &str,
    end_label: &str,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    // The body's value is discarded.
    expression_from_ast(&ast.body, ctx)?;

    let step = match &ast.step {
        Some(step) => expression_from_ast(step, ctx)?,
        None => Quantity::NumberLiteral(1),
    };
    let next = ctx.next_register();
    ctx.current_basic_block.append_statement(BinaryCalculate {
        operation: BinaryOperation::Add,
        operand1: variable.clone().into(),
        operand2: step,
        to: next.clone(),
        data_type: WORD,
    });

    let end_condition = expression_from_ast(&ast.end, ctx)?;
    let exit_label = ctx.current_block_label();
    ctx.end_current_basic_block_with(Branch {
        branch_type: BranchType::NE,
        operand1: end_condition,
        operand2: 0.into(),
        success_label: body_label.to_string(),
        failure_label: end_label.to_string(),
    });

    loop_phi_mut(ctx, body_label)
        .expect("loop header block starts with its phi")
        .from
        .push(PhiSource {
            value: next.into(),
            block: exit_label,
        });

    ctx.start_new_basic_block(end_label.to_string());
    Ok(Quantity::NumberLiteral(0))
}

/// Find the loop-variable phi again once the back edge is known. The body
/// block has been finished by then, so it lives among the done blocks.
fn loop_phi_mut<'b>(ctx: &'b mut IRGeneratingContext, label: &str) -> Option<&'b mut Phi> {
    let block = if ctx.current_basic_block.name.as_deref() == Some(label) {
        &mut ctx.current_basic_block
    } else {
        ctx.done_basic_blocks
            .iter_mut()
            .find(|block| block.name.as_deref() == Some(label))?
    };
    block.content.first_mut()?.try_as_phi_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{
        BinaryOperatorResult, Expression, IntegerLiteral, VariableRef,
    };

    fn less_than(lhs: Expression, rhs: Expression) -> Expression {
        BinaryOperatorResult {
            operator: '<',
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    fn lower(
        ast: &ForExpression,
    ) -> (Quantity, Vec<crate::ir::function::basic_block::BasicBlock>) {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = IRGeneratingContext::new(&mut parent);
        ctx.start_new_basic_block("f_entry".to_string());
        let result = from_ast(ast, &mut ctx).unwrap();
        ctx.end_current_basic_block_with(crate::ir::function::statement::Ret {
            value: Some(result.clone()),
        });
        (result, ctx.done())
    }

    #[test]
    fn builds_the_loop_pattern() {
        let ast = ForExpression {
            variable: "i".to_string(),
            start: Box::new(IntegerLiteral(1).into()),
            end: Box::new(less_than(
                VariableRef("i".to_string()).into(),
                IntegerLiteral(5).into(),
            )),
            step: None,
            body: Box::new(VariableRef("i".to_string()).into()),
        };
        let (result, blocks) = lower(&ast);
        // The expression's value is the constant 0, whatever the loop did.
        assert_eq!(result, Quantity::NumberLiteral(0));

        assert_eq!(blocks[0].content.last().unwrap().to_string(), "j loop_0_body");
        let body = &blocks[1];
        assert_eq!(body.name.as_deref(), Some("loop_0_body"));
        let phi = body.content[0].as_phi();
        assert_eq!(
            phi.from,
            vec![
                PhiSource {
                    value: 1.into(),
                    block: "f_entry".to_string(),
                },
                PhiSource {
                    value: RegisterName("1".to_string()).into(),
                    block: "loop_0_body".to_string(),
                },
            ]
        );
        // step defaults to the literal 1
        assert_eq!(body.content[1].to_string(), "%1 = add i32 %0, 1");
        assert_eq!(
            body.content.last().unwrap().to_string(),
            "bne %3, 0, loop_0_body, loop_0_end"
        );
    }

    #[test]
    fn loop_variable_shadows_and_restores() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = IRGeneratingContext::new(&mut parent);
        ctx.start_new_basic_block("f_entry".to_string());
        ctx.symbol_table
            .insert("i".to_string(), RegisterName("i".to_string()));

        let ast = ForExpression {
            variable: "i".to_string(),
            start: Box::new(IntegerLiteral(1).into()),
            end: Box::new(IntegerLiteral(0).into()),
            step: None,
            body: Box::new(VariableRef("i".to_string()).into()),
        };
        from_ast(&ast, &mut ctx).unwrap();
        // The outer binding is visible again after the loop.
        assert_eq!(
            ctx.symbol_table.get("i"),
            Some(&RegisterName("i".to_string()))
        );

        let unbound = ForExpression {
            variable: "j".to_string(),
            start: Box::new(IntegerLiteral(1).into()),
            end: Box::new(IntegerLiteral(0).into()),
            step: None,
            body: Box::new(IntegerLiteral(0).into()),
        };
        from_ast(&unbound, &mut ctx).unwrap();
        assert_eq!(ctx.symbol_table.get("j"), None);
    }

    #[test]
    fn explicit_step_is_lowered() {
        let ast = ForExpression {
            variable: "i".to_string(),
            start: Box::new(IntegerLiteral(0).into()),
            end: Box::new(less_than(
                VariableRef("i".to_string()).into(),
                IntegerLiteral(10).into(),
            )),
            step: Some(Box::new(IntegerLiteral(2).into())),
            body: Box::new(VariableRef("i".to_string()).into()),
        };
        let (_, blocks) = lower(&ast);
        assert_eq!(blocks[1].content[1].to_string(), "%1 = add i32 %0, 2");
    }
}
