use super::{expression_from_ast, CodegenError, IRGeneratingContext};
use crate::{
    ast::expression::IfExpression,
    ir::{
        function::statement::{
            branch::BranchType,
            phi::{Phi, PhiSource},
            Branch, Jump,
        },
        quantity::Quantity,
    },
    utility::data_type::WORD,
};

/// Lower an `if` expression: branch on the condition being nonzero, lower
/// each branch into its own block, and merge the two values with a phi.
///
/// The phi is keyed by each branch's *exit* block, not the block the branch
/// started in: a branch body containing nested control flow advances the
/// insertion point.
pub fn from_ast(
    ast: &IfExpression,
    ctx: &mut IRGeneratingContext,
) -> Result<Quantity, CodegenError> {
    let if_id = ctx.parent_context.next_if_id;
    ctx.parent_context.next_if_id += 1;
    let then_label = format!("if_{if_id}_then");
    let else_label = format!("if_{if_id}_else");
    let end_label = format!("if_{if_id}_end");

    let condition = expression_from_ast(&ast.condition, ctx)?;
    ctx.end_current_basic_block_with(Branch {
        branch_type: BranchType::NE,
        operand1: condition,
        operand2: 0.into(),
        success_label: then_label.clone(),
        failure_label: else_label.clone(),
    });

    ctx.start_new_basic_block(then_label);
    let then_value = expression_from_ast(&ast.then_branch, ctx)?;
    let then_exit = ctx.current_block_label();
    ctx.end_current_basic_block_with(Jump {
        label: end_label.clone(),
    });

    ctx.start_new_basic_block(else_label);
    let else_value = expression_from_ast(&ast.else_branch, ctx)?;
    let else_exit = ctx.current_block_label();
    ctx.end_current_basic_block_with(Jump {
        label: end_label.clone(),
    });

    ctx.start_new_basic_block(end_label);
    let merged = ctx.next_register();
    ctx.current_basic_block.append_statement(Phi {
        to: merged.clone(),
        data_type: WORD,
        from: vec![
            PhiSource {
                value: then_value,
                block: then_exit,
            },
            PhiSource {
                value: else_value,
                block: else_exit,
            },
        ],
    });
    Ok(merged.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{Expression, IntegerLiteral};

    fn lower(ast: &IfExpression) -> (Quantity, Vec<crate::ir::function::basic_block::BasicBlock>) {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = IRGeneratingContext::new(&mut parent);
        ctx.start_new_basic_block("f_entry".to_string());
        let result = from_ast(ast, &mut ctx).unwrap();
        (result, ctx.done())
    }

    fn if_expression(condition: Expression, then: Expression, other: Expression) -> IfExpression {
        IfExpression {
            condition: Box::new(condition),
            then_branch: Box::new(then),
            else_branch: Box::new(other),
        }
    }

    #[test]
    fn produces_branch_blocks_and_a_merge_phi() {
        let ast = if_expression(
            IntegerLiteral(1).into(),
            IntegerLiteral(7).into(),
            IntegerLiteral(9).into(),
        );
        let (result, blocks) = lower(&ast);
        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks[0].content.last().unwrap().to_string(),
            "bne 1, 0, if_0_then, if_0_else"
        );
        assert_eq!(blocks[1].name.as_deref(), Some("if_0_then"));
        assert_eq!(blocks[1].content.last().unwrap().to_string(), "j if_0_end");
        assert_eq!(blocks[2].name.as_deref(), Some("if_0_else"));
        assert_eq!(blocks[3].name.as_deref(), Some("if_0_end"));
        let phi = blocks[3].content[0].as_phi();
        assert_eq!(
            phi.from,
            vec![
                PhiSource {
                    value: 7.into(),
                    block: "if_0_then".to_string(),
                },
                PhiSource {
                    value: 9.into(),
                    block: "if_0_else".to_string(),
                },
            ]
        );
        assert_eq!(result, phi.to.clone().into());
    }

    #[test]
    fn nested_branches_key_the_phi_by_exit_blocks() {
        // then-branch is itself an `if`, so its value exits from the inner
        // merge block rather than from `if_0_then`.
        let inner = if_expression(
            IntegerLiteral(1).into(),
            IntegerLiteral(2).into(),
            IntegerLiteral(3).into(),
        );
        let outer = if_expression(
            IntegerLiteral(1).into(),
            inner.into(),
            IntegerLiteral(9).into(),
        );
        let (_, blocks) = lower(&outer);
        let merge = blocks
            .iter()
            .find(|block| block.name.as_deref() == Some("if_0_end"))
            .unwrap();
        let phi = merge.content[0].as_phi();
        assert_eq!(phi.from[0].block, "if_1_end");
        assert_eq!(phi.from[1].block, "if_0_else");
    }

    #[test]
    fn failing_branch_fails_the_whole_expression() {
        let ast = if_expression(
            IntegerLiteral(1).into(),
            crate::ast::expression::VariableRef("nope".to_string()).into(),
            IntegerLiteral(9).into(),
        );
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = IRGeneratingContext::new(&mut parent);
        ctx.start_new_basic_block("f_entry".to_string());
        assert_eq!(
            from_ast(&ast, &mut ctx).unwrap_err(),
            CodegenError::UnboundVariable("nope".to_string())
        );
    }
}
