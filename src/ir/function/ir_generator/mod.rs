use super::basic_block::BasicBlock;
use crate::ir::{function::statement::IRStatement, quantity::RegisterName};
use std::{collections::HashMap, mem};
use thiserror::Error;

pub mod expression;
mod for_expression;
mod if_expression;
pub use expression::expression_from_ast;

/// Why lowering a definition failed. Each of these surfaces as a discarded
/// definition; none of them stop the driver loop.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum CodegenError {
    #[error("unbound variable `{0}`")]
    UnboundVariable(String),
    #[error("call of unknown function `{0}`")]
    UnknownFunction(String),
    #[error("operator `{0}` has no matching definition")]
    UnknownOperator(char),
    #[error("`{name}` takes {expected} arguments, {actual} were passed")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("lowered function is malformed: {0}")]
    Malformed(#[from] crate::ir::verifier::VerifyError),
}

/// [`IRGeneratingContext`] collects the basic blocks of one function as the
/// body expression is walked.
pub struct IRGeneratingContext<'a> {
    /// Parent [`crate::ir::IRGeneratingContext`].
    pub parent_context: &'a mut crate::ir::IRGeneratingContext,
    /// [`BasicBlock`]s that are already generated.
    pub done_basic_blocks: Vec<BasicBlock>,
    /// The [`BasicBlock`] that is in construction.
    pub current_basic_block: BasicBlock,
    /// The registers currently bound to source-level names: parameters, and
    /// loop variables while their loop is being lowered.
    pub symbol_table: HashMap<String, RegisterName>,
}

impl<'a> IRGeneratingContext<'a> {
    /// Create a new [`IRGeneratingContext`] with an empty symbol table.
    pub fn new(parent_context: &'a mut crate::ir::IRGeneratingContext) -> Self {
        Self {
            parent_context,
            done_basic_blocks: Vec::new(),
            current_basic_block: BasicBlock::new(),
            symbol_table: HashMap::new(),
        }
    }

    /// Label of the block statements currently append to. Control-flow
    /// lowering reads this to key phi edges by the block a value exits from,
    /// which can differ from the block its generation started in.
    pub fn current_block_label(&self) -> String {
        self.current_basic_block.name.clone().unwrap_or_default()
    }

    /// Finish the current [`BasicBlock`] with `terminator` and start an
    /// unnamed new one; the caller names it right away.
    pub fn end_current_basic_block_with(&mut self, terminator: impl Into<IRStatement>) {
        self.current_basic_block.content.push(terminator.into());
        self.done_basic_blocks
            .push(mem::take(&mut self.current_basic_block));
    }

    /// Name the block under construction.
    pub fn start_new_basic_block(&mut self, label: String) {
        self.current_basic_block.name = Some(label);
    }

    /// Generate a fresh register name.
    pub fn next_register(&mut self) -> RegisterName {
        self.parent_context.next_register()
    }

    /// Finish generating [`BasicBlock`]s for the current function and return
    /// them.
    pub fn done(mut self) -> Vec<BasicBlock> {
        if !self.current_basic_block.empty() {
            self.done_basic_blocks.push(self.current_basic_block);
        }
        self.done_basic_blocks
            .into_iter()
            .filter(|it| !it.empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::function::statement::{Jump, Ret};

    #[test]
    fn blocks_accumulate_in_order() {
        let mut parent = crate::ir::IRGeneratingContext::new();
        let mut ctx = IRGeneratingContext::new(&mut parent);
        ctx.start_new_basic_block("a".to_string());
        assert_eq!(ctx.current_block_label(), "a");
        ctx.end_current_basic_block_with(Jump {
            label: "b".to_string(),
        });
        ctx.start_new_basic_block("b".to_string());
        ctx.end_current_basic_block_with(Ret {
            value: Some(0.into()),
        });
        let blocks = ctx.done();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name.as_deref(), Some("a"));
        assert_eq!(blocks[1].name.as_deref(), Some("b"));
    }
}
