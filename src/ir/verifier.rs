use crate::ir::{
    function::{
        statement::{IRStatement, IsIRStatement},
        FunctionDefinition,
    },
    quantity::{Quantity, RegisterName},
};
use petgraph::{
    algo::dominators::{simple_fast, Dominators},
    graph::{DiGraph, NodeIndex},
    Direction,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A structural violation in a lowered function. Any of these discards the
/// function that produced it.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum VerifyError {
    #[error("function has no blocks")]
    EmptyBody,
    #[error("block {0} has no label")]
    UnnamedBlock(usize),
    #[error("label `{0}` is used by more than one block")]
    DuplicateLabel(String),
    #[error("block `{0}` does not end with a terminator")]
    MissingTerminator(String),
    #[error("terminator in the middle of block `{0}`")]
    StrayTerminator(String),
    #[error("jump or branch to unknown label `{0}`")]
    UnknownLabel(String),
    #[error("block `{0}` is unreachable from the entry")]
    UnreachableBlock(String),
    #[error("phi after the head of block `{0}`")]
    MisplacedPhi(String),
    #[error("register `{0}` is defined more than once")]
    RedefinedRegister(RegisterName),
    #[error("register `{0}` is not defined on every path to its use")]
    UndominatedUse(RegisterName),
    #[error("phi in `{block}` does not match the block's predecessors")]
    PhiSourceMismatch { block: String },
}

/// Where a register is defined: which block, and where inside it.
/// Parameters are defined "before" every statement of the entry block.
type Definition = (usize, i64);

/// Check a lowered function for structural soundness: every block labelled
/// and terminated exactly once at the end, every label resolvable, every
/// block reachable, registers in SSA form with definitions dominating uses,
/// and phi sources agreeing with their block's predecessors.
pub fn verify(function: &FunctionDefinition) -> Result<(), VerifyError> {
    if function.content.is_empty() {
        return Err(VerifyError::EmptyBody);
    }
    let labels = collect_labels(function)?;
    check_terminators(function)?;
    let successors = collect_successors(function, &labels)?;

    let mut graph = DiGraph::<usize, ()>::new();
    let nodes: Vec<NodeIndex> = (0..function.content.len())
        .map(|index| graph.add_node(index))
        .collect();
    for (from, to_blocks) in successors.iter().enumerate() {
        for to in to_blocks {
            graph.add_edge(nodes[from], nodes[*to], ());
        }
    }
    let dominators = simple_fast(&graph, nodes[0]);
    for (index, block) in function.content.iter().enumerate() {
        if index != 0 && dominators.immediate_dominator(nodes[index]).is_none() {
            return Err(VerifyError::UnreachableBlock(label_of(block, index)));
        }
    }

    let definitions = collect_definitions(function)?;
    check_uses(function, &labels, &graph, &nodes, &dominators, &definitions)
}

fn label_of(block: &crate::ir::function::basic_block::BasicBlock, index: usize) -> String {
    block.name.clone().unwrap_or_else(|| format!("<{index}>"))
}

fn collect_labels(function: &FunctionDefinition) -> Result<HashMap<String, usize>, VerifyError> {
    let mut labels = HashMap::new();
    for (index, block) in function.content.iter().enumerate() {
        let name = block
            .name
            .clone()
            .ok_or(VerifyError::UnnamedBlock(index))?;
        if labels.insert(name.clone(), index).is_some() {
            return Err(VerifyError::DuplicateLabel(name));
        }
    }
    Ok(labels)
}

fn check_terminators(function: &FunctionDefinition) -> Result<(), VerifyError> {
    for (index, block) in function.content.iter().enumerate() {
        match block.content.last() {
            Some(last) if last.is_terminator() => {}
            _ => return Err(VerifyError::MissingTerminator(label_of(block, index))),
        }
        if block
            .content
            .iter()
            .take(block.content.len() - 1)
            .any(IRStatement::is_terminator)
        {
            return Err(VerifyError::StrayTerminator(label_of(block, index)));
        }
    }
    Ok(())
}

fn collect_successors(
    function: &FunctionDefinition,
    labels: &HashMap<String, usize>,
) -> Result<Vec<Vec<usize>>, VerifyError> {
    let resolve = |label: &String| {
        labels
            .get(label)
            .copied()
            .ok_or_else(|| VerifyError::UnknownLabel(label.clone()))
    };
    function
        .content
        .iter()
        .map(|block| match block.content.last() {
            Some(IRStatement::Jump(jump)) => Ok(vec![resolve(&jump.label)?]),
            Some(IRStatement::Branch(branch)) => Ok(vec![
                resolve(&branch.success_label)?,
                resolve(&branch.failure_label)?,
            ]),
            _ => Ok(vec![]),
        })
        .collect()
}

fn collect_definitions(
    function: &FunctionDefinition,
) -> Result<HashMap<RegisterName, Definition>, VerifyError> {
    let mut definitions: HashMap<RegisterName, Definition> = HashMap::new();
    for parameter in &function.header.parameters {
        if definitions
            .insert(parameter.name.clone(), (0, -1))
            .is_some()
        {
            return Err(VerifyError::RedefinedRegister(parameter.name.clone()));
        }
    }
    for (block_index, block) in function.content.iter().enumerate() {
        for (statement_index, statement) in block.content.iter().enumerate() {
            if let Some((register, _)) = statement.generate_register() {
                if definitions
                    .insert(register.clone(), (block_index, statement_index as i64))
                    .is_some()
                {
                    return Err(VerifyError::RedefinedRegister(register));
                }
            }
        }
    }
    Ok(definitions)
}

fn dominates(
    dominators: &Dominators<NodeIndex>,
    dominator: NodeIndex,
    node: NodeIndex,
) -> bool {
    dominators
        .dominators(node)
        .map(|mut chain| chain.any(|it| it == dominator))
        .unwrap_or(false)
}

fn check_uses(
    function: &FunctionDefinition,
    labels: &HashMap<String, usize>,
    graph: &DiGraph<usize, ()>,
    nodes: &[NodeIndex],
    dominators: &Dominators<NodeIndex>,
    definitions: &HashMap<RegisterName, Definition>,
) -> Result<(), VerifyError> {
    for (block_index, block) in function.content.iter().enumerate() {
        let mut past_head = false;
        for (statement_index, statement) in block.content.iter().enumerate() {
            if let IRStatement::Phi(phi) = statement {
                if past_head {
                    return Err(VerifyError::MisplacedPhi(label_of(block, block_index)));
                }
                check_phi(phi, labels, nodes, dominators, definitions)
                    .map_err(|error| error.in_block(label_of(block, block_index)))?;

                let sources: HashSet<&String> =
                    phi.from.iter().map(|source| &source.block).collect();
                let predecessors: HashSet<&String> = graph
                    .neighbors_directed(nodes[block_index], Direction::Incoming)
                    .map(|node| {
                        let index = graph[node];
                        function.content[index]
                            .name
                            .as_ref()
                            .expect("labels were checked")
                    })
                    .collect();
                if sources != predecessors || phi.from.len() != predecessors.len() {
                    return Err(VerifyError::PhiSourceMismatch {
                        block: label_of(block, block_index),
                    });
                }
            } else {
                past_head = true;
                for register in statement.use_register() {
                    let (defined_in, position) = definitions
                        .get(&register)
                        .ok_or_else(|| VerifyError::UndominatedUse(register.clone()))?;
                    let sound = if *defined_in == block_index {
                        *position < statement_index as i64
                    } else {
                        dominates(dominators, nodes[*defined_in], nodes[block_index])
                    };
                    if !sound {
                        return Err(VerifyError::UndominatedUse(register));
                    }
                }
            }
        }
    }
    Ok(())
}

/// A phi's operands are read at the end of the matching predecessor, so each
/// register source must be defined in, or above, the block it flows in from.
fn check_phi(
    phi: &crate::ir::function::statement::Phi,
    labels: &HashMap<String, usize>,
    nodes: &[NodeIndex],
    dominators: &Dominators<NodeIndex>,
    definitions: &HashMap<RegisterName, Definition>,
) -> Result<(), PhiCheck> {
    for source in &phi.from {
        let Quantity::RegisterName(register) = &source.value else {
            continue;
        };
        let source_block = match labels.get(&source.block) {
            Some(index) => *index,
            None => return Err(PhiCheck::Mismatch),
        };
        let (defined_in, _) = definitions
            .get(register)
            .ok_or_else(|| PhiCheck::Undominated(register.clone()))?;
        if *defined_in != source_block
            && !dominates(dominators, nodes[*defined_in], nodes[source_block])
        {
            return Err(PhiCheck::Undominated(register.clone()));
        }
    }
    Ok(())
}

enum PhiCheck {
    Mismatch,
    Undominated(RegisterName),
}

impl PhiCheck {
    fn in_block(self, block: String) -> VerifyError {
        match self {
            PhiCheck::Mismatch => VerifyError::PhiSourceMismatch { block },
            PhiCheck::Undominated(register) => VerifyError::UndominatedUse(register),
        }
    }
}
