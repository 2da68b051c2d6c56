use crate::ir::{
    function::{
        statement::{BinaryOperation, BranchType, IRStatement},
        FunctionDefinition,
    },
    quantity::{Quantity, RegisterName},
};
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;

/// Why a run ended without a value.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ExecutionError {
    #[error("no function named `{0}`")]
    UnknownFunction(String),
    #[error("`{name}` takes {expected} arguments, {actual} were passed")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("no block labelled `{0}`")]
    UnknownLabel(String),
    #[error("phi has no source for predecessor `{0}`")]
    MissingPhiSource(String),
    #[error("register `{0}` was read before it was written")]
    UnsetRegister(RegisterName),
    #[error("block `{0}` ran out of statements without a terminator")]
    MissingTerminator(String),
    #[error("function returned no value")]
    MissingReturnValue,
    #[error("execution budget exhausted")]
    OutOfFuel,
}

const DEFAULT_FUEL: u64 = 1 << 20;

/// Steps through compiled functions block by block.
///
/// Every run is bounded by a statement budget, so a program that loops
/// forever comes back as [`ExecutionError::OutOfFuel`] instead of hanging
/// the caller.
pub struct Executor<'a> {
    functions: IndexMap<&'a str, &'a FunctionDefinition>,
    fuel: u64,
    block_visits: HashMap<String, usize>,
}

impl<'a> Executor<'a> {
    pub fn new(functions: &'a [FunctionDefinition]) -> Self {
        Self {
            functions: functions
                .iter()
                .map(|function| (function.header.name.as_str(), function))
                .collect(),
            fuel: DEFAULT_FUEL,
            block_visits: HashMap::new(),
        }
    }

    pub fn with_fuel(mut self, fuel: u64) -> Self {
        self.fuel = fuel;
        self
    }

    /// Call `name` with `arguments` and run it to completion.
    pub fn run(&mut self, name: &str, arguments: &[i32]) -> Result<i32, ExecutionError> {
        let function = *self
            .functions
            .get(name)
            .ok_or_else(|| ExecutionError::UnknownFunction(name.to_string()))?;
        self.run_definition(function, arguments)
    }

    /// Run a specific definition; anonymous units are not addressable by
    /// name, so the driver hands them in directly.
    pub fn run_definition(
        &mut self,
        function: &FunctionDefinition,
        arguments: &[i32],
    ) -> Result<i32, ExecutionError> {
        if function.header.parameters.len() != arguments.len() {
            return Err(ExecutionError::ArityMismatch {
                name: function.header.name.clone(),
                expected: function.header.parameters.len(),
                actual: arguments.len(),
            });
        }
        let mut registers: HashMap<RegisterName, i32> = function
            .header
            .parameters
            .iter()
            .zip(arguments)
            .map(|(parameter, value)| (parameter.name.clone(), *value))
            .collect();

        if function.content.is_empty() {
            return Err(ExecutionError::MissingTerminator(
                function.header.name.clone(),
            ));
        }
        let mut block_index = 0usize;
        let mut previous_label: Option<String> = None;
        'blocks: loop {
            let block = &function.content[block_index];
            if let Some(name) = &block.name {
                *self.block_visits.entry(name.clone()).or_insert(0) += 1;
            }
            for statement in &block.content {
                if self.fuel == 0 {
                    return Err(ExecutionError::OutOfFuel);
                }
                self.fuel -= 1;
                match statement {
                    IRStatement::Phi(phi) => {
                        let source = phi
                            .from
                            .iter()
                            .find(|source| Some(&source.block) == previous_label.as_ref())
                            .ok_or_else(|| {
                                ExecutionError::MissingPhiSource(
                                    previous_label.clone().unwrap_or_default(),
                                )
                            })?;
                        let value = read(&registers, &source.value)?;
                        registers.insert(phi.to.clone(), value);
                    }
                    IRStatement::BinaryCalculate(calculate) => {
                        let lhs = read(&registers, &calculate.operand1)?;
                        let rhs = read(&registers, &calculate.operand2)?;
                        let value = match calculate.operation {
                            BinaryOperation::Add => lhs.wrapping_add(rhs),
                            BinaryOperation::Sub => lhs.wrapping_sub(rhs),
                            BinaryOperation::Mul => lhs.wrapping_mul(rhs),
                            BinaryOperation::Divide => {
                                if rhs == 0 {
                                    return Err(ExecutionError::DivisionByZero);
                                }
                                ((lhs as u32) / (rhs as u32)) as i32
                            }
                            BinaryOperation::LessThan => ((lhs as u32) < (rhs as u32)) as i32,
                        };
                        registers.insert(calculate.to.clone(), value);
                    }
                    IRStatement::ZeroExtend(extend) => {
                        let value = read(&registers, &extend.operand)?;
                        registers.insert(extend.to.clone(), value);
                    }
                    IRStatement::Call(call) => {
                        let callee = *self.functions.get(call.name.as_str()).ok_or_else(|| {
                            ExecutionError::UnknownFunction(call.name.clone())
                        })?;
                        let mut arguments = Vec::with_capacity(call.params.len());
                        for param in &call.params {
                            arguments.push(read(&registers, param)?);
                        }
                        let value = self.run_definition(callee, &arguments)?;
                        if let Some(to) = &call.to {
                            registers.insert(to.clone(), value);
                        }
                    }
                    IRStatement::Branch(branch) => {
                        let lhs = read(&registers, &branch.operand1)?;
                        let rhs = read(&registers, &branch.operand2)?;
                        let taken = match branch.branch_type {
                            BranchType::EQ => lhs == rhs,
                            BranchType::NE => lhs != rhs,
                            BranchType::LT => (lhs as u32) < (rhs as u32),
                            BranchType::GE => (lhs as u32) >= (rhs as u32),
                        };
                        let label = if taken {
                            &branch.success_label
                        } else {
                            &branch.failure_label
                        };
                        previous_label = block.name.clone();
                        block_index = block_by_label(function, label)?;
                        continue 'blocks;
                    }
                    IRStatement::Jump(jump) => {
                        previous_label = block.name.clone();
                        block_index = block_by_label(function, &jump.label)?;
                        continue 'blocks;
                    }
                    IRStatement::Ret(ret) => {
                        return match &ret.value {
                            Some(value) => read(&registers, value),
                            None => Err(ExecutionError::MissingReturnValue),
                        };
                    }
                }
            }
            return Err(ExecutionError::MissingTerminator(
                block.name.clone().unwrap_or_default(),
            ));
        }
    }

    /// How many times the block labelled `label` has been entered, summed
    /// over every run of this executor.
    pub fn visits(&self, label: &str) -> usize {
        self.block_visits.get(label).copied().unwrap_or(0)
    }
}

fn read(registers: &HashMap<RegisterName, i32>, quantity: &Quantity) -> Result<i32, ExecutionError> {
    match quantity {
        Quantity::NumberLiteral(value) => Ok(*value),
        Quantity::RegisterName(register) => registers
            .get(register)
            .copied()
            .ok_or_else(|| ExecutionError::UnsetRegister(register.clone())),
    }
}

fn block_by_label(function: &FunctionDefinition, label: &str) -> Result<usize, ExecutionError> {
    function
        .content
        .iter()
        .position(|block| block.name.as_deref() == Some(label))
        .ok_or_else(|| ExecutionError::UnknownLabel(label.to_string()))
}
