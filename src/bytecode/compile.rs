use log::debug;

use crate::bytecode::{CompiledFunction, CompiledProgram, Op, compile_error::CompileError};
use crate::config::Limits;

/// A function whose body is still being emitted. Append-only.
#[derive(Debug, Clone, Default)]
pub struct CompilingFunction {
    name: String,
    ops: Vec<Op>,
}

impl CompilingFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }
}

/// Function table under construction.
///
/// Slot 0 is reserved for `main` from the start; every other function gets
/// the next free slot in declaration order.
pub struct CompilingProgram {
    functions: Vec<CompilingFunction>,
    current: Option<usize>,
    max_functions: usize,
    max_instructions: usize,
}

impl CompilingProgram {
    pub fn new(limits: &Limits) -> Self {
        Self {
            functions: vec![CompilingFunction::default()],
            current: None,
            max_functions: limits.max_functions.max(1),
            max_instructions: limits.max_instructions,
        }
    }

    /// Registers `name` and makes it the function that receives emitted code.
    pub fn new_function(&mut self, name: &str) -> Result<usize, CompileError> {
        if self.resolve(name).is_some() {
            return Err(CompileError::DuplicateFunction(name.to_string()));
        }

        let index = if name == "main" {
            0
        } else {
            if self.functions.len() >= self.max_functions {
                return Err(CompileError::TooManyFunctions {
                    name: name.to_string(),
                    limit: self.max_functions,
                });
            }
            self.functions.push(CompilingFunction::default());
            self.functions.len() - 1
        };

        self.functions[index].name = name.to_string();
        self.current = Some(index);
        debug!("function '{}' -> slot {}", name, index);
        Ok(index)
    }

    /// Slot of an already declared function.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.functions.iter().position(|f| f.name == name)
    }

    pub fn current(&self) -> Option<&CompilingFunction> {
        self.current.map(|index| &self.functions[index])
    }

    /// Appends `op` to the current function.
    pub fn emit(&mut self, op: Op) -> Result<(), CompileError> {
        let index = self.current.ok_or(CompileError::NotInFunction)?;
        let function = &mut self.functions[index];
        if function.ops.len() >= self.max_instructions {
            return Err(CompileError::FunctionTooLong {
                name: function.name.clone(),
                limit: self.max_instructions,
            });
        }
        function.ops.push(op);
        Ok(())
    }

    pub fn finish(self) -> CompiledProgram {
        CompiledProgram {
            functions: self
                .functions
                .into_iter()
                .map(|f| CompiledFunction {
                    name: f.name,
                    ops: f.ops,
                })
                .collect(),
        }
    }
}
