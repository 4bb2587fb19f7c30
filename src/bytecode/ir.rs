use crate::bytecode::Op;
use serde::{Deserialize, Serialize};

static END_OF_FUNCTION: Op = Op::None;

/// A compiled bytecode program.
///
/// Convention: `functions[0]` is always reserved for `main`, whatever the
/// declaration order. Other functions follow in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledProgram {
    pub functions: Vec<CompiledFunction>,
}

impl Default for CompiledProgram {
    /// The empty program: only the unnamed `main` slot, with no code.
    fn default() -> Self {
        Self {
            functions: vec![CompiledFunction::default()],
        }
    }
}

impl CompiledProgram {
    pub fn main(&self) -> Option<&CompiledFunction> {
        self.functions.first().filter(|f| f.name == "main")
    }

    pub fn has_main(&self) -> bool {
        self.main().is_some()
    }

    pub fn function(&self, index: usize) -> Option<&CompiledFunction> {
        self.functions.get(index)
    }

    /// Slot index of the function called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.functions.iter().position(|f| f.name == name)
    }

    /// True when no function holds any instruction.
    pub fn is_empty(&self) -> bool {
        self.functions.iter().all(|f| f.ops.is_empty())
    }

    /// Encodes the program as a postcard image.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Decodes a program written by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

/// A single compiled instruction stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompiledFunction {
    /// Empty for the reserved `main` slot when no `main` was declared.
    pub name: String,
    pub ops: Vec<Op>,
}

impl CompiledFunction {
    /// Instruction at `pc`. Every slot past the emitted code reads as
    /// `Op::None`.
    pub fn instruction(&self, pc: usize) -> &Op {
        self.ops.get(pc).unwrap_or(&END_OF_FUNCTION)
    }
}
