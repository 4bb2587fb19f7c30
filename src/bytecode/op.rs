use serde::{Deserialize, Serialize};

use crate::lang::value::Literal;

// =============================================================================
// OP - Bytecode instructions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Op {
    /// End-of-buffer marker. Executes as a no-op.
    #[default]
    None,

    /// Push a literal onto the operand stack.
    Push(Literal),

    /// Reserved for arithmetic. The grammar never emits it yet and it
    /// executes as a no-op.
    Add,

    /// Enter the function at this slot of the function table.
    Call(usize),

    /// Leave the current function. The operand stack is left untouched so
    /// the callee's last value is what the caller sees on top.
    Return,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::None => write!(f, "NONE"),
            Op::Push(lit) => write!(f, "PUSH        {}", lit),
            Op::Add => write!(f, "ADD"),
            Op::Call(index) => write!(f, "CALL        {}", index),
            Op::Return => write!(f, "RETURN"),
        }
    }
}
