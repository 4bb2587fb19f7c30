use serde::{Deserialize, Serialize};

/// Capacities for every bounded buffer in the pipeline.
///
/// All storage is sized from these limits up front. Exceeding any of them
/// is reported as an error by the stage that owns the buffer; nothing is
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Tokens produced by the lexer, terminator included.
    pub max_tokens: usize,
    /// Depth of the parser's symbol stack.
    pub max_symbol_stack: usize,
    /// Slots in the function table, `main` included.
    pub max_functions: usize,
    /// Instructions per function.
    pub max_instructions: usize,
    /// Interpreter call stack depth.
    pub max_call_depth: usize,
    /// Local scope frames reserved per call frame.
    pub max_scope_frames: usize,
    /// Interpreter operand stack depth.
    pub max_operand_stack: usize,
    /// Optional budget of executed instructions.
    pub max_steps: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_tokens: 1024,
            max_symbol_stack: 128,
            max_functions: 10,
            max_instructions: 30,
            max_call_depth: 10,
            max_scope_frames: 3,
            max_operand_stack: 10,
            max_steps: None,
        }
    }
}

impl Limits {
    /// Parses limits from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
