pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod ir;
pub mod op;

pub use compile::{CompilingFunction, CompilingProgram};
pub use compile_error::CompileError;
pub use ir::{CompiledFunction, CompiledProgram};
pub use op::Op;
