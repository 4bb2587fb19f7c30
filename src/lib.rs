//! # sci
//!
//! Ahead-of-time toolchain for a tiny C-like language:
//!
//! ```text
//! source ──▶ Lexer ──▶ tokens ──▶ Parser (+ codegen) ──▶ CompiledProgram ──▶ Interpreter ──▶ i32
//! ```
//!
//! The parser is a table-driven pushdown automaton that emits bytecode
//! while it parses, so there is no syntax tree. The interpreter is a stack
//! machine with a call stack of frames and one shared operand stack.
//!
//! ```
//! let result = sci::run_source("int main() { return 88; }", &sci::Limits::default());
//! assert_eq!(result.unwrap(), 88);
//! ```

pub mod bytecode;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod lang;
pub mod runtime;

pub use bytecode::{CompiledFunction, CompiledProgram, Op};
pub use config::Limits;
pub use frontend::{Lexer, Parser, ParserError, Spanned, Token};
pub use lang::Literal;
pub use runtime::{Interpreter, RuntimeError};

/// Error from any stage of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SciError {
    #[error("{0}")]
    Parse(#[from] ParserError),
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

/// Lexes `source` into a terminated token stream.
pub fn tokenize(source: &str, limits: &Limits) -> Vec<Spanned> {
    Lexer::with_limits(source, limits).tokenize()
}

/// Lexes and parses `source` into a program.
pub fn compile(source: &str, limits: &Limits) -> Result<CompiledProgram, ParserError> {
    Parser::with_limits(tokenize(source, limits), limits).parse()
}

/// Compiles and runs `source`, returning the program result.
pub fn run_source(source: &str, limits: &Limits) -> Result<i32, SciError> {
    let program = compile(source, limits)?;
    Ok(Interpreter::with_limits(limits.clone()).run(&program)?)
}

/// Compiles and runs `source` with default limits. Any error yields 0.
pub fn evaluate(source: &str) -> i32 {
    match run_source(source, &Limits::default()) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("{}", e);
            0
        }
    }
}
