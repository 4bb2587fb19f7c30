//! # Language values
//!
//! Values shared by the front end, the bytecode and the interpreter.
//! Literals are produced by the lexer, carried by `Push` instructions and
//! live on the interpreter's operand stack.

pub mod value;

pub use value::Literal;
