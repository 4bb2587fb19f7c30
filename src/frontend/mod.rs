//! # Front end
//!
//! Source text to bytecode in one pass:
//!
//! - `source` and `lexer` turn characters into a terminated token stream.
//! - `grammar` holds the production table.
//! - `parser` drives the table over the tokens and emits code through
//!   `bytecode::CompilingProgram` while it parses. No tree is built.

pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;
pub mod token_dumper;

pub use lexer::{LexErrorKind, Lexer, LexerError, Span, Spanned};
pub use parser::{Parser, ParserError};
pub use token::{Punct, Token, TokenKind, TypeKeyword};
