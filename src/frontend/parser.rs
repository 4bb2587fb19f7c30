use log::{debug, trace, warn};

use crate::bytecode::{CompileError, CompiledProgram, CompilingProgram, Op};
use crate::config::Limits;
use crate::frontend::grammar::{self, Action, NonTerminal, Symbol};
use crate::frontend::lexer::{LexerError, Span, Spanned};
use crate::frontend::token::{Punct, Token, TokenKind};

/// A parse failure with the position of the offending token.
///
/// `position` is the index of the token in the lexer output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// The token stream ended with an error token.
    #[error("{0}")]
    Lexical(#[from] LexerError),

    /// A terminal on the symbol stack did not match the lookahead.
    #[error("{span}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: Token,
        span: Span,
        position: usize,
    },

    /// The table has no production for the lookahead.
    #[error("{span}: unexpected {found} while parsing {rule:?}")]
    NoProduction {
        rule: NonTerminal,
        found: Token,
        span: Span,
        position: usize,
    },

    /// Code generation rejected the input.
    #[error("{span}: {source}")]
    Compile {
        source: CompileError,
        span: Span,
        position: usize,
    },

    #[error("{span}: symbol stack overflow (limit {limit})")]
    SymbolStackOverflow {
        limit: usize,
        span: Span,
        position: usize,
    },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::Lexical(e) => e.span(),
            ParserError::UnexpectedToken { span, .. }
            | ParserError::NoProduction { span, .. }
            | ParserError::Compile { span, .. }
            | ParserError::SymbolStackOverflow { span, .. } => *span,
        }
    }
}

/// Table-driven pushdown parser that emits bytecode as it goes.
///
/// There is no syntax tree. Terminals on the symbol stack are matched
/// against the token stream, non-terminals are expanded through
/// `grammar::production`, and action symbols append code to the function
/// being compiled. `expression` is the one non-terminal scanned inline.
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    stack: Vec<Symbol>,
    max_symbol_stack: usize,
    program: CompilingProgram,
    /// Text of the most recently matched identifier terminal.
    last_identifier: Option<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Self::with_limits(tokens, &Limits::default())
    }

    /// Creates a parser over lexer output.
    ///
    /// A stream without a terminator is closed with `Token::Eof`.
    pub fn with_limits(mut tokens: Vec<Spanned>, limits: &Limits) -> Self {
        if !tokens.last().is_some_and(|s| s.token.is_terminator()) {
            let span = tokens.last().map(|s| s.span).unwrap_or(Span { line: 1, col: 1 });
            tokens.push(Spanned {
                token: Token::Eof,
                span,
            });
        }

        Parser {
            tokens,
            pos: 0,
            stack: Vec::with_capacity(limits.max_symbol_stack),
            max_symbol_stack: limits.max_symbol_stack,
            program: CompilingProgram::new(limits),
            last_identifier: None,
        }
    }

    /// Returns the lookahead token. Never moves past the terminator.
    fn current(&self) -> &Spanned {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.current().token.kind()
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn push(&mut self, symbol: Symbol) -> Result<(), ParserError> {
        if self.stack.len() >= self.max_symbol_stack {
            return Err(ParserError::SymbolStackOverflow {
                limit: self.max_symbol_stack,
                span: self.current().span,
                position: self.pos,
            });
        }
        self.stack.push(symbol);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Errors. An error token as lookahead always wins over a syntax error.
    // ------------------------------------------------------------------

    fn unexpected(&self, expected: TokenKind) -> ParserError {
        let current = self.current();
        match &current.token {
            Token::Error(e) => ParserError::Lexical(e.clone()),
            found => ParserError::UnexpectedToken {
                expected,
                found: found.clone(),
                span: current.span,
                position: self.pos,
            },
        }
    }

    fn no_production(&self, rule: NonTerminal) -> ParserError {
        let current = self.current();
        match &current.token {
            Token::Error(e) => ParserError::Lexical(e.clone()),
            found => ParserError::NoProduction {
                rule,
                found: found.clone(),
                span: current.span,
                position: self.pos,
            },
        }
    }

    fn compile_error(&self, source: CompileError) -> ParserError {
        ParserError::Compile {
            source,
            span: self.current().span,
            position: self.pos,
        }
    }

    fn emit(&mut self, op: Op) -> Result<(), ParserError> {
        self.program.emit(op).map_err(|e| self.compile_error(e))
    }

    /// Parses the whole token stream into a program.
    ///
    /// Any error aborts the parse; no partial program is returned.
    pub fn parse(mut self) -> Result<CompiledProgram, ParserError> {
        self.push(Symbol::NonTerminal(NonTerminal::Program))?;

        while let Some(&top) = self.stack.last() {
            trace!(
                "[{}] top {} lookahead {}",
                self.stack.len(),
                top,
                self.current().token
            );

            match top {
                Symbol::Terminal(expected) => self.match_terminal(expected)?,
                Symbol::Action(action) => {
                    self.stack.pop();
                    self.perform(action)?;
                }
                Symbol::NonTerminal(NonTerminal::Expression) => {
                    self.expression()?;
                    self.stack.pop();
                }
                Symbol::NonTerminal(rule) => {
                    let rhs = grammar::production(self.peek_kind(), rule)
                        .ok_or_else(|| self.no_production(rule))?;
                    self.stack.pop();
                    for symbol in rhs.iter().rev() {
                        self.push(*symbol)?;
                    }
                }
            }
        }

        let program = self.program.finish();
        debug!("compiled {} functions", program.functions.len());
        Ok(program)
    }

    /// Like `parse`, but yields the empty program on failure.
    pub fn parse_or_default(self) -> CompiledProgram {
        match self.parse() {
            Ok(program) => program,
            Err(e) => {
                warn!("parse failed: {}", e);
                CompiledProgram::default()
            }
        }
    }

    fn match_terminal(&mut self, expected: TokenKind) -> Result<(), ParserError> {
        if self.peek_kind() != expected {
            return Err(self.unexpected(expected));
        }

        if let Token::Id(name) = &self.current().token {
            self.last_identifier = Some(name.clone());
        }

        self.stack.pop();
        self.advance();
        Ok(())
    }

    fn perform(&mut self, action: Action) -> Result<(), ParserError> {
        match action {
            Action::NewFunction => {
                let name = self
                    .last_identifier
                    .clone()
                    .ok_or_else(|| self.compile_error(CompileError::MissingFunctionName))?;
                self.program
                    .new_function(&name)
                    .map_err(|e| self.compile_error(e))?;
            }
            Action::EmitReturn => self.emit(Op::Return)?,
        }
        Ok(())
    }

    /// Scans an expression inline.
    ///
    /// Literals become `Push`, `id(...)` becomes `Call`. A bare identifier
    /// emits nothing and operators are skipped.
    fn expression(&mut self) -> Result<(), ParserError> {
        while grammar::is_expression_token(self.peek_kind()) {
            let current = self.current();
            match &current.token {
                Token::Literal(literal) => {
                    let op = Op::Push(literal.clone());
                    self.emit(op)?;
                    self.advance();
                }
                Token::Id(name) => {
                    let name = name.clone();
                    let (span, position) = (current.span, self.pos);
                    self.advance();

                    if self.peek_kind() == TokenKind::Punct(Punct::OpenPar) {
                        self.skip_call_arguments()?;
                        let index = self.program.resolve(&name).ok_or(ParserError::Compile {
                            source: CompileError::UndefinedFunction(name),
                            span,
                            position,
                        })?;
                        self.emit(Op::Call(index))?;
                    }
                }
                _ => self.advance(),
            }
        }
        Ok(())
    }

    /// Moves past a parenthesized argument list, nesting included.
    ///
    /// Arguments are not bound to parameters, so no code is emitted for them.
    fn skip_call_arguments(&mut self) -> Result<(), ParserError> {
        let mut depth = 0usize;

        loop {
            match self.peek_kind() {
                TokenKind::Punct(Punct::OpenPar) => depth += 1,
                TokenKind::Punct(Punct::ClosePar) => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                kind if grammar::is_expression_token(kind)
                    || kind == TokenKind::Punct(Punct::Comma) => {}
                _ => return Err(self.unexpected(TokenKind::Punct(Punct::ClosePar))),
            }
            self.advance();
        }
    }
}
