//! LL(1) grammar for the language, as a static production table.
//!
//! ```text
//! program        := function-def program | ε                      (ε on EOF)
//! function-def   := KWTYPE ID <register-function> '(' params ')' '{' statements '}'
//! params         := KWTYPE ID params-next | ε                      (ε on ')')
//! params-next    := ',' KWTYPE ID params-next | ε                  (ε on ')')
//! statements     := expression ';' statements                     (on ID, LITERAL)
//!                 | KWRET expression <emit-return> ';' statements
//!                 | ';' statements
//!                 | '{' statements '}' statements
//!                 | ε                                             (ε on '}')
//! call-args      := expression call-args-next | ε                  (ε on ')')
//! call-args-next := ',' expression call-args-next | ε              (ε on ')')
//! ```
//!
//! `expression` has no productions: the parser scans it inline.
//! The statement-continuation and call-args rules are kept in the table
//! but nothing reachable from `program` expands them.

use crate::frontend::token::{Punct, TokenKind};

/// Longest right-hand side a production may have.
pub const MAX_PRODUCTION_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Program,
    FuncDef,
    FuncCall,
    StatementBlock,
    KwType,
    StatementIdCont,
    CallArgs,
    CallArgsNext,
    DefParams,
    DefParamsNext,
    Expression,
}

/// Code generation triggers. They consume no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Register the last identifier as a new function and make it current.
    NewFunction,
    /// Append `Return` to the current function.
    EmitReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
    Action(Action),
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(kind) => write!(f, "{}", kind),
            Symbol::NonTerminal(nt) => write!(f, "<{:?}>", nt),
            Symbol::Action(action) => write!(f, "@{:?}", action),
        }
    }
}

/// Right-hand side of a production, first symbol parsed first.
pub type Production = &'static [Symbol];

const fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

const fn p(punct: Punct) -> Symbol {
    Symbol::Terminal(TokenKind::Punct(punct))
}

const fn nt(rule: NonTerminal) -> Symbol {
    Symbol::NonTerminal(rule)
}

const fn act(action: Action) -> Symbol {
    Symbol::Action(action)
}

const fn key(punct: Punct) -> TokenKind {
    TokenKind::Punct(punct)
}

const KWTYPE: Symbol = t(TokenKind::KwType);
const ID: Symbol = t(TokenKind::Id);
const EXPRESSION: Symbol = nt(NonTerminal::Expression);

/// `(lookahead, non-terminal) -> production`.
pub const PRODUCTIONS: &[(TokenKind, NonTerminal, Production)] = &[
    (
        TokenKind::KwType,
        NonTerminal::Program,
        &[nt(NonTerminal::FuncDef), nt(NonTerminal::Program)],
    ),
    (TokenKind::Eof, NonTerminal::Program, &[]),
    (
        TokenKind::KwType,
        NonTerminal::FuncDef,
        &[
            KWTYPE,
            ID,
            act(Action::NewFunction),
            p(Punct::OpenPar),
            nt(NonTerminal::DefParams),
            p(Punct::ClosePar),
            p(Punct::OpenCurly),
            nt(NonTerminal::StatementBlock),
            p(Punct::CloseCurly),
        ],
    ),
    (key(Punct::ClosePar), NonTerminal::DefParams, &[]),
    (
        TokenKind::KwType,
        NonTerminal::DefParams,
        &[KWTYPE, ID, nt(NonTerminal::DefParamsNext)],
    ),
    (
        key(Punct::Comma),
        NonTerminal::DefParamsNext,
        &[p(Punct::Comma), KWTYPE, ID, nt(NonTerminal::DefParamsNext)],
    ),
    (key(Punct::ClosePar), NonTerminal::DefParamsNext, &[]),
    (
        key(Punct::OpenCurly),
        NonTerminal::StatementBlock,
        &[
            p(Punct::OpenCurly),
            nt(NonTerminal::StatementBlock),
            p(Punct::CloseCurly),
            nt(NonTerminal::StatementBlock),
        ],
    ),
    (
        TokenKind::Id,
        NonTerminal::StatementBlock,
        &[EXPRESSION, p(Punct::Semicolon), nt(NonTerminal::StatementBlock)],
    ),
    (
        TokenKind::Literal,
        NonTerminal::StatementBlock,
        &[EXPRESSION, p(Punct::Semicolon), nt(NonTerminal::StatementBlock)],
    ),
    (
        TokenKind::KwRet,
        NonTerminal::StatementBlock,
        &[
            t(TokenKind::KwRet),
            EXPRESSION,
            act(Action::EmitReturn),
            p(Punct::Semicolon),
            nt(NonTerminal::StatementBlock),
        ],
    ),
    (
        key(Punct::Semicolon),
        NonTerminal::StatementBlock,
        &[p(Punct::Semicolon), nt(NonTerminal::StatementBlock)],
    ),
    (key(Punct::CloseCurly), NonTerminal::StatementBlock, &[]),
    (
        key(Punct::OpenPar),
        NonTerminal::StatementIdCont,
        &[
            p(Punct::OpenPar),
            nt(NonTerminal::CallArgs),
            p(Punct::ClosePar),
            p(Punct::Semicolon),
        ],
    ),
    (
        key(Punct::Equal),
        NonTerminal::StatementIdCont,
        &[p(Punct::Equal), EXPRESSION, p(Punct::Semicolon)],
    ),
    (
        TokenKind::Id,
        NonTerminal::CallArgs,
        &[EXPRESSION, nt(NonTerminal::CallArgsNext)],
    ),
    (
        TokenKind::Literal,
        NonTerminal::CallArgs,
        &[EXPRESSION, nt(NonTerminal::CallArgsNext)],
    ),
    (key(Punct::ClosePar), NonTerminal::CallArgs, &[]),
    (
        key(Punct::Comma),
        NonTerminal::CallArgsNext,
        &[p(Punct::Comma), EXPRESSION, nt(NonTerminal::CallArgsNext)],
    ),
    (key(Punct::ClosePar), NonTerminal::CallArgsNext, &[]),
];

/// Finds the production for `non_terminal` under `lookahead`.
pub fn production(lookahead: TokenKind, non_terminal: NonTerminal) -> Option<Production> {
    PRODUCTIONS
        .iter()
        .find(|(kind, rule, _)| *kind == lookahead && *rule == non_terminal)
        .map(|(_, _, rhs)| *rhs)
}

/// Token kinds the inline expression scan accepts.
pub fn is_expression_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Literal
            | TokenKind::Id
            | TokenKind::Punct(
                Punct::Plus
                    | Punct::Minus
                    | Punct::Star
                    | Punct::Slash
                    | Punct::OpenPar
                    | Punct::ClosePar
            )
    )
}
