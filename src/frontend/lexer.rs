use log::{debug, trace};

use crate::config::Limits;
use crate::frontend::source::SourceCursor;
use crate::frontend::token::{Punct, Token};
use crate::lang::value::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// A lexical error with the position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: {kind}")]
pub struct LexerError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub col: usize,
}

impl LexerError {
    fn new(kind: LexErrorKind, span: Span) -> Self {
        LexerError {
            kind,
            line: span.line,
            col: span.col,
        }
    }

    pub fn span(&self) -> Span {
        Span {
            line: self.line,
            col: self.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character: {0:?}")]
    UnexpectedCharacter(char),
    #[error("unknown escape char: '\\{0}'")]
    UnknownEscape(char),
    #[error("char not closed")]
    CharNotClosed,
    #[error("multi-byte chars not allowed: {0:?}")]
    MultiByteChar(char),
    #[error("too many tokens (limit {0})")]
    TooManyTokens(usize),
}

/// Decodes the character after a backslash in a char literal.
fn unescape(ch: char) -> Option<char> {
    Some(match ch {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        '?' => '?',
        _ => return None,
    })
}

pub struct Lexer<'a> {
    cursor: SourceCursor<'a>,
    max_tokens: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_limits(source, &Limits::default())
    }

    pub fn with_limits(source: &'a str, limits: &Limits) -> Self {
        Lexer {
            cursor: SourceCursor::new(source),
            max_tokens: limits.max_tokens.max(1),
        }
    }

    fn span(&self) -> Span {
        Span {
            line: self.cursor.line(),
            col: self.cursor.col(),
        }
    }

    /// Lexes the next token.
    ///
    /// Returns `Ok(None)` at end of input. Whitespace and comments never
    /// produce tokens.
    pub fn next_token(&mut self) -> Result<Option<Spanned>, LexerError> {
        loop {
            let span = self.span();
            let Some(ch) = self.cursor.consume() else {
                return Ok(None);
            };

            let token = match ch {
                ' ' | '\t' | '\n' | '\r' => continue,
                '\'' => Token::Literal(self.read_char(span)?),
                '#' => {
                    self.cursor.skip_to_line_end();
                    continue;
                }
                '/' if self.cursor.peek() == Some('/') => {
                    self.cursor.skip_to_line_end();
                    continue;
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    Token::from_word(self.cursor.scan_identifier(c))
                }
                c if c.is_ascii_digit() => Token::Literal(Literal::Int(self.cursor.scan_integer(c))),
                c => match Punct::from_char(c) {
                    Some(punct) => Token::Punct(punct),
                    None => {
                        return Err(LexerError::new(LexErrorKind::UnexpectedCharacter(c), span));
                    }
                },
            };

            trace!("{} {:?}", span, token);
            return Ok(Some(Spanned { token, span }));
        }
    }

    /// Reads a char literal after its opening quote.
    fn read_char(&mut self, span: Span) -> Result<Literal, LexerError> {
        let not_closed = || LexerError::new(LexErrorKind::CharNotClosed, span);

        match self.cursor.consume() {
            Some('\\') => {
                let escaped = self.cursor.consume().ok_or_else(not_closed)?;
                if self.cursor.consume() != Some('\'') {
                    return Err(not_closed());
                }
                unescape(escaped)
                    .map(Literal::Char)
                    .ok_or_else(|| LexerError::new(LexErrorKind::UnknownEscape(escaped), span))
            }
            Some(ch) => {
                if self.cursor.consume() != Some('\'') {
                    return Err(not_closed());
                }
                if !ch.is_ascii() {
                    return Err(LexerError::new(LexErrorKind::MultiByteChar(ch), span));
                }
                Ok(Literal::Char(ch))
            }
            None => Err(not_closed()),
        }
    }

    /// Lexes the whole source.
    ///
    /// The result always ends with exactly one terminator: `Token::Eof` on
    /// success, or `Token::Error` carrying the first lexical error. Lexing
    /// stops at the first error.
    pub fn tokenize(&mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();

        loop {
            match self.next_token() {
                Ok(Some(spanned)) if tokens.len() + 1 >= self.max_tokens => {
                    let error =
                        LexerError::new(LexErrorKind::TooManyTokens(self.max_tokens), spanned.span);
                    tokens.push(Spanned {
                        token: Token::Error(error),
                        span: spanned.span,
                    });
                    break;
                }
                Ok(Some(spanned)) => tokens.push(spanned),
                Ok(None) => {
                    let span = self.span();
                    tokens.push(Spanned {
                        token: Token::Eof,
                        span,
                    });
                    break;
                }
                Err(error) => {
                    let span = error.span();
                    tokens.push(Spanned {
                        token: Token::Error(error),
                        span,
                    });
                    break;
                }
            }
        }

        debug!("lexed {} tokens", tokens.len());
        tokens
    }

    /// Like `tokenize`, but surfaces a trailing error token as `Err`.
    pub fn tokenize_checked(&mut self) -> Result<Vec<Spanned>, LexerError> {
        let tokens = self.tokenize();
        match tokens.last() {
            Some(Spanned {
                token: Token::Error(error),
                ..
            }) => Err(error.clone()),
            _ => Ok(tokens),
        }
    }
}
