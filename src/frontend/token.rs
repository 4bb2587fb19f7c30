use crate::frontend::lexer::LexerError;
use crate::lang::value::Literal;

/// Single-character punctuation tokens.
///
/// Multi-character operators are not recognized: `<=` lexes as `Left`
/// followed by `Equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    Exclamation,  // !
    Quotation,    // "
    Percent,      // %
    Ampersand,    // &
    OpenPar,      // (
    ClosePar,     // )
    Star,         // *
    Plus,         // +
    Comma,        // ,
    Minus,        // -
    Dot,          // .
    Slash,        // /
    Colon,        // :
    Semicolon,    // ;
    Left,         // <
    Equal,        // =
    Right,        // >
    OpenBracket,  // [
    Apostrophe,   // '
    Backslash,    // \
    CloseBracket, // ]
    Up,           // ^
    OpenCurly,    // {
    Pipe,         // |
    CloseCurly,   // }
    Tilde,        // ~
}

impl Punct {
    /// Looks up a punctuation character.
    pub fn from_char(ch: char) -> Option<Punct> {
        use Punct::*;
        Some(match ch {
            '!' => Exclamation,
            '"' => Quotation,
            '%' => Percent,
            '&' => Ampersand,
            '(' => OpenPar,
            ')' => ClosePar,
            '*' => Star,
            '+' => Plus,
            ',' => Comma,
            '-' => Minus,
            '.' => Dot,
            '/' => Slash,
            ':' => Colon,
            ';' => Semicolon,
            '<' => Left,
            '=' => Equal,
            '>' => Right,
            '[' => OpenBracket,
            '\'' => Apostrophe,
            '\\' => Backslash,
            ']' => CloseBracket,
            '^' => Up,
            '{' => OpenCurly,
            '|' => Pipe,
            '}' => CloseCurly,
            '~' => Tilde,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        use Punct::*;
        match self {
            Exclamation => '!',
            Quotation => '"',
            Percent => '%',
            Ampersand => '&',
            OpenPar => '(',
            ClosePar => ')',
            Star => '*',
            Plus => '+',
            Comma => ',',
            Minus => '-',
            Dot => '.',
            Slash => '/',
            Colon => ':',
            Semicolon => ';',
            Left => '<',
            Equal => '=',
            Right => '>',
            OpenBracket => '[',
            Apostrophe => '\'',
            Backslash => '\\',
            CloseBracket => ']',
            Up => '^',
            OpenCurly => '{',
            Pipe => '|',
            CloseCurly => '}',
            Tilde => '~',
        }
    }
}

/// Sub-tag carried by a type keyword token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Auto,
    Char,
    Int,
    Void,
}

impl TypeKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKeyword::Auto => "auto",
            TypeKeyword::Char => "char",
            TypeKeyword::Int => "int",
            TypeKeyword::Void => "void",
        }
    }
}

/// The kind of a token without its payload.
///
/// This is the terminal alphabet of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Punct(Punct),
    KwType,
    KwConst,
    KwRet,
    Id,
    Literal,
    Eof,
    Error,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Punct(p) => write!(f, "'{}'", p.as_char()),
            TokenKind::KwType => write!(f, "type keyword"),
            TokenKind::KwConst => write!(f, "'const'"),
            TokenKind::KwRet => write!(f, "'return'"),
            TokenKind::Id => write!(f, "identifier"),
            TokenKind::Literal => write!(f, "literal"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Error => write!(f, "invalid token"),
        }
    }
}

/// A lexed token with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Punct(Punct),
    KwType(TypeKeyword),
    KwConst,
    KwRet,
    Id(String),
    Literal(Literal),

    // Terminators: exactly one of these ends every token sequence.
    Eof,
    Error(LexerError),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Punct(p) => TokenKind::Punct(*p),
            Token::KwType(_) => TokenKind::KwType,
            Token::KwConst => TokenKind::KwConst,
            Token::KwRet => TokenKind::KwRet,
            Token::Id(_) => TokenKind::Id,
            Token::Literal(_) => TokenKind::Literal,
            Token::Eof => TokenKind::Eof,
            Token::Error(_) => TokenKind::Error,
        }
    }

    /// Returns true for `Eof` and `Error`.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Token::Eof | Token::Error(_))
    }

    /// Maps a scanned word to its keyword token, or an identifier.
    pub fn from_word(word: &str) -> Token {
        match word {
            "auto" => Token::KwType(TypeKeyword::Auto),
            "char" => Token::KwType(TypeKeyword::Char),
            "int" => Token::KwType(TypeKeyword::Int),
            "void" => Token::KwType(TypeKeyword::Void),
            "const" => Token::KwConst,
            "return" => Token::KwRet,
            _ => Token::Id(word.to_string()),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Punct(p) => write!(f, "{}", p.as_char()),
            Token::KwType(t) => write!(f, "{}", t.as_str()),
            Token::KwConst => write!(f, "const"),
            Token::KwRet => write!(f, "return"),
            Token::Id(s) => write!(f, "{}", s),
            Token::Literal(lit) => write!(f, "{}", lit),
            Token::Eof => write!(f, "EOF"),
            Token::Error(e) => write!(f, "ERROR({})", e.kind),
        }
    }
}
