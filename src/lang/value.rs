use serde::{Deserialize, Serialize};

/// A literal value as produced by the lexer and carried by `Push`.
///
/// Only `Int` and `Char` are produced by the current grammar. `Str` and
/// `Double` are kept so compiled images stay forward compatible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Literal {
    /// No value.
    #[default]
    None,

    /// 32-bit signed integer, accumulated with wrapping arithmetic.
    Int(i32),

    /// Single ASCII character.
    Char(char),

    /// String value (not produced by the lexer yet).
    Str(String),

    /// Floating-point value (not produced by the lexer yet).
    Double(f64),
}

impl Literal {
    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Literal::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "none",
            Literal::Int(_) => "int",
            Literal::Char(_) => "char",
            Literal::Str(_) => "string",
            Literal::Double(_) => "double",
        }
    }
}

impl std::fmt::Display for Literal {
    /// Formats the literal the way it would be written in source.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::None => write!(f, "none"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Char(c) => write!(f, "{:?}", c),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Double(d) => write!(f, "{}", d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Literal::default(), Literal::None);
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Literal::Int(7).as_int(), Some(7));
        assert_eq!(Literal::Char('7').as_int(), None);
        assert_eq!(Literal::None.as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::Int(-3).to_string(), "-3");
        assert_eq!(Literal::Char('\n').to_string(), "'\\n'");
        assert_eq!(Literal::Str("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(Literal::None.to_string(), "none");
    }
}
