//! Error type for expression compilation.

use std::fmt;

/// Errors arising from tokenizing or parsing an expression.
///
/// Byte offsets refer to the original source string. Evaluation itself is
/// infallible: numeric degeneracy (division by zero, `0^-1`) propagates as
/// IEEE non-finite values rather than errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprError {
    /// A character that cannot start any token.
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset in the source.
        pos: usize,
    },
    /// A numeric literal that failed to parse.
    InvalidNumber {
        /// The literal text as written.
        text: String,
        /// Byte offset in the source.
        pos: usize,
    },
    /// A token that is not valid at this point in the grammar.
    UnexpectedToken {
        /// Human-readable description of the token found.
        found: String,
        /// Byte offset in the source.
        pos: usize,
    },
    /// The expression ended where an operand or `)` was required.
    UnexpectedEnd,
    /// An identifier not present in the variable table.
    UnknownIdentifier {
        /// The unresolved name.
        name: String,
        /// Byte offset in the source.
        pos: usize,
    },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { ch, pos } => {
                write!(f, "unexpected character '{ch}' at offset {pos}")
            }
            Self::InvalidNumber { text, pos } => {
                write!(f, "invalid numeric literal '{text}' at offset {pos}")
            }
            Self::UnexpectedToken { found, pos } => {
                write!(f, "unexpected {found} at offset {pos}")
            }
            Self::UnexpectedEnd => write!(f, "expression ended unexpectedly"),
            Self::UnknownIdentifier { name, pos } => {
                write!(f, "unknown identifier '{name}' at offset {pos}")
            }
        }
    }
}

impl std::error::Error for ExprError {}
