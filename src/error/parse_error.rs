use thiserror::Error;

/// Represents all errors that can occur while lexing or parsing an
/// expression.
///
/// Positions are zero-based byte offsets into the expression text; they are
/// reported one-based as columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Unexpected token {token} at column {}", position + 1)]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Offset of the token in the expression.
        position: usize,
    },
    /// Reached the end of input while an operand was still expected.
    #[error("Unexpected end of expression")]
    UnexpectedEndOfInput,
    /// A closing parenthesis `)` was expected but not found.
    #[error("Expected closing parenthesis ')' for '(' at column {}", position + 1)]
    ExpectedClosingParen {
        /// Offset of the unmatched opening parenthesis.
        position: usize,
    },
    /// The lexer found text that is not part of the expression language.
    #[error("Invalid character sequence '{text}' at column {}", position + 1)]
    InvalidCharacter {
        /// The rejected text.
        text:     String,
        /// Offset of the rejected text.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Extra tokens after expression starting with {token} at column {}", position + 1)]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Offset of the first extra token.
        position: usize,
    },
    /// The expression is nested too deeply to be parsed.
    #[error("Expression is nested more than {limit} levels deep")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
    },
    /// Postfix `!` was repeated more often than a multi-factorial allows.
    #[error("{count} factorials is too many")]
    TooManyFactorials {
        /// The number of consecutive `!`.
        count: usize,
    },
}
