use thiserror::Error;

/// Expression parsing errors.
///
/// Defines the errors raised while lexing and parsing the arithmetic text
/// handed to the `str` command: unexpected tokens, unbalanced parentheses,
/// invalid characters and literals that do not fit in 64 bits.
pub mod parse_error;
/// Expression evaluation errors.
///
/// Contains the errors raised while computing the value of a parsed
/// expression, such as division by zero, unknown functions or symbols, and
/// results that are not finite real numbers.
pub mod eval_error;
/// Interpreter errors.
///
/// Holds the error taxonomy of the Fir interpreter itself together with the
/// located error returned when a script stops on a fatal error.
pub mod runtime_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
pub use runtime_error::{Location, RuntimeError, ScriptError};

/// Any failure produced while turning expression text into a number.
#[derive(Debug, Error)]
pub enum ExpressionError {
    /// The text could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The text parsed but could not be evaluated to a real number.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
