use thiserror::Error;

/// Represents all errors that can occur while evaluating a parsed expression.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    /// The expression names a symbol that has no numeric value.
    #[error("Unknown symbol '{name}' at column {}", position + 1)]
    UnknownSymbol {
        /// The name of the symbol.
        name:     String,
        /// Offset of the symbol in the expression.
        position: usize,
    },
    /// The expression calls a function that does not exist.
    #[error("Unknown function '{name}' at column {}", position + 1)]
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// Offset of the call in the expression.
        position: usize,
    },
    /// A function received the wrong number of arguments.
    #[error("Function '{name}' does not accept {found} argument(s)")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:  String,
        /// The number of arguments supplied.
        found: usize,
    },
    /// An argument lies outside the real domain of a function.
    #[error("Invalid argument: {details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Attempted division (or modulo) by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// The result is infinite, undefined or complex.
    #[error("Result is not a finite real number")]
    NonFinite,
}
