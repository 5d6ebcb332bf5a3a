use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::{error::ExpressionError, interpreter::shell::ShellError};

/// Represents all errors that can occur while executing Fir commands.
///
/// Stack and operand-type errors abort the run; everything else is printed as
/// a diagnostic and execution continues with the next line. See
/// [`RuntimeError::is_fatal`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tried to pop from an empty stack.
    #[error("Stack underflow")]
    StackUnderflow,
    /// An arithmetic command found fewer than two values on the stack.
    #[error("Not enough operands for {operation}")]
    InsufficientOperands {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// `push` received something that is neither an integer nor a float.
    #[error("Invalid value type '{literal}'. Value must be an integer or a float.")]
    InvalidValueType {
        /// The rejected argument text.
        literal: String,
    },
    /// A memory address was read before anything was stored there.
    #[error("Memory address {address} does not contain a value!")]
    UndefinedAddress {
        /// The address that was looked up.
        address: String,
    },
    /// The expression given to `str` could not be evaluated.
    #[error("Error evaluating expression: {0}")]
    ExpressionEvaluation(#[from] ExpressionError),
    /// The line does not start with a known command.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The offending line.
        command: String,
    },
    /// A known command was written with the wrong shape or arity.
    #[error("Invalid {name} command format: {command}")]
    MalformedCommand {
        /// The command name.
        name:    &'static str,
        /// The offending line.
        command: String,
    },
    /// A `using` directive named a file that does not exist.
    #[error("File '{}' not found.", path.display())]
    FileNotFound {
        /// The resolved path.
        path: PathBuf,
    },
    /// A `using` directive named a file that exists but could not be read.
    #[error("File '{}' could not be read: {source}", path.display())]
    FileUnreadable {
        /// The resolved path.
        path:   PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The shell command given to `exec` failed.
    #[error("Error executing command: {0}")]
    ShellCommandFailed(#[from] ShellError),
    /// `using` directives are nested deeper than the session allows.
    #[error("Include depth limit of {limit} exceeded while including '{}'", path.display())]
    IncludeDepthExceeded {
        /// The file that would have been included.
        path:  PathBuf,
        /// The configured limit.
        limit: usize,
    },
    /// Writing to the session output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    /// Returns `true` when the error terminates the whole run.
    ///
    /// # Example
    /// ```
    /// use fir::error::RuntimeError;
    ///
    /// assert!(RuntimeError::StackUnderflow.is_fatal());
    /// assert!(!RuntimeError::UndefinedAddress { address: "x".to_string() }.is_fatal());
    /// assert!(!RuntimeError::IncludeDepthExceeded { path:  "deep.fir".into(),
    ///                                               limit: 64, }.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self,
                 Self::StackUnderflow
                 | Self::InsufficientOperands { .. }
                 | Self::InvalidValueType { .. }
                 | Self::Io(_))
    }
}

/// A position in a Fir source file.
///
/// `file` is the display name of the script (its file name), `line` is the
/// one-based line number inside that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Display name of the source file.
    pub file: String,
    /// One-based line number.
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} of '{}'", self.line, self.file)
    }
}

/// Errors that stop a script run.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The top-level script does not exist.
    #[error("File '{}' not found.", path.display())]
    ScriptNotFound {
        /// The path given on the command line.
        path: PathBuf,
    },
    /// The top-level script exists but could not be read.
    #[error("File '{}' could not be read: {source}", path.display())]
    ScriptUnreadable {
        /// The path given on the command line.
        path:   PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A fatal runtime error, located at the line that raised it.
    #[error("Error on {location}: {error}")]
    Fatal {
        /// Where the error was raised.
        location: Location,
        /// The error itself.
        #[source]
        error:    RuntimeError,
    },
}

impl ScriptError {
    /// Returns the runtime error behind a fatal stop, if any.
    #[must_use]
    pub const fn runtime_error(&self) -> Option<&RuntimeError> {
        match self {
            Self::Fatal { error, .. } => Some(error),
            _ => None,
        }
    }
}
