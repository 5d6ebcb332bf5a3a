//! # fir
//!
//! fir is an interpreter for Fir, a small line-oriented stack language.
//! Every line is a single command such as `push(2)`, `add` or
//! `str(x, 2^3)`. A script works on an evaluation stack and a named memory
//! store, can evaluate arithmetic expressions, include other scripts and run
//! shell commands.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    error::ScriptError,
    interpreter::session::{Session, SessionOptions},
};

/// Defines the syntax tree of arithmetic expressions.
///
/// The parser builds [`ast::Expr`] trees that the expression evaluator walks.
/// Each node keeps the offset of its source text for error reporting.
pub mod ast;
/// Provides the error types of the interpreter.
///
/// # Responsibilities
/// - Expression errors from lexing, parsing and evaluation.
/// - The runtime error taxonomy of Fir commands, split into fatal and
///   recoverable errors.
/// - Located script errors returned when a run stops.
pub mod error;
/// Evaluates arithmetic expression text, as used by the `str` command.
pub mod expression;
/// Executes Fir scripts.
///
/// This module ties together command parsing, the stack, the memory store,
/// file inclusion and shell execution into an interpreter session.
pub mod interpreter;
/// General numeric and path helpers.
pub mod util;

/// Runs a script file with output on stdout.
///
/// # Errors
/// Returns an error if the script cannot be read or a fatal error stops it.
pub fn run_script(path: &Path, options: SessionOptions) -> Result<(), ScriptError> {
    Session::new(options).run_file(path)
}

/// Runs Fir source text and returns everything it printed.
///
/// The source is reported as `<input>` in diagnostics. `using` paths are
/// resolved against the current directory and `exec` runs through the host
/// shell.
///
/// # Errors
/// Returns an error if a fatal error stops the run.
///
/// # Examples
/// ```
/// use fir::get_output;
///
/// let output = get_output("push(2)\npush(3.5)\nadd\ndump").unwrap();
/// assert_eq!(output, "Stack contents:\n5.5\n");
///
/// // Recoverable errors are reported and the script continues.
/// let output = get_output("print($x)\nprint(still here)").unwrap();
/// assert_eq!(output,
///            "Error on line 1 of '<input>': Memory address x does not contain a value!\nstill here\n");
///
/// // Stack errors stop the run.
/// assert!(get_output("push(1)\nsub").is_err());
/// ```
pub fn get_output(source: &str) -> Result<String, ScriptError> {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("<input>", source)?;

    Ok(String::from_utf8_lossy(&session.into_output()).into_owned())
}
