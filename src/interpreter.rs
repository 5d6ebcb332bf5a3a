/// The command module turns source lines into instructions.
///
/// It owns the closed set of command names, their arities and the argument
/// splitting rules, and recognizes the `using` directive.
pub mod command;
/// The memory module holds values under named addresses.
pub mod memory;
/// The session module executes scripts.
///
/// A session owns the stack, the memory store and the set of included files,
/// runs source text line by line, follows `using` directives and decides
/// which errors stop the run.
///
/// # Responsibilities
/// - Dispatches parsed commands to stack, memory, print and shell operations.
/// - Resolves and includes other scripts at most once each.
/// - Reports recoverable errors with their file and line and continues.
pub mod session;
/// The shell module runs `exec` commands on the host system.
pub mod shell;
/// The stack module implements the evaluation stack.
pub mod stack;
/// The value module defines Fir's numeric values.
///
/// Values are either 64-bit integers or double precision floats. The module
/// provides canonicalization, literal parsing, checked arithmetic and the
/// formatting rules used by `print`, `dump` and `printr`.
pub mod value;
