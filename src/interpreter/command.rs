use std::path::PathBuf;

use crate::{error::RuntimeError, interpreter::value::Value};

/// Prefix of the file inclusion directive.
pub const INCLUDE_DIRECTIVE: &str = "using";

/// The closed set of Fir command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `push(value)`
    Push,
    /// `add`
    Add,
    /// `sub`
    Sub,
    /// `dump`
    Dump,
    /// `print(message)`
    Print,
    /// `str(address, expression)`
    Store,
    /// `printr(address)`, deprecated
    PrintRaw,
    /// `exec(command)`
    Exec,
    /// `equ(dest, src)`
    Assign,
}

impl CommandKind {
    /// Looks up a command by its name as written in a script.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::command::CommandKind;
    ///
    /// assert_eq!(CommandKind::from_name("str"), Some(CommandKind::Store));
    /// assert_eq!(CommandKind::from_name("Push"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "push" => Self::Push,
            "add" => Self::Add,
            "sub" => Self::Sub,
            "dump" => Self::Dump,
            "print" => Self::Print,
            "str" => Self::Store,
            "printr" => Self::PrintRaw,
            "exec" => Self::Exec,
            "equ" => Self::Assign,
            _ => return None,
        };
        Some(kind)
    }

    /// The name of the command as written in a script.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Dump => "dump",
            Self::Print => "print",
            Self::Store => "str",
            Self::PrintRaw => "printr",
            Self::Exec => "exec",
            Self::Assign => "equ",
        }
    }

    /// The number of arguments the command takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Add | Self::Sub | Self::Dump => 0,
            Self::Push | Self::Print | Self::PrintRaw | Self::Exec => 1,
            Self::Store | Self::Assign => 2,
        }
    }
}

/// A fully parsed command with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Push a literal onto the stack.
    Push(Value),
    /// Add the two top values.
    Add,
    /// Subtract the top value from the one below it.
    Sub,
    /// Print the whole stack.
    Dump,
    /// Print a message, or a memory cell when the message starts with `$`.
    Print(String),
    /// Evaluate an expression into memory.
    Store {
        /// Target address.
        address:    String,
        /// Unevaluated expression text.
        expression: String,
    },
    /// Print a memory cell without number formatting.
    PrintRaw(String),
    /// Run a shell command.
    Exec(String),
    /// Copy one memory cell to another.
    Assign {
        /// Destination address.
        dest: String,
        /// Source address.
        src:  String,
    },
}

/// One executable line of a script.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A command acting on the session.
    Command(Command),
    /// A `using` directive with its path as written.
    Include(PathBuf),
}

/// Parses one trimmed, non-empty source line.
///
/// The command name is everything before the first `(`. A command with
/// arguments must have exactly one `(` group closed by a final `)`. `print`
/// takes its message literally; other commands split their arguments on
/// commas and trim each one.
///
/// # Errors
/// - [`RuntimeError::UnknownCommand`] for an unrecognized name.
/// - [`RuntimeError::MalformedCommand`] for a second `(` group, a missing or
///   misplaced `)`, empty arguments or a wrong number of arguments.
/// - [`RuntimeError::InvalidValueType`] when `push` is given a non-number.
///
/// # Example
/// ```
/// use fir::interpreter::{
///     command::{Command, Instruction, parse_line},
///     value::Value,
/// };
///
/// assert_eq!(parse_line("push(3)").unwrap(),
///            Instruction::Command(Command::Push(Value::Integer(3))));
/// assert_eq!(parse_line("print(a, b)").unwrap(),
///            Instruction::Command(Command::Print("a, b".to_string())));
/// assert!(parse_line("str(x, (1 + 2) * 3)").is_err());
/// assert!(parse_line("jump(4)").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Instruction, RuntimeError> {
    let line = line.trim();
    let (name, rest) = match line.split_once('(') {
        Some((name, rest)) => (name.trim(), Some(rest)),
        None => (line, None),
    };

    let Some(kind) = CommandKind::from_name(name) else {
        if name.starts_with(INCLUDE_DIRECTIVE) {
            return parse_include(line);
        }
        return Err(RuntimeError::UnknownCommand { command: line.to_string() });
    };

    let malformed = || RuntimeError::MalformedCommand { name:    kind.name(),
                                                        command: line.to_string(), };

    let inner = match rest {
        Some(rest) => match rest.strip_suffix(')') {
            Some(inner) if !inner.contains('(') => Some(inner),
            _ => return Err(malformed()),
        },
        None => None,
    };

    if kind == CommandKind::Print {
        let message = inner.ok_or_else(malformed)?;
        return Ok(Instruction::Command(Command::Print(message.to_string())));
    }

    let args = match inner {
        Some(inner) => split_arguments(inner).ok_or_else(malformed)?,
        None => Vec::new(),
    };

    if args.len() != kind.arity() {
        return Err(malformed());
    }

    let command = match kind {
        CommandKind::Push => {
            let literal = args[0];
            let value = Value::parse_literal(literal).ok_or_else(|| {
                                                          RuntimeError::InvalidValueType { literal: literal.to_string() }
                                                      })?;
            Command::Push(value)
        },
        CommandKind::Add => Command::Add,
        CommandKind::Sub => Command::Sub,
        CommandKind::Dump => Command::Dump,
        CommandKind::Store => Command::Store { address:    args[0].to_string(),
                                               expression: args[1].to_string(), },
        CommandKind::PrintRaw => Command::PrintRaw(args[0].to_string()),
        CommandKind::Exec => Command::Exec(args[0].to_string()),
        CommandKind::Assign => Command::Assign { dest: args[0].to_string(),
                                                 src:  args[1].to_string(), },
        CommandKind::Print => return Err(malformed()),
    };

    Ok(Instruction::Command(command))
}

/// Parses `using <path>`. The path is the rest of the line, trimmed.
fn parse_include(line: &str) -> Result<Instruction, RuntimeError> {
    let malformed = || RuntimeError::MalformedCommand { name:    INCLUDE_DIRECTIVE,
                                                        command: line.to_string(), };

    let rest = line.strip_prefix(INCLUDE_DIRECTIVE).ok_or_else(malformed)?;
    let path = rest.trim();

    if path.is_empty() {
        return Err(malformed());
    }
    if !rest.starts_with(char::is_whitespace) {
        return Err(RuntimeError::UnknownCommand { command: line.to_string() });
    }
    Ok(Instruction::Include(PathBuf::from(path)))
}

/// Splits argument text on commas, trimming each piece.
///
/// Returns `None` if any argument is empty or contains a `)`.
fn split_arguments(text: &str) -> Option<Vec<&str>> {
    let args = text.split(',').map(str::trim).collect::<Vec<_>>();

    if args.iter().any(|arg| arg.is_empty() || arg.contains(')')) {
        return None;
    }
    Some(args)
}
