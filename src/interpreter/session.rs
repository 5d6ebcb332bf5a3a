use std::{
    collections::HashSet,
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    error::{Location, RuntimeError, ScriptError},
    expression::evaluate,
    interpreter::{
        command::{Command, Instruction, parse_line},
        memory::Memory,
        shell::{ShellRunner, SystemShell},
        stack::Stack,
        value::Value,
    },
    util::path::{display_name, include_key, normalize_lexically},
};

/// Default limit for nested `using` directives.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Configuration of an interpreter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Directory that `using` paths are resolved against. When unset,
    /// [`Session::run_file`] uses the directory of the top-level script.
    pub base_dir:          Option<PathBuf>,
    /// Maximum nesting of `using` directives.
    pub max_include_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { base_dir:          None,
               max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH, }
    }
}

/// An interpreter session.
///
/// Owns the stack, the memory store and the set of included files. All
/// language output and recoverable diagnostics are written to `out`.
pub struct Session<W: Write = io::Stdout> {
    stack:    Stack,
    memory:   Memory,
    included: HashSet<PathBuf>,
    options:  SessionOptions,
    shell:    Box<dyn ShellRunner>,
    out:      W,
    depth:    usize,
}

impl Session<io::Stdout> {
    /// Creates a session writing to standard output.
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self::with_output(options, io::stdout())
    }
}

impl<W: Write> Session<W> {
    /// Creates a session writing to `out`, running `exec` through the host
    /// shell.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::session::{Session, SessionOptions};
    ///
    /// let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    /// session.run_source("demo.fir", "push(2)\npush(3)\nadd\ndump").unwrap();
    ///
    /// let output = String::from_utf8(session.into_output()).unwrap();
    /// assert_eq!(output, "Stack contents:\n5\n");
    /// ```
    pub fn with_output(options: SessionOptions, out: W) -> Self {
        Self { stack: Stack::new(),
               memory: Memory::new(),
               included: HashSet::new(),
               options,
               shell: Box::new(SystemShell),
               out,
               depth: 0 }
    }

    /// Replaces the shell runner used by `exec`.
    #[must_use]
    pub fn with_shell(mut self, shell: impl ShellRunner + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    /// The evaluation stack.
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The memory store.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Keys of every file registered for inclusion so far.
    pub const fn included(&self) -> &HashSet<PathBuf> {
        &self.included
    }

    /// Consumes the session and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs a script file.
    ///
    /// The file is registered as included before its first line runs, so a
    /// script that includes itself is not executed twice.
    ///
    /// # Errors
    /// Returns a [`ScriptError`] if the file cannot be read or a fatal error
    /// stops the run.
    pub fn run_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| {
                                                 if source.kind() == ErrorKind::NotFound {
                                                     ScriptError::ScriptNotFound { path: path.to_path_buf() }
                                                 } else {
                                                     ScriptError::ScriptUnreadable { path: path.to_path_buf(),
                                                                                     source }
                                                 }
                                             })?;

        if self.options.base_dir.is_none() {
            self.options.base_dir = Some(path.parent().map(Path::to_path_buf).unwrap_or_default());
        }
        self.included.insert(include_key(path));

        debug!(path = %path.display(), "running script");
        self.run_source(&display_name(path), &source)
    }

    /// Runs source text line by line.
    ///
    /// Lines are trimmed and blank lines are skipped. Recoverable errors are
    /// reported as `Error on line N of 'name': ...` and execution continues.
    ///
    /// # Errors
    /// Returns [`ScriptError::Fatal`] at the first fatal error.
    pub fn run_source(&mut self, name: &str, source: &str) -> Result<(), ScriptError> {
        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let location = Location { file: name.to_string(),
                                      line: index + 1, };
            self.execute_line(line, &location)?;
        }
        Ok(())
    }

    /// Parses and executes a single line.
    fn execute_line(&mut self, line: &str, location: &Location) -> Result<(), ScriptError> {
        let outcome = match parse_line(line) {
            Ok(Instruction::Include(path)) => return self.include_file(&path, location),
            Ok(Instruction::Command(command)) => self.execute(command),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(error) => self.recover(error, location),
        }
    }

    /// Reports a recoverable error, or turns a fatal one into a
    /// [`ScriptError`].
    fn recover(&mut self, error: RuntimeError, location: &Location) -> Result<(), ScriptError> {
        if error.is_fatal() {
            return Err(ScriptError::Fatal { location: location.clone(),
                                            error });
        }

        writeln!(self.out, "Error on {location}: {error}").map_err(|e| ScriptError::Fatal { location: location.clone(),
                                                                                             error:    e.into(), })
    }

    /// Includes another script into this session.
    ///
    /// `path` is resolved against the session's base directory. A file that
    /// was already included is skipped with a notice.
    ///
    /// Exceeding the include depth limit is reported and the file is skipped.
    ///
    /// # Errors
    /// Returns [`ScriptError::Fatal`] if a fatal error occurs inside the
    /// included file.
    pub fn include_file(&mut self, path: &Path, location: &Location) -> Result<(), ScriptError> {
        let base_dir = self.options.base_dir.clone().unwrap_or_default();
        let resolved = normalize_lexically(&base_dir.join(path));
        let key = include_key(&resolved);

        if self.included.contains(&key) {
            debug!(path = %resolved.display(), "skipping repeated include");
            let notice = format!("File '{}' has already been included. Skipping.", resolved.display());
            return self.write_line(&notice, location);
        }

        if self.depth >= self.options.max_include_depth {
            warn!(path = %resolved.display(), limit = self.options.max_include_depth, "include depth exceeded");
            return self.recover(RuntimeError::IncludeDepthExceeded { path:  resolved,
                                                                     limit: self.options.max_include_depth, },
                                location);
        }

        let source = match fs::read_to_string(&resolved) {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return self.recover(RuntimeError::FileNotFound { path: resolved }, location);
            },
            Err(source) => {
                return self.recover(RuntimeError::FileUnreadable { path: resolved,
                                                                   source },
                                    location);
            },
        };

        self.included.insert(key);
        self.depth += 1;
        debug!(path = %resolved.display(), depth = self.depth, "entering include");

        let result = self.run_source(&display_name(&resolved), &source);

        self.depth -= 1;
        debug!(path = %resolved.display(), "leaving include");
        result
    }

    fn write_line(&mut self, text: &str, location: &Location) -> Result<(), ScriptError> {
        writeln!(self.out, "{text}").map_err(|e| ScriptError::Fatal { location: location.clone(),
                                                                       error:    e.into(), })
    }

    /// Executes a parsed command against the session.
    ///
    /// # Errors
    /// Returns the [`RuntimeError`] raised by the operation.
    pub fn execute(&mut self, command: Command) -> Result<(), RuntimeError> {
        debug!(?command, "executing");

        match command {
            Command::Push(value) => {
                self.push(value);
                Ok(())
            },
            Command::Add => self.add(),
            Command::Sub => self.sub(),
            Command::Dump => self.dump(),
            Command::Print(message) => self.print_message(&message),
            Command::Store { address, expression } => self.store(&address, &expression),
            Command::PrintRaw(address) => self.print_raw(&address),
            Command::Exec(command) => self.exec(&command),
            Command::Assign { dest, src } => self.assign(&dest, &src),
        }
    }

    /// Pushes a value onto the stack.
    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pops the top value off the stack.
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack.pop()
    }

    /// Adds the two top stack values.
    pub fn add(&mut self) -> Result<(), RuntimeError> {
        self.stack.add()
    }

    /// Subtracts the top stack value from the one below it.
    pub fn sub(&mut self) -> Result<(), RuntimeError> {
        self.stack.sub()
    }

    /// Prints the stack from bottom to top under a `Stack contents:` header.
    pub fn dump(&mut self) -> Result<(), RuntimeError> {
        writeln!(self.out, "Stack contents:")?;
        for value in self.stack.iter() {
            writeln!(self.out, "{value}")?;
        }
        Ok(())
    }

    /// Prints a message.
    ///
    /// A message starting with `$` names a memory address whose value is
    /// printed instead.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedAddress`] for an unset address.
    pub fn print_message(&mut self, message: &str) -> Result<(), RuntimeError> {
        match message.strip_prefix('$') {
            Some(address) => {
                let value = self.memory.read(address)?;
                writeln!(self.out, "{value}")?;
            },
            None => writeln!(self.out, "{message}")?,
        }
        Ok(())
    }

    /// Evaluates `expression` and stores the canonical result at `address`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ExpressionEvaluation`] if the expression fails;
    /// memory is left unchanged.
    pub fn store(&mut self, address: &str, expression: &str) -> Result<(), RuntimeError> {
        let value = evaluate(expression)?;
        debug!(address, %value, "stored");
        self.memory.write(address, value);
        Ok(())
    }

    /// Copies the value at `src` to `dest`.
    pub fn assign(&mut self, dest: &str, src: &str) -> Result<(), RuntimeError> {
        self.memory.assign(dest, src)
    }

    /// Prints a memory cell without number formatting. Deprecated in favour
    /// of `print($address)`.
    pub fn print_raw(&mut self, address: &str) -> Result<(), RuntimeError> {
        warn!(address, "printr is deprecated");
        writeln!(self.out,
                 "Printr is deprecated and unsupported. Please use print($<mem_adress>) instead.")?;

        let value = self.memory.read(address)?;
        writeln!(self.out, "{}", value.to_raw_string())?;
        Ok(())
    }

    /// Runs a shell command, flushing pending output first.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ShellCommandFailed`] if the command cannot be
    /// launched or exits unsuccessfully.
    pub fn exec(&mut self, command: &str) -> Result<(), RuntimeError> {
        self.out.flush()?;
        debug!(command, "running shell command");
        self.shell.run(command)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::interpreter::shell::ShellError;

    #[derive(Default, Clone)]
    struct RecordingShell {
        commands: Rc<RefCell<Vec<String>>>,
    }

    impl ShellRunner for RecordingShell {
        fn run(&mut self, command: &str) -> Result<(), ShellError> {
            self.commands.borrow_mut().push(command.to_string());
            if command.starts_with("fail") {
                return Err(ShellError::ExitStatus { command: command.to_string(),
                                                    code:    1, });
            }
            Ok(())
        }
    }

    fn session() -> Session<Vec<u8>> {
        Session::with_output(SessionOptions::default(), Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn store_then_print() {
        let mut session = session();
        session.run_source("t.fir", "str(x, 2^3)\nprint($x)").unwrap();
        assert_eq!(session.memory().get("x"), Some(Value::Integer(8)));
        assert_eq!(output(session), "8\n");
    }

    #[test]
    fn failed_store_leaves_memory_unchanged() {
        let mut session = session();
        session.run_source("t.fir", "str(x, 1)\nstr(x, 1 / 0)").unwrap();
        assert_eq!(session.memory().get("x"), Some(Value::Integer(1)));
        assert_eq!(output(session),
                   "Error on line 2 of 't.fir': Error evaluating expression: Division by zero\n");
    }

    #[test]
    fn recoverable_errors_report_line_numbers() {
        let mut session = session();
        session.run_source("t.fir", "push(1)\n\nfrobnicate\nprint(done)").unwrap();
        assert_eq!(output(session),
                   "Error on line 3 of 't.fir': Unknown command: frobnicate\ndone\n");
    }

    #[test]
    fn fatal_errors_stop_the_run() {
        let mut session = session();
        let error = session.run_source("t.fir", "print(before)\nadd\nprint(after)")
                           .unwrap_err();

        assert!(matches!(error.runtime_error(),
                         Some(RuntimeError::InsufficientOperands { .. })));
        assert_eq!(error.to_string(),
                   "Error on line 2 of 't.fir': Not enough operands for addition");
        assert_eq!(output(session), "before\n");
    }

    #[test]
    fn printr_prints_raw_value() {
        let mut session = session();
        session.memory.write("x", Value::Float(8.0));
        session.run_source("t.fir", "printr(x)\nprint($x)").unwrap();
        assert_eq!(output(session),
                   "Printr is deprecated and unsupported. Please use print($<mem_adress>) instead.\n8.0\n8\n");
    }

    #[test]
    fn exec_uses_the_shell_runner() {
        let shell = RecordingShell::default();
        let commands = Rc::clone(&shell.commands);
        let mut session = session().with_shell(shell);

        session.run_source("t.fir", "exec(echo hi)\nexec(fail now)").unwrap();

        assert_eq!(*commands.borrow(), vec!["echo hi".to_string(), "fail now".to_string()]);
        assert_eq!(output(session),
                   "Error on line 2 of 't.fir': Error executing command: Command 'fail now' returned non-zero exit status 1.\n");
    }

    #[test]
    fn missing_include_is_recoverable() {
        let options = SessionOptions { base_dir: Some(PathBuf::from("does-not-exist")),
                                       ..SessionOptions::default() };
        let mut session = Session::with_output(options, Vec::new());
        session.run_source("t.fir", "using nothing.fir\nprint(ok)").unwrap();

        let expected_path = Path::new("does-not-exist").join("nothing.fir");
        assert_eq!(output(session),
                   format!("Error on line 1 of 't.fir': File '{}' not found.\nok\n",
                           expected_path.display()));
    }
}
