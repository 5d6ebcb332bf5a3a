use std::{io, process::Command};

use thiserror::Error;

/// Errors raised while running a shell command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The shell could not be started.
    #[error("failed to launch shell: {0}")]
    Launch(#[from] io::Error),
    /// The command ran and exited with a non-zero status.
    #[error("Command '{command}' returned non-zero exit status {code}.")]
    ExitStatus {
        /// The command text.
        command: String,
        /// The exit code.
        code:    i32,
    },
    /// The command was terminated by a signal.
    #[error("Command '{command}' was terminated by a signal.")]
    Terminated {
        /// The command text.
        command: String,
    },
}

/// Runs `exec` commands on behalf of a session.
pub trait ShellRunner {
    /// Runs `command` to completion.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the command cannot be launched or exits
    /// unsuccessfully.
    fn run(&mut self, command: &str) -> Result<(), ShellError>;
}

/// Runs commands through the host shell, inheriting stdio.
///
/// Uses `sh -c` on Unix and `cmd /C` on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl ShellRunner for SystemShell {
    fn run(&mut self, command: &str) -> Result<(), ShellError> {
        let status = if cfg!(windows) {
            Command::new("cmd").args(["/C", command]).status()?
        } else {
            Command::new("sh").args(["-c", command]).status()?
        };

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ShellError::ExitStatus { command: command.to_string(),
                                                       code }),
            None => Err(ShellError::Terminated { command: command.to_string() }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_command() {
        assert!(SystemShell.run("true").is_ok());
    }

    #[test]
    fn failing_command_reports_exit_code() {
        let error = SystemShell.run("exit 3").unwrap_err();
        assert_eq!(error.to_string(), "Command 'exit 3' returned non-zero exit status 3.");
    }
}
