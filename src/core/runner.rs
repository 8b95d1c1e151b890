//! External command execution

use crate::error::{PcacheError, Result};
use std::process::{Command, Stdio};

/// Runs a fully assembled command line and returns its standard output
pub trait CommandRunner {
    /// `argv[0]` is the program; the rest are its arguments.
    /// Fails unless the process starts and exits with status zero.
    fn run(&self, argv: &[String]) -> Result<String>;
}

/// Spawns real processes and waits for them
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, argv: &[String]) -> Result<String> {
        let command_line = argv.join(" ");
        let (program, args) = argv.split_first().ok_or_else(|| PcacheError::Execution {
            command: command_line.clone(),
            reason: "empty command".to_string(),
        })?;

        // stderr stays attached to the terminal so tool diagnostics are visible
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| PcacheError::Execution {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PcacheError::Execution {
                command: command_line,
                reason: output.status.to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
