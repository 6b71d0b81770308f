//! External command execution with captured output.

use crate::error::describe_exit;
use std::path::Path;
use std::process::{Command, Output};
use std::time::Instant;

/// Result of one external command. `succeeded` is the only failure channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutcome {
    pub fn from_output(output: &Output) -> Self {
        Self {
            succeeded: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        }
    }

    /// The command never ran (not on PATH, bad working directory, ...).
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: message.into(),
            exit_code: None,
        }
    }

    fn print(&self) {
        if !self.stdout.is_empty() {
            println!("{}", self.stdout);
        }
        if !self.succeeded {
            println!("Error running command: {}", describe_exit(self.exit_code));
            if !self.stderr.is_empty() {
                println!("Error output: {}", self.stderr);
            }
        }
    }
}

pub trait CommandRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> CommandOutcome;
}

/// Runs commands on the host, printing their output once they finish.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> CommandOutcome {
        println!("Running: {}", argv.join(" "));

        let Some((program, args)) = argv.split_first() else {
            return CommandOutcome::spawn_failure("empty command line");
        };

        let started = Instant::now();
        let outcome = match Command::new(program).args(args).current_dir(cwd).output() {
            Ok(output) => CommandOutcome::from_output(&output),
            Err(e) => CommandOutcome::spawn_failure(format!("Failed to run {program}: {e}")),
        };
        log::debug!("{program} finished in {:.1?}", started.elapsed());

        outcome.print();
        outcome
    }
}
