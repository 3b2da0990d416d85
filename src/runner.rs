//! External process execution.
//!
//! Every command the updater issues goes through a [`CommandRunner`], so the
//! flow can be exercised in tests without spawning `git` or `pip`.
//! Commands run synchronously with no timeout: a hung child hangs the run.

use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

use tracing::info;

use crate::error::{Result, UpdateError};

/// A program and its argument vector. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Executes external commands, turning non-zero exits into errors.
pub trait CommandRunner {
    /// Runs the command with inherited stdio and waits for it.
    ///
    /// Returns the exit status, which is always successful; a non-zero exit
    /// becomes [`UpdateError::Command`].
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus>;

    /// Runs the command and returns its captured stdout.
    fn output(&self, invocation: &Invocation) -> Result<String>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        info!("Calling {}", invocation);
        let status = invocation
            .to_command()
            .status()
            .map_err(|source| spawn_error(invocation, source))?;
        check_status(invocation, status)?;
        info!("Call finished fine!");
        Ok(status)
    }

    fn output(&self, invocation: &Invocation) -> Result<String> {
        info!("Calling {}", invocation);
        let output = invocation
            .to_command()
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| spawn_error(invocation, source))?;
        check_status(invocation, output.status)?;
        info!("Call finished fine!");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn spawn_error(invocation: &Invocation, source: std::io::Error) -> UpdateError {
    UpdateError::Spawn {
        command: invocation.to_string(),
        source,
    }
}

fn check_status(invocation: &Invocation, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(UpdateError::Command {
            command: invocation.to_string(),
            code: status.code(),
        })
    }
}
