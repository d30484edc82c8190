//! Deadline-bound invocation of host OS tools (`ping`, `arp`).

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::limits;
use crate::error::{Error, Result};

/// An external program with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SystemCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }

    /// Run to completion and report whether it exited successfully.
    ///
    /// The child is killed if `deadline` elapses first.
    pub async fn succeeds(&self, deadline: Duration) -> Result<bool> {
        let mut command = self.command();
        command.stdout(Stdio::null());

        let status = tokio::time::timeout(deadline, command.status())
            .await
            .map_err(|_| self.failed("timed out"))?
            .map_err(|e| self.io_failed(e))?;

        Ok(status.success())
    }

    /// Run to completion and capture stdout.
    ///
    /// A non-zero exit is an error; the output is lossily decoded so that
    /// localized tools with non-UTF-8 code pages still parse.
    pub async fn stdout(&self, deadline: Duration) -> Result<String> {
        let mut command = self.command();
        command.stdout(Stdio::piped());

        let output = tokio::time::timeout(deadline, command.output())
            .await
            .map_err(|_| self.failed("timed out"))?
            .map_err(|e| self.io_failed(e))?;

        if !output.status.success() {
            return Err(self.failed(&format!("exited with {}", output.status)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn io_failed(&self, error: std::io::Error) -> Error {
        if limits::is_exhausted(&error) {
            Error::ResourceExhausted(format!("{}: {}", self, error))
        } else {
            self.failed(&error.to_string())
        }
    }

    fn failed(&self, reason: &str) -> Error {
        Error::CommandFailed(format!("{}: {}", self, reason))
    }
}

impl std::fmt::Display for SystemCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
