//! Core sync types and the command runner abstraction.

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::sync::SyncError;

/// Remote endpoint for the SSH and rsync steps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteTarget {
    /// User used to authenticate via SSH.
    pub user: String,
    /// Hostname or address of the remote machine.
    pub host: String,
    /// Optional path to an SSH private key file. When absent, the local SSH
    /// agent and default identity resolution apply. Supports tilde
    /// expansion (`~/.ssh/id_ed25519`).
    pub identity_file: Option<String>,
}

impl RemoteTarget {
    /// Renders the `user@host` destination accepted by ssh and rsync.
    #[must_use]
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Result of running an external command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandOutput {
    /// Exit code reported by the process, if available.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns `true` when the exit code equals zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Output captured from a remote command executed over SSH.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteCommandOutput {
    /// Exit code reported by the remote command.
    pub exit_code: Option<i32>,
    /// Captured standard output stream.
    pub stdout: String,
    /// Captured standard error stream.
    pub stderr: String,
}

impl RemoteCommandOutput {
    /// Returns the captured stdout followed by the captured stderr as one
    /// string, for callers that print or report the output as a unit.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Abstraction over command execution to support fakes in tests.
pub trait CommandRunner {
    /// Runs `program` with the given arguments, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if the command cannot be started.
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError>;

    /// Runs `program`, forwarding its output to the local standard streams
    /// as it arrives while also capturing it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if the command cannot be started.
    fn run_streamed(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError>;
}

/// Real command runner that shells out to the host operating system.
#[derive(Clone, Debug, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|err| SyncError::Spawn {
                program: program.to_owned(),
                message: err.to_string(),
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_streamed(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, SyncError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| SyncError::Spawn {
                program: program.to_owned(),
                message: err.to_string(),
            })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_thread =
            thread::spawn(move || stdout_pipe.map_or_else(String::new, |pipe| tee(pipe, io::stdout())));
        let stderr_thread =
            thread::spawn(move || stderr_pipe.map_or_else(String::new, |pipe| tee(pipe, io::stderr())));

        let status = child.wait().map_err(|err| SyncError::Spawn {
            program: program.to_owned(),
            message: err.to_string(),
        })?;
        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();

        Ok(CommandOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Copies `reader` to `writer` as bytes arrive, returning the captured text.
fn tee(mut reader: impl Read, mut writer: impl Write) -> String {
    let mut captured = Vec::new();
    let mut buffer = [0_u8; 8192];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(count) => {
                let chunk = buffer.get(..count).unwrap_or_default();
                writer.write_all(chunk).ok();
                writer.flush().ok();
                captured.extend_from_slice(chunk);
            }
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&captured).into_owned()
}
