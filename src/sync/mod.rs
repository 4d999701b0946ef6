//! Workspace mirroring and remote command execution over the system `ssh`
//! and `rsync` binaries.
//!
//! The module shells out to external processes; it never reimplements the
//! SSH or rsync protocols. Host verification and authentication delegate to
//! the local SSH configuration, with an optional explicit identity file.

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};

mod config;
mod remote_command;
mod types;
mod util;

pub use config::{DEFAULT_REMOTE_TMP_DIR, SyncConfig, SyncConfigLoadError, SyncError};
pub use types::{
    CommandOutput, CommandRunner, ProcessCommandRunner, RemoteCommandOutput, RemoteTarget,
};
pub use util::expand_tilde;

/// Orchestrates remote directory provisioning, rsync mirroring, and remote
/// command execution.
#[derive(Clone, Debug)]
pub struct Syncer<R: CommandRunner> {
    config: SyncConfig,
    runner: R,
}

impl Syncer<ProcessCommandRunner> {
    /// Convenience constructor that wires the real process runner.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when validation fails.
    pub fn with_process_runner(config: SyncConfig) -> Result<Self, SyncError> {
        Self::new(config, ProcessCommandRunner)
    }
}

impl<R: CommandRunner> Syncer<R> {
    /// Creates a new syncer using the provided runner and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when configuration validation
    /// fails.
    pub fn new(config: SyncConfig, runner: R) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    /// Returns a reference to the underlying configuration.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Derives the remote mirror path for `project_name`.
    ///
    /// The path is `<remote_tmp_dir>/<project_name>` with no uniqueness
    /// guarantee beyond that derivation; two local directories sharing a
    /// base name collide on the remote side.
    #[must_use]
    pub fn remote_dir(&self, project_name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.config.remote_tmp_dir).join(project_name)
    }

    /// Ensures the remote mirror directory for `project_name` exists on the
    /// target host and returns its path.
    ///
    /// The operation is idempotent (`mkdir -p`). A trace line showing the
    /// exact SSH invocation is written before it runs.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] when the SSH client cannot be started
    /// and [`SyncError::CommandFailure`] when it exits non-zero.
    pub fn provision(
        &self,
        target: &RemoteTarget,
        project_name: &str,
    ) -> Result<Utf8PathBuf, SyncError> {
        let remote_dir = self.remote_dir(project_name);
        let command = remote_command::build_mkdir_command(&remote_dir);
        let args = self.build_ssh_args(target, &command);
        util::announce(&self.config.ssh_bin, &args);
        let output = self.runner.run(&self.config.ssh_bin, &args)?;
        if output.is_success() {
            return Ok(remote_dir);
        }
        Err(command_failure(&self.config.ssh_bin, &output))
    }

    /// Mirrors the contents of `source` (not the directory itself) into
    /// `remote_dir` on the target.
    ///
    /// `.git` is always excluded. When `mirror_delete` is set, remote files
    /// absent locally are deleted; mirroring is destructive by contract.
    /// Transfer output is forwarded to the local standard streams as it
    /// arrives rather than buffered.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingSource`] when the source directory is
    /// absent, [`SyncError::Spawn`] when rsync cannot be started, and
    /// [`SyncError::CommandFailure`] when it exits non-zero.
    pub fn sync(
        &self,
        source: &Utf8Path,
        target: &RemoteTarget,
        remote_dir: &Utf8Path,
    ) -> Result<(), SyncError> {
        let args = self.build_rsync_args(source, target, remote_dir)?;
        util::announce(&self.config.rsync_bin, &args);
        let output = self.runner.run_streamed(&self.config.rsync_bin, &args)?;
        if output.is_success() {
            return Ok(());
        }
        Err(command_failure(&self.config.rsync_bin, &output))
    }

    /// Executes `remote_command` in `remote_dir` over SSH, capturing output.
    ///
    /// The command runs as `cd <remote_dir> && sudo <remote_command>` (the
    /// `sudo` prefix is dropped when `use_sudo` is off). The user command is
    /// passed through verbatim; only the directory component is escaped.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] when the SSH client cannot be started
    /// and [`SyncError::RemoteCommandFailure`] carrying the captured
    /// combined output when the remote command does not exit zero.
    pub fn run_remote(
        &self,
        target: &RemoteTarget,
        remote_dir: &Utf8Path,
        remote_command: &str,
    ) -> Result<RemoteCommandOutput, SyncError> {
        let wrapped = remote_command::build_remote_command(&self.config, remote_dir, remote_command);
        let args = self.build_ssh_args(target, &wrapped);
        util::announce(&self.config.ssh_bin, &args);
        let output = self.runner.run(&self.config.ssh_bin, &args)?;
        if output.is_success() {
            return Ok(RemoteCommandOutput {
                exit_code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        let mut combined = output.stdout.clone();
        combined.push_str(&output.stderr);
        Err(SyncError::RemoteCommandFailure {
            status: output.code,
            status_text: status_text(output.code),
            output: combined,
        })
    }

    fn build_rsync_args(
        &self,
        source: &Utf8Path,
        target: &RemoteTarget,
        remote_dir: &Utf8Path,
    ) -> Result<Vec<OsString>, SyncError> {
        if !source.is_dir() {
            return Err(SyncError::MissingSource {
                path: source.to_path_buf(),
            });
        }

        let mut args = Vec::new();
        if let Some(ref identity_file) = target.identity_file {
            let expanded = util::expand_tilde(identity_file);
            args.push(OsString::from("-e"));
            args.push(OsString::from(format!("{} -i {expanded}", self.config.ssh_bin)));
        }
        args.push(OsString::from("-avz"));
        if self.config.mirror_delete {
            args.push(OsString::from("--delete"));
        }
        args.push(OsString::from("--exclude"));
        args.push(OsString::from(".git"));
        args.push(OsString::from(format!("{source}/")));
        args.push(OsString::from(format!(
            "{}:{remote_dir}",
            target.destination()
        )));

        Ok(args)
    }

    fn build_ssh_args(&self, target: &RemoteTarget, remote_command: &str) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(ref identity_file) = target.identity_file {
            let expanded = util::expand_tilde(identity_file);
            args.push(OsString::from("-i"));
            args.push(OsString::from(expanded));
        }
        args.push(OsString::from(target.destination()));
        args.push(OsString::from(remote_command));
        args
    }
}

fn status_text(code: Option<i32>) -> String {
    code.map_or_else(|| String::from("unknown"), |value| value.to_string())
}

fn command_failure(program: &str, output: &CommandOutput) -> SyncError {
    SyncError::CommandFailure {
        program: program.to_owned(),
        status: output.code,
        status_text: status_text(output.code),
        stderr: output.stderr.clone(),
    }
}

#[cfg(test)]
mod tests;
