//! Synchronisation configuration structures and validation.
//!
//! This module defines [`SyncConfig`] for SSH and rsync settings, along with
//! associated error types. Configuration is loaded via `ortho-config` which
//! merges defaults, configuration files, and environment variables.

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default remote temp directory receiving workspace mirrors.
pub const DEFAULT_REMOTE_TMP_DIR: &str = "/tmp";

/// Synchronisation and SSH settings loaded via `ortho-config`.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "RDOCKER_SYNC",
    discovery(
        app_name = "rdocker",
        env_var = "RDOCKER_CONFIG_PATH",
        config_file_name = "rdocker.toml",
        dotfile_name = ".rdocker.toml",
        project_file_name = "rdocker.toml"
    )
)]
pub struct SyncConfig {
    /// Path to the `rsync` executable.
    #[ortho_config(default = "rsync".to_owned())]
    pub rsync_bin: String,
    /// Path to the `ssh` executable.
    #[ortho_config(default = "ssh".to_owned())]
    pub ssh_bin: String,
    /// Remote directory under which workspace mirrors are created. The
    /// mirror path is `<remote_tmp_dir>/<local directory base name>`.
    #[ortho_config(default = DEFAULT_REMOTE_TMP_DIR.to_owned())]
    pub remote_tmp_dir: String,
    /// Whether rsync deletes remote files that are absent locally. Mirroring
    /// is destructive when enabled; pre-existing remote files not present
    /// locally are removed.
    #[ortho_config(default = true)]
    pub mirror_delete: bool,
    /// Whether the remote command runs under `sudo`.
    #[ortho_config(default = true)]
    pub use_sudo: bool,
}

/// Errors raised when loading the sync configuration from layered sources.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SyncConfigLoadError {
    /// Indicates that parsing or merging configuration layers failed.
    #[error("sync configuration parsing failed: {0}")]
    Parse(String),
}

impl SyncConfig {
    /// Ensures configuration values are present after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when any required field is empty.
    pub fn validate(&self) -> Result<(), SyncError> {
        Self::require_value(&self.rsync_bin, "rsync_bin")?;
        Self::require_value(&self.ssh_bin, "ssh_bin")?;
        Self::require_value(&self.remote_tmp_dir, "remote_tmp_dir")?;
        Ok(())
    }

    /// Loads configuration using defaults, configuration files, and
    /// environment variables, ignoring CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SyncConfigLoadError::Parse`] when merging sources fails.
    pub fn load_without_cli_args() -> Result<Self, SyncConfigLoadError> {
        Self::load_from_iter([std::ffi::OsString::from("rdocker")])
            .map_err(|err| SyncConfigLoadError::Parse(err.to_string()))
    }

    /// Loads configuration using the default argument iterator.
    ///
    /// # Errors
    ///
    /// Returns [`SyncConfigLoadError::Parse`] when merging sources fails.
    pub fn load_from_sources() -> Result<Self, SyncConfigLoadError> {
        Self::load().map_err(|err| SyncConfigLoadError::Parse(err.to_string()))
    }

    fn require_value(value: &str, field: &str) -> Result<(), SyncError> {
        if value.trim().is_empty() {
            return Err(SyncError::InvalidConfig {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}

/// Errors surfaced while performing synchronisation or remote execution.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SyncError {
    /// Raised when configuration is missing required values. The error
    /// message includes guidance on how to provide the value via environment
    /// variable or configuration file.
    #[error("missing {field}: set RDOCKER_SYNC_{env_suffix} or add {field} to rdocker.toml", env_suffix = field.to_uppercase())]
    InvalidConfig {
        /// Configuration field that failed validation.
        field: String,
    },
    /// Raised when the source directory does not exist.
    #[error("sync source directory missing: {path}")]
    MissingSource {
        /// Path that was expected to be synchronised.
        path: Utf8PathBuf,
    },
    /// Raised when a command cannot be spawned.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Command that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when `ssh` or `rsync` completes with a non-zero exit code.
    #[error("{program} exited with status {status_text}: {stderr}")]
    CommandFailure {
        /// Command name used for the attempted operation.
        program: String,
        /// Exit status as reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the process.
        stderr: String,
    },
    /// Raised when the remote command exits non-zero. The captured combined
    /// output is carried so failures stay diagnosable.
    #[error("remote command exited with status {status_text}\noutput: {output}")]
    RemoteCommandFailure {
        /// Exit status as reported by the remote command.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Captured stdout followed by captured stderr.
        output: String,
    },
}
