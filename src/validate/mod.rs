//! Marker-file preconditions for remote Docker and Docker Compose commands.
//!
//! Classification is a literal prefix match on the command string, not a
//! parsed command grammar: `dockerxyz` takes the `docker` branch. Commands
//! with any other prefix pass without a check.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;

/// Marker files that allow `docker-compose` commands to run.
pub const COMPOSE_MARKERS: [&str; 2] = ["docker-compose.yml", "compose.yaml"];

/// Marker file that allows `docker` commands to run.
pub const DOCKER_MARKER: &str = "Dockerfile";

/// Classification of a remote command by its literal prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandKind {
    /// Starts with `docker-compose`.
    Compose,
    /// Starts with `docker` but not `docker-compose`.
    Docker,
    /// Any other prefix; no precondition applies.
    Other,
}

impl CommandKind {
    /// Classifies `command` by literal prefix.
    #[must_use]
    pub fn classify(command: &str) -> Self {
        if command.starts_with("docker-compose") {
            Self::Compose
        } else if command.starts_with("docker") {
            Self::Docker
        } else {
            Self::Other
        }
    }
}

/// Errors raised when the workspace fails a command precondition.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Raised when a `docker-compose` command runs without a compose file.
    #[error("docker-compose commands require a docker-compose.yml or compose.yaml in {path}")]
    MissingComposeFile {
        /// Workspace that was inspected.
        path: Utf8PathBuf,
    },
    /// Raised when a `docker` command runs without a Dockerfile.
    #[error("docker commands require a Dockerfile in {path}")]
    MissingDockerfile {
        /// Workspace that was inspected.
        path: Utf8PathBuf,
    },
    /// Raised when the workspace directory cannot be opened for inspection.
    #[error("cannot inspect workspace {path}: {message}")]
    Inspect {
        /// Workspace that could not be opened.
        path: Utf8PathBuf,
        /// Operating system error string.
        message: String,
    },
}

/// Checks the marker-file precondition for `command` in `workspace`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingComposeFile`] or
/// [`ValidationError::MissingDockerfile`] when the required marker is
/// absent, and [`ValidationError::Inspect`] when the workspace cannot be
/// opened. Commands outside the `docker`/`docker-compose` prefixes never
/// touch the filesystem.
pub fn ensure_markers(workspace: &Utf8Path, command: &str) -> Result<(), ValidationError> {
    match CommandKind::classify(command) {
        CommandKind::Other => Ok(()),
        CommandKind::Compose => {
            let dir = open_workspace(workspace)?;
            if COMPOSE_MARKERS.iter().any(|marker| dir.exists(marker)) {
                Ok(())
            } else {
                Err(ValidationError::MissingComposeFile {
                    path: workspace.to_path_buf(),
                })
            }
        }
        CommandKind::Docker => {
            let dir = open_workspace(workspace)?;
            if dir.exists(DOCKER_MARKER) {
                Ok(())
            } else {
                Err(ValidationError::MissingDockerfile {
                    path: workspace.to_path_buf(),
                })
            }
        }
    }
}

fn open_workspace(workspace: &Utf8Path) -> Result<Dir, ValidationError> {
    Dir::open_ambient_dir(workspace, ambient_authority()).map_err(|err| {
        ValidationError::Inspect {
            path: workspace.to_path_buf(),
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests;
