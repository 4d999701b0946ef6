//! Orchestrates the end-to-end remote run pipeline.
//!
//! Validation, remote directory provisioning, workspace mirroring, and
//! remote execution run strictly in sequence; the first failing step
//! short-circuits the run. Already-performed side effects (directories
//! created, files synced) are left in place; an idempotent re-run corrects
//! any partial state.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::sync::{CommandRunner, RemoteCommandOutput, RemoteTarget, SyncError, Syncer};
use crate::validate::{self, ValidationError};

/// Errors surfaced while performing a remote run, tagged by pipeline step.
#[derive(Debug, Error)]
pub enum RunError {
    /// Raised when the workspace fails command preconditions.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Raised when the workspace path has no base name to mirror under.
    #[error("cannot derive a project name from workspace path {path}")]
    ProjectName {
        /// Workspace path missing a base name.
        path: Utf8PathBuf,
    },
    /// Raised when creating the remote directory fails.
    #[error("failed to create remote directory: {source}")]
    Provision {
        /// Underlying synchronisation error.
        #[source]
        source: SyncError,
    },
    /// Raised when mirroring the workspace fails.
    #[error("failed to sync workspace: {source}")]
    Sync {
        /// Underlying synchronisation error.
        #[source]
        source: SyncError,
    },
    /// Raised when the remote command fails to run or exits non-zero.
    #[error("failed to execute remote command: {source}")]
    Remote {
        /// Underlying synchronisation error.
        #[source]
        source: SyncError,
    },
}

/// Executes the remote run pipeline using the provided syncer.
#[derive(Clone, Debug)]
pub struct RunOrchestrator<R: CommandRunner> {
    syncer: Syncer<R>,
}

impl<R: CommandRunner> RunOrchestrator<R> {
    /// Creates a new orchestrator.
    #[must_use]
    pub const fn new(syncer: Syncer<R>) -> Self {
        Self { syncer }
    }

    /// Runs validate → provision → sync → execute and returns the captured
    /// remote output.
    ///
    /// The remote mirror lives under the base name of `source`, so two
    /// workspaces sharing a base name collide on the remote host.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] tagged with the step that failed; nothing
    /// downstream of a failed step executes and no cleanup is attempted.
    pub fn execute(
        &self,
        source: &Utf8Path,
        target: &RemoteTarget,
        remote_command: &str,
    ) -> Result<RemoteCommandOutput, RunError> {
        validate::ensure_markers(source, remote_command)?;
        let project_name = source.file_name().ok_or_else(|| RunError::ProjectName {
            path: source.to_path_buf(),
        })?;

        let remote_dir = self
            .syncer
            .provision(target, project_name)
            .map_err(|source_err| RunError::Provision { source: source_err })?;
        self.syncer
            .sync(source, target, &remote_dir)
            .map_err(|source_err| RunError::Sync { source: source_err })?;
        self.syncer
            .run_remote(target, &remote_dir, remote_command)
            .map_err(|source_err| RunError::Remote { source: source_err })
    }
}

#[cfg(test)]
mod tests;
