//! Core library for the rdocker remote Docker execution tool.
//!
//! The crate mirrors the current project directory to a remote host over
//! SSH and executes a Docker or Docker Compose command on the synced copy.
//! Modules follow the pipeline: invocation parsing, marker-file validation,
//! remote provisioning, workspace mirroring, remote execution, and the
//! orchestration tying them together.

pub mod cli;
pub mod invocation;
pub mod run;
pub mod sync;
pub mod test_support;
pub mod validate;

pub use invocation::{Invocation, InvocationError};
pub use run::{RunError, RunOrchestrator};
pub use sync::{
    CommandOutput, CommandRunner, DEFAULT_REMOTE_TMP_DIR, ProcessCommandRunner,
    RemoteCommandOutput, RemoteTarget, SyncConfig, SyncConfigLoadError, SyncError, Syncer,
};
pub use validate::{CommandKind, ValidationError};
