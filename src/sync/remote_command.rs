//! Remote command wrapping.
//!
//! Remote commands must run inside the synced mirror directory, optionally
//! under `sudo`. This module centralises the string building so the
//! top-level sync module remains focused on orchestration.

use camino::Utf8Path;
use shell_escape::unix::escape;

use super::SyncConfig;

/// Builds the remote shell command: change into `remote_dir`, then run
/// `remote_command` under `sudo` when configured.
///
/// The directory component is shell-escaped; the user command is passed
/// through verbatim, so callers must sanitise untrusted input upstream.
pub(crate) fn build_remote_command(
    config: &SyncConfig,
    remote_dir: &Utf8Path,
    remote_command: &str,
) -> String {
    let escaped_dir = escape(remote_dir.as_str().into());
    if config.use_sudo {
        format!("cd {escaped_dir} && sudo {remote_command}")
    } else {
        format!("cd {escaped_dir} && {remote_command}")
    }
}

/// Builds the idempotent `mkdir -p` command used to provision `remote_dir`.
pub(crate) fn build_mkdir_command(remote_dir: &Utf8Path) -> String {
    let escaped_dir = escape(remote_dir.as_str().into());
    format!("mkdir -p {escaped_dir}")
}
