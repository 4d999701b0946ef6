//! Command-line interface definitions for the `rdocker` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `rdocker` binary.
///
/// Only the tokens before the literal `--` separator are handed to clap; the
/// trailing remote command is joined separately by the invocation parser.
#[derive(Debug, Parser)]
#[command(
    name = "rdocker",
    about = "Mirror the current directory to a remote host over SSH and run a Docker command there",
    override_usage = "rdocker [-u <USER>] [-k <KEY_PATH>] <REMOTE_HOST> -- <COMMAND>..."
)]
pub struct Cli {
    /// SSH user for the remote host.
    #[arg(short = 'u', value_name = "USER")]
    pub user: Option<String>,
    /// Path to an SSH private key file; defaults to the local SSH identity
    /// and agent resolution when omitted.
    #[arg(short = 'k', value_name = "KEY_PATH")]
    pub key_path: Option<String>,
    /// Remote host receiving the mirrored directory. The last positional
    /// before `--` wins; earlier positionals are accepted and ignored.
    #[arg(value_name = "REMOTE_HOST")]
    pub hosts: Vec<String>,
    /// Docker or Docker Compose command executed on the remote host.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
