//! Invocation parsing: splits the argument list at the literal `--`
//! separator into local flags, the remote host, and the trailing remote
//! command.
//!
//! The context produced here is immutable for the rest of the run; a fresh
//! parse happens on every invocation and no state survives it.

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

use crate::cli::Cli;
use crate::sync::RemoteTarget;

/// Literal token separating local options from the remote command.
pub const SEPARATOR: &str = "--";

/// Immutable context describing a single host/command invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    /// SSH user for the remote connection.
    pub user: String,
    /// Optional path to an SSH private key file.
    pub key_path: Option<String>,
    /// Remote host where the command ultimately executes.
    pub host: String,
    /// Remote command, joined from the tokens after the separator with
    /// single spaces and passed through unmodified.
    pub remote_command: String,
}

/// Errors raised while parsing the argument list.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Raised when no arguments were supplied at all. The binary prints
    /// usage and exits successfully in this case, unlike every other error.
    #[error("no arguments supplied")]
    Usage,
    /// Raised when the argument list contains no `--` token.
    #[error("separator '--' is required")]
    MissingSeparator,
    /// Raised when no positional argument precedes the separator.
    #[error("remote host is required")]
    MissingHost,
    /// Raised when the joined remote command is empty.
    #[error("remote command is required after '--'")]
    MissingCommand,
    /// Raised when the `-u` flag was not supplied.
    #[error("SSH user (-u) is required")]
    MissingUser,
    /// Raised when clap rejects the tokens before the separator.
    #[error(transparent)]
    Options(#[from] clap::Error),
}

impl Invocation {
    /// Parses the full argument list, program name included.
    ///
    /// Everything before the first `--` is parsed as flags plus positional
    /// host tokens; everything after it is joined with single spaces to form
    /// the remote command string. No escaping or re-quoting is applied to
    /// the joined command.
    ///
    /// # Errors
    ///
    /// Returns the [`InvocationError`] variant matching the first check that
    /// fails: separator, options, host, command, then user.
    pub fn parse(args: &[OsString]) -> Result<Self, InvocationError> {
        if args.len() <= 1 {
            return Err(InvocationError::Usage);
        }

        let separator = args
            .iter()
            .position(|arg| arg == SEPARATOR)
            .ok_or(InvocationError::MissingSeparator)?;
        let before = args.get(1..separator).unwrap_or_default();
        let after = args.get(separator.saturating_add(1)..).unwrap_or_default();

        let parsed = Cli::try_parse_from(
            std::iter::once(OsString::from("rdocker")).chain(before.iter().cloned()),
        )?;

        let host = parsed
            .hosts
            .last()
            .cloned()
            .ok_or(InvocationError::MissingHost)?;

        let remote_command = after
            .iter()
            .map(|token| token.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        if remote_command.is_empty() {
            return Err(InvocationError::MissingCommand);
        }

        let user = parsed.user.ok_or(InvocationError::MissingUser)?;

        Ok(Self {
            user,
            key_path: parsed.key_path,
            host,
            remote_command,
        })
    }

    /// Builds the remote endpoint for the SSH and rsync steps.
    #[must_use]
    pub fn target(&self) -> RemoteTarget {
        RemoteTarget {
            user: self.user.clone(),
            host: self.host.clone(),
            identity_file: self.key_path.clone(),
        }
    }
}
