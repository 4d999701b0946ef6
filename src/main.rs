//! Binary entry point for the rdocker CLI.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use camino::Utf8PathBuf;
use clap::CommandFactory;
use clap::error::ErrorKind;
use thiserror::Error;

use rdocker::cli::Cli;
use rdocker::{
    Invocation, InvocationError, RunError, RunOrchestrator, SyncConfig, Syncer,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
    #[error("sync error: {0}")]
    Sync(String),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("workspace path is not valid UTF-8: {0}")]
    Workspace(String),
}

fn main() {
    let args: Vec<OsString> = env::args_os().collect();
    process::exit(run(&args));
}

fn run(args: &[OsString]) -> i32 {
    match dispatch(args) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    }
}

fn dispatch(args: &[OsString]) -> Result<i32, CliError> {
    let invocation = match Invocation::parse(args) {
        Ok(parsed) => parsed,
        // An empty invocation prints usage and exits successfully; every
        // other failure exits 1.
        Err(InvocationError::Usage) => {
            write_usage(io::stderr());
            return Ok(0);
        }
        Err(InvocationError::Options(clap_err))
            if matches!(
                clap_err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            write!(io::stdout(), "{clap_err}").ok();
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };

    let config =
        SyncConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let syncer = Syncer::with_process_runner(config).map_err(|err| CliError::Sync(err.to_string()))?;

    let cwd = env::current_dir().map_err(|err| CliError::Config(err.to_string()))?;
    let source = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| CliError::Workspace(path.display().to_string()))?;

    let target = invocation.target();
    let orchestrator = RunOrchestrator::new(syncer);
    let output = orchestrator.execute(&source, &target, &invocation.remote_command)?;

    write!(io::stdout(), "{}", output.combined()).ok();
    Ok(0)
}

fn write_usage(mut target: impl Write) {
    writeln!(target, "{}", Cli::command().render_help()).ok();
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "Error: {err}").ok();
}
