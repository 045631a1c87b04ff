//! Running the project's configured developer commands.

use crate::error::{DevError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CommandOutput {
    /// `true` when the command exited with status 0
    pub success: bool,

    /// Exit code, or -1 if the process was terminated by a signal
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

/// Runs `command` followed by `extra` arguments in `cwd`.
///
/// # Errors
///
/// Returns [`DevError::EmptyCommand`] if `command` is empty and
/// [`DevError::Spawn`] if the program cannot be started. A command that runs
/// and fails is a successful call with `success == false`.
///
/// # Examples
///
/// ```no_run
/// use dev_server::commands::run;
/// use std::path::Path;
///
/// # async fn example() -> dev_server::Result<()> {
/// let command = vec!["cargo".to_string(), "test".to_string()];
/// let output = run("tests", &command, Vec::<String>::new(), Path::new(".")).await?;
/// println!("exit code {}", output.exit_code);
/// # Ok(())
/// # }
/// ```
pub async fn run<I, S>(
    purpose: &'static str,
    command: &[String],
    extra: I,
    cwd: &Path,
) -> Result<CommandOutput>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let (program, args) = command
        .split_first()
        .ok_or(DevError::EmptyCommand { purpose })?;

    let mut process = Command::new(program);
    process
        .args(args)
        .args(extra.into_iter().map(Into::into))
        .current_dir(cwd)
        .kill_on_drop(true);
    debug!(purpose, ?process, "running command");

    let output = process.output().await.map_err(|source| DevError::Spawn {
        program: program.clone(),
        source,
    })?;

    let exit_code = output.status.code().unwrap_or(-1);
    debug!(purpose, exit_code, "command finished");

    Ok(CommandOutput {
        success: output.status.success(),
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
