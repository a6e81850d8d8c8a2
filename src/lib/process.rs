//! Shared helpers for building the hand-off command and replacing the process image.

use std::{convert::Infallible, path::Path, process::Command};

use crate::{launcher::resolve::LaunchPlan, lib::errors::LaunchError};

/// Build the external command: plan exports applied, sanitized keys removed, rest inherited.
pub fn build_command(plan: &LaunchPlan, working_dir: &Path) -> Command {
    let mut command = Command::new(&plan.command.program);
    command.args(&plan.command.args);
    command.current_dir(working_dir);
    for key in &plan.removals {
        command.env_remove(key);
    }
    for (key, value) in &plan.exports {
        command.env(key, value);
    }
    command
}

/// Replace the current process with `command`. Only returns on failure.
#[cfg(unix)]
pub fn hand_off(mut command: Command) -> Result<Infallible, LaunchError> {
    use std::os::unix::process::CommandExt;

    let source = command.exec();
    Err(LaunchError::Exec {
        program: command.get_program().to_string_lossy().into_owned(),
        source,
    })
}

/// Without `exec`, run the command to completion and exit with its status.
#[cfg(not(unix))]
pub fn hand_off(mut command: Command) -> Result<Infallible, LaunchError> {
    let status = command.status().map_err(|source| LaunchError::Exec {
        program: command.get_program().to_string_lossy().into_owned(),
        source,
    })?;
    std::process::exit(status.code().unwrap_or(1));
}
