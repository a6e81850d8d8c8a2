//! Startup preconditions: manifest presence and dependency installation.
use std::{io, path::Path, process::Stdio};

use tokio::process::Command;
use tracing::{info, warn};

use crate::{
    launcher::{
        config::{BootstrapSection, ManifestSection},
        resolve::ExternalCommand,
    },
    lib::{errors::LaunchError, paths::first_existing_dir},
};

/// Result of running an installer to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded,
    Failed { exit_code: Option<i32> },
}

/// What `ensure_dependencies` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    AlreadyPresent { venv_dir: std::path::PathBuf },
    Installed,
}

/// Runs the dependency installer.
#[allow(async_fn_in_trait)]
pub trait DependencyInstaller {
    async fn install(&self, dir: &Path, command: &ExternalCommand) -> io::Result<InstallOutcome>;
}

/// Installer that spawns the configured command with inherited stdio.
pub struct SystemInstaller;

impl DependencyInstaller for SystemInstaller {
    async fn install(&self, dir: &Path, command: &ExternalCommand) -> io::Result<InstallOutcome> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        if status.success() {
            Ok(InstallOutcome::Succeeded)
        } else {
            Ok(InstallOutcome::Failed {
                exit_code: status.code(),
            })
        }
    }
}

/// Fail unless the manifest file exists in `dir`.
pub fn ensure_manifest(dir: &Path, manifest: &ManifestSection) -> Result<(), LaunchError> {
    if dir.join(&manifest.file).is_file() {
        return Ok(());
    }
    warn!(
        target: "cv_ranker_launch::bootstrap",
        dir = %dir.display(),
        manifest = %manifest.file,
        "Manifest file not found"
    );
    Err(LaunchError::ManifestMissing {
        file: manifest.file.clone(),
        dir: dir.to_path_buf(),
    })
}

/// Install dependencies unless a virtual environment directory already exists.
pub async fn ensure_dependencies<I: DependencyInstaller>(
    dir: &Path,
    bootstrap: &BootstrapSection,
    installer: &I,
) -> Result<DependencyStatus, LaunchError> {
    if let Some(venv_dir) = first_existing_dir(dir, &bootstrap.venv_dirs) {
        info!(
            target: "cv_ranker_launch::bootstrap",
            venv_dir = %venv_dir.display(),
            "Virtual environment found; skipping dependency installation"
        );
        return Ok(DependencyStatus::AlreadyPresent { venv_dir });
    }

    info!(
        target: "cv_ranker_launch::bootstrap",
        dir = %dir.display(),
        installer = %bootstrap.installer,
        "No virtual environment found; installing dependencies"
    );
    let outcome = installer
        .install(dir, &bootstrap.installer)
        .await
        .map_err(|source| LaunchError::InstallSpawn {
            program: bootstrap.installer.program.clone(),
            source,
        })?;

    match outcome {
        InstallOutcome::Succeeded => Ok(DependencyStatus::Installed),
        InstallOutcome::Failed { exit_code } => Err(LaunchError::InstallFailed {
            program: bootstrap.installer.program.clone(),
            exit_code,
        }),
    }
}
