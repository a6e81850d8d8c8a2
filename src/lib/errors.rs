use std::{io, path::PathBuf, process::ExitCode};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Exit status used for every abort that has no more specific code.
pub const GENERIC_FAILURE_STATUS: u8 = 1;
/// Shell convention for "command not found" after a failed `exec`.
pub const EXEC_NOT_FOUND_STATUS: u8 = 127;
/// Shell convention for "found but not executable" after a failed `exec`.
pub const EXEC_NOT_RUNNABLE_STATUS: u8 = 126;

/// Errors that can occur while loading or validating the launcher configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read launcher configuration {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse launcher configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Launcher configuration {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Launcher configuration {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures that abort the bootstrap sequence before or during hand-off.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{file} not found in {dir}. Run the launcher from the project root.")]
    ManifestMissing { file: String, dir: PathBuf },
    #[error("Failed to start dependency installer `{program}`: {source}")]
    InstallSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Dependency installer `{program}` exited abnormally (exit={exit_code:?})")]
    InstallFailed {
        program: String,
        exit_code: Option<i32>,
    },
    #[error("Failed to read operator confirmation: {source}")]
    Confirm {
        #[source]
        source: io::Error,
    },
    #[error("Failed to execute `{program}`: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Raw process exit status for this failure.
    pub fn exit_status(&self) -> u8 {
        match self {
            LaunchError::InstallFailed {
                exit_code: Some(code),
                ..
            } => u8::try_from(*code)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(GENERIC_FAILURE_STATUS),
            LaunchError::Exec { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                EXEC_NOT_FOUND_STATUS
            }
            LaunchError::Exec { .. } => EXEC_NOT_RUNNABLE_STATUS,
            _ => GENERIC_FAILURE_STATUS,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
