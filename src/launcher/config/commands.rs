use std::path::Path;

use serde::Deserialize;

use crate::{launcher::resolve::ExternalCommand, lib::errors::ConfigError};

pub const DEFAULT_BACKEND_COMMAND: &[&str] = &[
    "uvicorn",
    "api.main:app",
    "--host",
    "0.0.0.0",
    "--port",
    "8000",
];
pub const DEFAULT_FRONTEND_COMMAND: &[&str] = &["python", "gradio_app/app_with_progress.py"];

/// Commands for the two external roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandsSection {
    pub backend: ExternalCommand,
    pub frontend: ExternalCommand,
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self {
            backend: ExternalCommand::from_static(DEFAULT_BACKEND_COMMAND),
            frontend: ExternalCommand::from_static(DEFAULT_FRONTEND_COMMAND),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCommandSection {
    pub command: Option<Vec<String>>,
}

pub fn parse_commands_section(
    backend: Option<RawCommandSection>,
    frontend: Option<RawCommandSection>,
    path: &Path,
) -> Result<CommandsSection, ConfigError> {
    let defaults = CommandsSection::default();
    Ok(CommandsSection {
        backend: parse_command(backend, defaults.backend, "backend.command", path)?,
        frontend: parse_command(frontend, defaults.frontend, "frontend.command", path)?,
    })
}

fn parse_command(
    raw: Option<RawCommandSection>,
    default: ExternalCommand,
    field: &'static str,
    path: &Path,
) -> Result<ExternalCommand, ConfigError> {
    match raw.unwrap_or_default().command {
        None => Ok(default),
        Some(argv) => ExternalCommand::from_argv(&argv).ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "Provide a non-empty argv whose first entry is the program".into(),
        }),
    }
}
