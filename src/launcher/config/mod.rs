//! Load and validate the optional launcher configuration file.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::{cli::ConfigSource, lib::errors::ConfigError};

pub mod bootstrap;
pub mod commands;
pub mod telemetry;

pub use bootstrap::{
    parse_bootstrap_section, parse_manifest_section, BootstrapSection, ManifestSection,
    RawBootstrapSection, RawManifestSection, DEFAULT_INSTALLER_COMMAND, DEFAULT_MANIFEST_FILE,
    DEFAULT_VENV_DIRS,
};
pub use commands::{
    parse_commands_section, CommandsSection, RawCommandSection, DEFAULT_BACKEND_COMMAND,
    DEFAULT_FRONTEND_COMMAND,
};

pub(crate) const CONFIG_ENV_KEY: &str = "CV_RANKER_LAUNCH_CONFIG";
pub(crate) const DEFAULT_CONFIG_PATH: &str = "launcher.toml";

/// Top-level configuration container.
#[derive(Debug, Clone, Default)]
pub struct LauncherConfig {
    pub manifest: ManifestSection,
    pub bootstrap: BootstrapSection,
    pub commands: CommandsSection,
    /// `None` when built-in defaults are in effect.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    manifest: Option<RawManifestSection>,
    bootstrap: Option<RawBootstrapSection>,
    backend: Option<RawCommandSection>,
    frontend: Option<RawCommandSection>,
}

impl LauncherConfig {
    /// Load `path`; a missing default file falls back to built-in defaults.
    pub fn load(path: PathBuf, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_config_source(&path, source);
        if source == ConfigSource::Default && !path.exists() {
            let config = Self::default();
            telemetry::log_defaults(&path);
            telemetry::log_loaded(&config);
            return Ok(config);
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "cv_ranker_launch::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).format(config::FileFormat::Toml));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "cv_ranker_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "cv_ranker_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "cv_ranker_launch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let manifest = parse_manifest_section(raw.manifest, &path)?;
        let bootstrap = parse_bootstrap_section(raw.bootstrap, &path)?;
        let commands = parse_commands_section(raw.backend, raw.frontend, &path)?;

        Ok(Self {
            manifest,
            bootstrap,
            commands,
            source_path: Some(path),
        })
    }
}
