//! LaunchProfile and config path resolution.
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::launcher::{
    config::{CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH},
    resolve::ModeSelector,
};

/// Where the configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Default,
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub config_source: ConfigSource,
    pub mode: ModeSelector,
    pub working_dir: PathBuf,
    pub dry_run: bool,
    pub assume_yes: bool,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<(PathBuf, ConfigSource)> {
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(resolve_config_path_from(
        override_path,
        env::var_os(CONFIG_ENV_KEY),
        &cwd,
    ))
}

/// Resolve config path from explicit inputs (testable helper).
fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_value: Option<OsString>,
    cwd: &Path,
) -> (PathBuf, ConfigSource) {
    let (path, source) = match override_path {
        Some(path) => (path, ConfigSource::Cli),
        None => match env_value.filter(|value| !value.is_empty()) {
            Some(value) => (PathBuf::from(value), ConfigSource::Env),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default),
        },
    };

    if path.is_absolute() {
        return (path, source);
    }
    (cwd.join(path), source)
}
