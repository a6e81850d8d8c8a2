use std::path::Path;

use tracing::{debug, info};

use super::{LauncherConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};
use crate::cli::ConfigSource;

pub fn log_config_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::Cli => info!(
            target: "cv_ranker_launch::config",
            path = %path.display(),
            "Loading launcher configuration from --config"
        ),
        ConfigSource::Env => info!(
            target: "cv_ranker_launch::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            "Loading launcher configuration using CV_RANKER_LAUNCH_CONFIG environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "cv_ranker_launch::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "CV_RANKER_LAUNCH_CONFIG not set; using default launcher.toml"
        ),
    }
}

pub fn log_defaults(path: &Path) {
    debug!(
        target: "cv_ranker_launch::config",
        path = %path.display(),
        "No launcher configuration file; using built-in defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    let source = config
        .source_path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<defaults>".to_string());
    info!(
        target: "cv_ranker_launch::config",
        path = %source,
        manifest = %config.manifest.file,
        venv_dirs = ?config.bootstrap.venv_dirs,
        installer = %config.bootstrap.installer,
        backend = %config.commands.backend,
        frontend = %config.commands.frontend,
        "Launcher configuration ready"
    );
}
