use std::path::Path;

use serde::Deserialize;

use crate::{
    launcher::resolve::ExternalCommand,
    lib::{errors::ConfigError, paths::is_nonempty_relative},
};

pub const DEFAULT_MANIFEST_FILE: &str = "requirements.txt";
pub const DEFAULT_VENV_DIRS: &[&str] = &["venv", ".venv"];
pub const DEFAULT_INSTALLER_COMMAND: &[&str] = &["pip", "install", "-r", "requirements.txt"];

/// Precondition file checked in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSection {
    pub file: String,
}

impl Default for ManifestSection {
    fn default() -> Self {
        Self {
            file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }
}

/// Dependency installation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSection {
    pub venv_dirs: Vec<String>,
    pub installer: ExternalCommand,
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            venv_dirs: DEFAULT_VENV_DIRS.iter().map(|dir| dir.to_string()).collect(),
            installer: ExternalCommand::from_static(DEFAULT_INSTALLER_COMMAND),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawManifestSection {
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawBootstrapSection {
    pub venv_dirs: Option<Vec<String>>,
    pub installer: Option<Vec<String>>,
}

pub fn parse_manifest_section(
    raw: Option<RawManifestSection>,
    path: &Path,
) -> Result<ManifestSection, ConfigError> {
    let file = raw
        .unwrap_or_default()
        .file
        .map(|file| file.trim().to_string())
        .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string());
    if !is_nonempty_relative(Path::new(&file)) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "manifest.file",
            message: "Provide a file name relative to the working directory".into(),
        });
    }
    Ok(ManifestSection { file })
}

pub fn parse_bootstrap_section(
    raw: Option<RawBootstrapSection>,
    path: &Path,
) -> Result<BootstrapSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = BootstrapSection::default();

    let venv_dirs = raw.venv_dirs.unwrap_or(defaults.venv_dirs);
    validate_venv_dirs(path, &venv_dirs)?;

    let installer = match raw.installer {
        None => defaults.installer,
        Some(argv) => {
            ExternalCommand::from_argv(&argv).ok_or_else(|| ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "bootstrap.installer",
                message: "Provide a non-empty argv whose first entry is the program".into(),
            })?
        }
    };

    Ok(BootstrapSection {
        venv_dirs,
        installer,
    })
}

fn validate_venv_dirs(path: &Path, venv_dirs: &[String]) -> Result<(), ConfigError> {
    if venv_dirs.is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "bootstrap.venv_dirs",
            message: "Specify at least one virtual environment directory".into(),
        });
    }
    for dir in venv_dirs {
        if dir.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "bootstrap.venv_dirs",
                message: "Directory names cannot be empty".into(),
            });
        }
    }
    Ok(())
}
