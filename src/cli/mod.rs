//! CLI entrypoint module structure.

pub mod args;
pub mod profile;

pub use args::{GradioArgs, LaunchArgs, LaunchCommand, LocalArgs};
pub use profile::{resolve_config_path, ConfigSource, LaunchProfile};
