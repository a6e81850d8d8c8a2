//! CLI argument definitions and `LaunchProfile` construction.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use super::{resolve_config_path, LaunchProfile};
use crate::launcher::resolve::{ModeSelector, RoleToken, Target, DEFAULT_TARGET};

/// Launcher entry points.
#[derive(Debug, Clone, Subcommand)]
pub enum LaunchCommand {
    /// Start the ranking API or the Gradio UI on this machine.
    #[command(
        about = "Start the ranking API or the Gradio UI on this machine",
        long_about = "Start the ranking API or the Gradio UI on this machine.\n\nWithout a flag the UI is started after you confirm that the API runs in another terminal.",
        after_help = "Hint: run `cv-ranker-launch local --backend` in one terminal and `cv-ranker-launch local --frontend` in another."
    )]
    Local(LocalArgs),
    /// Start the Gradio UI against a named environment or a custom backend URL.
    #[command(
        about = "Start the Gradio UI against a named environment or a custom backend URL",
        after_help = "Targets: local | development | dev, production | prod | railway, or any URL."
    )]
    Gradio(GradioArgs),
}

/// Arguments for `local`.
#[derive(Debug, Clone, Args)]
pub struct LocalArgs {
    /// Start only the ranking API (port 8000).
    #[arg(long, default_value_t = false, conflicts_with = "frontend")]
    pub backend: bool,
    /// Start only the Gradio UI against the local API.
    #[arg(long, default_value_t = false)]
    pub frontend: bool,
}

/// Arguments for `gradio`.
#[derive(Debug, Clone, Args)]
pub struct GradioArgs {
    /// Environment name or backend URL (unrecognized values are used as the URL verbatim).
    #[arg(value_name = "TARGET", default_value = DEFAULT_TARGET, value_parser = parse_target)]
    pub target: Target,
}

fn parse_target(raw: &str) -> Result<Target, String> {
    Target::parse(raw).map_err(|err| err.to_string())
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cv-ranker-launch",
    author,
    version,
    about = "Launcher for the CV ranker API and Gradio UI",
    long_about = None
)]
pub struct LaunchArgs {
    /// Path to launcher.toml (overrides CV_RANKER_LAUNCH_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    /// Print the resolved launch plan as JSON instead of starting anything.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
    /// Skip the confirmation prompt of `local` without a role flag.
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: LaunchCommand,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let (config_path, config_source) = resolve_config_path(self.config_override)?;
        let working_dir = env::current_dir().context("failed to obtain current directory")?;

        Ok(LaunchProfile {
            config_path,
            config_source,
            mode: self.command.into_mode(),
            working_dir,
            dry_run: self.dry_run,
            assume_yes: self.yes,
        })
    }
}

impl LaunchCommand {
    pub fn into_mode(self) -> ModeSelector {
        match self {
            LaunchCommand::Local(args) => {
                ModeSelector::Role(RoleToken::from_flags(args.backend, args.frontend))
            }
            LaunchCommand::Gradio(args) => ModeSelector::Target(args.target),
        }
    }
}
