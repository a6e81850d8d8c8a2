use std::process::ExitCode;

use anyhow::Error;
use tracing::warn;

use crate::{
    cli::LaunchProfile,
    launcher::{
        bootstrap::{self, DependencyInstaller, SystemInstaller},
        config::LauncherConfig,
        resolve::{
            capture_environment, resolve, EnvironmentMap, LaunchPlan, ModeSelector, ProcessRole,
            BACKEND_PORT, UI_BIND_ADDRESS, UI_PORT,
        },
        runtime::confirm,
    },
    lib::{
        errors::LaunchError,
        process,
        telemetry::{self, LaunchPlanTelemetry, LaunchSpan},
    },
};

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn from_launch(err: LaunchError) -> Self {
        Self {
            message: err.to_string(),
            exit_code: err.exit_code(),
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Run the bootstrap sequence and hand off to the external process.
///
/// Returns `Ok(())` only for dry runs; a real launch either replaces this
/// process or fails.
pub async fn run_launch(profile: LaunchProfile, config: LauncherConfig) -> Result<(), RuntimeExit> {
    let span = LaunchSpan::start(profile.mode.launcher());
    let plan = match prepare(&profile, &config, &SystemInstaller, &capture_environment()).await {
        Ok(plan) => plan,
        Err(err) => {
            span.finish("aborted", Some(err.exit_status()));
            return Err(RuntimeExit::from_launch(err));
        }
    };

    if profile.dry_run {
        let rendered = serde_json::to_string_pretty(&plan).map_err(RuntimeExit::from_error)?;
        println!("{rendered}");
        span.finish("planned", None);
        return Ok(());
    }

    if let Some(confirmation) = plan.confirmation.as_ref().filter(|_| !profile.assume_yes) {
        let mut stdout = tokio::io::stdout();
        let confirmed = match confirm::operator_input() {
            Ok(input) => confirm::await_operator(confirmation, input, &mut stdout).await,
            Err(source) => Err(LaunchError::Confirm { source }),
        };
        if let Err(err) = confirmed {
            span.finish("aborted", Some(err.exit_status()));
            return Err(RuntimeExit::from_launch(err));
        }
    }

    print_banner(&plan);
    span.handing_off();
    match process::hand_off(process::build_command(&plan, &profile.working_dir)) {
        Ok(never) => match never {},
        Err(err) => {
            span.finish("aborted", Some(err.exit_status()));
            Err(RuntimeExit::from_launch(err))
        }
    }
}

/// Everything up to the hand-off: preconditions, dependencies, resolution.
pub async fn prepare<I: DependencyInstaller>(
    profile: &LaunchProfile,
    config: &LauncherConfig,
    installer: &I,
    defaults: &EnvironmentMap,
) -> Result<LaunchPlan, LaunchError> {
    bootstrap::ensure_manifest(&profile.working_dir, &config.manifest)?;
    bootstrap::ensure_dependencies(&profile.working_dir, &config.bootstrap, installer).await?;

    if let ModeSelector::Target(target) = &profile.mode {
        if target.is_custom() && !target.looks_like_http_url() {
            warn!(
                target: "cv_ranker_launch::runtime",
                backend_url = target.backend_url(),
                "Target is not a known environment name and does not look like an HTTP URL; using it verbatim"
            );
        }
    }

    let plan = resolve(&profile.mode, defaults, &config.commands);
    let command = plan.command.to_string();
    telemetry::emit_launch_plan(&LaunchPlanTelemetry {
        role: plan.role.as_str(),
        backend_url: plan.backend_url.as_deref(),
        command: &command,
        exported: &plan.exported_keys(),
        removed: &plan.removals,
        passthrough: &plan.passthrough_keys(),
        dry_run: profile.dry_run,
    });
    Ok(plan)
}

fn print_banner(plan: &LaunchPlan) {
    match plan.role {
        ProcessRole::Backend => {
            println!("Starting ranking API on http://{UI_BIND_ADDRESS}:{BACKEND_PORT}");
        }
        ProcessRole::Frontend => {
            println!("Starting Gradio UI on http://{UI_BIND_ADDRESS}:{UI_PORT}");
            if let Some(url) = &plan.backend_url {
                println!("Backend URL: {url}");
            }
        }
    }
    println!("Running: {}", plan.command);
}
