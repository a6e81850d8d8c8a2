//! Entry point for the CV ranker launcher.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use cv_ranker_launch::{
    cli::LaunchArgs,
    launcher::{
        config::LauncherConfig,
        runtime::{self, RuntimeExit},
    },
    lib::telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchArgs::parse();
    let profile = args.build().map_err(RuntimeExit::from_error)?;
    let config = LauncherConfig::load(profile.config_path.clone(), profile.config_source)
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    runtime::run_launch(profile, config).await
}
