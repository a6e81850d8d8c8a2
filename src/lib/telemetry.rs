//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format operator logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and outcome of one bootstrap sequence.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    launch_id: Uuid,
}

impl LaunchSpan {
    /// Start a launch span.
    pub fn start(launcher: &'static str) -> Self {
        let launch_id = Uuid::new_v4();
        let span = info_span!(
            target: "cv_ranker_launch::runtime",
            "launch",
            %launch_id,
            launcher
        );
        Self {
            span,
            started_at: Instant::now(),
            launch_id,
        }
    }

    /// Record that the process image is about to be replaced.
    ///
    /// A successful `exec` never returns, so this is the last line a launch logs.
    pub fn handing_off(&self) {
        let _entered = self.span.enter();
        info!(
            target: "cv_ranker_launch::runtime",
            launch_id = %self.launch_id,
            status = "handing_off",
            elapsed_ms = self.started_at.elapsed().as_millis(),
            "Replacing launcher with external process"
        );
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, status: &'static str, exit_code: Option<u8>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "cv_ranker_launch::runtime",
            launch_id = %self.launch_id,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Finished launch sequence"
        );
    }
}

/// Payload for logging a resolved launch plan as structured telemetry.
#[derive(Debug, Serialize)]
pub struct LaunchPlanTelemetry<'a> {
    pub role: &'a str,
    pub backend_url: Option<&'a str>,
    pub command: &'a str,
    pub exported: &'a [&'a str],
    pub removed: &'a [String],
    pub passthrough: &'a [&'a str],
    pub dry_run: bool,
}

/// Emit the resolved plan to `tracing`. Values of pass-through variables are never logged.
pub fn emit_launch_plan(telemetry: &LaunchPlanTelemetry<'_>) {
    info!(
        target: "cv_ranker_launch::runtime",
        role = telemetry.role,
        backend_url = telemetry.backend_url.unwrap_or(""),
        command = telemetry.command,
        exported = ?telemetry.exported,
        removed = ?telemetry.removed,
        passthrough = ?telemetry.passthrough,
        dry_run = telemetry.dry_run,
        "Resolved launch plan"
    );
}
