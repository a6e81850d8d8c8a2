use std::{
    fs,
    path::Path,
    process::{Command, Output, Stdio},
};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_cv-ranker-launch");

/// Variables the launcher reads or writes; cleared so the caller's shell cannot leak in.
const SCRUBBED_ENV: &[&str] = &[
    "CV_RANKER_LAUNCH_CONFIG",
    "RANKER_API",
    "GRADIO_SERVER_PORT",
    "API_URL",
    "QUESTION_API_URL",
    "FLOWISE_API_URL",
    "MAX_FILE_SIZE_MB",
    "ALLOWED_FILE_TYPES",
    "DATABASE_PATH",
    "MAX_SEARCH_HISTORY",
];

/// Project directory with a manifest and an existing virtual environment.
pub fn project_dir() -> TempDir {
    let temp = tempdir().expect("can create temporary directory");
    fs::write(temp.path().join("requirements.txt"), "gradio\nrequests\n")
        .expect("can write manifest");
    fs::create_dir(temp.path().join("venv")).expect("can create venv");
    temp
}

/// Project directory with nothing in it.
pub fn empty_dir() -> TempDir {
    tempdir().expect("can create temporary directory")
}

pub fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("launcher.toml"), content).expect("can write launcher.toml");
}

pub fn launcher(dir: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    command
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for key in SCRUBBED_ENV {
        command.env_remove(key);
    }
    command
}

pub fn run(command: &mut Command) -> Output {
    command.output().expect("launcher should start")
}

/// Run with `--dry-run` and parse the printed plan.
pub fn dry_run(dir: &Path, args: &[&str]) -> Value {
    let output = run(launcher(dir).arg("--dry-run").args(args));
    assert!(
        output.status.success(),
        "dry run should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("dry run prints a JSON plan")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
