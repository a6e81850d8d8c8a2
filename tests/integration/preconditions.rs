use crate::common::{empty_dir, launcher, project_dir, run, stdout_of, write_config};

#[test]
fn missing_manifest_exits_one_without_launching() {
    let dir = empty_dir();
    write_config(
        dir.path(),
        r#"
[frontend]
command = ["sh", "-c", "touch launched"]
"#,
    );

    let output = run(launcher(dir.path()).args(["gradio"]));

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("launched").exists(), "frontend must not start");
    assert!(stdout_of(&output).is_empty(), "nothing is printed on stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("requirements.txt"), "stderr: {stderr}");
}

#[test]
fn missing_manifest_also_blocks_dry_run() {
    let dir = empty_dir();
    let output = run(launcher(dir.path()).args(["--dry-run", "local", "--backend"]));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn installer_runs_when_no_virtual_environment_exists() {
    let dir = empty_dir();
    std::fs::write(dir.path().join("requirements.txt"), "gradio\n").expect("can write manifest");
    write_config(
        dir.path(),
        r#"
[bootstrap]
installer = ["sh", "-c", "mkdir .venv"]
"#,
    );

    let output = run(launcher(dir.path()).args(["--dry-run", "gradio"]));

    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join(".venv").is_dir(), "installer should have run");
}

#[test]
fn installer_failure_propagates_its_exit_code() {
    let dir = empty_dir();
    std::fs::write(dir.path().join("requirements.txt"), "gradio\n").expect("can write manifest");
    write_config(
        dir.path(),
        r#"
[bootstrap]
installer = ["sh", "-c", "exit 3"]

[frontend]
command = ["sh", "-c", "touch launched"]
"#,
    );

    let output = run(launcher(dir.path()).args(["gradio"]));

    assert_eq!(output.status.code(), Some(3));
    assert!(!dir.path().join("launched").exists(), "frontend must not start");
}

#[test]
fn existing_virtual_environment_skips_installer() {
    let project = project_dir();
    write_config(
        project.path(),
        r#"
[bootstrap]
installer = ["sh", "-c", "touch installer-ran; exit 9"]
"#,
    );

    let output = run(launcher(project.path()).args(["--dry-run", "gradio"]));

    assert!(output.status.success(), "{output:?}");
    assert!(!project.path().join("installer-ran").exists());
}

#[test]
fn explicit_config_must_exist() {
    let project = project_dir();
    let output = run(launcher(project.path()).args([
        "--config",
        "missing-launcher.toml",
        "--dry-run",
        "gradio",
    ]));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_config_is_reported() {
    let project = project_dir();
    write_config(
        project.path(),
        r#"
[backend]
command = [""]
"#,
    );

    let output = run(launcher(project.path()).args(["--dry-run", "local", "--backend"]));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("backend.command"), "stderr: {stderr}");
}
