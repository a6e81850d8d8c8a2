use serde_json::{json, Value};

use crate::common::{dry_run, launcher, project_dir, run, write_config};

fn assert_fixed_exports(plan: &Value) {
    let exports = &plan["exports"];
    assert_eq!(exports["GRADIO_SERVER_NAME"], "0.0.0.0", "plan: {plan}");
    assert_eq!(exports["PORT"], "7860", "plan: {plan}");
    assert_eq!(exports["GRADIO_ANALYTICS_ENABLED"], "False", "plan: {plan}");
    assert_eq!(exports["GRADIO_SERVER_API_DOCS"], "false", "plan: {plan}");
}

#[test]
fn gradio_without_target_uses_local_backend() {
    let project = project_dir();
    let plan = dry_run(project.path(), &["gradio"]);

    assert_eq!(plan["role"], "frontend");
    assert_eq!(plan["backend_url"], "http://127.0.0.1:8000/rank/enhanced");
    assert_eq!(
        plan["exports"]["RANKER_API"],
        "http://127.0.0.1:8000/rank/enhanced"
    );
    assert_eq!(
        plan["command"],
        json!({ "program": "python", "args": ["gradio_app/app_with_progress.py"] })
    );
    assert_fixed_exports(&plan);
}

#[test]
fn gradio_environment_aliases_resolve_to_canned_urls() {
    let project = project_dir();
    for (target, expected) in [
        ("development", "http://127.0.0.1:8000/rank/enhanced"),
        ("dev", "http://127.0.0.1:8000/rank/enhanced"),
        (
            "production",
            "https://cv-ranker-be-production.up.railway.app/rank/enhanced",
        ),
        (
            "prod",
            "https://cv-ranker-be-production.up.railway.app/rank/enhanced",
        ),
        (
            "railway",
            "https://cv-ranker-be-production.up.railway.app/rank/enhanced",
        ),
    ] {
        let plan = dry_run(project.path(), &["gradio", target]);
        assert_eq!(plan["exports"]["RANKER_API"], expected, "target {target}");
    }
}

#[test]
fn gradio_custom_url_is_exported_verbatim() {
    let project = project_dir();
    let url = "https://my-custom.example.com/rank";
    let first = dry_run(project.path(), &["gradio", url]);
    let second = dry_run(project.path(), &["gradio", url]);

    assert_eq!(first["exports"]["RANKER_API"], url);
    assert_eq!(first["exports"], second["exports"]);
}

#[test]
fn local_backend_runs_api_without_ranker_api() {
    let project = project_dir();
    let plan = dry_run(project.path(), &["local", "--backend"]);

    assert_eq!(plan["role"], "backend");
    assert_eq!(plan["command"]["program"], "uvicorn");
    assert_eq!(plan["backend_url"], Value::Null);
    assert!(plan["exports"].get("RANKER_API").is_none(), "plan: {plan}");
    assert_fixed_exports(&plan);
}

#[test]
fn local_frontend_points_at_local_backend() {
    let project = project_dir();
    let plan = dry_run(project.path(), &["local", "--frontend"]);

    assert_eq!(plan["role"], "frontend");
    assert_eq!(
        plan["exports"]["RANKER_API"],
        "http://127.0.0.1:8000/rank/enhanced"
    );
    assert_eq!(plan["confirmation"], Value::Null);
}

#[test]
fn local_without_flags_plans_confirmation_without_prompting() {
    let project = project_dir();
    let plan = dry_run(project.path(), &["local"]);

    assert_eq!(plan["role"], "frontend");
    let instructions = plan["confirmation"]["instructions"]
        .as_array()
        .expect("both mode carries instructions");
    assert!(instructions
        .iter()
        .any(|line| line.as_str().unwrap_or_default().contains("local --backend")));
}

#[test]
fn deployment_variables_pass_through_and_placeholder_port_is_removed() {
    let project = project_dir();
    let output = run(launcher(project.path())
        .env("API_URL", "https://api.example.com")
        .env("QUESTION_API_URL", "https://questions.example.com")
        .env("GRADIO_SERVER_PORT", "$PORT")
        .args(["--dry-run", "gradio", "prod"]));
    assert!(output.status.success());
    let plan: Value = serde_json::from_slice(&output.stdout).expect("JSON plan");

    assert_eq!(plan["passthrough"]["API_URL"], "https://api.example.com");
    assert_eq!(
        plan["passthrough"]["QUESTION_API_URL"],
        "https://questions.example.com"
    );
    assert_eq!(plan["removals"], json!(["GRADIO_SERVER_PORT"]));
}

#[test]
fn launcher_toml_in_working_directory_is_picked_up() {
    let project = project_dir();
    write_config(
        project.path(),
        r#"
[frontend]
command = ["python", "gradio_app/app_gdpr_compliant.py"]
"#,
    );

    let plan = dry_run(project.path(), &["gradio"]);
    assert_eq!(
        plan["command"]["args"],
        json!(["gradio_app/app_gdpr_compliant.py"])
    );
}

#[test]
fn empty_target_is_rejected_by_argument_parsing() {
    let project = project_dir();
    let output = run(launcher(project.path()).args(["--dry-run", "gradio", ""]));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
