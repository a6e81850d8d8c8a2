//! Launch plan produced by the resolver and consumed by the hand-off.
use std::{collections::BTreeMap, env, fmt};

use serde::Serialize;

/// Snapshot of the caller's environment.
pub type EnvironmentMap = BTreeMap<String, String>;

pub const RANKER_API_ENV: &str = "RANKER_API";
pub const GRADIO_SERVER_NAME_ENV: &str = "GRADIO_SERVER_NAME";
pub const PORT_ENV: &str = "PORT";
pub const GRADIO_ANALYTICS_ENABLED_ENV: &str = "GRADIO_ANALYTICS_ENABLED";
pub const GRADIO_SERVER_API_DOCS_ENV: &str = "GRADIO_SERVER_API_DOCS";
pub const GRADIO_SERVER_PORT_ENV: &str = "GRADIO_SERVER_PORT";

pub const UI_BIND_ADDRESS: &str = "0.0.0.0";
pub const UI_PORT: u16 = 7860;
pub const BACKEND_PORT: u16 = 8000;

/// Exported for every plan, whatever the role.
pub const FIXED_EXPORTS: &[(&str, &str)] = &[
    (GRADIO_SERVER_NAME_ENV, UI_BIND_ADDRESS),
    (PORT_ENV, "7860"),
    (GRADIO_ANALYTICS_ENABLED_ENV, "False"),
    (GRADIO_SERVER_API_DOCS_ENV, "false"),
];

/// Variables owned by the deployment; reported when present, inherited untouched.
pub const PASSTHROUGH_KEYS: &[&str] = &[
    "API_URL",
    "QUESTION_API_URL",
    "FLOWISE_API_URL",
    "MAX_FILE_SIZE_MB",
    "ALLOWED_FILE_TYPES",
    "DATABASE_PATH",
    "MAX_SEARCH_HISTORY",
];

/// Unexpanded placeholder some platforms leave behind in port variables.
pub const UNEXPANDED_PORT_PLACEHOLDER: &str = "$PORT";

/// Read the current process environment, skipping entries that are not valid UTF-8.
pub fn capture_environment() -> EnvironmentMap {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// External process the launcher hands off to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessRole {
    Backend,
    Frontend,
}

impl ProcessRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProcessRole::Backend => "backend",
            ProcessRole::Frontend => "frontend",
        }
    }
}

/// Program plus arguments, executed once and never supervised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    /// Split an argv vector; `None` when it is empty or the program is blank.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn from_static(argv: &[&str]) -> Self {
        let argv = argv.iter().map(|arg| arg.to_string()).collect::<Vec<_>>();
        Self {
            program: argv.first().cloned().unwrap_or_default(),
            args: argv.into_iter().skip(1).collect(),
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Operator gate shown before starting the frontend in `both` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub instructions: Vec<String>,
}

impl Confirmation {
    pub fn start_backend_elsewhere(backend: &ExternalCommand) -> Self {
        Self {
            instructions: vec![
                "The ranking API is not started by this session.".to_string(),
                "Start it in another terminal with:".to_string(),
                "  cv-ranker-launch local --backend".to_string(),
                format!("(runs `{backend}` on port {BACKEND_PORT})"),
            ],
        }
    }
}

/// Fully resolved launch: environment changes plus the command to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub role: ProcessRole,
    /// Only set for the frontend role.
    pub backend_url: Option<String>,
    pub exports: BTreeMap<String, String>,
    pub removals: Vec<String>,
    pub passthrough: BTreeMap<String, String>,
    pub command: ExternalCommand,
    pub confirmation: Option<Confirmation>,
}

impl LaunchPlan {
    pub fn exported_keys(&self) -> Vec<&str> {
        self.exports.keys().map(String::as_str).collect()
    }

    pub fn passthrough_keys(&self) -> Vec<&str> {
        self.passthrough.keys().map(String::as_str).collect()
    }
}
