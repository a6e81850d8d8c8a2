//! Mode selectors accepted by the two launchers.
use thiserror::Error;

/// Fixed endpoint of the ranking API when it runs on this machine.
pub const LOCAL_BACKEND_URL: &str = "http://127.0.0.1:8000/rank/enhanced";
/// Fixed endpoint of the ranking API deployed on Railway.
pub const PRODUCTION_BACKEND_URL: &str =
    "https://cv-ranker-be-production.up.railway.app/rank/enhanced";

/// Target used by `gradio` when no argument is given.
pub const DEFAULT_TARGET: &str = "local";

const LOCAL_NAMES: &[&str] = &["local", "development", "dev"];
const PRODUCTION_NAMES: &[&str] = &["production", "prod", "railway"];

/// Role token of the `local` launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleToken {
    /// Start the frontend after the operator confirms the backend runs elsewhere.
    Both,
    Backend,
    Frontend,
}

impl RoleToken {
    /// Map the mutually exclusive CLI flags onto a token; neither flag means `both`.
    pub fn from_flags(backend: bool, frontend: bool) -> Self {
        match (backend, frontend) {
            (true, _) => RoleToken::Backend,
            (false, true) => RoleToken::Frontend,
            (false, false) => RoleToken::Both,
        }
    }
}

/// Backend the `gradio` launcher points the UI at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Production,
    /// Any unrecognized token, kept verbatim.
    Custom(String),
}

/// Rejected `gradio` target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("target must be an environment name or a non-empty backend URL")]
pub struct EmptyTargetError;

impl Target {
    /// Environment names first; anything else non-empty is a custom URL.
    pub fn parse(token: &str) -> Result<Self, EmptyTargetError> {
        if token.is_empty() {
            return Err(EmptyTargetError);
        }
        if LOCAL_NAMES.contains(&token) {
            return Ok(Target::Local);
        }
        if PRODUCTION_NAMES.contains(&token) {
            return Ok(Target::Production);
        }
        Ok(Target::Custom(token.to_string()))
    }

    pub fn backend_url(&self) -> &str {
        match self {
            Target::Local => LOCAL_BACKEND_URL,
            Target::Production => PRODUCTION_BACKEND_URL,
            Target::Custom(url) => url,
        }
    }

    /// Custom targets are not validated; this only feeds a warning for likely typos.
    pub fn looks_like_http_url(&self) -> bool {
        let url = self.backend_url();
        url.starts_with("http://") || url.starts_with("https://")
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Target::Custom(_))
    }
}

/// Parsed launcher input, one variant per launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSelector {
    Role(RoleToken),
    Target(Target),
}

impl ModeSelector {
    /// Launcher name used in logs.
    pub const fn launcher(&self) -> &'static str {
        match self {
            ModeSelector::Role(_) => "local",
            ModeSelector::Target(_) => "gradio",
        }
    }
}
