//! Launch configuration resolution: mode selector plus environment in, launch plan out.
mod mode;
mod plan;

pub use mode::{
    EmptyTargetError, ModeSelector, RoleToken, Target, DEFAULT_TARGET, LOCAL_BACKEND_URL,
    PRODUCTION_BACKEND_URL,
};
pub use plan::{
    capture_environment, Confirmation, EnvironmentMap, ExternalCommand, LaunchPlan, ProcessRole,
    BACKEND_PORT, FIXED_EXPORTS, GRADIO_SERVER_PORT_ENV, PASSTHROUGH_KEYS, RANKER_API_ENV,
    UI_BIND_ADDRESS, UI_PORT, UNEXPANDED_PORT_PLACEHOLDER,
};

use crate::launcher::config::CommandsSection;

/// Resolve a launch plan. Pure: equal inputs always give equal plans.
pub fn resolve(
    mode: &ModeSelector,
    defaults: &EnvironmentMap,
    commands: &CommandsSection,
) -> LaunchPlan {
    let (role, backend_url, confirmation) = match mode {
        ModeSelector::Role(RoleToken::Backend) => (ProcessRole::Backend, None, None),
        ModeSelector::Role(RoleToken::Frontend) => (
            ProcessRole::Frontend,
            Some(LOCAL_BACKEND_URL.to_string()),
            None,
        ),
        ModeSelector::Role(RoleToken::Both) => (
            ProcessRole::Frontend,
            Some(LOCAL_BACKEND_URL.to_string()),
            Some(Confirmation::start_backend_elsewhere(&commands.backend)),
        ),
        ModeSelector::Target(target) => (
            ProcessRole::Frontend,
            Some(target.backend_url().to_string()),
            None,
        ),
    };

    let mut exports = FIXED_EXPORTS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<std::collections::BTreeMap<_, _>>();
    if let Some(url) = &backend_url {
        exports.insert(RANKER_API_ENV.to_string(), url.clone());
    }

    let passthrough = PASSTHROUGH_KEYS
        .iter()
        .filter_map(|key| {
            defaults
                .get(*key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect();

    let command = match role {
        ProcessRole::Backend => commands.backend.clone(),
        ProcessRole::Frontend => commands.frontend.clone(),
    };

    LaunchPlan {
        role,
        backend_url,
        exports,
        removals: sanitized_keys(defaults),
        passthrough,
        command,
        confirmation,
    }
}

fn sanitized_keys(defaults: &EnvironmentMap) -> Vec<String> {
    match defaults.get(GRADIO_SERVER_PORT_ENV) {
        Some(value) if value.trim() == UNEXPANDED_PORT_PLACEHOLDER => {
            vec![GRADIO_SERVER_PORT_ENV.to_string()]
        }
        _ => Vec::new(),
    }
}
