//! Poetry invocation: the dependency install and environment queries.
//!
//! Poetry owns the isolated environment this setup provisions. It is
//! invoked strictly through its CLI; nothing here parses lockfiles or
//! touches the environment directly.

use std::path::PathBuf;

use log::debug;
use stata_discover::HostPlatform;

use crate::command::{self, CommandOutcome};

/// Check that Poetry is callable, returning its reported version line.
pub async fn check_poetry() -> Option<String> {
    match command::run_line("poetry --version").await {
        CommandOutcome::Success(out) => Some(out),
        outcome => {
            debug!("poetry probe failed: {}", outcome.output());
            None
        }
    }
}

/// Install the declared dependency set into Poetry's managed environment.
pub async fn install_dependencies() -> CommandOutcome {
    command::run_line("poetry install").await
}

/// Resolve the root directory of Poetry's managed environment.
///
/// Absence is not an error: callers skip the artifacts that need it.
pub async fn environment_root() -> Option<PathBuf> {
    match command::run_line("poetry env info --path").await {
        CommandOutcome::Success(out) if !out.trim().is_empty() => {
            Some(PathBuf::from(out.trim()))
        }
        outcome => {
            debug!("poetry env info failed: {}", outcome.output());
            None
        }
    }
}

/// Installation one-liner shown when Poetry is missing.
pub fn install_hint(platform: HostPlatform) -> &'static str {
    match platform {
        HostPlatform::Windows => {
            "(Invoke-WebRequest -Uri https://install.python-poetry.org -UseBasicParsing).Content | python -"
        }
        _ => "curl -sSL https://install.python-poetry.org | python3 -",
    }
}
