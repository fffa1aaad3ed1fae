//! nbstata kernel registration against the located Stata binary.
//!
//! The kernelspec install is delegated to nbstata itself, which reads the
//! Stata location from an environment variable on the child process.

use std::path::Path;

use log::debug;

use crate::command::{self, CommandOutcome};

/// Environment variable nbstata reads to find the Stata executable.
pub const STATA_PATH_ENV: &str = "STATA_PATH";

/// Diagnostic marker nbstata prints when the kernelspec is already
/// registered. Matched case-insensitively against the failure output.
const ALREADY_INSTALLED_MARKER: &str = "already exists";

/// Outcome of a kernel registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelInstall {
    /// The kernelspec was registered by this run.
    Installed,
    /// A previous run already registered it; nothing to do.
    AlreadyInstalled,
    /// Registration failed; carries the diagnostic.
    Failed(String),
}

impl KernelInstall {
    pub fn succeeded(&self) -> bool {
        matches!(
            self,
            KernelInstall::Installed | KernelInstall::AlreadyInstalled
        )
    }
}

/// Register the nbstata kernelspec, pointing it at `stata_path`.
pub async fn install_kernel(stata_path: &Path) -> KernelInstall {
    debug!("registering nbstata kernel for {:?}", stata_path);
    let outcome = command::run_with_env(
        "poetry",
        &["run", "python", "-m", "nbstata.install"],
        &[(STATA_PATH_ENV, stata_path.as_os_str())],
    )
    .await;
    classify(outcome)
}

/// A failure whose diagnostic mentions the marker means a prior run already
/// registered the kernelspec, so re-running setup stays idempotent.
fn classify(outcome: CommandOutcome) -> KernelInstall {
    match outcome {
        CommandOutcome::Success(_) => KernelInstall::Installed,
        other => {
            let diagnostic = other.output().to_string();
            if diagnostic.to_lowercase().contains(ALREADY_INSTALLED_MARKER) {
                KernelInstall::AlreadyInstalled
            } else {
                KernelInstall::Failed(diagnostic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        let result = classify(CommandOutcome::Success("Installed kernelspec".into()));
        assert_eq!(result, KernelInstall::Installed);
        assert!(result.succeeded());
    }

    #[test]
    fn test_classify_already_exists_is_idempotent_success() {
        let result = classify(CommandOutcome::Failed(
            "[InstallKernelSpec] Already exists: nbstata".into(),
        ));
        assert_eq!(result, KernelInstall::AlreadyInstalled);
        assert!(result.succeeded());
    }

    #[test]
    fn test_classify_other_failure() {
        let result = classify(CommandOutcome::Failed(
            "ModuleNotFoundError: No module named 'nbstata'".into(),
        ));
        assert!(matches!(result, KernelInstall::Failed(_)));
        assert!(!result.succeeded());
    }

    #[test]
    fn test_classify_missing_poetry_is_failure() {
        let result = classify(CommandOutcome::NotFound);
        assert_eq!(result, KernelInstall::Failed("command not found".into()));
    }
}
