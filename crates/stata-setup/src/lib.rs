//! Setup workflow for the Jupyter + Stata course environment.
//!
//! The workflow is a linear sequence over one [`SetupState`] record:
//!
//! 1. Python version floor, Poetry reachability, `poetry install`: the
//!    hard gates, where any failure aborts with a [`SetupError`].
//! 2. Poetry environment root, Stata discovery (with an interactive
//!    fallback), nbstata kernel registration, artifact generation: soft
//!    steps that log, degrade, and continue.
//!
//! Every external tool is driven through [`command`]; artifacts are
//! regenerated as whole-file overwrites, so re-running the setup on an
//! already-provisioned checkout is safe and converges to the same state.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use stata_discover::HostPlatform;

pub mod artifacts;
pub mod command;
pub mod kernel;
pub mod poetry;
pub mod python;
pub mod report;

use command::CommandOutcome;
use kernel::KernelInstall;
use report::SetupReport;

/// A hard-gate failure that aborts the workflow.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("no usable Python interpreter found on PATH")]
    PythonNotFound,

    #[error(
        "Python {found} detected, but Python {maj}.{min}+ is required",
        maj = python::MIN_PYTHON.0,
        min = python::MIN_PYTHON.1
    )]
    PythonTooOld { found: python::PythonVersion },

    #[error("Poetry is not installed")]
    PoetryMissing,

    #[error("dependency installation failed")]
    DependencyInstallFailed,
}

/// Values accumulated across the step sequence.
///
/// Once `stata_path` is set it is never re-detected, so every artifact
/// that embeds a Stata path embeds the same one.
#[derive(Debug)]
pub struct SetupState {
    pub platform: HostPlatform,
    pub stata_path: Option<PathBuf>,
    pub env_root: Option<PathBuf>,
}

/// Run the whole setup against `root` (the checkout being provisioned).
///
/// Prints progress as it goes and the quick-start report at the end.
/// Returns the report so callers can inspect what happened; an `Err` is
/// always a hard gate and maps to a non-zero process exit.
pub async fn run_setup(root: &Path) -> Result<SetupReport, SetupError> {
    let platform = HostPlatform::detect();

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("Jupyter-Stata Environment Setup");
    println!("OS: {}", platform);
    println!("{}", rule);

    check_python().await?;
    check_poetry(platform).await?;
    install_dependencies().await?;

    let mut state = SetupState {
        platform,
        stata_path: None,
        env_root: None,
    };

    state.env_root = poetry::environment_root().await;
    if state.env_root.is_none() {
        println!("⚠️  Could not resolve the Poetry environment path");
    }

    state.stata_path = locate_stata(platform);

    let mut kernel_installed = false;
    if let Some(stata) = state.stata_path.clone() {
        if let Err(err) = artifacts::write_stata_path_file(root, &stata) {
            warn!("could not persist Stata path: {:#}", err);
        }
        kernel_installed = install_kernel(&stata).await;
    }

    generate_artifacts(root, &state);

    let report = SetupReport {
        platform: state.platform,
        stata_path: state.stata_path,
        env_root: state.env_root,
        kernel_installed,
    };
    println!("{}", report.render());
    Ok(report)
}

/// Hard gate: the host Python must meet the version floor.
async fn check_python() -> Result<(), SetupError> {
    match python::detect_python().await {
        Some(version) if version.meets_floor() => {
            println!("✅ Python {} detected", version);
            Ok(())
        }
        Some(version) => {
            println!(
                "❌ Python {} detected. Python {}.{}+ is required!",
                version,
                python::MIN_PYTHON.0,
                python::MIN_PYTHON.1
            );
            Err(SetupError::PythonTooOld { found: version })
        }
        None => {
            println!("❌ No usable Python interpreter found on PATH");
            Err(SetupError::PythonNotFound)
        }
    }
}

/// Hard gate: Poetry must be callable. Prints install remediation when it
/// is not.
async fn check_poetry(platform: HostPlatform) -> Result<(), SetupError> {
    match poetry::check_poetry().await {
        Some(version) => {
            println!("✅ {}", version);
            Ok(())
        }
        None => {
            println!("❌ Poetry is not installed!");
            println!();
            println!("To install Poetry:");
            println!("  {}", poetry::install_hint(platform));
            println!();
            println!("Or visit: https://python-poetry.org/docs/#installation");
            Err(SetupError::PoetryMissing)
        }
    }
}

/// Hard gate: the declared dependency set must install.
async fn install_dependencies() -> Result<(), SetupError> {
    println!("\n📦 Installing dependencies...");
    match poetry::install_dependencies().await {
        CommandOutcome::Success(_) => {
            println!("✅ Dependencies installed successfully");
            Ok(())
        }
        outcome => {
            println!("❌ Failed to install dependencies");
            println!("{}", outcome.output());
            Err(SetupError::DependencyInstallFailed)
        }
    }
}

/// Locate Stata, falling back to a one-line interactive prompt.
///
/// Operator input is accepted only when the path exists on disk; anything
/// else (including a closed stdin) skips Stata configuration.
fn locate_stata(platform: HostPlatform) -> Option<PathBuf> {
    if let Some(path) = stata_discover::find_stata(platform) {
        println!("✅ Found Stata at: {}", path.display());
        return Some(path);
    }

    println!("\n⚠️  Stata installation not found automatically");
    println!("Please enter the full path to your Stata executable:");
    println!("  Example: {}", stata_discover::example_path(platform));

    match prompt_line("Stata path (or press Enter to skip): ") {
        Some(input) if !input.is_empty() && Path::new(&input).exists() => {
            Some(PathBuf::from(input))
        }
        _ => {
            println!("⚠️  Skipping Stata configuration");
            None
        }
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

/// Soft step: register the nbstata kernelspec for the located Stata.
async fn install_kernel(stata: &Path) -> bool {
    println!("\n🔧 Configuring nbstata with Stata at: {}", stata.display());
    match kernel::install_kernel(stata).await {
        KernelInstall::Installed | KernelInstall::AlreadyInstalled => {
            println!("✅ Stata kernel installed");
            true
        }
        KernelInstall::Failed(diagnostic) => {
            println!("⚠️  Could not install Stata kernel automatically");
            debug!("nbstata install diagnostics: {}", diagnostic);
            false
        }
    }
}

/// Soft step: write every artifact whose inputs are available. Each kind
/// is independent; one failure never blocks the others.
fn generate_artifacts(root: &Path, state: &SetupState) {
    match &state.env_root {
        Some(env_root) => {
            match artifacts::write_vscode_settings(
                root,
                state.platform,
                env_root,
                state.stata_path.as_deref(),
            ) {
                Ok(path) => println!("✅ Created VSCode configuration in {}", path.display()),
                Err(err) => println!("⚠️  Could not write VSCode configuration: {:#}", err),
            }
        }
        None => debug!("skipping VSCode settings, no environment root"),
    }

    match artifacts::write_jupyter_config(root) {
        Ok(_) => println!("✅ Created Jupyter Lab configuration"),
        Err(err) => println!("⚠️  Could not write Jupyter configuration: {:#}", err),
    }

    match artifacts::write_start_scripts(root) {
        Ok(()) => println!("✅ Created start scripts"),
        Err(err) => println!("⚠️  Could not write start scripts: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_messages_carry_remediation_detail() {
        let err = SetupError::PythonTooOld {
            found: python::PythonVersion {
                major: 3,
                minor: 8,
                patch: 10,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("3.8.10"));
        assert!(msg.contains("3.9+"));

        assert_eq!(
            SetupError::PoetryMissing.to_string(),
            "Poetry is not installed"
        );
    }
}
