//! Generated configuration artifacts: editor settings, Jupyter server
//! config, launch scripts, and the persisted Stata path.
//!
//! Every artifact is a whole-file overwrite at a fixed path under the
//! project root, so re-running setup always regenerates a consistent set.

use std::collections::BTreeMap;
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use stata_discover::HostPlatform;

pub const VSCODE_DIR: &str = ".vscode";
pub const VSCODE_SETTINGS_FILE: &str = "settings.json";
pub const JUPYTER_CONFIG_FILE: &str = "jupyter_lab_config.py";
pub const STATA_PATH_FILE: &str = ".stata_path";
pub const START_SCRIPT_SH: &str = "start_jupyter.sh";
pub const START_SCRIPT_BAT: &str = "start_jupyter.bat";
pub const START_SCRIPT_PS1: &str = "start_jupyter.ps1";

/// Workspace globs VS Code should hide.
const FILES_EXCLUDE: &[&str] = &["**/__pycache__", "**/.ipynb_checkpoints", "**/*.pyc"];

/// Generated `.vscode/settings.json` contents.
///
/// The three `terminal.integrated.env.*` blocks are emitted together or not
/// at all, and always carry the same Stata path.
#[derive(Debug, Serialize)]
struct VsCodeSettings {
    #[serde(rename = "python.defaultInterpreterPath")]
    default_interpreter_path: String,
    #[serde(rename = "jupyter.jupyterServerType")]
    jupyter_server_type: &'static str,
    #[serde(rename = "notebook.kernelPicker.type")]
    kernel_picker_type: &'static str,
    #[serde(rename = "files.exclude")]
    files_exclude: BTreeMap<&'static str, bool>,
    #[serde(
        rename = "terminal.integrated.env.osx",
        skip_serializing_if = "Option::is_none"
    )]
    terminal_env_osx: Option<TerminalEnv>,
    #[serde(
        rename = "terminal.integrated.env.linux",
        skip_serializing_if = "Option::is_none"
    )]
    terminal_env_linux: Option<TerminalEnv>,
    #[serde(
        rename = "terminal.integrated.env.windows",
        skip_serializing_if = "Option::is_none"
    )]
    terminal_env_windows: Option<TerminalEnv>,
}

#[derive(Debug, Clone, Serialize)]
struct TerminalEnv {
    #[serde(rename = "STATA_PATH")]
    stata_path: String,
}

/// Interpreter location inside an isolated environment root.
fn interpreter_path(platform: HostPlatform, env_root: &Path) -> PathBuf {
    match platform {
        HostPlatform::Windows => env_root.join("Scripts").join("python.exe"),
        _ => env_root.join("bin").join("python"),
    }
}

/// Write `.vscode/settings.json` wired to the Poetry interpreter and, when
/// known, the Stata path for integrated terminals.
pub fn write_vscode_settings(
    root: &Path,
    platform: HostPlatform,
    env_root: &Path,
    stata_path: Option<&Path>,
) -> Result<PathBuf> {
    let vscode_dir = root.join(VSCODE_DIR);
    fs::create_dir_all(&vscode_dir)
        .with_context(|| format!("creating {}", vscode_dir.display()))?;

    let terminal_env = stata_path.map(|p| TerminalEnv {
        stata_path: p.display().to_string(),
    });

    let settings = VsCodeSettings {
        default_interpreter_path: interpreter_path(platform, env_root).display().to_string(),
        jupyter_server_type: "local",
        kernel_picker_type: "all",
        files_exclude: FILES_EXCLUDE.iter().map(|glob| (*glob, true)).collect(),
        terminal_env_osx: terminal_env.clone(),
        terminal_env_linux: terminal_env.clone(),
        terminal_env_windows: terminal_env,
    };

    let path = vscode_dir.join(VSCODE_SETTINGS_FILE);
    fs::write(&path, serde_json::to_string_pretty(&settings)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

const JUPYTER_CONFIG_TEMPLATE: &str = r#"c = get_config()  # noqa

# Jupyter Lab configuration
c.ServerApp.open_browser = False
c.ServerApp.port = 8888
c.ServerApp.ip = '127.0.0.1'

# Automatically set token (optional - remove for security)
# c.ServerApp.token = 'your-secret-token'

# Enable nbgrader extensions
c.ServerApp.jpserver_extensions = {
    'nbgrader': True
}
"#;

/// Write the Jupyter Lab server config. Fixed template, no inputs.
pub fn write_jupyter_config(root: &Path) -> Result<PathBuf> {
    let path = root.join(JUPYTER_CONFIG_FILE);
    fs::write(&path, JUPYTER_CONFIG_TEMPLATE)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

const START_SCRIPT_SH_TEMPLATE: &str = r#"#!/bin/bash
# Start Jupyter Lab server

echo "Starting Jupyter Lab server..."
echo "=================================================="

# Set Stata path if available
if [ -f .stata_path ]; then
    export STATA_PATH=$(cat .stata_path)
    echo "Stata path: $STATA_PATH"
fi

# Start server
poetry run jupyter lab --config=jupyter_lab_config.py

echo ""
echo "Server stopped."
"#;

const START_SCRIPT_BAT_TEMPLATE: &str = r#"@echo off
REM Start Jupyter Lab server

echo Starting Jupyter Lab server...
echo ==================================================

REM Set Stata path if available
if exist .stata_path (
    set /p STATA_PATH=<.stata_path
    echo Stata path: %STATA_PATH%
)

REM Start server
poetry run jupyter lab --config=jupyter_lab_config.py

echo.
echo Server stopped.
pause
"#;

const START_SCRIPT_PS1_TEMPLATE: &str = r#"# Start Jupyter Lab server

Write-Host "Starting Jupyter Lab server..." -ForegroundColor Green
Write-Host ("=" * 50)

# Set Stata path if available
if (Test-Path .stata_path) {
    $env:STATA_PATH = Get-Content .stata_path
    Write-Host "Stata path: $env:STATA_PATH"
}

# Start server
poetry run jupyter lab --config=jupyter_lab_config.py

Write-Host ""
Write-Host "Server stopped." -ForegroundColor Yellow
"#;

/// Write the three launch-script variants.
///
/// The shell script keeps POSIX newlines and gets the owner-execute bit;
/// the batch and PowerShell scripts get CRLF endings so Windows editors
/// and `cmd` handle them verbatim.
pub fn write_start_scripts(root: &Path) -> Result<()> {
    let sh_path = root.join(START_SCRIPT_SH);
    fs::write(&sh_path, START_SCRIPT_SH_TEMPLATE)
        .with_context(|| format!("writing {}", sh_path.display()))?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&sh_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&sh_path, perms)
            .with_context(|| format!("marking {} executable", sh_path.display()))?;
    }

    for (name, template) in [
        (START_SCRIPT_BAT, START_SCRIPT_BAT_TEMPLATE),
        (START_SCRIPT_PS1, START_SCRIPT_PS1_TEMPLATE),
    ] {
        let path = root.join(name);
        fs::write(&path, crlf(template))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// Windows scripts use CRLF line endings regardless of the host.
fn crlf(text: &str) -> String {
    text.replace('\n', "\r\n")
}

/// Persist the located Stata executable for the launch scripts to load on
/// their next run. Single line, no trailing newline.
pub fn write_stata_path_file(root: &Path, stata_path: &Path) -> Result<PathBuf> {
    let path = root.join(STATA_PATH_FILE);
    fs::write(&path, stata_path.display().to_string())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_value(temp: &TempDir, platform: HostPlatform, stata: Option<&Path>) -> serde_json::Value {
        let env_root = temp.path().join("venv");
        let path = write_vscode_settings(temp.path(), platform, &env_root, stata).unwrap();
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_vscode_settings_interpreter_follows_platform() {
        let temp = TempDir::new().unwrap();

        let linux = settings_value(&temp, HostPlatform::Linux, None);
        let interpreter = linux["python.defaultInterpreterPath"].as_str().unwrap();
        assert!(PathBuf::from(interpreter).ends_with("bin/python"));

        let windows = settings_value(&temp, HostPlatform::Windows, None);
        let interpreter = windows["python.defaultInterpreterPath"].as_str().unwrap();
        assert!(PathBuf::from(interpreter).ends_with("Scripts/python.exe"));
    }

    #[test]
    fn test_vscode_settings_embed_stata_under_all_terminal_keys() {
        let temp = TempDir::new().unwrap();
        let stata = Path::new("/opt/stata/stata-mp");
        let value = settings_value(&temp, HostPlatform::Linux, Some(stata));

        for os_key in ["osx", "linux", "windows"] {
            let block = &value[format!("terminal.integrated.env.{}", os_key).as_str()];
            assert_eq!(block["STATA_PATH"], "/opt/stata/stata-mp");
        }
    }

    #[test]
    fn test_vscode_settings_omit_terminal_keys_without_stata() {
        let temp = TempDir::new().unwrap();
        let value = settings_value(&temp, HostPlatform::MacOs, None);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert!(
            keys.iter().all(|k| !k.starts_with("terminal.integrated.env")),
            "unexpected terminal block in {:?}",
            keys
        );
    }

    #[test]
    fn test_vscode_settings_keep_standard_keys() {
        let temp = TempDir::new().unwrap();
        let value = settings_value(&temp, HostPlatform::Linux, None);
        assert_eq!(value["jupyter.jupyterServerType"], "local");
        assert_eq!(value["notebook.kernelPicker.type"], "all");
        assert_eq!(value["files.exclude"]["**/__pycache__"], true);
        assert_eq!(value["files.exclude"]["**/.ipynb_checkpoints"], true);
        assert_eq!(value["files.exclude"]["**/*.pyc"], true);
    }

    #[test]
    fn test_jupyter_config_fixed_content() {
        let temp = TempDir::new().unwrap();
        let path = write_jupyter_config(temp.path()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("c.ServerApp.open_browser = False"));
        assert!(content.contains("c.ServerApp.port = 8888"));
        assert!(content.contains("c.ServerApp.ip = '127.0.0.1'"));
        assert!(content.contains("'nbgrader': True"));
    }

    #[test]
    fn test_start_scripts_line_endings() {
        let temp = TempDir::new().unwrap();
        write_start_scripts(temp.path()).unwrap();

        let sh = fs::read_to_string(temp.path().join(START_SCRIPT_SH)).unwrap();
        assert!(sh.starts_with("#!/bin/bash"));
        assert!(!sh.contains('\r'));

        for name in [START_SCRIPT_BAT, START_SCRIPT_PS1] {
            let content = fs::read_to_string(temp.path().join(name)).unwrap();
            assert!(content.contains("\r\n"), "{} should be CRLF", name);
            assert!(
                !content.replace("\r\n", "").contains('\n'),
                "{} has a bare LF",
                name
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_script_is_owner_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write_start_scripts(temp.path()).unwrap();
        let mode = fs::metadata(temp.path().join(START_SCRIPT_SH))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o100, 0o100, "owner-execute bit missing: {:o}", mode);
    }

    #[test]
    fn test_scripts_invoke_server_with_generated_config() {
        let temp = TempDir::new().unwrap();
        write_start_scripts(temp.path()).unwrap();
        for name in [START_SCRIPT_SH, START_SCRIPT_BAT, START_SCRIPT_PS1] {
            let content = fs::read_to_string(temp.path().join(name)).unwrap();
            assert!(content.contains("poetry run jupyter lab --config=jupyter_lab_config.py"));
            assert!(content.contains(".stata_path"));
        }
    }

    #[test]
    fn test_stata_path_file_single_line() {
        let temp = TempDir::new().unwrap();
        let path =
            write_stata_path_file(temp.path(), Path::new("/opt/stata/stata-mp")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "/opt/stata/stata-mp");
    }

    #[test]
    fn test_regeneration_overwrites() {
        let temp = TempDir::new().unwrap();
        write_stata_path_file(temp.path(), Path::new("/opt/stata/stata-se")).unwrap();
        let path =
            write_stata_path_file(temp.path(), Path::new("/opt/stata/stata-mp")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "/opt/stata/stata-mp");
    }
}
