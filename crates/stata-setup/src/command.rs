//! External process invocation with captured output.
//!
//! Every step that shells out goes through this module. Failure never
//! propagates as an error: callers always get a [`CommandOutcome`] and
//! decide locally whether the step is fatal.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Stdio;

use log::debug;
use tokio::process::Command;

/// Result of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status zero; carries trimmed stdout.
    Success(String),
    /// The executable is not on the search path.
    NotFound,
    /// Non-zero exit; carries trimmed stderr.
    Failed(String),
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, CommandOutcome::Success(_))
    }

    /// Captured text for display: stdout on success, the diagnostic
    /// otherwise.
    pub fn output(&self) -> &str {
        match self {
            CommandOutcome::Success(out) | CommandOutcome::Failed(out) => out,
            CommandOutcome::NotFound => "command not found",
        }
    }
}

/// Run a program with explicit arguments.
pub async fn run<S: AsRef<OsStr>>(program: &str, args: &[S]) -> CommandOutcome {
    let mut cmd = Command::new(program);
    cmd.args(args);
    capture(program, cmd).await
}

/// Run a command given as a single line, split on whitespace.
///
/// The empty line has no program to spawn and reads as [`CommandOutcome::NotFound`].
pub async fn run_line(line: &str) -> CommandOutcome {
    let mut tokens = line.split_whitespace();
    let Some(program) = tokens.next() else {
        return CommandOutcome::NotFound;
    };
    let args: Vec<&str> = tokens.collect();
    run(program, &args).await
}

/// Run a raw line through the platform shell.
///
/// Only for callers that need shell features (globbing, redirection);
/// everything else should use [`run`] or [`run_line`].
pub async fn run_shell(line: &str) -> CommandOutcome {
    #[cfg(windows)]
    let (shell, flag) = ("cmd", "/C");
    #[cfg(not(windows))]
    let (shell, flag) = ("sh", "-c");

    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(line);
    capture(shell, cmd).await
}

/// Run a program with extra environment variables set for the child.
///
/// The child still inherits the parent environment; `vars` are overlaid.
pub async fn run_with_env<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    vars: &[(&str, &OsStr)],
) -> CommandOutcome {
    let mut cmd = Command::new(program);
    cmd.args(args);
    for (key, value) in vars {
        cmd.env(key, value);
    }
    capture(program, cmd).await
}

async fn capture(program: &str, mut cmd: Command) -> CommandOutcome {
    cmd.stdin(Stdio::null());
    match cmd.output().await {
        Ok(output) if output.status.success() => {
            CommandOutcome::Success(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            debug!("{} exited with {}: {}", program, output.status, stderr);
            CommandOutcome::Failed(stderr)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found on PATH", program);
            CommandOutcome::NotFound
        }
        Err(err) => CommandOutcome::Failed(err.to_string()),
    }
}
