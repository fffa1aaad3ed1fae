//! Host Python interpreter checks.
//!
//! The notebook stack needs a reasonably recent Python before anything
//! else is worth attempting, so this runs first and gates the workflow.

use log::debug;

use crate::command::{self, CommandOutcome};

/// Minimum supported Python version (major, minor).
pub const MIN_PYTHON: (u32, u32) = (3, 9);

/// A parsed `python --version` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    pub fn meets_floor(&self) -> bool {
        (self.major, self.minor) >= MIN_PYTHON
    }
}

impl std::fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Probe the host interpreter, trying `python3` before the bare `python`
/// that Windows installs ship.
pub async fn detect_python() -> Option<PythonVersion> {
    for program in ["python3", "python"] {
        if let CommandOutcome::Success(out) = command::run(program, &["--version"]).await {
            if let Some(version) = parse_version(&out) {
                debug!("{} reported {}", program, version);
                return Some(version);
            }
        }
    }
    None
}

/// Parse output like `Python 3.11.4` into a version triple.
///
/// The patch component is optional; pre-release suffixes are ignored.
fn parse_version(output: &str) -> Option<PythonVersion> {
    let line = output.lines().next()?;
    let token = line.split_whitespace().find(|t| {
        t.chars()
            .next()
            .map(|c| c.is_ascii_digit())
            .unwrap_or(false)
    })?;
    let mut parts = token.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts
        .next()
        .map(|p| {
            let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        })
        .unwrap_or(0);
    Some(PythonVersion {
        major,
        minor,
        patch,
    })
}
