//! Host platform identification and the ranked Stata install locations.
//!
//! The candidate tables are reference data: newest Stata release first,
//! fuller edition first within a release (MP, then SE, then BE/base).
//! Adding support for a new Stata release means prepending its paths here.

use std::env;

/// Host operating system, identified once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl HostPlatform {
    /// Identify the host platform from the compile-time OS name.
    pub fn detect() -> Self {
        match env::consts::OS {
            "windows" => HostPlatform::Windows,
            "macos" => HostPlatform::MacOs,
            "linux" => HostPlatform::Linux,
            _ => HostPlatform::Other,
        }
    }
}

impl std::fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostPlatform::Windows => write!(f, "Windows"),
            HostPlatform::MacOs => write!(f, "macOS"),
            HostPlatform::Linux => write!(f, "Linux"),
            HostPlatform::Other => write!(f, "unsupported"),
        }
    }
}

/// Stata install locations on macOS. App bundles are unversioned, so the
/// ranking is edition-only, with the vendor's `/Applications/Stata/` folder
/// layout preferred over bare `/Applications/` bundles.
const MACOS_CANDIDATES: &[&str] = &[
    "/Applications/Stata/StataMP.app/Contents/MacOS/stata-mp",
    "/Applications/Stata/StataSE.app/Contents/MacOS/stata-se",
    "/Applications/Stata/StataBE.app/Contents/MacOS/stata",
    "/Applications/Stata/Stata.app/Contents/MacOS/stata",
    "/Applications/StataMP.app/Contents/MacOS/stata-mp",
    "/Applications/StataSE.app/Contents/MacOS/stata-se",
    "/Applications/StataBE.app/Contents/MacOS/stata",
    "/Applications/Stata.app/Contents/MacOS/stata",
];

/// Stata install locations on Linux: `/usr/local/stataNN` for recent
/// releases, then the unversioned `/usr/local/stata` and `/opt/stata`.
const LINUX_CANDIDATES: &[&str] = &[
    "/usr/local/stata18/stata-mp",
    "/usr/local/stata18/stata-se",
    "/usr/local/stata18/stata",
    "/usr/local/stata17/stata-mp",
    "/usr/local/stata17/stata-se",
    "/usr/local/stata17/stata",
    "/usr/local/stata16/stata-mp",
    "/usr/local/stata16/stata-se",
    "/usr/local/stata16/stata",
    "/usr/local/stata/stata-mp",
    "/usr/local/stata/stata-se",
    "/usr/local/stata/stata",
    "/opt/stata/stata-mp",
    "/opt/stata/stata-se",
    "/opt/stata/stata",
];

/// Stata install locations on Windows, 64-bit installs first.
const WINDOWS_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Stata18\StataMP-64.exe",
    r"C:\Program Files\Stata18\StataSE-64.exe",
    r"C:\Program Files\Stata18\Stata-64.exe",
    r"C:\Program Files\Stata17\StataMP-64.exe",
    r"C:\Program Files\Stata17\StataSE-64.exe",
    r"C:\Program Files\Stata17\Stata-64.exe",
    r"C:\Program Files\Stata16\StataMP-64.exe",
    r"C:\Program Files\Stata16\StataSE-64.exe",
    r"C:\Program Files\Stata16\Stata-64.exe",
    r"C:\Program Files (x86)\Stata18\StataMP.exe",
    r"C:\Program Files (x86)\Stata18\StataSE.exe",
    r"C:\Program Files (x86)\Stata18\Stata.exe",
    r"C:\Program Files (x86)\Stata17\StataMP.exe",
    r"C:\Program Files (x86)\Stata17\StataSE.exe",
    r"C:\Program Files (x86)\Stata17\Stata.exe",
];

/// Ranked candidate paths for a Stata executable on the given platform.
///
/// Returns an empty slice for platforms Stata does not ship on.
pub fn candidate_paths(platform: HostPlatform) -> &'static [&'static str] {
    match platform {
        HostPlatform::MacOs => MACOS_CANDIDATES,
        HostPlatform::Linux => LINUX_CANDIDATES,
        HostPlatform::Windows => WINDOWS_CANDIDATES,
        HostPlatform::Other => &[],
    }
}

/// Example executable path shown when prompting the operator for a manual
/// Stata location.
pub fn example_path(platform: HostPlatform) -> &'static str {
    match platform {
        HostPlatform::Windows => r"C:\Program Files\Stata17\StataMP-64.exe",
        HostPlatform::MacOs => "/Applications/Stata/StataMP.app/Contents/MacOS/stata-mp",
        _ => "/usr/local/stata17/stata-mp",
    }
}
