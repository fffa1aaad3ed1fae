//! Final status report shown after the workflow finishes.

use std::path::PathBuf;

use stata_discover::HostPlatform;

/// What the workflow accomplished, for the closing summary.
#[derive(Debug)]
pub struct SetupReport {
    pub platform: HostPlatform,
    pub stata_path: Option<PathBuf>,
    pub env_root: Option<PathBuf>,
    pub kernel_installed: bool,
}

impl SetupReport {
    /// Render the quick-start guide and the configured/skipped summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        out.push_str(&format!("\n{}\n", rule));
        out.push_str("✨ Setup Complete!\n");
        out.push_str(&format!("{}\n", rule));

        out.push_str("\n📋 Quick Start Guide:\n");
        out.push_str(&format!("{}\n", "-".repeat(40)));

        out.push_str("\n1️⃣  Start Jupyter Lab server:\n");
        if self.platform == HostPlatform::Windows {
            out.push_str("   Option A: Double-click 'start_jupyter.bat'\n");
            out.push_str("   Option B: Run in PowerShell: .\\start_jupyter.ps1\n");
            out.push_str("   Option C: Run in terminal: poetry run jupyter lab\n");
        } else {
            out.push_str("   Option A: Run: ./start_jupyter.sh\n");
            out.push_str("   Option B: Run: poetry run jupyter lab\n");
        }

        out.push_str("\n2️⃣  Access Jupyter Lab:\n");
        out.push_str("   Open browser: http://localhost:8888\n");
        out.push_str("   (Copy the token from the terminal if prompted)\n");

        out.push_str("\n3️⃣  For VSCode users:\n");
        out.push_str("   • Open a notebook (.ipynb file)\n");
        out.push_str("   • Click kernel selector (top-right)\n");
        out.push_str("   • Choose: Select Another Kernel → Existing Jupyter Server\n");
        out.push_str("   • Enter: http://localhost:8888\n");
        out.push_str("   • Enter the token if prompted\n");
        out.push_str("   • Select the Stata kernel\n");

        if self.env_root.is_none() {
            out.push_str(
                "\n⚠️  Poetry environment not resolved - VSCode settings were skipped\n",
            );
        }

        match &self.stata_path {
            Some(path) => {
                out.push_str(&format!("\n✅ Stata configured at: {}\n", path.display()));
                if !self.kernel_installed {
                    out.push_str(
                        "⚠️  Stata kernel not registered - re-run setup after fixing the error above\n",
                    );
                }
            }
            None => {
                out.push_str("\n⚠️  Stata not configured - you can set it up later\n");
            }
        }

        out.push_str(&format!("\n{}\n", rule));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_stata_configured() {
        let report = SetupReport {
            platform: HostPlatform::Linux,
            stata_path: Some(PathBuf::from("/opt/stata/stata-mp")),
            env_root: Some(PathBuf::from("/home/user/.cache/pypoetry/venv")),
            kernel_installed: true,
        };
        let text = report.render();
        assert!(text.contains("Setup Complete"));
        assert!(text.contains("Stata configured at: /opt/stata/stata-mp"));
        assert!(text.contains("./start_jupyter.sh"));
        assert!(!text.contains("not configured"));
        assert!(!text.contains("kernel not registered"));
    }

    #[test]
    fn test_render_without_stata_notes_the_gap() {
        let report = SetupReport {
            platform: HostPlatform::MacOs,
            stata_path: None,
            env_root: Some(PathBuf::from("/tmp/venv")),
            kernel_installed: false,
        };
        let text = report.render();
        assert!(text.contains("Stata not configured"));
        assert!(!text.contains("Stata configured at:"));
    }

    #[test]
    fn test_render_windows_mentions_batch_script() {
        let report = SetupReport {
            platform: HostPlatform::Windows,
            stata_path: None,
            env_root: None,
            kernel_installed: false,
        };
        let text = report.render();
        assert!(text.contains("start_jupyter.bat"));
        assert!(text.contains("start_jupyter.ps1"));
        assert!(text.contains("VSCode settings were skipped"));
    }

    #[test]
    fn test_render_flags_failed_kernel_install() {
        let report = SetupReport {
            platform: HostPlatform::Linux,
            stata_path: Some(PathBuf::from("/usr/local/stata18/stata-mp")),
            env_root: Some(PathBuf::from("/tmp/venv")),
            kernel_installed: false,
        };
        assert!(report.render().contains("kernel not registered"));
    }
}
