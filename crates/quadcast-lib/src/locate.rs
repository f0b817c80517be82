//! Dependency discovery — finds `quadcastrgb` and Homebrew on disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::process::{Capture, CommandRunner};

/// Executable name of the color-control tool.
pub const TOOL_NAME: &str = "quadcastrgb";

/// Executable name of the package manager used to install the tool.
pub const PACKAGE_MANAGER: &str = "brew";

/// Where to get Homebrew.
pub const HOMEBREW_URL: &str = "https://brew.sh";

/// Upstream project of the color-control tool.
pub const TOOL_PROJECT_URL: &str = "https://github.com/Ors1mer/QuadcastRGB";

/// Well-known install locations, checked after `PATH`.
///
/// Desktop-launched processes often inherit a `PATH` without the Homebrew
/// prefix, so these cover Apple Silicon and Intel Homebrew plus MacPorts.
const TOOL_FALLBACKS: &[&str] = &[
    "/opt/homebrew/bin/quadcastrgb",
    "/usr/local/bin/quadcastrgb",
    "/opt/local/bin/quadcastrgb",
];

const PACKAGE_MANAGER_FALLBACKS: &[&str] = &[
    "/opt/homebrew/bin/brew",
    "/usr/local/bin/brew",
    "/home/linuxbrew/.linuxbrew/bin/brew",
];

/// The shell command that installs the tool.
pub fn install_command() -> String {
    format!("{PACKAGE_MANAGER} install {TOOL_NAME}")
}

/// Filesystem lookup for the tool and the package manager.
#[derive(Debug, Clone)]
pub struct Locator {
    search_path: Option<OsString>,
    tool_fallbacks: Vec<PathBuf>,
    package_manager_fallbacks: Vec<PathBuf>,
}

impl Locator {
    /// Locator using the process `PATH` and the well-known install locations.
    pub fn system() -> Self {
        Locator {
            search_path: std::env::var_os("PATH"),
            tool_fallbacks: TOOL_FALLBACKS.iter().copied().map(PathBuf::from).collect(),
            package_manager_fallbacks: PACKAGE_MANAGER_FALLBACKS
                .iter()
                .copied()
                .map(PathBuf::from)
                .collect(),
        }
    }

    /// Locator with an explicit search path and fallback lists.
    pub fn new(
        search_path: Option<OsString>,
        tool_fallbacks: Vec<PathBuf>,
        package_manager_fallbacks: Vec<PathBuf>,
    ) -> Self {
        Locator {
            search_path,
            tool_fallbacks,
            package_manager_fallbacks,
        }
    }

    /// Find `name` on the search path, then at each fallback path in order.
    ///
    /// Only existence as a regular file is checked, not executability.
    pub fn locate(&self, name: &str, fallbacks: &[PathBuf]) -> Option<PathBuf> {
        let on_path = self.search_path.as_ref().and_then(|sp| {
            std::env::split_paths(sp)
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(|dir| dir.join(name))
                .find(|candidate| is_regular_file(candidate))
        });
        on_path.or_else(|| fallbacks.iter().find(|p| is_regular_file(p)).cloned())
    }

    pub fn find_tool(&self) -> Option<PathBuf> {
        self.locate(TOOL_NAME, &self.tool_fallbacks)
    }

    pub fn find_package_manager(&self) -> Option<PathBuf> {
        self.locate(PACKAGE_MANAGER, &self.package_manager_fallbacks)
    }
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

// ── Dependency status ──

/// Whether the tool is usable, with a message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyStatus {
    pub installed: bool,
    pub message: String,
}

/// Report whether the tool is installed and how to fix it if not.
pub fn dependency_status(locator: &Locator, runner: &impl CommandRunner) -> DependencyStatus {
    let Some(tool) = locator.find_tool() else {
        let message = if locator.find_package_manager().is_none() {
            format!(
                "{TOOL_NAME} is not installed and Homebrew was not found. \
                 Install Homebrew from {HOMEBREW_URL}, then run: {}",
                install_command()
            )
        } else {
            format!(
                "{TOOL_NAME} is not installed. Install it with: {}",
                install_command()
            )
        };
        return DependencyStatus {
            installed: false,
            message,
        };
    };

    let message = match tool_version(&tool, runner) {
        Some(version) => format!("{TOOL_NAME} {version}"),
        None => format!("{TOOL_NAME} installed at {}", tool.display()),
    };
    DependencyStatus {
        installed: true,
        message,
    }
}

/// Trimmed `--version` output, or `None` if the query fails or prints nothing.
fn tool_version(tool: &Path, runner: &impl CommandRunner) -> Option<String> {
    match runner.run(tool, &["--version"], Capture::Stdout) {
        Ok(out) if out.success() => {
            let version = out.stdout.trim();
            (!version.is_empty()).then(|| version.to_string())
        }
        Ok(out) => {
            log::debug!("{TOOL_NAME} --version: {}", out.status_text());
            None
        }
        Err(e) => {
            log::debug!("{TOOL_NAME} --version: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockRunner;

    fn touch(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(path, b"#!/bin/sh\n").unwrap();
    }

    fn empty_locator() -> Locator {
        Locator::new(None, vec![], vec![])
    }

    // ── locate ──

    #[test]
    fn locate_finds_on_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        touch(&bin.join("quadcastrgb"));
        let locator = Locator::new(Some(bin.clone().into_os_string()), vec![], vec![]);
        assert_eq!(locator.find_tool(), Some(bin.join("quadcastrgb")));
    }

    #[test]
    fn locate_search_path_wins_over_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        let fallback = dir.path().join("opt/quadcastrgb");
        touch(&bin.join("quadcastrgb"));
        touch(&fallback);
        let locator = Locator::new(Some(bin.clone().into_os_string()), vec![fallback], vec![]);
        assert_eq!(locator.find_tool(), Some(bin.join("quadcastrgb")));
    }

    #[test]
    fn locate_checks_search_path_dirs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a");
        let second = dir.path().join("b");
        touch(&first.join("brew"));
        touch(&second.join("brew"));
        let sp = std::env::join_paths([&first, &second]).unwrap();
        let locator = Locator::new(Some(sp), vec![], vec![]);
        assert_eq!(locator.find_package_manager(), Some(first.join("brew")));
    }

    #[test]
    fn locate_falls_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope/quadcastrgb");
        let second = dir.path().join("second/quadcastrgb");
        let third = dir.path().join("third/quadcastrgb");
        touch(&second);
        touch(&third);
        let locator = Locator::new(
            None,
            vec![missing.clone(), second.clone(), third.clone()],
            vec![],
        );
        assert_eq!(locator.find_tool(), Some(second.clone()));

        // Only the last entry present, as with a MacPorts-only install.
        std::fs::remove_file(&second).unwrap();
        let locator = Locator::new(None, vec![missing, second, third.clone()], vec![]);
        assert_eq!(locator.find_tool(), Some(third));
    }

    #[test]
    fn system_tool_fallbacks_cover_homebrew_and_macports() {
        let locator = Locator::system();
        assert_eq!(
            locator.tool_fallbacks,
            vec![
                PathBuf::from("/opt/homebrew/bin/quadcastrgb"),
                PathBuf::from("/usr/local/bin/quadcastrgb"),
                PathBuf::from("/opt/local/bin/quadcastrgb"),
            ]
        );
    }

    #[test]
    fn locate_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(bin.join("quadcastrgb")).unwrap();
        let locator = Locator::new(
            Some(bin.into_os_string()),
            vec![dir.path().to_path_buf()],
            vec![],
        );
        assert_eq!(locator.find_tool(), None);
    }

    #[test]
    fn locate_nothing_found() {
        assert_eq!(empty_locator().find_tool(), None);
        assert_eq!(empty_locator().find_package_manager(), None);
    }

    // ── dependency_status ──

    #[test]
    fn status_neither_installed_mentions_homebrew() {
        let runner = MockRunner::new();
        let status = dependency_status(&empty_locator(), &runner);
        assert!(!status.installed);
        assert!(status.message.contains("Homebrew"), "{}", status.message);
        assert!(status.message.contains(HOMEBREW_URL));
        assert!(status.message.contains("brew install quadcastrgb"));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn status_tool_missing_manager_present() {
        let dir = tempfile::tempdir().unwrap();
        let brew = dir.path().join("brew");
        touch(&brew);
        let locator = Locator::new(None, vec![], vec![brew]);
        let status = dependency_status(&locator, &MockRunner::new());
        assert!(!status.installed);
        assert_eq!(
            status.message,
            "quadcastrgb is not installed. Install it with: brew install quadcastrgb"
        );
    }

    #[test]
    fn status_installed_reports_trimmed_version() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("quadcastrgb");
        touch(&tool);
        let runner = MockRunner::new();
        runner.respond("quadcastrgb", 0, "  1.0.5\n");
        let locator = Locator::new(None, vec![tool], vec![]);
        let status = dependency_status(&locator, &runner);
        assert!(status.installed);
        assert_eq!(status.message, "quadcastrgb 1.0.5");
        assert_eq!(runner.calls_to("quadcastrgb"), vec![vec!["--version"]]);
    }

    #[test]
    fn status_installed_version_failure_falls_back_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("quadcastrgb");
        touch(&tool);
        let runner = MockRunner::new();
        runner.respond("quadcastrgb", 2, "");
        let locator = Locator::new(None, vec![tool.clone()], vec![]);
        let status = dependency_status(&locator, &runner);
        assert!(status.installed);
        assert_eq!(
            status.message,
            format!("quadcastrgb installed at {}", tool.display())
        );
    }

    #[test]
    fn status_installed_empty_version_falls_back_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("quadcastrgb");
        touch(&tool);
        let runner = MockRunner::new();
        runner.respond("quadcastrgb", 0, "   \n");
        let locator = Locator::new(None, vec![tool], vec![]);
        let status = dependency_status(&locator, &runner);
        assert!(status.installed);
        assert!(status.message.contains("installed at"));
    }

    #[test]
    fn dependency_status_serializes() {
        let status = DependencyStatus {
            installed: true,
            message: "quadcastrgb 1.0".into(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["installed"], true);
        assert_eq!(json["message"], "quadcastrgb 1.0");
    }
}
