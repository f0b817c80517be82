//! Installs `quadcastrgb` through Homebrew.

use std::path::PathBuf;

use crate::error::{QuadcastError, Result};
use crate::locate::{HOMEBREW_URL, Locator, TOOL_NAME, install_command};
use crate::platform::Platform;
use crate::process::{Capture, CommandRunner};

/// Install the tool with the package manager, then confirm it can be found.
///
/// Only macOS is supported. Returns the located tool path on success; an
/// install that exits 0 but leaves no locatable tool is still an error.
pub fn install_tool(
    platform: Platform,
    locator: &Locator,
    runner: &impl CommandRunner,
) -> Result<PathBuf> {
    if platform != Platform::MacOs {
        return Err(QuadcastError::UnsupportedPlatform(format!(
            "{platform} (automatic installation requires macOS; install {TOOL_NAME} manually)"
        )));
    }

    let Some(brew) = locator.find_package_manager() else {
        return Err(QuadcastError::NotFound(format!(
            "Homebrew not found. Install it from {HOMEBREW_URL}, then try again."
        )));
    };

    log::info!("running {} ({})", install_command(), brew.display());
    match runner.run(&brew, &["install", TOOL_NAME], Capture::Discard) {
        Ok(out) if out.success() => {}
        Ok(out) => {
            return Err(QuadcastError::Process(format!(
                "{} failed: {}",
                install_command(),
                out.status_text()
            )));
        }
        Err(e) => {
            return Err(QuadcastError::Process(format!(
                "{} failed: {e}",
                install_command()
            )));
        }
    }

    let tool = locator.find_tool().ok_or_else(|| {
        QuadcastError::NotFound(format!(
            "{TOOL_NAME} still not found after installation. Try running `{}` in a terminal.",
            install_command()
        ))
    })?;
    log::info!("{TOOL_NAME} installed at {}", tool.display());
    Ok(tool)
}
