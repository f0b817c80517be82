//! Device session — gates LED commands on "tool located and device present".

use std::path::{Path, PathBuf};

use crate::color::Rgb;
use crate::error::{QuadcastError, Result};
use crate::locate::{Locator, TOOL_NAME, TOOL_PROJECT_URL, install_command};
use crate::platform::Platform;
use crate::probe;
use crate::process::{self, Capture, Cleanup, CommandRunner};

/// An open (or closed) handle on the microphone.
///
/// Only two states exist: open after a successful [`Session::open`], closed
/// after [`Session::close`]. Every command on a closed session fails with
/// [`QuadcastError::NotConnected`] without invoking any process.
pub struct Session<R: CommandRunner> {
    connected: bool,
    tool_path: PathBuf,
    runner: R,
}

impl<R: CommandRunner> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("connected", &self.connected)
            .field("tool_path", &self.tool_path)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> Session<R> {
    /// Locate the tool and probe for the device. Both must succeed.
    pub fn open(platform: Platform, locator: &Locator, runner: R) -> Result<Self> {
        let Some(tool_path) = locator.find_tool() else {
            return Err(QuadcastError::NotFound(format!(
                "{TOOL_NAME} not found. Install it with `{}` or see {TOOL_PROJECT_URL}",
                install_command()
            )));
        };
        probe::probe_device(platform, &runner)?;
        log::debug!("session opened ({})", tool_path.display());
        Ok(Session {
            connected: true,
            tool_path,
            runner,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Tool path resolved when the session was opened.
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Set the LED to a solid color.
    ///
    /// Any running instance of the tool is terminated first: while animating
    /// it holds the device open, and a second instance would conflict.
    pub fn set_color(&self, r: u8, g: u8, b: u8) -> Result<()> {
        if !self.connected {
            return Err(QuadcastError::NotConnected);
        }

        self.stop_running_tool();

        let hex = Rgb::new(r, g, b).to_hex();
        match self
            .runner
            .run(&self.tool_path, &["solid", hex.as_str()], Capture::Discard)
        {
            Ok(out) if out.success() => {
                log::info!("LED set to #{hex}");
                Ok(())
            }
            Ok(out) => Err(QuadcastError::Process(format!(
                "error setting color: {}",
                out.status_text()
            ))),
            Err(e) => Err(QuadcastError::Process(format!("error setting color: {e}"))),
        }
    }

    pub fn set_rgb(&self, color: Rgb) -> Result<()> {
        self.set_color(color.r, color.g, color.b)
    }

    /// Turn the LED off.
    ///
    /// The tool has no "off" command; terminating it is the only mechanism,
    /// so this succeeds once the termination attempt completes.
    pub fn off(&self) -> Result<()> {
        if !self.connected {
            return Err(QuadcastError::NotConnected);
        }
        self.stop_running_tool();
        log::info!("LED off");
        Ok(())
    }

    pub fn close(&mut self) {
        self.connected = false;
    }

    fn stop_running_tool(&self) {
        match process::kill_by_name(&self.runner, TOOL_NAME) {
            Cleanup::Done => log::debug!("stopped running {TOOL_NAME}"),
            Cleanup::Skipped(reason) => log::debug!("nothing stopped ({reason})"),
        }
    }
}
