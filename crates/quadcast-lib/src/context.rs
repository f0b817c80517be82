//! Host context — the caller-facing entry point.
//!
//! Bundles the three things every operation needs (platform, locator, process
//! runner) so front-ends construct them once: check dependencies → install →
//! open session → set color.

use std::path::PathBuf;

use crate::error::Result;
use crate::install;
use crate::locate::{self, DependencyStatus, Locator};
use crate::platform::Platform;
use crate::probe;
use crate::process::{CommandRunner, SystemRunner};
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct HostContext<R: CommandRunner> {
    pub platform: Platform,
    pub locator: Locator,
    pub runner: R,
}

impl HostContext<SystemRunner> {
    /// Context for the running machine: current platform, `PATH` lookup,
    /// real processes.
    pub fn system() -> Self {
        HostContext::new(Platform::current(), Locator::system(), SystemRunner)
    }
}

impl<R: CommandRunner> HostContext<R> {
    pub fn new(platform: Platform, locator: Locator, runner: R) -> Self {
        HostContext {
            platform,
            locator,
            runner,
        }
    }

    pub fn dependency_status(&self) -> DependencyStatus {
        locate::dependency_status(&self.locator, &self.runner)
    }

    pub fn install_tool(&self) -> Result<PathBuf> {
        install::install_tool(self.platform, &self.locator, &self.runner)
    }

    pub fn probe_device(&self) -> Result<()> {
        probe::probe_device(self.platform, &self.runner)
    }

    pub fn list_usb_devices(&self) -> String {
        probe::list_usb_devices(self.platform, &self.runner)
    }

    /// Open a session that runs its commands through this context's runner.
    pub fn open_session(&self) -> Result<Session<&R>> {
        Session::open(self.platform, &self.locator, &self.runner)
    }
}
