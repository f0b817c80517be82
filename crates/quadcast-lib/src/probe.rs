//! Device presence detection via the OS USB enumeration tools.
//!
//! No USB traffic is generated here: the prober runs the platform's listing
//! command and text-matches its output against a table of known names and
//! identifiers. The matching is a heuristic. A change in the OS tool's output
//! format can cause false negatives, and an unrelated device sharing a
//! substring can cause false positives.

use std::path::Path;

use crate::error::{QuadcastError, Result};
use crate::platform::Platform;
use crate::process::{Capture, CommandRunner};

// ── Identifier table ──

/// Manufacturer brand as it appears in product strings.
pub const BRAND_NAME: &str = "hyperx";

/// Product-family names, any of which (together with the brand) identifies
/// a supported microphone.
pub const PRODUCT_FAMILIES: &[&str] = &["quadcast", "duocast"];

/// USB vendor ids: Kingston (older HyperX units) and HP (newer units).
pub const VENDOR_IDS: &[&str] = &["0951", "03f0"];

/// USB product ids seen across QuadCast / QuadCast S / DuoCast revisions.
pub const PRODUCT_IDS: &[&str] = &[
    "171f", // QuadCast S
    "16d8", // QuadCast S, later revision
    "16c1", // QuadCast
    "0f8b", // DuoCast
    "028c", // QuadCast S (HP)
    "048c", // QuadCast S (HP)
    "068c", // QuadCast S (HP)
    "098c", // DuoCast (HP)
];

const NOT_FOUND_MACOS: &str =
    "QuadCast device not found. Please connect the microphone and make sure it is powered on.";
const NOT_FOUND_LINUX: &str = "QuadCast device not found.";

/// A USB enumeration command: program + arguments.
struct Enumerator {
    program: &'static str,
    args: &'static [&'static str],
}

impl Enumerator {
    fn command_line(&self) -> String {
        std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Captured stdout, or a description of why the command produced none.
    fn run(&self, runner: &impl CommandRunner) -> std::result::Result<String, String> {
        match runner.run(Path::new(self.program), self.args, Capture::Stdout) {
            Ok(out) if out.success() => Ok(out.stdout),
            Ok(out) => Err(format!("{}: {}", self.command_line(), out.status_text())),
            Err(e) => Err(format!("{}: {e}", self.command_line())),
        }
    }
}

const IOREG: Enumerator = Enumerator {
    program: "ioreg",
    args: &["-p", "IOUSB", "-l", "-w", "0"],
};
const SYSTEM_PROFILER: Enumerator = Enumerator {
    program: "system_profiler",
    args: &["SPUSBDataType"],
};
const SYSTEM_PROFILER_FULL: Enumerator = Enumerator {
    program: "system_profiler",
    args: &["SPUSBDataType", "-detailLevel", "full"],
};
const LSUSB: Enumerator = Enumerator {
    program: "lsusb",
    args: &[],
};
const LSUSB_VERBOSE: Enumerator = Enumerator {
    program: "lsusb",
    args: &["-v"],
};

const MACOS_DIAGNOSTICS: &[Enumerator] = &[IOREG, SYSTEM_PROFILER];
const LINUX_DIAGNOSTICS: &[Enumerator] = &[LSUSB_VERBOSE];

// ── Matching ──

/// Decides from enumerator output whether the microphone is attached.
pub trait PresenceMatcher {
    /// `output` is the raw enumerator text; implementations handle case.
    fn matches(&self, output: &str) -> bool;
}

/// Two-tier matcher for the macOS registry / profiler dumps.
///
/// Product ids alone are reused across revisions, so the brand + family name
/// match is tried first; vendor id + product id is the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryMatcher;

impl PresenceMatcher for RegistryMatcher {
    fn matches(&self, output: &str) -> bool {
        let text = output.to_lowercase();
        if text.contains(BRAND_NAME) && PRODUCT_FAMILIES.iter().any(|f| text.contains(f)) {
            return true;
        }
        VENDOR_IDS.iter().any(|v| text.contains(v)) && PRODUCT_IDS.iter().any(|p| text.contains(p))
    }
}

/// Vendor-id matcher for `lsusb` listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingMatcher;

impl PresenceMatcher for ListingMatcher {
    fn matches(&self, output: &str) -> bool {
        let text = output.to_lowercase();
        VENDOR_IDS.iter().any(|v| text.contains(v))
    }
}

/// The matcher used on `platform`, or `None` if probing is unsupported there.
pub fn matcher_for(platform: Platform) -> Option<Box<dyn PresenceMatcher>> {
    match platform {
        Platform::MacOs => Some(Box::new(RegistryMatcher)),
        Platform::Linux => Some(Box::new(ListingMatcher)),
        Platform::Other(_) => None,
    }
}

// ── Probe ──

/// Confirm the microphone is attached.
pub fn probe_device(platform: Platform, runner: &impl CommandRunner) -> Result<()> {
    let Some(matcher) = matcher_for(platform) else {
        return Err(QuadcastError::UnsupportedPlatform(platform.to_string()));
    };

    match platform {
        Platform::MacOs => {
            let output = IOREG
                .run(runner)
                .or_else(|e| {
                    log::debug!("{e}; falling back to {}", SYSTEM_PROFILER_FULL.command_line());
                    SYSTEM_PROFILER_FULL.run(runner)
                })
                .map_err(enumeration_failed)?;
            if matcher.matches(&output) {
                log::debug!("QuadCast detected");
                Ok(())
            } else {
                Err(QuadcastError::NotFound(NOT_FOUND_MACOS.into()))
            }
        }
        Platform::Linux => match LSUSB.run(runner) {
            Ok(output) if matcher.matches(&output) => {
                log::debug!("QuadCast detected");
                Ok(())
            }
            Ok(_) => Err(QuadcastError::NotFound(NOT_FOUND_LINUX.into())),
            Err(e) => Err(enumeration_failed(e)),
        },
        Platform::Other(_) => Err(QuadcastError::UnsupportedPlatform(platform.to_string())),
    }
}

/// The enumerator itself failed, so presence is unknown.
fn enumeration_failed(reason: String) -> QuadcastError {
    QuadcastError::Process(format!("failed to check USB devices: {reason}"))
}

/// Raw, unfiltered USB listing for troubleshooting.
///
/// Each command's output is placed under a `=== <command> ===` header;
/// failures are rendered inline.
pub fn list_usb_devices(platform: Platform, runner: &impl CommandRunner) -> String {
    let enumerators: &[Enumerator] = match platform {
        Platform::MacOs => MACOS_DIAGNOSTICS,
        Platform::Linux => LINUX_DIAGNOSTICS,
        Platform::Other(name) => {
            return format!("USB device listing is not supported on {name}.\n");
        }
    };

    let mut report = String::new();
    for e in enumerators {
        report.push_str(&format!("=== {} ===\n", e.command_line()));
        match e.run(runner) {
            Ok(out) => report.push_str(&out),
            Err(err) => report.push_str(&format!("(failed: {err})")),
        }
        if !report.ends_with('\n') {
            report.push('\n');
        }
        report.push('\n');
    }
    report
}
