//! Unified error type for the quadcast-lib crate.
//!
//! [`QuadcastError`] covers every failure the device-control layer can report
//! to its caller. `From<io::Error>` lets `?` propagate settings-file I/O
//! failures directly.

use std::fmt;

/// Unified error type for quadcast-lib operations.
///
/// String payloads follow the convention **"context: details"** where
/// *context* names the step that failed (e.g. `"error setting color"`) and
/// *details* carries the underlying failure text.
#[derive(Debug)]
pub enum QuadcastError {
    /// Tool, package manager or device absent. The message carries the remedy.
    NotFound(String),
    /// The operation has no implementation for the named platform.
    UnsupportedPlatform(String),
    /// An external command could not be run or exited non-zero.
    Process(String),
    /// Settings file unreadable or unwritable for a reason other than absence.
    Io(std::io::Error),
    /// Settings file content could not be parsed or holds invalid values.
    Settings(String),
    /// Color or off requested on a session that is not open.
    NotConnected,
    /// Color string could not be parsed.
    Color(String),
}

impl fmt::Display for QuadcastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadcastError::NotFound(msg) => write!(f, "{msg}"),
            QuadcastError::UnsupportedPlatform(p) => write!(f, "Platform not supported: {p}"),
            QuadcastError::Process(e) => write!(f, "{e}"),
            QuadcastError::Io(e) => write!(f, "I/O error: {e}"),
            QuadcastError::Settings(e) => write!(f, "Settings error: {e}"),
            QuadcastError::NotConnected => write!(f, "device not connected"),
            QuadcastError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for QuadcastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuadcastError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuadcastError {
    fn from(e: std::io::Error) -> Self {
        QuadcastError::Io(e)
    }
}

/// Crate-level Result alias using [`QuadcastError`].
pub type Result<T> = std::result::Result<T, QuadcastError>;
