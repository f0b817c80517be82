//! Operating system family detection.

use std::fmt;

/// The OS family an operation runs against.
///
/// Passed explicitly to every platform-dependent operation so callers (and
/// tests) decide which enumeration and install strategy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Primary platform: registry dump + system profiler, Homebrew installs.
    MacOs,
    /// Secondary platform: `lsusb` listing only.
    Linux,
    /// Anything else, carrying the `std::env::consts::OS` name.
    Other(&'static str),
}

impl Platform {
    /// Platform the current process was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &'static str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Other(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Other(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_known() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
    }

    #[test]
    fn from_os_other_keeps_name() {
        let p = Platform::from_os("windows");
        assert_eq!(p, Platform::Other("windows"));
        assert_eq!(p.to_string(), "windows");
    }

    #[test]
    fn current_matches_build_target() {
        assert_eq!(Platform::current().name(), std::env::consts::OS);
    }
}
