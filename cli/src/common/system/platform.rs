//! # shellrun Platform Detection (`common::system::platform`)
//!
//! File: cli/src/common/system/platform.rs
//!
//! ## Overview
//!
//! Classifies the host operating system into the three families the executor
//! cares about. Windows needs the `cmd /c` wrapper and reports its console
//! encoding through `chcp`; everything else is spawned directly and reports its
//! encoding through `locale`.
//!
//! The classification is computed once per process by `Platform::current()` and
//! then passed around as a value, so invocation building and charset parsing can
//! be exercised for any family regardless of the host running the tests.
//!
use std::fmt;
use std::sync::OnceLock;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    Other,
}

static CURRENT: OnceLock<Platform> = OnceLock::new();

impl Platform {
    /// Classifies an OS name such as `windows`, `Windows 10`, `linux` or `macos`.
    ///
    /// Unknown or empty names map to `Platform::Other`.
    pub fn from_os_name(name: &str) -> Platform {
        let lowered = name.trim().to_ascii_lowercase();
        if lowered.starts_with("windows") {
            Platform::Windows
        } else if lowered.starts_with("linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// The family of the running host, detected on first use and cached.
    pub fn current() -> Platform {
        *CURRENT.get_or_init(|| {
            let platform = Platform::from_os_name(std::env::consts::OS);
            tracing::debug!(os = std::env::consts::OS, %platform, "Detected host platform");
            platform
        })
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_name() {
        assert_eq!(Platform::from_os_name("windows"), Platform::Windows);
        assert_eq!(Platform::from_os_name("Windows 10"), Platform::Windows);
        assert_eq!(Platform::from_os_name("WINDOWS SERVER 2019"), Platform::Windows);
        assert_eq!(Platform::from_os_name("linux"), Platform::Linux);
        assert_eq!(Platform::from_os_name("Linux"), Platform::Linux);
        assert_eq!(Platform::from_os_name("macos"), Platform::Other);
        assert_eq!(Platform::from_os_name("freebsd"), Platform::Other);
        assert_eq!(Platform::from_os_name(""), Platform::Other);
    }

    #[test]
    fn test_current_matches_build_target() {
        let platform = Platform::current();
        assert_eq!(platform, Platform::current());
        if cfg!(windows) {
            assert_eq!(platform, Platform::Windows);
        } else if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        } else {
            assert_eq!(platform, Platform::Other);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::Windows.to_string(), "windows");
        assert!(Platform::Windows.is_windows());
        assert!(!Platform::Linux.is_windows());
        assert!(!Platform::Other.is_windows());
    }
}
