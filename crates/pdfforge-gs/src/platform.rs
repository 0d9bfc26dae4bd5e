//! Host operating system check.
//!
//! The bundled Ghostscript is a Windows build, so every other platform is
//! rejected before any path is resolved or any process is launched.

use pdfforge_core::{Error, Result};

/// The only `std::env::consts::OS` value the bundled binary runs on.
pub const SUPPORTED_OS: &str = "windows";

/// Check an operating system identifier against [`SUPPORTED_OS`].
pub fn check_platform(os: &str) -> Result<()> {
    if os == SUPPORTED_OS {
        Ok(())
    } else {
        Err(Error::unsupported_platform(os, SUPPORTED_OS))
    }
}

/// Check the operating system this process is running on.
pub fn check_current_platform() -> Result<()> {
    check_platform(std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_is_accepted() {
        assert!(check_platform("windows").is_ok());
    }

    #[test]
    fn other_platforms_are_rejected() {
        for os in ["linux", "macos", "freebsd", "Windows", ""] {
            match check_platform(os) {
                Err(Error::UnsupportedPlatform { os: got, supported }) => {
                    assert_eq!(got, os);
                    assert_eq!(supported, "windows");
                }
                other => panic!("{os:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn current_platform_matches_target() {
        assert_eq!(check_current_platform().is_ok(), cfg!(windows));
    }
}
