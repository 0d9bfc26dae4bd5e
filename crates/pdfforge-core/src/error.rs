//! Unified error type for pdfforge.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for the command-line entry point to pick a process exit code via
//! [`Error::exit_code`].

use std::fmt;

/// Unified error type covering all failure modes in pdfforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host operating system cannot run the bundled Ghostscript binary.
    #[error("Unsupported platform: {os} (supported: {supported})")]
    UnsupportedPlatform {
        /// The detected operating system identifier.
        os: String,
        /// The only identifier the bundled binary runs on.
        supported: String,
    },

    /// The external executable could not be started.
    #[error("Failed to launch {tool}: {source}")]
    Launch {
        /// Name of the tool that failed to start.
        tool: String,
        /// The underlying spawn or wait error.
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran but reported failure.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Process exit code, when the process exited normally.
        code: Option<i32>,
        /// Human-readable error description.
        message: String,
        /// Captured standard error output.
        stderr: String,
    },

    /// Configuration or input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to a process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedPlatform { .. } => 3,
            Error::Launch { .. } => 4,
            Error::Tool { .. } => 5,
            Error::Validation(_) => 2,
            Error::Io { .. } => 1,
            Error::Internal(_) => 1,
        }
    }

    /// Convenience constructor for [`Error::Launch`].
    pub fn launch(tool: impl Into<String>, source: std::io::Error) -> Self {
        Error::Launch {
            tool: tool.into(),
            source,
        }
    }

    /// Convenience constructor for [`Error::Tool`] without process details.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            code: None,
            message: message.into(),
            stderr: String::new(),
        }
    }

    /// Convenience constructor for [`Error::UnsupportedPlatform`].
    pub fn unsupported_platform(os: impl fmt::Display, supported: impl fmt::Display) -> Self {
        Error::UnsupportedPlatform {
            os: os.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Captured stderr of a failed tool run, if any was recorded.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::Tool { stderr, .. } if !stderr.is_empty() => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_display() {
        let err = Error::unsupported_platform("linux", "windows");
        assert_eq!(
            err.to_string(),
            "Unsupported platform: linux (supported: windows)"
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn launch_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::launch("gswin64c", io_err);
        assert_eq!(err.to_string(), "Failed to launch gswin64c: no such file");
        assert_eq!(err.exit_code(), 4);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn tool_display() {
        let err = Error::tool("gswin64c", "exit code 1");
        assert_eq!(err.to_string(), "Tool error [gswin64c]: exit code 1");
        assert_eq!(err.exit_code(), 5);
        assert!(err.stderr().is_none());
    }

    #[test]
    fn tool_keeps_stderr() {
        let err = Error::Tool {
            tool: "gswin64c".into(),
            code: Some(1),
            message: "exited with status 1".into(),
            stderr: "Unrecoverable error".into(),
        };
        assert_eq!(err.stderr(), Some("Unrecoverable error"));
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("max_concurrent must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Validation error: max_concurrent must be > 0"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }
}
