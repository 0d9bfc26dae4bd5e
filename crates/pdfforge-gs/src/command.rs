//! Builder for executing an external tool and capturing its output.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use pdfforge_core::{Error, Result};
use tokio::process::Command;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Unlike [`std::process::Command`] the argument list stays inspectable,
/// which is what dry runs print.
///
/// # Example
///
/// ```no_run
/// use pdfforge_gs::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> pdfforge_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("gswin64c"))
///     .arg("--version")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append a single argument. Passed to the process byte for byte.
    pub fn arg(&mut self, s: impl Into<OsString>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<OsString>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time. Without one the process may run
    /// indefinitely.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = Some(d);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - Returns [`Error::Launch`] if spawning the process fails or waiting
    ///   on it hits an I/O error.
    /// - Returns [`Error::Tool`] if the process exits with a non-zero status
    ///   (carries the exit code and captured stderr).
    /// - Returns [`Error::Tool`] if a timeout is set and expires.
    pub async fn execute(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Dropping the wait future on timeout must not leave an orphan behind.
        cmd.kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| Error::launch(program_name.clone(), e))?;

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    tracing::warn!("{program_name} timed out after {limit:?}");
                    return Err(Error::tool(
                        program_name,
                        format!("timed out after {limit:?}"),
                    ));
                }
            },
            None => child.wait_with_output().await,
        };

        let output = result.map_err(|e| Error::launch(program_name.clone(), e))?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            tracing::debug!(
                "{program_name} failed with {}: {}",
                output.status,
                tool_output.stderr.trim()
            );
            return Err(Error::Tool {
                tool: program_name,
                code: output.status.code(),
                message: format!("exited with status {}", output.status),
                stderr: tool_output.stderr,
            });
        }

        Ok(tool_output)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let mut cmd = ToolCommand::new(PathBuf::from("gs"));
        cmd.arg("-dBATCH").args(["-dNOPAUSE", "in.pdf"]);
        assert_eq!(cmd.to_string(), "gs -dBATCH -dNOPAUSE in.pdf");
        assert_eq!(cmd.get_args().len(), 3);
        assert_eq!(cmd.program(), Path::new("gs"));
    }

    #[tokio::test]
    async fn execute_nonexistent_tool() {
        let result = ToolCommand::new(PathBuf::from("nonexistent_tool_xyz_12345"))
            .execute()
            .await;
        match result {
            Err(Error::Launch { tool, .. }) => assert_eq!(tool, "nonexistent_tool_xyz_12345"),
            other => panic!("expected launch failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_echo() {
        let output = ToolCommand::new(PathBuf::from("echo"))
            .arg("hello")
            .execute()
            .await;

        match output {
            Ok(out) => {
                assert!(out.status.success());
                assert!(out.stdout.trim().contains("hello"));
            }
            Err(_) => {
                // On some minimal environments echo may not exist; skip.
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_argument_passes_through() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"caf\xe9.pdf");
        let output = ToolCommand::new(PathBuf::from("sh"))
            .args(["-c", "printf '%s' \"$0\" | od -An -tx1"])
            .arg(raw)
            .execute()
            .await
            .unwrap();

        let hex: String = output.stdout.split_whitespace().collect();
        assert_eq!(hex, "636166e92e706466");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_keeps_code_and_stderr() {
        let result = ToolCommand::new(PathBuf::from("sh"))
            .args(["-c", "echo broken >&2; exit 7"])
            .execute()
            .await;

        match result {
            Err(Error::Tool { code, stderr, .. }) => {
                assert_eq!(code, Some(7));
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("expected tool failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_fires() {
        let result = ToolCommand::new(PathBuf::from("sleep"))
            .arg("10")
            .timeout(Duration::from_millis(100))
            .execute()
            .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
