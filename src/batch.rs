//! Bounded concurrent conversion of many files.
//!
//! [`Converter`] spawns one Ghostscript process per call with no limit; this
//! module caps how many run at once with a semaphore.

use std::path::PathBuf;
use std::sync::Arc;

use pdfforge_core::{ConversionOptions, Error};
use pdfforge_gs::Converter;
use tokio::sync::Semaphore;

/// Result of converting one file in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub file: PathBuf,
    /// Ghostscript's stdout on success.
    pub result: pdfforge_core::Result<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert every file in `files` with the same options, running at most
/// `max_concurrent` Ghostscript processes at a time.
///
/// Outcomes are returned in the order of `files`. One failure does not stop
/// the others.
pub async fn convert_all(
    converter: &Converter,
    files: Vec<PathBuf>,
    options: &ConversionOptions,
    max_concurrent: usize,
) -> Vec<BatchOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for file in files {
        let sem = semaphore.clone();
        let converter = converter.clone();
        let options = options.clone();
        let task_file = file.clone();

        let handle = tokio::spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| Error::Internal(format!("batch semaphore closed: {e}")))?;
            converter.convert(&task_file, &options).await
        });
        handles.push((file, handle));
    }

    let files: Vec<PathBuf> = handles.iter().map(|(f, _)| f.clone()).collect();
    let joined = futures::future::join_all(handles.into_iter().map(|(_, h)| h)).await;

    files
        .into_iter()
        .zip(joined)
        .map(|(file, joined)| {
            let result = joined
                .unwrap_or_else(|e| Err(Error::Internal(format!("conversion task failed: {e}"))));
            match &result {
                Ok(_) => tracing::info!("converted {}", file.display()),
                Err(e) => tracing::warn!("failed to convert {}: {e}", file.display()),
            }
            BatchOutcome { file, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pdfforge_gs::GhostscriptVars;

    #[tokio::test]
    async fn empty_batch() {
        let converter = Converter::new(GhostscriptVars::with_bin_dir("/nonexistent/gs/bin"));
        let outcomes = convert_all(&converter, vec![], &ConversionOptions::default(), 4).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn missing_executable_fails_every_file_in_order() {
        let converter = Converter::new(GhostscriptVars::with_bin_dir("/nonexistent/gs/bin"));
        let files = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];

        let outcomes = convert_all(&converter, files.clone(), &ConversionOptions::default(), 0).await;

        assert_eq!(
            outcomes.iter().map(|o| o.file.clone()).collect::<Vec<_>>(),
            files
        );
        for outcome in &outcomes {
            assert!(!outcome.is_ok());
            assert_matches!(outcome.result, Err(Error::Launch { .. }));
        }
    }

    #[cfg(unix)]
    fn fake_ghostscript(dir: &std::path::Path, script: &str) -> Converter {
        use std::os::unix::fs::PermissionsExt;

        let exe = dir.join("gswin64c");
        std::fs::write(&exe, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        Converter::new(GhostscriptVars::with_bin_dir(dir))
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        // Fail only for the file named bad.pdf (the last argument).
        let converter = fake_ghostscript(
            dir.path(),
            r#"for last; do :; done
case "$last" in *bad.pdf) echo broken >&2; exit 1;; esac
echo ok"#,
        );
        let files = vec![
            PathBuf::from("good.pdf"),
            PathBuf::from("bad.pdf"),
            PathBuf::from("fine.pdf"),
        ];

        let outcomes = convert_all(&converter, files, &ConversionOptions::default(), 2).await;

        assert!(outcomes[0].is_ok());
        assert_matches!(outcomes[1].result, Err(Error::Tool { code: Some(1), .. }));
        assert!(outcomes[2].is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn single_slot_runs_serially() {
        let dir = tempfile::tempdir().unwrap();
        let converter = fake_ghostscript(dir.path(), "sleep 0.2");
        let files = vec![
            PathBuf::from("a.pdf"),
            PathBuf::from("b.pdf"),
            PathBuf::from("c.pdf"),
        ];

        let started = std::time::Instant::now();
        let outcomes = convert_all(&converter, files, &ConversionOptions::default(), 1).await;

        assert!(outcomes.iter().all(BatchOutcome::is_ok));
        assert!(started.elapsed() >= std::time::Duration::from_millis(600));
    }
}
