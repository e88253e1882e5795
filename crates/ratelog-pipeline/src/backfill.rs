//! Batch backfill over an archive tree.

use std::io;
use std::path::{Path, PathBuf};

use glob::glob;
use ratelog_store::SeriesStore;
use ratelog_types::{RatelogError, Result};
use tracing::{error, info, warn};

use crate::ingest::ingest_file;

/// Outcome of a backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackfillSummary {
    /// Documents ingested successfully.
    pub processed: usize,
    /// Documents skipped after an error (each logged with its cause).
    pub failed: usize,
}

/// Re-ingests every archived document under `archive_root`.
///
/// Documents are processed in lexicographically sorted path order, each
/// independently: a failure is logged and counted, then the run moves on to
/// the next document.
///
/// # Errors
///
/// Returns an error only if the archive tree itself cannot be enumerated;
/// per-document failures never propagate.
pub fn backfill<S: SeriesStore>(archive_root: &Path, store: &S) -> Result<BackfillSummary> {
    let pattern = format!("{}/**/*.pdf", archive_root.display());
    let entries = glob(&pattern)
        .map_err(|e| RatelogError::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "unreadable archive entry skipped");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    info!(documents = paths.len(), root = %archive_root.display(), "starting backfill");

    let mut summary = BackfillSummary::default();
    for path in paths {
        match ingest_file(&path, store) {
            Ok(report) => {
                info!(
                    path = %path.display(),
                    timestamp = %report.timestamp.format("%Y-%m-%d %H:%M"),
                    merged = report.merged.len(),
                    failed = report.failed.len(),
                    "document ingested"
                );
                summary.processed += 1;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "document skipped");
                summary.failed += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        failed = summary.failed,
        "backfill finished"
    );
    Ok(summary)
}
