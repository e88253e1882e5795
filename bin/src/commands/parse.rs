//! Parse command implementation.

use anyhow::Result;
use ratelog_pipeline::ingest_file;
use ratelog_store::CsvSeriesStore;
use std::path::Path;
use tracing::{error, info};

/// Ingest one local document file.
pub(crate) fn parse(store: &CsvSeriesStore, file: &Path) -> Result<()> {
    info!(path = %file.display(), "ingesting document");

    match ingest_file(file, store) {
        Ok(report) => {
            info!(
                timestamp = %report.timestamp.format("%Y-%m-%d %H:%M"),
                merged = report.merged.len(),
                failed = report.failed.len(),
                "document ingested"
            );
        }
        Err(e) => {
            error!(path = %file.display(), error = %e, "failed to ingest document");
        }
    }

    Ok(())
}
