//! Fetch command implementation.
//!
//! Downloads the latest published document, archives the raw bytes, and
//! runs the ingestion pipeline. Per the single-document contract, an
//! ingestion failure is logged rather than surfaced as a process error.

use anyhow::{Context, Result};
use ratelog_fetch::{DownloadClient, RATES_URL, archive_document};
use ratelog_pipeline::ingest_document;
use ratelog_store::CsvSeriesStore;
use std::path::Path;
use tracing::{error, info};

/// Download, archive, and ingest the latest rates document.
pub(crate) async fn fetch(store: &CsvSeriesStore, archive_dir: &Path, archive: bool) -> Result<()> {
    let client = DownloadClient::with_defaults().context("Failed to build HTTP client")?;

    info!(url = RATES_URL, "downloading latest rates document");
    let bytes = client
        .download_latest()
        .await
        .context("Failed to download rates document")?;
    info!(bytes = bytes.len(), "downloaded rates document");

    if archive {
        // Archived under today's date; the raw bytes are kept even when
        // they later turn out to be unparseable.
        let today = chrono::Local::now().date_naive();
        let path = archive_document(archive_dir, today, &bytes)
            .context("Failed to archive raw document")?;
        info!(path = %path.display(), "archived raw document");
    }

    match ingest_document(&bytes, store) {
        Ok(report) => {
            info!(
                timestamp = %report.timestamp.format("%Y-%m-%d %H:%M"),
                merged = report.merged.len(),
                failed = report.failed.len(),
                "document ingested"
            );
        }
        Err(e) => {
            error!(error = %e, "failed to ingest downloaded document");
        }
    }

    Ok(())
}
