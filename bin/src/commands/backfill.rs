//! Backfill command implementation.

use anyhow::{Context, Result};
use ratelog_store::CsvSeriesStore;
use std::path::Path;

/// Re-ingest every archived document under the given directory tree.
pub(crate) fn backfill(store: &CsvSeriesStore, dir: &Path) -> Result<()> {
    ratelog_pipeline::backfill(dir, store)
        .with_context(|| format!("Failed to walk archive tree {}", dir.display()))?;
    Ok(())
}
