//! Single-document ingestion.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use ratelog_extract::{
    DocumentPages, RateTable, TableError, decode_pages, parse_table, resolve_timestamp,
};
use ratelog_store::{SeriesStore, merge_observation};
use ratelog_types::{RateObservation, RatelogError, Result};
use tracing::{debug, error};

/// Outcome of ingesting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// The resolved observation timestamp.
    pub timestamp: NaiveDateTime,
    /// Currencies whose dataset was merged successfully.
    pub merged: Vec<String>,
    /// Currencies whose merge failed (logged; the rest still went through).
    pub failed: Vec<String>,
}

/// Ingests one raw document: decodes it to text pages and runs
/// [`ingest_pages`].
///
/// # Errors
///
/// Returns an error if the document cannot be decoded, its timestamp cannot
/// be resolved, or no rate row matches. Per-currency merge failures do not
/// error; they are reported in [`IngestReport::failed`].
pub fn ingest_document<S: SeriesStore>(bytes: &[u8], store: &S) -> Result<IngestReport> {
    let pages = decode_pages(bytes).map_err(|e| RatelogError::Document(e.to_string()))?;
    ingest_pages(&pages, store)
}

/// Ingests one archived document file.
///
/// # Errors
///
/// Same as [`ingest_document`], plus I/O errors reading the file.
pub fn ingest_file<S: SeriesStore>(path: &Path, store: &S) -> Result<IngestReport> {
    let bytes = fs::read(path)?;
    ingest_document(&bytes, store)
}

/// Ingests already-decoded text pages.
///
/// Resolves the observation timestamp from the metadata page, extracts the
/// rate table, and merges one observation per matched currency row. Merge
/// failures are isolated per currency: one corrupt dataset never blocks the
/// other currencies of the same document.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be resolved or no rate row
/// matches; in both cases no merge has been attempted.
pub fn ingest_pages<S: SeriesStore>(pages: &DocumentPages, store: &S) -> Result<IngestReport> {
    let timestamp = resolve_timestamp(&pages.metadata)
        .map_err(|e| RatelogError::Timestamp(e.to_string()))?;
    debug!(timestamp = %timestamp.format("%Y-%m-%d %H:%M"), "resolved observation timestamp");

    let RateTable { columns, rows } = parse_table(&pages.rates).map_err(|e| match e {
        TableError::NoRateRows => RatelogError::NoRateRows,
        other => RatelogError::Document(other.to_string()),
    })?;
    debug!(rows = rows.len(), columns = %columns, "parsed rate table");

    let mut merged = Vec::new();
    let mut failed = Vec::new();
    for row in rows {
        let values: Vec<(String, String)> = columns
            .rate_labels()
            .iter()
            .cloned()
            .zip(row.values)
            .collect();
        let observation = RateObservation::new(timestamp, row.currency.clone(), values);

        match merge_observation(store, &columns, observation) {
            Ok(count) => {
                debug!(currency = %row.currency, rows = count, "merged observation");
                merged.push(row.currency);
            }
            Err(e) => {
                error!(currency = %row.currency, error = %e, "merge failed");
                failed.push(row.currency);
            }
        }
    }

    Ok(IngestReport {
        timestamp,
        merged,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelog_store::{Dataset, MemorySeriesStore};
    use ratelog_types::ColumnSet;

    const METADATA_PAGE: &str = "FOREX CARD RATES\nDate: 01-03-2024\nTime: 10:15";
    const HEADER: &str = "TT BUY TT SELL BILL BUY BILL SELL FTC BUY FTC SELL CN BUY CN SELL";

    fn pages(rates: &str) -> DocumentPages {
        DocumentPages::new(METADATA_PAGE, rates)
    }

    #[test]
    fn test_end_to_end_single_document() {
        let store = MemorySeriesStore::new();
        let rates = format!(
            "{HEADER}\n\
             US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80\n\
             Euro EUR/INR 89.10 89.50 89.00 89.60 88.90 89.70 88.80 89.80"
        );

        let report = ingest_pages(&pages(&rates), &store).unwrap();

        assert_eq!(report.merged, ["USD", "EUR"]);
        assert!(report.failed.is_empty());

        let usd = store.load("USD").unwrap().unwrap();
        assert_eq!(usd.rows.len(), 1);
        assert_eq!(usd.rows[0].key(), "2024-03-01 10:15");
        assert_eq!(usd.rows[0].value("TT BUY"), Some("82.10"));
        assert_eq!(usd.rows[0].value("CN SELL"), Some("82.80"));

        // The EUR observation must not leak into the USD dataset.
        let eur = store.load("EUR").unwrap().unwrap();
        assert_eq!(eur.rows.len(), 1);
        assert_eq!(eur.rows[0].value("TT BUY"), Some("89.10"));
    }

    #[test]
    fn test_dataset_file_row_format() {
        use ratelog_store::CsvSeriesStore;

        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvSeriesStore::new(dir.path());
        let rates = "USD BUY USD SELL GBP BUY GBP SELL EUR BUY EUR SELL JPY BUY JPY SELL\n\
                     US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80";

        ingest_pages(&pages(rates), &store).unwrap();

        let content = fs::read_to_string(store.dataset_path("USD")).unwrap();
        assert_eq!(
            content,
            "DATE,USD BUY,USD SELL,GBP BUY,GBP SELL,EUR BUY,EUR SELL,JPY BUY,JPY SELL\n\
             2024-03-01 10:15,82.10,82.50,82.00,82.60,81.90,82.70,81.80,82.80\n"
        );

        // Header labels naming other currencies create no datasets of
        // their own; only the USD row produced a file.
        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn test_unresolvable_timestamp_skips_document() {
        let store = MemorySeriesStore::new();
        let rates = format!(
            "{HEADER}\nUS Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80"
        );
        let pages = DocumentPages::new("no markers here", rates);

        let result = ingest_pages(&pages, &store);

        assert!(matches!(result, Err(RatelogError::Timestamp(_))));
        assert!(store.currencies().is_empty());
    }

    #[test]
    fn test_no_matching_rows_is_reported() {
        let store = MemorySeriesStore::new();
        let rates = format!("{HEADER}\nRates are indicative only");

        let result = ingest_pages(&pages(&rates), &store);

        assert!(matches!(result, Err(RatelogError::NoRateRows)));
        assert!(store.currencies().is_empty());
    }

    #[test]
    fn test_merge_failure_is_isolated_per_currency() {
        let store = MemorySeriesStore::new();

        // Seed a USD dataset whose header demands a label this document
        // cannot supply; EUR must still merge.
        store
            .save(
                "USD",
                &Dataset {
                    columns: ColumnSet::from_rate_labels(vec!["OLD BUY".to_string()]),
                    rows: Vec::new(),
                },
            )
            .unwrap();

        let rates = format!(
            "{HEADER}\n\
             US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80\n\
             Euro EUR/INR 89.10 89.50 89.00 89.60 88.90 89.70 88.80 89.80"
        );
        let report = ingest_pages(&pages(&rates), &store).unwrap();

        assert_eq!(report.failed, ["USD"]);
        assert_eq!(report.merged, ["EUR"]);
        assert_eq!(store.load("EUR").unwrap().unwrap().rows.len(), 1);
    }
}
