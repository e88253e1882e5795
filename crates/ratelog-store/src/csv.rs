//! CSV-file-backed series store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use ratelog_types::{ColumnSet, RateObservation, TIMESTAMP_FORMAT};

use crate::store::{Dataset, SeriesStore, StoreError};

/// Prefix of every dataset file name; the currency code and `.csv` follow.
pub const FILE_PREFIX: &str = "SBI_REFERENCE_RATES_";

/// A [`SeriesStore`] keeping one CSV file per currency in a fixed directory.
///
/// Saves rewrite the whole file through a temporary sibling and an atomic
/// rename, so a concurrent reader never observes a partial dataset.
#[derive(Debug, Clone)]
pub struct CsvSeriesStore {
    dir: PathBuf,
}

impl CsvSeriesStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created on the first save, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the dataset file path for a currency code.
    #[must_use]
    pub fn dataset_path(&self, currency: &str) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{currency}.csv"))
    }

    fn corrupt(path: &Path, message: impl Into<String>) -> StoreError {
        StoreError::Corrupt {
            name: path.display().to_string(),
            message: message.into(),
        }
    }
}

impl SeriesStore for CsvSeriesStore {
    fn load(&self, currency: &str) -> Result<Option<Dataset>, StoreError> {
        let path = self.dataset_path(currency);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let columns = ColumnSet::from_columns(header)
            .ok_or_else(|| Self::corrupt(&path, "header row does not start with DATE"))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() != columns.len() {
                return Err(Self::corrupt(
                    &path,
                    format!(
                        "row has {} fields but the header has {}",
                        record.len(),
                        columns.len()
                    ),
                ));
            }

            let timestamp = NaiveDateTime::parse_from_str(&record[0], TIMESTAMP_FORMAT)
                .map_err(|e| Self::corrupt(&path, format!("bad timestamp {:?}: {e}", &record[0])))?;
            let values = columns
                .rate_labels()
                .iter()
                .cloned()
                .zip(record.iter().skip(1).map(str::to_string))
                .collect();
            rows.push(RateObservation::new(timestamp, currency, values));
        }

        Ok(Some(Dataset { columns, rows }))
    }

    fn save(&self, currency: &str, dataset: &Dataset) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dataset_path(currency);
        let tmp = path.with_extension("csv.tmp");

        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            writer.write_record(dataset.columns.columns())?;
            for observation in &dataset.rows {
                let mut record = vec![observation.key()];
                for label in dataset.columns.rate_labels() {
                    let value = observation.value(label).ok_or_else(|| {
                        StoreError::HeaderMismatch {
                            label: label.clone(),
                        }
                    })?;
                    record.push(value.to_string());
                }
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }

        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
