//! Series storage abstraction.

use ratelog_types::{ColumnSet, RateObservation};
use thiserror::Error;

/// Errors that can occur while loading or saving a dataset.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An existing dataset file has an unexpected shape.
    #[error("Dataset {name} is malformed: {message}")]
    Corrupt {
        /// The dataset (file) that failed.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// An observation cannot supply a column required by the
    /// authoritative header.
    #[error("Observation is missing required column {label:?}")]
    HeaderMismatch {
        /// The column label that could not be resolved.
        label: String,
    },
}

/// The full time series for one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Column labels, `DATE` first. For a loaded dataset this is the
    /// persisted, authoritative order.
    pub columns: ColumnSet,
    /// Observations in stored order (ascending by timestamp after a merge).
    pub rows: Vec<RateObservation>,
}

/// Storage for per-currency datasets.
///
/// The merge algorithm only ever reads a whole dataset and writes a whole
/// dataset back, so implementations are free to choose the medium; tests
/// run against [`crate::MemorySeriesStore`].
pub trait SeriesStore {
    /// Loads the dataset for a currency, or `None` if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset exists but cannot be read or has an
    /// unexpected shape.
    fn load(&self, currency: &str) -> Result<Option<Dataset>, StoreError>;

    /// Replaces the dataset for a currency in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be written; a failed save
    /// must not leave a partially written dataset visible.
    fn save(&self, currency: &str, dataset: &Dataset) -> Result<(), StoreError>;
}
