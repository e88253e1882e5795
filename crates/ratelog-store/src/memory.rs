//! In-memory series store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::{Dataset, SeriesStore, StoreError};

/// A [`SeriesStore`] backed by a map, for exercising the merge algorithm
/// without touching disk.
#[derive(Debug, Default)]
pub struct MemorySeriesStore {
    datasets: Mutex<HashMap<String, Dataset>>,
}

impl MemorySeriesStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currencies with a stored dataset, in arbitrary order.
    #[must_use]
    pub fn currencies(&self) -> Vec<String> {
        self.datasets
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl SeriesStore for MemorySeriesStore {
    fn load(&self, currency: &str) -> Result<Option<Dataset>, StoreError> {
        let datasets = self.datasets.lock().expect("store mutex poisoned");
        Ok(datasets.get(currency).cloned())
    }

    fn save(&self, currency: &str, dataset: &Dataset) -> Result<(), StoreError> {
        let mut datasets = self.datasets.lock().expect("store mutex poisoned");
        datasets.insert(currency.to_string(), dataset.clone());
        Ok(())
    }
}
