//! Observation merge.

use std::collections::HashMap;

use ratelog_types::{ColumnSet, RateObservation};

use crate::store::{Dataset, SeriesStore, StoreError};

/// Merges one observation into its currency's dataset.
///
/// Loads the existing dataset if there is one; its persisted header order is
/// authoritative and replaces `columns` (the order freshly derived from the
/// current document). The observation is appended, rows are deduplicated by
/// minute-precision timestamp key with the last-merged row winning, sorted
/// ascending by timestamp, and the dataset is rewritten in full. Values are
/// written under the authoritative header by label, so a reordered document
/// header cannot misalign them.
///
/// Returns the number of rows in the merged dataset.
///
/// # Errors
///
/// Returns an error if the existing dataset cannot be read, has an
/// unexpected shape, or requires a column label the observation does not
/// carry. A failed merge leaves the stored dataset untouched.
pub fn merge_observation<S: SeriesStore>(
    store: &S,
    columns: &ColumnSet,
    observation: RateObservation,
) -> Result<usize, StoreError> {
    let currency = observation.currency().to_string();

    let (columns, mut rows) = match store.load(&currency)? {
        Some(existing) => (existing.columns, existing.rows),
        None => (columns.clone(), Vec::new()),
    };

    // The new observation must be able to fill every authoritative column;
    // checked up front so nothing is written on a mismatch.
    for label in columns.rate_labels() {
        if observation.value(label).is_none() {
            return Err(StoreError::HeaderMismatch {
                label: label.clone(),
            });
        }
    }

    rows.push(observation);

    // Dedup by timestamp key; insertion order makes the appended row win.
    let mut unique: HashMap<String, RateObservation> = HashMap::with_capacity(rows.len());
    for row in rows {
        unique.insert(row.key(), row);
    }
    let mut merged: Vec<RateObservation> = unique.into_values().collect();
    merged.sort_by_key(RateObservation::timestamp);

    let count = merged.len();
    store.save(
        &currency,
        &Dataset {
            columns,
            rows: merged,
        },
    )?;
    Ok(count)
}
