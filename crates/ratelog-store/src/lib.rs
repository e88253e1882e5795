//! Per-currency series storage and merge for ratelog.
//!
//! This crate persists each currency's observation history:
//!
//! - [`SeriesStore`] - Storage abstraction over per-currency datasets
//! - [`CsvSeriesStore`] - One CSV file per currency in a fixed directory
//! - [`MemorySeriesStore`] - In-memory fake for tests
//! - [`merge_observation`] - Merges one observation under the
//!   uniqueness-by-timestamp and chronological-order invariants

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod memory;
mod merge;
mod store;

pub use self::csv::{CsvSeriesStore, FILE_PREFIX};
pub use memory::MemorySeriesStore;
pub use merge::merge_observation;
pub use store::{Dataset, SeriesStore, StoreError};
