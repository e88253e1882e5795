//! Core types for the ratelog reference-rate archiver.
//!
//! This crate provides the fundamental data structures used throughout
//! ratelog:
//!
//! - [`RateObservation`] - One timestamped set of published rates for a currency
//! - [`ColumnSet`] - The ordered column labels of a persisted dataset
//! - [`RatelogError`] - The shared error taxonomy

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod header;
mod observation;

pub use error::{RatelogError, Result};
pub use header::{ColumnSet, DATE_COLUMN};
pub use observation::{RateObservation, TIMESTAMP_FORMAT};
