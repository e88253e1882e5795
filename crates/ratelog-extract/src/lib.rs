//! Document text decoding and rate-table extraction for ratelog.
//!
//! This crate turns the published two-page rates document into typed
//! records:
//!
//! - [`decode_pages`] - Decodes the paginated binary document into plain text
//! - [`resolve_timestamp`] - Combines the Date/Time marker lines into one timestamp
//! - [`parse_table`] - Extracts the column labels and one record per currency row

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod document;
mod table;
mod timestamp;

pub use document::{DecodeError, DocumentPages, decode_pages};
pub use table::{
    BASE_CURRENCY, FieldShape, FieldSpec, RATE_COLUMNS, ROW_FIELDS, RateRow, RateTable,
    TableError, parse_table,
};
pub use timestamp::{TimestampError, resolve_timestamp};
