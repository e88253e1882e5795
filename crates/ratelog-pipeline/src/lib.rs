//! Per-document orchestration and batch backfill for ratelog.
//!
//! One document flows through decode → timestamp resolution → row parsing →
//! one merge per currency. Failures are caught at the per-document (or
//! per-currency-merge) boundary and logged, so a bad document never takes
//! down a batch run.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backfill;
mod ingest;

pub use backfill::{BackfillSummary, backfill};
pub use ingest::{IngestReport, ingest_document, ingest_file, ingest_pages};
