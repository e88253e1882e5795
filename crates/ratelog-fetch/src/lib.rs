//! Document retrieval and raw archival for ratelog.
//!
//! This crate covers the two collaborators around the extraction core:
//!
//! - [`DownloadClient`] - HTTP client with retries for the published document
//! - [`archive_document`] - Writes the untouched byte stream to dated storage

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod archive;
mod client;

pub use archive::{archive_document, archive_path};
pub use client::{ClientConfig, DownloadClient, DownloadError, RATES_URL};
