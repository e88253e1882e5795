//! Raw document archival.
//!
//! Every downloaded document is kept untouched under a tree keyed by year
//! and month, so the whole history can be re-parsed later (see the backfill
//! pipeline). Month directories are zero-padded, which keeps a
//! lexicographic walk of the tree in chronological order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Returns the archive path for a document published on `date`:
/// `<root>/<YYYY>/<MM>/<YYYY-MM-DD>.pdf`.
#[must_use]
pub fn archive_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(format!("{}.pdf", date.format("%Y-%m-%d")))
}

/// Writes the raw document bytes to their archive location, creating
/// directories as needed. An existing archive file for the same date is
/// replaced.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn archive_document(root: &Path, date: NaiveDate, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = archive_path(root, date);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, bytes)?;
    Ok(path)
}
