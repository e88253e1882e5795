//! Document text decoding.

use thiserror::Error;

/// Errors that can occur while decoding a document into text pages.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The document bytes could not be decoded.
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// The document has fewer pages than the rates layout requires.
    #[error("Document has {0} page(s), expected at least 2")]
    MissingPages(usize),
}

/// Plain-text content of the two pages a rates document consists of.
///
/// Held only for the duration of one document's processing; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPages {
    /// Page 1: publication metadata, including the Date and Time lines.
    pub metadata: String,
    /// Page 2: the rate table.
    pub rates: String,
}

impl DocumentPages {
    /// Creates document pages from already-decoded text.
    #[must_use]
    pub fn new(metadata: impl Into<String>, rates: impl Into<String>) -> Self {
        Self {
            metadata: metadata.into(),
            rates: rates.into(),
        }
    }
}

/// Decodes a paginated binary document into the two text pages.
///
/// Each page's text is normalized: lines are trimmed and blank lines are
/// dropped, so the first line of the rates page is the table header line.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable document or fewer than
/// two pages are present.
pub fn decode_pages(bytes: &[u8]) -> Result<DocumentPages, DecodeError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| DecodeError::Decode(e.to_string()))?;

    if pages.len() < 2 {
        return Err(DecodeError::MissingPages(pages.len()));
    }

    Ok(DocumentPages {
        metadata: clean_text(&pages[0]),
        rates: clean_text(&pages[1]),
    })
}

/// Trims extraction artifacts: surrounding whitespace per line, blank lines.
fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_drops_blank_lines() {
        let dirty = "  Line 1  \n\n\n  Line 2  \n  \n  Line 3  ";
        assert_eq!(clean_text(dirty), "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_pages(b"not a document");
        assert!(matches!(result, Err(DecodeError::Decode(_))));
    }
}
