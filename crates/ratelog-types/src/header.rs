//! Dataset column headers.

use serde::{Deserialize, Serialize};

/// Name of the fixed leading timestamp column.
pub const DATE_COLUMN: &str = "DATE";

/// Ordered column labels of a per-currency dataset.
///
/// The first column is always [`DATE_COLUMN`]; the remaining labels are the
/// rate columns scanned from the document header line (e.g. `TT BUY`,
/// `TT SELL`). Once a dataset file exists, the order persisted in it is
/// authoritative and replaces any freshly derived order on merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<String>,
}

impl ColumnSet {
    /// Builds a column set from rate-column labels, prefixing [`DATE_COLUMN`].
    #[must_use]
    pub fn from_rate_labels(labels: impl IntoIterator<Item = String>) -> Self {
        let mut columns = vec![DATE_COLUMN.to_string()];
        columns.extend(labels);
        Self { columns }
    }

    /// Builds a column set from a full persisted header row.
    ///
    /// Returns `None` if the row does not start with [`DATE_COLUMN`] or has
    /// no rate columns at all.
    #[must_use]
    pub fn from_columns(columns: Vec<String>) -> Option<Self> {
        if columns.first().map(String::as_str) != Some(DATE_COLUMN) || columns.len() < 2 {
            return None;
        }
        Some(Self { columns })
    }

    /// Returns all columns including the leading timestamp column.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rate-column labels (everything after the timestamp column).
    #[must_use]
    pub fn rate_labels(&self) -> &[String] {
        &self.columns[1..]
    }

    /// Returns the total number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the set holds no columns.
    ///
    /// Always false for a constructed set; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl std::fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.columns.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rate_labels_prefixes_date() {
        let set = ColumnSet::from_rate_labels(vec!["TT BUY".to_string(), "TT SELL".to_string()]);
        assert_eq!(set.columns(), ["DATE", "TT BUY", "TT SELL"]);
        assert_eq!(set.rate_labels(), ["TT BUY", "TT SELL"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_from_columns_requires_date_first() {
        let ok = ColumnSet::from_columns(vec!["DATE".to_string(), "TT BUY".to_string()]);
        assert!(ok.is_some());

        let wrong_first = ColumnSet::from_columns(vec!["TT BUY".to_string(), "DATE".to_string()]);
        assert!(wrong_first.is_none());

        let no_rates = ColumnSet::from_columns(vec!["DATE".to_string()]);
        assert!(no_rates.is_none());
    }

    #[test]
    fn test_display_is_csv_header() {
        let set = ColumnSet::from_rate_labels(vec!["TT BUY".to_string()]);
        assert_eq!(set.to_string(), "DATE,TT BUY");
    }
}
