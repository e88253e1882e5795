//! Rate observation representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used for dataset keys and persisted rows (minute precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single timestamped set of published rates for one currency.
///
/// Rate values are kept as the exact numeric text found in the source
/// document. They round-trip into a text-based store, and coercing them
/// through floating point would risk lossy rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateObservation {
    /// When the rates were published.
    timestamp: NaiveDateTime,
    /// Short uppercase currency code (e.g., "USD").
    currency: String,
    /// Rate-column label paired with the original numeric text, in
    /// document order.
    values: Vec<(String, String)>,
}

impl RateObservation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        currency: impl Into<String>,
        values: Vec<(String, String)>,
    ) -> Self {
        Self {
            timestamp,
            currency: currency.into(),
            values,
        }
    }

    /// Returns the observation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the identity key: the timestamp formatted to minute precision.
    ///
    /// Two observations with the same key refer to the same publication and
    /// at most one of them survives a merge.
    #[must_use]
    pub fn key(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Returns the labeled rate values in document order.
    #[must_use]
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Looks up a rate value by its column label.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for RateObservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.currency, self.key())
    }
}
