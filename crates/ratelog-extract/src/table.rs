//! Rate-table extraction.
//!
//! The rates page is a whitespace-delimited table: one header line naming
//! the rate columns, then one line per currency. Data lines are matched
//! against a declarative field layout ([`ROW_FIELDS`]) interpreted by a
//! whitespace tokenizer; anything that does not fit the layout exactly is
//! a footer or separator and is skipped.

use ratelog_types::ColumnSet;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// The fixed base currency every published pair is quoted against.
pub const BASE_CURRENCY: &str = "INR";

/// Number of rate columns in every published table.
pub const RATE_COLUMNS: usize = 8;

/// Header tokens look like `TT BUY`: a short uppercase code plus a side.
static HEADER_TOKEN: OnceLock<Regex> = OnceLock::new();

fn header_token() -> &'static Regex {
    HEADER_TOKEN.get_or_init(|| Regex::new(r"[A-Z]{2,4} (?:BUY|SELL)").expect("valid pattern"))
}

/// Errors that can occur while extracting the rate table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The rates page has no text at all.
    #[error("Rate table page is empty")]
    EmptyPage,

    /// The header line did not yield the expected number of rate columns.
    #[error("Header line yielded {0} rate columns, expected {RATE_COLUMNS}")]
    HeaderColumns(usize),

    /// The header was read but no data line matched the row layout.
    #[error("No data line matched the rate row layout")]
    NoRateRows,
}

/// Shape of one whitespace-delimited field in a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A run of letters (part of a currency display name).
    Text,
    /// `<CODE>/<BASE>` with the fixed base currency.
    CurrencyPair,
    /// 1-3 integer digits, optionally a dot and 1-2 fractional digits.
    Decimal,
}

impl FieldShape {
    fn matches(self, token: &str) -> bool {
        match self {
            Self::Text => !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()),
            Self::CurrencyPair => token
                .split_once('/')
                .is_some_and(|(code, base)| !code.is_empty() && base == BASE_CURRENCY),
            Self::Decimal => is_bounded_decimal(token),
        }
    }
}

/// One named field of the row layout.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// What the field holds, for diagnostics and documentation.
    pub name: &'static str,
    /// The shape a token must have to fill the field.
    pub shape: FieldShape,
}

/// The fixed layout of a data row.
///
/// The leading name field may span several tokens; every later field is a
/// single token, so a matching line carries exactly [`RATE_COLUMNS`] numeric
/// fields after the pair, no fewer and no more.
pub const ROW_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "currency name",
        shape: FieldShape::Text,
    },
    FieldSpec {
        name: "currency pair",
        shape: FieldShape::CurrencyPair,
    },
    FieldSpec {
        name: "rate 1",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 2",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 3",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 4",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 5",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 6",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 7",
        shape: FieldShape::Decimal,
    },
    FieldSpec {
        name: "rate 8",
        shape: FieldShape::Decimal,
    },
];

/// One extracted data row: the currency code and its rate texts in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRow {
    /// Currency code, the left portion of the pair token.
    pub currency: String,
    /// The eight numeric fields, preserved as their original text.
    pub values: Vec<String>,
}

/// The extracted table: derived column labels plus all matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    /// Column labels derived from the header line (`DATE` first).
    pub columns: ColumnSet,
    /// All data rows that matched the row layout, in document order.
    pub rows: Vec<RateRow>,
}

/// Extracts the rate table from the rates page.
///
/// The first line is the header line; every later line is a candidate data
/// line. Non-matching lines after the header are ignored.
///
/// # Errors
///
/// Returns an error if the page is empty, the header does not carry exactly
/// [`RATE_COLUMNS`] rate labels, or no data line matches the row layout.
pub fn parse_table(page: &str) -> Result<RateTable, TableError> {
    let mut lines = page.lines();
    let header = lines.next().ok_or(TableError::EmptyPage)?;

    let labels: Vec<String> = header_token()
        .find_iter(header)
        .map(|m| m.as_str().to_string())
        .collect();
    if labels.len() != RATE_COLUMNS {
        return Err(TableError::HeaderColumns(labels.len()));
    }

    let columns = ColumnSet::from_rate_labels(labels);
    let rows: Vec<RateRow> = lines.filter_map(parse_row).collect();
    if rows.is_empty() {
        return Err(TableError::NoRateRows);
    }

    Ok(RateTable { columns, rows })
}

/// Matches one candidate line against [`ROW_FIELDS`].
///
/// Returns `None` for any line that does not fit the layout exactly; such
/// lines are not errors, only non-data text.
fn parse_row(line: &str) -> Option<RateRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < ROW_FIELDS.len() {
        return None;
    }

    // Only the leading name field is variable-width: it absorbs whatever
    // the single-token fields leave over.
    let name_width = tokens.len() - (ROW_FIELDS.len() - 1);
    let (name, rest) = tokens.split_at(name_width);

    let name_shape = ROW_FIELDS[0].shape;
    if !name.iter().all(|t| name_shape.matches(t)) {
        return None;
    }
    for (spec, token) in ROW_FIELDS[1..].iter().zip(rest) {
        if !spec.shape.matches(token) {
            return None;
        }
    }

    let (currency, _) = rest[0].split_once('/')?;
    Some(RateRow {
        currency: currency.to_string(),
        values: rest[1..].iter().map(|v| (*v).to_string()).collect(),
    })
}

/// Checks the bounded-decimal shape: 1-3 integer digits, optionally a dot
/// and 1-2 fractional digits.
fn is_bounded_decimal(token: &str) -> bool {
    let (int, frac) = match token.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (token, None),
    };
    (1..=3).contains(&int.len())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.is_none_or(|f| (1..=2).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "TT BUY TT SELL BILL BUY BILL SELL FTC BUY FTC SELL CN BUY CN SELL";

    #[test]
    fn test_row_layout() {
        assert_eq!(ROW_FIELDS.len(), 2 + RATE_COLUMNS);
        assert_eq!(ROW_FIELDS[0].name, "currency name");
        assert_eq!(ROW_FIELDS[1].name, "currency pair");
        assert!(
            ROW_FIELDS[2..]
                .iter()
                .all(|f| f.shape == FieldShape::Decimal)
        );
    }

    #[test]
    fn test_header_labels() {
        let page = format!("{HEADER}\nUS Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80");
        let table = parse_table(&page).unwrap();
        assert_eq!(
            table.columns.columns()[..3],
            ["DATE".to_string(), "TT BUY".to_string(), "TT SELL".to_string()]
        );
        assert_eq!(table.columns.len(), 1 + RATE_COLUMNS);
    }

    #[test]
    fn test_row_extraction() {
        let line = "US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80";
        let row = parse_row(line).unwrap();
        assert_eq!(row.currency, "USD");
        assert_eq!(row.values.len(), 8);
        assert_eq!(row.values[0], "82.10");
        assert_eq!(row.values[7], "82.80");
    }

    #[test]
    fn test_multi_word_currency_name() {
        let line = "Saudi Arabian Riyal SAR/INR 21.90 22.10 21.85 22.15 21.80 22.20 21.75 22.25";
        let row = parse_row(line).unwrap();
        assert_eq!(row.currency, "SAR");
    }

    #[test]
    fn test_seven_rates_is_not_a_row() {
        let line = "US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80";
        assert_eq!(parse_row(line), None);
    }

    #[test]
    fn test_nine_rates_is_not_a_row() {
        let line = "US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80 82.90";
        assert_eq!(parse_row(line), None);
    }

    #[test]
    fn test_wrong_base_is_not_a_row() {
        let line = "US Dollar USD/USD 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80";
        assert_eq!(parse_row(line), None);
    }

    #[test]
    fn test_rate_text_is_preserved_verbatim() {
        let line = "Japanese Yen JPY/INR 0.55 0.57 0.54 0.58 0.53 0.59 0.52 0.60";
        let row = parse_row(line).unwrap();
        // "0.55" must not become "0.550000000000000" through a float.
        assert_eq!(row.values[0], "0.55");
    }

    #[test]
    fn test_bounded_decimal_shapes() {
        assert!(is_bounded_decimal("82"));
        assert!(is_bounded_decimal("82.5"));
        assert!(is_bounded_decimal("82.50"));
        assert!(is_bounded_decimal("0.55"));
        assert!(!is_bounded_decimal("82.505"));
        assert!(!is_bounded_decimal("1234"));
        assert!(!is_bounded_decimal(".5"));
        assert!(!is_bounded_decimal("82."));
        assert!(!is_bounded_decimal("8a"));
    }

    #[test]
    fn test_footer_lines_are_skipped() {
        let page = format!(
            "{HEADER}\n\
             US Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80\n\
             Rates are subject to change without notice\n\
             Euro EUR/INR 89.10 89.50 89.00 89.60 88.90 89.70 88.80 89.80"
        );
        let table = parse_table(&page).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].currency, "EUR");
    }

    #[test]
    fn test_no_matching_rows_is_an_error() {
        let page = format!("{HEADER}\nno data here\nnothing at all");
        assert_eq!(parse_table(&page), Err(TableError::NoRateRows));
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(parse_table(""), Err(TableError::EmptyPage));
    }

    #[test]
    fn test_header_without_enough_labels() {
        let page = "TT BUY TT SELL\nUS Dollar USD/INR 82.10 82.50 82.00 82.60 81.90 82.70 81.80 82.80";
        assert_eq!(parse_table(page), Err(TableError::HeaderColumns(2)));
    }
}
