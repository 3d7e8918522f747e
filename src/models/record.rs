//! Record abstraction shared by the sales and expenses tables
//!
//! A [`Record`] knows its canonical CSV columns, how to build itself from a raw
//! CSV row (coercing dates and the amount), and how to write itself back.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use super::money::MoneyParseError;
use super::Money;

/// Date layouts accepted when coercing date columns, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Date-time layouts whose date part is kept
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Layout used when writing dates back to CSV
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row type persisted in a CSV history table
pub trait Record: Clone + fmt::Debug {
    /// Columns a report may group by
    type Column: Copy + fmt::Debug;

    /// Short name used in logs and export filenames
    const NAME: &'static str;

    /// Canonical header row, in file order
    const HEADERS: &'static [&'static str];

    /// Header of the amount column
    const AMOUNT_HEADER: &'static str;

    /// The amount summed by reports
    fn amount(&self) -> Money;

    /// String value of a column, compared by exact equality when grouping
    fn value(&self, column: Self::Column) -> String;

    /// Build a record from a raw CSV row
    fn from_row(row: &RawRow<'_>) -> Result<Self, RowRejection>;

    /// Fields in [`Record::HEADERS`] order
    fn to_row(&self) -> Vec<String>;
}

/// A CSV row addressed by header name
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    headers: &'a [String],
    values: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(headers: &'a [String], values: &'a StringRecord) -> Self {
        Self { headers, values }
    }

    /// Trimmed value of a column; `None` when the column is absent or blank
    pub fn get(&self, header: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == header)?;
        self.values
            .get(index)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Value of a column, empty string when absent
    pub fn text(&self, header: &str) -> String {
        self.get(header).unwrap_or_default().to_string()
    }

    /// True when every field of the row is blank
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// Coerce the amount column; the row is rejected when it is missing or not numeric
    pub fn amount(&self, header: &str) -> Result<Money, RowRejection> {
        let raw = self.get(header).ok_or(RowRejection::MissingAmount)?;
        Money::parse(raw).map_err(|e| match e {
            MoneyParseError::OutOfRange(_) => RowRejection::AmountOutOfRange(raw.to_string()),
            MoneyParseError::InvalidFormat(_) => RowRejection::InvalidAmount(raw.to_string()),
        })
    }

    /// Coerce a date column; unparsable values become `None`
    pub fn date(&self, header: &str) -> Option<NaiveDate> {
        self.get(header).and_then(parse_date)
    }
}

/// Why a raw row was dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// Every field was blank
    Blank,
    /// The amount column was empty
    MissingAmount,
    /// The amount column was not a number
    InvalidAmount(String),
    /// The amount was too large to sum safely
    AmountOutOfRange(String),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "row is empty"),
            Self::MissingAmount => write!(f, "amount is missing"),
            Self::InvalidAmount(raw) => write!(f, "amount '{}' is not a number", raw),
            Self::AmountOutOfRange(raw) => write!(f, "amount '{}' is out of range", raw),
        }
    }
}

/// Parse a date in any of the accepted layouts
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Format an optional date for storage; missing dates are written blank
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(STORAGE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Date".to_string(), "Amount".to_string()]
    }

    #[test]
    fn test_parse_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 10);
        assert_eq!(parse_date("2025-01-10"), expected);
        assert_eq!(parse_date("10/01/2025"), expected);
        assert_eq!(parse_date("10-01-2025"), expected);
        assert_eq!(parse_date("2025-01-10 00:00:00"), expected);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_raw_row_access() {
        let headers = headers();
        let values = StringRecord::from(vec![" 2025-01-10 ", "150.00"]);
        let row = RawRow::new(&headers, &values);

        assert_eq!(row.get("Date"), Some("2025-01-10"));
        assert_eq!(row.get("Partner"), None);
        assert_eq!(row.amount("Amount").unwrap(), Money::from_cents(15000));
        assert!(!row.is_blank());
    }

    #[test]
    fn test_raw_row_amount_rejections() {
        let headers = headers();
        let bad = StringRecord::from(vec!["2025-01-10", "abc"]);
        let missing = StringRecord::from(vec!["2025-01-10", ""]);

        assert_eq!(
            RawRow::new(&headers, &bad).amount("Amount"),
            Err(RowRejection::InvalidAmount("abc".into()))
        );
        assert_eq!(
            RawRow::new(&headers, &missing).amount("Amount"),
            Err(RowRejection::MissingAmount)
        );

        let decimal_comma = StringRecord::from(vec!["2025-01-10", "150,50"]);
        assert_eq!(
            RawRow::new(&headers, &decimal_comma).amount("Amount"),
            Err(RowRejection::InvalidAmount("150,50".into()))
        );
    }

    #[test]
    fn test_blank_row() {
        let headers = headers();
        let values = StringRecord::from(vec!["", "  "]);
        assert!(RawRow::new(&headers, &values).is_blank());
    }
}
