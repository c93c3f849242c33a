use chrono::{Local, NaiveDate};

use crate::StockboardError;

/// Supplies the local calendar day.
pub trait Clock: Send + Sync {
    /// Today's date in the local timezone.
    fn today(&self) -> NaiveDate;

    /// Today as an ISO `YYYY-MM-DD` key.
    fn today_iso(&self) -> String {
        iso_date(self.today())
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day. Useful in tests and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a date as an ISO document key.
#[must_use]
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an ISO `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `StockboardError::InvalidArg` for anything else.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, StockboardError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StockboardError::InvalidArg(format!("invalid date '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_round_trips_iso() {
        let day = parse_iso_date("2024-02-29").unwrap();
        assert_eq!(FixedClock(day).today_iso(), "2024-02-29");
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("29/02/2024").is_err());
    }
}
