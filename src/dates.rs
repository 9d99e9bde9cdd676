//! Calendar date helpers.
//!
//! Dates are stored as `YYYY-MM-DD` text in the dataset, so every date that
//! reaches a query is parsed first and then rendered back in that canonical
//! form.

use chrono::{Duration, NaiveDate};

use crate::error::{Result, SurfsUpError};

/// Storage and path-segment date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window used by the precipitation route, in days
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// The year must be exactly four digits and nothing may surround the date.
/// Month and day may drop their leading zero (`2017-1-1`).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let invalid = || SurfsUpError::InvalidDate {
        value: value.to_string(),
    };

    // chrono's %Y takes any number of digits and a sign, and numeric fields skip whitespace
    let bytes = value.as_bytes();
    let well_formed = bytes.len() > 5
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes.iter().all(|b| b.is_ascii_digit() || *b == b'-');
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Render a date the way the dataset stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First day of the trailing year that ends at `last`
pub fn trailing_year_start(last: NaiveDate) -> NaiveDate {
    last.checked_sub_signed(Duration::days(TRAILING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}
