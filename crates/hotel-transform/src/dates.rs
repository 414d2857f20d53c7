//! Status date parsing.
//!
//! Dates are stored as Polars `Date` columns (days since 1970-01-01).
//! Unparseable values become null instead of failing the run.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::{debug, warn};

use hotel_ingest::{any_to_string, is_missing_token};
use hotel_model::RESERVATION_STATUS_DATE;

use crate::error::Result;
use crate::frame::require_column;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Accepted date shapes, tried in order.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parses a status date, ignoring a trailing time component.
///
/// # Examples
///
/// ```
/// use hotel_transform::dates::parse_status_date;
///
/// assert!(parse_status_date("2015-07-01").is_some());
/// assert!(parse_status_date("2015-07-01 00:00:00").is_some());
/// assert!(parse_status_date("not a date").is_none());
/// ```
pub fn parse_status_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if is_missing_token(trimmed) {
        return None;
    }
    if let Some(date) = parse_with_formats(trimmed) {
        return Some(date);
    }
    let date_part = trimmed.split(['T', ' ']).next()?;
    if date_part.len() < trimmed.len() {
        parse_with_formats(date_part)
    } else {
        None
    }
}

fn parse_with_formats(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Days since 1970-01-01, the physical value of a Polars `Date`.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`date_to_days`].
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Replaces the status date column with a `Date` column.
///
/// Returns how many non-empty values could not be parsed and were set to
/// null. A column that is already `Date` is left alone.
pub fn normalize_status_dates(df: &mut DataFrame) -> Result<usize> {
    let column = require_column(df, RESERVATION_STATUS_DATE)?;
    if column.dtype() == &DataType::Date {
        return Ok(0);
    }

    let mut coerced = 0usize;
    let mut days: Vec<Option<i32>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        match parse_status_date(&raw) {
            Some(date) => days.push(Some(date_to_days(date))),
            None => {
                if !is_missing_token(&raw) {
                    coerced += 1;
                    debug!(row = idx, value = %raw, "unparseable status date");
                }
                days.push(None);
            }
        }
    }

    let parsed = Column::new(RESERVATION_STATUS_DATE.into(), days).cast(&DataType::Date)?;
    df.with_column(parsed)?;

    if coerced > 0 {
        warn!(coerced, "status dates could not be parsed and were set to missing");
    }
    Ok(coerced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_round_trip() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_days(epoch), 0);
        assert_eq!(days_to_date(0), Some(epoch));

        let date = NaiveDate::from_ymd_opt(2015, 7, 1).unwrap();
        assert_eq!(date_to_days(date), 16_617);
    }

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2016, 2, 29);
        assert_eq!(parse_status_date("2016-02-29"), expected);
        assert_eq!(parse_status_date("2016/02/29"), expected);
        assert_eq!(parse_status_date("02/29/2016"), expected);
        assert_eq!(parse_status_date("29-02-2016"), expected);
        assert_eq!(parse_status_date("29.02.2016"), expected);
        assert_eq!(parse_status_date("2016-02-29T10:15:00"), expected);
        assert_eq!(parse_status_date("2/29/2016 0:00"), expected);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(parse_status_date("2015-02-30"), None);
        assert_eq!(parse_status_date("NULL"), None);
        assert_eq!(parse_status_date(""), None);
        assert_eq!(parse_status_date("yesterday"), None);
    }
}
