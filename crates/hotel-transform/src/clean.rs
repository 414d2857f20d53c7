//! Reservation cleaning steps.
//!
//! Applied in order by [`clean_reservations`]:
//!
//! 1. Parse the status date column, coercing failures to missing.
//! 2. Drop the optional `company` / `agent` columns when present.
//! 3. Drop every row with a missing value in any remaining column.
//! 4. Keep only rows whose average daily rate is below the limit.

use std::time::Instant;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use hotel_ingest::{any_to_string, is_missing_token, is_missing_value};
use hotel_model::{ADR, ADR_LIMIT, OPTIONAL_DROP_COLUMNS};

use crate::dates::normalize_status_dates;
use crate::error::{Result, TransformError};
use crate::frame::{apply_mask, column_f64_values, require_column};

/// Knobs for [`clean_reservations`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOptions {
    /// Columns removed before the missing-value sweep, if present.
    pub drop_columns: Vec<String>,
    /// Rows with a rate at or above this value are removed.
    pub adr_limit: f64,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            drop_columns: OPTIONAL_DROP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            adr_limit: ADR_LIMIT,
        }
    }
}

/// Row and column counts recorded while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    /// Non-empty status dates that failed to parse.
    pub unparseable_dates: usize,
    /// Optional columns that were present and removed.
    pub dropped_columns: Vec<String>,
    pub rows_with_missing: usize,
    pub rows_over_rate_limit: usize,
    pub output_rows: usize,
}

impl CleaningReport {
    /// Total rows removed by cleaning.
    pub fn rows_removed(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }
}

/// Drops each listed column that exists; absent columns are ignored.
pub fn drop_optional_columns(df: DataFrame, columns: &[String]) -> Result<(DataFrame, Vec<String>)> {
    let mut df = df;
    let mut dropped = Vec::new();
    for name in columns {
        if df.column(name).is_ok() {
            df = df.drop(name)?;
            dropped.push(name.clone());
        }
    }
    Ok((df, dropped))
}

/// Removes every row holding a missing value in any column.
///
/// Returns the filtered frame and the number of rows removed.
pub fn drop_missing_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let height = df.height();
    let mut keep = vec![true; height];
    for column in df.get_columns() {
        if column.dtype() == &DataType::String {
            for (idx, value) in column.str()?.iter().enumerate() {
                if value.is_none_or(is_missing_token) {
                    keep[idx] = false;
                }
            }
        } else {
            for (idx, flag) in keep.iter_mut().enumerate() {
                if *flag && is_missing_value(&column.get(idx)?) {
                    *flag = false;
                }
            }
        }
    }
    let removed = keep.iter().filter(|k| !**k).count();
    Ok((apply_mask(df, &keep)?, removed))
}

/// Keeps rows whose rate is strictly below `limit`.
///
/// Expects missing rows to be gone already: a rate that is not a number
/// fails with [`TransformError::InvalidValue`]. Returns the filtered frame
/// and the number of rows removed.
pub fn filter_rate_outliers(df: &DataFrame, limit: f64) -> Result<(DataFrame, usize)> {
    let rates = column_f64_values(df, ADR)?;
    let mut keep = Vec::with_capacity(rates.len());
    for (row, rate) in rates.into_iter().enumerate() {
        match rate {
            Some(value) => keep.push(value < limit),
            None => {
                return Err(TransformError::InvalidValue {
                    column: ADR.to_string(),
                    row,
                    value: any_to_string(require_column(df, ADR)?.get(row)?),
                });
            }
        }
    }
    let removed = keep.iter().filter(|k| !**k).count();
    Ok((apply_mask(df, &keep)?, removed))
}

/// Runs all cleaning steps in order.
pub fn clean_reservations(
    df: DataFrame,
    options: &CleaningOptions,
) -> Result<(DataFrame, CleaningReport)> {
    let span = info_span!("clean", rows = df.height());
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = CleaningReport {
        input_rows: df.height(),
        ..CleaningReport::default()
    };

    let mut df = df;
    report.unparseable_dates = normalize_status_dates(&mut df)?;

    let (df, dropped) = drop_optional_columns(df, &options.drop_columns)?;
    debug!(?dropped, "dropped optional columns");
    report.dropped_columns = dropped;

    let (df, missing) = drop_missing_rows(&df)?;
    debug!(removed = missing, "dropped rows with missing values");
    report.rows_with_missing = missing;

    let (df, outliers) = filter_rate_outliers(&df, options.adr_limit)?;
    debug!(removed = outliers, limit = options.adr_limit, "dropped rate outliers");
    report.rows_over_rate_limit = outliers;
    report.output_rows = df.height();

    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        unparseable_dates = report.unparseable_dates,
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );
    Ok((df, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Column::new(name.into(), values))
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_drop_optional_columns_ignores_absent() {
        let df = text_df(vec![("adr", vec!["1"]), ("agent", vec!["9"])]);
        let (df, dropped) = drop_optional_columns(df, &CleaningOptions::default().drop_columns)
            .unwrap();

        assert_eq!(dropped, vec!["agent".to_string()]);
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_drop_missing_rows_counts_tokens() {
        let df = text_df(vec![
            ("country", vec!["PRT", "NULL", "GBR", ""]),
            ("adr", vec!["1", "2", "NA", "4"]),
        ]);
        let (clean, removed) = drop_missing_rows(&df).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(clean.height(), 1);
    }

    #[test]
    fn test_filter_rate_outliers_rejects_text_rate() {
        let df = text_df(vec![("adr", vec!["80", "abc"])]);
        let err = filter_rate_outliers(&df, ADR_LIMIT).unwrap_err();

        assert!(matches!(
            err,
            TransformError::InvalidValue { ref column, row: 1, ref value }
                if column == "adr" && value == "abc"
        ));
    }

    #[test]
    fn test_drop_missing_rows_lowercase_null() {
        let df = text_df(vec![("country", vec!["PRT", "null", "#N/A N/A", " "])]);
        let (clean, removed) = drop_missing_rows(&df).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(clean.height(), 2);
    }

    #[test]
    fn test_filter_rate_outliers_boundary() {
        let df = text_df(vec![("adr", vec!["4999.99", "5000", "5400", "-6.38"])]);
        let (clean, removed) = filter_rate_outliers(&df, ADR_LIMIT).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(clean.height(), 2);
    }
}
