//! Column extraction helpers.
//!
//! Cells are read through text where possible: the loader keeps every
//! column as `String`, and only the status date becomes a `Date`.

use chrono::NaiveDate;
use polars::prelude::*;

use hotel_ingest::{any_to_f64, any_to_string, is_missing_token, is_missing_value, parse_f64};

use crate::dates::{days_to_date, parse_status_date};
use crate::error::{Result, TransformError};

/// Looks up a column, mapping absence to [`TransformError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Trimmed text values of a column; missing cells are `None`.
pub fn column_text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    if column.dtype() == &DataType::String {
        return Ok(column
            .str()?
            .iter()
            .map(|value| {
                value
                    .filter(|v| !is_missing_token(v))
                    .map(|v| v.trim().to_string())
            })
            .collect());
    }
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx)?;
        if is_missing_value(&value) {
            values.push(None);
        } else {
            values.push(Some(any_to_string(value).trim().to_string()));
        }
    }
    Ok(values)
}

/// Numeric values of a column; missing or unparseable cells are `None`.
pub fn column_f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    if column.dtype() == &DataType::String {
        return Ok(column
            .str()?
            .iter()
            .map(|value| value.and_then(parse_f64))
            .collect());
    }
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx)?).filter(|v| !v.is_nan()));
    }
    Ok(values)
}

/// Date values of a column, from a `Date` column or parsed from text.
pub fn column_date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let column = require_column(df, name)?;
    if column.dtype() == &DataType::Date {
        let physical = column.cast(&DataType::Int32)?;
        return Ok(physical
            .as_materialized_series()
            .i32()?
            .iter()
            .map(|days| days.and_then(days_to_date))
            .collect());
    }
    Ok(column_text_values(df, name)?
        .into_iter()
        .map(|value| value.as_deref().and_then(parse_status_date))
        .collect())
}

/// Returns true for a boolean mask that keeps every row.
pub(crate) fn keeps_all(mask: &[bool]) -> bool {
    mask.iter().all(|keep| *keep)
}

/// Applies a row mask, skipping the copy when nothing is removed.
pub(crate) fn apply_mask(df: &DataFrame, mask: &[bool]) -> Result<DataFrame> {
    if keeps_all(mask) {
        return Ok(df.clone());
    }
    let chunked = BooleanChunked::from_slice("keep".into(), mask);
    Ok(df.filter(&chunked)?)
}
