//! Derived calendar month column.

use chrono::Datelike;
use polars::prelude::*;

use hotel_model::{MONTH, RESERVATION_STATUS_DATE};

use crate::error::Result;
use crate::frame::column_date_values;

/// Returns a copy of `df` with a `month` column (1-12) taken from the
/// status date. Rows without a date get a null month.
pub fn with_month_column(df: &DataFrame) -> Result<DataFrame> {
    let months: Vec<Option<i32>> = column_date_values(df, RESERVATION_STATUS_DATE)?
        .into_iter()
        .map(|date| date.map(|d| d.month() as i32))
        .collect();
    let mut out = df.clone();
    out.with_column(Column::new(MONTH.into(), months))?;
    Ok(out)
}
