//! Typed view over a cleaned reservation frame.

use chrono::NaiveDate;
use polars::prelude::DataFrame;

use hotel_model::{
    ADR, COUNTRY, CancellationStatus, HOTEL, IS_CANCELED, RESERVATION_STATUS_DATE,
    parse_cancellation_flag,
};

use crate::error::{Result, TransformError};
use crate::frame::{column_date_values, column_f64_values, column_text_values};

/// The chart inputs of a cleaned frame, one vector per column.
///
/// All vectors have the same length; index `i` is row `i` of the frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reservations {
    pub hotel: Vec<String>,
    pub canceled: Vec<bool>,
    pub adr: Vec<f64>,
    pub country: Vec<String>,
    pub status_date: Vec<NaiveDate>,
}

/// One row of [`Reservations`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservationRef<'a> {
    pub hotel: &'a str,
    pub canceled: bool,
    pub adr: f64,
    pub country: &'a str,
    pub status_date: NaiveDate,
}

impl ReservationRef<'_> {
    pub fn status(&self) -> CancellationStatus {
        CancellationStatus::from_flag(self.canceled)
    }
}

fn invalid(column: &str, row: usize, value: Option<&str>) -> TransformError {
    TransformError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.unwrap_or_default().to_string(),
    }
}

impl Reservations {
    /// Extracts the typed view.
    ///
    /// Expects a cleaned frame: any missing or unparseable cell in the
    /// required columns is an error.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let hotel = column_text_values(df, HOTEL)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| invalid(HOTEL, row, None)))
            .collect::<Result<Vec<_>>>()?;
        let country = column_text_values(df, COUNTRY)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| invalid(COUNTRY, row, None)))
            .collect::<Result<Vec<_>>>()?;
        let canceled = column_text_values(df, IS_CANCELED)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .as_deref()
                    .and_then(|raw| parse_cancellation_flag(raw).ok())
                    .ok_or_else(|| invalid(IS_CANCELED, row, value.as_deref()))
            })
            .collect::<Result<Vec<_>>>()?;
        let adr = column_f64_values(df, ADR)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| invalid(ADR, row, None)))
            .collect::<Result<Vec<_>>>()?;
        let status_date = column_date_values(df, RESERVATION_STATUS_DATE)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| invalid(RESERVATION_STATUS_DATE, row, None)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            hotel,
            canceled,
            adr,
            country,
            status_date,
        })
    }

    pub fn len(&self) -> usize {
        self.canceled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canceled.is_empty()
    }

    /// Number of canceled reservations.
    pub fn canceled_count(&self) -> usize {
        self.canceled.iter().filter(|c| **c).count()
    }

    pub fn get(&self, idx: usize) -> Option<ReservationRef<'_>> {
        Some(ReservationRef {
            hotel: self.hotel.get(idx)?,
            canceled: *self.canceled.get(idx)?,
            adr: *self.adr.get(idx)?,
            country: self.country.get(idx)?,
            status_date: *self.status_date.get(idx)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ReservationRef<'_>> + '_ {
        (0..self.len()).filter_map(move |idx| self.get(idx))
    }
}
