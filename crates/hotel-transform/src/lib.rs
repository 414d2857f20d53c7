//! Reservation cleaning and typed extraction.
//!
//! Turns the text frame produced by `hotel-ingest` into a cleaned frame
//! in which no cell is missing and every rate is below the outlier limit,
//! and exposes the chart inputs as typed vectors.

pub mod clean;
pub mod dates;
pub mod error;
pub mod frame;
pub mod month;
pub mod reservations;

pub use clean::{
    CleaningOptions, CleaningReport, clean_reservations, drop_missing_rows, drop_optional_columns,
    filter_rate_outliers,
};
pub use dates::{date_to_days, days_to_date, normalize_status_dates, parse_status_date};
pub use error::{Result, TransformError};
pub use frame::{column_date_values, column_f64_values, column_text_values, require_column};
pub use month::with_month_column;
pub use reservations::{ReservationRef, Reservations};
