//! Hotel reservation data model.
//!
//! Column names, cleaning thresholds, and the categorical types shared by
//! the ingest, transform, and report crates.

pub mod columns;
pub mod enums;
pub mod error;

pub use columns::{
    ADR, ADR_LIMIT, AGENT, COMPANY, COUNTRY, DATA_FILE_NAME, DEFAULT_PREVIEW_ROWS, HOTEL,
    IS_CANCELED, MONTH, OPTIONAL_DROP_COLUMNS, REQUIRED_COLUMNS, RESERVATION_STATUS_DATE,
    TOP_COUNTRY_LIMIT,
};
pub use enums::{CancellationStatus, HotelType, parse_cancellation_flag};
pub use error::{ModelError, Result};
