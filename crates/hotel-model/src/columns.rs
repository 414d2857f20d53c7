//! Column names and cleaning thresholds for the reservation dataset.

/// File name expected beside the executable when no path is given.
pub const DATA_FILE_NAME: &str = "hotel_bookings 2.csv";

/// Hotel type column ("Resort Hotel" / "City Hotel").
pub const HOTEL: &str = "hotel";
/// Cancellation flag column (0 / 1).
pub const IS_CANCELED: &str = "is_canceled";
/// Average daily rate column.
pub const ADR: &str = "adr";
/// Country code column.
pub const COUNTRY: &str = "country";
/// Date of the reservation's final status.
pub const RESERVATION_STATUS_DATE: &str = "reservation_status_date";
/// Booking company identifier, mostly empty in practice.
pub const COMPANY: &str = "company";
/// Travel agent identifier, sparsely populated.
pub const AGENT: &str = "agent";
/// Calendar month derived from the status date.
pub const MONTH: &str = "month";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [RESERVATION_STATUS_DATE, IS_CANCELED, HOTEL, ADR, COUNTRY];

/// Columns removed before the missing-value sweep.
pub const OPTIONAL_DROP_COLUMNS: [&str; 2] = [COMPANY, AGENT];

/// Rows with an average daily rate at or above this value are discarded.
pub const ADR_LIMIT: f64 = 5000.0;

/// Number of countries shown in the cancellation breakdown.
pub const TOP_COUNTRY_LIMIT: usize = 10;

/// Number of rows shown in the dataset preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
