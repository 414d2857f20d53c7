//! Hotel reservation data ingestion.
//!
//! Locates the reservation CSV and loads it into a Polars DataFrame with
//! every column kept as text.
//!
//! # Example
//!
//! ```ignore
//! use hotel_ingest::{read_reservations, resolve_data_path};
//!
//! let path = resolve_data_path(None)?;
//! let table = read_reservations(&path)?;
//! println!("{} rows", table.row_count());
//! ```

mod csv;
mod error;
mod locate;
pub mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    LoadedTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_reservations,
    require_columns, validate_encoding,
};

// === Path Resolution ===
pub use locate::{data_path_in, program_dir, resolve_data_path};

// === Cell Helpers ===
pub use polars_utils::{
    MISSING_TOKENS, any_to_f64, any_to_string, format_numeric, is_missing_token,
    is_missing_value, parse_f64,
};
