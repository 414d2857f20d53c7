//! CSV reading utilities.

mod reader;

pub use reader::{
    LoadedTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_reservations,
    require_columns, validate_encoding,
};
