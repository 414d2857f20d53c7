//! Reservation CSV loading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use hotel_model::REQUIRED_COLUMNS;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// A loaded reservation table with its source path.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub data: DataFrame,
    /// Column names in file order.
    pub columns: Vec<String>,
}

impl LoadedTable {
    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.data.height()
    }
}

fn not_found_or_read(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| not_found_or_read(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!("file is {} bytes, limit is {max_size}", metadata.len()),
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| not_found_or_read(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Fails with [`IngestError::MissingColumn`] for the first required column
/// absent from `df`.
pub fn require_columns(df: &DataFrame, path: &Path) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Reads the reservation CSV into a DataFrame.
///
/// Every column is read as text; typed parsing happens during cleaning so
/// that stray NA tokens in numeric columns are treated as missing values
/// rather than parse failures. A UTF-8 BOM on the header is stripped.
pub fn read_reservations(path: &Path) -> Result<LoadedTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    check_file_size(path)?;
    validate_encoding(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    strip_header_bom(&mut df)?;
    require_columns(&df, path)?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    debug!(path = %path.display(), ?columns, "csv header");
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded reservations"
    );

    Ok(LoadedTable {
        path: path.to_path_buf(),
        data: df,
        columns,
    })
}

fn strip_header_bom(df: &mut DataFrame) -> Result<()> {
    let Some(first) = df.get_column_names().first().map(|name| name.to_string()) else {
        return Ok(());
    };
    if let Some(stripped) = first.strip_prefix('\u{feff}') {
        df.rename(&first, stripped.into())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "hotel,is_canceled,adr,country,reservation_status_date";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_reservations_as_text() {
        let file = create_temp_csv(&format!(
            "{HEADER}\nResort Hotel,0,75.5,PRT,2015-07-01\nCity Hotel,1,NULL,GBR,2015-07-02\n"
        ));
        let table = read_reservations(file.path()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns.len(), 5);
        assert_eq!(
            table.data.column("adr").unwrap().dtype(),
            &DataType::String
        );
    }

    #[test]
    fn test_read_reservations_with_bom() {
        let file = create_temp_csv(&format!(
            "\u{feff}{HEADER}\nResort Hotel,0,75.5,PRT,2015-07-01\n"
        ));
        let table = read_reservations(file.path()).unwrap();

        assert_eq!(table.columns[0], "hotel");
    }

    #[test]
    fn test_read_reservations_missing_column() {
        let file = create_temp_csv("hotel,is_canceled,adr,country\nResort Hotel,0,75.5,PRT\n");
        let result = read_reservations(file.path());

        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { ref column, .. }) if column == "reservation_status_date"
        ));
    }

    #[test]
    fn test_read_reservations_empty_file() {
        let file = create_temp_csv("");
        let result = read_reservations(file.path());

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'h', 0x00]).unwrap();

        assert!(matches!(
            validate_encoding(file.path()),
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv(HEADER);
        assert!(check_file_size_with_limit(file.path(), 4).is_err());
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
    }
}
