//! Input file resolution.

use std::path::{Path, PathBuf};

use hotel_model::DATA_FILE_NAME;

use crate::error::{IngestError, Result};

/// Directory containing the running executable.
pub fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|source| IngestError::ProgramDirectory { source })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| IngestError::ProgramDirectory {
            source: std::io::Error::other("executable has no parent directory"),
        })
}

/// Joins the fixed data file name onto `dir`.
pub fn data_path_in(dir: &Path) -> PathBuf {
    dir.join(DATA_FILE_NAME)
}

/// Resolves the reservation CSV location.
///
/// An explicit path is returned unchanged; otherwise the fixed file name
/// beside the executable. Existence is not checked here.
pub fn resolve_data_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(data_path_in(&program_dir()?)),
    }
}
