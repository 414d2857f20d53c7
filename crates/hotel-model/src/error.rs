use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid cancellation flag: {0}")]
    InvalidCancellationFlag(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
