//! Categorical values found in the reservation dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Hotel type of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HotelType {
    /// "Resort Hotel"
    Resort,
    /// "City Hotel"
    City,
}

impl HotelType {
    /// Both hotel types in the order the rate trend draws them.
    pub const ALL: [HotelType; 2] = [HotelType::Resort, HotelType::City];

    /// Returns the label as it appears in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelType::Resort => "Resort Hotel",
            HotelType::City => "City Hotel",
        }
    }
}

impl fmt::Display for HotelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a reservation as encoded by `is_canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CancellationStatus {
    NotCanceled,
    Canceled,
}

impl CancellationStatus {
    /// Chart order: not canceled first.
    pub const ALL: [CancellationStatus; 2] =
        [CancellationStatus::NotCanceled, CancellationStatus::Canceled];

    pub fn from_flag(canceled: bool) -> Self {
        if canceled {
            CancellationStatus::Canceled
        } else {
            CancellationStatus::NotCanceled
        }
    }

    /// Position in [`CancellationStatus::ALL`].
    pub fn index(&self) -> usize {
        match self {
            CancellationStatus::NotCanceled => 0,
            CancellationStatus::Canceled => 1,
        }
    }

    /// Returns the legend label.
    pub fn label(&self) -> &'static str {
        match self {
            CancellationStatus::NotCanceled => "Not Canceled",
            CancellationStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for CancellationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses a raw `is_canceled` cell.
///
/// Numeric values are canceled when non-zero; `true`/`yes` and
/// `false`/`no` are accepted case-insensitively.
pub fn parse_cancellation_flag(raw: &str) -> Result<bool, ModelError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_nan() {
            return Err(ModelError::InvalidCancellationFlag(raw.to_string()));
        }
        return Ok(value != 0.0);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(ModelError::InvalidCancellationFlag(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_type_labels() {
        assert_eq!(HotelType::Resort.as_str(), "Resort Hotel");
        assert_eq!(HotelType::City.to_string(), "City Hotel");
    }

    #[test]
    fn test_cancellation_flag() {
        assert!(parse_cancellation_flag("1").unwrap());
        assert!(!parse_cancellation_flag("0").unwrap());
        assert!(!parse_cancellation_flag("0.0").unwrap());
        assert!(parse_cancellation_flag("TRUE").unwrap());
        assert_eq!(
            parse_cancellation_flag("maybe"),
            Err(ModelError::InvalidCancellationFlag("maybe".to_string()))
        );
    }

    #[test]
    fn test_status_order() {
        assert_eq!(CancellationStatus::ALL[0].label(), "Not Canceled");
        assert_eq!(CancellationStatus::from_flag(true), CancellationStatus::Canceled);
        for (idx, status) in CancellationStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), idx);
        }
    }
}
