use hotel_model::{
    ADR_LIMIT, CancellationStatus, HotelType, OPTIONAL_DROP_COLUMNS, REQUIRED_COLUMNS,
};

#[test]
fn required_columns_cover_chart_inputs() {
    for column in ["hotel", "is_canceled", "adr", "country", "reservation_status_date"] {
        assert!(REQUIRED_COLUMNS.contains(&column), "{column} should be required");
    }
    assert_eq!(REQUIRED_COLUMNS.len(), 5);
}

#[test]
fn optional_columns_are_not_required() {
    for column in OPTIONAL_DROP_COLUMNS {
        assert!(!REQUIRED_COLUMNS.contains(&column));
    }
}

#[test]
fn rate_limit_matches_outlier_threshold() {
    assert!((ADR_LIMIT - 5000.0).abs() < f64::EPSILON);
}

#[test]
fn hotel_type_serializes() {
    let json = serde_json::to_string(&HotelType::City).expect("serialize hotel type");
    let round: HotelType = serde_json::from_str(&json).expect("deserialize hotel type");
    assert_eq!(round, HotelType::City);
    assert_eq!(HotelType::Resort.to_string(), "Resort Hotel");
}

#[test]
fn cancellation_status_display() {
    assert_eq!(CancellationStatus::Canceled.to_string(), "Canceled");
    assert_eq!(CancellationStatus::NotCanceled.to_string(), "Not Canceled");
}
