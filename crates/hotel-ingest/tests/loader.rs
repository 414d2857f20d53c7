use std::fs;

use hotel_ingest::{IngestError, data_path_in, read_reservations};
use hotel_model::DATA_FILE_NAME;

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = data_path_in(dir.path());

    let err = read_reservations(&path).expect_err("file is absent");

    assert!(err.is_file_not_found());
    assert!(err.to_string().contains(DATA_FILE_NAME));
}

#[test]
fn loads_file_with_optional_columns() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = data_path_in(dir.path());
    fs::write(
        &path,
        "hotel,is_canceled,adr,country,agent,company,reservation_status_date\n\
         Resort Hotel,0,75,PRT,NULL,NULL,2015-07-01\n\
         City Hotel,1,98.5,GBR,9,NULL,2015-08-14\n\
         City Hotel,1,120,ESP,9,40,2015-09-03\n",
    )
    .expect("write csv");

    let table = read_reservations(&path).expect("load csv");

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.columns.len(), 7);
    assert!(table.columns.iter().any(|c| c == "company"));
}

#[test]
fn rejects_file_without_rate_column() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("bookings.csv");
    fs::write(
        &path,
        "hotel,is_canceled,country,reservation_status_date\nCity Hotel,0,PRT,2015-07-01\n",
    )
    .expect("write csv");

    match read_reservations(&path) {
        Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "adr"),
        other => panic!("expected missing column error, got {other:?}"),
    }
}
