mod common;

use std::collections::BTreeMap;

use sqlsrv_dbal::drivers::sqlsrv::SqlsrvResultAdapter;
use sqlsrv_dbal::drivers::{FailPoint, InMemoryTestClient, InMemoryTestResponseBuilder};
use sqlsrv_dbal::error::DbalError;
use sqlsrv_dbal::traits::{
    ResultAdapter, VendorClient, VendorConnection, VendorError,
};
use sqlsrv_dbal::types::{ColumnType, NativeType, SemanticKind, SqlValue};
use sqlsrv_dbal::Driver;

use common::{connected, init_logs};

fn letters() -> InMemoryTestClient {
    InMemoryTestClient::new().with_response(
        InMemoryTestResponseBuilder::new()
            .column("letter", NativeType::CHAR)
            .row(vec!["a".into()])
            .row(vec!["b".into()])
            .row(vec!["c".into()])
            .build(),
    )
}

fn letter(value: Option<SqlValue>) -> String {
    match value {
        Some(SqlValue::Text(s)) => s,
        other => panic!("Expected a letter, got {:?}", other),
    }
}

#[test]
fn test_fetch_until_exhausted() {
    let client = letters();
    let mut driver = connected(&client);
    let mut result = driver.query("SELECT letter FROM letters").unwrap();

    let row = result.fetch().unwrap().unwrap();
    assert_eq!(row.names(), &["letter".to_string()]);
    assert_eq!(row.try_get("letter").unwrap(), &SqlValue::Text("a".into()));
    assert!(matches!(
        row.try_get("missing"),
        Err(DbalError::InvalidArgument(_))
    ));
    assert_eq!(letter(result.fetch_field().unwrap()), "b");
    assert_eq!(letter(result.fetch_field().unwrap()), "c");
    assert!(result.fetch().unwrap().is_none());
    assert!(result.fetch().unwrap().is_none());
    assert_eq!(result.adapter().position(), 3);
}

#[test]
fn test_seek() {
    let client = letters();
    let mut driver = connected(&client);
    let mut result = driver.query("SELECT letter FROM letters").unwrap();

    result.seek(2).unwrap();
    assert_eq!(letter(result.fetch_field().unwrap()), "c");

    result.seek(0).unwrap();
    assert_eq!(letter(result.fetch_field().unwrap()), "a");
    assert_eq!(letter(result.fetch_field().unwrap()), "b");

    result.seek(3).unwrap();
    assert!(result.fetch().unwrap().is_none());
}

#[test]
fn test_seek_out_of_range() {
    let client = letters();
    let mut driver = connected(&client);
    let mut result = driver.query("SELECT letter FROM letters").unwrap();

    match result.seek(5) {
        Err(DbalError::InvalidState(message)) => {
            assert_eq!(message, "Unable to seek in row set to 5 index.")
        }
        other => panic!("Expected InvalidState, got {:?}", other.err()),
    }
    assert_eq!(letter(result.fetch_field().unwrap()), "a");
}

#[test]
fn test_seek_on_forward_only_cursor() {
    init_logs();
    let client = letters();
    let connection = client.connect("localhost", &BTreeMap::new()).unwrap();
    let statement = connection.query("SELECT letter FROM letters").unwrap();
    let mut adapter = SqlsrvResultAdapter::new(statement);

    adapter.seek(0).unwrap();
    assert!(matches!(adapter.seek(1), Err(DbalError::InvalidState(_))));
    assert_eq!(adapter.position(), 0);
    assert_eq!(
        adapter.fetch().unwrap().unwrap().get("letter"),
        Some(&SqlValue::Text("a".into()))
    );
}

#[test]
fn test_fetch_failure_is_classified() {
    let client = letters();
    let mut driver = connected(&client);
    let mut result = driver.query("SELECT letter FROM letters").unwrap();
    client.fail_next(
        FailPoint::Fetch,
        vec![VendorError::new("Query timeout expired", 0, "HYT00")],
    );

    let error = result.fetch().unwrap_err();

    assert!(error.is_connection_error());
    assert_eq!(error.sql_state(), Some("HYT00"));
}

#[test]
fn test_column_types() {
    let client = InMemoryTestClient::new().with_response(
        InMemoryTestResponseBuilder::new()
            .column("id", NativeType::INTEGER)
            .column("active", NativeType::BIT)
            .column("price", NativeType::DECIMAL)
            .column("created", NativeType::DATETIME)
            .column("updated", NativeType::DATETIMEOFFSET)
            .column("note", NativeType::WVARCHAR)
            .build(),
    );
    let mut driver = connected(&client);
    let result = driver.query("SELECT * FROM products").unwrap();

    let column = |name: &str, kind, native| ColumnType {
        name: name.to_string(),
        kind,
        native,
    };
    assert_eq!(
        result.column_types().unwrap(),
        vec![
            column("id", SemanticKind::AsIs, NativeType::INTEGER),
            column("active", SemanticKind::Bool, NativeType::BIT),
            column("price", SemanticKind::DriverSpecific, NativeType::DECIMAL),
            column(
                "created",
                SemanticKind::DriverSpecificAndDateTime,
                NativeType::DATETIME
            ),
            column("updated", SemanticKind::DateTime, NativeType::DATETIMEOFFSET),
            column("note", SemanticKind::AsIs, NativeType::WVARCHAR),
        ]
    );
}

#[test]
fn test_column_types_failure() {
    let client = letters();
    let mut driver = connected(&client);
    let result = driver.query("SELECT letter FROM letters").unwrap();
    client.fail_next(
        FailPoint::Metadata,
        vec![VendorError::new("Function sequence error", 0, "HY010")],
    );

    assert!(matches!(
        result.column_types(),
        Err(DbalError::Driver { .. })
    ));
}
