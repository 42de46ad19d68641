//! Common utilities for integration tests.
#![allow(dead_code)]

use std::env;

use log::LevelFilter;
use sqlsrv_dbal::drivers::InMemoryTestClient;
use sqlsrv_dbal::{ConnectionParams, Driver, SqlsrvDriver};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Parameters of a local development server.
pub fn params() -> ConnectionParams {
    ConnectionParams::new()
        .set("host", "localhost")
        .set("port", "1433")
        .set("user", "sa")
        .set("password", "secret")
        .set("dbname", "app")
}

/// A driver connected to `client`, with the connection bookkeeping queries
/// cleared.
pub fn connected(client: &InMemoryTestClient) -> SqlsrvDriver<InMemoryTestClient> {
    init_logs();
    let mut driver = SqlsrvDriver::new(client.clone());
    driver.connect(&params()).expect("connect");
    client.clear_recorded_queries();
    driver
}
