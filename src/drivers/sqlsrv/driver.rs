use std::time::Instant;

use crate::drivers::sqlsrv::codec::SqlsrvCodec;
use crate::drivers::sqlsrv::errors::classify;
use crate::drivers::sqlsrv::result::SqlsrvResultAdapter;
use crate::error::{DbalError, Result};
use crate::params::{ConnectionConfig, ConnectionParams};
use crate::platform::MsSqlPlatform;
use crate::traits::{
    CursorType, Driver, ServerInfo, VendorClient, VendorConnection, VendorStatement,
};
use crate::types::{NativeType, QueryResult, SqlType, SqlValue};

type Statement<C> = <<C as VendorClient>::Connection as VendorConnection>::Statement;

/// SQL Server driver session.
///
/// Owns at most one vendor connection. The connection is closed on
/// `disconnect` and, at the latest, when the driver is dropped.
pub struct SqlsrvDriver<C: VendorClient> {
    client: C,
    resource: Option<C::Connection>,
    config: Option<ConnectionConfig>,
    codec: SqlsrvCodec,
    affected_rows: Option<u64>,
}

impl<C: VendorClient> SqlsrvDriver<C> {
    /// Create a new, disconnected driver on top of a vendor client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            resource: None,
            config: None,
            codec: SqlsrvCodec::default(),
            affected_rows: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn codec(&self) -> &SqlsrvCodec {
        &self.codec
    }

    /// Settings resolved by the last `connect`.
    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    /// Full server description reported by the vendor.
    pub fn server_info(&self) -> Result<ServerInfo> {
        self.connection()?.server_info().map_err(classify)
    }

    /// Disconnects, then connects again with the stored settings.
    pub fn reconnect(&mut self) -> bool {
        match self.disconnect().and_then(|_| self.open()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Reconnect failed: {:#}", e);
                false
            }
        }
    }

    fn open(&mut self) -> Result<()> {
        let config = self.config.as_ref().ok_or_else(|| {
            DbalError::InvalidState("Cannot reconnect a driver that never connected".into())
        })?;
        let connection = self
            .client
            .connect(&config.server, &config.options)
            .map_err(classify)?;
        log::debug!("Connected to {}", config.server);
        self.resource = Some(connection);
        Ok(())
    }

    fn connection(&self) -> Result<&C::Connection> {
        self.resource
            .as_ref()
            .ok_or_else(|| DbalError::InvalidState("The driver is not connected".into()))
    }

    fn read_affected_rows(connection: &C::Connection) -> Result<u64> {
        let mut statement = connection.query("SELECT @@ROWCOUNT").map_err(classify)?;
        match statement.fetch_row().map_err(classify)? {
            Some(values) => match values.into_iter().next() {
                Some(SqlValue::Int(n)) => u64::try_from(n).map_err(|_| {
                    DbalError::InvalidState(format!("Negative affected row count {}", n))
                }),
                Some(SqlValue::Text(s)) => s.parse().map_err(|_| {
                    DbalError::InvalidState(format!("Unexpected affected row count '{}'", s))
                }),
                other => Err(DbalError::InvalidState(format!(
                    "Unexpected affected row count {:?}",
                    other
                ))),
            },
            None => Err(DbalError::InvalidState(
                "SELECT @@ROWCOUNT returned no rows".into(),
            )),
        }
    }
}

impl<C: VendorClient> Driver for SqlsrvDriver<C> {
    type Handle = C::Connection;
    type Adapter = SqlsrvResultAdapter<Statement<C>>;
    type Platform = MsSqlPlatform;

    fn connect(&mut self, params: &ConnectionParams) -> Result<()> {
        let config = ConnectionConfig::resolve(params)?;
        self.codec = SqlsrvCodec::new(config.simple_storage_tz, config.connection_tz);
        self.config = Some(config);
        self.disconnect()?;
        self.open()
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(connection) = self.resource.as_mut() {
            connection.close().map_err(classify)?;
            self.resource = None;
            log::debug!("Disconnected");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.resource.is_some()
    }

    fn resource_handle(&self) -> Option<&Self::Handle> {
        self.resource.as_ref()
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult<Self::Adapter>> {
        let connection = self.connection()?;
        let mut statement = connection
            .prepare(sql, CursorType::Static)
            .map_err(classify)?;

        let start = Instant::now();
        let executed = statement.execute();
        let elapsed = start.elapsed();
        executed.map_err(classify)?;

        let affected_rows = Self::read_affected_rows(connection)?;
        log::debug!(
            "Executed in {:?}, {} row(s) affected: {}",
            elapsed,
            affected_rows,
            sql
        );
        self.affected_rows = Some(affected_rows);
        Ok(QueryResult::new(SqlsrvResultAdapter::new(statement), elapsed))
    }

    fn last_inserted_id(&mut self) -> Result<SqlValue> {
        Ok(self
            .query("SELECT @@IDENTITY")?
            .fetch_field()?
            .unwrap_or(SqlValue::Null))
    }

    fn affected_rows(&self) -> Option<u64> {
        self.affected_rows
    }

    fn server_version(&self) -> Result<String> {
        self.server_info().map(|info| info.version)
    }

    fn ping(&mut self) -> bool {
        let alive = match self.connection() {
            Ok(connection) => connection
                .begin_transaction()
                .and_then(|_| connection.rollback())
                .is_ok(),
            Err(_) => false,
        };
        if alive {
            return true;
        }
        log::warn!("Ping failed, reconnecting");
        self.reconnect()
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.connection()?.begin_transaction().map_err(classify)
    }

    fn commit_transaction(&mut self) -> Result<()> {
        self.connection()?.commit().map_err(classify)
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        self.connection()?.rollback().map_err(classify)
    }

    fn convert_to_sql(&self, value: &SqlValue, sql_type: SqlType) -> Result<String> {
        self.codec.to_sql(value, sql_type)
    }

    fn convert_to_native(&self, value: SqlValue, native: NativeType) -> Result<SqlValue> {
        self.codec.to_native(value, native)
    }

    fn modify_limit_query(
        &self,
        _sql: &str,
        _limit: Option<u64>,
        _offset: Option<u64>,
    ) -> Result<String> {
        Err(DbalError::NotImplemented(
            "SqlsrvDriver does not rewrite LIMIT/OFFSET queries".into(),
        ))
    }

    fn create_platform(&self) -> Self::Platform {
        MsSqlPlatform
    }
}

impl<C: VendorClient> Drop for SqlsrvDriver<C> {
    fn drop(&mut self) {
        if let Err(e) = self.disconnect() {
            log::error!("{:#}", e);
        }
    }
}
