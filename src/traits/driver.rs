use crate::error::Result;
use crate::params::ConnectionParams;
use crate::platform::Platform;
use crate::types::{ColumnType, NativeType, QueryResult, Row, SqlType, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Owning the vendor connection handle and its lifecycle
/// - Executing queries and exposing their rows through a `ResultAdapter`
/// - Converting values between the application and the vendor representation
/// - Normalizing vendor errors into `DbalError`
///
/// Each supported vendor provides one implementation.
pub trait Driver {
    /// Raw vendor connection handle.
    type Handle;
    type Adapter: ResultAdapter;
    type Platform: Platform;

    fn connect(&mut self, params: &ConnectionParams) -> Result<()>;

    /// Releases the connection. Does nothing when already disconnected.
    fn disconnect(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// The raw vendor handle, for collaborators that need direct access.
    fn resource_handle(&self) -> Option<&Self::Handle>;

    fn query(&mut self, sql: &str) -> Result<QueryResult<Self::Adapter>>;

    fn last_inserted_id(&mut self) -> Result<SqlValue>;

    /// Rows affected by the most recent `query`, `None` before the first one.
    fn affected_rows(&self) -> Option<u64>;

    fn server_version(&self) -> Result<String>;

    /// Checks the connection is alive, reconnecting if it is not.
    fn ping(&mut self) -> bool;

    fn begin_transaction(&mut self) -> Result<()>;
    fn commit_transaction(&mut self) -> Result<()>;
    fn rollback_transaction(&mut self) -> Result<()>;

    /// Renders `value` as SQL literal text of the declared type.
    fn convert_to_sql(&self, value: &SqlValue, sql_type: SqlType) -> Result<String>;

    /// Decodes a fetched value of the given native column type.
    fn convert_to_native(&self, value: SqlValue, native: NativeType) -> Result<SqlValue>;

    fn modify_limit_query(&self, sql: &str, limit: Option<u64>, offset: Option<u64>)
        -> Result<String>;

    /// The SQL generation collaborator matching this vendor.
    fn create_platform(&self) -> Self::Platform;
}

/// Cursor over one vendor result set.
pub trait ResultAdapter {
    /// Positions the cursor so that the next `fetch` returns the row at
    /// 0-based `index`.
    fn seek(&mut self, index: usize) -> Result<()>;

    /// Next row, or `None` once the rows are exhausted.
    fn fetch(&mut self) -> Result<Option<Row>>;

    /// Types of every column, in declaration order.
    fn column_types(&self) -> Result<Vec<ColumnType>>;
}
