use std::collections::BTreeMap;

use crate::types::{NativeType, SqlValue};

/// One error record reported by the vendor client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VendorError {
    pub message: String,
    pub code: i32,
    pub sql_state: String,
}

impl VendorError {
    pub fn new(message: impl Into<String>, code: i32, sql_state: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            sql_state: sql_state.into(),
        }
    }
}

/// Every error record a failed vendor call reported, oldest first.
pub type VendorErrors = Vec<VendorError>;

/// Result of a vendor call.
pub type VendorResult<T> = std::result::Result<T, VendorErrors>;

/// Cursor requested when preparing a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorType {
    /// Forward-only, no seeking.
    #[default]
    Forward,
    /// Static snapshot, random access.
    Static,
    Dynamic,
    Keyset,
    /// Client-side buffered, random access.
    Buffered,
}

impl CursorType {
    pub fn is_scrollable(self) -> bool {
        !matches!(self, CursorType::Forward)
    }
}

/// Column description reported for a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub name: String,
    pub native_type: NativeType,
    pub size: Option<u32>,
    pub precision: Option<u16>,
    pub scale: Option<u16>,
    pub nullable: bool,
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
            size: None,
            precision: None,
            scale: None,
            nullable: true,
        }
    }
}

/// Server description returned by the vendor client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub version: String,
    pub server_name: String,
    pub current_database: String,
}

/// Entry point of a vendor client library.
///
/// The driver never talks to the network itself; every primitive it needs is
/// reached through this trait and the connection/statement types it hands
/// out. Implementations are expected to block until the vendor call returns.
pub trait VendorClient {
    type Connection: VendorConnection;

    /// Opens a connection to `server` (`host` or `host,port`).
    fn connect(
        &self,
        server: &str,
        options: &BTreeMap<String, String>,
    ) -> VendorResult<Self::Connection>;
}

/// An open vendor connection handle.
pub trait VendorConnection {
    type Statement: VendorStatement;

    /// Prepares `sql` without executing it.
    fn prepare(&self, sql: &str, cursor: CursorType) -> VendorResult<Self::Statement>;

    /// Prepares and executes `sql` with a forward-only cursor.
    fn query(&self, sql: &str) -> VendorResult<Self::Statement>;

    fn begin_transaction(&self) -> VendorResult<()>;
    fn commit(&self) -> VendorResult<()>;
    fn rollback(&self) -> VendorResult<()>;
    fn server_info(&self) -> VendorResult<ServerInfo>;

    /// Releases the server side of the connection. The handle must not be
    /// used again once this succeeded.
    fn close(&mut self) -> VendorResult<()>;
}

/// A prepared (and later executed) vendor statement.
pub trait VendorStatement {
    fn execute(&mut self) -> VendorResult<()>;

    /// Column descriptions in declaration order.
    fn field_metadata(&self) -> VendorResult<Vec<FieldMetadata>>;

    /// Positions the cursor so that the next `fetch_row` returns the row at
    /// 0-based `row`. Returns `false` if the cursor cannot be placed there.
    fn seek(&mut self, row: usize) -> VendorResult<bool>;

    /// Next row in column order, or `None` once the rows are exhausted.
    fn fetch_row(&mut self) -> VendorResult<Option<Vec<SqlValue>>>;
}
