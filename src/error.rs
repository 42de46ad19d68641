use thiserror::Error;

/// Error type for driver operations.
///
/// `Connection` and `Driver` carry what the vendor reported. When a single
/// vendor call reports several errors, they are chained through `previous`,
/// the outermost being the most recent one.
#[derive(Debug, Error)]
pub enum DbalError {
    #[error("Connection error: {message} (code {code}, SQLSTATE {sql_state})")]
    Connection {
        message: String,
        code: i32,
        sql_state: String,
        #[source]
        previous: Option<Box<DbalError>>,
    },

    #[error("Driver error: {message} (code {code}, SQLSTATE {sql_state})")]
    Driver {
        message: String,
        code: i32,
        sql_state: String,
        #[source]
        previous: Option<Box<DbalError>>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DbalError {
    /// True for failures the caller should not retry without reconfiguring.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbalError::Connection { .. })
    }

    /// Vendor error code, when the error came from the vendor.
    pub fn code(&self) -> Option<i32> {
        match self {
            DbalError::Connection { code, .. } | DbalError::Driver { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Standardized SQLSTATE, when the error came from the vendor.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            DbalError::Connection { sql_state, .. } | DbalError::Driver { sql_state, .. } => {
                Some(sql_state)
            }
            _ => None,
        }
    }

    /// The error this one wraps, if any.
    pub fn previous(&self) -> Option<&DbalError> {
        match self {
            DbalError::Connection { previous, .. } | DbalError::Driver { previous, .. } => {
                previous.as_deref()
            }
            _ => None,
        }
    }

    /// Iterates the causal chain, starting from `self`.
    pub fn chain(&self) -> impl Iterator<Item = &DbalError> {
        std::iter::successors(Some(self), |e| e.previous())
    }
}

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DbalError>;
