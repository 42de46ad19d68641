use crate::error::DbalError;
use crate::traits::{VendorError, VendorErrors};

/// SQLSTATEs after which the connection itself is unusable: timeout, unable
/// to connect, invalid authorization and connection string syntax.
pub const CONNECTION_SQL_STATES: &[&str] = &["HYT00", "08001", "28000", "42000"];

/// Collapses the errors of one failed vendor call into a single error.
///
/// Duplicates are dropped (the latest occurrence is kept). The returned error
/// is the most recent one and wraps the earlier ones, the oldest being the
/// innermost cause.
///
/// # Panics
///
/// Panics if `errors` is empty: a failed vendor call always reports at least
/// one error.
pub fn classify(errors: VendorErrors) -> DbalError {
    let mut unique: Vec<VendorError> = Vec::with_capacity(errors.len());
    for error in errors.into_iter().rev() {
        if !unique.contains(&error) {
            unique.push(error);
        }
    }
    unique
        .into_iter()
        .rev()
        .fold(None, |previous, error| {
            Some(create_error(error, previous.map(Box::new)))
        })
        .expect("vendor call failed without reporting any error")
}

/// Turns one vendor error into a `Connection` or `Driver` error.
pub fn create_error(error: VendorError, previous: Option<Box<DbalError>>) -> DbalError {
    let VendorError {
        message,
        code,
        sql_state,
    } = error;
    if CONNECTION_SQL_STATES.contains(&sql_state.as_str()) {
        DbalError::Connection {
            message,
            code,
            sql_state,
            previous,
        }
    } else {
        DbalError::Driver {
            message,
            code,
            sql_state,
            previous,
        }
    }
}
