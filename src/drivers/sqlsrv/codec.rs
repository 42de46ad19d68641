use chrono::{DateTime, Offset};
use chrono_tz::Tz;

use crate::error::{DbalError, Result};
use crate::types::{NativeType, SqlType, SqlValue};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts values between the application and SQL Server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlsrvCodec {
    simple_storage_tz: Tz,
    connection_tz: Tz,
}

impl Default for SqlsrvCodec {
    fn default() -> Self {
        Self::new(Tz::UTC, Tz::UTC)
    }
}

impl SqlsrvCodec {
    pub fn new(simple_storage_tz: Tz, connection_tz: Tz) -> Self {
        Self {
            simple_storage_tz,
            connection_tz,
        }
    }

    pub fn simple_storage_tz(&self) -> Tz {
        self.simple_storage_tz
    }

    pub fn connection_tz(&self) -> Tz {
        self.connection_tz
    }

    /// Renders `value` as a T-SQL literal of the declared type. `Null`
    /// renders as `NULL` whatever the type.
    pub fn to_sql(&self, value: &SqlValue, sql_type: SqlType) -> Result<String> {
        match (sql_type, value) {
            (_, SqlValue::Null) => Ok("NULL".to_string()),
            (SqlType::String, SqlValue::Text(s)) => Ok(format!("'{}'", s.replace('\'', "''"))),
            (SqlType::Bool, SqlValue::Bool(b)) => Ok(if *b { "1" } else { "0" }.to_string()),
            (SqlType::Identifier, SqlValue::Text(s)) => Ok(quote_identifier(s)),
            (SqlType::Blob, SqlValue::Blob(bytes)) => Ok(format!("0x{}", hex::encode(bytes))),
            (SqlType::DateTimeSimple, SqlValue::DateTime(dt)) => {
                let local = dt.with_timezone(&self.simple_storage_tz);
                Ok(format!("'{}'", local.format(DATETIME_FORMAT)))
            }
            (SqlType::DateTime, SqlValue::DateTime(dt)) => {
                let local = dt.with_timezone(&self.connection_tz);
                Ok(format!(
                    "'{} {}'",
                    local.format(DATETIME_FORMAT),
                    format_offset(&local)
                ))
            }
            (sql_type, value) => Err(DbalError::InvalidArgument(format!(
                "Cannot convert {} value to SQL type {:?}",
                value.type_name(),
                sql_type
            ))),
        }
    }

    /// Decodes a fetched value of a column with driver-specific decoding.
    ///
    /// Date and time columns are returned as text: the fetched wall-clock
    /// value followed by the storage timezone name, e.g.
    /// `2024-01-31 10:00:00 Europe/Prague`.
    pub fn to_native(&self, value: SqlValue, native: NativeType) -> Result<SqlValue> {
        match native {
            NativeType::BIGINT => decode_bigint(value, native),
            NativeType::DECIMAL | NativeType::NUMERIC => decode_decimal(value, native),
            NativeType::DATE | NativeType::DATETIME | NativeType::TIME => match value {
                SqlValue::Null => Ok(SqlValue::Null),
                SqlValue::Text(s) => Ok(SqlValue::Text(format!(
                    "{} {}",
                    s,
                    self.simple_storage_tz.name()
                ))),
                other => Err(unexpected(&other, native)),
            },
            _ => Err(DbalError::NotSupported(format!(
                "SqlsrvDriver does not support '{}' type conversion.",
                native
            ))),
        }
    }
}

/// Brackets every dot-separated segment; a bare `*` segment stays a wildcard.
fn quote_identifier(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|segment| {
            if segment == "*" {
                "*".to_string()
            } else {
                format!("[{}]", segment.replace(']', "]]"))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn format_offset(dt: &DateTime<Tz>) -> String {
    let seconds = dt.offset().fix().local_minus_utc();
    let sign = if seconds >= 0 { '+' } else { '-' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

fn decode_bigint(value: SqlValue, native: NativeType) -> Result<SqlValue> {
    let (min, max) = (isize::MIN as i64, isize::MAX as i64);
    match value {
        SqlValue::Null => Ok(SqlValue::Null),
        SqlValue::Int(n) if (min..=max).contains(&n) => Ok(SqlValue::Int(n)),
        SqlValue::Int(n) => Ok(SqlValue::Text(n.to_string())),
        SqlValue::Text(s) => Ok(match integral_within(&s, min, max) {
            Some(n) => SqlValue::Int(n),
            None => SqlValue::Text(s),
        }),
        other => Err(unexpected(&other, native)),
    }
}

/// Parses `text` as an integer and accepts it only inside `[min, max]`.
fn integral_within(text: &str, min: i64, max: i64) -> Option<i64> {
    text.parse::<i64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}

/// Keeps the text when a float cannot reproduce it exactly.
fn decode_decimal(value: SqlValue, native: NativeType) -> Result<SqlValue> {
    match value {
        SqlValue::Null => Ok(SqlValue::Null),
        SqlValue::Float(f) => Ok(SqlValue::Float(f)),
        SqlValue::Text(s) => Ok(match s.parse::<f64>() {
            Ok(f) if f.to_string() == s => SqlValue::Float(f),
            _ => SqlValue::Text(s),
        }),
        other => Err(unexpected(&other, native)),
    }
}

fn unexpected(value: &SqlValue, native: NativeType) -> DbalError {
    DbalError::InvalidArgument(format!(
        "Unexpected {} value for native type '{}'",
        value.type_name(),
        native
    ))
}
