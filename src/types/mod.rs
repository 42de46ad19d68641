mod native_type;
mod row;
mod sql_value;

pub use native_type::{NativeType, SemanticKind, TypeTable};
pub use row::{ColumnType, QueryResult, Row};
pub use sql_value::{SqlType, SqlValue};
