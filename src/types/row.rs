use std::sync::Arc;
use std::time::Duration;

use crate::error::{DbalError, Result};
use crate::traits::ResultAdapter;
use crate::types::{NativeType, SemanticKind, SqlValue};

/// A single fetched row: raw native values keyed by column name, in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    names: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub fn new(names: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { names, values }
    }

    /// Gets a value by column name. With duplicate names the first one wins.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.names
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.values.get(i))
    }

    /// Gets a value by column name, failing when the column is missing.
    pub fn try_get(&self, column: &str) -> Result<&SqlValue> {
        self.get(column)
            .ok_or_else(|| DbalError::InvalidArgument(format!("Column not found: {}", column)))
    }

    /// Returns all column names in this row.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    /// Iterates `(column name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Type information of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub name: String,
    pub kind: SemanticKind,
    pub native: NativeType,
}

/// Result of a query execution: the cursor over the rows plus the time the
/// statement took to execute.
#[derive(Debug)]
pub struct QueryResult<A: ResultAdapter> {
    adapter: A,
    elapsed: Duration,
}

impl<A: ResultAdapter> QueryResult<A> {
    pub fn new(adapter: A, elapsed: Duration) -> Self {
        Self { adapter, elapsed }
    }

    /// Wall-clock duration of the statement execution.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn fetch(&mut self) -> Result<Option<Row>> {
        self.adapter.fetch()
    }

    /// Returns the first column of the next row, or `None` when exhausted.
    pub fn fetch_field(&mut self) -> Result<Option<SqlValue>> {
        Ok(self
            .adapter
            .fetch()?
            .and_then(|row| row.into_values().into_iter().next()))
    }

    /// Collects every remaining row.
    pub fn fetch_all(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.adapter.fetch()? {
            rows.push(row);
        }
        Ok(rows)
    }

    pub fn seek(&mut self, index: usize) -> Result<()> {
        self.adapter.seek(index)
    }

    pub fn column_types(&self) -> Result<Vec<ColumnType>> {
        self.adapter.column_types()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }
}
