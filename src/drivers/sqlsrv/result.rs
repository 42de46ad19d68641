use std::sync::Arc;

use crate::drivers::sqlsrv::errors::classify;
use crate::error::{DbalError, Result};
use crate::traits::{ResultAdapter, VendorStatement};
use crate::types::{ColumnType, Row, TypeTable};

/// Cursor over an executed SQL Server statement.
#[derive(Debug)]
pub struct SqlsrvResultAdapter<S: VendorStatement> {
    statement: S,
    types: &'static TypeTable,
    position: usize,
    names: Option<Arc<[String]>>,
}

impl<S: VendorStatement> SqlsrvResultAdapter<S> {
    pub fn new(statement: S) -> Self {
        Self {
            statement,
            types: TypeTable::global(),
            position: 0,
            names: None,
        }
    }

    /// Index of the row the next `fetch` returns.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn statement(&self) -> &S {
        &self.statement
    }

    fn names(&mut self) -> Result<Arc<[String]>> {
        if let Some(names) = &self.names {
            return Ok(Arc::clone(names));
        }
        let names: Arc<[String]> = self
            .statement
            .field_metadata()
            .map_err(classify)?
            .into_iter()
            .map(|field| field.name)
            .collect();
        self.names = Some(Arc::clone(&names));
        Ok(names)
    }
}

impl<S: VendorStatement> ResultAdapter for SqlsrvResultAdapter<S> {
    fn seek(&mut self, index: usize) -> Result<()> {
        if index == self.position {
            return Ok(());
        }
        match self.statement.seek(index) {
            Ok(true) => {
                self.position = index;
                Ok(())
            }
            Ok(false) => Err(DbalError::InvalidState(format!(
                "Unable to seek in row set to {} index.",
                index
            ))),
            Err(errors) => {
                log::debug!("Seek to {} failed: {:?}", index, errors);
                Err(DbalError::InvalidState(format!(
                    "Unable to seek in row set to {} index: {}",
                    index,
                    errors
                        .last()
                        .map(|e| e.message.as_str())
                        .unwrap_or("unknown error")
                )))
            }
        }
    }

    fn fetch(&mut self) -> Result<Option<Row>> {
        let names = self.names()?;
        match self.statement.fetch_row().map_err(classify)? {
            Some(values) => {
                self.position += 1;
                Ok(Some(Row::new(names, values)))
            }
            None => Ok(None),
        }
    }

    fn column_types(&self) -> Result<Vec<ColumnType>> {
        Ok(self
            .statement
            .field_metadata()
            .map_err(classify)?
            .into_iter()
            .map(|field| ColumnType {
                kind: self.types.kind_of(field.native_type),
                native: field.native_type,
                name: field.name,
            })
            .collect())
    }
}
