use std::fs::File;

use tracing::debug;

use crate::db::error::{Result, StorageError};
use crate::db::lock::TableLock;
use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::constraint::{Constraint, WhereMap};
use crate::db::table::core::{row::Row, table::Table, value::DataType, value::Value};
use crate::db::table::operations::helpers::common::{
    check_value_type, stored_row_count, write_value,
};
use crate::db::table::operations::helpers::where_processor::{WhereProcessor, read_value};
use crate::db::table::operations::{Command, MutationKind, MutationOutcome};

/// `INSERT INTO table VALUES values`, appending one row at the end of the
/// row file. Columns missing from `values` are stored as NULL, and
/// AUTOINCREMENT columns receive one more than the largest stored value.
#[derive(Debug, Clone)]
pub struct InsertCommand {
    pub table: Table,
    pub values: Row,
}

impl InsertCommand {
    pub fn new(table: Table, values: Row) -> Self {
        Self { table, values }
    }

    fn next_autoincrement(&self, file: &File, column: &ColumnDefinition, row_count: u64) -> Result<i64> {
        let mut reader = file;
        let mut buffer = Vec::new();
        let mut max = 0;
        for row in 0..row_count {
            if let Value::Integer(value) = read_value(&self.table, &mut reader, &mut buffer, row, column)? {
                max = max.max(value);
            }
        }
        max.checked_add(1).ok_or_else(|| {
            StorageError::ConstraintViolation(format!(
                "AUTOINCREMENT column {} has no value left after {}",
                column.name, max
            ))
        })
    }

    fn check_not_taken(&self, file: &File, column: &ColumnDefinition, value: &Value, row_count: u64) -> Result<()> {
        let mut where_map = WhereMap::new();
        where_map.insert(column.name.clone(), Constraint::equals(value.clone()));
        match WhereProcessor::new(&self.table, &where_map, file, row_count)?.next() {
            Some(Ok(row)) => Err(StorageError::ConstraintViolation(format!(
                "value {} of column {} already exists in row {}",
                value, column.name, row
            ))),
            Some(Err(error)) => Err(error),
            None => Ok(()),
        }
    }
}

impl Command for InsertCommand {
    type Output = MutationOutcome;

    fn validate(&self) -> Result<()> {
        for field in self.values.keys() {
            self.table.get_column(field)?;
        }

        for column in self.table.columns.iter() {
            let value = self.values.get(&column.name).unwrap_or(&Value::Null);

            if column.autoincrement {
                if self.values.contains_key(&column.name) {
                    return Err(StorageError::ConstraintViolation(format!(
                        "cannot manually set value of column {} due to AUTOINCREMENT",
                        column.name
                    )));
                }
                if column.data_type != DataType::Integer {
                    return Err(StorageError::ConstraintViolation(format!(
                        "AUTOINCREMENT column {} must be INTEGER",
                        column.name
                    )));
                }
                continue;
            }

            if column.not_nullable && value.is_null() {
                return Err(StorageError::ConstraintViolation(format!(
                    "cannot insert NULL into NOT NULLABLE column {}",
                    column.name
                )));
            }

            check_value_type(column, value)?;
        }
        Ok(())
    }

    fn execute(&self) -> Result<MutationOutcome> {
        self.validate()?;

        let lock = TableLock::acquire(self.table.get_data_file_path(), true)?;
        let file = lock.file();
        let row_count = stored_row_count(&self.table, file)?;

        let mut row = Vec::with_capacity(self.table.columns.len());
        for column in self.table.columns.iter() {
            let value = if column.autoincrement {
                Value::Integer(self.next_autoincrement(file, column, row_count)?)
            } else {
                self.values.get(&column.name).cloned().unwrap_or(Value::Null)
            };
            if (column.unique || column.primary) && !value.is_null() {
                self.check_not_taken(file, column, &value, row_count)?;
            }
            row.push((column, value));
        }

        for (column, value) in row.iter() {
            write_value(file, &self.table, row_count, column, value)?;
        }

        debug!(table = %self.table.name, row = row_count, "insert finished");
        Ok(MutationOutcome {
            kind: MutationKind::Inserted,
            rows_affected: 1,
        })
    }
}
