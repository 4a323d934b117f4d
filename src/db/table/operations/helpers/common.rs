use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

use crate::db::error::{Result, StorageError};
use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::constraint::WhereMap;
use crate::db::table::core::encoding::{TEXT_CAPACITY, encode_value};
use crate::db::table::core::row::Row;
use crate::db::table::core::table::Table;
use crate::db::table::core::value::Value;

/// Checks each assignment of an update payload, in payload order, and stops
/// at the first violation.
pub fn validate_assignments(table: &Table, values: &Row, where_map: &WhereMap) -> Result<()> {
    for (field, value) in values.iter() {
        let column = table.get_column(field)?;

        if column.autoincrement {
            return Err(StorageError::ConstraintViolation(format!(
                "cannot manually set value of column {} due to AUTOINCREMENT",
                column.name
            )));
        }

        if column.not_nullable && !column.autoincrement && value.is_null() {
            return Err(StorageError::ConstraintViolation(format!(
                "cannot set value of NOT NULLABLE column {} to NULL",
                column.name
            )));
        }

        if column.unique
            && let Some(primary) = table
                .primary_columns()
                .find(|primary| !where_map.contains_key(&primary.name))
        {
            return Err(StorageError::ConstraintViolation(format!(
                "cannot update value of UNIQUE column {} without primary key {} as where constraint, due to multiple possible matches",
                column.name, primary.name
            )));
        }

        check_value_type(column, value)?;
    }
    Ok(())
}

/// Checks every where constraint against its column's type.
pub fn validate_where(table: &Table, where_map: &WhereMap) -> Result<()> {
    for (field, constraint) in where_map.iter() {
        let column = table.get_column(field)?;
        if !constraint.operator.is_allowed_for(column.data_type) {
            return Err(StorageError::UnsupportedOperator {
                operator: constraint.operator,
                data_type: column.data_type,
            });
        }
        // INTEGER and REAL compare numerically, so either operand suits a numeric column.
        let numeric_operand = column.data_type.is_numeric()
            && constraint
                .value
                .get_type()
                .is_some_and(|data_type| data_type.is_numeric());
        if !numeric_operand {
            check_value_type(column, &constraint.value)?;
        }
    }
    Ok(())
}

pub fn check_value_type(column: &ColumnDefinition, value: &Value) -> Result<()> {
    if !value.fits(column.data_type) {
        return Err(StorageError::TypeMismatch {
            column: column.name.clone(),
            expected: column.data_type,
            found: value.type_name(),
        });
    }
    if let Value::Text(text) = value
        && text.len() > TEXT_CAPACITY
    {
        return Err(StorageError::TypeMismatch {
            column: column.name.clone(),
            expected: column.data_type,
            found: format!("TEXT of {} bytes (capacity {})", text.len(), TEXT_CAPACITY),
        });
    }
    Ok(())
}

/// Rows currently in the locked row file.
pub fn stored_row_count(table: &Table, file: &File) -> Result<u64> {
    table
        .row_count(file)
        .map_err(|source| StorageError::Open {
            path: table.get_data_file_path().to_path_buf(),
            source,
        })
}

/// Encodes `value` and writes it into `column`'s slot of row `row`.
pub fn write_value(
    mut file: &File,
    table: &Table,
    row: u64,
    column: &ColumnDefinition,
    value: &Value,
) -> Result<()> {
    let bytes = encode_value(value, column.data_type).map_err(|reason| StorageError::TypeMismatch {
        column: column.name.clone(),
        expected: column.data_type,
        found: reason,
    })?;
    file.seek(SeekFrom::Start(table.field_offset(row, column)))
        .and_then(|_| file.write_all(&bytes))
        .map_err(|source| StorageError::Write {
            row,
            column: column.name.clone(),
            source,
        })
}
