use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::db::error::{Result, StorageError};
use crate::db::table::core::column::ColumnDefinition;

/// A resolved table: its columns laid out back to back inside a fixed-width
/// row, and the path of the file holding those rows. Row `i` lives at
/// `[i * row_length, (i + 1) * row_length)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub row_length: u64,
    path: PathBuf,
}

impl Table {
    /// Assigns every column its offset in declaration order.
    pub fn new(name: &str, path: impl Into<PathBuf>, mut columns: Vec<ColumnDefinition>) -> Self {
        let mut offset = 0;
        for column in columns.iter_mut() {
            column.offset = offset;
            offset += column.width();
        }
        Self {
            name: name.to_string(),
            columns,
            row_length: offset,
            path: path.into(),
        }
    }

    pub fn get_data_file_path(&self) -> &Path {
        &self.path
    }

    pub fn convert_columns_to_map(&self) -> HashMap<&str, &ColumnDefinition> {
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column))
            .collect()
    }

    pub fn get_column(&self, name: &str) -> Result<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .ok_or_else(|| StorageError::UnknownColumn {
                column: name.to_string(),
                table: self.name.clone(),
            })
    }

    pub fn primary_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|column| column.primary)
    }

    /// Absolute byte position of `column` inside row `row`.
    pub fn field_offset(&self, row: u64, column: &ColumnDefinition) -> u64 {
        row * self.row_length + column.offset
    }

    /// Rows currently stored in `file`. A trailing partial row is ignored.
    pub fn row_count(&self, file: &File) -> io::Result<u64> {
        if self.row_length == 0 {
            return Ok(0);
        }
        Ok(file.metadata()?.len() / self.row_length)
    }
}
