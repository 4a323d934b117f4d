use tracing::debug;

use crate::db::error::Result;
use crate::db::lock::TableLock;
use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::{constraint::WhereMap, row::Row, table::Table};
use crate::db::table::operations::Command;
use crate::db::table::operations::helpers::common::{stored_row_count, validate_where};
use crate::db::table::operations::helpers::where_processor::WhereProcessor;

/// `SELECT columns FROM table WHERE where_map LIMIT limit`.
///
/// Takes the same exclusive lock as the mutating commands. Only the
/// projected columns of matching rows are decoded, and the scan stops as
/// soon as `limit` rows have been collected.
#[derive(Debug, Clone)]
pub struct SelectCommand {
    pub table: Table,
    pub columns: Option<Vec<String>>,
    pub where_map: WhereMap,
    pub limit: Option<usize>,
}

impl SelectCommand {
    /// `columns: None` selects every column.
    pub fn new(table: Table, columns: Option<Vec<String>>, where_map: WhereMap) -> Self {
        Self {
            table,
            columns,
            where_map,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn projection(&self) -> Result<Vec<&ColumnDefinition>> {
        match &self.columns {
            Some(names) => names.iter().map(|name| self.table.get_column(name)).collect(),
            None => Ok(self.table.columns.iter().collect()),
        }
    }
}

impl Command for SelectCommand {
    type Output = Vec<Row>;

    fn validate(&self) -> Result<()> {
        self.projection()?;
        validate_where(&self.table, &self.where_map)
    }

    fn execute(&self) -> Result<Vec<Row>> {
        self.validate()?;
        let projection = self.projection()?;
        let limit = self.limit.unwrap_or(usize::MAX);

        let lock = TableLock::acquire(self.table.get_data_file_path(), false)?;
        let file = lock.file();
        let row_count = stored_row_count(&self.table, file)?;

        let mut rows = vec![];
        let mut processor = WhereProcessor::new(&self.table, &self.where_map, file, row_count)?;
        while rows.len() < limit {
            let Some(row_id) = processor.next() else {
                break;
            };
            let row_id = row_id?;
            let mut row = Row::new();
            for column in projection.iter() {
                row.insert(column.name.clone(), processor.read_value(row_id, column)?);
            }
            rows.push(row);
        }

        debug!(table = %self.table.name, rows = rows.len(), "select finished");
        Ok(rows)
    }
}
