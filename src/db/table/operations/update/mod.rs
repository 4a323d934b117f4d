use tracing::debug;

use crate::db::error::{Result, StorageError};
use crate::db::lock::TableLock;
use crate::db::table::core::{constraint::WhereMap, row::Row, table::Table};
use crate::db::table::operations::helpers::common::{
    stored_row_count, validate_assignments, validate_where, write_value,
};
use crate::db::table::operations::helpers::where_processor::WhereProcessor;
use crate::db::table::operations::{Command, MutationKind, MutationOutcome};

/// `UPDATE table SET values WHERE where_map`.
///
/// Rows are rewritten one at a time while the scan runs. If a write fails
/// the command stops, and rows already rewritten keep their new values.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    pub table: Table,
    pub values: Row,
    pub where_map: WhereMap,
}

impl UpdateCommand {
    pub fn new(table: Table, values: Row, where_map: WhereMap) -> Self {
        Self {
            table,
            values,
            where_map,
        }
    }
}

impl Command for UpdateCommand {
    type Output = MutationOutcome;

    fn validate(&self) -> Result<()> {
        validate_assignments(&self.table, &self.values, &self.where_map)?;
        validate_where(&self.table, &self.where_map)
    }

    fn execute(&self) -> Result<MutationOutcome> {
        self.validate()?;

        let lock = TableLock::acquire(self.table.get_data_file_path(), true)?;
        let file = lock.file();
        let row_count = stored_row_count(&self.table, file)?;
        let columns = self.table.convert_columns_to_map();

        let mut rows_affected = 0;
        for row in WhereProcessor::new(&self.table, &self.where_map, file, row_count)? {
            let row = row?;
            for (field, value) in self.values.iter() {
                let column =
                    columns
                        .get(field.as_str())
                        .ok_or_else(|| StorageError::UnknownColumn {
                            column: field.clone(),
                            table: self.table.name.clone(),
                        })?;
                write_value(file, &self.table, row, column, value)?;
            }
            rows_affected += 1;
        }

        debug!(table = %self.table.name, rows_affected, "update finished");
        Ok(MutationOutcome {
            kind: MutationKind::Updated,
            rows_affected,
        })
    }
}
