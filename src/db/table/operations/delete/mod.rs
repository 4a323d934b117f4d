use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::db::error::{Result, StorageError};
use crate::db::lock::TableLock;
use crate::db::table::core::{constraint::WhereMap, table::Table};
use crate::db::table::operations::helpers::common::{stored_row_count, validate_where};
use crate::db::table::operations::helpers::where_processor::WhereProcessor;
use crate::db::table::operations::{Command, MutationKind, MutationOutcome};

/// `DELETE FROM table WHERE where_map`.
///
/// The row file has no tombstones, so surviving rows are shifted down over
/// the deleted ones and the file is truncated. Row ids after the first
/// deleted row change. A failure part way leaves the file partially
/// compacted.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    pub table: Table,
    pub where_map: WhereMap,
}

impl DeleteCommand {
    pub fn new(table: Table, where_map: WhereMap) -> Self {
        Self { table, where_map }
    }
}

impl Command for DeleteCommand {
    type Output = MutationOutcome;

    fn validate(&self) -> Result<()> {
        validate_where(&self.table, &self.where_map)
    }

    fn execute(&self) -> Result<MutationOutcome> {
        self.validate()?;

        let lock = TableLock::acquire(self.table.get_data_file_path(), true)?;
        let file = lock.file();
        let row_count = stored_row_count(&self.table, file)?;

        let mut buffer = vec![0u8; self.table.row_length as usize];
        // Rows below `next` have been handled; `kept` of them survive.
        let mut kept = 0;
        let mut next = 0;
        let mut rows_affected = 0;
        for row in WhereProcessor::new(&self.table, &self.where_map, file, row_count)? {
            let row = row?;
            for survivor in next..row {
                move_row(file, &self.table, survivor, kept, &mut buffer)?;
                kept += 1;
            }
            next = row + 1;
            rows_affected += 1;
        }
        for survivor in next..row_count {
            move_row(file, &self.table, survivor, kept, &mut buffer)?;
            kept += 1;
        }

        file.set_len(kept * self.table.row_length)
            .map_err(|source| StorageError::Write {
                row: kept,
                column: "*".to_string(),
                source,
            })?;

        debug!(table = %self.table.name, rows_affected, "delete finished");
        Ok(MutationOutcome {
            kind: MutationKind::Deleted,
            rows_affected,
        })
    }
}

/// Copies row `from` into row `to`. `to` is never after `from`, so rows the
/// scan has yet to read are never overwritten.
fn move_row(mut file: &File, table: &Table, from: u64, to: u64, buffer: &mut [u8]) -> Result<()> {
    if from == to {
        return Ok(());
    }
    file.seek(SeekFrom::Start(from * table.row_length))
        .and_then(|_| file.read_exact(buffer))
        .map_err(|source| StorageError::Read { row: from, source })?;
    file.seek(SeekFrom::Start(to * table.row_length))
        .and_then(|_| file.write_all(buffer))
        .map_err(|source| StorageError::Write {
            row: to,
            column: "*".to_string(),
            source,
        })
}
