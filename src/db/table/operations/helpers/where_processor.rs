use std::io::{Read, Seek, SeekFrom};

use tracing::trace;

use crate::db::error::{Result, StorageError};
use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::constraint::{Constraint, WhereMap};
use crate::db::table::core::encoding::decode_value;
use crate::db::table::core::table::Table;
use crate::db::table::core::value::Value;

/// Lazily yields, in ascending order, the ids of rows that satisfy every
/// constraint of a where map.
///
/// Each call to `next` resumes the scan where the previous match left off
/// and only reads the slots of constrained columns. The scan cannot be
/// rewound; build a new processor to look at the rows again. The first read
/// or decode error is yielded and ends the scan.
pub struct WhereProcessor<'a, R> {
    table: &'a Table,
    constraints: Vec<(&'a ColumnDefinition, &'a Constraint)>,
    reader: R,
    cursor: u64,
    row_count: u64,
    buffer: Vec<u8>,
    finished: bool,
}

impl<'a, R: Read + Seek> WhereProcessor<'a, R> {
    /// Every key of `where_map` must name a column of `table`; commands check
    /// this during validation.
    pub fn new(table: &'a Table, where_map: &'a WhereMap, reader: R, row_count: u64) -> Result<Self> {
        let constraints = where_map
            .iter()
            .map(|(name, constraint)| table.get_column(name).map(|column| (column, constraint)))
            .collect::<Result<Vec<_>>>()?;
        trace!(table = %table.name, row_count, constraints = constraints.len(), "starting where scan");
        Ok(Self {
            table,
            constraints,
            reader,
            cursor: 0,
            row_count,
            buffer: Vec::new(),
            finished: false,
        })
    }

    /// Reads and decodes one column slot of `row`.
    pub fn read_value(&mut self, row: u64, column: &ColumnDefinition) -> Result<Value> {
        read_value(self.table, &mut self.reader, &mut self.buffer, row, column)
    }

    fn row_matches(&mut self, row: u64) -> Result<bool> {
        for index in 0..self.constraints.len() {
            let (column, constraint) = self.constraints[index];
            let stored = read_value(self.table, &mut self.reader, &mut self.buffer, row, column)?;
            if !constraint.matches(&stored) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<R: Read + Seek> Iterator for WhereProcessor<'_, R> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while self.cursor < self.row_count {
            let row = self.cursor;
            self.cursor += 1;
            match self.row_matches(row) {
                Ok(true) => return Some(Ok(row)),
                Ok(false) => continue,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
        self.finished = true;
        None
    }
}

pub(crate) fn read_value<R: Read + Seek>(
    table: &Table,
    reader: &mut R,
    buffer: &mut Vec<u8>,
    row: u64,
    column: &ColumnDefinition,
) -> Result<Value> {
    buffer.resize(column.width() as usize, 0);
    reader
        .seek(SeekFrom::Start(table.field_offset(row, column)))
        .and_then(|_| reader.read_exact(buffer))
        .map_err(|source| StorageError::Read { row, source })?;
    decode_value(buffer, column.data_type).map_err(|reason| StorageError::Corrupt {
        row,
        column: column.name.clone(),
        reason,
    })
}
