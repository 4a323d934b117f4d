#![allow(dead_code)] // Each test binary uses a different subset of these helpers.

pub mod parity;

use flatrow::db::table::core::encoding::encode_value;
use flatrow::{ColumnDefinition, Command, DataType, Row, SelectCommand, Table, Value, WhereMap};
use std::fs::File;
use tempfile::TempDir;

pub struct Fixture {
    pub table: Table,
    _dir: TempDir,
}

impl Fixture {
    pub fn new(name: &str, columns: Vec<ColumnDefinition>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{}.idb", name));
        File::create(&path).unwrap();
        Self {
            table: Table::new(name, path, columns),
            _dir: dir,
        }
    }

    /// Table `T`: `id` INTEGER PRIMARY AUTOINCREMENT, `name` TEXT NOT NULL,
    /// `active` BOOLEAN UNIQUE, holding three rows with active = true, false, true.
    pub fn users() -> Self {
        let fixture = Self::new(
            "T",
            vec![
                ColumnDefinition::new("id", DataType::Integer)
                    .primary()
                    .autoincrement(),
                ColumnDefinition::new("name", DataType::Text).not_null(),
                ColumnDefinition::new("active", DataType::Boolean).unique(),
            ],
        );
        fixture.write_raw(&[
            user(1, "John", true),
            user(2, "Jane", false),
            user(3, "Jim", true),
        ]);
        fixture
    }

    /// Appends rows without going through any command or constraint check.
    pub fn write_raw(&self, rows: &[Row]) {
        let mut bytes = self.bytes();
        for row in rows {
            for column in &self.table.columns {
                let value = row.get(&column.name).cloned().unwrap_or(Value::Null);
                bytes.extend(encode_value(&value, column.data_type).unwrap());
            }
        }
        std::fs::write(self.table.get_data_file_path(), bytes).unwrap();
    }

    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(self.table.get_data_file_path()).unwrap()
    }

    pub fn rows(&self) -> Vec<Row> {
        SelectCommand::new(self.table.clone(), None, WhereMap::new())
            .execute()
            .unwrap()
    }

    pub fn open(&self) -> File {
        File::open(self.table.get_data_file_path()).unwrap()
    }
}

pub fn user(id: i64, name: &str, active: bool) -> Row {
    Row::from([
        ("id", Value::Integer(id)),
        ("name", Value::Text(name.to_string())),
        ("active", Value::Boolean(active)),
    ])
}
