#[cfg(test)]
use crate::db::table::core::{
    column::ColumnDefinition,
    constraint::{Constraint, WhereMap},
    encoding::{decode_value, encode_value},
    row::Row,
    table::Table,
    value::{DataType, Value},
};
#[cfg(test)]
use std::fs::File;
#[cfg(test)]
use tempfile::TempDir;

/// A table backed by a row file inside its own temporary directory.
#[cfg(test)]
pub struct TestTable {
    pub table: Table,
    _dir: TempDir,
}

#[cfg(test)]
impl TestTable {
    /// `id` INTEGER PRIMARY AUTOINCREMENT, `name` TEXT NOT NULL,
    /// `active` BOOLEAN UNIQUE, with no rows.
    pub fn empty() -> Self {
        Self::create(
            "users",
            vec![
                ColumnDefinition::new("id", DataType::Integer)
                    .primary()
                    .autoincrement(),
                ColumnDefinition::new("name", DataType::Text).not_null(),
                ColumnDefinition::new("active", DataType::Boolean).unique(),
            ],
            vec![],
        )
    }

    /// The users table holding ids 1..=3 with `active` = true, false, true.
    pub fn with_default_rows() -> Self {
        let table = Self::empty();
        table.append(vec![
            user_row(1, "John", true),
            user_row(2, "Jane", false),
            user_row(3, "Jim", true),
        ]);
        table
    }

    /// `id` INTEGER PRIMARY, `email` TEXT UNIQUE, `age` INTEGER,
    /// `balance` REAL, with four rows.
    pub fn accounts() -> Self {
        Self::create(
            "accounts",
            vec![
                ColumnDefinition::new("id", DataType::Integer).primary(),
                ColumnDefinition::new("email", DataType::Text).unique(),
                ColumnDefinition::new("age", DataType::Integer),
                ColumnDefinition::new("balance", DataType::Real),
            ],
            vec![
                account_row(1, "a@x.io", 25, Value::Real(1000.0)),
                account_row(2, "b@x.io", 30, Value::Real(2000.0)),
                account_row(3, "c@x.io", 35, Value::Null),
                account_row(4, "d@x.io", 40, Value::Real(4000.0)),
            ],
        )
    }

    pub fn create(name: &str, columns: Vec<ColumnDefinition>, rows: Vec<Row>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{}.idb", name));
        File::create(&path).unwrap();
        let table = Self {
            table: Table::new(name, path, columns),
            _dir: dir,
        };
        table.append(rows);
        table
    }

    /// Writes rows straight to the file, bypassing every command.
    pub fn append(&self, rows: Vec<Row>) {
        let mut bytes = self.bytes();
        for row in rows {
            for column in &self.table.columns {
                let value = row.get(&column.name).cloned().unwrap_or(Value::Null);
                bytes.extend(encode_value(&value, column.data_type).unwrap());
            }
        }
        std::fs::write(self.table.get_data_file_path(), bytes).unwrap();
    }

    pub fn open(&self) -> File {
        File::open(self.table.get_data_file_path()).unwrap()
    }

    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(self.table.get_data_file_path()).unwrap()
    }

    pub fn rows(&self) -> Vec<Row> {
        let bytes = self.bytes();
        bytes
            .chunks_exact(self.table.row_length as usize)
            .map(|chunk| {
                let mut row = Row::new();
                for column in &self.table.columns {
                    let start = column.offset as usize;
                    let slot = &chunk[start..start + column.width() as usize];
                    row.insert(
                        column.name.clone(),
                        decode_value(slot, column.data_type).unwrap(),
                    );
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
pub fn user_row(id: i64, name: &str, active: bool) -> Row {
    Row::from([
        ("id", Value::Integer(id)),
        ("name", Value::Text(name.to_string())),
        ("active", Value::Boolean(active)),
    ])
}

#[cfg(test)]
pub fn account_row(id: i64, email: &str, age: i64, balance: Value) -> Row {
    Row::from([
        ("id", Value::Integer(id)),
        ("email", Value::Text(email.to_string())),
        ("age", Value::Integer(age)),
        ("balance", balance),
    ])
}

#[cfg(test)]
pub fn active_constraint(active: bool) -> WhereMap {
    where_map(&[("active", Constraint::equals(Value::Boolean(active)))])
}

#[cfg(test)]
pub fn where_map(entries: &[(&str, Constraint)]) -> WhereMap {
    entries
        .iter()
        .map(|(column, constraint)| (column.to_string(), constraint.clone()))
        .collect()
}
