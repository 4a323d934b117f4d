use flatrow::{
    ColumnDefinition, Command, DataType, InsertCommand, Row, Value, WhereMap, WhereProcessor,
};
use rusqlite::Connection;
use rusqlite::types::ToSqlOutput;

use super::Fixture;

/// Keeps a row file and an in-memory SQLite table with identical contents,
/// so a where map can be checked against the equivalent SQL predicate.
pub struct ParityManager {
    fixture: Fixture,
    sqlite_conn: Connection,
}

impl ParityManager {
    pub fn new() -> Self {
        let fixture = Fixture::new(
            "people",
            vec![
                ColumnDefinition::new("id", DataType::Integer),
                ColumnDefinition::new("name", DataType::Text),
                ColumnDefinition::new("age", DataType::Integer),
                ColumnDefinition::new("score", DataType::Real),
                ColumnDefinition::new("active", DataType::Boolean),
            ],
        );
        let sqlite_conn =
            Connection::open_in_memory().expect("Failed to create in-memory SQLite DB");
        sqlite_conn
            .execute(
                "CREATE TABLE people (id INTEGER, name TEXT, age INTEGER, score REAL, active BOOLEAN)",
                [],
            )
            .expect("SQLite create failed");
        Self {
            fixture,
            sqlite_conn,
        }
    }

    pub fn insert(&mut self, row: Row) {
        InsertCommand::new(self.fixture.table.clone(), row.clone())
            .execute()
            .expect("insert failed");

        let params: Vec<ToSqlOutput> = ["id", "name", "age", "score", "active"]
            .iter()
            .map(|column| to_sql(row.get(*column).unwrap_or(&Value::Null)))
            .collect();
        self.sqlite_conn
            .execute(
                "INSERT INTO people (id, name, age, score, active) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params_from_iter(params),
            )
            .expect("SQLite insert failed");
    }

    /// `sql_predicate` must select the same rows as `where_map`.
    pub fn assert_parity(&self, sql_predicate: &str, where_map: WhereMap) {
        let mut stmt = self
            .sqlite_conn
            .prepare(&format!(
                "SELECT rowid - 1 FROM people WHERE {} ORDER BY rowid",
                sql_predicate
            ))
            .expect("SQLite prepare failed");
        let expected: Vec<u64> = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .expect("SQLite query failed")
            .map(|id| id.expect("SQLite row failed") as u64)
            .collect();

        let file = self.fixture.open();
        let table = &self.fixture.table;
        let row_count = table.row_count(&file).unwrap();
        let actual: Vec<u64> = WhereProcessor::new(table, &where_map, &file, row_count)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(expected, actual, "predicate: {}", sql_predicate);
    }
}

fn to_sql(value: &Value) -> ToSqlOutput<'static> {
    match value {
        Value::Null => ToSqlOutput::from(rusqlite::types::Null),
        Value::Boolean(val) => ToSqlOutput::from(*val),
        Value::Integer(val) => ToSqlOutput::from(*val),
        Value::Real(val) => ToSqlOutput::from(*val),
        Value::Text(val) => ToSqlOutput::from(val.clone()),
    }
}
