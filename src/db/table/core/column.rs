use crate::db::table::core::encoding::slot_width;
use crate::db::table::core::value::DataType;

/// A column of a fixed-layout table. `offset` is assigned by [`Table::new`]
/// and never changes afterwards.
///
/// [`Table::new`]: crate::db::table::core::table::Table::new
#[derive(Debug, PartialEq, Clone)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub offset: u64,
    pub primary: bool,
    pub unique: bool,
    pub not_nullable: bool,
    pub autoincrement: bool,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            offset: 0,
            primary: false,
            unique: false,
            not_nullable: false,
            autoincrement: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_nullable = true;
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn width(&self) -> u64 {
        slot_width(self.data_type) as u64
    }
}
