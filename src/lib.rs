pub mod db;

pub use db::error::{Result, StorageError};
pub use db::lock::TableLock;
pub use db::table::core::{
    column::ColumnDefinition,
    constraint::{Constraint, Operator, WhereMap},
    row::Row,
    table::Table,
    value::{DataType, Value},
};
pub use db::table::operations::{
    Command, MutationKind, MutationOutcome, delete::DeleteCommand, insert::InsertCommand,
    select::SelectCommand, update::UpdateCommand,
};
pub use db::table::operations::helpers::where_processor::WhereProcessor;
