use std::fmt;

use crate::db::error::Result;

pub mod delete;
pub mod helpers;
pub mod insert;
pub mod select;
pub mod update;

/// A typed, already-parsed statement against one table.
///
/// `execute` always runs `validate` first and touches no file when it fails.
pub trait Command {
    type Output;

    fn validate(&self) -> Result<()>;

    fn execute(&self) -> Result<Self::Output>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MutationKind {
    Inserted,
    Updated,
    Deleted,
}

/// What a mutating command did. Read `rows_affected` rather than parsing the
/// `Display` text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub rows_affected: u64,
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            MutationKind::Inserted => "inserted",
            MutationKind::Updated => "updated",
            MutationKind::Deleted => "deleted",
        };
        write!(f, "{} {} record(s)", verb, self.rows_affected)
    }
}
