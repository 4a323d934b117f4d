use crate::db::table::core::value::Value;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// Column name to value. Used both as a mutation payload and as a decoded
/// result row. Iterates in ascending column-name order.
#[derive(Debug, PartialEq, Clone, Default)]
#[repr(transparent)]
pub struct Row(pub BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, column: &str, value: Value) -> Self {
        self.0.insert(column.to_string(), value);
        self
    }
}

impl Deref for Row {
    type Target = BTreeMap<String, Value>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Row {
    fn from(entries: [(&str, Value); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(column, value)| (column.to_string(), value))
                .collect(),
        )
    }
}
