use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::db::table::core::value::{DataType, Value};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessEquals,
    GreaterEquals,
}

impl Operator {
    /// BOOLEAN and TEXT columns only support equality checks.
    pub fn is_allowed_for(&self, data_type: DataType) -> bool {
        match data_type {
            DataType::Boolean | DataType::Text => {
                matches!(self, Operator::Equals | Operator::NotEquals)
            }
            DataType::Integer | DataType::Real => true,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessEquals => "<=",
            Operator::GreaterEquals => ">=",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Constraint {
    pub operator: Operator,
    pub value: Value,
}

/// Column name to constraint; all entries must hold for a row to match.
/// An empty map matches every row.
pub type WhereMap = BTreeMap<String, Constraint>;

impl Constraint {
    pub fn new(operator: Operator, value: Value) -> Self {
        Self { operator, value }
    }

    pub fn equals(value: Value) -> Self {
        Self::new(Operator::Equals, value)
    }

    pub fn not_equals(value: Value) -> Self {
        Self::new(Operator::NotEquals, value)
    }

    /// Tests a stored value against this constraint. A NULL operand turns
    /// `=`/`!=` into IS NULL / IS NOT NULL; every other comparison with NULL
    /// is false.
    pub fn matches(&self, stored: &Value) -> bool {
        if self.value.is_null() {
            return match self.operator {
                Operator::Equals => stored.is_null(),
                Operator::NotEquals => !stored.is_null(),
                _ => false,
            };
        }
        let Some(ordering) = stored.compare(&self.value) else {
            return false;
        };
        match self.operator {
            Operator::Equals => ordering == Ordering::Equal,
            Operator::NotEquals => ordering != Ordering::Equal,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::LessEquals => ordering != Ordering::Greater,
            Operator::GreaterEquals => ordering != Ordering::Less,
        }
    }
}
