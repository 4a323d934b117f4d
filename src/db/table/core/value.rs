use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DataType {
    Boolean,
    Integer,
    Real,
    Text,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Real)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
        };
        f.write_str(name)
    }
}

/// A single field value. Equality is structural (`Null == Null`); SQL-style
/// comparison lives in [`Value::compare`].
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// `None` for NULL, which carries no logical type of its own.
    pub fn get_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Integer(_) => Some(DataType::Integer),
            Value::Real(_) => Some(DataType::Real),
            Value::Text(_) => Some(DataType::Text),
        }
    }

    pub fn type_name(&self) -> String {
        match self.get_type() {
            Some(data_type) => data_type.to_string(),
            None => "NULL".to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn numeric_to_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(val) => Some(*val as f64),
            Value::Real(val) => Some(*val),
            _ => None,
        }
    }

    /// Whether this value may be stored in a column of `data_type`.
    /// NULL fits anywhere; integers widen into REAL columns.
    pub fn fits(&self, data_type: DataType) -> bool {
        match (self.get_type(), data_type) {
            (None, _) => true,
            (Some(DataType::Integer), DataType::Real) => true,
            (Some(own), other) => own == other,
        }
    }

    /// Ordering between two non-NULL values of comparable types. INTEGER and
    /// REAL mix numerically; any other mix, or a NULL on either side, is `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
                match (self.numeric_to_f64(), other.numeric_to_f64()) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Real(val) => write!(f, "{}", val),
            Value::Text(val) => write!(f, "'{}'", val),
        }
    }
}
