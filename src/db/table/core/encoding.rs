//! Fixed-width binary encoding of field values.
//!
//! Every column slot starts with a presence byte (`0` = NULL, `1` = present)
//! followed by a payload whose width depends only on the column type:
//!
//! ```text
//! BOOLEAN  [p][b]                      2 bytes
//! INTEGER  [p][i64 LE]                 9 bytes
//! REAL     [p][f64 LE]                 9 bytes
//! TEXT     [p][len u8][255 bytes UTF-8] 257 bytes, zero padded
//! ```
//!
//! A NULL slot is all zeros. Nothing here touches I/O.

use crate::db::table::core::value::{DataType, Value};

pub const TEXT_CAPACITY: usize = 255;

const NULL_MARKER: u8 = 0;
const PRESENT_MARKER: u8 = 1;

pub fn payload_width(data_type: DataType) -> usize {
    match data_type {
        DataType::Boolean => 1,
        DataType::Integer => 8,
        DataType::Real => 8,
        DataType::Text => 1 + TEXT_CAPACITY,
    }
}

pub fn slot_width(data_type: DataType) -> usize {
    1 + payload_width(data_type)
}

/// Encodes `value` into exactly `slot_width(data_type)` bytes.
pub fn encode_value(value: &Value, data_type: DataType) -> Result<Vec<u8>, String> {
    let mut slot = vec![0u8; slot_width(data_type)];
    match (value, data_type) {
        (Value::Null, _) => return Ok(slot),
        (Value::Boolean(val), DataType::Boolean) => slot[1] = *val as u8,
        (Value::Integer(val), DataType::Integer) => slot[1..9].copy_from_slice(&val.to_le_bytes()),
        (Value::Integer(val), DataType::Real) => {
            slot[1..9].copy_from_slice(&(*val as f64).to_le_bytes())
        }
        (Value::Real(val), DataType::Real) => slot[1..9].copy_from_slice(&val.to_le_bytes()),
        (Value::Text(val), DataType::Text) => {
            let bytes = val.as_bytes();
            if bytes.len() > TEXT_CAPACITY {
                return Err(format!(
                    "text of {} bytes exceeds capacity of {} bytes",
                    bytes.len(),
                    TEXT_CAPACITY
                ));
            }
            slot[1] = bytes.len() as u8;
            slot[2..2 + bytes.len()].copy_from_slice(bytes);
        }
        (value, data_type) => {
            return Err(format!(
                "cannot encode {} as {}",
                value.type_name(),
                data_type
            ));
        }
    }
    slot[0] = PRESENT_MARKER;
    Ok(slot)
}

pub fn decode_value(slot: &[u8], data_type: DataType) -> Result<Value, String> {
    if slot.len() != slot_width(data_type) {
        return Err(format!(
            "slot is {} bytes, expected {}",
            slot.len(),
            slot_width(data_type)
        ));
    }
    match slot[0] {
        NULL_MARKER => return Ok(Value::Null),
        PRESENT_MARKER => {}
        marker => return Err(format!("invalid presence marker {:#04x}", marker)),
    }
    let payload = &slot[1..];
    match data_type {
        DataType::Boolean => match payload[0] {
            0 => Ok(Value::Boolean(false)),
            1 => Ok(Value::Boolean(true)),
            byte => Err(format!("invalid boolean byte {:#04x}", byte)),
        },
        DataType::Integer => Ok(Value::Integer(i64::from_le_bytes(fixed8(payload)))),
        DataType::Real => Ok(Value::Real(f64::from_le_bytes(fixed8(payload)))),
        DataType::Text => {
            let len = payload[0] as usize;
            String::from_utf8(payload[1..1 + len].to_vec())
                .map(Value::Text)
                .map_err(|e| format!("invalid UTF-8 text: {}", e))
        }
    }
}

fn fixed8(payload: &[u8]) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&payload[..8]);
    bytes
}
