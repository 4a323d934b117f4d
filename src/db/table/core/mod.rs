pub mod column;
pub mod constraint;
pub mod encoding;
pub mod row;
pub mod table;
pub mod value;
