pub mod common;
pub mod where_processor;
