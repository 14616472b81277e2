//! The type model the checkers operate on: data types, type families,
//! operand-count ranges and the schema objects scopes resolve columns from.

pub mod data_type;
pub mod operand_count;
pub mod schema;

pub use data_type::{DataType, TypeFamily};
pub use operand_count::OperandCountRange;
pub use schema::{Column, Table};
