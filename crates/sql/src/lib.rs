//! Operand type checking for SQL calls
//!
//! This crate validates the operands of operator, function and aggregate
//! calls in a SQL expression:
//! - Operand count ranges per operator
//! - Pluggable operand type-checking strategies with a probe mode that never
//!   fails and a throwing mode that reports the offending operand
//! - Aggregate rules applied on top of the function-level checks
//!
//! The builtin operators live in a process-wide table that is built once and
//! shared by all concurrent validations.

pub mod ast;
pub mod config;
mod error;
pub mod semantic;
pub mod types;

pub use config::ValidatorConfig;
pub use error::{Error, Result};
pub use semantic::{
    CallBinding, Clause, FailureMode, Operator, OperatorKind, OperatorTable, OperandTypeChecker,
    ReturnTypeRule, SchemaScope, TypeCheck, Validator, ValidatorScope, operators,
};
pub use types::{Column, DataType, OperandCountRange, Table, TypeFamily};
