//! Semantic checking of call sites
//!
//! A call is validated by binding it to the operator registered under its
//! name and handing the binding to the operator's operand type checker.
//! Aggregates are then checked against the aggregate rules of the
//! validator and of the scope the call appears in.

pub mod binding;
pub mod checker;
pub mod operator;
pub mod registry;
pub mod scope;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use binding::{CallBinding, OperatorBinding, TypeListBinding};
pub use checker::{
    FailureMode, FamilyOperandTypeChecker, LiteralOperandTypeChecker, OperandTypeChecker,
    SameOperandTypeChecker, SingleOperandTypeChecker, TypeCheck,
};
pub use operator::{Operator, OperatorKind, ReturnTypeRule};
pub use registry::{OperatorTable, operators};
pub use scope::{Clause, SchemaScope, TableInfo, ValidatorScope};
pub use validator::Validator;
