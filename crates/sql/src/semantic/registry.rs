//! Operator table
//!
//! Operators are registered once when the table is built and only read
//! afterwards, so the process-wide table is shared between concurrently
//! compiled statements without any locking.

use super::checker::{FamilyOperandTypeChecker, LiteralOperandTypeChecker, SameOperandTypeChecker};
use super::operator::{Operator, ReturnTypeRule};
use crate::types::data_type::{DataType, TypeFamily};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Operators by upper-cased name
#[derive(Debug, Default)]
pub struct OperatorTable {
    operators: HashMap<String, Operator>,
}

impl OperatorTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with all builtin operators
    pub fn with_builtins() -> Self {
        let mut table = Self::new();

        // Comparison operators
        for name in ["=", "<>", "<", "<=", ">", ">="] {
            table.register(Operator::binary(
                name,
                Box::new(SameOperandTypeChecker::new(2)),
                ReturnTypeRule::Boolean,
            ));
        }
        table.register(Operator::prefix(
            "-",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Numeric])),
            ReturnTypeRule::FirstOperand,
        ));
        table.register(Operator::postfix(
            "IS NULL",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Any])),
            ReturnTypeRule::Fixed(DataType::Bool),
        ));

        // Type functions
        for name in ["COALESCE", "GREATEST", "LEAST"] {
            table.register(Operator::function(
                name,
                Box::new(SameOperandTypeChecker::variadic()),
                ReturnTypeRule::Coalesce,
            ));
        }
        table.register(Operator::function(
            "NULLIF",
            Box::new(SameOperandTypeChecker::new(2)),
            ReturnTypeRule::FirstOperandNullable,
        ));

        // Math functions
        table.register(Operator::function(
            "ABS",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Numeric])),
            ReturnTypeRule::FirstOperand,
        ));

        // Time/Date functions taking a literal precision
        table.register(Operator::function(
            "CURRENT_TIME",
            Box::new(LiteralOperandTypeChecker::new(false)),
            ReturnTypeRule::Fixed(DataType::Time),
        ));
        table.register(Operator::function(
            "CURRENT_TIMESTAMP",
            Box::new(LiteralOperandTypeChecker::new(false)),
            ReturnTypeRule::Fixed(DataType::Timestamp),
        ));

        // Aggregate functions
        table.register(Operator::aggregate(
            "COUNT",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Any])),
            ReturnTypeRule::Fixed(DataType::I64),
        ));
        table.register(Operator::aggregate(
            "SUM",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Numeric])),
            ReturnTypeRule::FirstOperandNullable,
        ));
        table.register(Operator::aggregate(
            "AVG",
            Box::new(FamilyOperandTypeChecker::new(vec![TypeFamily::Numeric])),
            ReturnTypeRule::Fixed(DataType::F64.nullable()),
        ));
        for name in ["MIN", "MAX"] {
            table.register(Operator::aggregate(
                name,
                Box::new(SameOperandTypeChecker::new(1)),
                ReturnTypeRule::FirstOperandNullable,
            ));
        }
        table.register(
            Operator::aggregate(
                "ANY_VALUE",
                Box::new(SameOperandTypeChecker::new(1)),
                ReturnTypeRule::FirstOperandNullable,
            )
            .without_quantifier(),
        );

        tracing::debug!("Built operator table with {} operators", table.len());
        table
    }

    /// Register an operator, replacing any previous one of the same name
    pub fn register(&mut self, operator: Operator) {
        let name = operator.name().to_string();
        if self.operators.insert(name.clone(), operator).is_some() {
            tracing::warn!("Operator {} registered twice; keeping the latest", name);
        }
    }

    /// Look up an operator by name, case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&Operator> {
        self.operators.get(&name.to_uppercase())
    }

    /// Check if an operator is an aggregate
    pub fn is_aggregate(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Operator::is_aggregate)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }}

// Global static table
static OPERATORS: LazyLock<OperatorTable> = LazyLock::new(OperatorTable::with_builtins);

/// The process-wide table of builtin operators
pub fn operators() -> &'static OperatorTable {
    &OPERATORS
}
