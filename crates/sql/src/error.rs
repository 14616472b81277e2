//! Error types for operand type checking and call validation

use crate::ast::Span;
use crate::types::operand_count::OperandCountRange;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Operand type-checking errors
    #[error("{span}: Illegal use of 'NULL'")]
    NullOperandDisallowed {
        operator: String,
        operand: usize,
        span: Span,
    },

    #[error("{span}: Parameters must be of the same type")]
    OperandsNotComparable { operator: String, span: Span },

    #[error("{span}: Argument to function '{operator}' must be a literal")]
    ArgumentMustBeLiteral {
        operator: String,
        operand: usize,
        span: Span,
    },

    #[error("{span}: Argument to function '{operator}' must not be NULL")]
    ArgumentMustNotBeNull {
        operator: String,
        operand: usize,
        span: Span,
    },

    #[error(
        "{span}: Cannot apply '{operator}' to arguments of type {actual}. \
         Supported form(s): {allowed}"
    )]
    SignatureMismatch {
        operator: String,
        actual: String,
        allowed: String,
        span: Span,
    },

    #[error(
        "{span}: Invalid number of arguments to function '{operator}'. \
         Was expecting {expected} arguments"
    )]
    WrongOperandCount {
        operator: String,
        expected: OperandCountRange,
        actual: usize,
        span: Span,
    },

    // Aggregate errors
    #[error("{span}: DISTINCT/ALL not allowed with {operator} function")]
    AggregateQuantifierNotAllowed { operator: String, span: Span },

    #[error("{span}: Aggregate expressions cannot be nested")]
    NestedAggregate { operator: String, span: Span },

    #[error("{span}: Aggregate expression is illegal in WHERE clause")]
    AggregateIllegalInWhere { operator: String, span: Span },

    #[error("{span}: Aggregate expression is illegal in GROUP BY clause")]
    AggregateIllegalInGroupBy { operator: String, span: Span },

    // Resolution errors
    #[error("{span}: No match found for function signature {name}")]
    UnknownFunction { name: String, span: Span },

    #[error("{span}: Column '{column}' not found in any table")]
    ColumnNotFound { column: String, span: Span },

    #[error("{span}: Column '{column}' is ambiguous")]
    AmbiguousColumn { column: String, span: Span },

    #[error("{span}: Expression nesting exceeds the maximum depth of {max_depth}")]
    ExpressionTooDeep { max_depth: usize, span: Span },

    // Registration and configuration errors
    #[error("Invalid operand count range: max {max} is less than min {min}")]
    InvalidOperandCountRange { min: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    /// Source span the error is attributed to, if any
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::NullOperandDisallowed { span, .. }
            | Error::OperandsNotComparable { span, .. }
            | Error::ArgumentMustBeLiteral { span, .. }
            | Error::ArgumentMustNotBeNull { span, .. }
            | Error::SignatureMismatch { span, .. }
            | Error::WrongOperandCount { span, .. }
            | Error::AggregateQuantifierNotAllowed { span, .. }
            | Error::NestedAggregate { span, .. }
            | Error::AggregateIllegalInWhere { span, .. }
            | Error::AggregateIllegalInGroupBy { span, .. }
            | Error::UnknownFunction { span, .. }
            | Error::ColumnNotFound { span, .. }
            | Error::AmbiguousColumn { span, .. }
            | Error::ExpressionTooDeep { span, .. } => Some(*span),
            Error::InvalidOperandCountRange { .. } | Error::Config(_) | Error::InvalidValue(_) => {
                None
            }
        }
    }

    /// Index of the operand the error is attributed to, for operand-level errors
    pub fn operand_index(&self) -> Option<usize> {
        match self {
            Error::NullOperandDisallowed { operand, .. }
            | Error::ArgumentMustBeLiteral { operand, .. }
            | Error::ArgumentMustNotBeNull { operand, .. } => Some(*operand),
            _ => None,
        }
    }
}
