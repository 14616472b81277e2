//! Bindings: an operator paired with the operands of one call

use super::operator::Operator;
use super::scope::ValidatorScope;
use super::validator::Validator;
use crate::ast::{Call, Span};
use crate::error::{Error, Result};
use crate::types::data_type::DataType;

/// Operand information a checker can inspect without a call site.
pub trait OperatorBinding {
    /// The operator being checked
    fn operator(&self) -> &Operator;

    /// Actual number of operands
    fn operand_count(&self) -> usize;

    /// Resolved type of operand `i`
    fn operand_type(&self, i: usize) -> &DataType;

    /// Whether operand `i` is the NULL literal. With `allow_cast`, a NULL
    /// under exactly one CAST counts as well.
    fn is_operand_null(&self, i: usize, allow_cast: bool) -> bool;
}

/// Binding of one call site, created per validation attempt and dropped
/// once the check returns.
///
/// Operand types are resolved before the binding is built, so checkers only
/// ever fail on their own rule.
pub struct CallBinding<'a> {
    validator: &'a Validator<'a>,
    scope: &'a dyn ValidatorScope,
    operator: &'a Operator,
    call: &'a Call,
    operand_types: Vec<DataType>,
}

impl<'a> CallBinding<'a> {
    /// Bind `call` to `operator`. `operand_types` must hold one resolved type
    /// per operand, in operand order.
    pub fn new(
        validator: &'a Validator<'a>,
        scope: &'a dyn ValidatorScope,
        operator: &'a Operator,
        call: &'a Call,
        operand_types: Vec<DataType>,
    ) -> Result<Self> {
        if call.operands.len() != operand_types.len() {
            return Err(Error::InvalidValue(format!(
                "{} operand types given for {} operands of {}",
                operand_types.len(),
                call.operands.len(),
                operator.name()
            )));
        }
        Ok(Self {
            validator,
            scope,
            operator,
            call,
            operand_types,
        })
    }

    pub fn validator(&self) -> &'a Validator<'a> {
        self.validator
    }

    pub fn scope(&self) -> &'a dyn ValidatorScope {
        self.scope
    }

    pub fn call(&self) -> &'a Call {
        self.call
    }

    pub fn operand_types(&self) -> &[DataType] {
        &self.operand_types
    }

    pub fn operand_span(&self, i: usize) -> Span {
        self.call.operands[i].span
    }

    pub fn call_span(&self) -> Span {
        self.call.span
    }

    /// Name diagnostics use for the operator
    pub fn operator_name(&self) -> String {
        self.operator.name().to_string()
    }

    /// "Cannot apply" diagnostic listing the actual operand types and the
    /// operator's allowed signatures
    pub fn signature_error(&self) -> Error {
        let actual: Vec<String> = self.operand_types.iter().map(ToString::to_string).collect();
        Error::SignatureMismatch {
            operator: self.operator_name(),
            actual: format!(
                "'{}'",
                self.operator.aliased_signature(self.operator.name(), &actual)
            ),
            allowed: format!("'{}'", self.operator.allowed_signatures()),
            span: self.call.span,
        }
    }
}

impl OperatorBinding for CallBinding<'_> {
    fn operator(&self) -> &Operator {
        self.operator
    }

    fn operand_count(&self) -> usize {
        self.call.operands.len()
    }

    fn operand_type(&self, i: usize) -> &DataType {
        &self.operand_types[i]
    }

    fn is_operand_null(&self, i: usize, allow_cast: bool) -> bool {
        self.call.operands[i].expr.is_null_literal(allow_cast)
    }
}

/// Binding over a plain list of operand types, for probing an operator
/// without a call site.
pub struct TypeListBinding<'a> {
    operator: &'a Operator,
    types: Vec<DataType>,
}

impl<'a> TypeListBinding<'a> {
    pub fn new(operator: &'a Operator, types: Vec<DataType>) -> Self {
        Self { operator, types }
    }
}

impl OperatorBinding for TypeListBinding<'_> {
    fn operator(&self) -> &Operator {
        self.operator
    }

    fn operand_count(&self) -> usize {
        self.types.len()
    }

    fn operand_type(&self, i: usize) -> &DataType {
        &self.types[i]
    }

    fn is_operand_null(&self, i: usize, _allow_cast: bool) -> bool {
        self.types[i] == DataType::Null
    }
}
