//! Single operand that must be a literal

use super::{FailureMode, OperandTypeChecker, SingleOperandTypeChecker, TypeCheck};
use crate::ast::{LiteralClass, Operand};
use crate::error::Error;
use crate::semantic::binding::CallBinding;
use crate::semantic::operator::Operator;
use crate::types::operand_count::OperandCountRange;

/// Requires the operand to be a compile-time constant.
///
/// `CAST(NULL AS t)` counts as the NULL literal, `CAST(CAST(NULL AS a) AS b)`
/// does not and is rejected as a non-literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOperandTypeChecker {
    allow_null: bool,
}

impl LiteralOperandTypeChecker {
    pub const fn new(allow_null: bool) -> Self {
        Self { allow_null }
    }}

impl SingleOperandTypeChecker for LiteralOperandTypeChecker {
    fn check_single_operand(
        &self,
        binding: &CallBinding<'_>,
        operand: &Operand,
        formal_index: usize,
        mode: FailureMode,
    ) -> TypeCheck {
        match operand.expr.literal_class() {
            LiteralClass::NullLiteral if self.allow_null => TypeCheck::Pass,
            LiteralClass::NullLiteral => TypeCheck::reject(mode, || Error::ArgumentMustNotBeNull {
                operator: binding.operator_name(),
                operand: formal_index,
                span: operand.span,
            }),
            LiteralClass::Literal | LiteralClass::LiteralChain => TypeCheck::Pass,
            LiteralClass::NonLiteral => TypeCheck::reject(mode, || Error::ArgumentMustBeLiteral {
                operator: binding.operator_name(),
                operand: formal_index,
                span: operand.span,
            }),
        }
    }
}

impl OperandTypeChecker for LiteralOperandTypeChecker {
    fn check(&self, binding: &CallBinding<'_>, mode: FailureMode) -> TypeCheck {
        match binding.call().operands.first() {
            Some(operand) => self.check_single_operand(binding, operand, 0, mode),
            None => TypeCheck::reject(mode, || binding.signature_error()),
        }
    }

    fn operand_count_range(&self) -> OperandCountRange {
        OperandCountRange::exact(1)
    }

    fn allowed_signatures(&self, _op: &Operator, _op_name: &str) -> String {
        "<LITERAL>".to_string()
    }
}
