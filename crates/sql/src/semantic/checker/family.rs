//! One type family per operand position

use super::{FailureMode, OperandTypeChecker, SingleOperandTypeChecker, TypeCheck};
use crate::ast::Operand;
use crate::error::Error;
use crate::semantic::binding::CallBinding;
use crate::semantic::operator::Operator;
use crate::types::data_type::TypeFamily;
use crate::types::operand_count::OperandCountRange;

/// Requires operand `i` to belong to `families[i]`.
///
/// A bare NULL literal is only accepted where the family is
/// [`TypeFamily::Any`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOperandTypeChecker {
    families: Vec<TypeFamily>,
}

impl FamilyOperandTypeChecker {
    pub fn new(families: Vec<TypeFamily>) -> Self {
        Self { families }
    }}

impl SingleOperandTypeChecker for FamilyOperandTypeChecker {
    fn check_single_operand(
        &self,
        binding: &CallBinding<'_>,
        operand: &Operand,
        formal_index: usize,
        mode: FailureMode,
    ) -> TypeCheck {
        let Some(&family) = self.families.get(formal_index) else {
            return TypeCheck::reject(mode, || binding.signature_error());
        };
        if family == TypeFamily::Any {
            return TypeCheck::Pass;
        }

        if operand.expr.is_null_literal(false) {
            return TypeCheck::reject(mode, || Error::NullOperandDisallowed {
                operator: binding.operator_name(),
                operand: formal_index,
                span: operand.span,
            });
        }

        if family.contains(&binding.operand_types()[formal_index]) {
            TypeCheck::Pass
        } else {
            TypeCheck::reject(mode, || binding.signature_error())
        }
    }
}

impl OperandTypeChecker for FamilyOperandTypeChecker {
    fn check(&self, binding: &CallBinding<'_>, mode: FailureMode) -> TypeCheck {
        for (i, operand) in binding.call().operands.iter().enumerate() {
            let verdict = self.check_single_operand(binding, operand, i, mode);
            if !verdict.is_pass() {
                return verdict;
            }
        }
        TypeCheck::Pass
    }

    fn operand_count_range(&self) -> OperandCountRange {
        OperandCountRange::exact(self.families.len())
    }

    fn allowed_signatures(&self, op: &Operator, op_name: &str) -> String {
        let families: Vec<String> = self.families.iter().map(ToString::to_string).collect();
        op.aliased_signature(op_name, &families)
    }
}
