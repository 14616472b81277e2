//! Operands must all be of comparable types

use super::{FailureMode, OperandTypeChecker, TypeCheck};
use crate::error::Error;
use crate::semantic::binding::{CallBinding, OperatorBinding};
use crate::semantic::operator::Operator;
use crate::types::operand_count::OperandCountRange;

const PLACEHOLDER: &str = "EQUIVALENT_TYPE";
const ELLIPSIS: &str = "...";
/// Operand count shown in the signature of a variadic checker. The check
/// itself accepts any count.
const VARIADIC_DISPLAY_ARITY: usize = 3;

/// Requires every operand to be comparable with its neighbour.
///
/// Only adjacent pairs are compared. Comparability is transitive over
/// non-NULL types and bare NULL literals are rejected first, so for those
/// operands the adjacent check implies mutual comparability.
///
/// An operand that is not a literal but is typed NULL still compares with
/// both neighbours. `COALESCE()` is typed NULL, so
/// `COALESCE(1, COALESCE(), 'x')` passes even though `1` and `'x'` are not
/// comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameOperandTypeChecker {
    /// `None` checks however many operands the call has
    n_operands: Option<usize>,
}

impl SameOperandTypeChecker {
    /// Checker for exactly `n_operands` operands
    pub const fn new(n_operands: usize) -> Self {
        Self {
            n_operands: Some(n_operands),
        }
    }

    /// Checker for any number of operands
    pub const fn variadic() -> Self {
        Self { n_operands: None }
    }

    pub fn is_variadic(&self) -> bool {
        self.n_operands.is_none()
    }

    /// Probe-only check over a binding without a call site
    pub fn check_operator_binding(&self, binding: &dyn OperatorBinding) -> bool {
        self.check_impl(binding, FailureMode::Probe, None).is_pass()
    }

    fn check_impl(
        &self,
        binding: &dyn OperatorBinding,
        mode: FailureMode,
        call: Option<&CallBinding<'_>>,
    ) -> TypeCheck {
        // The caller validated the operand count against our range
        let actual = self
            .n_operands
            .unwrap_or_else(|| binding.operand_count())
            .min(binding.operand_count());

        for i in 0..actual {
            if binding.is_operand_null(i, false) {
                return match call {
                    Some(call) => TypeCheck::reject(mode, || Error::NullOperandDisallowed {
                        operator: call.operator_name(),
                        operand: i,
                        span: call.operand_span(i),
                    }),
                    None => TypeCheck::Fail,
                };
            }
        }

        for i in 1..actual {
            if !binding
                .operand_type(i)
                .is_comparable_with(binding.operand_type(i - 1))
            {
                return match call {
                    Some(call) => TypeCheck::reject(mode, || Error::OperandsNotComparable {
                        operator: call.operator_name(),
                        span: call.call_span(),
                    }),
                    None => TypeCheck::Fail,
                };
            }
        }

        TypeCheck::Pass
    }
}

impl OperandTypeChecker for SameOperandTypeChecker {
    fn check(&self, binding: &CallBinding<'_>, mode: FailureMode) -> TypeCheck {
        self.check_impl(binding, mode, Some(binding))
    }

    fn operand_count_range(&self) -> OperandCountRange {
        match self.n_operands {
            Some(n) => OperandCountRange::exact(n),
            None => OperandCountRange::variadic(),
        }
    }

    fn allowed_signatures(&self, op: &Operator, op_name: &str) -> String {
        let count = self.n_operands.unwrap_or(VARIADIC_DISPLAY_ARITY);
        let mut placeholders = vec![PLACEHOLDER.to_string(); count];
        if self.is_variadic() {
            placeholders[VARIADIC_DISPLAY_ARITY - 1] = ELLIPSIS.to_string();
        }
        op.aliased_signature(op_name, &placeholders)
    }
}
