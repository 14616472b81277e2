//! Operand type-checking strategies
//!
//! A checker decides whether the operand types of one call are legal for the
//! operator it is registered with. Checkers are immutable configuration
//! shared through the process-wide operator table, so they must be
//! `Send + Sync` and keep no per-call state.
//!
//! Every strategy answers through a single [`OperandTypeChecker::check`]
//! returning a [`TypeCheck`]. In [`FailureMode::Probe`] a failing check
//! returns [`TypeCheck::Fail`] without building a diagnostic; overload
//! resolution relies on that path being cheap and error-free. In
//! [`FailureMode::Throw`] the first failure is returned as
//! [`TypeCheck::Rejected`] with a diagnostic attributed to the offending
//! operand or to the call.

mod family;
mod literal;
mod same_type;

pub use family::FamilyOperandTypeChecker;
pub use literal::LiteralOperandTypeChecker;
pub use same_type::SameOperandTypeChecker;

use super::binding::CallBinding;
use super::operator::Operator;
use crate::ast::Operand;
use crate::error::{Error, Result};
use crate::types::operand_count::OperandCountRange;
use std::fmt;

/// Whether a failing check should produce a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Report failure as a plain `false`
    Probe,
    /// Report failure as an error naming the offending operand
    Throw,
}

impl FailureMode {
    pub fn from_throw(throw_on_failure: bool) -> Self {
        if throw_on_failure {
            FailureMode::Throw
        } else {
            FailureMode::Probe
        }
    }
}

/// Verdict of a single check
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum TypeCheck {
    Pass,
    /// Failed, no diagnostic built
    Fail,
    /// Failed with a diagnostic
    Rejected(Error),
}

impl TypeCheck {
    /// Failure in the given mode. The diagnostic is built only when throwing.
    pub fn reject(mode: FailureMode, diagnostic: impl FnOnce() -> Error) -> Self {
        match mode {
            FailureMode::Probe => TypeCheck::Fail,
            FailureMode::Throw => TypeCheck::Rejected(diagnostic()),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, TypeCheck::Pass)
    }
}

/// Strategy for checking the operand types of a call.
pub trait OperandTypeChecker: fmt::Debug + Send + Sync {
    /// Applies the rule to `binding`. Must not depend on anything but the
    /// binding and the checker's own configuration.
    fn check(&self, binding: &CallBinding<'_>, mode: FailureMode) -> TypeCheck;

    /// Boolean-or-error form of [`OperandTypeChecker::check`].
    ///
    /// With `throw_on_failure == false` this never returns `Err`. With
    /// `throw_on_failure == true` it never returns `Ok(false)`.
    fn check_operand_types(
        &self,
        binding: &CallBinding<'_>,
        throw_on_failure: bool,
    ) -> Result<bool> {
        let mode = FailureMode::from_throw(throw_on_failure);
        match (self.check(binding, mode), mode) {
            (TypeCheck::Pass, _) => Ok(true),
            (TypeCheck::Fail | TypeCheck::Rejected(_), FailureMode::Probe) => Ok(false),
            (TypeCheck::Fail, FailureMode::Throw) => Err(binding.signature_error()),
            (TypeCheck::Rejected(err), FailureMode::Throw) => Err(err),
        }
    }

    /// Operand counts this checker accepts
    fn operand_count_range(&self) -> OperandCountRange;

    /// Human-readable rendering of the accepted operand pattern, used in
    /// diagnostics and documentation
    fn allowed_signatures(&self, op: &Operator, op_name: &str) -> String;
}

/// A checker whose rule applies to one operand at a time, so it can be
/// composed per operand position.
pub trait SingleOperandTypeChecker: OperandTypeChecker {
    /// Checks `operand`, which appears at formal position `formal_index`
    fn check_single_operand(
        &self,
        binding: &CallBinding<'_>,
        operand: &Operand,
        formal_index: usize,
        mode: FailureMode,
    ) -> TypeCheck;
}
