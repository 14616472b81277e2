//! Aggregate-specific call rules

use super::Validator;
use crate::ast::{Call, Expression};
use crate::error::{Error, Result};
use crate::semantic::operator::Operator;
use crate::semantic::scope::ValidatorScope;

impl Validator<'_> {
    /// Rules an aggregate call must satisfy beyond its operand types.
    ///
    /// Runs after the call passed operand checking. Checked in order: the
    /// DISTINCT/ALL quantifier, aggregates nested in an operand, then the
    /// scope's own aggregate-context rules.
    pub fn validate_aggregate_params(
        &self,
        operator: &Operator,
        call: &Call,
        scope: &dyn ValidatorScope,
    ) -> Result<()> {
        if call.quantifier.is_some() && !operator.is_quantifier_allowed() {
            return Err(Error::AggregateQuantifierNotAllowed {
                operator: operator.name().to_string(),
                span: call.span,
            });
        }

        let is_aggregate_call = |expr: &Expression| {
            expr.as_call()
                .is_some_and(|inner| self.operators().is_aggregate(&inner.name))
        };
        for operand in &call.operands {
            let nested = operand
                .expr
                .find(&is_aggregate_call)
                .and_then(Expression::as_call);
            if let Some(nested) = nested {
                return Err(Error::NestedAggregate {
                    operator: nested.name.to_uppercase(),
                    span: nested.span,
                });
            }
        }

        scope.validate_aggregate(call)
    }
}
