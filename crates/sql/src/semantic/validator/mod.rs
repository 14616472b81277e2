//! Expression validation
//!
//! The validator walks an expression bottom-up. Operands are typed first,
//! then each call is bound to its registered operator and validated with the
//! throwing checker contract. The derived type of a call comes from the
//! operator's return rule and feeds the binding of the enclosing call.

mod aggregate;

use super::binding::CallBinding;
use super::operator::Operator;
use super::registry::{OperatorTable, operators};
use super::scope::ValidatorScope;
use crate::ast::{Call, Expression, Literal, Span};
use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::types::data_type::DataType;
use crate::types::operand_count::OperandCountRange;

/// Validates expressions against an operator table.
///
/// Holds no per-statement state; one validator may be shared by any number
/// of concurrent compilations.
#[derive(Debug, Clone)]
pub struct Validator<'t> {
    operators: &'t OperatorTable,
    config: ValidatorConfig,
}

impl Validator<'static> {
    /// Validator over the builtin operator table
    pub fn with_builtins(config: ValidatorConfig) -> Self {
        Self::new(operators(), config)
    }
}

impl<'t> Validator<'t> {
    pub fn new(operators: &'t OperatorTable, config: ValidatorConfig) -> Self {
        Self { operators, config }
    }

    pub fn operators(&self) -> &'t OperatorTable {
        self.operators
    }

    /// Validate every call in `expr` and return the expression's type.
    /// The first failure is returned.
    pub fn validate_expression(
        &self,
        expr: &Expression,
        scope: &dyn ValidatorScope,
    ) -> Result<DataType> {
        self.validate_node(expr, root_span(expr), 1, scope)
    }

    /// Type of `expr` without checking any call in it
    pub fn derive_type(&self, expr: &Expression, scope: &dyn ValidatorScope) -> Result<DataType> {
        self.derive_node(expr, root_span(expr), 1, scope)
    }

    /// Probe whether `call` type-checks, without building a diagnostic.
    ///
    /// Returns `Err` only when the call cannot be bound at all: an unknown
    /// function, an unresolvable column or an over-deep operand. A type-check
    /// failure is always `Ok(false)`.
    pub fn probe_call(&self, call: &Call, scope: &dyn ValidatorScope) -> Result<bool> {
        let Some(operator) = self.lookup(call)? else {
            return Ok(true);
        };
        let operand_types = self.derive_operand_types(call, 1, scope)?;

        if !operator.operand_count_range().is_valid_count(call.operand_count()) {
            tracing::trace!(
                "Probe of {} failed: {} operands",
                operator.name(),
                call.operand_count()
            );
            return Ok(false);
        }

        let binding = CallBinding::new(self, scope, operator, call, operand_types)?;
        let verdict = operator.checker().check_operand_types(&binding, false)?;
        if !verdict {
            tracing::trace!("Probe of {} failed operand type check", operator.name());
        }
        Ok(verdict)
    }

    /// Registered operator for `call`. `None` if the function is unknown and
    /// unknown functions are allowed.
    fn lookup(&self, call: &Call) -> Result<Option<&'t Operator>> {
        match self.operators.lookup(&call.name) {
            Some(operator) => Ok(Some(operator)),
            None if self.config.allow_unknown_functions => Ok(None),
            None => Err(Error::UnknownFunction {
                name: call.name.to_uppercase(),
                span: call.span,
            }),
        }
    }

    fn check_depth(&self, depth: usize, span: Span) -> Result<()> {
        if depth > self.config.max_expression_depth {
            return Err(Error::ExpressionTooDeep {
                max_depth: self.config.max_expression_depth,
                span,
            });
        }
        Ok(())
    }

    fn validate_node(
        &self,
        expr: &Expression,
        span: Span,
        depth: usize,
        scope: &dyn ValidatorScope,
    ) -> Result<DataType> {
        self.check_depth(depth, span)?;

        match expr {
            Expression::Call(call) => {
                let mut operand_types = Vec::with_capacity(call.operands.len());
                for operand in &call.operands {
                    operand_types.push(self.validate_node(
                        &operand.expr,
                        operand.span,
                        depth + 1,
                        scope,
                    )?);
                }

                match self.lookup(call)? {
                    Some(operator) => self.validate_call(operator, call, operand_types, scope),
                    None => Ok(DataType::Nullable(Box::new(DataType::Text))),
                }
            }
            Expression::Cast { expr: inner, target } => {
                let inner = self.validate_node(inner, span, depth + 1, scope)?;
                Ok(cast_type(&inner, target))
            }
            _ => self.derive_node(expr, span, depth, scope),
        }
    }

    fn validate_call(
        &self,
        operator: &Operator,
        call: &Call,
        operand_types: Vec<DataType>,
        scope: &dyn ValidatorScope,
    ) -> Result<DataType> {
        let binding = CallBinding::new(self, scope, operator, call, operand_types)?;
        if let Err(e) = operator.validate_call(&binding) {
            tracing::debug!("Rejected call to {}: {}", operator.name(), e);
            return Err(e);
        }
        Ok(operator.return_type().derive(binding.operand_types()))
    }

    fn derive_node(
        &self,
        expr: &Expression,
        span: Span,
        depth: usize,
        scope: &dyn ValidatorScope,
    ) -> Result<DataType> {
        self.check_depth(depth, span)?;

        match expr {
            Expression::Literal(literal) => Ok(literal.data_type()),
            Expression::LiteralChain(fragments) => Ok(match fragments.first() {
                Some(Literal::Bytea(_)) => DataType::Bytea,
                _ => DataType::Text,
            }),
            Expression::Cast { expr: inner, target } => {
                let inner = self.derive_node(inner, span, depth + 1, scope)?;
                Ok(cast_type(&inner, target))
            }
            Expression::Column(table, column) => {
                scope.resolve_column(table.as_deref(), column, span)
            }
            Expression::Call(call) => {
                let operand_types = self.derive_operand_types(call, depth, scope)?;
                Ok(match self.lookup(call)? {
                    Some(operator) => operator.return_type().derive(&operand_types),
                    None => DataType::Nullable(Box::new(DataType::Text)),
                })
            }
        }
    }

    fn derive_operand_types(
        &self,
        call: &Call,
        depth: usize,
        scope: &dyn ValidatorScope,
    ) -> Result<Vec<DataType>> {
        call.operands
            .iter()
            .map(|operand| self.derive_node(&operand.expr, operand.span, depth + 1, scope))
            .collect()
    }

    /// Operand count range registered for `name`, if any
    pub fn operand_count_range(&self, name: &str) -> Option<OperandCountRange> {
        self.operators
            .lookup(name)
            .map(Operator::operand_count_range)
    }
}

/// Span used for nodes of `expr` that carry none of their own
fn root_span(expr: &Expression) -> Span {
    expr.as_call().map(|call| call.span).unwrap_or_default()
}

/// A cast keeps the nullability of its input
fn cast_type(inner: &DataType, target: &DataType) -> DataType {
    if inner.is_nullable() && !target.is_nullable() {
        target.clone().nullable()
    } else {
        target.clone()
    }
}
