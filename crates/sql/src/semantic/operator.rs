//! Operator descriptors as registered in the operator table

use super::binding::CallBinding;
use super::checker::OperandTypeChecker;
use crate::error::{Error, Result};
use crate::types::data_type::DataType;
use crate::types::operand_count::OperandCountRange;
use std::fmt;

/// Syntactic form of an operator, plus aggregate-specific settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// `NAME(a, b, ...)`
    Function,
    /// A function that aggregates a set of rows
    Aggregate { quantifier_allowed: bool },
    /// `a op b`
    Binary,
    /// `op a`
    Prefix,
    /// `a op`
    Postfix,
}

/// Declared result type of a registration, used to type nested calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnTypeRule {
    /// BOOLEAN, nullable if any operand is
    Boolean,
    /// Always this type
    Fixed(DataType),
    /// Type of the first operand
    FirstOperand,
    /// Type of the first operand, always nullable
    FirstOperandNullable,
    /// First non-nullable operand type, otherwise the nullable first type
    Coalesce,
}

impl ReturnTypeRule {
    pub fn derive(&self, operand_types: &[DataType]) -> DataType {
        let first = || operand_types.first().cloned().unwrap_or(DataType::Null);
        match self {
            ReturnTypeRule::Boolean => {
                if operand_types.iter().any(DataType::is_nullable) {
                    DataType::Bool.nullable()
                } else {
                    DataType::Bool
                }
            }
            ReturnTypeRule::Fixed(ty) => ty.clone(),
            ReturnTypeRule::FirstOperand => first(),
            ReturnTypeRule::FirstOperandNullable => first().nullable(),
            ReturnTypeRule::Coalesce => {
                if let Some(ty) = operand_types.iter().find(|t| !t.is_nullable()) {
                    return ty.clone();
                }
                operand_types
                    .iter()
                    .find(|t| **t != DataType::Null)
                    .cloned()
                    .unwrap_or(DataType::Null)
            }
        }
    }
}

/// An operator, function or aggregate and the strategy that checks its
/// operands.
pub struct Operator {
    name: String,
    kind: OperatorKind,
    checker: Box<dyn OperandTypeChecker>,
    return_type: ReturnTypeRule,
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("checker", &self.checker)
            .finish()
    }
}

impl Operator {
    pub fn new(
        name: impl Into<String>,
        kind: OperatorKind,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            kind,
            checker,
            return_type,
        }
    }

    pub fn function(
        name: impl Into<String>,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self::new(name, OperatorKind::Function, checker, return_type)
    }

    /// An aggregate that accepts DISTINCT/ALL
    pub fn aggregate(
        name: impl Into<String>,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self::new(
            name,
            OperatorKind::Aggregate {
                quantifier_allowed: true,
            },
            checker,
            return_type,
        )
    }

    pub fn binary(
        name: impl Into<String>,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self::new(name, OperatorKind::Binary, checker, return_type)
    }

    pub fn prefix(
        name: impl Into<String>,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self::new(name, OperatorKind::Prefix, checker, return_type)
    }

    pub fn postfix(
        name: impl Into<String>,
        checker: Box<dyn OperandTypeChecker>,
        return_type: ReturnTypeRule,
    ) -> Self {
        Self::new(name, OperatorKind::Postfix, checker, return_type)
    }

    /// Disallow DISTINCT/ALL on an aggregate
    pub fn without_quantifier(mut self) -> Self {
        if let OperatorKind::Aggregate { .. } = self.kind {
            self.kind = OperatorKind::Aggregate {
                quantifier_allowed: false,
            };
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn checker(&self) -> &dyn OperandTypeChecker {
        self.checker.as_ref()
    }

    pub fn return_type(&self) -> &ReturnTypeRule {
        &self.return_type
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, OperatorKind::Aggregate { .. })
    }

    /// Whether DISTINCT/ALL may be written on a call. Never true for
    /// non-aggregates.
    pub fn is_quantifier_allowed(&self) -> bool {
        matches!(
            self.kind,
            OperatorKind::Aggregate {
                quantifier_allowed: true
            }
        )
    }

    pub fn operand_count_range(&self) -> OperandCountRange {
        self.checker.operand_count_range()
    }

    /// Allowed signatures under the operator's own name
    pub fn allowed_signatures(&self) -> String {
        self.checker.allowed_signatures(self, &self.name)
    }

    /// Template for rendering a signature with `operand_count` operands.
    /// `{0}` is the operator name, `{1}`.. the operands. `None` means
    /// function syntax.
    pub fn signature_template(&self, operand_count: usize) -> Option<&'static str> {
        match (self.kind, operand_count) {
            (OperatorKind::Binary, 2) => Some("{1} {0} {2}"),
            (OperatorKind::Prefix, 1) => Some("{0}{1}"),
            (OperatorKind::Postfix, 1) => Some("{1} {0}"),
            _ => None,
        }
    }

    /// Renders `types` as a call of this operator named `op_name`.
    /// Each type is upper-cased and wrapped in `<...>`; an ellipsis entry is
    /// rendered bare.
    pub fn aliased_signature(&self, op_name: &str, types: &[String]) -> String {
        let placeholders: Vec<String> = types
            .iter()
            .map(|t| {
                if t == "..." {
                    t.clone()
                } else {
                    format!("<{}>", t.to_uppercase())
                }
            })
            .collect();

        match self.signature_template(types.len()) {
            Some(template) => {
                let mut values = Vec::with_capacity(placeholders.len() + 1);
                values.push(op_name.to_string());
                values.extend(placeholders);
                format_template(template, &values)
            }
            None => format!("{}({})", op_name, placeholders.join(", ")),
        }
    }

    /// Structural pre-check of the call's operand count
    pub fn check_operand_count(&self, binding: &CallBinding<'_>) -> Result<()> {
        let range = self.operand_count_range();
        let actual = binding.call().operand_count();
        if range.is_valid_count(actual) {
            Ok(())
        } else {
            Err(Error::WrongOperandCount {
                operator: self.name.clone(),
                expected: range,
                actual,
                span: binding.call_span(),
            })
        }
    }

    /// Validates a call of this operator in two gates: as a function call,
    /// then, for aggregates only, against the aggregate rules of the
    /// validator and scope. The second gate is never reached if the first
    /// fails.
    pub fn validate_call(&self, binding: &CallBinding<'_>) -> Result<()> {
        let call = binding.call();

        if call.quantifier.is_some() && !self.is_aggregate() {
            return Err(Error::AggregateQuantifierNotAllowed {
                operator: self.name.clone(),
                span: call.span,
            });
        }
        self.check_operand_count(binding)?;
        if !self.checker.check_operand_types(binding, true)? {
            return Err(binding.signature_error());
        }

        if self.is_aggregate() {
            binding
                .validator()
                .validate_aggregate_params(self, call, binding.scope())?;
        }
        Ok(())
    }
}

/// Substitutes `{n}` with `values[n]`. Unknown indexes are kept verbatim.
fn format_template(template: &str, values: &[String]) -> String {
    let capacity = template.len() + values.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                match after[..close].parse::<usize>().ok().and_then(|i| values.get(i)) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
