//! Helpers for unit tests that check calls against a fixed table

use super::binding::CallBinding;
use super::checker::{FailureMode, TypeCheck};
use super::operator::Operator;
use super::scope::SchemaScope;
use super::validator::Validator;
use crate::ast::{Call, Expression, Literal, Operand, Span};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::types::data_type::DataType;
use crate::types::schema::{Column, Table};

pub fn int(i: i128) -> Expression {
    Expression::Literal(Literal::Integer(i))
}

pub fn text(s: &str) -> Expression {
    Expression::Literal(Literal::String(s.to_string()))
}

pub fn null() -> Expression {
    Expression::Literal(Literal::Null)
}

pub fn column(name: &str) -> Expression {
    Expression::Column(None, name.to_string())
}

pub fn cast(expr: Expression, target: DataType) -> Expression {
    Expression::Cast {
        expr: Box::new(expr),
        target,
    }
}

pub fn chain(fragments: &[&str]) -> Expression {
    Expression::LiteralChain(
        fragments
            .iter()
            .map(|s| Literal::String(s.to_string()))
            .collect(),
    )
}

/// Call with operands laid out left to right on line 1
pub fn call(name: &str, operands: Vec<Expression>) -> Expression {
    Expression::Call(build_call(name, operands))
}

fn build_call(name: &str, operands: Vec<Expression>) -> Call {
    let start = name.len() as u32 + 2;
    let operands: Vec<Operand> = operands
        .into_iter()
        .enumerate()
        .map(|(i, expr)| {
            let offset = start + 10 * i as u32;
            Operand::new(expr, Span::on_line(1, offset, offset + 5))
        })
        .collect();
    let end = start + 10 * operands.len() as u32;
    Call::new(name, operands, Span::on_line(1, 1, end))
}

/// Table `t (amount INT, price DECIMAL(10, 2), name TEXT, created TIMESTAMP NULL)`
pub fn scope() -> SchemaScope {
    let table = Table::new(
        "t",
        vec![
            Column::new("amount", DataType::I32),
            Column::new("price", DataType::Decimal(Some(10), Some(2))),
            Column::new("name", DataType::Text),
            Column::new("created", DataType::Timestamp).nullable(),
        ],
    )
    .expect("valid test table");
    SchemaScope::new()
        .with_table(table, None)
        .expect("empty scope accepts a table")
}

/// A single call site, bound on demand to whatever operator a test supplies
pub struct TestCall {
    call: Call,
    scope: SchemaScope,
}

impl TestCall {
    pub fn new(name: &str, operands: Vec<Expression>) -> Self {
        Self {
            call: build_call(name, operands),
            scope: scope(),
        }
    }

    pub fn call(&self) -> &Call {
        &self.call
    }

    pub fn operand_span(&self, i: usize) -> Span {
        self.call.operands[i].span
    }

    pub fn call_span(&self) -> Span {
        self.call.span
    }

    /// Run `f` against a fresh binding of this call site to `operator`
    pub fn with_binding<R>(
        &self,
        operator: &Operator,
        f: impl FnOnce(&CallBinding<'_>) -> R,
    ) -> R {
        let validator = Validator::with_builtins(ValidatorConfig::for_testing());
        let operand_types = self
            .call
            .operands
            .iter()
            .map(|operand| validator.derive_type(&operand.expr, &self.scope))
            .collect::<Result<Vec<_>>>()
            .expect("operand types resolve");
        let binding =
            CallBinding::new(&validator, &self.scope, operator, &self.call, operand_types)
                .expect("one type per operand");
        f(&binding)
    }

    pub fn check(&self, operator: &Operator, mode: FailureMode) -> TypeCheck {
        self.with_binding(operator, |binding| operator.checker().check(binding, mode))
    }

    pub fn check_operand_types(
        &self,
        operator: &Operator,
        throw_on_failure: bool,
    ) -> Result<bool> {
        self.with_binding(operator, |binding| {
            operator
                .checker()
                .check_operand_types(binding, throw_on_failure)
        })
    }

    /// Both validation gates
    pub fn validate(&self, operator: &Operator) -> Result<()> {
        self.with_binding(operator, |binding| operator.validate_call(binding))
    }
}
