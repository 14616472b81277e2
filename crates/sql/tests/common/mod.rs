//! Common test utilities for validation integration tests
#![allow(dead_code)]

use proven_sql_typecheck::ast::{Call, Expression, Literal, Operand, Quantifier, Span};
use proven_sql_typecheck::{
    Clause, Column, DataType, Error, Result, SchemaScope, Table, Validator, ValidatorConfig,
};

/// Test context holding a validator over the builtin operators and the
/// scope expressions are resolved against
pub struct TestContext {
    pub validator: Validator<'static>,
    pub scope: SchemaScope,
}

impl TestContext {
    /// Create a new test context with an empty scope
    pub fn new() -> Self {
        Self {
            validator: Validator::with_builtins(ValidatorConfig::for_testing()),
            scope: SchemaScope::new(),
        }
    }

    /// Start building a table that is added to the scope
    pub fn table(&mut self, name: &str) -> TableBuilder<'_> {
        TableBuilder::new(self, name)
    }

    /// Validate in the given clause instead of the select list
    pub fn in_clause(&mut self, clause: Clause) -> &mut Self {
        self.scope = self.scope.in_clause(clause);
        self
    }

    pub fn validate(&self, expr: &Expression) -> Result<DataType> {
        self.validator.validate_expression(expr, &self.scope)
    }

    pub fn probe(&self, expr: &Expression) -> Result<bool> {
        match expr {
            Expression::Call(call) => self.validator.probe_call(call, &self.scope),
            other => panic!("probe expects a call, got {:?}", other),
        }
    }

    /// Validate and return the error, panicking if validation succeeds
    pub fn validate_error(&self, expr: &Expression) -> Error {
        match self.validate(expr) {
            Ok(ty) => panic!("expected an error, got type {}", ty),
            Err(e) => e,
        }
    }

    pub fn assert_type(&self, expr: &Expression, expected: DataType) {
        match self.validate(expr) {
            Ok(ty) => assert_eq!(ty, expected, "wrong type for {:?}", expr),
            Err(e) => panic!("validation failed for {:?}: {}", expr, e),
        }
    }

    pub fn assert_valid(&self, expr: &Expression) {
        if let Err(e) = self.validate(expr) {
            panic!("validation failed for {:?}: {}", expr, e);
        }
    }

    pub fn assert_error_contains(&self, expr: &Expression, expected: &str) {
        let error = self.validate_error(expr).to_string();
        assert!(
            error.contains(expected),
            "Expected error containing '{}', got: {}",
            expected,
            error
        );
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for tables added to a test context's scope
pub struct TableBuilder<'a> {
    ctx: &'a mut TestContext,
    table_name: String,
    alias: Option<String>,
    columns: Vec<Column>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(ctx: &'a mut TestContext, table_name: &str) -> Self {
        Self {
            ctx,
            table_name: table_name.to_string(),
            alias: None,
            columns: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn column(mut self, name: &str, datatype: DataType) -> Self {
        self.columns.push(Column::new(name, datatype));
        self
    }

    pub fn nullable_column(mut self, name: &str, datatype: DataType) -> Self {
        self.columns.push(Column::new(name, datatype).nullable());
        self
    }

    /// Add the table to the scope
    pub fn create(self) {
        let table = Table::new(self.table_name, self.columns).unwrap();
        self.ctx.scope.add_table(table, self.alias).unwrap();
    }
}

/// Setup a test context with no tables
pub fn setup_test() -> TestContext {
    TestContext::new()
}

/// Setup a test context with a `sales` table
pub fn setup_with_tables() -> TestContext {
    let mut ctx = setup_test();
    ctx.table("sales")
        .column("id", DataType::I32)
        .column("amount", DataType::I32)
        .nullable_column("discount", DataType::Decimal(Some(10), Some(2)))
        .column("region", DataType::Text)
        .column("sold_at", DataType::Timestamp)
        .nullable_column("note", DataType::Text)
        .create();
    ctx
}

/// Expression builders
pub mod expr {
    use super::*;

    pub fn int(i: i128) -> Expression {
        Expression::Literal(Literal::Integer(i))
    }

    pub fn float(f: f64) -> Expression {
        Expression::Literal(Literal::Float(f))
    }

    pub fn string(s: &str) -> Expression {
        Expression::Literal(Literal::String(s.to_string()))
    }

    pub fn boolean(b: bool) -> Expression {
        Expression::Literal(Literal::Boolean(b))
    }

    pub fn null() -> Expression {
        Expression::Literal(Literal::Null)
    }

    pub fn col(name: &str) -> Expression {
        Expression::Column(None, name.to_string())
    }

    pub fn qualified(table: &str, name: &str) -> Expression {
        Expression::Column(Some(table.to_string()), name.to_string())
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

    /// A call whose operands are spaced out on line 1, starting after the name
    pub fn call(name: &str, operands: Vec<Expression>) -> Expression {
        let start = name.len() as u32 + 2;
        let operands: Vec<Operand> = operands
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let offset = start + 8 * i as u32;
                Operand::new(e, Span::on_line(1, offset, offset + 4))
            })
            .collect();
        let end = start + 8 * operands.len() as u32;
        Expression::Call(Call::new(name, operands, Span::on_line(1, 1, end)))
    }

    pub fn distinct(expr: Expression) -> Expression {
        quantified(expr, Quantifier::Distinct)
    }

    pub fn all(expr: Expression) -> Expression {
        quantified(expr, Quantifier::All)
    }

    fn quantified(expr: Expression, quantifier: Quantifier) -> Expression {
        match expr {
            Expression::Call(c) => Expression::Call(c.with_quantifier(quantifier)),
            other => panic!("quantifier on a non-call: {:?}", other),
        }
    }

    /// Span of operand `i` of a call built with [`call`]
    pub fn operand_span(expr: &Expression, i: usize) -> Span {
        expr.as_call().unwrap().operands[i].span
    }

    pub fn call_span(expr: &Expression) -> Span {
        expr.as_call().unwrap().span
    }
}
