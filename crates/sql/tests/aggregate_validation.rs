//! Aggregate calls: function-level checks first, aggregate rules second

mod common;

use common::expr::{all, call, call_span, col, distinct, int, null, string};
use common::setup_with_tables;
use proven_sql_typecheck::{Clause, DataType, Error};

#[test]
fn test_aggregate_types() {
    let ctx = setup_with_tables();

    ctx.assert_type(&call("COUNT", vec![col("id")]), DataType::I64);
    ctx.assert_type(&call("COUNT", vec![null()]), DataType::I64);
    ctx.assert_type(&call("SUM", vec![col("amount")]), DataType::I32.nullable());
    ctx.assert_type(&call("AVG", vec![col("discount")]), DataType::F64.nullable());
    ctx.assert_type(&call("MIN", vec![col("region")]), DataType::Text.nullable());
    ctx.assert_type(&call("MAX", vec![col("sold_at")]), DataType::Timestamp.nullable());
    ctx.assert_type(&call("ANY_VALUE", vec![col("note")]), DataType::Text.nullable());
}

#[test]
fn test_aggregate_operand_types() {
    let ctx = setup_with_tables();

    ctx.assert_error_contains(
        &call("SUM", vec![col("region")]),
        "Cannot apply 'SUM' to arguments of type 'SUM(<VARCHAR>)'. \
         Supported form(s): 'SUM(<NUMERIC>)'",
    );
    ctx.assert_error_contains(&call("AVG", vec![null()]), "Illegal use of 'NULL'");
    ctx.assert_error_contains(&call("MAX", vec![null()]), "Illegal use of 'NULL'");
    ctx.assert_error_contains(
        &call("COUNT", vec![col("id"), col("amount")]),
        "Invalid number of arguments to function 'COUNT'",
    );
}

#[test]
fn test_nested_aggregates_invalid() {
    let ctx = setup_with_tables();

    // SUM(COUNT(amount))
    let inner = call("COUNT", vec![col("amount")]);
    let inner_span = call_span(&inner);
    let expr = call("SUM", vec![inner]);
    match ctx.validate_error(&expr) {
        Error::NestedAggregate { operator, span } => {
            assert_eq!(operator, "COUNT");
            assert_eq!(span, inner_span);
        }
        other => panic!("unexpected error: {}", other),
    }
    ctx.assert_error_contains(&expr, "Aggregate expressions cannot be nested");
}

#[test]
fn test_aggregate_in_non_aggregate_function_valid() {
    let ctx = setup_with_tables();

    // ABS(AVG(amount))
    ctx.assert_type(
        &call("ABS", vec![call("AVG", vec![col("amount")])]),
        DataType::F64.nullable(),
    );
}

#[test]
fn test_multiple_aggregates_same_expression_valid() {
    let ctx = setup_with_tables();

    // SUM(amount) > AVG(amount)
    ctx.assert_type(
        &call(
            ">",
            vec![call("SUM", vec![col("amount")]), call("AVG", vec![col("amount")])],
        ),
        DataType::Bool.nullable(),
    );
}

#[test]
fn test_aggregate_nested_in_scalar_inside_aggregate() {
    let ctx = setup_with_tables();

    // MAX(COALESCE(SUM(amount), 0))
    let expr = call(
        "MAX",
        vec![call(
            "COALESCE",
            vec![call("SUM", vec![col("amount")]), int(0)],
        )],
    );
    assert!(matches!(
        ctx.validate_error(&expr),
        Error::NestedAggregate { operator, .. } if operator == "SUM"
    ));
}

#[test]
fn test_quantifiers() {
    let ctx = setup_with_tables();

    ctx.assert_valid(&distinct(call("COUNT", vec![col("region")])));
    ctx.assert_valid(&all(call("SUM", vec![col("amount")])));
    ctx.assert_valid(&distinct(call("MIN", vec![col("amount")])));

    ctx.assert_error_contains(
        &distinct(call("ANY_VALUE", vec![col("amount")])),
        "DISTINCT/ALL not allowed with ANY_VALUE function",
    );
    ctx.assert_error_contains(
        &all(call("ANY_VALUE", vec![col("amount")])),
        "DISTINCT/ALL not allowed with ANY_VALUE function",
    );
    ctx.assert_error_contains(
        &distinct(call("COALESCE", vec![col("amount")])),
        "DISTINCT/ALL not allowed with COALESCE function",
    );
}

#[test]
fn test_function_gate_runs_before_aggregate_gate() {
    let ctx = setup_with_tables();

    // DISTINCT ANY_VALUE(NULL): the NULL operand fails first
    assert!(matches!(
        ctx.validate_error(&distinct(call("ANY_VALUE", vec![null()]))),
        Error::NullOperandDisallowed { .. }
    ));

    // SUM(COUNT(amount), 1): the operand count fails before nesting is seen
    assert!(matches!(
        ctx.validate_error(&call(
            "SUM",
            vec![call("COUNT", vec![col("amount")]), int(1)]
        )),
        Error::WrongOperandCount { .. }
    ));
}

#[test]
fn test_aggregate_in_where() {
    let mut ctx = setup_with_tables();
    ctx.in_clause(Clause::Where);

    ctx.assert_error_contains(
        &call("=", vec![call("COUNT", vec![col("id")]), int(1)]),
        "Aggregate expression is illegal in WHERE clause",
    );
    // scalar functions are fine
    ctx.assert_valid(&call("=", vec![col("region"), string("east")]));
    // a failing operand check is still reported as such
    assert!(matches!(
        ctx.validate_error(&call("SUM", vec![col("region")])),
        Error::SignatureMismatch { .. }
    ));
}

#[test]
fn test_aggregate_in_group_by() {
    let mut ctx = setup_with_tables();
    ctx.in_clause(Clause::GroupBy);

    ctx.assert_error_contains(
        &call("MAX", vec![col("amount")]),
        "Aggregate expression is illegal in GROUP BY clause",
    );
}

#[test]
fn test_aggregate_in_having_and_order_by() {
    let mut ctx = setup_with_tables();
    ctx.in_clause(Clause::Having);
    ctx.assert_valid(&call(">", vec![call("SUM", vec![col("amount")]), int(100)]));

    ctx.in_clause(Clause::OrderBy);
    ctx.assert_valid(&call("AVG", vec![col("amount")]));
}
