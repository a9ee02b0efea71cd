//! Core rendering tests: operands, flattening, binds, formatting.

use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::{BinaryOp, Condition, SqlFragment, Value};
use crate::dialect::Dialect;
use crate::render::{render, render_with, ToSql};
use crate::settings::Settings;

fn sql(cond: &Condition, dialect: Dialect) -> String {
    render(cond, dialect).unwrap().sql
}

#[test]
fn test_comparison_with_indexed_binds() {
    let cond = eq("active", true);
    let rendered = render(&cond, Dialect::Postgres).unwrap();
    assert_eq!(rendered.sql, "active = $1");
    assert_eq!(rendered.binds, vec![Value::Bool(true)]);
}

#[test]
fn test_inline_style_produces_no_binds() {
    let cond = eq("name", "O'Brien");
    let rendered = render_with(&cond, Dialect::Postgres, &Settings::inline()).unwrap();
    assert_eq!(rendered.sql, "name = 'O''Brien'");
    assert!(rendered.binds.is_empty());
}

#[test]
fn test_bind_order_is_depth_first_left_to_right() {
    let cond = eq("a", 1).and(eq("b", 2).or(eq("c", 3)));
    let rendered = render(&cond, Dialect::Postgres).unwrap();
    assert_eq!(rendered.sql, "a = $1 AND (b = $2 OR c = $3)");
    assert_eq!(
        rendered.binds,
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn test_associative_chains_flatten() {
    let cond = eq("a", 1).and(eq("b", 2)).and(eq("c", 3)).and(eq("d", 4));
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "a = $1 AND b = $2 AND c = $3 AND d = $4"
    );
}

#[test]
fn test_mixed_operators_parenthesize_by_kind() {
    let cond = eq("a", 1).or(eq("b", 2)).and(eq("c", 3));
    assert_eq!(sql(&cond, Dialect::Postgres), "(a = $1 OR b = $2) AND c = $3");
}

#[test]
fn test_not_wraps_its_operand() {
    let cond = eq("a", 1).not();
    assert_eq!(sql(&cond, Dialect::Postgres), "NOT (a = $1)");
}

#[test]
fn test_in_list() {
    let cond = in_list("status", ["new", "open"]);
    let rendered = render(&cond, Dialect::Postgres).unwrap();
    assert_eq!(rendered.sql, "status IN ($1, $2)");
    assert_eq!(
        rendered.binds,
        vec![Value::String("new".into()), Value::String("open".into())]
    );
}

#[test]
fn test_empty_in_list_never_matches() {
    let empty: [i64; 0] = [];
    assert_eq!(sql(&in_list("id", empty), Dialect::Postgres), "1 = 0");
    assert_eq!(sql(&not_in_list("id", empty), Dialect::Postgres), "1 = 1");
}

#[test]
fn test_between_and_null_predicates() {
    assert_eq!(
        sql(&between("age", 18, 65), Dialect::Postgres),
        "age BETWEEN $1 AND $2"
    );
    assert_eq!(
        sql(&not_between("age", 18, 65), Dialect::Postgres),
        "age NOT BETWEEN $1 AND $2"
    );
    assert_eq!(sql(&is_null("email"), Dialect::Postgres), "email IS NULL");
    assert_eq!(
        sql(&is_not_null("email"), Dialect::Postgres),
        "email IS NOT NULL"
    );
}

#[test]
fn test_raw_fragment_is_always_parenthesized() {
    let cond = raw("a = b");
    assert_eq!(sql(&cond, Dialect::Postgres), "(a = b)");
    assert_eq!(sql(&cond, Dialect::MySql), "(a = b)");
    assert_eq!(sql(&cond, Dialect::Oracle), "(a = b)");
}

#[test]
fn test_raw_fragment_with_embedded_expressions_collects_binds() {
    let fragment = SqlFragment::text("price * ")
        .push_expr(bind(3i64))
        .push_text(" > ")
        .push_expr(bind(100i64));
    let cond = raw_cond(fragment).and(eq("active", true));

    let rendered = render(&cond, Dialect::Postgres).unwrap();
    assert_eq!(rendered.sql, "(price * $1 > $2) AND active = $3");
    assert_eq!(
        rendered.binds,
        vec![Value::Int(3), Value::Int(100), Value::Bool(true)]
    );
}

#[test]
fn test_qualified_columns_and_functions() {
    let cond = Condition::Compare {
        op: crate::ast::CompareOp::Eq,
        lhs: col("u.id"),
        rhs: func("COALESCE", [col("o.user_id"), lit(0i64)]),
    };
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "u.id = COALESCE(o.user_id, 0)"
    );
}

#[test]
fn test_binary_expressions_wrap_nested_operands() {
    let expr = binary(
        binary(col("a"), BinaryOp::Add, col("b")),
        BinaryOp::Mul,
        col("c"),
    );
    let cond = cond(expr).xor(eq("x", 1));
    // expression operand of the Xor emulation is wrapped
    assert_eq!(sql(&cond, Dialect::Postgres), "((a + b) * c) <> (x = $1)");
}

#[test]
fn test_case_expression() {
    let expr = case_when(
        [
            (eq("status", "new"), lit(1i64)),
            (eq("status", "open"), lit(2i64)),
        ],
        Some(lit(0i64)),
    );
    let cond = Condition::Compare {
        op: crate::ast::CompareOp::Eq,
        lhs: expr,
        rhs: lit(1i64),
    };
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "CASE WHEN status = $1 THEN 1 WHEN status = $2 THEN 2 ELSE 0 END = 1"
    );
}

#[test]
fn test_formatted_output_indents_associative_chains() {
    let cond = eq("a", 1).and(eq("b", 2));
    let rendered = render_with(
        &cond,
        Dialect::Postgres,
        &Settings::default().formatted(),
    )
    .unwrap();
    assert_eq!(rendered.sql, "a = $1\nAND b = $2");
}

#[test]
fn test_to_sql_is_the_inline_form() {
    let cond = eq("n", 5).and(is_null("m"));
    assert_eq!(
        cond.to_sql(Dialect::Postgres).unwrap(),
        "n = 5 AND m IS NULL"
    );
}

#[test]
fn test_cast_renders_portably() {
    let c = cond(cast(col("n"), "text"));
    assert_eq!(sql(&c, Dialect::Postgres), "CAST(n AS text)");
}
