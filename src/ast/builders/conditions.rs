//! Condition builders.

use crate::ast::builders::exprs::{bind, col};
use crate::ast::{CompareOp, Condition, Expr, SqlFragment, Value};

fn compare(column: &str, op: CompareOp, value: impl Into<Value>) -> Condition {
    Condition::Compare {
        op,
        lhs: col(column),
        rhs: bind(value),
    }
}

/// column = value
pub fn eq(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Eq, value)
}

/// column <> value
pub fn ne(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Ne, value)
}

/// column > value
pub fn gt(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Gt, value)
}

/// column >= value
pub fn ge(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Ge, value)
}

/// column < value
pub fn lt(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Lt, value)
}

/// column <= value
pub fn le(column: &str, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Le, value)
}

/// column LIKE pattern
pub fn like(column: &str, pattern: &str) -> Condition {
    compare(column, CompareOp::Like, pattern)
}

/// column NOT LIKE pattern
pub fn not_like(column: &str, pattern: &str) -> Condition {
    compare(column, CompareOp::NotLike, pattern)
}

/// column ILIKE pattern; emulated as LOWER/LIKE where not native
pub fn ilike(column: &str, pattern: &str) -> Condition {
    compare(column, CompareOp::ILike, pattern)
}

/// column NOT ILIKE pattern
pub fn not_ilike(column: &str, pattern: &str) -> Condition {
    compare(column, CompareOp::NotILike, pattern)
}

/// column IN (v1, v2, ...)
pub fn in_list<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Condition {
    Condition::In {
        lhs: col(column),
        list: values.into_iter().map(|v| bind(v)).collect(),
        negated: false,
    }
}

/// column NOT IN (v1, v2, ...)
pub fn not_in_list<V: Into<Value>>(
    column: &str,
    values: impl IntoIterator<Item = V>,
) -> Condition {
    Condition::In {
        lhs: col(column),
        list: values.into_iter().map(|v| bind(v)).collect(),
        negated: true,
    }
}

/// column BETWEEN low AND high
pub fn between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
    Condition::Between {
        expr: col(column),
        low: bind(low),
        high: bind(high),
        negated: false,
    }
}

/// column NOT BETWEEN low AND high
pub fn not_between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
    Condition::Between {
        expr: col(column),
        low: bind(low),
        high: bind(high),
        negated: true,
    }
}

/// column IS NULL
pub fn is_null(column: &str) -> Condition {
    Condition::IsNull(col(column))
}

/// column IS NOT NULL
pub fn is_not_null(column: &str) -> Condition {
    Condition::IsNotNull(col(column))
}

/// A boolean-valued expression used directly as a condition.
pub fn cond(expr: Expr) -> Condition {
    Condition::Bool(expr)
}

/// a AND b
pub fn and(a: Condition, b: Condition) -> Condition {
    a.and(b)
}

/// a OR b
pub fn or(a: Condition, b: Condition) -> Condition {
    a.or(b)
}

/// a XOR b
pub fn xor(a: Condition, b: Condition) -> Condition {
    a.xor(b)
}

/// NOT a
pub fn not(a: Condition) -> Condition {
    a.not()
}

/// An opaque SQL fragment used as a condition; always parenthesized when
/// rendered.
pub fn raw(sql: &str) -> Condition {
    Condition::Raw(SqlFragment::text(sql))
}

/// A raw condition over a prebuilt fragment with embedded expressions.
pub fn raw_cond(fragment: SqlFragment) -> Condition {
    Condition::Raw(fragment)
}
