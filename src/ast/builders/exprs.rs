//! Expression builders.

use crate::ast::{BinaryOp, Condition, Expr, SqlFragment, Value};

/// A column reference. A single `.` splits a qualifier from the name:
/// `col("u.email")` is the column `email` on `u`.
pub fn col(name: &str) -> Expr {
    match name.split_once('.') {
        Some((qualifier, rest)) => Expr::Column {
            qualifier: Some(qualifier.to_string()),
            name: rest.to_string(),
        },
        None => Expr::Column {
            qualifier: None,
            name: name.to_string(),
        },
    }
}

/// A value inlined into the SQL text.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// A value bound through a placeholder.
pub fn bind(value: impl Into<Value>) -> Expr {
    Expr::Bind(value.into())
}

/// A function call expression.
pub fn func(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function {
        name: name.to_string(),
        args: args.into_iter().collect(),
    }
}

/// A standard CAST.
pub fn cast(expr: Expr, ty: &str) -> Expr {
    Expr::Cast {
        expr: Box::new(expr),
        ty: ty.to_string(),
    }
}

/// A binary value expression.
pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

/// A searched CASE expression.
pub fn case_when(
    branches: impl IntoIterator<Item = (Condition, Expr)>,
    otherwise: Option<Expr>,
) -> Expr {
    Expr::Case {
        branches: branches.into_iter().collect(),
        otherwise: otherwise.map(Box::new),
    }
}

/// An opaque SQL fragment used as an expression.
pub fn raw_expr(fragment: SqlFragment) -> Expr {
    Expr::Raw(fragment)
}
