use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// One piece of a raw SQL fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlPart {
    /// Literal SQL text, passed through untouched.
    Text(String),
    /// An embedded expression, rendered like any other node.
    Expr(Expr),
}

/// An opaque, dialect-independent SQL fragment: literal text interleaved
/// with embedded sub-expressions.
///
/// The renderer has no visibility into the fragment's internal operator
/// precedence, so nodes wrapping a fragment always parenthesize it, and the
/// fragment reports no decomposable clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlFragment {
    parts: Vec<SqlPart>,
}

impl SqlFragment {
    /// A fragment holding only literal text.
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Text(sql.into())],
        }
    }

    /// Append literal text.
    pub fn push_text(mut self, sql: impl Into<String>) -> Self {
        self.parts.push(SqlPart::Text(sql.into()));
        self
    }

    /// Append an embedded expression.
    pub fn push_expr(mut self, expr: Expr) -> Self {
        self.parts.push(SqlPart::Expr(expr));
        self
    }

    /// The ordered parts of this fragment.
    pub fn parts(&self) -> &[SqlPart] {
        &self.parts
    }
}
