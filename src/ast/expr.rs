use serde::{Deserialize, Serialize};

use crate::ast::cond::Condition;
use crate::ast::operators::BinaryOp;
use crate::ast::sql::SqlFragment;
use crate::ast::values::Value;

/// A value-level expression node.
///
/// Nodes are immutable values; "modification" clones into a new node.
/// Equality is structural and independent of any rendering context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A column reference, optionally qualified with a table or alias.
    Column {
        qualifier: Option<String>,
        name: String,
    },
    /// A value inlined into the SQL text.
    Literal(Value),
    /// A value bound through a placeholder and collected into the bind list.
    Bind(Value),
    /// A function call (COALESCE, LOWER, ...).
    Function { name: String, args: Vec<Expr> },
    /// A standard CAST.
    Cast { expr: Box<Expr>, ty: String },
    /// A binary value expression (left op right).
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// A searched CASE expression.
    Case {
        branches: Vec<(Condition, Expr)>,
        otherwise: Option<Box<Expr>>,
    },
    /// An opaque SQL fragment; always parenthesized when rendered.
    Raw(SqlFragment),
}

impl Expr {
    /// Whether this expression may evaluate to SQL NULL.
    ///
    /// Computed from children; conservative (`true`) where the answer is
    /// unknowable, e.g. columns without schema knowledge and raw fragments.
    pub fn nullable(&self) -> bool {
        match self {
            Expr::Column { .. } => true,
            Expr::Literal(v) | Expr::Bind(v) => v.is_null(),
            Expr::Function { .. } => true,
            Expr::Cast { expr, .. } => expr.nullable(),
            Expr::Binary { left, right, .. } => left.nullable() || right.nullable(),
            Expr::Case {
                branches,
                otherwise,
            } => {
                otherwise.as_deref().map(Expr::nullable).unwrap_or(true)
                    || branches.iter().any(|(_, r)| r.nullable())
            }
            Expr::Raw(_) => true,
        }
    }

    /// Whether this expression renders as a single atom that never needs
    /// wrapping in operand position.
    pub(crate) fn atomic(&self) -> bool {
        matches!(
            self,
            Expr::Column { .. }
                | Expr::Literal(_)
                | Expr::Bind(_)
                | Expr::Function { .. }
                | Expr::Cast { .. }
        )
    }
}
