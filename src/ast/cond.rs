use serde::{Deserialize, Serialize};

use crate::ast::expr::Expr;
use crate::ast::operators::CompareOp;
use crate::ast::sql::SqlFragment;

/// The clause kinds a condition node can report for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clause {
    Condition,
    ConditionAnd,
    ConditionOr,
    ConditionXor,
    ConditionNot,
    ConditionComparison,
    ConditionIn,
    ConditionBetween,
    ConditionIsNull,
    ConditionBoolExpr,
}

/// A boolean-valued condition node.
///
/// Conditions form an immutable tree: combinators and rewrite operations
/// produce new nodes and never mutate existing ones, so subtrees are safe
/// to share across statements. Equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Logical conjunction.
    And(Box<Condition>, Box<Condition>),
    /// Logical disjunction.
    Or(Box<Condition>, Box<Condition>),
    /// Exclusive or; emulated as `<>` on dialects without native XOR.
    Xor(Box<Condition>, Box<Condition>),
    /// Logical negation.
    Not(Box<Condition>),
    /// A comparison between two expressions.
    Compare {
        op: CompareOp,
        lhs: Expr,
        rhs: Expr,
    },
    /// Membership in an explicit list.
    In {
        lhs: Expr,
        list: Vec<Expr>,
        negated: bool,
    },
    /// Range check.
    Between {
        expr: Expr,
        low: Expr,
        high: Expr,
        negated: bool,
    },
    /// IS NULL
    IsNull(Expr),
    /// IS NOT NULL
    IsNotNull(Expr),
    /// A boolean-valued expression used directly as a condition.
    Bool(Expr),
    /// An opaque SQL fragment; always parenthesized, reports no clauses.
    Raw(SqlFragment),
}

impl Condition {
    /// `self AND other`
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// `self OR other`
    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// `self XOR other`
    pub fn xor(self, other: Condition) -> Condition {
        Condition::Xor(Box::new(self), Box::new(other))
    }

    /// `NOT self`
    pub fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }

    /// First child of a binary boolean node.
    pub fn arg1(&self) -> Option<&Condition> {
        match self {
            Condition::And(a, _) | Condition::Or(a, _) | Condition::Xor(a, _) => Some(a),
            _ => None,
        }
    }

    /// Second child of a binary boolean node.
    pub fn arg2(&self) -> Option<&Condition> {
        match self {
            Condition::And(_, b) | Condition::Or(_, b) | Condition::Xor(_, b) => Some(b),
            _ => None,
        }
    }

    /// A new node of the same kind with the first child replaced.
    /// The second child and the original node are untouched.
    pub fn with_arg1(&self, new: Condition) -> Option<Condition> {
        match self {
            Condition::And(_, b) => Some(Condition::And(Box::new(new), b.clone())),
            Condition::Or(_, b) => Some(Condition::Or(Box::new(new), b.clone())),
            Condition::Xor(_, b) => Some(Condition::Xor(Box::new(new), b.clone())),
            _ => None,
        }
    }

    /// A new node of the same kind with the second child replaced.
    pub fn with_arg2(&self, new: Condition) -> Option<Condition> {
        match self {
            Condition::And(a, _) => Some(Condition::And(a.clone(), Box::new(new))),
            Condition::Or(a, _) => Some(Condition::Or(a.clone(), Box::new(new))),
            Condition::Xor(a, _) => Some(Condition::Xor(a.clone(), Box::new(new))),
            _ => None,
        }
    }

    /// Generic reconstruction: a new node of this node's kind over two new
    /// children. This is what generic tree-rewriting passes build on.
    pub fn rebuild(&self, arg1: Condition, arg2: Condition) -> Option<Condition> {
        match self {
            Condition::And(..) => Some(arg1.and(arg2)),
            Condition::Or(..) => Some(arg1.or(arg2)),
            Condition::Xor(..) => Some(arg1.xor(arg2)),
            _ => None,
        }
    }

    /// Whether this condition may evaluate to SQL NULL.
    pub fn nullable(&self) -> bool {
        match self {
            Condition::And(a, b) | Condition::Or(a, b) | Condition::Xor(a, b) => {
                a.nullable() || b.nullable()
            }
            Condition::Not(c) => c.nullable(),
            Condition::Compare { lhs, rhs, .. } => lhs.nullable() || rhs.nullable(),
            Condition::In { lhs, list, .. } => {
                lhs.nullable() || list.iter().any(Expr::nullable)
            }
            Condition::Between {
                expr, low, high, ..
            } => expr.nullable() || low.nullable() || high.nullable(),
            // IS [NOT] NULL always yields a non-null boolean.
            Condition::IsNull(_) | Condition::IsNotNull(_) => false,
            Condition::Bool(e) => e.nullable(),
            Condition::Raw(_) => true,
        }
    }

    /// The clause kinds this node decomposes into. Raw fragments are opaque
    /// and report none.
    pub fn clauses(&self) -> &'static [Clause] {
        match self {
            Condition::And(..) => &[Clause::Condition, Clause::ConditionAnd],
            Condition::Or(..) => &[Clause::Condition, Clause::ConditionOr],
            Condition::Xor(..) => &[Clause::Condition, Clause::ConditionXor],
            Condition::Not(..) => &[Clause::Condition, Clause::ConditionNot],
            Condition::Compare { .. } => &[Clause::Condition, Clause::ConditionComparison],
            Condition::In { .. } => &[Clause::Condition, Clause::ConditionIn],
            Condition::Between { .. } => &[Clause::Condition, Clause::ConditionBetween],
            Condition::IsNull(_) | Condition::IsNotNull(_) => {
                &[Clause::Condition, Clause::ConditionIsNull]
            }
            Condition::Bool(_) => &[Clause::Condition, Clause::ConditionBoolExpr],
            Condition::Raw(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::builders::{col, cond, eq, gt};

    fn a() -> Condition {
        eq("a", 1)
    }

    fn b() -> Condition {
        gt("b", 2)
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(a().xor(b()), a().xor(b()));
        assert_ne!(a().xor(b()), b().xor(a()));
        assert_ne!(a().xor(b()), a().and(b()));
    }

    #[test]
    fn test_rewrite_law() {
        let x = cond(col("x"));
        let node = a().xor(b());

        let rewritten = node.with_arg1(x.clone()).unwrap();
        assert_eq!(rewritten.arg1(), Some(&x));
        assert_eq!(rewritten.arg2(), node.arg2());
        // the original is unmodified
        assert_eq!(node.arg1(), Some(&a()));

        let rewritten = node.with_arg2(x.clone()).unwrap();
        assert_eq!(rewritten.arg2(), Some(&x));
        assert_eq!(rewritten.arg1(), node.arg1());
    }

    #[test]
    fn test_rebuild_keeps_the_kind() {
        let node = a().xor(b());
        let rebuilt = node.rebuild(b(), a()).unwrap();
        assert_eq!(rebuilt, b().xor(a()));

        assert!(a().not().rebuild(a(), b()).is_none());
        assert!(a().rebuild(a(), b()).is_none());
    }

    #[test]
    fn test_non_binary_nodes_have_no_args() {
        assert!(a().arg1().is_none());
        assert!(a().not().arg2().is_none());
        assert!(a().with_arg1(b()).is_none());
    }

    #[test]
    fn test_nullability_is_computed_from_children() {
        // bound non-null literals on both sides: comparison of a nullable
        // column is still nullable
        assert!(a().nullable());
        assert!(a().xor(b()).nullable());
        assert!(!Condition::IsNull(col("a")).nullable());

        let non_null = cond(Expr::Literal(crate::ast::Value::Bool(true)));
        assert!(!non_null.nullable());
        assert!(!non_null.clone().xor(non_null.clone()).nullable());
    }

    #[test]
    fn test_raw_fragment_reports_no_clauses() {
        let raw = Condition::Raw(SqlFragment::text("a = b"));
        assert!(raw.clauses().is_empty());
        assert_eq!(
            a().xor(b()).clauses(),
            &[Clause::Condition, Clause::ConditionXor]
        );
    }
}
