//! Condition rendering: associative chain flattening, parent-driven
//! parenthesization and capability-gated emulation fallbacks.

use crate::ast::{BoolOp, CompareOp, Condition, Expr};
use crate::dialect::Capability;
use crate::error::RenderError;
use crate::render::expr::value_operand;
use crate::render::{Render, RenderContext};

impl Render for Condition {
    fn accept(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        match self {
            Condition::And(..) => render_associative(ctx, BoolOp::And, self),
            Condition::Or(..) => render_associative(ctx, BoolOp::Or, self),
            Condition::Xor(arg1, arg2) => {
                if ctx.dialect().supports(Capability::NativeXor) {
                    render_associative(ctx, BoolOp::Xor, self)
                } else {
                    // Equivalence-preserving rewrite into inequality of two
                    // boolean operands. NULL propagation follows `<>`.
                    ctx.emulation("native XOR");
                    condition_operand_as_expr(ctx, arg1)?;
                    ctx.sql(" <> ");
                    condition_operand_as_expr(ctx, arg2)
                }
            }
            Condition::Not(inner) => {
                ctx.sql("NOT ");
                ctx.visit_parenthesised(inner.as_ref())
            }
            Condition::Compare { op, lhs, rhs } => render_compare(ctx, *op, lhs, rhs),
            Condition::In {
                lhs,
                list,
                negated,
            } => {
                if list.is_empty() {
                    // IN () is not valid SQL; an empty list can never match
                    ctx.sql(if *negated { "1 = 1" } else { "1 = 0" });
                    return Ok(());
                }
                value_operand(ctx, lhs)?;
                ctx.sql(if *negated { " NOT IN " } else { " IN " });
                ctx.sql_indent_start('(');
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        ctx.sql(", ");
                    }
                    value_operand(ctx, item)?;
                }
                ctx.sql_indent_end(')');
                Ok(())
            }
            Condition::Between {
                expr,
                low,
                high,
                negated,
            } => {
                value_operand(ctx, expr)?;
                ctx.sql(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                value_operand(ctx, low)?;
                ctx.sql(" AND ");
                value_operand(ctx, high)
            }
            Condition::IsNull(expr) => {
                value_operand(ctx, expr)?;
                ctx.sql(" IS NULL");
                Ok(())
            }
            Condition::IsNotNull(expr) => {
                value_operand(ctx, expr)?;
                ctx.sql(" IS NOT NULL");
                Ok(())
            }
            Condition::Bool(expr) => ctx.visit(expr),
            Condition::Raw(fragment) => {
                // No control over the fragment's contents, so it MUST be
                // parenthesized to compose correctly.
                ctx.sql_char('(');
                ctx.visit(fragment)?;
                ctx.sql_char(')');
                Ok(())
            }
        }
    }

    fn parenthesised(&self, _ctx: &RenderContext<'_>) -> bool {
        matches!(self, Condition::Raw(_))
    }
}

/// Flatten a chain of the same associative operator and render it as one
/// separator-joined sequence.
fn render_associative(
    ctx: &mut RenderContext<'_>,
    op: BoolOp,
    root: &Condition,
) -> Result<(), RenderError> {
    let mut chain = Vec::new();
    flatten(root, op, &mut chain);

    for (i, part) in chain.iter().enumerate() {
        if i > 0 {
            ctx.format_separator(op.keyword());
        }
        boolean_operand(ctx, part)?;
    }
    Ok(())
}

fn flatten<'c>(cond: &'c Condition, op: BoolOp, out: &mut Vec<&'c Condition>) {
    match (op, cond) {
        (BoolOp::And, Condition::And(a, b))
        | (BoolOp::Or, Condition::Or(a, b))
        | (BoolOp::Xor, Condition::Xor(a, b)) => {
            flatten(a, op, out);
            flatten(b, op, out);
        }
        _ => out.push(cond),
    }
}

/// A condition in boolean operand position: compound children of a
/// different operator kind get wrapped, atoms render bare.
fn boolean_operand(ctx: &mut RenderContext<'_>, cond: &Condition) -> Result<(), RenderError> {
    if cond.parenthesised(ctx) || boolean_atom(cond) {
        ctx.visit(cond)
    } else {
        ctx.visit_parenthesised(cond)
    }
}

fn boolean_atom(cond: &Condition) -> bool {
    match cond {
        Condition::Compare { .. }
        | Condition::In { .. }
        | Condition::Between { .. }
        | Condition::IsNull(_)
        | Condition::IsNotNull(_) => true,
        // prefix NOT binds tighter than any infix boolean operator
        Condition::Not(_) => true,
        Condition::Bool(expr) => expr.atomic(),
        Condition::And(..) | Condition::Or(..) | Condition::Xor(..) | Condition::Raw(_) => false,
    }
}

/// A condition used as a comparison operand (the XOR emulation path):
/// anything that is not a bare atom gets wrapped.
fn condition_operand_as_expr(
    ctx: &mut RenderContext<'_>,
    cond: &Condition,
) -> Result<(), RenderError> {
    match cond {
        Condition::Bool(expr) if expr.atomic() => ctx.visit(expr),
        _ if cond.parenthesised(ctx) => ctx.visit(cond),
        _ => ctx.visit_parenthesised(cond),
    }
}

fn render_compare(
    ctx: &mut RenderContext<'_>,
    op: CompareOp,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<(), RenderError> {
    if op.case_insensitive() && !ctx.dialect().supports(Capability::NativeIlike) {
        ctx.emulation("ILIKE");
        ctx.sql("LOWER(");
        value_operand(ctx, lhs)?;
        ctx.sql(") ");
        ctx.sql(if op == CompareOp::NotILike {
            "NOT LIKE"
        } else {
            "LIKE"
        });
        ctx.sql(" LOWER(");
        value_operand(ctx, rhs)?;
        ctx.sql_char(')');
        return Ok(());
    }

    value_operand(ctx, lhs)?;
    ctx.sql_char(' ');
    ctx.sql(op.sql());
    ctx.sql_char(' ');
    value_operand(ctx, rhs)
}
