//! Expression, fragment and inline literal rendering.

use crate::ast::{Expr, SqlFragment, SqlPart, Value};
use crate::dialect::{Capability, Family};
use crate::error::RenderError;
use crate::render::{Render, RenderContext};

impl Render for Expr {
    fn accept(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        match self {
            Expr::Column { qualifier, name } => {
                if let Some(qualifier) = qualifier {
                    ctx.identifier(qualifier);
                    ctx.sql_char('.');
                }
                ctx.identifier(name);
                Ok(())
            }
            Expr::Literal(value) => inline_value(ctx, value),
            Expr::Bind(value) => ctx.bind(value),
            Expr::Function { name, args } => {
                ctx.sql(name);
                ctx.sql_char('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ctx.sql(", ");
                    }
                    ctx.visit(arg)?;
                }
                ctx.sql_char(')');
                Ok(())
            }
            Expr::Cast { expr, ty } => {
                ctx.sql("CAST(");
                ctx.visit(expr.as_ref())?;
                ctx.sql(" AS ");
                ctx.sql(ty);
                ctx.sql_char(')');
                Ok(())
            }
            Expr::Binary { left, op, right } => {
                value_operand(ctx, left)?;
                ctx.sql_char(' ');
                ctx.sql(&op.to_string());
                ctx.sql_char(' ');
                value_operand(ctx, right)
            }
            Expr::Case {
                branches,
                otherwise,
            } => {
                ctx.sql("CASE");
                ctx.indent_start();
                for (when, then) in branches {
                    ctx.format_newline();
                    ctx.sql("WHEN ");
                    ctx.visit(when)?;
                    ctx.sql(" THEN ");
                    ctx.visit(then)?;
                }
                if let Some(otherwise) = otherwise {
                    ctx.format_newline();
                    ctx.sql("ELSE ");
                    ctx.visit(otherwise.as_ref())?;
                }
                ctx.indent_end();
                ctx.format_newline();
                ctx.sql("END");
                Ok(())
            }
            Expr::Raw(fragment) => {
                ctx.sql_char('(');
                ctx.visit(fragment)?;
                ctx.sql_char(')');
                Ok(())
            }
        }
    }

    fn parenthesised(&self, _ctx: &RenderContext<'_>) -> bool {
        matches!(self, Expr::Raw(_))
    }
}

impl Render for SqlFragment {
    fn accept(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        for part in self.parts() {
            match part {
                SqlPart::Text(text) => ctx.sql(text),
                SqlPart::Expr(expr) => ctx.visit(expr)?,
            }
        }
        Ok(())
    }
}

/// An expression in operand position: nested binary expressions get
/// wrapped, everything else renders bare (CASE and raw fragments delimit
/// themselves).
pub(crate) fn value_operand(ctx: &mut RenderContext<'_>, expr: &Expr) -> Result<(), RenderError> {
    if matches!(expr, Expr::Binary { .. }) && !expr.parenthesised(ctx) {
        ctx.visit_parenthesised(expr)
    } else {
        ctx.visit(expr)
    }
}

/// Write a value as an inline SQL literal for the context's dialect.
pub(crate) fn inline_value(ctx: &mut RenderContext<'_>, value: &Value) -> Result<(), RenderError> {
    match value {
        Value::Null => {
            ctx.sql("NULL");
            Ok(())
        }
        Value::Bool(b) => {
            ctx.sql(ctx.dialect().bool_literal(*b));
            Ok(())
        }
        Value::Int(n) => {
            ctx.sql(&n.to_string());
            Ok(())
        }
        Value::Float(n) => {
            if !n.is_finite() {
                return Err(RenderError::InvalidLiteral(format!(
                    "non-finite float {}",
                    n
                )));
            }
            ctx.sql(&n.to_string());
            Ok(())
        }
        Value::Decimal(d) => {
            ctx.sql(&d.to_string());
            Ok(())
        }
        Value::String(s) => {
            ctx.sql_char('\'');
            ctx.sql(&s.replace('\'', "''"));
            ctx.sql_char('\'');
            Ok(())
        }
        Value::Bytes(bytes) => inline_bytes(ctx, bytes),
        Value::Uuid(u) => {
            ctx.sql_char('\'');
            ctx.sql(&u.to_string());
            ctx.sql_char('\'');
            Ok(())
        }
        Value::Date(d) => inline_temporal(ctx, "DATE", &d.to_string()),
        Value::Time(t) => inline_temporal(ctx, "TIME", &t.to_string()),
        Value::Timestamp(ts) => {
            inline_temporal(ctx, "TIMESTAMP", &ts.format("%Y-%m-%d %H:%M:%S%.f").to_string())
        }
        Value::Array(items) => {
            if !ctx.dialect().supports(Capability::ArrayLiterals) {
                return Err(RenderError::unsupported(
                    "inline array literal",
                    ctx.dialect(),
                ));
            }
            ctx.sql("ARRAY[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    ctx.sql(", ");
                }
                inline_value(ctx, item)?;
            }
            ctx.sql_char(']');
            Ok(())
        }
    }
}

fn inline_temporal(
    ctx: &mut RenderContext<'_>,
    keyword: &str,
    text: &str,
) -> Result<(), RenderError> {
    // T-SQL and Access take plain quoted strings instead of typed literals
    if !matches!(
        ctx.dialect().family(),
        Family::SqlServer | Family::Sybase | Family::Access
    ) {
        ctx.sql(keyword);
        ctx.sql_char(' ');
    }
    ctx.sql_char('\'');
    ctx.sql(text);
    ctx.sql_char('\'');
    Ok(())
}

fn inline_bytes(ctx: &mut RenderContext<'_>, bytes: &[u8]) -> Result<(), RenderError> {
    use std::fmt::Write;

    let mut hex = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // infallible for String
        let _ = write!(hex, "{:02x}", b);
    }

    match ctx.dialect().family() {
        Family::Postgres => {
            ctx.sql("'\\x");
            ctx.sql(&hex);
            ctx.sql("'::bytea");
            Ok(())
        }
        Family::MySql
        | Family::MariaDb
        | Family::Sqlite
        | Family::H2
        | Family::Hsqldb
        | Family::Derby
        | Family::Firebird => {
            ctx.sql("X'");
            ctx.sql(&hex);
            ctx.sql_char('\'');
            Ok(())
        }
        Family::SqlServer | Family::Sybase => {
            ctx.sql("0x");
            ctx.sql(&hex);
            Ok(())
        }
        _ => Err(RenderError::unsupported(
            "inline binary literal",
            ctx.dialect(),
        )),
    }
}
