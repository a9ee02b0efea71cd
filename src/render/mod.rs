//! Dialect-aware rendering of condition and expression trees.
//!
//! Rendering walks the tree depth-first through a [`RenderContext`] bound to
//! one dialect. Parenthesization is decided by parents consulting their
//! children's [`Render::parenthesised`] predicate, and chains of the same
//! associative boolean operator are flattened into one separator-joined
//! sequence.

pub mod cond;
pub mod context;
pub mod expr;

#[cfg(test)]
mod tests;

pub use context::RenderContext;

use crate::ast::Value;
use crate::bind::ExecuteScope;
use crate::dialect::Dialect;
use crate::error::{RenderError, RenderResult};
use crate::settings::Settings;

/// A renderable tree node.
pub trait Render {
    /// Emit this node's SQL into the context.
    fn accept(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;

    /// Whether this node's rendering needs no additional wrapping when it
    /// appears in operand position (it is atomic, or it already emits its
    /// own parentheses). Parents consult this before wrapping.
    fn parenthesised(&self, ctx: &RenderContext<'_>) -> bool {
        let _ = ctx;
        false
    }
}

/// The output of rendering: SQL text plus the positional bind list.
///
/// Bind order matches the left-to-right, depth-first appearance of
/// placeholders in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub binds: Vec<Value>,
}

/// Render a tree for a dialect with default settings.
pub fn render<P>(part: &P, dialect: Dialect) -> RenderResult<Rendered>
where
    P: Render + ?Sized,
{
    render_with(part, dialect, &Settings::default())
}

/// Render a tree for a dialect with explicit settings.
pub fn render_with<P>(part: &P, dialect: Dialect, settings: &Settings) -> RenderResult<Rendered>
where
    P: Render + ?Sized,
{
    let mut ctx = RenderContext::new(dialect, settings);
    part.accept(&mut ctx)?;
    let rendered = ctx.finish();
    tracing::debug!(%dialect, binds = rendered.binds.len(), "rendered statement");
    Ok(rendered)
}

/// Render a tree inside an execution scope, wiring the scope's settings and
/// diagnostics listeners into the context.
pub fn render_scoped<P>(part: &P, dialect: Dialect, scope: &ExecuteScope) -> RenderResult<Rendered>
where
    P: Render + ?Sized,
{
    let mut ctx =
        RenderContext::new(dialect, scope.settings()).with_diagnostics(scope.diagnostics());
    part.accept(&mut ctx)?;
    Ok(ctx.finish())
}

/// Convenience: render to inline SQL text without a bind list.
pub trait ToSql {
    fn to_sql(&self, dialect: Dialect) -> RenderResult<String>;
}

impl<P: Render> ToSql for P {
    fn to_sql(&self, dialect: Dialect) -> RenderResult<String> {
        Ok(render_with(self, dialect, &Settings::inline())?.sql)
    }
}
