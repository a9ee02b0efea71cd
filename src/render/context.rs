use crate::ast::Value;
use crate::diag::{DiagnosticsListener, DiagnosticsListeners, EmulationEvent};
use crate::dialect::Dialect;
use crate::error::RenderError;
use crate::render::{Render, Rendered};
use crate::settings::{ParamStyle, Settings};

/// A visitor-style cursor over one render pass: the target dialect, the
/// accumulated SQL text, indentation state and the collected bind list.
///
/// Confined to the single render call that created it.
pub struct RenderContext<'a> {
    dialect: Dialect,
    settings: &'a Settings,
    diagnostics: Option<&'a DiagnosticsListeners>,
    buf: String,
    indent: usize,
    binds: Vec<Value>,
}

impl<'a> RenderContext<'a> {
    pub fn new(dialect: Dialect, settings: &'a Settings) -> Self {
        Self {
            dialect,
            settings,
            diagnostics: None,
            buf: String::new(),
            indent: 0,
            binds: Vec::new(),
        }
    }

    /// Attach diagnostics listeners notified of emulation fallbacks.
    pub fn with_diagnostics(mut self, diagnostics: &'a DiagnosticsListeners) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Append literal SQL text.
    pub fn sql(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append a single character.
    pub fn sql_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Append an identifier, quoted per the dialect and settings.
    pub fn identifier(&mut self, name: &str) {
        let quoted = if self.settings.quote_all_identifiers {
            self.dialect.quoted_identifier(name)
        } else {
            self.dialect.identifier(name)
        };
        self.buf.push_str(&quoted);
    }

    /// Delegate to the node's render operation.
    pub fn visit<P>(&mut self, part: &P) -> Result<(), RenderError>
    where
        P: Render + ?Sized,
    {
        part.accept(self)
    }

    /// Render a node wrapped in parentheses.
    pub fn visit_parenthesised<P>(&mut self, part: &P) -> Result<(), RenderError>
    where
        P: Render + ?Sized,
    {
        self.sql_char('(');
        part.accept(self)?;
        self.sql_char(')');
        Ok(())
    }

    /// Open a bracketed sub-render with indentation bookkeeping.
    pub fn sql_indent_start(&mut self, c: char) {
        self.sql_char(c);
        if self.settings.render_formatted {
            self.indent += 1;
            self.newline_indent();
        }
    }

    /// Close a bracketed sub-render.
    pub fn sql_indent_end(&mut self, c: char) {
        if self.settings.render_formatted {
            self.indent = self.indent.saturating_sub(1);
            self.newline_indent();
        }
        self.sql_char(c);
    }

    /// The separator between elements of an associative chain:
    /// ` KW ` plain, newline + indent + `KW ` formatted.
    pub fn format_separator(&mut self, keyword: &str) {
        if self.settings.render_formatted {
            self.newline_indent();
        } else {
            self.sql_char(' ');
        }
        self.buf.push_str(keyword);
        self.sql_char(' ');
    }

    /// A soft break: newline + indent when formatted, single space otherwise.
    pub fn format_newline(&mut self) {
        if self.settings.render_formatted {
            self.newline_indent();
        } else {
            self.sql_char(' ');
        }
    }

    pub(crate) fn indent_start(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn indent_end(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn newline_indent(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.indent {
            self.buf.push_str("  ");
        }
    }

    /// Emit a bind value: a dialect placeholder in indexed style, the
    /// escaped literal in inline style. Collected binds keep the
    /// left-to-right depth-first order of their placeholders.
    pub fn bind(&mut self, value: &Value) -> Result<(), RenderError> {
        match self.settings.param_style {
            ParamStyle::Indexed => {
                self.binds.push(value.clone());
                let placeholder = self.dialect.placeholder(self.binds.len());
                self.buf.push_str(&placeholder);
                Ok(())
            }
            ParamStyle::Inline => crate::render::expr::inline_value(self, value),
        }
    }

    /// Report an applied emulation fallback.
    pub(crate) fn emulation(&self, feature: &'static str) {
        let event = EmulationEvent {
            feature,
            dialect: self.dialect,
        };
        tracing::trace!(feature, dialect = %self.dialect, "rendering emulated form");
        if let Some(diagnostics) = self.diagnostics {
            diagnostics.emulation_applied(&event);
        }
    }

    /// Finish the pass, yielding the SQL text and the bind list.
    pub fn finish(self) -> Rendered {
        Rendered {
            sql: self.buf,
            binds: self.binds,
        }
    }
}
