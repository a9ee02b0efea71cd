//! Render and execution settings.

use serde::{Deserialize, Serialize};

/// How bind values are written into the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParamStyle {
    /// Emit a dialect placeholder and collect the value into the bind list.
    #[default]
    Indexed,
    /// Escape and inline the value into the SQL text; the bind list stays empty.
    Inline,
}

/// Settings consumed by the renderer and carried by execution scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bind parameter style.
    pub param_style: ParamStyle,
    /// Pretty-print with newlines and indentation instead of single spaces.
    pub render_formatted: bool,
    /// Quote every identifier instead of only those that need it.
    pub quote_all_identifiers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            param_style: ParamStyle::Indexed,
            render_formatted: false,
            quote_all_identifiers: false,
        }
    }
}

impl Settings {
    /// Settings that inline every bind value.
    pub fn inline() -> Self {
        Self {
            param_style: ParamStyle::Inline,
            ..Self::default()
        }
    }

    /// Enable pretty-printing.
    pub fn formatted(mut self) -> Self {
        self.render_formatted = true;
        self
    }
}
