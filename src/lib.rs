//! # dialoq: typed, dialect-portable SQL construction
//!
//! Build conditions and expressions as an immutable typed tree, render them
//! to correct SQL for ~30 database dialects, and move values across the
//! driver boundary through composable bidirectional converters.
//!
//! ```ignore
//! use dialoq::prelude::*;
//!
//! let cond = eq("active", true).and(xor(ilike("name", "a%"), is_null("email")));
//! let rendered = render(&cond, Dialect::Postgres)?;
//! // rendered.sql   => SQL text with $1, $2 placeholders
//! // rendered.binds => the values, in placeholder order
//! ```

pub mod ast;
pub mod bind;
pub mod convert;
pub mod diag;
pub mod dialect;
pub mod error;
pub mod render;
pub mod settings;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::{
        BinaryOp, BoolOp, Clause, CompareOp, Condition, Expr, SqlFragment, SqlPart, Value,
    };
    pub use crate::bind::{ExecuteScope, GetAccessor, SetAccessor};
    pub use crate::convert::{ArrayConverter, Converter, DocumentConverter, RangeConverter};
    pub use crate::dialect::{Capability, Dialect, Family};
    pub use crate::error::{BindingError, ConversionError, RenderError};
    pub use crate::render::{render, render_with, Render, Rendered, ToSql};
    pub use crate::settings::{ParamStyle, Settings};
}
