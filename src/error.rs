//! Error types for rendering, conversion and binding.

use thiserror::Error;

use crate::dialect::Dialect;

/// A failure while rendering a condition or expression tree to SQL text.
///
/// Rendering failures prevent any SQL from being produced; there is no
/// silent degradation to wrong SQL.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The dialect identifier is not in the catalog.
    #[error("unknown dialect: '{0}'")]
    UnknownDialect(String),

    /// A construct has no native form and no emulation on this dialect.
    #[error("{feature} is not available on {dialect} and has no emulation")]
    Unsupported {
        feature: &'static str,
        dialect: Dialect,
    },

    /// A literal value cannot be written as SQL text (e.g. a non-finite float).
    #[error("cannot render literal: {0}")]
    InvalidLiteral(String),
}

impl RenderError {
    /// Create an [`RenderError::Unsupported`] for the given feature/dialect pair.
    pub fn unsupported(feature: &'static str, dialect: Dialect) -> Self {
        Self::Unsupported { feature, dialect }
    }
}

/// A failure while converting between wire and domain representations.
///
/// Conversions never partially apply; an error aborts the whole operation.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input value does not fit the target type.
    #[error("invalid value for {target}: '{input}': {message}")]
    InvalidValue {
        target: &'static str,
        input: String,
        message: String,
    },

    /// Range text that does not follow the `[lo,hi)` / `empty` encoding.
    #[error("malformed range text: '{0}'")]
    MalformedRange(String),

    /// No document codec can be derived for the domain type.
    #[error("document codec unavailable for {type_name}: {message}")]
    CodecUnavailable {
        type_name: &'static str,
        message: String,
    },

    /// A document failed to marshal or unmarshal as the domain type.
    #[error("document does not match {type_name}: {message}")]
    MalformedDocument {
        type_name: &'static str,
        message: String,
    },

    /// No converter is registered for the requested type pair.
    #[error("no converter registered for {wire} -> {domain}")]
    NoConverter {
        wire: &'static str,
        domain: &'static str,
    },

    /// A registry value did not have the type its descriptor promised.
    #[error("value is not of type {expected}")]
    TypeMismatch { expected: &'static str },
}

impl ConversionError {
    /// Create an [`ConversionError::InvalidValue`] with the given context.
    pub fn invalid_value(
        target: &'static str,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            target,
            input: input.into(),
            message: message.into(),
        }
    }
}

/// A failure while delegating a get/set operation to the driver.
///
/// Driver failures are propagated unchanged; this crate never retries.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The underlying driver call failed.
    #[error("driver: {0}")]
    Driver(String),

    /// A conversion applied on the accessor chain failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl BindingError {
    /// Create a driver-level binding error.
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }
}

/// Result alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result alias for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result alias for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;
