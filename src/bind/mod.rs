//! Execution scoping and typed accessors over the external driver.
//!
//! An [`ExecuteScope`] represents one statement execution and carries the
//! shared settings and diagnostics. Each get/set operation against the
//! driver is wrapped by a short-lived accessor that knows its position and
//! routes values through converters. Accessors and scopes are confined to
//! the single call that created them and are never shared across threads.

pub mod input;
pub mod statement;

pub use input::{GetInputScope, SetOutputScope};
pub use statement::{GetStatementScope, SetStatementScope};

use crate::ast::Value;
use crate::convert::Converter;
use crate::diag::{DiagnosticsListener, DiagnosticsListeners};
use crate::error::BindingResult;
use crate::settings::Settings;

/// The context shared by every bind/read operation of one execution.
#[derive(Debug, Clone)]
pub struct ExecuteScope {
    settings: Settings,
    diagnostics: DiagnosticsListeners,
}

impl ExecuteScope {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            diagnostics: DiagnosticsListeners::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsListeners) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn diagnostics(&self) -> &DiagnosticsListeners {
        &self.diagnostics
    }

    /// A converter scope for an operation without a position.
    pub fn converter_scope(&self) -> ConverterScope<'_> {
        ConverterScope {
            execute: self,
            position: None,
        }
    }

    /// A converter scope for an operation at a parameter/column position.
    pub fn converter_scope_at(&self, position: usize) -> ConverterScope<'_> {
        ConverterScope {
            execute: self,
            position: Some(position),
        }
    }
}

/// The per-operation view passed into every converter call. Created per
/// bind/read operation and discarded immediately after.
#[derive(Debug, Clone, Copy)]
pub struct ConverterScope<'a> {
    execute: &'a ExecuteScope,
    position: Option<usize>,
}

impl ConverterScope<'_> {
    pub fn settings(&self) -> &Settings {
        self.execute.settings()
    }

    pub fn diagnostics(&self) -> &DiagnosticsListeners {
        self.execute.diagnostics()
    }

    /// The 1-based parameter or column position, when the operation has one.
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

/// Driver surface: a statement accepting positional parameters.
pub trait ParameterSink {
    fn set_parameter(&mut self, index: usize, value: Value) -> BindingResult<()>;
}

/// Driver surface: a statement or row yielding positional values.
pub trait ParameterSource {
    fn parameter(&self, index: usize) -> BindingResult<Value>;
}

/// Driver surface: a structured input read sequentially, field by field.
pub trait FieldSource {
    fn read_field(&mut self) -> BindingResult<Value>;
}

/// Driver surface: a structured output written sequentially.
pub trait FieldSink {
    fn write_field(&mut self, value: Value) -> BindingResult<()>;
}

/// A typed write accessor. `convert` builds a new accessor of the
/// converter's domain type delegating the wire-typed write to this one;
/// the wrapped accessor itself is never mutated by the transformation.
pub trait SetAccessor<T> {
    fn scope(&self) -> &ExecuteScope;

    /// The converter scope for this accessor's operation; positioned
    /// accessors carry their parameter index into it.
    fn converter_scope(&self) -> ConverterScope<'_> {
        self.scope().converter_scope()
    }

    fn set_value(&mut self, value: Option<T>) -> BindingResult<()>;

    fn convert<C>(self, converter: C) -> ConvertedSet<Self, C>
    where
        Self: Sized,
        C: Converter<Wire = T>,
    {
        ConvertedSet {
            inner: self,
            converter,
        }
    }
}

/// A typed read accessor; the mirror of [`SetAccessor`].
pub trait GetAccessor<T> {
    fn scope(&self) -> &ExecuteScope;

    /// The converter scope for this accessor's operation.
    fn converter_scope(&self) -> ConverterScope<'_> {
        self.scope().converter_scope()
    }

    fn value(&mut self) -> BindingResult<Option<T>>;

    fn convert<C>(self, converter: C) -> ConvertedGet<Self, C>
    where
        Self: Sized,
        C: Converter<Wire = T>,
    {
        ConvertedGet {
            inner: self,
            converter,
        }
    }
}

/// A write accessor chained through a converter.
pub struct ConvertedSet<A, C> {
    inner: A,
    converter: C,
}

impl<A, C> SetAccessor<C::Domain> for ConvertedSet<A, C>
where
    A: SetAccessor<C::Wire>,
    C: Converter,
{
    fn scope(&self) -> &ExecuteScope {
        self.inner.scope()
    }

    fn converter_scope(&self) -> ConverterScope<'_> {
        self.inner.converter_scope()
    }

    fn set_value(&mut self, value: Option<C::Domain>) -> BindingResult<()> {
        let scope = self.inner.converter_scope();
        let wire = match self.converter.to(value, &scope) {
            Ok(wire) => wire,
            Err(error) => {
                self.inner.scope().diagnostics().conversion_failed(&error);
                return Err(error.into());
            }
        };
        self.inner.set_value(wire)
    }
}

/// A read accessor chained through a converter.
pub struct ConvertedGet<A, C> {
    inner: A,
    converter: C,
}

impl<A, C> GetAccessor<C::Domain> for ConvertedGet<A, C>
where
    A: GetAccessor<C::Wire>,
    C: Converter,
{
    fn scope(&self) -> &ExecuteScope {
        self.inner.scope()
    }

    fn converter_scope(&self) -> ConverterScope<'_> {
        self.inner.converter_scope()
    }

    fn value(&mut self) -> BindingResult<Option<C::Domain>> {
        let wire = self.inner.value()?;
        let scope = self.inner.converter_scope();
        match self.converter.from(wire, &scope) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.inner.scope().diagnostics().conversion_failed(&error);
                Err(error.into())
            }
        }
    }
}
