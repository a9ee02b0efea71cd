//! Bidirectional, context-scoped value conversion.
//!
//! A [`Converter`] maps between a wire type (what the driver sees) and a
//! domain type (what the caller sees). `to` and `from` are pure functions of
//! their argument and the scope; SQL NULL propagates through every converter
//! as `None` unless a converter explicitly documents otherwise. Converters
//! compose: direction can be inverted, element converters lift over arrays,
//! and a registry stores them keyed exactly on the `(wire, domain)` pair.

pub mod array;
pub mod object;
pub mod range;
pub mod value;

pub use array::ArrayConverter;
pub use object::DocumentConverter;
pub use range::{
    BigIntRange, DateRange, IntRange, NumericRange, Range, RangeBound, RangeConverter,
    TimestampRange,
};
pub use value::ValueConverter;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::bind::ConverterScope;
use crate::error::{ConversionError, ConversionResult};

/// A descriptor for a conversion endpoint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A bidirectional wire ↔ domain transformer, scoped to one execution
/// context per call.
pub trait Converter {
    /// The representation the driver trades in.
    type Wire: 'static;
    /// The representation the caller trades in.
    type Domain: 'static;

    /// Domain → wire. `None` in, `None` out.
    fn to(
        &self,
        value: Option<Self::Domain>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Self::Wire>>;

    /// Wire → domain. `None` in, `None` out.
    fn from(
        &self,
        value: Option<Self::Wire>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Self::Domain>>;

    fn wire_type(&self) -> TypeDesc {
        TypeDesc::of::<Self::Wire>()
    }

    fn domain_type(&self) -> TypeDesc {
        TypeDesc::of::<Self::Domain>()
    }
}

/// The do-nothing converter: wire and domain are the same type.
pub struct Identity<T>(PhantomData<fn() -> T>);

impl<T> Identity<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Converter for Identity<T> {
    type Wire = T;
    type Domain = T;

    fn to(&self, value: Option<T>, _scope: &ConverterScope<'_>) -> ConversionResult<Option<T>> {
        Ok(value)
    }

    fn from(&self, value: Option<T>, _scope: &ConverterScope<'_>) -> ConversionResult<Option<T>> {
        Ok(value)
    }
}

/// A converter with its direction swapped.
pub struct Inverse<C>(C);

/// Derive the opposite-direction converter by swapping `to` and `from`.
pub fn inverse<C: Converter>(converter: C) -> Inverse<C> {
    Inverse(converter)
}

impl<C: Converter> Converter for Inverse<C> {
    type Wire = C::Domain;
    type Domain = C::Wire;

    fn to(
        &self,
        value: Option<C::Wire>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<C::Domain>> {
        self.0.from(value, scope)
    }

    fn from(
        &self,
        value: Option<C::Domain>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<C::Wire>> {
        self.0.to(value, scope)
    }
}

/// A converter built from a pair of plain functions over non-null values.
/// NULL propagation is handled here, so the functions never see `None`.
pub struct FnConverter<W, D, TF, FF> {
    to_fn: TF,
    from_fn: FF,
    _marker: PhantomData<fn() -> (W, D)>,
}

/// Build a converter from a `(toFn, fromFn)` pair.
pub fn converter<W, D, TF, FF>(to_fn: TF, from_fn: FF) -> FnConverter<W, D, TF, FF>
where
    W: 'static,
    D: 'static,
    TF: Fn(D, &ConverterScope<'_>) -> ConversionResult<W>,
    FF: Fn(W, &ConverterScope<'_>) -> ConversionResult<D>,
{
    FnConverter {
        to_fn,
        from_fn,
        _marker: PhantomData,
    }
}

impl<W, D, TF, FF> Converter for FnConverter<W, D, TF, FF>
where
    W: 'static,
    D: 'static,
    TF: Fn(D, &ConverterScope<'_>) -> ConversionResult<W>,
    FF: Fn(W, &ConverterScope<'_>) -> ConversionResult<D>,
{
    type Wire = W;
    type Domain = D;

    fn to(&self, value: Option<D>, scope: &ConverterScope<'_>) -> ConversionResult<Option<W>> {
        value.map(|v| (self.to_fn)(v, scope)).transpose()
    }

    fn from(&self, value: Option<W>, scope: &ConverterScope<'_>) -> ConversionResult<Option<D>> {
        value.map(|v| (self.from_fn)(v, scope)).transpose()
    }
}

/// Object-safe converter surface used by the registry.
trait ErasedConverter: Send + Sync {
    fn wire_type(&self) -> TypeDesc;
    fn domain_type(&self) -> TypeDesc;
    fn to_erased(
        &self,
        value: Option<Box<dyn Any>>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Box<dyn Any>>>;
    fn from_erased(
        &self,
        value: Option<Box<dyn Any>>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Box<dyn Any>>>;
}

impl<C> ErasedConverter for C
where
    C: Converter + Send + Sync,
{
    fn wire_type(&self) -> TypeDesc {
        Converter::wire_type(self)
    }

    fn domain_type(&self) -> TypeDesc {
        Converter::domain_type(self)
    }

    fn to_erased(
        &self,
        value: Option<Box<dyn Any>>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Box<dyn Any>>> {
        let domain = value
            .map(|boxed| {
                boxed
                    .downcast::<C::Domain>()
                    .map(|b| *b)
                    .map_err(|_| ConversionError::TypeMismatch {
                        expected: std::any::type_name::<C::Domain>(),
                    })
            })
            .transpose()?;
        Ok(self
            .to(domain, scope)?
            .map(|wire| Box::new(wire) as Box<dyn Any>))
    }

    fn from_erased(
        &self,
        value: Option<Box<dyn Any>>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Box<dyn Any>>> {
        let wire = value
            .map(|boxed| {
                boxed
                    .downcast::<C::Wire>()
                    .map(|b| *b)
                    .map_err(|_| ConversionError::TypeMismatch {
                        expected: std::any::type_name::<C::Wire>(),
                    })
            })
            .transpose()?;
        Ok(self
            .from(wire, scope)?
            .map(|domain| Box::new(domain) as Box<dyn Any>))
    }
}

/// Converter storage keyed exactly on the `(wire, domain)` type pair.
#[derive(Default)]
pub struct ConverterRegistry {
    map: HashMap<(TypeId, TypeId), Box<dyn ErasedConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter under its exact type pair. A later registration
    /// for the same pair replaces the earlier one.
    pub fn register<C>(&mut self, converter: C)
    where
        C: Converter + Send + Sync + 'static,
    {
        let wire = Converter::wire_type(&converter);
        let domain = Converter::domain_type(&converter);
        tracing::debug!(wire = wire.name(), domain = domain.name(), "registered converter");
        self.map.insert((wire.id(), domain.id()), Box::new(converter));
    }

    /// Whether a converter exists for the exact pair.
    pub fn contains<W: 'static, D: 'static>(&self) -> bool {
        self.map
            .contains_key(&(TypeId::of::<W>(), TypeId::of::<D>()))
    }

    /// Convert domain → wire through the registered converter for the pair.
    pub fn to<W: 'static, D: 'static>(
        &self,
        value: Option<D>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<W>> {
        let converter = self.lookup::<W, D>()?;
        let out = converter.to_erased(value.map(|v| Box::new(v) as Box<dyn Any>), scope)?;
        unbox::<W>(out)
    }

    /// Convert wire → domain through the registered converter for the pair.
    pub fn from<W: 'static, D: 'static>(
        &self,
        value: Option<W>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<D>> {
        let converter = self.lookup::<W, D>()?;
        let out = converter.from_erased(value.map(|v| Box::new(v) as Box<dyn Any>), scope)?;
        unbox::<D>(out)
    }

    fn lookup<W: 'static, D: 'static>(&self) -> ConversionResult<&dyn ErasedConverter> {
        self.map
            .get(&(TypeId::of::<W>(), TypeId::of::<D>()))
            .map(|boxed| boxed.as_ref())
            .ok_or(ConversionError::NoConverter {
                wire: std::any::type_name::<W>(),
                domain: std::any::type_name::<D>(),
            })
    }
}

fn unbox<T: 'static>(value: Option<Box<dyn Any>>) -> ConversionResult<Option<T>> {
    value
        .map(|boxed| {
            boxed
                .downcast::<T>()
                .map(|b| *b)
                .map_err(|_| ConversionError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                })
        })
        .transpose()
}
