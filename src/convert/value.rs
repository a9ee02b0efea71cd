//! Converters between the driver-level [`Value`] and plain Rust types.

use std::marker::PhantomData;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ast::Value;
use crate::bind::ConverterScope;
use crate::convert::Converter;
use crate::error::{ConversionError, ConversionResult};

/// A type with a canonical [`Value`] representation.
pub trait ValueCodec: Sized {
    fn into_value(self) -> Value;
    /// Decode from a non-null value; the variant must match exactly.
    fn from_value(value: Value) -> ConversionResult<Self>;
}

macro_rules! value_codec {
    ($ty:ty, $variant:ident, $target:literal) => {
        impl ValueCodec for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }

            fn from_value(value: Value) -> ConversionResult<Self> {
                match value {
                    Value::$variant(v) => Ok(v.into()),
                    other => Err(ConversionError::invalid_value(
                        $target,
                        other.to_string(),
                        "unexpected value variant",
                    )),
                }
            }
        }
    };
}

value_codec!(bool, Bool, "bool");
value_codec!(i64, Int, "i64");
value_codec!(f64, Float, "f64");
value_codec!(Decimal, Decimal, "decimal");
value_codec!(String, String, "string");
value_codec!(Vec<u8>, Bytes, "bytes");
value_codec!(Uuid, Uuid, "uuid");
value_codec!(NaiveDate, Date, "date");
value_codec!(NaiveTime, Time, "time");
value_codec!(NaiveDateTime, Timestamp, "timestamp");

/// The wire side is [`Value`]; the domain side is a plain Rust type.
/// This is the root of most typed accessor chains.
pub struct ValueConverter<T>(PhantomData<fn() -> T>);

impl<T> ValueConverter<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ValueConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ValueCodec + 'static> Converter for ValueConverter<T> {
    type Wire = Value;
    type Domain = T;

    fn to(&self, value: Option<T>, _scope: &ConverterScope<'_>) -> ConversionResult<Option<Value>> {
        Ok(value.map(ValueCodec::into_value))
    }

    fn from(
        &self,
        value: Option<Value>,
        _scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<T>> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_value(value).map(Some),
        }
    }
}
