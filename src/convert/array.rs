//! Lifting an element converter over arrays.

use crate::bind::ConverterScope;
use crate::convert::Converter;
use crate::error::ConversionResult;

/// Applies an element converter to every slot of an array, in both
/// directions. Length and order are preserved exactly; element NULLs run
/// through the element converter's own NULL path; a NULL array maps to a
/// NULL array, never to an empty one.
pub struct ArrayConverter<C> {
    element: C,
}

impl<C: Converter> ArrayConverter<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Converter> Converter for ArrayConverter<C> {
    type Wire = Vec<Option<C::Wire>>;
    type Domain = Vec<Option<C::Domain>>;

    fn to(
        &self,
        value: Option<Self::Domain>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Self::Wire>> {
        value
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| self.element.to(item, scope))
                    .collect::<ConversionResult<Vec<_>>>()
            })
            .transpose()
    }

    fn from(
        &self,
        value: Option<Self::Wire>,
        scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<Self::Domain>> {
        value
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| self.element.from(item, scope))
                    .collect::<ConversionResult<Vec<_>>>()
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bind::ExecuteScope;
    use crate::convert::converter;
    use crate::error::ConversionError;
    use crate::settings::Settings;

    fn doubling() -> impl Converter<Wire = i64, Domain = i64> {
        converter(
            |n: i64, _: &ConverterScope<'_>| Ok(n * 2),
            |n: i64, _: &ConverterScope<'_>| Ok(n / 2),
        )
    }

    #[test]
    fn test_elementwise_round_trip_preserves_order_and_length() {
        let scope = ExecuteScope::new(Settings::default());
        let scope = scope.converter_scope();
        let array = ArrayConverter::new(doubling());

        let domain = vec![Some(1), Some(2), None, Some(3)];
        let wire = array.to(Some(domain.clone()), &scope).unwrap();
        assert_eq!(wire, Some(vec![Some(2), Some(4), None, Some(6)]));

        let back = array.from(wire, &scope).unwrap();
        assert_eq!(back, Some(domain));
    }

    #[test]
    fn test_null_array_maps_to_null_not_empty() {
        let scope = ExecuteScope::new(Settings::default());
        let array = ArrayConverter::new(doubling());

        assert_eq!(array.to(None, &scope.converter_scope()).unwrap(), None);
        assert_eq!(array.from(None, &scope.converter_scope()).unwrap(), None);
    }

    #[test]
    fn test_element_failure_aborts_the_whole_conversion() {
        let scope = ExecuteScope::new(Settings::default());
        let failing = converter(
            |n: i64, _: &ConverterScope<'_>| {
                if n < 0 {
                    Err(ConversionError::invalid_value("u64", n.to_string(), "negative"))
                } else {
                    Ok(n as u64)
                }
            },
            |n: u64, _: &ConverterScope<'_>| Ok(n as i64),
        );
        let array = ArrayConverter::new(failing);

        let err = array
            .to(Some(vec![Some(1), Some(-2)]), &scope.converter_scope())
            .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { .. }));
    }
}
