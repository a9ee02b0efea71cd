//! Accessors over sequentially read/written structured values.

use crate::ast::Value;
use crate::bind::{ExecuteScope, FieldSink, FieldSource, GetAccessor, SetAccessor};
use crate::error::BindingResult;

/// Reads the next field of a structured input.
pub struct GetInputScope<'a, S: FieldSource + ?Sized> {
    execute: &'a ExecuteScope,
    input: &'a mut S,
}

impl<'a, S: FieldSource + ?Sized> GetInputScope<'a, S> {
    pub fn new(execute: &'a ExecuteScope, input: &'a mut S) -> Self {
        Self { execute, input }
    }
}

impl<S: FieldSource + ?Sized> GetAccessor<Value> for GetInputScope<'_, S> {
    fn scope(&self) -> &ExecuteScope {
        self.execute
    }

    fn value(&mut self) -> BindingResult<Option<Value>> {
        let value = self.input.read_field()?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

/// Writes the next field of a structured output.
pub struct SetOutputScope<'a, S: FieldSink + ?Sized> {
    execute: &'a ExecuteScope,
    output: &'a mut S,
}

impl<'a, S: FieldSink + ?Sized> SetOutputScope<'a, S> {
    pub fn new(execute: &'a ExecuteScope, output: &'a mut S) -> Self {
        Self { execute, output }
    }
}

impl<S: FieldSink + ?Sized> SetAccessor<Value> for SetOutputScope<'_, S> {
    fn scope(&self) -> &ExecuteScope {
        self.execute
    }

    fn set_value(&mut self, value: Option<Value>) -> BindingResult<()> {
        self.output.write_field(value.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::convert::ValueConverter;
    use crate::error::BindingError;
    use crate::settings::Settings;

    #[derive(Default)]
    struct MockInput {
        fields: VecDeque<Value>,
    }

    impl FieldSource for MockInput {
        fn read_field(&mut self) -> BindingResult<Value> {
            self.fields
                .pop_front()
                .ok_or_else(|| BindingError::driver("no more fields"))
        }
    }

    #[derive(Default)]
    struct MockOutput {
        fields: Vec<Value>,
    }

    impl FieldSink for MockOutput {
        fn write_field(&mut self, value: Value) -> BindingResult<()> {
            self.fields.push(value);
            Ok(())
        }
    }

    #[test]
    fn test_sequential_typed_reads() {
        let execute = ExecuteScope::new(Settings::default());
        let mut input = MockInput {
            fields: VecDeque::from([Value::Int(7), Value::Null, Value::Int(9)]),
        };

        let mut first =
            GetInputScope::new(&execute, &mut input).convert(ValueConverter::<i64>::new());
        assert_eq!(first.value().unwrap(), Some(7));

        let mut second =
            GetInputScope::new(&execute, &mut input).convert(ValueConverter::<i64>::new());
        assert_eq!(second.value().unwrap(), None);

        let mut third =
            GetInputScope::new(&execute, &mut input).convert(ValueConverter::<i64>::new());
        assert_eq!(third.value().unwrap(), Some(9));
    }

    #[test]
    fn test_typed_writes_in_order() {
        let execute = ExecuteScope::new(Settings::default());
        let mut output = MockOutput::default();

        SetOutputScope::new(&execute, &mut output)
            .convert(ValueConverter::<String>::new())
            .set_value(Some("a".into()))
            .unwrap();
        SetOutputScope::new(&execute, &mut output)
            .convert(ValueConverter::<bool>::new())
            .set_value(None)
            .unwrap();

        assert_eq!(
            output.fields,
            vec![Value::String("a".into()), Value::Null]
        );
    }

    #[test]
    fn test_exhausted_input_surfaces_the_driver_error() {
        let execute = ExecuteScope::new(Settings::default());
        let mut input = MockInput::default();

        let mut accessor =
            GetInputScope::new(&execute, &mut input).convert(ValueConverter::<i64>::new());
        assert!(accessor.value().is_err());
    }
}
