//! Accessors wrapping one statement parameter get/set call.

use crate::ast::Value;
use crate::bind::{ExecuteScope, GetAccessor, ParameterSink, ParameterSource, SetAccessor};
use crate::error::BindingResult;

/// Writes one statement parameter at a 1-based index.
pub struct SetStatementScope<'a, S: ParameterSink + ?Sized> {
    execute: &'a ExecuteScope,
    statement: &'a mut S,
    index: usize,
}

impl<'a, S: ParameterSink + ?Sized> SetStatementScope<'a, S> {
    pub fn new(execute: &'a ExecuteScope, statement: &'a mut S, index: usize) -> Self {
        Self {
            execute,
            statement,
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<S: ParameterSink + ?Sized> SetAccessor<Value> for SetStatementScope<'_, S> {
    fn scope(&self) -> &ExecuteScope {
        self.execute
    }

    fn converter_scope(&self) -> crate::bind::ConverterScope<'_> {
        self.execute.converter_scope_at(self.index)
    }

    fn set_value(&mut self, value: Option<Value>) -> BindingResult<()> {
        tracing::trace!(index = self.index, "set statement parameter");
        self.statement
            .set_parameter(self.index, value.unwrap_or(Value::Null))
    }
}

/// Reads one output parameter of a callable statement at a 1-based index.
pub struct GetStatementScope<'a, S: ParameterSource + ?Sized> {
    execute: &'a ExecuteScope,
    statement: &'a S,
    index: usize,
}

impl<'a, S: ParameterSource + ?Sized> GetStatementScope<'a, S> {
    pub fn new(execute: &'a ExecuteScope, statement: &'a S, index: usize) -> Self {
        Self {
            execute,
            statement,
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<S: ParameterSource + ?Sized> GetAccessor<Value> for GetStatementScope<'_, S> {
    fn scope(&self) -> &ExecuteScope {
        self.execute
    }

    fn converter_scope(&self) -> crate::bind::ConverterScope<'_> {
        self.execute.converter_scope_at(self.index)
    }

    fn value(&mut self) -> BindingResult<Option<Value>> {
        let value = self.statement.parameter(self.index)?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::convert::{DocumentConverter, ValueConverter};
    use crate::error::BindingError;
    use crate::settings::Settings;

    #[derive(Default)]
    struct MockStatement {
        params: HashMap<usize, Value>,
    }

    impl ParameterSink for MockStatement {
        fn set_parameter(&mut self, index: usize, value: Value) -> BindingResult<()> {
            self.params.insert(index, value);
            Ok(())
        }
    }

    impl ParameterSource for MockStatement {
        fn parameter(&self, index: usize) -> BindingResult<Value> {
            self.params
                .get(&index)
                .cloned()
                .ok_or_else(|| BindingError::driver(format!("no parameter {index}")))
        }
    }

    #[test]
    fn test_typed_write_routes_through_the_converter() {
        let execute = ExecuteScope::new(Settings::default());
        let mut statement = MockStatement::default();

        let mut accessor = SetStatementScope::new(&execute, &mut statement, 1)
            .convert(ValueConverter::<i64>::new());
        accessor.set_value(Some(42)).unwrap();

        assert_eq!(statement.params.get(&1), Some(&Value::Int(42)));
    }

    #[test]
    fn test_null_write_reaches_the_driver_as_null() {
        let execute = ExecuteScope::new(Settings::default());
        let mut statement = MockStatement::default();

        let mut accessor = SetStatementScope::new(&execute, &mut statement, 2)
            .convert(ValueConverter::<String>::new());
        accessor.set_value(None).unwrap();

        assert_eq!(statement.params.get(&2), Some(&Value::Null));
    }

    #[test]
    fn test_typed_read_routes_through_the_converter() {
        let execute = ExecuteScope::new(Settings::default());
        let mut statement = MockStatement::default();
        statement.params.insert(3, Value::String("out".into()));

        let mut accessor = GetStatementScope::new(&execute, &statement, 3)
            .convert(ValueConverter::<String>::new());
        assert_eq!(accessor.value().unwrap(), Some("out".to_string()));
    }

    #[test]
    fn test_accessor_chains_compose() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Payload {
            tag: String,
        }

        let execute = ExecuteScope::new(Settings::default());
        let mut statement = MockStatement::default();

        // Value -> String -> Payload
        let mut accessor = SetStatementScope::new(&execute, &mut statement, 1)
            .convert(ValueConverter::<String>::new())
            .convert(DocumentConverter::<Payload>::new());
        accessor
            .set_value(Some(Payload { tag: "a".into() }))
            .unwrap();

        assert_eq!(
            statement.params.get(&1),
            Some(&Value::String(r#"{"payload":{"tag":"a"}}"#.into()))
        );

        let mut reader = GetStatementScope::new(&execute, &statement, 1)
            .convert(ValueConverter::<String>::new())
            .convert(DocumentConverter::<Payload>::new());
        assert_eq!(reader.value().unwrap(), Some(Payload { tag: "a".into() }));
    }

    #[test]
    fn test_converter_scope_carries_the_position() {
        let execute = ExecuteScope::new(Settings::default());
        let mut statement = MockStatement::default();

        let positional = crate::convert::converter(
            |n: i64, scope: &crate::bind::ConverterScope<'_>| {
                assert_eq!(scope.position(), Some(4));
                Ok(Value::Int(n))
            },
            |v: Value, _: &crate::bind::ConverterScope<'_>| match v {
                Value::Int(n) => Ok(n),
                other => Err(crate::error::ConversionError::invalid_value(
                    "i64",
                    other.to_string(),
                    "unexpected value variant",
                )),
            },
        );

        let mut accessor =
            SetStatementScope::new(&execute, &mut statement, 4).convert(positional);
        accessor.set_value(Some(11)).unwrap();
        assert_eq!(statement.params.get(&4), Some(&Value::Int(11)));
    }

    #[test]
    fn test_driver_errors_propagate_unchanged() {
        let execute = ExecuteScope::new(Settings::default());
        let statement = MockStatement::default();

        let mut accessor = GetStatementScope::new(&execute, &statement, 9)
            .convert(ValueConverter::<i64>::new());
        let err = accessor.value().unwrap_err();
        assert_eq!(err.to_string(), "driver: no parameter 9");
    }
}
