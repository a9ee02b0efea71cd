//! Rich-object conversion through a structured text document.
//!
//! The wire form is a JSON document whose single top-level key is derived
//! from the domain type's name. The codec handle is built lazily on first
//! use and cached per converter instance; a clone starts with an empty cell
//! and rebuilds the handle on its own first use.

use std::marker::PhantomData;

use once_cell::sync::OnceCell;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::bind::ConverterScope;
use crate::convert::{Converter, TypeDesc};
use crate::error::{ConversionError, ConversionResult};

/// The per-instance marshalling handle: the derived document root name.
#[derive(Debug, Clone)]
struct DocumentCodec {
    root: String,
}

impl DocumentCodec {
    fn build(ty: &TypeDesc) -> ConversionResult<Self> {
        let simple = ty
            .name()
            .rsplit("::")
            .next()
            .unwrap_or_default();

        let valid = !simple.is_empty()
            && simple.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false)
            && simple.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !valid {
            return Err(ConversionError::CodecUnavailable {
                type_name: ty.name(),
                message: format!("cannot derive a document root from '{}'", simple),
            });
        }

        let mut root = String::with_capacity(simple.len());
        let mut chars = simple.chars();
        if let Some(first) = chars.next() {
            root.extend(first.to_lowercase());
        }
        root.push_str(chars.as_str());
        Ok(Self { root })
    }
}

/// Converts a domain type to and from its document wire form.
pub struct DocumentConverter<T> {
    codec: OnceCell<DocumentCodec>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned + 'static> DocumentConverter<T> {
    pub fn new() -> Self {
        Self {
            codec: OnceCell::new(),
            _marker: PhantomData,
        }
    }

    /// The cached codec, built on first use. An unusable domain type
    /// surfaces here, once per call site, never at construction.
    fn codec(&self) -> ConversionResult<&DocumentCodec> {
        self.codec
            .get_or_try_init(|| DocumentCodec::build(&TypeDesc::of::<T>()))
    }
}

impl<T: Serialize + DeserializeOwned + 'static> Default for DocumentConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned + 'static> Clone for DocumentConverter<T> {
    fn clone(&self) -> Self {
        // the codec handle is per-instance; the clone rebuilds it lazily
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned + 'static> Converter for DocumentConverter<T> {
    type Wire = String;
    type Domain = T;

    fn to(
        &self,
        value: Option<T>,
        _scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<String>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let codec = self.codec()?;
        let body =
            serde_json::to_value(&value).map_err(|e| ConversionError::MalformedDocument {
                type_name: std::any::type_name::<T>(),
                message: e.to_string(),
            })?;
        let mut doc = serde_json::Map::with_capacity(1);
        doc.insert(codec.root.clone(), body);
        Ok(Some(serde_json::Value::Object(doc).to_string()))
    }

    fn from(
        &self,
        value: Option<String>,
        _scope: &ConverterScope<'_>,
    ) -> ConversionResult<Option<T>> {
        let Some(text) = value else {
            return Ok(None);
        };
        let codec = self.codec()?;
        let mismatch = |message: String| ConversionError::MalformedDocument {
            type_name: std::any::type_name::<T>(),
            message,
        };

        let mut doc: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| mismatch(e.to_string()))?;
        // accept both the rooted document and a bare body
        let body = match doc.get_mut(codec.root.as_str()) {
            Some(body) => body.take(),
            None => doc,
        };
        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| mismatch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;
    use crate::bind::ExecuteScope;
    use crate::settings::Settings;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Street {
        name: String,
        no: u32,
    }

    #[test]
    fn test_document_round_trip_uses_a_derived_root() {
        let scope = ExecuteScope::new(Settings::default());
        let converter = DocumentConverter::<Street>::new();

        let street = Street {
            name: "Main".into(),
            no: 12,
        };
        let doc = converter
            .to(Some(street.clone()), &scope.converter_scope())
            .unwrap()
            .unwrap();
        assert_eq!(doc, r#"{"street":{"name":"Main","no":12}}"#);

        let back = converter
            .from(Some(doc), &scope.converter_scope())
            .unwrap();
        assert_eq!(back, Some(street));
    }

    #[test]
    fn test_bare_body_is_accepted() {
        let scope = ExecuteScope::new(Settings::default());
        let converter = DocumentConverter::<Street>::new();

        let back = converter
            .from(
                Some(r#"{"name":"Side","no":3}"#.into()),
                &scope.converter_scope(),
            )
            .unwrap();
        assert_eq!(
            back,
            Some(Street {
                name: "Side".into(),
                no: 3
            })
        );
    }

    #[test]
    fn test_null_document_propagates() {
        let scope = ExecuteScope::new(Settings::default());
        let converter = DocumentConverter::<Street>::new();
        assert_eq!(converter.to(None, &scope.converter_scope()).unwrap(), None);
        assert_eq!(converter.from(None, &scope.converter_scope()).unwrap(), None);
    }

    #[test]
    fn test_unusable_domain_type_fails_at_first_use() {
        let scope = ExecuteScope::new(Settings::default());
        // a generic type name cannot produce a document root
        let converter = DocumentConverter::<Vec<Street>>::new();

        let err = converter
            .to(Some(vec![]), &scope.converter_scope())
            .unwrap_err();
        assert!(matches!(err, ConversionError::CodecUnavailable { .. }));
    }

    #[test]
    fn test_clone_rebuilds_the_codec_lazily() {
        let scope = ExecuteScope::new(Settings::default());
        let converter = DocumentConverter::<Street>::new();
        // force the codec into the cell
        let _ = converter
            .to(
                Some(Street {
                    name: "X".into(),
                    no: 1,
                }),
                &scope.converter_scope(),
            )
            .unwrap();

        let cloned = converter.clone();
        assert!(cloned.codec.get().is_none());
        // and the clone still converts
        let doc = cloned
            .from(
                Some(r#"{"street":{"name":"Y","no":2}}"#.into()),
                &scope.converter_scope(),
            )
            .unwrap();
        assert_eq!(doc.unwrap().name, "Y");
    }

    #[test]
    fn test_malformed_document_reports_the_type() {
        let scope = ExecuteScope::new(Settings::default());
        let converter = DocumentConverter::<Street>::new();

        let err = converter
            .from(Some("not json".into()), &scope.converter_scope())
            .unwrap_err();
        match err {
            ConversionError::MalformedDocument { type_name, .. } => {
                assert!(type_name.contains("Street"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
