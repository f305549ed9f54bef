//! The option bag every concrete builder is made of.
//!
//! A [`Builder`] pairs a static [`Variant`] descriptor (kind, revoked options,
//! representation groups, envelope) with an insertion-ordered map of option
//! values. Concrete types in [`crate::query`], [`crate::aggregation`] and the
//! other catalog modules are thin newtypes over it.
//!
//! Builders carry no locks. Mutation needs `&mut self` or ownership, so an
//! instance belongs to one call chain at a time; reusing a nested builder in
//! several parents means cloning it into each.

pub mod representation;
pub mod serializer;
pub mod variant;

pub use variant::{Envelope, RepresentationGroup, ShapeFn, Variant};

use crate::error::{EsqueryError, Result};
use crate::types::OptionValue;
use crate::warnings::{default_sink, WarningSink};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Builder {
    variant: &'static Variant,
    name: Option<String>,
    field: Option<String>,
    options: IndexMap<String, OptionValue>,
    disabled: IndexSet<String>,
    active_representation: Option<&'static str>,
    sink: Arc<dyn WarningSink>,
    rejected: Option<EsqueryError>,
}

impl Builder {
    pub fn new(variant: &'static Variant) -> Self {
        Self {
            variant,
            name: None,
            field: None,
            options: IndexMap::new(),
            disabled: variant.disabled.iter().map(|k| k.to_string()).collect(),
            active_representation: None,
            sink: default_sink(),
            rejected: None,
        }
    }

    /// A builder serialized under an outer `name` key.
    pub fn named(variant: &'static Variant, name: impl Into<String>) -> Self {
        let mut builder = Self::new(variant);
        builder.name = Some(name.into());
        builder
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn variant(&self) -> &'static Variant {
        self.variant
    }

    pub fn kind(&self) -> &'static str {
        self.variant.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn set_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.field = Some(field.into());
        self
    }

    pub fn options(&self) -> &IndexMap<String, OptionValue> {
        &self.options
    }

    pub fn active_representation(&self) -> Option<&'static str> {
        self.active_representation
    }

    pub fn set_warning_sink(&mut self, sink: Arc<dyn WarningSink>) -> &mut Self {
        self.sink = sink;
        self
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn is_disabled(&self, method: &str) -> bool {
        self.disabled.contains(method)
    }

    /// Fail if `method` has been revoked for this variant.
    pub fn ensure_supported(&self, method: &str) -> Result<()> {
        if self.is_disabled(method) {
            return Err(EsqueryError::UnsupportedOption {
                method: method.to_string(),
                variant: self.variant.name.to_string(),
            });
        }
        Ok(())
    }

    /// Revoke an option while the builder is being constructed. Restrictions
    /// are fixed once a builder is handed out, so this consumes it.
    pub fn disable_option(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.remove_option(&key);
        self.disabled.insert(key);
        self
    }

    /// The first write refused on a revoked option, reported by
    /// [`Builder::to_document`].
    pub fn rejected(&self) -> Option<&EsqueryError> {
        self.rejected.as_ref()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_option(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        self.ensure_supported(key)?;
        self.resolve_representation(key);
        self.options.insert(key.to_string(), value.into());
        Ok(self)
    }

    /// Append `value` to the list stored under `key`, creating it if needed.
    pub fn push_option(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        self.ensure_supported(key)?;
        self.resolve_representation(key);
        self.push_unchecked(key, value.into());
        Ok(self)
    }

    /// Insert `value` under `entry` in the object stored under `key`.
    pub fn insert_option_entry(
        &mut self,
        key: &str,
        entry: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.ensure_supported(key)?;
        self.resolve_representation(key);
        self.insert_entry_unchecked(key, entry.into(), value.into());
        Ok(self)
    }

    pub fn remove_option(&mut self, key: &str) -> Option<OptionValue> {
        let removed = self.options.shift_remove(key);
        if removed.is_some() {
            self.release_representation(key);
        }
        removed
    }

    /// Write path for a variant's own setters, whose keys are never in the
    /// variant's disabled list. A write to a revoked key is not applied and
    /// the builder fails to serialize with [`EsqueryError::UnsupportedOption`].
    pub(crate) fn put(&mut self, key: &str, value: impl Into<OptionValue>) {
        if self.refuses(key) {
            return;
        }
        self.resolve_representation(key);
        self.options.insert(key.to_string(), value.into());
    }

    pub(crate) fn push(&mut self, key: &str, value: impl Into<OptionValue>) {
        if self.refuses(key) {
            return;
        }
        self.resolve_representation(key);
        self.push_unchecked(key, value.into());
    }

    pub(crate) fn put_entry(&mut self, key: &str, entry: impl Into<String>, value: impl Into<OptionValue>) {
        if self.refuses(key) {
            return;
        }
        self.resolve_representation(key);
        self.insert_entry_unchecked(key, entry.into(), value.into());
    }

    fn refuses(&mut self, key: &str) -> bool {
        let Err(err) = self.ensure_supported(key) else {
            return false;
        };
        tracing::debug!("[OPTION {}] refused write to {}", self.variant.name, key);
        self.rejected.get_or_insert(err);
        true
    }

    fn push_unchecked(&mut self, key: &str, value: OptionValue) {
        match self.options.get_mut(key) {
            Some(OptionValue::List(items)) => items.push(value),
            Some(existing) => {
                let previous = std::mem::replace(existing, OptionValue::List(Vec::new()));
                *existing = OptionValue::List(vec![previous, value]);
            }
            None => {
                self.options
                    .insert(key.to_string(), OptionValue::List(vec![value]));
            }
        }
    }

    fn insert_entry_unchecked(&mut self, key: &str, entry: String, value: OptionValue) {
        match self.options.get_mut(key) {
            Some(OptionValue::Map(map)) => {
                map.insert(entry, value);
            }
            Some(existing @ OptionValue::Json(Value::Object(_))) => {
                let previous = std::mem::replace(existing, OptionValue::Json(Value::Null));
                let mut map: IndexMap<String, OptionValue> = match previous {
                    OptionValue::Json(Value::Object(obj)) => obj
                        .into_iter()
                        .map(|(k, v)| (k, OptionValue::Json(v)))
                        .collect(),
                    _ => IndexMap::new(),
                };
                map.insert(entry, value);
                *existing = OptionValue::Map(map);
            }
            _ => {
                let mut map = IndexMap::new();
                map.insert(entry, value);
                self.options.insert(key.to_string(), OptionValue::Map(map));
            }
        }
    }

    /// Append a named builder to the merged collection under `key`.
    pub(crate) fn push_named(&mut self, key: &str, builder: Builder) {
        if self.refuses(key) {
            return;
        }
        match self.options.get_mut(key) {
            Some(OptionValue::Named(items)) => items.push(builder),
            _ => {
                self.options
                    .insert(key.to_string(), OptionValue::Named(vec![builder]));
            }
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document()?)?)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("variant", &self.variant.name)
            .field("kind", &self.variant.kind)
            .field("name", &self.name)
            .field("field", &self.field)
            .field("options", &self.options)
            .field("disabled", &self.disabled)
            .field("active_representation", &self.active_representation)
            .field("rejected", &self.rejected)
            .finish()
    }
}

/// Access to the [`Builder`] behind a concrete builder type.
///
/// Family traits such as [`crate::query::Query`] and
/// [`crate::aggregation::Aggregation`] build their shared setters on top of
/// this.
pub trait Buildable: Sized {
    fn builder(&self) -> &Builder;

    fn builder_mut(&mut self) -> &mut Builder;

    fn into_builder(self) -> Builder;

    fn to_document(&self) -> Result<Value> {
        self.builder().to_document()
    }

    fn to_json_string(&self) -> Result<String> {
        self.builder().to_json_string()
    }

    /// Route representation-conflict notices to `sink`.
    fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.builder_mut().set_warning_sink(sink);
        self
    }
}

impl Buildable for Builder {
    fn builder(&self) -> &Builder {
        self
    }

    fn builder_mut(&mut self) -> &mut Builder {
        self
    }

    fn into_builder(self) -> Builder {
        self
    }
}

/// Implements [`Buildable`], `Serialize` and `Into<OptionValue>` for
/// newtypes over [`Builder`].
macro_rules! buildable {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::builder::Buildable for $ty {
                fn builder(&self) -> &$crate::builder::Builder {
                    &self.0
                }

                fn builder_mut(&mut self) -> &mut $crate::builder::Builder {
                    &mut self.0
                }

                fn into_builder(self) -> $crate::builder::Builder {
                    self.0
                }
            }

            impl From<$ty> for $crate::types::OptionValue {
                fn from(value: $ty) -> Self {
                    $crate::types::OptionValue::Builder(Box::new(value.0))
                }
            }

            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> std::result::Result<S::Ok, S::Error> {
                    serde::Serialize::serialize(&self.0, serializer)
                }
            }
        )+
    };
}

pub(crate) use buildable;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::RecordingSink;
    use serde_json::json;

    static PLAIN: Variant = Variant::keyed("PlainBuilder", "my_agg_kind");
    static RESTRICTED: Variant =
        Variant::keyed("RestrictedAggregation", "restricted").disabling(&["field", "script"]);

    #[test]
    fn test_set_option_returns_same_instance() {
        let mut b = Builder::new(&PLAIN);
        let before: *const Builder = &b;
        let after: *const Builder = b.set_option("field", "f").unwrap();
        assert!(std::ptr::eq(before, after));

        let chained = b
            .set_option("a", 1)
            .unwrap()
            .set_option("b", 2)
            .unwrap()
            .set_option("c", 3)
            .unwrap();
        assert!(std::ptr::eq(before, chained));
    }

    #[test]
    fn test_get_and_last_write_wins() {
        let mut b = Builder::new(&PLAIN);
        b.set_option("size", 10).unwrap();
        b.set_option("field", "f").unwrap();
        b.set_option("size", 20).unwrap();

        assert_eq!(b.option("size").and_then(|v| v.as_json()), Some(&json!(20)));
        assert!(b.option("missing").is_none());
        let keys: Vec<&str> = b.options().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["size", "field"]);
    }

    #[test]
    fn test_remove_option() {
        let mut b = Builder::new(&PLAIN);
        b.set_option("field", "f").unwrap();
        assert!(b.remove_option("field").is_some());
        assert!(!b.has_option("field"));
        assert!(b.remove_option("field").is_none());
    }

    #[test]
    fn test_disabled_option_fails_before_mutation() {
        let mut b = Builder::new(&RESTRICTED);
        let err = b.set_option("field", "anything").unwrap_err();
        assert_eq!(err.to_string(), "field is not supported in RestrictedAggregation");
        assert!(b.options().is_empty());

        assert!(b.push_option("script", "x").is_err());
        assert!(b.insert_option_entry("script", "k", "v").is_err());
        assert!(b.options().is_empty());
    }

    #[test]
    fn test_disable_option_at_construction() {
        let mut b = Builder::new(&PLAIN).disable_option("format");
        let err = b.set_option("format", "0.00").unwrap_err();
        assert_eq!(err.to_string(), "format is not supported in PlainBuilder");
        assert!(!b.has_option("format"));
        assert!(b.to_document().is_ok());
    }

    #[test]
    fn test_refused_internal_write_fails_serialization() {
        let mut b = Builder::new(&RESTRICTED);
        b.put("field", "price");
        b.push("script", "a");
        b.put_entry("field", "k", "v");
        b.push_named("field", Builder::named(&PLAIN, "child"));
        assert!(b.options().is_empty());

        let expected = EsqueryError::UnsupportedOption {
            method: "field".to_string(),
            variant: "RestrictedAggregation".to_string(),
        };
        assert_eq!(b.rejected(), Some(&expected));
        assert_eq!(b.to_document().unwrap_err(), expected);
        assert!(b.to_json_string().is_err());
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut b = Builder::new(&PLAIN);
        b.push_option("sort", "a").unwrap();
        b.push_option("sort", "b").unwrap();
        b.push_option("sort", "c").unwrap();
        let items: Vec<&str> = b
            .option("sort")
            .and_then(|v| v.as_list())
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_push_onto_scalar_promotes_to_list() {
        let mut b = Builder::new(&PLAIN);
        b.set_option("tags", "a").unwrap();
        b.push_option("tags", "b").unwrap();
        assert_eq!(b.to_document().unwrap(), json!({"my_agg_kind": {"tags": ["a", "b"]}}));
    }

    #[test]
    fn test_insert_option_entry_builds_object() {
        let mut b = Builder::new(&PLAIN);
        b.insert_option_entry("meta", "color", "blue").unwrap();
        b.insert_option_entry("meta", "size", 3).unwrap();
        assert_eq!(
            b.to_document().unwrap(),
            json!({"my_agg_kind": {"meta": {"color": "blue", "size": 3}}})
        );
    }

    #[test]
    fn test_buildable_with_warning_sink() {
        let sink = RecordingSink::new();
        let b = Builder::new(&PLAIN).with_warning_sink(sink.clone());
        b.sink.warn("PlainBuilder", "hello");
        assert_eq!(sink.messages(), vec!["hello"]);
    }
}
