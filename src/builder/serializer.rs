use super::{Builder, Envelope};
use crate::error::{EsqueryError, Result};
use crate::types::OptionValue;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

impl Builder {
    /// Produce the plain JSON document for this builder.
    ///
    /// Reads the instance only; calling it twice without mutation in between
    /// yields equal documents.
    ///
    /// # Errors
    ///
    /// [`EsqueryError::UnsupportedOption`] when a write to a revoked option
    /// was refused. [`EsqueryError::MissingRequiredField`] when a required
    /// option, or the variant's mandatory representation, has not been set.
    /// Variant shape hooks may report their own missing fields the same way.
    pub fn to_document(&self) -> Result<Value> {
        if let Some(err) = &self.rejected {
            return Err(err.clone());
        }
        self.check_required()?;

        let keyed = self.variant.envelope == Envelope::Keyed;
        let mut inner = Map::new();
        let mut outer = Map::new();
        for (key, value) in &self.options {
            let serialized = serialize_value(value)?;
            if keyed && self.variant.is_outer(key) {
                outer.insert(key.clone(), serialized);
            } else {
                inner.insert(key.clone(), serialized);
            }
        }

        let body = match self.variant.shape {
            Some(shape) => shape(self, inner)?,
            None => Value::Object(inner),
        };

        let document = match self.variant.envelope {
            Envelope::Keyed => {
                let mut wrapped = Map::new();
                wrapped.insert(self.variant.kind.to_string(), body);
                wrapped.extend(outer);
                Value::Object(wrapped)
            }
            Envelope::Bare => body,
        };

        tracing::trace!(variant = self.variant.name, "[SERIALIZE] built document");

        Ok(match self.name.as_deref() {
            Some(name) if !name.is_empty() => {
                let mut named = Map::new();
                named.insert(name.to_string(), document);
                Value::Object(named)
            }
            _ => document,
        })
    }

    fn check_required(&self) -> Result<()> {
        for field in self.variant.required {
            let present = self
                .options
                .get(*field)
                .map(|v| !v.is_null())
                .unwrap_or(false);
            if !present {
                return Err(self.missing(field));
            }
        }

        if self.variant.require_representation && self.active_representation.is_none() {
            let names: Vec<&str> = self
                .variant
                .representations
                .iter()
                .map(|g| g.name)
                .collect();
            return Err(self.missing(&names.join(" or ")));
        }

        Ok(())
    }

    pub(crate) fn missing(&self, field: &str) -> EsqueryError {
        EsqueryError::MissingRequiredField {
            entity: self.variant.name.to_string(),
            field: field.to_string(),
        }
    }

    /// The positional field of a field-keyed variant.
    pub(crate) fn require_field(&self) -> Result<&str> {
        self.field().ok_or_else(|| self.missing("field"))
    }
}

/// Recursively expand nested builders; plain values pass through unchanged.
pub fn serialize_value(value: &OptionValue) -> Result<Value> {
    match value {
        OptionValue::Json(v) => Ok(v.clone()),
        OptionValue::Builder(b) => b.to_document(),
        OptionValue::List(items) => items
            .iter()
            .map(serialize_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        OptionValue::Map(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(k.clone(), serialize_value(v)?);
            }
            Ok(Value::Object(out))
        }
        OptionValue::Named(builders) => {
            let mut out = Map::new();
            for b in builders {
                if b.name().map_or(true, str::is_empty) {
                    return Err(b.missing("name"));
                }
                match b.to_document()? {
                    Value::Object(doc) => out.extend(doc),
                    _ => {
                        return Err(EsqueryError::InvalidArgumentType {
                            param: b.variant().name.to_string(),
                            expected: "a named builder".to_string(),
                        })
                    }
                }
            }
            Ok(Value::Object(out))
        }
    }
}

impl Serialize for Builder {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_document()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
