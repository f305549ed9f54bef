use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::enums::SCRIPT_TYPE;
use crate::error::{EsqueryError, Result};
use serde_json::Value;

static SCRIPT: Variant = Variant::bare("Script", "script")
    .with_representations(&[
        RepresentationGroup::new("inline", &["inline"]),
        RepresentationGroup::new("source", &["source"]),
        RepresentationGroup::new("stored", &["id"]),
        RepresentationGroup::new("file", &["file"]),
    ])
    .requiring_representation();

/// A script reference: inline text, a stored script id, or a file name,
/// plus language and parameters.
#[derive(Debug, Clone)]
pub struct Script(Builder);

buildable!(Script);

impl Script {
    /// Create a script whose source kind is chosen at runtime.
    ///
    /// `script_type` is matched case-insensitively against `inline`,
    /// `source`, `stored`, `id` and `file`.
    ///
    /// # Errors
    ///
    /// [`EsqueryError::InvalidConstructorArgument`] for any other type.
    pub fn new(script_type: &str, source: impl Into<String>) -> Result<Self> {
        let script = Self::empty();
        Ok(match SCRIPT_TYPE.validate_constructor(script_type)?.as_str() {
            "inline" => script.inline(source),
            "source" => script.source(source),
            "file" => script.file(source),
            _ => script.stored(source),
        })
    }

    /// A script with no source yet. One must be set before serializing.
    pub fn empty() -> Self {
        Self(Builder::new(&SCRIPT))
    }

    /// Shorthand for `Script::empty().source(source)`.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self::empty().source(source)
    }

    pub fn inline(mut self, source: impl Into<String>) -> Self {
        self.0.put("inline", source.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.0.put("source", source.into());
        self
    }

    /// Reference a stored script by id.
    pub fn stored(mut self, id: impl Into<String>) -> Self {
        self.0.put("id", id.into());
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.stored(id)
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.0.put("file", file.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.0.put("lang", lang.into());
        self
    }

    /// Script parameters. Must be a JSON object.
    pub fn params(mut self, params: Value) -> Result<Self> {
        match params {
            Value::Object(_) => {
                self.0.put("params", params);
                Ok(self)
            }
            _ => Err(EsqueryError::InvalidArgumentType {
                param: "params".to_string(),
                expected: "Object".to_string(),
            }),
        }
    }
}
