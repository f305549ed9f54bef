use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::enums::TEMPLATE_TYPE;
use crate::error::{EsqueryError, Result};
use crate::types::OptionValue;
use serde_json::Value;

static SEARCH_TEMPLATE: Variant = Variant::bare("SearchTemplate", "template")
    .with_representations(&[
        RepresentationGroup::new("inline", &["inline"]),
        RepresentationGroup::new("source", &["source"]),
        RepresentationGroup::new("file", &["file"]),
        RepresentationGroup::new("id", &["id"]),
    ])
    .requiring_representation();

/// A mustache search template with its parameters.
#[derive(Debug, Clone)]
pub struct SearchTemplate(Builder);

buildable!(SearchTemplate);

impl SearchTemplate {
    /// `template_type` is matched case-insensitively against `inline`,
    /// `source`, `file` and `id`. A template body may be a JSON object or a
    /// mustache string.
    pub fn new(template_type: &str, template: impl Into<OptionValue>) -> Result<Self> {
        let template_type = TEMPLATE_TYPE.validate_constructor(template_type)?;
        let mut search = Self::empty();
        let key = match template_type.as_str() {
            "inline" => "inline",
            "source" => "source",
            "file" => "file",
            _ => "id",
        };
        search.0.put(key, template);
        Ok(search)
    }

    pub fn empty() -> Self {
        Self(Builder::new(&SEARCH_TEMPLATE))
    }

    pub fn inline(mut self, template: impl Into<OptionValue>) -> Self {
        self.0.put("inline", template);
        self
    }

    pub fn source(mut self, template: impl Into<OptionValue>) -> Self {
        self.0.put("source", template);
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.0.put("file", file.into());
        self
    }

    /// Reference a stored template.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.0.put("id", id.into());
        self
    }

    pub fn params(mut self, params: Value) -> Result<Self> {
        if !params.is_object() {
            return Err(EsqueryError::InvalidArgumentType {
                param: "params".to_string(),
                expected: "Object".to_string(),
            });
        }
        self.0.put("params", params);
        Ok(self)
    }

    /// Add one template parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.0.put_entry("params", name, value);
        self
    }

    pub fn explain(mut self, explain: bool) -> Self {
        self.0.put("explain", explain);
        self
    }

    pub fn profile(mut self, profile: bool) -> Self {
        self.0.put("profile", profile);
        self
    }
}
