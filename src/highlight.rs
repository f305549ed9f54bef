//! Search-result highlighting.
//!
//! Most settings can be given globally on [`Highlight`] and overridden per
//! field on a [`HighlightField`]; both share [`HighlightOptions`].

use crate::builder::{buildable, Buildable, Builder, Variant};
use crate::enums::{
    BOUNDARY_SCANNER, HIGHLIGHT_ENCODER, HIGHLIGHT_FRAGMENTER, HIGHLIGHT_ORDER,
    HIGHLIGHT_TAGS_SCHEMA, HIGHLIGHT_TYPE,
};
use crate::error::Result;
use crate::query::Query;

static HIGHLIGHT: Variant = Variant::bare("Highlight", "highlight");
static HIGHLIGHT_FIELD: Variant = Variant::bare("HighlightField", "highlight_field");

/// Settings accepted both globally and per field.
pub trait HighlightOptions: Buildable {
    /// Highlighter implementation: `unified`, `plain`, `fvh` or `postings`.
    fn highlighter_type(mut self, highlighter: &str) -> Result<Self> {
        let highlighter = HIGHLIGHT_TYPE.validate(highlighter)?;
        self.builder_mut().put("type", highlighter);
        Ok(self)
    }

    fn pre_tags<S: Into<String>>(mut self, tags: Vec<S>) -> Self {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.builder_mut().put("pre_tags", tags);
        self
    }

    fn post_tags<S: Into<String>>(mut self, tags: Vec<S>) -> Self {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.builder_mut().put("post_tags", tags);
        self
    }

    fn fragment_size(mut self, size: u32) -> Self {
        self.builder_mut().put("fragment_size", size);
        self
    }

    fn number_of_fragments(mut self, count: u32) -> Self {
        self.builder_mut().put("number_of_fragments", count);
        self
    }

    fn fragmenter(mut self, fragmenter: &str) -> Result<Self> {
        let fragmenter = HIGHLIGHT_FRAGMENTER.validate(fragmenter)?;
        self.builder_mut().put("fragmenter", fragmenter);
        Ok(self)
    }

    /// Only `score` is accepted; fragments are otherwise in document order.
    fn order(mut self, order: &str) -> Result<Self> {
        let order = HIGHLIGHT_ORDER.validate(order)?;
        self.builder_mut().put("order", order);
        Ok(self)
    }

    fn boundary_scanner(mut self, scanner: &str) -> Result<Self> {
        let scanner = BOUNDARY_SCANNER.validate(scanner)?;
        self.builder_mut().put("boundary_scanner", scanner);
        Ok(self)
    }

    fn require_field_match(mut self, required: bool) -> Self {
        self.builder_mut().put("require_field_match", required);
        self
    }

    fn no_match_size(mut self, size: u32) -> Self {
        self.builder_mut().put("no_match_size", size);
        self
    }

    /// Highlight matches of `query` instead of the search query.
    fn highlight_query<Q: Query>(mut self, query: Q) -> Self {
        self.builder_mut().put("highlight_query", query.into_builder());
        self
    }
}

/// The `highlight` section of a search request.
#[derive(Debug, Clone)]
pub struct Highlight(Builder);

/// Overrides for one highlighted field.
#[derive(Debug, Clone)]
pub struct HighlightField(Builder);

buildable!(Highlight, HighlightField);

impl HighlightOptions for Highlight {}
impl HighlightOptions for HighlightField {}

impl Default for Highlight {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlight {
    pub fn new() -> Self {
        Self(Builder::new(&HIGHLIGHT))
    }

    /// Highlight `field` with the global settings.
    pub fn field(self, field: impl Into<String>) -> Self {
        self.field_with(HighlightField::new(field))
    }

    /// Highlight a field with its own overrides.
    pub fn field_with(mut self, field: HighlightField) -> Self {
        let name = field.name().to_string();
        self.0.put_entry("fields", name, field);
        self
    }

    pub fn encoder(mut self, encoder: &str) -> Result<Self> {
        let encoder = HIGHLIGHT_ENCODER.validate(encoder)?;
        self.0.put("encoder", encoder);
        Ok(self)
    }

    /// Use a predefined tag set instead of `pre_tags`/`post_tags`.
    pub fn tags_schema(mut self, schema: &str) -> Result<Self> {
        let schema = HIGHLIGHT_TAGS_SCHEMA.validate(schema)?;
        self.0.put("tags_schema", schema);
        Ok(self)
    }
}

impl HighlightField {
    pub fn new(field: impl Into<String>) -> Self {
        Self(Builder::new(&HIGHLIGHT_FIELD).with_field(field))
    }

    pub fn name(&self) -> &str {
        self.0.field().unwrap_or_default()
    }

    /// Combine matches from several fields into this one (`fvh` only).
    pub fn matched_fields<S: Into<String>>(mut self, fields: Vec<S>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.0.put("matched_fields", fields);
        self
    }
}
