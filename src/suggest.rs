use crate::builder::{buildable, Builder, Variant};
use crate::enums::{STRING_DISTANCE, SUGGEST_MODE, SUGGEST_SORT};
use crate::error::Result;

static TERM_SUGGESTER: Variant = Variant::keyed("TermSuggester", "term")
    .with_outer(&["text"])
    .requiring(&["field"]);

/// Spelling suggestions per term of the input text.
///
/// Serializes as `{ <name>: { "text": ..., "term": { ... } } }`. The text may
/// be left out when the request supplies a global suggest text.
#[derive(Debug, Clone)]
pub struct TermSuggester(Builder);

buildable!(TermSuggester);

impl TermSuggester {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut suggester = Self(Builder::named(&TERM_SUGGESTER, name));
        suggester.0.put("field", field.into());
        suggester
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.0.put("text", text.into());
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.0.put("analyzer", analyzer.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.0.put("size", size);
        self
    }

    /// `score` or `frequency`.
    pub fn sort(mut self, sort: &str) -> Result<Self> {
        let sort = SUGGEST_SORT.validate(sort)?;
        self.0.put("sort", sort);
        Ok(self)
    }

    pub fn suggest_mode(mut self, mode: &str) -> Result<Self> {
        let mode = SUGGEST_MODE.validate(mode)?;
        self.0.put("suggest_mode", mode);
        Ok(self)
    }

    pub fn string_distance(mut self, distance: &str) -> Result<Self> {
        let distance = STRING_DISTANCE.validate(distance)?;
        self.0.put("string_distance", distance);
        Ok(self)
    }

    pub fn max_edits(mut self, edits: u32) -> Self {
        self.0.put("max_edits", edits);
        self
    }

    pub fn prefix_length(mut self, length: u32) -> Self {
        self.0.put("prefix_length", length);
        self
    }

    pub fn min_word_length(mut self, length: u32) -> Self {
        self.0.put("min_word_length", length);
        self
    }
}
