//! The body of a `_search` request.

use crate::aggregation::Aggregation;
use crate::builder::{buildable, Buildable, Builder, Variant};
use crate::error::{EsqueryError, Result};
use crate::highlight::Highlight;
use crate::query::Query;
use crate::sort::Sort;
use crate::suggest::TermSuggester;
use crate::types::OptionValue;
use serde_json::{Map, Value};

static REQUEST_BODY_SEARCH: Variant =
    Variant::bare("RequestBodySearch", "search").shaped(shape_request);

/// Fold the global suggest text into the `suggest` section.
fn shape_request(_builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    let Some(text) = body.shift_remove("suggest_text") else {
        return Ok(Value::Object(body));
    };

    let mut suggest = Map::new();
    suggest.insert("text".to_string(), text);
    if let Some(Value::Object(suggesters)) = body.get("suggest") {
        suggest.extend(suggesters.clone());
    }
    body.insert("suggest".to_string(), Value::Object(suggest));
    Ok(Value::Object(body))
}

/// Assembles a complete search request.
///
/// ```
/// use esquery::{Buildable, MatchQuery, RequestBodySearch, Sort};
/// use serde_json::json;
///
/// let search = RequestBodySearch::new()
///     .query(MatchQuery::new("title", "rust"))
///     .sort(Sort::new("_score"))
///     .size(5);
/// assert_eq!(
///     search.to_document().unwrap(),
///     json!({"query": {"match": {"title": "rust"}}, "sort": ["_score"], "size": 5})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestBodySearch(Builder);

buildable!(RequestBodySearch);

impl Default for RequestBodySearch {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBodySearch {
    pub fn new() -> Self {
        Self(Builder::new(&REQUEST_BODY_SEARCH))
    }

    pub fn query<Q: Query>(mut self, query: Q) -> Self {
        self.0.put("query", query.into_builder());
        self
    }

    /// Filter hits after aggregations are computed.
    pub fn post_filter<Q: Query>(mut self, filter: Q) -> Self {
        self.0.put("post_filter", filter.into_builder());
        self
    }

    pub fn aggregation<A: Aggregation>(mut self, aggregation: A) -> Self {
        self.0.push_named("aggs", aggregation.into_builder());
        self
    }

    /// Sort criteria apply in the order they are added.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.0.push("sort", sort);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.0.put("size", size);
        self
    }

    pub fn from(mut self, from: u32) -> Self {
        self.0.put("from", from);
        self
    }

    /// `_source` filtering. Accepts `false`/`true`, a field pattern, a list of
    /// patterns, or an `{"includes": .., "excludes": ..}` object.
    pub fn source(mut self, source: Value) -> Result<Self> {
        self.0.ensure_supported("source")?;
        match source {
            Value::Bool(_) | Value::String(_) | Value::Array(_) | Value::Object(_) => {
                self.0.put("_source", OptionValue::Json(source));
                Ok(self)
            }
            _ => Err(EsqueryError::InvalidArgumentType {
                param: "_source".to_string(),
                expected: "bool, string, array or object".to_string(),
            }),
        }
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.0.put("highlight", highlight);
        self
    }

    pub fn suggester(mut self, suggester: TermSuggester) -> Self {
        self.0.push_named("suggest", suggester.into_builder());
        self
    }

    /// Text shared by every suggester that does not set its own.
    pub fn suggest_text(mut self, text: impl Into<String>) -> Self {
        self.0.put("suggest_text", text.into());
        self
    }

    pub fn min_score(mut self, score: f64) -> Self {
        self.0.put("min_score", score);
        self
    }

    pub fn track_scores(mut self, enabled: bool) -> Self {
        self.0.put("track_scores", enabled);
        self
    }

    /// `true`, `false`, or an exact-count threshold.
    pub fn track_total_hits(mut self, track: impl Into<OptionValue>) -> Self {
        self.0.put("track_total_hits", track);
        self
    }

    /// A time value such as `"10s"`.
    pub fn timeout(mut self, timeout: impl Into<String>) -> Self {
        self.0.put("timeout", timeout.into());
        self
    }

    pub fn terminate_after(mut self, count: u64) -> Self {
        self.0.put("terminate_after", count);
        self
    }

    /// Sort values of the last hit of the previous page.
    pub fn search_after<V: Into<OptionValue>>(mut self, values: Vec<V>) -> Self {
        self.0.put("search_after", values);
        self
    }

    pub fn explain(mut self, enabled: bool) -> Self {
        self.0.put("explain", enabled);
        self
    }

    pub fn version(mut self, enabled: bool) -> Self {
        self.0.put("version", enabled);
        self
    }
}
