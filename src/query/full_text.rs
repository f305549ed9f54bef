//! Analyzed text queries.

use super::{collapse_single, field_keyed, Query};
use crate::builder::{buildable, Builder, Variant};
use crate::enums::{MULTI_MATCH_TYPE, OPERATOR, ZERO_TERMS_QUERY};
use crate::error::Result;
use crate::types::OptionValue;
use serde_json::{Map, Value};

static MATCH: Variant = Variant::keyed("MatchQuery", "match")
    .requiring(&["query"])
    .shaped(shape_match);

fn shape_match(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    field_keyed(builder, collapse_single(body, "query"))
}

/// Full-text match on one field. Serializes to the short
/// `{"match": {"field": "text"}}` form when no other option is set.
#[derive(Debug, Clone)]
pub struct MatchQuery(Builder);

buildable!(MatchQuery);

impl Query for MatchQuery {}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<OptionValue>) -> Self {
        let mut q = Self(Builder::new(&MATCH).with_field(field));
        q.0.put("query", query);
        q
    }

    pub fn query(mut self, query: impl Into<OptionValue>) -> Self {
        self.0.put("query", query);
        self
    }

    /// `and` or `or`, case-insensitive. Emitted lowercase.
    pub fn operator(mut self, operator: &str) -> Result<Self> {
        let operator = OPERATOR.validate(operator)?;
        self.0.put("operator", operator);
        Ok(self)
    }

    /// What to match when the analyzer removes every token: `none` or `all`.
    pub fn zero_terms_query(mut self, behavior: &str) -> Result<Self> {
        let behavior = ZERO_TERMS_QUERY.validate(behavior)?;
        self.0.put("zero_terms_query", behavior);
        Ok(self)
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<OptionValue>) -> Self {
        self.0.put("fuzziness", fuzziness);
        self
    }

    pub fn prefix_length(mut self, length: u32) -> Self {
        self.0.put("prefix_length", length);
        self
    }

    pub fn max_expansions(mut self, max: u32) -> Self {
        self.0.put("max_expansions", max);
        self
    }

    pub fn minimum_should_match(mut self, minimum: impl Into<OptionValue>) -> Self {
        self.0.put("minimum_should_match", minimum);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.0.put("analyzer", analyzer.into());
        self
    }

    pub fn lenient(mut self, lenient: bool) -> Self {
        self.0.put("lenient", lenient);
        self
    }
}

static MULTI_MATCH: Variant = Variant::keyed("MultiMatchQuery", "multi_match").requiring(&["query"]);

/// A match query run against several fields.
#[derive(Debug, Clone)]
pub struct MultiMatchQuery(Builder);

buildable!(MultiMatchQuery);

impl Query for MultiMatchQuery {}

impl MultiMatchQuery {
    pub fn new<F: Into<String>>(fields: Vec<F>, query: impl Into<OptionValue>) -> Self {
        let mut q = Self(Builder::new(&MULTI_MATCH));
        q.0.put("query", query);
        for field in fields {
            q.0.push("fields", field.into());
        }
        q
    }

    /// Add a field, optionally with a `^boost` suffix.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.0.push("fields", field.into());
        self
    }

    /// `best_fields`, `most_fields`, `cross_fields`, `phrase`,
    /// `phrase_prefix` or `bool_prefix`.
    pub fn match_type(mut self, match_type: &str) -> Result<Self> {
        let match_type = MULTI_MATCH_TYPE.validate(match_type)?;
        self.0.put("type", match_type);
        Ok(self)
    }

    pub fn operator(mut self, operator: &str) -> Result<Self> {
        let operator = OPERATOR.validate(operator)?;
        self.0.put("operator", operator);
        Ok(self)
    }

    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.0.put("tie_breaker", tie_breaker);
        self
    }

    pub fn minimum_should_match(mut self, minimum: impl Into<OptionValue>) -> Self {
        self.0.put("minimum_should_match", minimum);
        self
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<OptionValue>) -> Self {
        self.0.put("fuzziness", fuzziness);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.0.put("analyzer", analyzer.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Buildable;
    use crate::error::EsqueryError;
    use serde_json::json;

    #[test]
    fn test_match_short_form() {
        let q = MatchQuery::new("message", "this is a test");
        assert_eq!(
            q.to_document().unwrap(),
            json!({"match": {"message": "this is a test"}})
        );
    }

    #[test]
    fn test_match_long_form() {
        let q = MatchQuery::new("message", "to be or not")
            .operator("AND")
            .unwrap()
            .zero_terms_query("All")
            .unwrap()
            .fuzziness("AUTO");
        assert_eq!(
            q.to_document().unwrap(),
            json!({"match": {"message": {
                "query": "to be or not",
                "operator": "and",
                "zero_terms_query": "all",
                "fuzziness": "AUTO"
            }}})
        );
    }

    #[test]
    fn test_match_invalid_operator() {
        let err = MatchQuery::new("message", "x").operator("xor").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'operator' parameter should be one of 'and' or 'or' (got 'xor')"
        );
        assert!(matches!(err, EsqueryError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_multi_match() {
        let q = MultiMatchQuery::new(vec!["subject", "message"], "this is a test")
            .field("title^3")
            .match_type("Best_Fields")
            .unwrap()
            .tie_breaker(0.3);
        assert_eq!(
            q.to_document().unwrap(),
            json!({"multi_match": {
                "query": "this is a test",
                "fields": ["subject", "message", "title^3"],
                "type": "best_fields",
                "tie_breaker": 0.3
            }})
        );
        assert!(MultiMatchQuery::new(vec!["a"], "x").match_type("closest").is_err());
    }
}
