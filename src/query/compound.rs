//! Queries that combine or wrap other queries.

use super::Query;
use crate::builder::{buildable, Builder, Variant};
use crate::error::Result;
use crate::types::OptionValue;
use serde_json::{Map, Value};

const CLAUSES: [&str; 4] = ["must", "filter", "should", "must_not"];

static BOOL: Variant = Variant::keyed("BoolQuery", "bool").shaped(shape_bool);

/// A clause list holding one query is emitted as that query alone.
fn shape_bool(_builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    for clause in CLAUSES {
        if let Some(Value::Array(items)) = body.get_mut(clause) {
            if items.len() == 1 {
                let single = items.remove(0);
                body.insert(clause.to_string(), single);
            }
        }
    }
    Ok(Value::Object(body))
}

/// Boolean combination of clauses. Clauses keep the order they were added.
#[derive(Debug, Clone)]
pub struct BoolQuery(Builder);

buildable!(BoolQuery);

impl Query for BoolQuery {}

impl Default for BoolQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BoolQuery {
    pub fn new() -> Self {
        Self(Builder::new(&BOOL))
    }

    /// Must match; contributes to the score.
    pub fn must<Q: Query>(mut self, query: Q) -> Self {
        self.0.push("must", query.into_builder());
        self
    }

    /// Must match; scoring is skipped and results are cacheable.
    pub fn filter<Q: Query>(mut self, query: Q) -> Self {
        self.0.push("filter", query.into_builder());
        self
    }

    pub fn should<Q: Query>(mut self, query: Q) -> Self {
        self.0.push("should", query.into_builder());
        self
    }

    pub fn must_not<Q: Query>(mut self, query: Q) -> Self {
        self.0.push("must_not", query.into_builder());
        self
    }

    pub fn must_all<Q: Query>(self, queries: impl IntoIterator<Item = Q>) -> Self {
        queries.into_iter().fold(self, Self::must)
    }

    pub fn filter_all<Q: Query>(self, queries: impl IntoIterator<Item = Q>) -> Self {
        queries.into_iter().fold(self, Self::filter)
    }

    pub fn should_all<Q: Query>(self, queries: impl IntoIterator<Item = Q>) -> Self {
        queries.into_iter().fold(self, Self::should)
    }

    pub fn must_not_all<Q: Query>(self, queries: impl IntoIterator<Item = Q>) -> Self {
        queries.into_iter().fold(self, Self::must_not)
    }

    pub fn minimum_should_match(mut self, minimum: impl Into<OptionValue>) -> Self {
        self.0.put("minimum_should_match", minimum);
        self
    }
}

static CONSTANT_SCORE: Variant =
    Variant::keyed("ConstantScoreQuery", "constant_score").requiring(&["filter"]);

/// Wraps a filter and gives every match the same score (`boost`).
#[derive(Debug, Clone)]
pub struct ConstantScoreQuery(Builder);

buildable!(ConstantScoreQuery);

impl Query for ConstantScoreQuery {}

impl ConstantScoreQuery {
    pub fn new<Q: Query>(filter: Q) -> Self {
        Self::empty().filter(filter)
    }

    /// No filter yet; one must be set before serializing.
    pub fn empty() -> Self {
        Self(Builder::new(&CONSTANT_SCORE))
    }

    pub fn filter<Q: Query>(mut self, filter: Q) -> Self {
        self.0.put("filter", filter.into_builder());
        self
    }
}

static MATCH_ALL: Variant = Variant::keyed("MatchAllQuery", "match_all");
static MATCH_NONE: Variant = Variant::keyed("MatchNoneQuery", "match_none").disabling(&["boost"]);

#[derive(Debug, Clone)]
pub struct MatchAllQuery(Builder);

/// Matches nothing. Scoring options do not apply, so `boost` is revoked.
#[derive(Debug, Clone)]
pub struct MatchNoneQuery(Builder);

buildable!(MatchAllQuery, MatchNoneQuery);

impl Query for MatchAllQuery {}
impl Query for MatchNoneQuery {}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self(Builder::new(&MATCH_ALL))
    }
}

impl Default for MatchNoneQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchNoneQuery {
    pub fn new() -> Self {
        Self(Builder::new(&MATCH_NONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Buildable;
    use crate::error::EsqueryError;
    use crate::query::{MatchQuery, RangeQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_match_all() {
        assert_eq!(MatchAllQuery::new().to_document().unwrap(), json!({"match_all": {}}));
        let boosted = MatchAllQuery::new().boost(1.2).unwrap();
        assert_eq!(
            boosted.to_document().unwrap(),
            json!({"match_all": {"boost": 1.2}})
        );
    }

    #[test]
    fn test_match_none_rejects_boost() {
        let err = MatchNoneQuery::new().boost(2.0).unwrap_err();
        assert_eq!(
            err,
            EsqueryError::UnsupportedOption {
                method: "boost".to_string(),
                variant: "MatchNoneQuery".to_string(),
            }
        );
        let named = MatchNoneQuery::new().query_name("nothing").unwrap();
        assert_eq!(
            named.to_document().unwrap(),
            json!({"match_none": {"_name": "nothing"}})
        );
    }

    #[test]
    fn test_bool_single_clause_collapses() {
        let q = BoolQuery::new().must(TermQuery::new("user", "kimchy"));
        assert_eq!(
            q.to_document().unwrap(),
            json!({"bool": {"must": {"term": {"user": "kimchy"}}}})
        );
    }

    #[test]
    fn test_bool_clause_order_preserved() {
        let q = BoolQuery::new()
            .filter(TermQuery::new("tag", "tech"))
            .must_not(RangeQuery::new("age").gte(10).lte(20))
            .should_all(vec![TermQuery::new("tag", "wow"), TermQuery::new("tag", "elastic")])
            .minimum_should_match(1)
            .boost(1.0)
            .unwrap();
        assert_eq!(
            q.to_document().unwrap(),
            json!({"bool": {
                "filter": {"term": {"tag": "tech"}},
                "must_not": {"range": {"age": {"gte": 10, "lte": 20}}},
                "should": [
                    {"term": {"tag": "wow"}},
                    {"term": {"tag": "elastic"}}
                ],
                "minimum_should_match": 1,
                "boost": 1.0
            }})
        );
    }

    #[test]
    fn test_bool_nested_error_propagates() {
        let q = BoolQuery::new().must(TermQuery::for_field("user"));
        assert!(matches!(
            q.to_document(),
            Err(EsqueryError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn test_constant_score() {
        let q = ConstantScoreQuery::new(MatchQuery::new("user", "kimchy"))
            .boost(1.2)
            .unwrap();
        assert_eq!(
            q.to_document().unwrap(),
            json!({"constant_score": {"filter": {"match": {"user": "kimchy"}}, "boost": 1.2}})
        );

        let err = ConstantScoreQuery::empty().to_document().unwrap_err();
        assert_eq!(err.to_string(), "filter is required for ConstantScoreQuery");
    }
}
