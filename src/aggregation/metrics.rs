use super::{aggregation_variant, Aggregation};
use crate::builder::{buildable, Builder, Variant};
use crate::error::{EsqueryError, Result};
use crate::sort::Sort;
use crate::types::OptionValue;
use serde_json::Value;

static AVG: Variant = aggregation_variant("AvgAggregation", "avg");
static SUM: Variant = aggregation_variant("SumAggregation", "sum");
static MIN: Variant = aggregation_variant("MinAggregation", "min");
static MAX: Variant = aggregation_variant("MaxAggregation", "max");
static VALUE_COUNT: Variant = aggregation_variant("ValueCountAggregation", "value_count");
static STATS: Variant = aggregation_variant("StatsAggregation", "stats");
static EXTENDED_STATS: Variant = aggregation_variant("ExtendedStatsAggregation", "extended_stats");

/// Single-field numeric metrics. The constructor picks the metric kind.
#[derive(Debug, Clone)]
pub struct MetricAggregation(Builder);

buildable!(MetricAggregation);

impl Aggregation for MetricAggregation {}

impl MetricAggregation {
    fn with_kind(variant: &'static Variant, name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(variant, name));
        agg.0.put("field", field.into());
        agg
    }

    pub fn avg(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&AVG, name, field)
    }

    pub fn sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&SUM, name, field)
    }

    pub fn min(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&MIN, name, field)
    }

    pub fn max(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&MAX, name, field)
    }

    pub fn value_count(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&VALUE_COUNT, name, field)
    }

    pub fn stats(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&STATS, name, field)
    }

    pub fn extended_stats(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_kind(&EXTENDED_STATS, name, field)
    }

    /// Standard deviations for the bounds of `extended_stats`.
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.0.put("sigma", sigma);
        self
    }
}

static CARDINALITY: Variant = aggregation_variant("CardinalityAggregation", "cardinality");

/// Approximate count of distinct values.
#[derive(Debug, Clone)]
pub struct CardinalityAggregation(Builder);

buildable!(CardinalityAggregation);

impl Aggregation for CardinalityAggregation {}

impl CardinalityAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(&CARDINALITY, name));
        agg.0.put("field", field.into());
        agg
    }

    /// Counts below this are expected to be close to exact.
    pub fn precision_threshold(mut self, threshold: u64) -> Self {
        self.0.put("precision_threshold", threshold);
        self
    }
}

static TOP_HITS: Variant =
    aggregation_variant("TopHitsAggregation", "top_hits").disabling(&["field", "script"]);

/// The most relevant documents per bucket.
#[derive(Debug, Clone)]
pub struct TopHitsAggregation(Builder);

buildable!(TopHitsAggregation);

impl Aggregation for TopHitsAggregation {}

impl TopHitsAggregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Builder::named(&TOP_HITS, name))
    }

    pub fn size(mut self, size: u32) -> Self {
        self.0.put("size", size);
        self
    }

    pub fn from(mut self, from: u32) -> Self {
        self.0.put("from", from);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.0.push("sort", sort);
        self
    }

    /// `_source` filtering: a bool, a pattern, a list of patterns, or an
    /// `includes`/`excludes` object.
    pub fn source(mut self, source: Value) -> Result<Self> {
        self.0.ensure_supported("source")?;
        if source.is_null() || source.is_number() {
            return Err(EsqueryError::InvalidArgumentType {
                param: "_source".to_string(),
                expected: "bool, string, array or object".to_string(),
            });
        }
        self.0.put("_source", OptionValue::Json(source));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Buildable;
    use serde_json::json;

    #[test]
    fn test_metric_kinds() {
        let cases = [
            (MetricAggregation::avg("m", "f"), "avg"),
            (MetricAggregation::sum("m", "f"), "sum"),
            (MetricAggregation::min("m", "f"), "min"),
            (MetricAggregation::max("m", "f"), "max"),
            (MetricAggregation::value_count("m", "f"), "value_count"),
            (MetricAggregation::stats("m", "f"), "stats"),
            (MetricAggregation::extended_stats("m", "f"), "extended_stats"),
        ];
        for (agg, kind) in cases {
            assert_eq!(agg.to_document().unwrap(), json!({"m": {kind: {"field": "f"}}}));
        }
    }

    #[test]
    fn test_extended_stats_sigma() {
        let agg = MetricAggregation::extended_stats("grades", "grade").sigma(3.0);
        assert_eq!(
            agg.to_document().unwrap(),
            json!({"grades": {"extended_stats": {"field": "grade", "sigma": 3.0}}})
        );
    }

    #[test]
    fn test_cardinality() {
        let agg = CardinalityAggregation::new("types", "type").precision_threshold(100);
        assert_eq!(
            agg.to_document().unwrap(),
            json!({"types": {"cardinality": {"field": "type", "precision_threshold": 100}}})
        );
    }

    #[test]
    fn test_top_hits() {
        let agg = TopHitsAggregation::new("top")
            .size(1)
            .sort(Sort::with_order("date", "desc").unwrap())
            .source(json!({"includes": ["title"]}))
            .unwrap();
        assert_eq!(
            agg.to_document().unwrap(),
            json!({"top": {"top_hits": {
                "size": 1,
                "sort": [{"date": "desc"}],
                "_source": {"includes": ["title"]}
            }}})
        );
        assert!(TopHitsAggregation::new("top").field("x").is_err());
        assert!(TopHitsAggregation::new("top").source(json!(3)).is_err());
    }

    #[test]
    fn test_revoked_source_reports_method() {
        let top = TopHitsAggregation(Builder::named(&TOP_HITS, "top").disable_option("source"));
        let err = top.source(json!(false)).unwrap_err();
        assert_eq!(err.to_string(), "source is not supported in TopHitsAggregation");
    }
}
