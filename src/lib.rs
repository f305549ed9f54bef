//! # esquery
//!
//! Fluent builders for search engine request documents: queries,
//! aggregations, sorts, scripts, highlighting, suggesters and search
//! templates.
//!
//! Every builder is an option bag over a shared [`Builder`] core. Setters
//! validate enumerated values case-insensitively, revoked setters fail with
//! [`EsqueryError::UnsupportedOption`], and mutually exclusive forms of one
//! concept (a geo point as object, array or string) replace each other with a
//! warning. Serialization walks nested builders and produces plain
//! [`serde_json::Value`] documents.
//!
//! ## Quick start
//!
//! ```rust
//! use esquery::{
//!     Aggregation, BoolQuery, Buildable, MatchQuery, MetricAggregation, Query,
//!     RequestBodySearch, TermsAggregation, TermQuery,
//! };
//! use serde_json::json;
//!
//! # fn main() -> esquery::Result<()> {
//! let search = RequestBodySearch::new()
//!     .query(
//!         BoolQuery::new()
//!             .must(MatchQuery::new("title", "rust"))
//!             .filter(TermQuery::new("status", "published").boost(2.0)?),
//!     )
//!     .aggregation(
//!         TermsAggregation::new("by_tag", "tags")
//!             .aggregation(MetricAggregation::avg("avg_score", "score"))?,
//!     );
//!
//! assert_eq!(
//!     search.to_document()?,
//!     json!({
//!         "query": {"bool": {
//!             "must": {"match": {"title": "rust"}},
//!             "filter": {"term": {"status": {"value": "published", "boost": 2.0}}}
//!         }},
//!         "aggs": {"by_tag": {
//!             "terms": {"field": "tags"},
//!             "aggs": {"avg_score": {"avg": {"field": "score"}}}
//!         }}
//!     })
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Warnings
//!
//! Representation switches are reported through a [`WarningSink`]. The
//! default sink logs through `tracing`; set `ESQUERY_WARNINGS=silent` to drop
//! them, or attach a [`RecordingSink`] to a builder with
//! [`Buildable::with_warning_sink`].

pub mod aggregation;
pub mod builder;
pub mod config;
pub mod enums;
pub mod error;
pub mod geo;
pub mod highlight;
pub mod query;
pub mod request;
pub mod script;
pub mod sort;
pub mod suggest;
pub mod template;
pub mod types;
pub mod warnings;

pub use aggregation::{
    Aggregation, BucketScriptAggregation, CardinalityAggregation, DateHistogramAggregation,
    FilterAggregation, FiltersAggregation, GlobalAggregation, HistogramAggregation,
    MetricAggregation, MissingAggregation, PipelineAggregation, RangeAggregation,
    TermsAggregation, TopHitsAggregation,
};
pub use builder::{Buildable, Builder, Envelope, RepresentationGroup, Variant};
pub use config::{Config, WarningMode};
pub use enums::{validate_enum, EnumSet};
pub use error::{EsqueryError, Result};
pub use geo::GeoPoint;
pub use highlight::{Highlight, HighlightField, HighlightOptions};
pub use query::{
    BoolQuery, ConstantScoreQuery, ExistsQuery, FuzzyQuery, GeoBoundingBoxQuery,
    GeoDistanceQuery, GeoPolygonQuery, MatchAllQuery, MatchNoneQuery, MatchQuery,
    MultiMatchQuery, PrefixQuery, Query, RangeQuery, ScriptQuery, TermQuery, TermsQuery,
    ValueTermQuery, WildcardQuery,
};
pub use request::RequestBodySearch;
pub use script::Script;
pub use sort::Sort;
pub use suggest::TermSuggester;
pub use template::SearchTemplate;
pub use types::OptionValue;
pub use warnings::{
    default_sink, RecordingSink, SilentSink, TracingSink, WarningSink,
    MIXED_REPRESENTATION_WARNING, OVERWRITE_WARNING,
};

/// Read configuration from `ESQUERY_*` environment variables and install the
/// matching default warning sink.
///
/// Optional: the default is resolved lazily from the same variables. Calling
/// this at startup surfaces a malformed value as an error instead of a
/// logged fallback.
pub fn init_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    if !warnings::install_default_sink(config.default_sink()) {
        tracing::debug!("[CONFIG] default warning sink already resolved, keeping it");
    }
    Ok(config)
}
