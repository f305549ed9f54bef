//! Aggregation builders.
//!
//! Aggregations are always named and serialize as
//! `{ <name>: { <kind>: { ... }, "aggs": { ... }, "meta": { ... } } }`.
//! Sub-aggregations and metadata sit beside the kind key, not inside it.
//!
//! Some variants revoke inherited setters: a [`GlobalAggregation`] has no
//! `field`, a [`MissingAggregation`] has no `script`. Calling a revoked setter
//! returns [`crate::EsqueryError::UnsupportedOption`] and leaves the builder
//! untouched.

pub mod bucket;
pub mod metrics;
pub mod pipeline;

pub use bucket::{
    DateHistogramAggregation, FilterAggregation, FiltersAggregation, GlobalAggregation,
    HistogramAggregation, MissingAggregation, RangeAggregation, TermsAggregation,
};
pub use metrics::{CardinalityAggregation, MetricAggregation, TopHitsAggregation};
pub use pipeline::{BucketScriptAggregation, PipelineAggregation};

use crate::builder::{Buildable, Variant};
use crate::error::Result;
use crate::script::Script;
use crate::types::OptionValue;

/// Keys serialized next to the kind key.
pub(crate) const OUTER_KEYS: &[&str] = &["aggs", "meta"];

pub(crate) const fn aggregation_variant(name: &'static str, kind: &'static str) -> Variant {
    Variant::keyed(name, kind).with_outer(OUTER_KEYS)
}

/// Setters shared by every aggregation type.
pub trait Aggregation: Buildable {
    fn field(mut self, field: impl Into<String>) -> Result<Self> {
        self.builder_mut().set_option("field", field.into())?;
        Ok(self)
    }

    fn script(mut self, script: Script) -> Result<Self> {
        self.builder_mut().set_option("script", script)?;
        Ok(self)
    }

    /// Value used for documents without the field.
    fn missing(mut self, missing: impl Into<OptionValue>) -> Result<Self> {
        self.builder_mut().set_option("missing", missing)?;
        Ok(self)
    }

    fn format(mut self, format: impl Into<String>) -> Result<Self> {
        self.builder_mut().set_option("format", format.into())?;
        Ok(self)
    }

    /// Attach a metadata entry returned verbatim with the response.
    fn meta(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Result<Self> {
        self.builder_mut().insert_option_entry("meta", key, value)?;
        Ok(self)
    }

    /// Nest a sub-aggregation under `aggs`.
    fn aggregation<A: Aggregation>(mut self, aggregation: A) -> Result<Self> {
        self.builder_mut().ensure_supported("aggs")?;
        self.builder_mut().push_named("aggs", aggregation.into_builder());
        Ok(self)
    }

    fn aggregations<A: Aggregation>(self, aggregations: impl IntoIterator<Item = A>) -> Result<Self> {
        aggregations
            .into_iter()
            .try_fold(self, |parent, child| parent.aggregation(child))
    }
}
