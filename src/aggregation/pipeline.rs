//! Aggregations computed from the output of other aggregations.

use super::{aggregation_variant, Aggregation};
use crate::builder::{buildable, Builder, Variant};
use crate::enums::GAP_POLICY;
use crate::error::Result;
use crate::script::Script;

static BUCKET_SCRIPT: Variant = aggregation_variant("BucketScriptAggregation", "bucket_script")
    .disabling(&["field"])
    .requiring(&["buckets_path", "script"]);

/// Per-bucket script over named metric paths of the parent aggregation.
#[derive(Debug, Clone)]
pub struct BucketScriptAggregation(Builder);

buildable!(BucketScriptAggregation);

impl Aggregation for BucketScriptAggregation {}

impl BucketScriptAggregation {
    pub fn new(name: impl Into<String>, script: Script) -> Self {
        let mut agg = Self(Builder::named(&BUCKET_SCRIPT, name));
        agg.0.put("script", script);
        agg
    }

    /// Bind `variable` in the script to the metric at `path`.
    pub fn buckets_path(mut self, variable: impl Into<String>, path: impl Into<String>) -> Self {
        self.0.put_entry("buckets_path", variable, path.into());
        self
    }

    pub fn gap_policy(mut self, policy: &str) -> Result<Self> {
        let policy = GAP_POLICY.validate(policy)?;
        self.0.put("gap_policy", policy);
        Ok(self)
    }
}

const fn sibling_pipeline(name: &'static str, kind: &'static str) -> Variant {
    aggregation_variant(name, kind)
        .disabling(&["field", "script"])
        .requiring(&["buckets_path"])
}

static AVG_BUCKET: Variant = sibling_pipeline("AvgBucketAggregation", "avg_bucket");
static MAX_BUCKET: Variant = sibling_pipeline("MaxBucketAggregation", "max_bucket");
static MIN_BUCKET: Variant = sibling_pipeline("MinBucketAggregation", "min_bucket");
static SUM_BUCKET: Variant = sibling_pipeline("SumBucketAggregation", "sum_bucket");
static DERIVATIVE: Variant = sibling_pipeline("DerivativeAggregation", "derivative");
static CUMULATIVE_SUM: Variant = sibling_pipeline("CumulativeSumAggregation", "cumulative_sum");

/// Pipelines reading a single `buckets_path`.
#[derive(Debug, Clone)]
pub struct PipelineAggregation(Builder);

buildable!(PipelineAggregation);

impl Aggregation for PipelineAggregation {}

impl PipelineAggregation {
    fn with_kind(variant: &'static Variant, name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(variant, name));
        agg.0.put("buckets_path", path.into());
        agg
    }

    pub fn avg_bucket(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&AVG_BUCKET, name, path)
    }

    pub fn max_bucket(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&MAX_BUCKET, name, path)
    }

    pub fn min_bucket(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&MIN_BUCKET, name, path)
    }

    pub fn sum_bucket(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&SUM_BUCKET, name, path)
    }

    pub fn derivative(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&DERIVATIVE, name, path)
    }

    pub fn cumulative_sum(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(&CUMULATIVE_SUM, name, path)
    }

    pub fn gap_policy(mut self, policy: &str) -> Result<Self> {
        let policy = GAP_POLICY.validate(policy)?;
        self.0.put("gap_policy", policy);
        Ok(self)
    }
}
