use super::{aggregation_variant, Aggregation};
use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::enums::{COLLECT_MODE, EXECUTION_HINT, SORT_ORDER};
use crate::error::Result;
use crate::query::Query;
use crate::types::OptionValue;
use indexmap::IndexMap;
use serde_json::{Map, Value};

static TERMS: Variant = aggregation_variant("TermsAggregation", "terms").shaped(shape_terms);

/// A lone `order` criterion is emitted as an object, tie-breakers as an array.
fn shape_terms(_builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    if let Some(Value::Array(criteria)) = body.get_mut("order") {
        if criteria.len() == 1 {
            let single = criteria.remove(0);
            body.insert("order".to_string(), single);
        }
    }
    Ok(Value::Object(body))
}

/// One bucket per distinct value.
#[derive(Debug, Clone)]
pub struct TermsAggregation(Builder);

buildable!(TermsAggregation);

impl Aggregation for TermsAggregation {}

impl TermsAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(&TERMS, name));
        agg.0.put("field", field.into());
        agg
    }

    pub fn size(mut self, size: u32) -> Self {
        self.0.put("size", size);
        self
    }

    pub fn shard_size(mut self, size: u32) -> Self {
        self.0.put("shard_size", size);
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.0.put("min_doc_count", count);
        self
    }

    /// Order buckets by `key` (`_count`, `_key`, or a sub-aggregation path).
    /// Repeated calls add tie-breakers in call order and switch the output to
    /// an array.
    pub fn order(mut self, key: impl Into<String>, direction: &str) -> Result<Self> {
        let direction = SORT_ORDER.validate(direction)?;
        let mut entry = IndexMap::new();
        entry.insert(key.into(), OptionValue::from(direction));
        self.0.push("order", entry);
        Ok(self)
    }

    /// A regex string, a list of exact values, or a partition object.
    pub fn include(mut self, include: impl Into<OptionValue>) -> Self {
        self.0.put("include", include);
        self
    }

    pub fn exclude(mut self, exclude: impl Into<OptionValue>) -> Self {
        self.0.put("exclude", exclude);
        self
    }

    pub fn execution_hint(mut self, hint: &str) -> Result<Self> {
        let hint = EXECUTION_HINT.validate(hint)?;
        self.0.put("execution_hint", hint);
        Ok(self)
    }

    pub fn collect_mode(mut self, mode: &str) -> Result<Self> {
        let mode = COLLECT_MODE.validate(mode)?;
        self.0.put("collect_mode", mode);
        Ok(self)
    }
}

static HISTOGRAM: Variant =
    aggregation_variant("HistogramAggregation", "histogram").requiring(&["interval"]);

/// Fixed-width numeric buckets.
#[derive(Debug, Clone)]
pub struct HistogramAggregation(Builder);

buildable!(HistogramAggregation);

impl Aggregation for HistogramAggregation {}

impl HistogramAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>, interval: f64) -> Self {
        let mut agg = Self(Builder::named(&HISTOGRAM, name));
        agg.0.put("field", field.into());
        agg.0.put("interval", interval);
        agg
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.0.put("min_doc_count", count);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.0.put("offset", offset);
        self
    }

    /// Emit empty buckets across `[min, max]` even without matching data.
    pub fn extended_bounds(mut self, min: f64, max: f64) -> Self {
        self.0.put_entry("extended_bounds", "min", min);
        self.0.put_entry("extended_bounds", "max", max);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.0.put("keyed", keyed);
        self
    }
}

static DATE_HISTOGRAM: Variant = aggregation_variant("DateHistogramAggregation", "date_histogram")
    .with_representations(&[
        RepresentationGroup::new("calendar_interval", &["calendar_interval"]),
        RepresentationGroup::new("fixed_interval", &["fixed_interval"]),
        RepresentationGroup::new("interval", &["interval"]),
    ])
    .requiring_representation();

/// Date buckets. Exactly one interval flavor is emitted: the last one set.
#[derive(Debug, Clone)]
pub struct DateHistogramAggregation(Builder);

buildable!(DateHistogramAggregation);

impl Aggregation for DateHistogramAggregation {}

impl DateHistogramAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(&DATE_HISTOGRAM, name));
        agg.0.put("field", field.into());
        agg
    }

    /// Calendar-aware unit such as `1M`, `week` or `quarter`.
    pub fn calendar_interval(mut self, interval: impl Into<String>) -> Self {
        self.0.put("calendar_interval", interval.into());
        self
    }

    /// Fixed SI duration such as `90m` or `30d`.
    pub fn fixed_interval(mut self, interval: impl Into<String>) -> Self {
        self.0.put("fixed_interval", interval.into());
        self
    }

    /// Legacy interval accepted by older clusters.
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.0.put("interval", interval.into());
        self
    }

    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.0.put("time_zone", zone.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.0.put("offset", offset.into());
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.0.put("min_doc_count", count);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.0.put("keyed", keyed);
        self
    }
}

static RANGE: Variant = aggregation_variant("RangeAggregation", "range").requiring(&["ranges"]);

/// Buckets for caller-defined `[from, to)` ranges.
#[derive(Debug, Clone)]
pub struct RangeAggregation(Builder);

buildable!(RangeAggregation);

impl Aggregation for RangeAggregation {}

impl RangeAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(&RANGE, name));
        agg.0.put("field", field.into());
        agg
    }

    /// Add a range. An open end is left out of the bucket definition.
    pub fn range(self, from: Option<f64>, to: Option<f64>) -> Self {
        self.push_range(None, from, to)
    }

    pub fn keyed_range(self, key: impl Into<String>, from: Option<f64>, to: Option<f64>) -> Self {
        self.push_range(Some(key.into()), from, to)
    }

    fn push_range(mut self, key: Option<String>, from: Option<f64>, to: Option<f64>) -> Self {
        let mut range: IndexMap<String, OptionValue> = IndexMap::new();
        if let Some(key) = key {
            range.insert("key".to_string(), key.into());
        }
        if let Some(from) = from {
            range.insert("from".to_string(), from.into());
        }
        if let Some(to) = to {
            range.insert("to".to_string(), to.into());
        }
        self.0.push("ranges", range);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.0.put("keyed", keyed);
        self
    }
}

static GLOBAL: Variant =
    aggregation_variant("GlobalAggregation", "global").disabling(&["field", "script"]);

/// A single bucket over every document, ignoring the search query.
#[derive(Debug, Clone)]
pub struct GlobalAggregation(Builder);

buildable!(GlobalAggregation);

impl Aggregation for GlobalAggregation {}

impl GlobalAggregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Builder::named(&GLOBAL, name))
    }
}

static MISSING: Variant =
    aggregation_variant("MissingAggregation", "missing").disabling(&["script"]);

/// A bucket of documents lacking a value for the field.
#[derive(Debug, Clone)]
pub struct MissingAggregation(Builder);

buildable!(MissingAggregation);

impl Aggregation for MissingAggregation {}

impl MissingAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        let mut agg = Self(Builder::named(&MISSING, name));
        agg.0.put("field", field.into());
        agg
    }
}

static FILTER: Variant = aggregation_variant("FilterAggregation", "filter")
    .disabling(&["field", "script", "missing", "format"])
    .requiring(&["filter"])
    .shaped(shape_filter);

fn shape_filter(builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    body.shift_remove("filter")
        .ok_or_else(|| builder.missing("filter"))
}

/// A single bucket of documents matching a query. The kind key holds the
/// query itself.
#[derive(Debug, Clone)]
pub struct FilterAggregation(Builder);

buildable!(FilterAggregation);

impl Aggregation for FilterAggregation {}

impl FilterAggregation {
    pub fn new<Q: Query>(name: impl Into<String>, filter: Q) -> Self {
        let mut agg = Self(Builder::named(&FILTER, name));
        agg.0.put("filter", filter.into_builder());
        agg
    }

    pub fn filter<Q: Query>(mut self, filter: Q) -> Self {
        self.0.put("filter", filter.into_builder());
        self
    }
}

static FILTERS: Variant = aggregation_variant("FiltersAggregation", "filters")
    .disabling(&["field", "script"])
    .with_representations(&[
        RepresentationGroup::new("named", &["named_filters"]),
        RepresentationGroup::new("anonymous", &["anonymous_filters"]),
    ])
    .requiring_representation()
    .shaped(shape_filters);

/// Both filter flavors are emitted under the single `filters` key.
fn shape_filters(_builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    let shaped = body
        .into_iter()
        .map(|(key, value)| match key.as_str() {
            "named_filters" | "anonymous_filters" => ("filters".to_string(), value),
            _ => (key, value),
        })
        .collect();
    Ok(Value::Object(shaped))
}

/// One bucket per filter. Filters are either keyed by bucket name or an
/// anonymous list; switching flavor drops the filters added so far.
#[derive(Debug, Clone)]
pub struct FiltersAggregation(Builder);

buildable!(FiltersAggregation);

impl Aggregation for FiltersAggregation {}

impl FiltersAggregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Builder::named(&FILTERS, name))
    }

    pub fn named_filter<Q: Query>(mut self, bucket: impl Into<String>, filter: Q) -> Self {
        self.0.put_entry("named_filters", bucket, filter.into_builder());
        self
    }

    pub fn anonymous_filter<Q: Query>(mut self, filter: Q) -> Self {
        self.0.push("anonymous_filters", filter.into_builder());
        self
    }

    /// Add a bucket for documents matching none of the filters.
    pub fn other_bucket(mut self, enabled: bool) -> Self {
        self.0.put("other_bucket", enabled);
        self
    }

    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.0.put("other_bucket_key", key.into());
        self
    }
}
