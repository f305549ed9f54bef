//! Term-level queries: exact values, prefixes, patterns, ranges.

use super::{collapse_single, field_keyed, Query};
use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::enums::{RANGE_RELATION, REWRITE};
use crate::error::Result;
use crate::types::OptionValue;
use serde_json::{Map, Value};

static TERM: Variant = value_term("TermQuery", "term");
static PREFIX: Variant = value_term("PrefixQuery", "prefix");
static WILDCARD: Variant = value_term("WildcardQuery", "wildcard");
static FUZZY: Variant = value_term("FuzzyQuery", "fuzzy");

const fn value_term(name: &'static str, kind: &'static str) -> Variant {
    Variant::keyed(name, kind)
        .requiring(&["value"])
        .shaped(shape_value_term)
}

fn shape_value_term(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    field_keyed(builder, collapse_single(body, "value"))
}

/// Setters shared by the single-value term-level queries.
pub trait ValueTermQuery: Query {
    fn value(mut self, value: impl Into<OptionValue>) -> Self {
        self.builder_mut().put("value", value);
        self
    }

    fn case_insensitive(mut self, enabled: bool) -> Self {
        self.builder_mut().put("case_insensitive", enabled);
        self
    }
}

/// Exact match on a single term.
#[derive(Debug, Clone)]
pub struct TermQuery(Builder);

/// Terms starting with the given prefix.
#[derive(Debug, Clone)]
pub struct PrefixQuery(Builder);

/// Terms matching a `*`/`?` pattern.
#[derive(Debug, Clone)]
pub struct WildcardQuery(Builder);

/// Terms within an edit distance of the value.
#[derive(Debug, Clone)]
pub struct FuzzyQuery(Builder);

buildable!(TermQuery, PrefixQuery, WildcardQuery, FuzzyQuery);

impl Query for TermQuery {}
impl Query for PrefixQuery {}
impl Query for WildcardQuery {}
impl Query for FuzzyQuery {}
impl ValueTermQuery for TermQuery {}
impl ValueTermQuery for PrefixQuery {}
impl ValueTermQuery for WildcardQuery {}
impl ValueTermQuery for FuzzyQuery {}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self::for_field(field).value(value)
    }

    /// A term query with no value yet; serializing it before
    /// [`ValueTermQuery::value`] is called fails.
    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&TERM).with_field(field))
    }
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self::for_field(field).value(value)
    }

    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&PREFIX).with_field(field))
    }

    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        let method = REWRITE.validate(method)?;
        self.0.put("rewrite", method);
        Ok(self)
    }
}

impl WildcardQuery {
    pub fn new(field: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self::for_field(field).value(value)
    }

    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&WILDCARD).with_field(field))
    }

    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        let method = REWRITE.validate(method)?;
        self.0.put("rewrite", method);
        Ok(self)
    }
}

impl FuzzyQuery {
    pub fn new(field: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self::for_field(field).value(value)
    }

    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&FUZZY).with_field(field))
    }

    /// An edit distance (`0`, `1`, `2`) or `"AUTO"`.
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

    pub fn transpositions(mut self, enabled: bool) -> Self {
        self.0.put("transpositions", enabled);
        self
    }

    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        let method = REWRITE.validate(method)?;
        self.0.put("rewrite", method);
        Ok(self)
    }
}

static TERMS: Variant = Variant::keyed("TermsQuery", "terms")
    .with_representations(&[
        RepresentationGroup::new("values", &["values"]),
        RepresentationGroup::new("lookup", &["index", "id", "path", "routing"]),
    ])
    .requiring_representation()
    .shaped(shape_terms);

const LOOKUP_KEYS: [&str; 4] = ["index", "id", "path", "routing"];

/// Terms go under the field; other options such as `boost` stay beside it.
fn shape_terms(builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    let field = builder.require_field()?.to_string();
    let terms = match body.shift_remove("values") {
        Some(values) => values,
        None => {
            let mut lookup = Map::new();
            for key in LOOKUP_KEYS {
                if let Some(v) = body.shift_remove(key) {
                    lookup.insert(key.to_string(), v);
                }
            }
            Value::Object(lookup)
        }
    };

    let mut shaped = Map::new();
    shaped.insert(field, terms);
    shaped.extend(body);
    Ok(Value::Object(shaped))
}

/// Match any of several exact terms, given inline or looked up from
/// another document.
#[derive(Debug, Clone)]
pub struct TermsQuery(Builder);

buildable!(TermsQuery);

impl Query for TermsQuery {}

impl TermsQuery {
    pub fn new<V: Into<OptionValue>>(field: impl Into<String>, values: Vec<V>) -> Self {
        Self::for_field(field).values(values)
    }

    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&TERMS).with_field(field))
    }

    pub fn value(mut self, value: impl Into<OptionValue>) -> Self {
        self.0.push("values", value);
        self
    }

    pub fn values<V: Into<OptionValue>>(mut self, values: Vec<V>) -> Self {
        for value in values {
            self.0.push("values", value);
        }
        self
    }

    /// Index holding the lookup document.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.0.put("index", index.into());
        self
    }

    /// Id of the lookup document.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.0.put("id", id.into());
        self
    }

    /// Field of the lookup document holding the terms.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.0.put("path", path.into());
        self
    }

    pub fn routing(mut self, routing: impl Into<String>) -> Self {
        self.0.put("routing", routing.into());
        self
    }
}

static EXISTS: Variant = Variant::keyed("ExistsQuery", "exists").requiring(&["field"]);

/// Documents with any indexed value for a field.
#[derive(Debug, Clone)]
pub struct ExistsQuery(Builder);

buildable!(ExistsQuery);

impl Query for ExistsQuery {}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        let mut query = Self(Builder::new(&EXISTS));
        query.0.put("field", field.into());
        query
    }
}

static RANGE: Variant = Variant::keyed("RangeQuery", "range").shaped(shape_range);

fn shape_range(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    field_keyed(builder, Value::Object(body))
}

/// Values between bounds. Bounds accept numbers, strings, date math, and
/// `chrono` dates.
#[derive(Debug, Clone)]
pub struct RangeQuery(Builder);

buildable!(RangeQuery);

impl Query for RangeQuery {}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self(Builder::new(&RANGE).with_field(field))
    }

    pub fn gt(mut self, bound: impl Into<OptionValue>) -> Self {
        self.0.put("gt", bound);
        self
    }

    pub fn gte(mut self, bound: impl Into<OptionValue>) -> Self {
        self.0.put("gte", bound);
        self
    }

    pub fn lt(mut self, bound: impl Into<OptionValue>) -> Self {
        self.0.put("lt", bound);
        self
    }

    pub fn lte(mut self, bound: impl Into<OptionValue>) -> Self {
        self.0.put("lte", bound);
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.0.put("format", format.into());
        self
    }

    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.0.put("time_zone", zone.into());
        self
    }

    /// How ranges on range fields match: `within`, `contains`, `intersects`.
    pub fn relation(mut self, relation: &str) -> Result<Self> {
        let relation = RANGE_RELATION.validate(relation)?;
        self.0.put("relation", relation);
        Ok(self)
    }
}
