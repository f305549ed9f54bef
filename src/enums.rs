//! Case-insensitive validation of enumerated option values.
//!
//! Accepted sets are declared in canonical lowercase. Candidates are folded
//! with ASCII case rules only, so `"ASC"`, `"Asc"` and `"asc"` all normalize
//! to `"asc"`.

use crate::error::{EsqueryError, Result};

/// Validate `candidate` against `accepted` and return the canonical value.
///
/// A missing candidate never matches, even when the empty string is an
/// accepted member.
pub fn validate_enum(param: &str, candidate: Option<&str>, accepted: &[&str]) -> Result<String> {
    debug_assert!(
        accepted.iter().all(|v| v.chars().all(|c| !c.is_ascii_uppercase())),
        "accepted values for '{}' must be lowercase",
        param
    );

    let found = candidate.and_then(|value| {
        accepted
            .iter()
            .find(|canonical| canonical.eq_ignore_ascii_case(value))
    });

    match found {
        Some(canonical) => Ok(canonical.to_string()),
        None => {
            tracing::trace!(param, ?candidate, "[ENUM] rejected value");
            Err(EsqueryError::InvalidEnumValue {
                param: param.to_string(),
                value: candidate.map(str::to_string),
                accepted: accepted.iter().map(|v| v.to_string()).collect(),
            })
        }
    }
}

/// A named, fixed set of accepted values for one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSet {
    param: &'static str,
    values: &'static [&'static str],
}

impl EnumSet {
    pub const fn new(param: &'static str, values: &'static [&'static str]) -> Self {
        Self { param, values }
    }

    pub fn param(&self) -> &'static str {
        self.param
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    pub fn validate(&self, candidate: &str) -> Result<String> {
        validate_enum(self.param, Some(candidate), self.values)
    }

    pub fn validate_opt(&self, candidate: Option<&str>) -> Result<String> {
        validate_enum(self.param, candidate, self.values)
    }

    /// Same matching rules, but a miss is reported as a bad constructor
    /// argument rather than a bad option value.
    pub fn validate_constructor(&self, candidate: &str) -> Result<String> {
        self.validate(candidate)
            .map_err(|_| EsqueryError::InvalidConstructorArgument {
                param: self.param.to_string(),
                value: candidate.to_string(),
                accepted: self.values.iter().map(|v| v.to_string()).collect(),
            })
    }
}

pub const SORT_ORDER: EnumSet = EnumSet::new("order", &["asc", "desc"]);
pub const SORT_MODE: EnumSet = EnumSet::new("mode", &["min", "max", "sum", "avg", "median"]);
pub const SCRIPT_SORT_TYPE: EnumSet = EnumSet::new("type", &["number", "string"]);
pub const DISTANCE_UNIT: EnumSet = EnumSet::new(
    "unit",
    &["in", "yd", "ft", "km", "m", "cm", "mm", "mi", "nmi"],
);
pub const DISTANCE_TYPE: EnumSet = EnumSet::new("distance_type", &["arc", "plane"]);
pub const GEO_VALIDATION_METHOD: EnumSet =
    EnumSet::new("validation_method", &["strict", "ignore_malformed", "coerce"]);
pub const OPERATOR: EnumSet = EnumSet::new("operator", &["and", "or"]);
pub const ZERO_TERMS_QUERY: EnumSet = EnumSet::new("zero_terms_query", &["all", "none"]);
pub const MULTI_MATCH_TYPE: EnumSet = EnumSet::new(
    "type",
    &[
        "best_fields",
        "most_fields",
        "cross_fields",
        "phrase",
        "phrase_prefix",
        "bool_prefix",
    ],
);
pub const RANGE_RELATION: EnumSet =
    EnumSet::new("relation", &["within", "contains", "intersects"]);
pub const REWRITE: EnumSet = EnumSet::new(
    "rewrite",
    &[
        "constant_score",
        "constant_score_boolean",
        "scoring_boolean",
        "top_terms_blended_freqs_n",
        "top_terms_boost_n",
        "top_terms_n",
    ],
);
pub const EXECUTION_HINT: EnumSet = EnumSet::new(
    "execution_hint",
    &[
        "map",
        "global_ordinals",
        "global_ordinals_hash",
        "global_ordinals_low_cardinality",
    ],
);
pub const COLLECT_MODE: EnumSet = EnumSet::new("collect_mode", &["depth_first", "breadth_first"]);
pub const GAP_POLICY: EnumSet = EnumSet::new("gap_policy", &["skip", "insert_zeros"]);
pub const SCRIPT_TYPE: EnumSet =
    EnumSet::new("type", &["inline", "source", "stored", "id", "file"]);
pub const TEMPLATE_TYPE: EnumSet = EnumSet::new("type", &["inline", "source", "file", "id"]);
pub const HIGHLIGHT_TYPE: EnumSet =
    EnumSet::new("type", &["plain", "postings", "fvh", "unified"]);
pub const HIGHLIGHT_ENCODER: EnumSet = EnumSet::new("encoder", &["default", "html"]);
pub const HIGHLIGHT_FRAGMENTER: EnumSet = EnumSet::new("fragmenter", &["simple", "span"]);
pub const HIGHLIGHT_ORDER: EnumSet = EnumSet::new("order", &["score"]);
pub const HIGHLIGHT_TAGS_SCHEMA: EnumSet = EnumSet::new("tags_schema", &["styled"]);
pub const BOUNDARY_SCANNER: EnumSet =
    EnumSet::new("boundary_scanner", &["chars", "sentence", "word"]);
pub const SUGGEST_SORT: EnumSet = EnumSet::new("sort", &["score", "frequency"]);
pub const SUGGEST_MODE: EnumSet = EnumSet::new("suggest_mode", &["missing", "popular", "always"]);
pub const STRING_DISTANCE: EnumSet = EnumSet::new(
    "string_distance",
    &[
        "internal",
        "damerau_levenshtein",
        "levenshtein",
        "jaro_winkler",
        "ngram",
    ],
);
pub const WARNING_MODE: EnumSet = EnumSet::new("ESQUERY_WARNINGS", &["log", "silent"]);
