//! Query clause builders.
//!
//! Every query serializes as `{ <kind>: { ... } }`. Field-scoped queries key
//! their options by the target field (`{ "term": { "user": "kimchy" } }`).

pub mod compound;
pub mod full_text;
pub mod geo;
pub mod script;
pub mod term;

pub use compound::{BoolQuery, ConstantScoreQuery, MatchAllQuery, MatchNoneQuery};
pub use full_text::{MatchQuery, MultiMatchQuery};
pub use geo::{GeoBoundingBoxQuery, GeoDistanceQuery, GeoPolygonQuery};
pub use script::ScriptQuery;
pub use term::{
    ExistsQuery, FuzzyQuery, PrefixQuery, RangeQuery, TermQuery, TermsQuery, ValueTermQuery,
    WildcardQuery,
};

use crate::builder::{Buildable, Builder};
use crate::error::Result;
use serde_json::{Map, Value};

/// Setters shared by every query type.
pub trait Query: Buildable {
    /// Multiply the relevance score of matching documents.
    fn boost(mut self, boost: f64) -> Result<Self> {
        self.builder_mut().set_option("boost", boost)?;
        Ok(self)
    }

    /// Tag the clause so responses report whether it matched (`_name`).
    fn query_name(mut self, name: impl Into<String>) -> Result<Self> {
        self.builder_mut().ensure_supported("query_name")?;
        self.builder_mut().set_option("_name", name.into())?;
        Ok(self)
    }
}

/// `{ <field>: value }` for the builder's positional field.
pub(crate) fn field_keyed(builder: &Builder, value: Value) -> Result<Value> {
    let field = builder.require_field()?;
    let mut keyed = Map::new();
    keyed.insert(field.to_string(), value);
    Ok(Value::Object(keyed))
}

/// The bare value under `key` when it is the only entry, the whole body
/// otherwise.
pub(crate) fn collapse_single(mut body: Map<String, Value>, key: &str) -> Value {
    if body.len() == 1 && body.contains_key(key) {
        return body.shift_remove(key).unwrap_or(Value::Null);
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{buildable, Variant};
    use crate::error::EsqueryError;
    use serde_json::json;

    static UNNAMEABLE: Variant =
        Variant::keyed("UnnameableQuery", "unnameable").disabling(&["query_name"]);

    #[derive(Debug, Clone)]
    struct UnnameableQuery(Builder);

    buildable!(UnnameableQuery);

    impl Query for UnnameableQuery {}

    #[test]
    fn test_query_name_writes_underscore_name() {
        let q = MatchAllQuery::new().query_name("everything").unwrap();
        assert_eq!(q.to_document().unwrap(), json!({"match_all": {"_name": "everything"}}));
    }

    #[test]
    fn test_revoked_query_name_reports_method() {
        let err = UnnameableQuery(Builder::new(&UNNAMEABLE))
            .query_name("q")
            .unwrap_err();
        assert_eq!(
            err,
            EsqueryError::UnsupportedOption {
                method: "query_name".to_string(),
                variant: "UnnameableQuery".to_string(),
            }
        );
        assert_eq!(err.to_string(), "query_name is not supported in UnnameableQuery");
    }

    #[test]
    fn test_collapse_single() {
        let mut body = Map::new();
        body.insert("value".to_string(), json!("x"));
        assert_eq!(collapse_single(body.clone(), "value"), json!("x"));
        body.insert("boost".to_string(), json!(2.0));
        assert_eq!(collapse_single(body, "value"), json!({"value": "x", "boost": 2.0}));
    }
}
