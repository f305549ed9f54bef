use crate::builder::{buildable, Builder, Variant};
use crate::enums::{DISTANCE_TYPE, DISTANCE_UNIT, SCRIPT_SORT_TYPE, SORT_MODE, SORT_ORDER};
use crate::error::{EsqueryError, Result};
use crate::geo::GeoPoint;
use crate::query::Query;
use crate::script::Script;
use crate::types::OptionValue;
use serde_json::{Map, Value};

static SORT: Variant = Variant::bare("Sort", "sort").shaped(shape_sort);

/// Collapse to the shortest form the API accepts: `"field"` with no
/// options, `{"field": "desc"}` with only an order, otherwise the full object.
fn shape_sort(builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    let field = builder.require_field()?.to_string();
    if let Some(Value::Object(point)) = body.shift_remove(GEO_POINT_KEY) {
        return shape_geo_distance(field, point, body);
    }
    if body.is_empty() {
        return Ok(Value::String(field));
    }

    let order_only = body.len() == 1 && body.contains_key("order");
    let value = if order_only {
        body.remove("order").unwrap_or(Value::Null)
    } else {
        Value::Object(body)
    };

    let mut sort = Map::new();
    sort.insert(field, value);
    Ok(Value::Object(sort))
}

/// The geo target is held apart from the sort options so a field called
/// `order` or `unit` cannot collide with them while building.
const GEO_POINT_KEY: &str = "geo_point";

/// `{"_geo_distance": {<field>: <point>, <options>...}}`, never collapsed.
fn shape_geo_distance(
    field: String,
    point: Map<String, Value>,
    options: Map<String, Value>,
) -> Result<Value> {
    if let Some(shadowed) = point.keys().find(|k| options.contains_key(*k)) {
        return Err(EsqueryError::InvalidArgumentType {
            param: shadowed.clone(),
            expected: "a geo field name distinct from the sort options".to_string(),
        });
    }
    let mut body = point;
    body.extend(options);

    let mut sort = Map::new();
    sort.insert(field, Value::Object(body));
    Ok(Value::Object(sort))
}

/// One sort criterion of a search request.
#[derive(Debug, Clone)]
pub struct Sort(Builder);

buildable!(Sort);

impl Sort {
    pub fn new(field: impl Into<String>) -> Self {
        Self(Builder::new(&SORT).with_field(field))
    }

    pub fn with_order(field: impl Into<String>, order: &str) -> Result<Self> {
        Self::new(field).order(order)
    }

    /// Sort on the value a script computes. `script_type` is `number` or
    /// `string`.
    pub fn script(script: Script, script_type: &str) -> Result<Self> {
        let script_type = SCRIPT_SORT_TYPE.validate(script_type)?;
        let mut sort = Self::new("_script");
        sort.0.put("type", script_type);
        sort.0.put("script", script);
        Ok(sort)
    }

    /// Sort by distance between `field` and `point`.
    pub fn geo_distance(field: impl Into<String>, point: GeoPoint) -> Self {
        let mut sort = Self::new("_geo_distance");
        sort.0.put_entry(GEO_POINT_KEY, field, point);
        sort
    }

    pub fn order(mut self, order: &str) -> Result<Self> {
        let order = SORT_ORDER.validate(order)?;
        self.0.put("order", order);
        Ok(self)
    }

    /// How multi-valued fields pick the value to sort by.
    pub fn mode(mut self, mode: &str) -> Result<Self> {
        let mode = SORT_MODE.validate(mode)?;
        self.0.put("mode", mode);
        Ok(self)
    }

    /// `_last`, `_first`, or a custom value for documents without the field.
    pub fn missing(mut self, missing: impl Into<OptionValue>) -> Self {
        self.0.put("missing", missing);
        self
    }

    pub fn unmapped_type(mut self, unmapped_type: impl Into<String>) -> Self {
        self.0.put("unmapped_type", unmapped_type.into());
        self
    }

    pub fn nested_path(mut self, path: impl Into<String>) -> Self {
        self.0.put_entry("nested", "path", path.into());
        self
    }

    pub fn nested_filter<Q: Query>(mut self, filter: Q) -> Self {
        self.0.put_entry("nested", "filter", filter.into_builder());
        self
    }

    pub fn unit(mut self, unit: &str) -> Result<Self> {
        let unit = DISTANCE_UNIT.validate(unit)?;
        self.0.put("unit", unit);
        Ok(self)
    }

    pub fn distance_type(mut self, distance_type: &str) -> Result<Self> {
        let distance_type = DISTANCE_TYPE.validate(distance_type)?;
        self.0.put("distance_type", distance_type);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Buildable;
    use crate::error::EsqueryError;
    use crate::query::TermQuery;
    use serde_json::json;

    #[test]
    fn test_bare_field() {
        assert_eq!(Sort::new("price").to_document().unwrap(), json!("price"));
    }

    #[test]
    fn test_order_only_collapses() {
        let sort = Sort::with_order("price", "DESC").unwrap();
        assert_eq!(sort.to_document().unwrap(), json!({"price": "desc"}));
    }

    #[test]
    fn test_full_form() {
        let sort = Sort::new("price")
            .order("asc")
            .unwrap()
            .mode("AVG")
            .unwrap()
            .missing("_last");
        assert_eq!(
            sort.to_document().unwrap(),
            json!({"price": {"order": "asc", "mode": "avg", "missing": "_last"}})
        );
    }

    #[test]
    fn test_nested() {
        let sort = Sort::new("offer.price")
            .nested_path("offer")
            .nested_filter(TermQuery::new("offer.color", "blue"));
        assert_eq!(
            sort.to_document().unwrap(),
            json!({
                "offer.price": {
                    "nested": {
                        "path": "offer",
                        "filter": {"term": {"offer.color": "blue"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_script_sort() {
        let sort = Sort::script(Script::from_source("doc['a'].value"), "number")
            .unwrap()
            .order("asc")
            .unwrap();
        assert_eq!(
            sort.to_document().unwrap(),
            json!({
                "_script": {
                    "type": "number",
                    "script": {"source": "doc['a'].value"},
                    "order": "asc"
                }
            })
        );
        assert!(Sort::script(Script::from_source("x"), "date").is_err());
    }

    #[test]
    fn test_geo_distance_sort() {
        let sort = Sort::geo_distance("pin.location", GeoPoint::new().array(-70.0, 40.0))
            .order("asc")
            .unwrap()
            .unit("KM")
            .unwrap()
            .distance_type("arc")
            .unwrap();
        assert_eq!(
            sort.to_document().unwrap(),
            json!({
                "_geo_distance": {
                    "pin.location": [-70.0, 40.0],
                    "order": "asc",
                    "unit": "km",
                    "distance_type": "arc"
                }
            })
        );
    }

    #[test]
    fn test_geo_distance_field_named_like_an_option() {
        let point = || GeoPoint::new().lat(1.0).lon(2.0);

        let sort = Sort::geo_distance("order", point());
        assert_eq!(
            sort.to_document().unwrap(),
            json!({"_geo_distance": {"order": {"lat": 1.0, "lon": 2.0}}})
        );

        let sort = Sort::geo_distance("unit", point()).order("desc").unwrap();
        assert_eq!(
            sort.to_document().unwrap(),
            json!({"_geo_distance": {"unit": {"lat": 1.0, "lon": 2.0}, "order": "desc"}})
        );

        let clash = Sort::geo_distance("unit", point()).unit("km").unwrap();
        let err = clash.to_document().unwrap_err();
        assert_eq!(err.code(), "invalid_argument_type");
        assert_eq!(
            err.to_string(),
            "unit must be an instance of a geo field name distinct from the sort options"
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = Sort::new("price").order("up").unwrap_err();
        assert_eq!(
            err,
            EsqueryError::InvalidEnumValue {
                param: "order".to_string(),
                value: Some("up".to_string()),
                accepted: vec!["asc".to_string(), "desc".to_string()],
            }
        );
        assert!(Sort::new("price").mode("mean").is_err());
        assert!(Sort::new("price").unit("furlong").is_err());
    }
}
