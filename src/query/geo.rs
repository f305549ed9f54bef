//! Geo queries over `geo_point` fields.

use super::Query;
use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::enums::{DISTANCE_TYPE, GEO_VALIDATION_METHOD};
use crate::error::Result;
use crate::geo::GeoPoint;
use serde_json::{Map, Value};

/// Move the entries named by `keys` into an object stored under the
/// builder's field, in place of the first of them. Everything else stays a
/// sibling.
fn nest_under_field(builder: &Builder, body: Map<String, Value>, keys: &[&str]) -> Result<Value> {
    let field = builder.require_field()?.to_string();
    let mut nested = Map::new();
    let mut shaped = Map::new();
    for (key, value) in body {
        if keys.contains(&key.as_str()) {
            if nested.is_empty() {
                shaped.insert(field.clone(), Value::Null);
            }
            nested.insert(key, value);
        } else {
            shaped.insert(key, value);
        }
    }
    shaped.insert(field, Value::Object(nested));
    Ok(Value::Object(shaped))
}

static GEO_DISTANCE: Variant = Variant::keyed("GeoDistanceQuery", "geo_distance")
    .requiring(&["distance", "point"])
    .shaped(shape_distance);

fn shape_distance(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    let field = builder.require_field()?;
    let shaped = body
        .into_iter()
        .map(|(key, value)| match key.as_str() {
            "point" => (field.to_string(), value),
            _ => (key, value),
        })
        .collect();
    Ok(Value::Object(shaped))
}

/// Documents within `distance` of a point.
#[derive(Debug, Clone)]
pub struct GeoDistanceQuery(Builder);

buildable!(GeoDistanceQuery);

impl Query for GeoDistanceQuery {}

impl GeoDistanceQuery {
    pub fn new(field: impl Into<String>, point: GeoPoint, distance: impl Into<String>) -> Self {
        Self::for_field(field).point(point).distance(distance)
    }

    pub fn for_field(field: impl Into<String>) -> Self {
        Self(Builder::new(&GEO_DISTANCE).with_field(field))
    }

    pub fn point(mut self, point: GeoPoint) -> Self {
        self.0.put("point", point);
        self
    }

    /// A distance with unit, e.g. `"200km"` or `"12mi"`.
    pub fn distance(mut self, distance: impl Into<String>) -> Self {
        self.0.put("distance", distance.into());
        self
    }

    pub fn distance_type(mut self, distance_type: &str) -> Result<Self> {
        let distance_type = DISTANCE_TYPE.validate(distance_type)?;
        self.0.put("distance_type", distance_type);
        Ok(self)
    }

    pub fn validation_method(mut self, method: &str) -> Result<Self> {
        let method = GEO_VALIDATION_METHOD.validate(method)?;
        self.0.put("validation_method", method);
        Ok(self)
    }
}

const BOX_KEYS: [&str; 7] = [
    "top_left",
    "bottom_right",
    "top",
    "left",
    "bottom",
    "right",
    "wkt",
];

static GEO_BOUNDING_BOX: Variant = Variant::keyed("GeoBoundingBoxQuery", "geo_bounding_box")
    .with_representations(&[
        RepresentationGroup::new("corners", &["top_left", "bottom_right"]),
        RepresentationGroup::new("sides", &["top", "left", "bottom", "right"]),
        RepresentationGroup::new("wkt", &["wkt"]),
    ])
    .requiring_representation()
    .shaped(shape_bounding_box);

fn shape_bounding_box(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    match builder.active_representation() {
        Some("corners") => ensure_all(builder, &body, &["top_left", "bottom_right"])?,
        Some("sides") => ensure_all(builder, &body, &["top", "left", "bottom", "right"])?,
        _ => {}
    }
    nest_under_field(builder, body, &BOX_KEYS)
}

fn ensure_all(builder: &Builder, body: &Map<String, Value>, keys: &[&str]) -> Result<()> {
    match keys.iter().find(|key| !body.contains_key(**key)) {
        Some(key) => Err(builder.missing(key)),
        None => Ok(()),
    }
}

/// Documents inside a box given by two corners, four sides, or WKT
/// `BBOX (...)` text. Choosing one form replaces the others.
#[derive(Debug, Clone)]
pub struct GeoBoundingBoxQuery(Builder);

buildable!(GeoBoundingBoxQuery);

impl Query for GeoBoundingBoxQuery {}

impl GeoBoundingBoxQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self(Builder::new(&GEO_BOUNDING_BOX).with_field(field))
    }

    pub fn corners(mut self, top_left: GeoPoint, bottom_right: GeoPoint) -> Self {
        self.0.put("top_left", top_left);
        self.0.put("bottom_right", bottom_right);
        self
    }

    pub fn sides(mut self, top: f64, left: f64, bottom: f64, right: f64) -> Self {
        self.0.put("top", top);
        self.0.put("left", left);
        self.0.put("bottom", bottom);
        self.0.put("right", right);
        self
    }

    pub fn wkt(mut self, wkt: impl Into<String>) -> Self {
        self.0.put("wkt", wkt.into());
        self
    }

    pub fn validation_method(mut self, method: &str) -> Result<Self> {
        let method = GEO_VALIDATION_METHOD.validate(method)?;
        self.0.put("validation_method", method);
        Ok(self)
    }
}

static GEO_POLYGON: Variant = Variant::keyed("GeoPolygonQuery", "geo_polygon")
    .requiring(&["points"])
    .shaped(shape_polygon);

fn shape_polygon(builder: &Builder, body: Map<String, Value>) -> Result<Value> {
    nest_under_field(builder, body, &["points"])
}

/// Documents inside a polygon of points.
#[derive(Debug, Clone)]
pub struct GeoPolygonQuery(Builder);

buildable!(GeoPolygonQuery);

impl Query for GeoPolygonQuery {}

impl GeoPolygonQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self(Builder::new(&GEO_POLYGON).with_field(field))
    }

    pub fn point(mut self, point: GeoPoint) -> Self {
        self.0.push("points", point);
        self
    }

    pub fn points(self, points: impl IntoIterator<Item = GeoPoint>) -> Self {
        points.into_iter().fold(self, Self::point)
    }

    pub fn validation_method(mut self, method: &str) -> Result<Self> {
        let method = GEO_VALIDATION_METHOD.validate(method)?;
        self.0.put("validation_method", method);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Buildable;
    use crate::warnings::RecordingSink;
    use serde_json::json;

    #[test]
    fn test_geo_distance() {
        let q = GeoDistanceQuery::new(
            "pin.location",
            GeoPoint::new().lat(40.0).lon(-70.0),
            "200km",
        )
        .distance_type("ARC")
        .unwrap();
        assert_eq!(
            q.to_document().unwrap(),
            json!({"geo_distance": {
                "pin.location": {"lat": 40.0, "lon": -70.0},
                "distance": "200km",
                "distance_type": "arc"
            }})
        );
    }

    #[test]
    fn test_geo_distance_requires_distance() {
        let q = GeoDistanceQuery::for_field("pin.location").point(GeoPoint::new().string("drm3btev3e86"));
        assert_eq!(
            q.to_document().unwrap_err().to_string(),
            "distance is required for GeoDistanceQuery"
        );
    }

    #[test]
    fn test_bounding_box_corners() {
        let q = GeoBoundingBoxQuery::new("pin.location")
            .corners(
                GeoPoint::new().lat(40.73).lon(-74.1),
                GeoPoint::new().lat(40.01).lon(-71.12),
            )
            .validation_method("ignore_malformed")
            .unwrap();
        assert_eq!(
            q.to_document().unwrap(),
            json!({"geo_bounding_box": {
                "pin.location": {
                    "top_left": {"lat": 40.73, "lon": -74.1},
                    "bottom_right": {"lat": 40.01, "lon": -71.12}
                },
                "validation_method": "ignore_malformed"
            }})
        );
    }

    #[test]
    fn test_bounding_box_switch_to_wkt() {
        let sink = RecordingSink::new();
        let q = GeoBoundingBoxQuery::new("pin.location")
            .with_warning_sink(sink.clone())
            .sides(40.73, -74.1, 40.01, -71.12)
            .wkt("BBOX (-74.1, -71.12, 40.73, 40.01)");
        assert_eq!(
            q.to_document().unwrap(),
            json!({"geo_bounding_box": {
                "pin.location": {"wkt": "BBOX (-74.1, -71.12, 40.73, 40.01)"}
            }})
        );
        assert_eq!(sink.messages().len(), 2);
    }

    #[test]
    fn test_bounding_box_requires_a_form() {
        let err = GeoBoundingBoxQuery::new("pin.location").to_document().unwrap_err();
        assert_eq!(
            err.to_string(),
            "corners or sides or wkt is required for GeoBoundingBoxQuery"
        );
    }

    #[test]
    fn test_polygon() {
        let q = GeoPolygonQuery::new("person.location").points(vec![
            GeoPoint::new().lat(40.0).lon(-70.0),
            GeoPoint::new().array(-80.0, 30.0),
            GeoPoint::new().string("20, -90"),
        ]);
        assert_eq!(
            q.to_document().unwrap(),
            json!({"geo_polygon": {"person.location": {"points": [
                {"lat": 40.0, "lon": -70.0},
                [-80.0, 30.0],
                "20, -90"
            ]}}})
        );
        assert!(GeoPolygonQuery::new("person.location").to_document().is_err());
    }
}
