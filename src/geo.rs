use crate::builder::{buildable, Builder, RepresentationGroup, Variant};
use crate::error::{EsqueryError, Result};
use serde_json::{Map, Value};

static GEO_POINT: Variant = Variant::bare("GeoPoint", "geo_point")
    .with_representations(&[
        RepresentationGroup::new("object", &["lat", "lon"]),
        RepresentationGroup::new("array", &["array"]),
        RepresentationGroup::new("string", &["string"]),
    ])
    .requiring_representation()
    .shaped(shape_point);

fn shape_point(builder: &Builder, mut body: Map<String, Value>) -> Result<Value> {
    match builder.active_representation() {
        Some("array") => Ok(body.remove("array").unwrap_or(Value::Null)),
        Some("string") => Ok(body.remove("string").unwrap_or(Value::Null)),
        _ => {
            for coordinate in ["lat", "lon"] {
                if !body.contains_key(coordinate) {
                    return Err(builder.missing(coordinate));
                }
            }
            Ok(Value::Object(body))
        }
    }
}

/// A geographic point in one of its accepted shapes: `{lat, lon}`,
/// `[lon, lat]` or `"lat,lon"` (also a geohash).
///
/// Only the most recently chosen shape is emitted. Switching shapes is
/// reported through the warning sink.
#[derive(Debug, Clone)]
pub struct GeoPoint(Builder);

buildable!(GeoPoint);

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoPoint {
    pub fn new() -> Self {
        Self(Builder::new(&GEO_POINT))
    }

    pub fn lat(mut self, lat: f64) -> Self {
        self.0.put("lat", lat);
        self
    }

    pub fn lon(mut self, lon: f64) -> Self {
        self.0.put("lon", lon);
        self
    }

    /// Set the point from a JSON object carrying numeric `lat` and `lon`.
    pub fn object(mut self, point: Value) -> Result<Self> {
        let coordinates = point
            .as_object()
            .and_then(|obj| Some((obj.get("lat")?.as_f64()?, obj.get("lon")?.as_f64()?)));
        let Some((lat, lon)) = coordinates else {
            return Err(EsqueryError::InvalidArgumentType {
                param: "point".to_string(),
                expected: "Object".to_string(),
            });
        };
        self.0.put("lat", lat);
        self.0.put("lon", lon);
        Ok(self)
    }

    /// GeoJSON order: longitude first.
    pub fn array(mut self, lon: f64, lat: f64) -> Self {
        self.0.put("array", vec![lon, lat]);
        self
    }

    /// `"lat,lon"` text or a geohash.
    pub fn string(mut self, point: impl Into<String>) -> Self {
        self.0.put("string", point.into());
        self
    }
}
