use crate::builder::Builder;
use indexmap::IndexMap;
use serde_json::Value;

/// A value stored under one option key of a [`Builder`].
///
/// Plain JSON data passes through serialization untouched; nested builders
/// are expanded into their own documents.
#[derive(Debug, Clone)]
pub enum OptionValue {
    /// Any JSON-compatible value (string, number, bool, null, array, object).
    Json(Value),
    /// A single nested builder, serialized to its full document.
    Builder(Box<Builder>),
    /// An ordered list whose elements may mix plain values and builders.
    List(Vec<OptionValue>),
    /// An object whose entries may hold builders.
    Map(IndexMap<String, OptionValue>),
    /// Named builders whose `{name: ...}` documents merge into one object,
    /// as sub-aggregations and suggesters do.
    Named(Vec<Builder>),
}

impl OptionValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            OptionValue::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_builder(&self) -> Option<&Builder> {
        match self {
            OptionValue::Builder(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, OptionValue>> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Json(Value::Null))
    }
}

impl From<Value> for OptionValue {
    fn from(v: Value) -> Self {
        OptionValue::Json(v)
    }
}

impl From<Builder> for OptionValue {
    fn from(b: Builder) -> Self {
        OptionValue::Builder(Box::new(b))
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Json(Value::String(s.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Json(Value::String(s))
    }
}

impl From<&String> for OptionValue {
    fn from(s: &String) -> Self {
        OptionValue::Json(Value::String(s.clone()))
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Json(Value::Bool(b))
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(n: $t) -> Self {
                    OptionValue::Json(serde_json::json!(n))
                }
            }
        )*
    };
}

from_number!(i32, i64, u32, u64, usize, f32, f64);

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Json(Value::Null))
    }
}

impl From<IndexMap<String, OptionValue>> for OptionValue {
    fn from(map: IndexMap<String, OptionValue>) -> Self {
        OptionValue::Map(map)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for OptionValue {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        OptionValue::Json(Value::String(dt.to_rfc3339()))
    }
}

impl From<chrono::NaiveDate> for OptionValue {
    fn from(date: chrono::NaiveDate) -> Self {
        OptionValue::Json(Value::String(date.format("%Y-%m-%d").to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(OptionValue::from("x").as_json(), Some(&json!("x")));
        assert_eq!(OptionValue::from(3u64).as_json(), Some(&json!(3)));
        assert_eq!(OptionValue::from(true).as_json(), Some(&json!(true)));
        assert!(OptionValue::from(None::<String>).is_null());
    }

    #[test]
    fn test_vec_becomes_list() {
        let v = OptionValue::from(vec!["a", "b"]);
        let items = v.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_str(), Some("b"));
    }

    #[test]
    fn test_dates_render_as_strings() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(OptionValue::from(dt).as_str(), Some("2024-01-02T03:04:05+00:00"));

        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(OptionValue::from(day).as_str(), Some("2024-02-29"));
    }
}
