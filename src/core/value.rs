// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message value type system.
//!
//! A [`MessageInstance`] maps field names to [`Value`]s. Values mirror the
//! field kinds of [`crate::schema::FieldKind`]; the extra [`Value::Untyped`]
//! variant carries loosely typed input that did not fit its field through
//! construction untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map as JsonMap, Value as JsonValue};

/// ROS1 timestamp.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Time {
    /// Seconds
    pub secs: u32,
    /// Nanoseconds
    pub nsecs: u32,
}

/// ROS1 duration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration {
    /// Seconds
    pub secs: i32,
    /// Nanoseconds
    pub nsecs: i32,
}

impl Time {
    /// Create a timestamp.
    pub const fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

impl Duration {
    /// Create a duration.
    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }
}

/// A single field value.
///
/// Equality on floats is IEEE 754 equality: an instance holding a NaN is not
/// equal to itself, even though it encodes to the same bytes every time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Raw `uint8[]` payload
    Bytes(Vec<u8>),

    // Temporal
    Time(Time),
    Duration(Duration),

    // Array of values
    Array(Vec<Value>),

    // Nested message
    Message(MessageInstance),

    /// Loosely typed input kept as-is
    Untyped(JsonValue),
}

impl Value {
    /// Name of the value kind, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt16(_) => "uint16",
            Value::UInt32(_) => "uint32",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "uint8[]",
            Value::Time(_) => "time",
            Value::Duration(_) => "duration",
            Value::Array(_) => "array",
            Value::Message(_) => "message",
            Value::Untyped(_) => "untyped",
        }
    }

    /// Try to convert this value to u64 (non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt8(v) => Some(u64::from(*v)),
            Value::UInt16(v) => Some(u64::from(*v)),
            Value::UInt32(v) => Some(u64::from(*v)),
            Value::UInt64(v) => Some(*v),
            Value::Int8(v) => u64::try_from(*v).ok(),
            Value::Int16(v) => u64::try_from(*v).ok(),
            Value::Int32(v) => u64::try_from(*v).ok(),
            Value::Int64(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            Value::UInt8(v) => Some(i64::from(*v)),
            Value::UInt16(v) => Some(i64::from(*v)),
            Value::UInt32(v) => Some(i64::from(*v)),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(f64::from(*v)),
            Value::Float64(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Get the raw bytes of a `uint8[]` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the string contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the nested message.
    pub fn as_message(&self) -> Option<&MessageInstance> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Get the array elements.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Check if this value was kept untyped.
    pub fn is_untyped(&self) -> bool {
        matches!(self, Value::Untyped(_))
    }

    /// Render as plain JSON (the shape `resolve` accepts).
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Int8(v) => json!(v),
            Value::Int16(v) => json!(v),
            Value::Int32(v) => json!(v),
            Value::Int64(v) => json!(v),
            Value::UInt8(v) => json!(v),
            Value::UInt16(v) => json!(v),
            Value::UInt32(v) => json!(v),
            Value::UInt64(v) => json!(v),
            Value::Float32(v) => float_json(f64::from(*v)),
            Value::Float64(v) => float_json(*v),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Bytes(b) => JsonValue::Array(b.iter().map(|v| json!(v)).collect()),
            Value::Time(t) => json!({ "secs": t.secs, "nsecs": t.nsecs }),
            Value::Duration(d) => json!({ "secs": d.secs, "nsecs": d.nsecs }),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Message(m) => m.to_json(),
            Value::Untyped(v) => v.clone(),
        }
    }
}

/// JSON has no NaN or infinity, so those are written as strings.
fn float_json(v: f64) -> JsonValue {
    if v.is_nan() {
        JsonValue::from("NaN")
    } else if v.is_infinite() {
        JsonValue::from(if v > 0.0 { "inf" } else { "-inf" })
    } else {
        json!(v)
    }
}

macro_rules! impl_from_for_value {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Bytes,
    Time => Time,
    Duration => Duration,
    Vec<Value> => Array,
    MessageInstance => Message,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A message value: field name -> value.
///
/// Field order on the wire comes from the schema, not from this map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageInstance {
    fields: HashMap<String, Value>,
}

impl MessageInstance {
    /// Create an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a mutable field value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Remove a field.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Check if a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as a plain JSON object.
    pub fn to_json(&self) -> JsonValue {
        let map: JsonMap<String, JsonValue> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

impl FromIterator<(String, Value)> for MessageInstance {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(Value::UInt32(7).as_u64(), Some(7));
        assert_eq!(Value::Int8(-1).as_u64(), None);
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::String("x".into()).as_f64(), None);
    }

    #[test]
    fn test_instance_builder() {
        let mut m = MessageInstance::new()
            .with("size", 3u32)
            .with("data", vec![1u8, 2, 3]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("size"), Some(&Value::UInt32(3)));
        assert_eq!(m.set("size", 4u32), Some(Value::UInt32(3)));
        assert!(m.contains("data"));
        assert!(m.remove("data").is_some());
        assert!(!m.contains("data"));
    }

    #[test]
    fn test_to_json() {
        let m = MessageInstance::new()
            .with("stamp", Time::new(5, 0))
            .with("data", vec![1u8, 2, 3])
            .with("size", 3u32)
            .with("frame_id", "lidar");
        assert_eq!(
            m.to_json(),
            json!({
                "stamp": { "secs": 5, "nsecs": 0 },
                "data": [1, 2, 3],
                "size": 3,
                "frame_id": "lidar"
            })
        );
    }

    #[test]
    fn test_non_finite_floats_to_json() {
        assert_eq!(Value::Float32(f32::NAN).to_json(), json!("NaN"));
        assert_eq!(Value::Float64(f64::INFINITY).to_json(), json!("inf"));
        assert_eq!(Value::Float64(f64::NEG_INFINITY).to_json(), json!("-inf"));
        assert_eq!(Value::Float64(-0.5).to_json(), json!(-0.5));
    }

    #[test]
    fn test_untyped_passthrough() {
        let v = Value::Untyped(json!({"weird": true}));
        assert!(v.is_untyped());
        assert_eq!(v.kind_name(), "untyped");
        assert_eq!(v.to_json(), json!({"weird": true}));
    }

    #[test]
    fn test_time_serde() {
        let t: Time = serde_json::from_str(r#"{"secs": 1, "nsecs": 2}"#).unwrap();
        assert_eq!(t, Time::new(1, 2));
    }
}
