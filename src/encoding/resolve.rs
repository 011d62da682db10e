// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Permissive construction of message instances from loosely typed input.
//!
//! [`resolve_message`] never fails. Every schema field ends up present:
//! - absent fields take the schema default;
//! - provided values that fit the field kind are converted to it;
//! - provided values that do not fit are kept as [`Value::Untyped`] and only
//!   rejected later, when the instance is encoded.
//!
//! Non-object input is treated as an empty record and unknown keys are
//! ignored. Nested messages (and arrays of them) are resolved recursively, so
//! a partial nested record is filled in too.

use serde_json::Value as JsonValue;

use crate::core::{Duration, MessageInstance, Time, Value};
use crate::schema::{FieldKind, MessageType, PrimitiveType};

/// Resolve a partial JSON record against `msg_type`.
pub fn resolve_message(msg_type: &MessageType, partial: &JsonValue) -> MessageInstance {
    let record = partial.as_object();
    msg_type
        .fields
        .iter()
        .map(|field| {
            let value = match record.and_then(|r| r.get(&field.name)) {
                Some(provided) => resolve_value(&field.kind, provided),
                None => default_value(&field.kind),
            };
            (field.name.clone(), value)
        })
        .collect()
}

/// Instance with every field at its default.
pub fn default_instance(msg_type: &MessageType) -> MessageInstance {
    msg_type
        .fields
        .iter()
        .map(|field| (field.name.clone(), default_value(&field.kind)))
        .collect()
}

/// Schema default for a field kind.
pub fn default_value(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Primitive(p) => default_primitive(*p),
        FieldKind::Bytes { size } => Value::Bytes(vec![0; size.unwrap_or(0)]),
        FieldKind::Array { element, size } => Value::Array(
            (0..size.unwrap_or(0))
                .map(|_| default_value(element))
                .collect(),
        ),
        FieldKind::Message(msg_type) => Value::Message(default_instance(msg_type)),
    }
}

fn default_primitive(p: PrimitiveType) -> Value {
    match p {
        PrimitiveType::Bool => Value::Bool(false),
        PrimitiveType::Int8 => Value::Int8(0),
        PrimitiveType::Int16 => Value::Int16(0),
        PrimitiveType::Int32 => Value::Int32(0),
        PrimitiveType::Int64 => Value::Int64(0),
        PrimitiveType::UInt8 => Value::UInt8(0),
        PrimitiveType::UInt16 => Value::UInt16(0),
        PrimitiveType::UInt32 => Value::UInt32(0),
        PrimitiveType::UInt64 => Value::UInt64(0),
        PrimitiveType::Float32 => Value::Float32(0.0),
        PrimitiveType::Float64 => Value::Float64(0.0),
        PrimitiveType::String => Value::String(String::new()),
        PrimitiveType::Time => Value::Time(Time::default()),
        PrimitiveType::Duration => Value::Duration(Duration::default()),
    }
}

/// Convert a provided JSON value to `kind`, keeping it untyped if it does not fit.
pub fn resolve_value(kind: &FieldKind, provided: &JsonValue) -> Value {
    let converted = match kind {
        FieldKind::Message(msg_type) => Some(Value::Message(resolve_message(msg_type, provided))),
        FieldKind::Primitive(p) => convert_primitive(*p, provided),
        FieldKind::Bytes { .. } => convert_bytes(provided),
        FieldKind::Array { element, .. } => provided.as_array().map(|items| {
            Value::Array(items.iter().map(|item| resolve_value(element, item)).collect())
        }),
    };
    converted.unwrap_or_else(|| Value::Untyped(provided.clone()))
}

fn convert_bytes(provided: &JsonValue) -> Option<Value> {
    provided
        .as_array()?
        .iter()
        .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect::<Option<Vec<u8>>>()
        .map(Value::Bytes)
}

fn json_int<T>(provided: &JsonValue) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if let Some(v) = provided.as_i64() {
        <T as TryFrom<i64>>::try_from(v).ok()
    } else {
        provided
            .as_u64()
            .and_then(|v| <T as TryFrom<u64>>::try_from(v).ok())
    }
}

/// A JSON number, or one of the string forms `to_json` uses for non-finite floats.
fn json_float(provided: &JsonValue) -> Option<f64> {
    match provided {
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "inf" => Some(f64::INFINITY),
            "-inf" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        other => other.as_f64(),
    }
}

/// Read an optional numeric component of a time-like object; absent means 0.
fn time_part<T>(record: &serde_json::Map<String, JsonValue>, key: &str) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64> + Default,
{
    match record.get(key) {
        Some(v) => json_int(v),
        None => Some(T::default()),
    }
}

fn convert_primitive(p: PrimitiveType, provided: &JsonValue) -> Option<Value> {
    Some(match p {
        PrimitiveType::Bool => Value::Bool(provided.as_bool()?),
        PrimitiveType::Int8 => Value::Int8(json_int(provided)?),
        PrimitiveType::Int16 => Value::Int16(json_int(provided)?),
        PrimitiveType::Int32 => Value::Int32(json_int(provided)?),
        PrimitiveType::Int64 => Value::Int64(json_int(provided)?),
        PrimitiveType::UInt8 => Value::UInt8(json_int(provided)?),
        PrimitiveType::UInt16 => Value::UInt16(json_int(provided)?),
        PrimitiveType::UInt32 => Value::UInt32(json_int(provided)?),
        PrimitiveType::UInt64 => Value::UInt64(json_int(provided)?),
        PrimitiveType::Float32 => Value::Float32(json_float(provided)? as f32),
        PrimitiveType::Float64 => Value::Float64(json_float(provided)?),
        PrimitiveType::String => Value::String(provided.as_str()?.to_string()),
        PrimitiveType::Time => {
            let record = provided.as_object()?;
            Value::Time(Time::new(
                time_part(record, "secs")?,
                time_part(record, "nsecs")?,
            ))
        }
        PrimitiveType::Duration => {
            let record = provided.as_object()?;
            Value::Duration(Duration::new(
                time_part(record, "secs")?,
                time_part(record, "nsecs")?,
            ))
        }
    })
}
