// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven codec for ROS1 messages.
//!
//! A [`StructCodec`] is a stateless value wrapping one immutable
//! [`MessageType`]. It encodes a [`MessageInstance`] into a caller-supplied
//! buffer, decodes it back, computes its size, and exposes the type's
//! metadata constants.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use robomsg::encoding::StructCodec;
//! use robomsg::schema::builtin_types::pandar_packet;
//! use robomsg::{MessageInstance, Time};
//!
//! let codec = StructCodec::new(Arc::new(pandar_packet()));
//! let packet = MessageInstance::new()
//!     .with("stamp", Time::new(5, 0))
//!     .with("data", vec![1u8, 2, 3])
//!     .with("size", 3u32);
//!
//! let mut buf = vec![0u8; codec.compute_size(&packet)?];
//! let end = codec.encode(&packet, &mut buf, 0)?;
//! assert_eq!(end, 19);
//!
//! let (decoded, next) = codec.decode(&buf, 0)?;
//! assert_eq!(decoded, packet);
//! assert_eq!(next, 19);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use super::calculator::SizeCalculator;
use super::cursor::WireCursor;
use super::resolve::{default_instance, resolve_message};
use super::writer::WireWriter;
use crate::core::{CodecError, Duration, MessageInstance, Result, Time, Value};
use crate::schema::{FieldKind, MessageType, PrimitiveType};

/// Codec for one message type.
#[derive(Debug, Clone)]
pub struct StructCodec {
    schema: Arc<MessageType>,
}

impl StructCodec {
    /// Create a codec for the given schema.
    pub fn new(schema: Arc<MessageType>) -> Self {
        Self { schema }
    }

    /// The schema this codec follows.
    pub fn schema(&self) -> &Arc<MessageType> {
        &self.schema
    }

    /// Type name string (e.g., "hesai_lidar/PandarPacket").
    pub fn datatype(&self) -> &str {
        &self.schema.name
    }

    /// Content checksum.
    pub fn md5sum(&self) -> &str {
        &self.schema.md5sum
    }

    /// Human-readable schema text.
    pub fn message_definition(&self) -> &str {
        &self.schema.definition
    }

    /// Encode `instance` into `buffer` starting at `offset`.
    ///
    /// Returns the offset right after the last written byte. The instance is
    /// validated before anything is written, so a failed call leaves the
    /// buffer untouched.
    pub fn encode(
        &self,
        instance: &MessageInstance,
        buffer: &mut [u8],
        offset: usize,
    ) -> Result<usize> {
        let size = self.compute_size(instance)?;
        if offset.saturating_add(size) > buffer.len() {
            return Err(self.failed(
                "encode",
                CodecError::BufferOverflow {
                    required: size,
                    offset,
                    buffer_len: buffer.len(),
                },
            ));
        }

        let mut writer = WireWriter::new(buffer, offset);
        encode_message(&self.schema, instance, &mut writer, "")
            .map_err(|e| self.failed("encode", e))?;
        trace!(
            datatype = %self.schema.name,
            offset,
            size,
            "encoded message"
        );
        Ok(writer.position())
    }

    /// Encode into a freshly allocated buffer of exactly the computed size.
    pub fn encode_to_vec(&self, instance: &MessageInstance) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.compute_size(instance)?];
        self.encode(instance, &mut buffer, 0)?;
        Ok(buffer)
    }

    /// Decode one message from `buffer` starting at `offset`.
    ///
    /// Returns the instance and the offset right after the consumed bytes.
    pub fn decode(&self, buffer: &[u8], offset: usize) -> Result<(MessageInstance, usize)> {
        let mut cursor = WireCursor::new(buffer, offset);
        let instance =
            decode_message(&self.schema, &mut cursor, "").map_err(|e| self.failed("decode", e))?;
        trace!(
            datatype = %self.schema.name,
            offset,
            consumed = cursor.position() - offset,
            "decoded message"
        );
        Ok((instance, cursor.position()))
    }

    /// Number of bytes `encode` will write for `instance`.
    pub fn compute_size(&self, instance: &MessageInstance) -> Result<usize> {
        let mut calc = SizeCalculator::new();
        size_message(&self.schema, instance, &mut calc, "")
            .map_err(|e| self.failed("compute_size", e))?;
        Ok(calc.size())
    }

    /// Build a complete instance from a loosely typed partial record.
    ///
    /// See [`crate::encoding::resolve`] for the conversion rules.
    pub fn resolve(&self, partial: &JsonValue) -> MessageInstance {
        resolve_message(&self.schema, partial)
    }

    /// Instance with every field at its schema default.
    pub fn default_instance(&self) -> MessageInstance {
        default_instance(&self.schema)
    }

    fn failed(&self, operation: &'static str, err: CodecError) -> CodecError {
        debug!(
            datatype = %self.schema.name,
            operation,
            error = %err,
            fields = ?err.log_fields(),
            "codec operation failed"
        );
        err
    }
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn field_value<'m>(
    msg_type: &MessageType,
    instance: &'m MessageInstance,
    name: &str,
) -> Result<&'m Value> {
    instance
        .get(name)
        .ok_or_else(|| CodecError::missing_field(&msg_type.name, name))
}

fn mismatch(path: &str, kind: &FieldKind, value: &Value) -> CodecError {
    CodecError::type_mismatch(path, kind.to_string(), value.kind_name())
}

fn check_width(path: &str, size: Option<usize>, actual: usize) -> Result<()> {
    match size {
        Some(expected) if expected != actual => {
            Err(CodecError::width_mismatch(path, expected, actual))
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Encoding
// =============================================================================

fn encode_message(
    msg_type: &MessageType,
    instance: &MessageInstance,
    writer: &mut WireWriter<'_>,
    prefix: &str,
) -> Result<()> {
    for field in &msg_type.fields {
        let value = field_value(msg_type, instance, &field.name)?;
        let path = field_path(prefix, &field.name);
        encode_value(&field.kind, value, writer, &path)?;
    }
    Ok(())
}

fn encode_value(
    kind: &FieldKind,
    value: &Value,
    writer: &mut WireWriter<'_>,
    path: &str,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Primitive(p), v) => encode_primitive(*p, v, writer, path),
        (FieldKind::Bytes { size }, Value::Bytes(bytes)) => {
            check_width(path, *size, bytes.len())?;
            if size.is_none() {
                writer.write_length(bytes.len(), path)?;
            }
            writer.write_bytes(bytes)
        }
        (FieldKind::Array { element, size }, Value::Array(items)) => {
            check_width(path, *size, items.len())?;
            if size.is_none() {
                writer.write_length(items.len(), path)?;
            }
            for (i, item) in items.iter().enumerate() {
                encode_value(element, item, writer, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        (FieldKind::Message(msg_type), Value::Message(nested)) => {
            encode_message(msg_type, nested, writer, path)
        }
        (kind, v) => Err(mismatch(path, kind, v)),
    }
}

fn encode_primitive(
    p: PrimitiveType,
    value: &Value,
    writer: &mut WireWriter<'_>,
    path: &str,
) -> Result<()> {
    match (p, value) {
        (PrimitiveType::Bool, Value::Bool(v)) => writer.write_bool(*v),
        (PrimitiveType::Int8, Value::Int8(v)) => writer.write_i8(*v),
        (PrimitiveType::Int16, Value::Int16(v)) => writer.write_i16(*v),
        (PrimitiveType::Int32, Value::Int32(v)) => writer.write_i32(*v),
        (PrimitiveType::Int64, Value::Int64(v)) => writer.write_i64(*v),
        (PrimitiveType::UInt8, Value::UInt8(v)) => writer.write_u8(*v),
        (PrimitiveType::UInt16, Value::UInt16(v)) => writer.write_u16(*v),
        (PrimitiveType::UInt32, Value::UInt32(v)) => writer.write_u32(*v),
        (PrimitiveType::UInt64, Value::UInt64(v)) => writer.write_u64(*v),
        (PrimitiveType::Float32, Value::Float32(v)) => writer.write_f32(*v),
        (PrimitiveType::Float64, Value::Float64(v)) => writer.write_f64(*v),
        (PrimitiveType::String, Value::String(s)) => writer.write_string(s, path),
        (PrimitiveType::Time, Value::Time(t)) => {
            writer.write_u32(t.secs)?;
            writer.write_u32(t.nsecs)
        }
        (PrimitiveType::Duration, Value::Duration(d)) => {
            writer.write_i32(d.secs)?;
            writer.write_i32(d.nsecs)
        }
        (p, v) => Err(CodecError::type_mismatch(path, p.as_str(), v.kind_name())),
    }
}

// =============================================================================
// Decoding
// =============================================================================

fn decode_message(
    msg_type: &MessageType,
    cursor: &mut WireCursor<'_>,
    prefix: &str,
) -> Result<MessageInstance> {
    let mut instance = MessageInstance::new();
    for field in &msg_type.fields {
        let path = field_path(prefix, &field.name);
        let value = decode_value(&field.kind, cursor, &path)?;
        instance.set(field.name.clone(), value);
    }
    Ok(instance)
}

fn decode_value(kind: &FieldKind, cursor: &mut WireCursor<'_>, path: &str) -> Result<Value> {
    match kind {
        FieldKind::Primitive(p) => decode_primitive(*p, cursor, path),
        FieldKind::Bytes { size } => {
            let len = match size {
                Some(n) => *n,
                None => cursor.read_length(1, path)?,
            };
            Ok(Value::Bytes(cursor.read_bytes(len, path)?.to_vec()))
        }
        FieldKind::Array { element, size } => {
            let len = match size {
                Some(n) => *n,
                None => cursor.read_length(element.min_size(), path)?,
            };
            let mut items = Vec::with_capacity(len.min(cursor.remaining()));
            for i in 0..len {
                items.push(decode_value(element, cursor, &format!("{path}[{i}]"))?);
            }
            Ok(Value::Array(items))
        }
        FieldKind::Message(msg_type) => {
            Ok(Value::Message(decode_message(msg_type, cursor, path)?))
        }
    }
}

fn decode_primitive(p: PrimitiveType, cursor: &mut WireCursor<'_>, path: &str) -> Result<Value> {
    Ok(match p {
        PrimitiveType::Bool => Value::Bool(cursor.read_bool(path)?),
        PrimitiveType::Int8 => Value::Int8(cursor.read_i8(path)?),
        PrimitiveType::Int16 => Value::Int16(cursor.read_i16(path)?),
        PrimitiveType::Int32 => Value::Int32(cursor.read_i32(path)?),
        PrimitiveType::Int64 => Value::Int64(cursor.read_i64(path)?),
        PrimitiveType::UInt8 => Value::UInt8(cursor.read_u8(path)?),
        PrimitiveType::UInt16 => Value::UInt16(cursor.read_u16(path)?),
        PrimitiveType::UInt32 => Value::UInt32(cursor.read_u32(path)?),
        PrimitiveType::UInt64 => Value::UInt64(cursor.read_u64(path)?),
        PrimitiveType::Float32 => Value::Float32(cursor.read_f32(path)?),
        PrimitiveType::Float64 => Value::Float64(cursor.read_f64(path)?),
        PrimitiveType::String => Value::String(cursor.read_string(path)?),
        PrimitiveType::Time => {
            // Check the whole 8 bytes up front so a half timestamp reports 8 requested.
            let raw = cursor.read_bytes(8, path)?;
            let mut inner = WireCursor::new(raw, 0);
            Value::Time(Time::new(inner.read_u32(path)?, inner.read_u32(path)?))
        }
        PrimitiveType::Duration => {
            let raw = cursor.read_bytes(8, path)?;
            let mut inner = WireCursor::new(raw, 0);
            Value::Duration(Duration::new(inner.read_i32(path)?, inner.read_i32(path)?))
        }
    })
}

// =============================================================================
// Sizing
// =============================================================================

fn size_message(
    msg_type: &MessageType,
    instance: &MessageInstance,
    calc: &mut SizeCalculator,
    prefix: &str,
) -> Result<()> {
    for field in &msg_type.fields {
        let value = field_value(msg_type, instance, &field.name)?;
        let path = field_path(prefix, &field.name);
        size_value(&field.kind, value, calc, &path)?;
    }
    Ok(())
}

fn size_value(
    kind: &FieldKind,
    value: &Value,
    calc: &mut SizeCalculator,
    path: &str,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Primitive(PrimitiveType::String), Value::String(s)) => {
            calc.sequence(s.len());
        }
        (FieldKind::Primitive(p), v) => {
            // Same variant check as encode_primitive.
            let expected = p.as_str();
            if v.kind_name() != expected {
                return Err(CodecError::type_mismatch(path, expected, v.kind_name()));
            }
            size_primitive(*p, calc);
        }
        (FieldKind::Bytes { size }, Value::Bytes(bytes)) => {
            check_width(path, *size, bytes.len())?;
            match size {
                Some(n) => calc.raw(*n),
                None => calc.sequence(bytes.len()),
            };
        }
        (FieldKind::Array { element, size }, Value::Array(items)) => {
            check_width(path, *size, items.len())?;
            if size.is_none() {
                calc.sequence_length();
            }
            for (i, item) in items.iter().enumerate() {
                size_value(element, item, calc, &format!("{path}[{i}]"))?;
            }
        }
        (FieldKind::Message(msg_type), Value::Message(nested)) => {
            size_message(msg_type, nested, calc, path)?;
        }
        (kind, v) => return Err(mismatch(path, kind, v)),
    }
    Ok(())
}

fn size_primitive(p: PrimitiveType, calc: &mut SizeCalculator) {
    match p {
        PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::UInt8 => calc.uint8(),
        PrimitiveType::Int16 | PrimitiveType::UInt16 => calc.uint16(),
        PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => calc.uint32(),
        PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => calc.uint64(),
        PrimitiveType::Time | PrimitiveType::Duration => calc.time(),
        // Sized with its contents in size_value.
        PrimitiveType::String => calc.size(),
    };
}
