// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema types for ROS1 wire-format messages.

use std::fmt;
use std::sync::Arc;

/// A message type definition: name, opaque checksum, definition text and
/// the ordered field list that drives the wire layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Type name including package (e.g., "hesai_lidar/PandarPacket")
    pub name: String,
    /// Compatibility fingerprint, agreed out of band
    pub md5sum: String,
    /// Human-readable message definition
    pub definition: String,
    /// Ordered list of fields
    pub fields: Vec<Field>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field kind
    pub kind: FieldKind,
}

/// Field kind - primitive, byte sequence, array, or nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Primitive type
    Primitive(PrimitiveType),
    /// `uint8[]` / `uint8[N]` payload
    Bytes {
        /// None = length-prefixed, Some(N) = exactly N bytes
        size: Option<usize>,
    },
    /// Array of any other kind
    Array {
        /// Element kind
        element: Box<FieldKind>,
        /// None = length-prefixed, Some(N) = exactly N elements
        size: Option<usize>,
    },
    /// Nested message type
    Message(Arc<MessageType>),
}

/// Primitive ROS1 types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean, one byte
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Length-prefixed UTF-8 string
    String,
    /// Timestamp (secs:uint32, nsecs:uint32)
    Time,
    /// Duration (secs:int32, nsecs:int32)
    Duration,
}

impl PrimitiveType {
    /// Get the wire size in bytes for this primitive type, if fixed.
    pub fn size(self) -> Option<usize> {
        match self {
            PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::UInt8 => Some(1),
            PrimitiveType::Int16 | PrimitiveType::UInt16 => Some(2),
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => Some(4),
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => Some(8),
            PrimitiveType::Time | PrimitiveType::Duration => Some(8),
            PrimitiveType::String => None,
        }
    }

    /// Smallest number of bytes a value of this type occupies on the wire.
    pub fn min_size(self) -> usize {
        self.size().unwrap_or(4)
    }

    /// Parse a primitive type from a ROS1 type token.
    ///
    /// `byte` and `char` are the deprecated ROS1 aliases for `int8` and `uint8`.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(PrimitiveType::Bool),
            "int8" | "byte" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" | "char" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" => Some(PrimitiveType::Float32),
            "float64" => Some(PrimitiveType::Float64),
            "string" => Some(PrimitiveType::String),
            "time" => Some(PrimitiveType::Time),
            "duration" => Some(PrimitiveType::Duration),
            _ => None,
        }
    }

    /// ROS1 type token.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::String => "string",
            PrimitiveType::Time => "time",
            PrimitiveType::Duration => "duration",
        }
    }
}

impl FieldKind {
    /// Shorthand for a primitive field kind.
    pub fn primitive(p: PrimitiveType) -> Self {
        FieldKind::Primitive(p)
    }

    /// Shorthand for a length-prefixed `uint8[]`.
    pub fn bytes() -> Self {
        FieldKind::Bytes { size: None }
    }

    /// Shorthand for a fixed `uint8[N]`.
    pub fn fixed_bytes(size: usize) -> Self {
        FieldKind::Bytes { size: Some(size) }
    }

    /// Shorthand for a length-prefixed `T[]`.
    pub fn array(element: FieldKind) -> Self {
        FieldKind::Array {
            element: Box::new(element),
            size: None,
        }
    }

    /// Shorthand for a fixed `T[N]`.
    pub fn fixed_array(element: FieldKind, size: usize) -> Self {
        FieldKind::Array {
            element: Box::new(element),
            size: Some(size),
        }
    }

    /// Shorthand for a nested message.
    pub fn message(msg_type: Arc<MessageType>) -> Self {
        FieldKind::Message(msg_type)
    }

    /// Wire size in bytes if every value of this kind has the same size.
    ///
    /// `None` for variable-length kinds and for sizes that overflow `usize`.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            FieldKind::Primitive(p) => p.size(),
            FieldKind::Bytes { size } => *size,
            FieldKind::Array { element, size } => element.fixed_size()?.checked_mul((*size)?),
            FieldKind::Message(msg_type) => msg_type.fixed_size(),
        }
    }

    /// Smallest number of bytes a value of this kind occupies on the wire.
    ///
    /// Saturates at `usize::MAX`.
    pub fn min_size(&self) -> usize {
        match self {
            FieldKind::Primitive(p) => p.min_size(),
            FieldKind::Bytes { size: Some(n) } => *n,
            FieldKind::Bytes { size: None } | FieldKind::Array { size: None, .. } => 4,
            FieldKind::Array {
                element,
                size: Some(n),
            } => element.min_size().saturating_mul(*n),
            FieldKind::Message(msg_type) => msg_type.min_size(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(p) => f.write_str(p.as_str()),
            FieldKind::Bytes { size: None } => f.write_str("uint8[]"),
            FieldKind::Bytes { size: Some(n) } => write!(f, "uint8[{n}]"),
            FieldKind::Array {
                element,
                size: None,
            } => write!(f, "{element}[]"),
            FieldKind::Array {
                element,
                size: Some(n),
            } => write!(f, "{element}[{n}]"),
            FieldKind::Message(msg_type) => f.write_str(&msg_type.name),
        }
    }
}

impl MessageType {
    /// Create a new message type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            md5sum: String::new(),
            definition: String::new(),
            fields: Vec::new(),
        }
    }

    /// Set the checksum.
    pub fn with_md5sum(mut self, md5sum: impl Into<String>) -> Self {
        self.md5sum = md5sum.into();
        self
    }

    /// Set the definition text.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Append a field.
    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.add_field(Field {
            name: name.into(),
            kind,
        });
        self
    }

    /// Add a field to this message type.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Package part of the name, if any.
    pub fn package(&self) -> Option<&str> {
        self.name.split_once('/').map(|(pkg, _)| pkg)
    }

    /// Name without package or `msg/` segment.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Wire size if the message contains no variable-length fields.
    pub fn fixed_size(&self) -> Option<usize> {
        self.fields
            .iter()
            .try_fold(0usize, |total, f| total.checked_add(f.kind.fixed_size()?))
    }

    /// Smallest possible wire size of an instance.
    pub fn min_size(&self) -> usize {
        self.fields
            .iter()
            .fold(0usize, |total, f| total.saturating_add(f.kind.min_size()))
    }

    /// Render the field list as ROS1 `.msg` lines.
    pub fn field_listing(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{} {}", f.kind, f.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
