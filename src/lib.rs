// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg
//!
//! Schema-driven codec for ROS1 wire-format robotics messages.
//!
//! One [`StructCodec`] per message type replaces a generated class per
//! message: it encodes a [`MessageInstance`] into a caller-supplied buffer,
//! decodes it back, computes its size, resolves loosely typed input into a
//! complete instance, and exposes the type's name, checksum and definition.
//!
//! ## Architecture
//!
//! - `core/` - errors, values, the message registry
//! - `schema/` - field model, builtin types, TOML catalogs
//! - `encoding/` - wire cursor/writer, size calculator, codec, resolve
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomsg::MessageRegistry;
//! use serde_json::json;
//!
//! let registry = MessageRegistry::with_builtins();
//! let codec = registry.codec("hesai_lidar/PandarPacket")?;
//!
//! let packet = codec.resolve(&json!({ "data": [1, 2, 3], "size": 3 }));
//! let bytes = codec.encode_to_vec(&packet)?;
//! assert_eq!(bytes.len(), 19);
//!
//! let (decoded, _) = codec.decode(&bytes, 0)?;
//! assert_eq!(decoded, packet);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{
    CodecError, Duration, MessageInstance, MessageRegistry, Result, Time, Value,
};

// Schema model
pub mod schema;

pub use schema::{Catalog, Field, FieldKind, MessageType, PrimitiveType};

// Encoding/decoding
pub mod encoding;

pub use encoding::StructCodec;
