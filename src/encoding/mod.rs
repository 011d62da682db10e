// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 wire encoding.
//!
//! - [`WireCursor`] / [`WireWriter`] - little-endian primitives over borrowed buffers
//! - [`SizeCalculator`] - encoded size accumulation
//! - [`StructCodec`] - schema-driven message encode/decode
//! - [`resolve`] - permissive instance construction from JSON

pub mod calculator;
pub mod codec;
pub mod cursor;
pub mod resolve;
pub mod writer;

pub use calculator::SizeCalculator;
pub use codec::StructCodec;
pub use cursor::WireCursor;
pub use writer::WireWriter;
