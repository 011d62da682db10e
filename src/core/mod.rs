// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robomsg.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`Value`] / [`MessageInstance`] - In-memory message values
//! - [`MessageRegistry`] - Known message types by name

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::MessageRegistry;
pub use value::{Duration, MessageInstance, Time, Value};
