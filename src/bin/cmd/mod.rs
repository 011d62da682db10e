// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod codec;
mod schema;

pub use codec::{DecodeArgs, EncodeArgs, SizeArgs};
pub use schema::SchemaCmd;
