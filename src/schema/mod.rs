// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message schemas: field model, builtin types and declarative catalogs.

pub mod ast;
pub mod builtin_types;
pub mod catalog;

pub use ast::{Field, FieldKind, MessageType, PrimitiveType};
pub use catalog::{Catalog, CatalogEntry, CatalogField};
