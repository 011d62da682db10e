// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use robomsg::{Catalog, MessageRegistry};

/// Get the path to a test fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builtin registry plus the radar fixture catalog.
pub fn radar_registry() -> MessageRegistry {
    let registry = MessageRegistry::with_builtins();
    Catalog::from_path(fixture_path("radar_catalog.toml"))
        .expect("parse radar catalog")
        .register_into(&registry)
        .expect("register radar catalog");
    registry
}
