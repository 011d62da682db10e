// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use robomsg::{Catalog, MessageRegistry};
use serde::Serialize;
use serde_json::Value as JsonValue;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Builtin registry extended with every given catalog, in order.
pub fn load_registry(catalogs: &[PathBuf]) -> Result<MessageRegistry> {
    let registry = MessageRegistry::with_builtins();
    for path in catalogs {
        load_catalog(&registry, path)?;
    }
    Ok(registry)
}

fn load_catalog(registry: &MessageRegistry, path: &Path) -> Result<()> {
    let catalog = Catalog::from_path(path)?;
    catalog
        .register_into(registry)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    Ok(())
}

/// Parse a partial record argument.
///
/// Accepts inline JSON, `@path` to read JSON from a file, or nothing (empty record).
pub fn parse_partial(arg: Option<&str>) -> Result<JsonValue> {
    let text = match arg {
        None => return Ok(JsonValue::Object(Default::default())),
        Some(s) => match s.strip_prefix('@') {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {path}"))?,
            None => s.to_string(),
        },
    };
    serde_json::from_str(&text).context("invalid JSON record")
}

/// Parse a hex string, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
    hex::decode(cleaned).map_err(|e| anyhow::anyhow!("Invalid hex input: {e}"))
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce() -> Result<()>) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}
