// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative message catalogs.
//!
//! A catalog is a TOML document listing message types as plain data, so
//! sensor packages that are not built in can be described without code:
//!
//! ```toml
//! [[message]]
//! name = "ti_mmwave_rospkg/RadarScan"
//! checksum = "..."
//! fields = [
//!     { name = "header", type = "std_msgs/Header" },
//!     { name = "point_id", type = "uint16" },
//!     { name = "x", type = "float32" },
//! ]
//! ```
//!
//! Type tokens are a primitive name or a message name, optionally followed by
//! `[]` (length-prefixed) or `[N]` (fixed). `uint8`, `char` and `byte` arrays
//! become byte sequences. Message references may point at types already in
//! the target registry or at other entries of the same catalog, in any order.
//!
//! Fixed-length fields of a message may expand to at most
//! [`MAX_FIXED_ELEMENTS`] values in total, nested messages included.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::core::{CodecError, MessageRegistry, Result};
use crate::schema::ast::{Field, FieldKind, MessageType, PrimitiveType};

/// Upper bound on the values a message's fixed-length fields expand to.
pub const MAX_FIXED_ELEMENTS: usize = 1 << 20;

/// Parsed catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Declared message types
    #[serde(default, rename = "message")]
    pub messages: Vec<CatalogEntry>,
}

/// One message type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Full type name
    pub name: String,
    /// Opaque checksum
    #[serde(default)]
    pub checksum: String,
    /// Human-readable definition; generated from the fields when absent
    #[serde(default)]
    pub definition: Option<String>,
    /// Ordered fields
    #[serde(default)]
    pub fields: Vec<CatalogField>,
}

/// One field declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogField {
    /// Field name
    pub name: String,
    /// Type token, e.g. "uint8[]" or "std_msgs/Header"
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Split a type token into its base name and array suffix.
///
/// Returns `(base, None)` for scalars, `(base, Some(None))` for `[]` and
/// `(base, Some(Some(n)))` for `[n]`.
fn split_array(token: &str) -> std::result::Result<(&str, Option<Option<usize>>), String> {
    let Some(open) = token.find('[') else {
        return Ok((token, None));
    };
    let base = &token[..open];
    let inner = token[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| format!("unterminated array suffix in '{token}'"))?;
    if inner.is_empty() {
        return Ok((base, Some(None)));
    }
    inner
        .parse::<usize>()
        .map(|n| (base, Some(Some(n))))
        .map_err(|_| format!("invalid array length in '{token}'"))
}

impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodecError::parse("catalog", e.to_string()))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::parse(format!("catalog {}", path.display()), e.to_string())
        })?;
        Self::from_toml_str(&text)
    }

    /// Build every entry and register it.
    ///
    /// Entries are built in dependency order; an entry whose message
    /// references cannot be satisfied (unknown or cyclic) fails the whole
    /// load before anything is registered.
    pub fn register_into(&self, registry: &MessageRegistry) -> Result<Vec<Arc<MessageType>>> {
        let mut built: HashMap<String, Arc<MessageType>> = HashMap::new();
        let mut order: Vec<Arc<MessageType>> = Vec::new();
        let declared: HashSet<&str> = self.messages.iter().map(|e| e.name.as_str()).collect();
        let mut pending: Vec<&CatalogEntry> = self.messages.iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            let mut blocked = Vec::new();
            for entry in pending {
                match entry.build(registry, &built, &declared)? {
                    Some(msg_type) => {
                        let msg_type = Arc::new(msg_type);
                        built.insert(msg_type.name.clone(), msg_type.clone());
                        order.push(msg_type);
                    }
                    None => blocked.push(entry),
                }
            }
            if blocked.len() == before {
                let names: Vec<&str> = blocked.iter().map(|e| e.name.as_str()).collect();
                return Err(CodecError::invalid_schema(
                    names.join(", "),
                    "unresolved or cyclic message references",
                ));
            }
            pending = blocked;
        }

        for msg_type in &order {
            registry.register(msg_type.clone())?;
        }
        debug!(count = order.len(), "loaded message catalog");
        Ok(order)
    }
}

impl CatalogEntry {
    /// Build the message type, or `None` if a referenced message is not available yet.
    fn build(
        &self,
        registry: &MessageRegistry,
        built: &HashMap<String, Arc<MessageType>>,
        declared: &HashSet<&str>,
    ) -> Result<Option<MessageType>> {
        let mut msg_type = MessageType::new(self.name.clone()).with_md5sum(self.checksum.clone());
        for field in &self.fields {
            match self.field_kind(&field.type_name, registry, built, declared)? {
                Some(kind) => msg_type.add_field(Field {
                    name: field.name.clone(),
                    kind,
                }),
                None => return Ok(None),
            }
        }
        if message_elements(&msg_type).map_or(true, |n| n > MAX_FIXED_ELEMENTS) {
            return Err(CodecError::invalid_schema(
                &self.name,
                format!("fixed-length fields expand to more than {MAX_FIXED_ELEMENTS} values"),
            ));
        }
        msg_type.definition = match &self.definition {
            Some(text) => text.clone(),
            None => msg_type.field_listing(),
        };
        Ok(Some(msg_type))
    }

    fn field_kind(
        &self,
        token: &str,
        registry: &MessageRegistry,
        built: &HashMap<String, Arc<MessageType>>,
        declared: &HashSet<&str>,
    ) -> Result<Option<FieldKind>> {
        let token = token.trim();
        let (base, array) =
            split_array(token).map_err(|reason| CodecError::invalid_schema(&self.name, reason))?;

        let element = match PrimitiveType::try_from_str(base) {
            Some(p) => FieldKind::Primitive(p),
            None if base.contains('/') || base.chars().next().is_some_and(char::is_uppercase) => {
                // Catalog entries shadow registry types of the same name.
                let found = match built.get(base) {
                    Some(t) => Some(t.clone()),
                    // Declared in this catalog but not built yet; retry on a later pass.
                    None if declared.contains(base) => return Ok(None),
                    None => registry.lookup(base)?,
                };
                match found {
                    Some(t) => FieldKind::Message(t),
                    None => {
                        return Err(CodecError::invalid_schema(
                            &self.name,
                            format!("unknown message type '{base}'"),
                        ))
                    }
                }
            }
            None => {
                return Err(CodecError::invalid_schema(
                    &self.name,
                    format!("unknown field type '{token}'"),
                ))
            }
        };

        let byte_like = matches!(base, "uint8" | "char" | "byte");
        Ok(Some(match array {
            None => element,
            Some(size) if byte_like => FieldKind::Bytes { size },
            Some(size) => FieldKind::Array {
                element: Box::new(element),
                size,
            },
        }))
    }
}

/// Number of values a default instance holds, counting every element of
/// fixed-length fields; `None` on overflow.
fn message_elements(msg_type: &MessageType) -> Option<usize> {
    msg_type
        .fields
        .iter()
        .try_fold(1usize, |total, f| total.checked_add(kind_elements(&f.kind)?))
}

fn kind_elements(kind: &FieldKind) -> Option<usize> {
    match kind {
        FieldKind::Bytes { size: Some(n) } => Some(*n),
        FieldKind::Array {
            element,
            size: Some(n),
        } => kind_elements(element)?.checked_mul(*n),
        FieldKind::Message(msg_type) => message_elements(msg_type),
        _ => Some(1),
    }
}
