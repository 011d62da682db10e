// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry of known message types.
//!
//! Plays the role of a per-package message index: one place to look up every
//! type by name and get a codec for it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use super::error::{CodecError, Result};
use crate::encoding::StructCodec;
use crate::schema::builtin_types::builtin_types;
use crate::schema::MessageType;

/// Thread-safe registry of message types keyed by type name.
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Suitable for sharing across threads that encode and decode independently.
pub struct MessageRegistry {
    inner: RwLock<HashMap<String, Arc<MessageType>>>,
}

impl MessageRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry seeded with the builtin types.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut inner = registry.inner.write().unwrap_or_else(|e| e.into_inner());
            for msg_type in builtin_types() {
                inner.insert(msg_type.name.clone(), msg_type);
            }
        }
        registry
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Arc<MessageType>>>> {
        self.inner
            .read()
            .map_err(|e| CodecError::invalid_schema("registry", format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Arc<MessageType>>>> {
        self.inner
            .write()
            .map_err(|e| CodecError::invalid_schema("registry", format!("lock poisoned: {e}")))
    }

    /// Register a message type under its own name.
    ///
    /// Replaces any type already registered under that name.
    pub fn register(&self, msg_type: impl Into<Arc<MessageType>>) -> Result<()> {
        let msg_type = msg_type.into();
        let name = msg_type.name.clone();
        let mut inner = self.write()?;
        if let Some(previous) = inner.insert(name.clone(), msg_type) {
            warn!(
                type_name = %name,
                previous_md5 = %previous.md5sum,
                "replaced registered message type"
            );
        } else {
            debug!(type_name = %name, "registered message type");
        }
        Ok(())
    }

    /// Get a type by exact name.
    pub fn get(&self, name: &str) -> Result<Option<Arc<MessageType>>> {
        Ok(self.read()?.get(name).cloned())
    }

    /// Look up a type by name with variant resolution.
    ///
    /// Tries, in order:
    /// - Exact match
    /// - With /msg/ segment (e.g., "std_msgs/Header" → "std_msgs/msg/Header")
    /// - Without /msg/ segment (e.g., "std_msgs/msg/Header" → "std_msgs/Header")
    /// - Short name match when unambiguous (e.g., "Header" → "std_msgs/Header")
    pub fn lookup(&self, name: &str) -> Result<Option<Arc<MessageType>>> {
        let inner = self.read()?;
        if let Some(t) = inner.get(name) {
            return Ok(Some(t.clone()));
        }

        if let Some((pkg, rest)) = name.split_once('/') {
            let variant = match rest.strip_prefix("msg/") {
                Some(short) => format!("{pkg}/{short}"),
                None => format!("{pkg}/msg/{rest}"),
            };
            if let Some(t) = inner.get(&variant) {
                return Ok(Some(t.clone()));
            }
            return Ok(None);
        }

        let mut candidates = inner.values().filter(|t| t.short_name() == name);
        match (candidates.next(), candidates.next()) {
            (Some(t), None) => Ok(Some(t.clone())),
            _ => Ok(None),
        }
    }

    /// Look up a type and build a codec for it.
    pub fn codec(&self, name: &str) -> Result<StructCodec> {
        self.lookup(name)?
            .map(StructCodec::new)
            .ok_or_else(|| CodecError::type_not_found(name))
    }

    /// Check if a type is registered under exactly this name.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(name))
    }

    /// All registered type names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Remove a type from the registry.
    pub fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.write()?.remove(name).is_some())
    }

    /// Get the number of registered types.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
