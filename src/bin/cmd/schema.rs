// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - list and inspect registered message types.

use clap::Subcommand;
use serde::Serialize;

use crate::common::{output_json_or, Result};
use robomsg::{MessageRegistry, MessageType};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List all registered message types
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show checksum, fields and definition of a message type
    Show {
        /// Message type (full, pkg/msg/Name, or unambiguous short name)
        #[arg(value_name = "TYPE")]
        msg_type: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self, registry: &MessageRegistry) -> Result<()> {
        match self {
            SchemaCmd::List { json } => cmd_list(registry, json),
            SchemaCmd::Show { msg_type, json } => cmd_show(registry, &msg_type, json),
        }
    }
}

fn cmd_list(registry: &MessageRegistry, json: bool) -> Result<()> {
    let mut items = Vec::new();
    for name in registry.names()? {
        if let Some(t) = registry.get(&name)? {
            items.push(TypeSummary {
                name: t.name.clone(),
                md5sum: t.md5sum.clone(),
                fields: t.fields.len(),
            });
        }
    }

    output_json_or(json, &items, || {
        println!("=== Message Types ===");
        println!();
        for item in &items {
            println!("{}", item.name);
            println!("  md5sum: {}", display_md5(&item.md5sum));
            println!("  fields: {}", item.fields);
        }
        Ok(())
    })
}

fn cmd_show(registry: &MessageRegistry, name: &str, json: bool) -> Result<()> {
    let codec = registry.codec(name)?;
    let detail = TypeDetail::from(codec.schema().as_ref());

    output_json_or(json, &detail, || {
        println!("=== {} ===", detail.name);
        println!("md5sum: {}", display_md5(&detail.md5sum));
        match detail.fixed_size {
            Some(size) => println!("size: {size} bytes (fixed)"),
            None => println!("size: >= {} bytes", detail.min_size),
        }
        println!();
        println!("Fields:");
        for field in &detail.fields {
            println!("  {} {}", field.kind, field.name);
        }
        if !detail.definition.trim().is_empty() {
            println!();
            println!("Definition:");
            println!("{}", detail.definition.trim_end());
        }
        Ok(())
    })
}

fn display_md5(md5sum: &str) -> &str {
    if md5sum.is_empty() {
        "(none)"
    } else {
        md5sum
    }
}

// Output types

#[derive(Serialize)]
struct TypeSummary {
    name: String,
    md5sum: String,
    fields: usize,
}

#[derive(Serialize)]
struct FieldDetail {
    name: String,
    kind: String,
}

#[derive(Serialize)]
struct TypeDetail {
    name: String,
    md5sum: String,
    fixed_size: Option<usize>,
    min_size: usize,
    fields: Vec<FieldDetail>,
    definition: String,
}

impl From<&MessageType> for TypeDetail {
    fn from(t: &MessageType) -> Self {
        Self {
            name: t.name.clone(),
            md5sum: t.md5sum.clone(),
            fixed_size: t.fixed_size(),
            min_size: t.min_size(),
            fields: t
                .fields
                .iter()
                .map(|f| FieldDetail {
                    name: f.name.clone(),
                    kind: f.kind.to_string(),
                })
                .collect(),
            definition: t.definition.clone(),
        }
    }
}
