// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode, decode and size commands.

use clap::Args;

use crate::common::{parse_hex, parse_partial, Result};
use robomsg::MessageRegistry;

/// Encode a partial JSON record.
#[derive(Args, Clone, Debug)]
pub struct EncodeArgs {
    /// Message type
    #[arg(value_name = "TYPE")]
    msg_type: String,

    /// JSON record (inline or @file); missing fields take defaults
    #[arg(value_name = "JSON")]
    record: Option<String>,
}

/// Decode a hex-encoded message.
#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Message type
    #[arg(value_name = "TYPE")]
    msg_type: String,

    /// Encoded bytes as hex
    #[arg(value_name = "HEX")]
    hex: String,

    /// Byte offset to start decoding at
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Fail if bytes remain after the message
    #[arg(long)]
    exact: bool,
}

/// Print the encoded size of a partial JSON record.
#[derive(Args, Clone, Debug)]
pub struct SizeArgs {
    /// Message type
    #[arg(value_name = "TYPE")]
    msg_type: String,

    /// JSON record (inline or @file); missing fields take defaults
    #[arg(value_name = "JSON")]
    record: Option<String>,
}

impl EncodeArgs {
    pub fn run(self, registry: &MessageRegistry) -> Result<()> {
        let codec = registry.codec(&self.msg_type)?;
        let partial = parse_partial(self.record.as_deref())?;
        let instance = codec.resolve(&partial);
        let bytes = codec.encode_to_vec(&instance)?;
        println!("{}", hex::encode(bytes));
        Ok(())
    }
}

impl DecodeArgs {
    pub fn run(self, registry: &MessageRegistry) -> Result<()> {
        let codec = registry.codec(&self.msg_type)?;
        let bytes = parse_hex(&self.hex)?;
        let (instance, end) = codec.decode(&bytes, self.offset)?;

        let trailing = bytes.len().saturating_sub(end);
        if trailing > 0 {
            if self.exact {
                return Err(anyhow::anyhow!(
                    "{trailing} trailing bytes after {} message",
                    codec.datatype()
                ));
            }
            eprintln!("warning: {trailing} trailing bytes ignored");
        }

        println!("{}", serde_json::to_string_pretty(&instance.to_json())?);
        Ok(())
    }
}

impl SizeArgs {
    pub fn run(self, registry: &MessageRegistry) -> Result<()> {
        let codec = registry.codec(&self.msg_type)?;
        let partial = parse_partial(self.record.as_deref())?;
        println!("{}", codec.compute_size(&codec.resolve(&partial))?);
        Ok(())
    }
}
