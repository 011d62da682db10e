// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined message types shipped with the crate.
//!
//! ## Supported Types
//!
//! - `std_msgs/Header` - sequence id, stamp and frame id
//! - `hesai_lidar/PandarPacket` - one raw Hesai Pandar UDP packet
//!
//! Other sensor types (radar scans, radar track arrays) are declared in a
//! catalog, see [`crate::schema::catalog`].

use std::sync::Arc;

use crate::schema::ast::{FieldKind, MessageType, PrimitiveType};

/// Checksum of `std_msgs/Header`.
pub const HEADER_MD5: &str = "2176decaecbce78abc3b96ef049fabed";

/// Checksum of `hesai_lidar/PandarPacket`.
pub const PANDAR_PACKET_MD5: &str = "c29f0f7365a75504f5f0008b5913cb94";

const HEADER_DEFINITION: &str = "\
# Standard metadata for higher-level stamped data types.
# sequence ID: consecutively increasing ID
uint32 seq
# Two-integer timestamp that is expressed as stamp.sec and stamp.nsec
time stamp
# Frame this data is associated with
string frame_id
";

const PANDAR_PACKET_DEFINITION: &str = "\
# field\t\tsize(byte)
# SOB \t\t2
# angle\t\t2
# measure\t5
# block\t\tSOB + angle + measure * 40
# timestamp\t4
# factory\t2
# reserve\t8
# rpm\t\t2
# tail\t\ttimestamp + factory + reserve + rpm
# packet\tblock * 6 + tail

time stamp
uint8[] data
uint32 size
";

/// Create the `std_msgs/Header` type.
pub fn header() -> MessageType {
    MessageType::new("std_msgs/Header")
        .with_md5sum(HEADER_MD5)
        .with_definition(HEADER_DEFINITION)
        .with_field("seq", FieldKind::primitive(PrimitiveType::UInt32))
        .with_field("stamp", FieldKind::primitive(PrimitiveType::Time))
        .with_field("frame_id", FieldKind::primitive(PrimitiveType::String))
}

/// Create the `hesai_lidar/PandarPacket` type.
pub fn pandar_packet() -> MessageType {
    MessageType::new("hesai_lidar/PandarPacket")
        .with_md5sum(PANDAR_PACKET_MD5)
        .with_definition(PANDAR_PACKET_DEFINITION)
        .with_field("stamp", FieldKind::primitive(PrimitiveType::Time))
        .with_field("data", FieldKind::bytes())
        .with_field("size", FieldKind::primitive(PrimitiveType::UInt32))
}

/// All builtin types, in registration order.
pub fn builtin_types() -> Vec<Arc<MessageType>> {
    vec![Arc::new(header()), Arc::new(pandar_packet())]
}
