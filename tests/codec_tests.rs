// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec integration tests.
//!
//! Tests cover:
//! - The PandarPacket wire layout and its 19-byte example
//! - Round trips and size consistency for nested and array-bearing types
//! - Truncated input at every prefix length
//! - Byte-exact re-encoding of decoded buffers

mod common;

use std::sync::Arc;

use robomsg::encoding::cursor::MAX_ZERO_SIZED_ELEMENTS;
use robomsg::{
    CodecError, FieldKind, MessageInstance, MessageRegistry, MessageType, PrimitiveType,
    StructCodec, Time, Value,
};
use serde_json::json;

use common::radar_registry;

fn pandar_codec() -> StructCodec {
    MessageRegistry::with_builtins()
        .codec("hesai_lidar/PandarPacket")
        .expect("builtin pandar packet")
}

fn sample_track_array(codec: &StructCodec) -> MessageInstance {
    codec.resolve(&json!({
        "header": {
            "seq": 42,
            "stamp": { "secs": 1700000000, "nsecs": 500 },
            "frame_id": "ti_mmwave"
        },
        "num_tracks": 2,
        "track": [
            { "tid": 1, "posx": 1.5, "posy": -2.25, "velx": 0.5, "vely": 0.0 },
            { "tid": 7, "posx": 10.0 }
        ]
    }))
}

// ============================================================================
// PandarPacket
// ============================================================================

#[test]
fn test_pandar_packet_example() {
    let codec = pandar_codec();
    let packet = MessageInstance::new()
        .with("stamp", Time::new(5, 0))
        .with("data", vec![1u8, 2, 3])
        .with("size", 3u32);

    assert_eq!(codec.compute_size(&packet).unwrap(), 19);

    let mut buf = vec![0u8; 19];
    let end = codec.encode(&packet, &mut buf, 0).unwrap();
    assert_eq!(end, 19);

    let (decoded, next) = codec.decode(&buf, 0).unwrap();
    assert_eq!(next, 19);
    assert_eq!(decoded, packet);
}

#[test]
fn test_pandar_packet_resolve_example() {
    let codec = pandar_codec();
    let resolved = codec.resolve(&json!({ "size": 7 }));
    let expected = MessageInstance::new()
        .with("stamp", Time::new(0, 0))
        .with("data", Vec::<u8>::new())
        .with("size", 7u32);
    assert_eq!(resolved, expected);
    assert_eq!(codec.resolve(&json!({})), codec.default_instance());
}

#[test]
fn test_pandar_full_packet_payload() {
    // A real Pandar40 packet is 1240 bytes of payload.
    let codec = pandar_codec();
    let payload: Vec<u8> = (0..1240u32).map(|i| (i % 251) as u8).collect();
    let packet = MessageInstance::new()
        .with("stamp", Time::new(1_600_000_000, 123_456_789))
        .with("data", payload.clone())
        .with("size", 1240u32);

    let bytes = codec.encode_to_vec(&packet).unwrap();
    assert_eq!(bytes.len(), payload.len() + 16);
    assert_eq!(&bytes[12..12 + payload.len()], payload.as_slice());

    let (decoded, _) = codec.decode(&bytes, 0).unwrap();
    assert_eq!(decoded.get("data").and_then(Value::as_bytes), Some(&payload[..]));
}

#[test]
fn test_consecutive_messages_in_one_buffer() {
    let codec = pandar_codec();
    let first = codec.resolve(&json!({ "data": [9], "size": 1 }));
    let second = codec.resolve(&json!({
        "stamp": { "secs": 2, "nsecs": 3 },
        "data": [],
        "size": 0
    }));

    let total = codec.compute_size(&first).unwrap() + codec.compute_size(&second).unwrap();
    let mut buf = vec![0u8; total];
    let mid = codec.encode(&first, &mut buf, 0).unwrap();
    let end = codec.encode(&second, &mut buf, mid).unwrap();
    assert_eq!(end, total);

    let (a, next) = codec.decode(&buf, 0).unwrap();
    let (b, last) = codec.decode(&buf, next).unwrap();
    assert_eq!((a, b), (first, second));
    assert_eq!(last, total);
}

// ============================================================================
// Nested types
// ============================================================================

#[test]
fn test_track_array_round_trip() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_tracker_rospkg/RadarTrackArray").unwrap();
    let tracks = sample_track_array(&codec);

    let bytes = codec.encode_to_vec(&tracks).unwrap();
    // header 4 + 8 + (4 + 9), num_tracks 4, track prefix 4 + 2 * 20
    assert_eq!(bytes.len(), 25 + 4 + 4 + 40);

    let (decoded, end) = codec.decode(&bytes, 0).unwrap();
    assert_eq!(end, bytes.len());
    assert_eq!(decoded, tracks);

    let second = decoded.get("track").and_then(Value::as_array).unwrap()[1]
        .as_message()
        .unwrap();
    assert_eq!(second.get("tid"), Some(&Value::UInt32(7)));
    assert_eq!(second.get("vely"), Some(&Value::Float32(0.0)));
}

#[test]
fn test_reencode_is_byte_exact() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_tracker_rospkg/RadarTrackArray").unwrap();
    let bytes = codec.encode_to_vec(&sample_track_array(&codec)).unwrap();

    let (decoded, _) = codec.decode(&bytes, 0).unwrap();
    assert_eq!(codec.encode_to_vec(&decoded).unwrap(), bytes);
}

#[test]
fn test_every_kind_round_trip() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_rospkg/RadarOccupancy").unwrap();
    let occupancy = codec.resolve(&json!({
        "header": { "frame_id": "zone" },
        "state": 3,
        "zones": [true, false, true, true],
        "window": { "secs": -1, "nsecs": -500 },
        "snr": [12.5, -0.125],
        "raw": [1, 2, 3, 4, 5, 6],
        "offsets": [-9007199254740993i64, 0],
        "label": "occupied ✓"
    }));
    assert!(occupancy.iter().all(|(_, v)| !v.is_untyped()));

    let size = codec.compute_size(&occupancy).unwrap();
    let bytes = codec.encode_to_vec(&occupancy).unwrap();
    assert_eq!(bytes.len(), size);

    let (decoded, _) = codec.decode(&bytes, 0).unwrap();
    assert_eq!(decoded, occupancy);
    assert_eq!(codec.resolve(&decoded.to_json()), decoded);
}

#[test]
fn test_fixed_array_width_mismatch() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_rospkg/RadarOccupancy").unwrap();
    let occupancy = codec.resolve(&json!({ "zones": [true] }));
    assert_eq!(
        codec.encode_to_vec(&occupancy).unwrap_err(),
        CodecError::width_mismatch("zones", 4, 1)
    );
}

#[test]
fn test_untyped_element_reported_with_index() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_rospkg/RadarOccupancy").unwrap();
    let occupancy = codec.resolve(&json!({ "snr": [1.0, "loud"] }));
    assert_eq!(
        codec.compute_size(&occupancy).unwrap_err(),
        CodecError::type_mismatch("snr[1]", "float64", "untyped")
    );
}

// ============================================================================
// Truncation
// ============================================================================

#[test]
fn test_every_prefix_fails() {
    let registry = radar_registry();
    for name in [
        "hesai_lidar/PandarPacket",
        "ti_mmwave_tracker_rospkg/RadarTrackArray",
        "ti_mmwave_rospkg/RadarScan",
        "ti_mmwave_tracker_rospkg/RadarScan",
        "ti_mmwave_rospkg/RadarOccupancy",
    ] {
        let codec = registry.codec(name).unwrap();
        let instance = if name.ends_with("TrackArray") {
            sample_track_array(&codec)
        } else {
            codec.resolve(&json!({ "data": [1, 2, 3], "label": "abc", "snr": [1.0] }))
        };
        let bytes = codec.encode_to_vec(&instance).unwrap();
        for len in 0..bytes.len() {
            let err = codec.decode(&bytes[..len], 0).unwrap_err();
            assert!(err.is_truncation(), "{name} prefix {len}: {err}");
        }
    }
}

#[test]
fn test_truncated_fixed_field() {
    let codec = pandar_codec();
    let bytes = codec
        .encode_to_vec(&codec.resolve(&json!({ "data": [1, 2, 3], "size": 3 })))
        .unwrap();
    assert_eq!(
        codec.decode(&bytes[..17], 0).unwrap_err(),
        CodecError::truncated("size", 4, 2, 15)
    );
}

#[test]
fn test_zero_sized_element_count_is_capped() {
    let msg_type = MessageType::new("test_msgs/Empties").with_field(
        "items",
        FieldKind::array(FieldKind::message(Arc::new(MessageType::new("std_msgs/Empty")))),
    );
    let codec = StructCodec::new(Arc::new(msg_type));

    // Empty elements take no bytes, so the count alone describes the array.
    let (decoded, end) = codec.decode(&[3, 0, 0, 0], 0).unwrap();
    assert_eq!(end, 4);
    assert_eq!(
        decoded.get("items").and_then(Value::as_array).map(<[Value]>::len),
        Some(3)
    );

    for count in [MAX_ZERO_SIZED_ELEMENTS as u32 + 1, 0x0200_0000, u32::MAX] {
        let err = codec.decode(&count.to_le_bytes(), 0).unwrap_err();
        assert_eq!(
            err,
            CodecError::malformed_length("items", count as usize, 4, 4)
        );
    }
}

#[test]
fn test_huge_length_prefix() {
    let floats = MessageType::new("test_msgs/Floats").with_field(
        "values",
        FieldKind::array(FieldKind::primitive(PrimitiveType::Float64)),
    );
    let codec = StructCodec::new(Arc::new(floats));
    assert!(matches!(
        codec.decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0], 0),
        Err(CodecError::MalformedLength { length: 4294967295, .. })
    ));
}

#[test]
fn test_non_finite_floats_survive_json() {
    let registry = radar_registry();
    let codec = registry.codec("ti_mmwave_rospkg/RadarScan").unwrap();
    let mut scan = codec.default_instance();
    scan.set("velocity", f32::NAN);
    scan.set("range", f32::INFINITY);

    let bytes = codec.encode_to_vec(&scan).unwrap();
    let (decoded, _) = codec.decode(&bytes, 0).unwrap();
    assert_eq!(codec.encode_to_vec(&decoded).unwrap(), bytes);

    // NaN never compares equal, so compare through the wire form.
    let json = decoded.to_json();
    assert_eq!(json["velocity"], "NaN");
    assert_eq!(json["range"], "inf");
    let resolved = codec.resolve(&json);
    assert!(resolved.iter().all(|(_, v)| !v.is_untyped()));
    assert_eq!(codec.encode_to_vec(&resolved).unwrap(), bytes);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_codec_across_threads() {
    let codec = Arc::new(pandar_codec());
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let codec = Arc::clone(&codec);
            std::thread::spawn(move || {
                let data = vec![i as u8; i as usize];
                let packet = codec.resolve(&json!({ "data": data, "size": i }));
                let bytes = codec.encode_to_vec(&packet).unwrap();
                let (decoded, _) = codec.decode(&bytes, 0).unwrap();
                assert_eq!(decoded, packet);
                bytes.len()
            })
        })
        .collect();
    let sizes: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(sizes, vec![16, 17, 18, 19]);
}
