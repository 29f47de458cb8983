// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use hex_literal::hex;
use smart_ioctl_rs::{
    control_code::storage::QUERY_PROPERTY,
    device::mock::{MockBackend, MockReply},
    error::os_error,
    facade::properties::query_property,
    models::storage::{
        BusType, DeviceSeekPenaltyDescriptor, DeviceTrimDescriptor, StorageQueryType,
    },
};

/// `(PropertyId, QueryType)` of a recorded query.
fn query_of(input: &[u8]) -> (u32, u32) {
    let word = |i: usize| u32::from_le_bytes([input[i], input[i + 1], input[i + 2], input[i + 3]]);
    (word(0), word(4))
}

fn small_descriptor(size: u32, flag: u8) -> Vec<u8> {
    // Version 1, Size, one flag byte and padding.
    let mut v = hex!("01000000 00000000 00000000").to_vec();
    v[4..8].copy_from_slice(&size.to_le_bytes());
    v[8] = flag;
    v
}

#[test]
fn test_exists_probe_then_standard_query() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(QUERY_PROPERTY, MockReply::ok(Vec::new()));
    mock.on(QUERY_PROPERTY, MockReply::ok(small_descriptor(12, 1)));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let trim = query_property::<_, DeviceTrimDescriptor>(&dev)?.expect("trim descriptor");
    assert!(trim.trim_enabled());

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(query_of(&calls[0].input), (8, StorageQueryType::Exists as u32));
    assert_eq!(calls[0].out_len, 0);
    assert_eq!(query_of(&calls[1].input), (8, StorageQueryType::Standard as u32));
    Ok(())
}

#[test]
fn test_missing_property_skips_query() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(QUERY_PROPERTY, MockReply::fail(os_error::NOT_SUPPORTED));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    assert!(query_property::<_, DeviceSeekPenaltyDescriptor>(&dev)?.is_none());
    assert_eq!(mock.calls().len(), 1);
    Ok(())
}

#[test]
fn test_empty_or_failed_query_is_none() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(QUERY_PROPERTY, MockReply::ok(Vec::new()));
    mock.on(QUERY_PROPERTY, MockReply::ok(small_descriptor(0, 1)));
    mock.on(QUERY_PROPERTY, MockReply::ok(Vec::new()));
    mock.on(QUERY_PROPERTY, MockReply::fail(os_error::INVALID_FUNCTION));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    assert!(query_property::<_, DeviceTrimDescriptor>(&dev)?.is_none());
    assert!(query_property::<_, DeviceTrimDescriptor>(&dev)?.is_none());
    assert_eq!(mock.calls().len(), 4);
    Ok(())
}

fn device_descriptor() -> Vec<u8> {
    let strings: &[u8] = b"ACME\0FastDisk 2000   \0";
    let vendor = 36u32;
    let product = vendor + 5;
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_le_bytes());
    v.extend_from_slice(&(36 + strings.len() as u32).to_le_bytes());
    v.extend_from_slice(&[0x00, 0x00, 0x01, 0x01]);
    for word in [vendor, product, 0, 0, 0x0B, 0] {
        v.extend_from_slice(&word.to_le_bytes());
    }
    v.extend_from_slice(strings);
    v
}

#[test]
fn test_properties_cached() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(QUERY_PROPERTY, MockReply::ok(Vec::new()));
    mock.on(QUERY_PROPERTY, MockReply::ok(device_descriptor()));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let storage = dev.storage();
    let props = storage.properties();
    let d = props.device()?.expect("device descriptor");
    assert_eq!(d.bus_type(), BusType::Sata);
    assert!(d.is_removable());
    assert_eq!(d.vendor_id()?.as_deref(), Some("ACME"));
    assert_eq!(d.product_id()?.as_deref(), Some("FastDisk 2000"));
    assert_eq!(d.serial_number()?, None);

    props.device()?;
    assert_eq!(mock.calls().len(), 2);

    // A missing property is cached as absent too.
    mock.on(QUERY_PROPERTY, MockReply::fail(os_error::NOT_SUPPORTED));
    assert!(props.seek_penalty()?.is_none());
    assert!(props.seek_penalty()?.is_none());
    assert_eq!(mock.calls().len(), 3);
    Ok(())
}
