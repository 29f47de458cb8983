// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use smart_ioctl_rs::{
    control_code::disc::{
        GET_DRIVE_GEOMETRY_EX, IS_WRITABLE, PERFORMANCE, PERFORMANCE_OFF, SMART_GET_VERSION,
    },
    device::mock::{MockBackend, MockReply},
    error::{IoctlError, os_error},
    models::{
        Decodable,
        disc::{
            DetectionInfo, DiskGeometry, DiskGeometryEx, DiskPartitionInfo, DiskPerformance,
            MediaType, PartitionStyle,
        },
    },
};

use crate::unit_tests::common::load_fixture;

fn geometry_ex_bytes(disk_size: i64) -> Vec<u8> {
    let mut v = vec![0u8; DiskGeometryEx::SIZE];
    v[0..8].copy_from_slice(&1000i64.to_le_bytes());
    v[8..12].copy_from_slice(&12u32.to_le_bytes());
    v[20..24].copy_from_slice(&512u32.to_le_bytes());
    let data = DiskGeometry::SIZE + 8;
    v[DiskGeometry::SIZE..data].copy_from_slice(&disk_size.to_le_bytes());
    let part = DiskPartitionInfo::SIZE as u32;
    v[data..data + 4].copy_from_slice(&part.to_le_bytes());
    v[data + 4..data + 8].copy_from_slice(&1u32.to_le_bytes());
    v
}

#[test]
fn test_geometry_ex_cached() -> Result<()> {
    let mock = MockBackend::new();
    mock.always(GET_DRIVE_GEOMETRY_EX, MockReply::ok(geometry_ex_bytes(500 << 30)));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let disc = dev.disc();
    let g = disc.geometry_ex()?;
    assert_eq!(g.disk_size.get(), 500 << 30);
    assert_eq!(g.geometry.media_type(), MediaType::FixedMedia);
    assert_eq!(g.partition_info()?.style(), PartitionStyle::Gpt);
    assert!(matches!(g.detection_info()?, DetectionInfo::None));

    disc.geometry_ex()?;
    assert_eq!(mock.codes(), [GET_DRIVE_GEOMETRY_EX]);
    Ok(())
}

#[test]
fn test_is_writable() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(IS_WRITABLE, MockReply::ok(Vec::new()));
    mock.on(IS_WRITABLE, MockReply::fail(os_error::WRITE_PROTECT));
    mock.on(IS_WRITABLE, MockReply::fail(os_error::NOT_READY));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let disc = dev.disc();
    assert!(disc.is_writable()?);
    // Cached for the lifetime of the façade.
    assert!(disc.is_writable()?);
    assert_eq!(mock.codes().len(), 1);

    assert!(!dev.disc().is_writable()?);
    match dev.disc().is_writable() {
        Err(IoctlError::Os { code }) => assert_eq!(code, os_error::NOT_READY),
        other => panic!("expected Os error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_smart_requires_support() -> Result<()> {
    let mock = MockBackend::new();
    let version = load_fixture("tests/unit_tests/fixtures/smart/get_version.hex")?;
    mock.always(SMART_GET_VERSION, MockReply::ok(version));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = dev.disc().smart(2)?.expect("smart supported");
    assert_eq!(smart.drive_number(), 2);

    let mut no_smart = vec![0u8; 24];
    no_smart[0] = 1;
    no_smart[4] = 0x01; // ATA IDENTIFY only
    let mock = MockBackend::new();
    mock.always(SMART_GET_VERSION, MockReply::ok(no_smart));
    let dev = mock.device(r"\\.\PhysicalDrive0");
    assert!(dev.disc().smart(0)?.is_none());
    Ok(())
}

fn performance_bytes(read_count: u32) -> Vec<u8> {
    let mut v = vec![0u8; DiskPerformance::SIZE];
    v[0..8].copy_from_slice(&4096i64.to_le_bytes());
    v[40..44].copy_from_slice(&read_count.to_le_bytes());
    let name: Vec<u8> = "PartMgr".encode_utf16().flat_map(u16::to_le_bytes).collect();
    v[68..68 + name.len()].copy_from_slice(&name);
    v
}

#[test]
fn test_performance_session() -> Result<()> {
    let mock = MockBackend::new();
    mock.always(PERFORMANCE, MockReply::ok(performance_bytes(7)));
    mock.always(PERFORMANCE_OFF, MockReply::ok(Vec::new()));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let disc = dev.disc();
    let mut perf = disc.performance();
    assert!(!perf.is_active());
    perf.stop()?;
    assert!(mock.codes().is_empty());

    let sample = perf.query()?;
    assert!(perf.is_active());
    assert_eq!(sample.bytes_read.get(), 4096);
    assert_eq!(sample.read_count.get(), 7);
    assert_eq!(sample.storage_manager_name()?, "PartMgr");

    perf.stop()?;
    assert!(!perf.is_active());
    assert_eq!(mock.codes(), [PERFORMANCE, PERFORMANCE_OFF]);
    Ok(())
}

#[test]
fn test_performance_stopped_on_drop() -> Result<()> {
    let mock = MockBackend::new();
    mock.always(PERFORMANCE, MockReply::ok(performance_bytes(1)));
    mock.always(PERFORMANCE_OFF, MockReply::ok(Vec::new()));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    {
        let mut perf = dev.disc().performance();
        perf.start()?;
    }
    assert_eq!(mock.codes(), [PERFORMANCE, PERFORMANCE_OFF]);
    Ok(())
}
