// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use smart_ioctl_rs::{
    control_code::volume::{GET_VOLUME_DISK_EXTENTS, IS_CLUSTERED},
    device::mock::{MockBackend, MockReply},
    error::{IoctlError, os_error},
    models::volume::VolumeDiskExtents,
};

fn extent(disk: u32, offset: i64, length: i64) -> Vec<u8> {
    let mut v = Vec::with_capacity(24);
    v.extend_from_slice(&disk.to_le_bytes());
    v.extend_from_slice(&[0; 4]);
    v.extend_from_slice(&offset.to_le_bytes());
    v.extend_from_slice(&length.to_le_bytes());
    v
}

fn extents(count: u32, items: &[Vec<u8>]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&count.to_le_bytes());
    v.extend_from_slice(&[0; 4]);
    for e in items {
        v.extend_from_slice(e);
    }
    v
}

#[test]
fn test_single_extent() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(
        GET_VOLUME_DISK_EXTENTS,
        MockReply::ok(extents(1, &[extent(0, 1 << 20, 100 << 30)])),
    );
    let dev = mock.device(r"\\.\C:");

    let volume = dev.volume();
    let x = volume.disk_extents()?;
    assert_eq!(x.disk_numbers(), [0]);
    assert_eq!(x.extents[0].starting_offset.get(), 1 << 20);

    volume.disk_extents()?;
    assert_eq!(mock.calls().len(), 1);
    assert_eq!(mock.calls()[0].out_len, VolumeDiskExtents::buffer_len(1));
    Ok(())
}

#[test]
fn test_more_data_retries_once() -> Result<()> {
    let mock = MockBackend::new();
    // Room for one extent: the driver fills the count and the first entry.
    mock.on(
        GET_VOLUME_DISK_EXTENTS,
        MockReply::fail_with(os_error::MORE_DATA, extents(3, &[extent(0, 0, 10)])),
    );
    mock.on(
        GET_VOLUME_DISK_EXTENTS,
        MockReply::ok(extents(3, &[
            extent(0, 0, 10),
            extent(1, 0, 20),
            extent(4, 0, 30),
        ])),
    );
    let dev = mock.device(r"\\.\D:");

    let volume = dev.volume();
    assert_eq!(volume.disk_extents()?.disk_numbers(), [0, 1, 4]);

    let lens: Vec<usize> = mock.calls().iter().map(|c| c.out_len).collect();
    assert_eq!(lens, [
        VolumeDiskExtents::buffer_len(1),
        VolumeDiskExtents::buffer_len(3)
    ]);
    Ok(())
}

#[test]
fn test_extents_other_error() {
    let mock = MockBackend::new();
    mock.on(GET_VOLUME_DISK_EXTENTS, MockReply::fail(os_error::INVALID_FUNCTION));
    let dev = mock.device(r"\\.\E:");

    match dev.volume().disk_extents() {
        Err(IoctlError::Os { code }) => assert_eq!(code, os_error::INVALID_FUNCTION),
        other => panic!("expected Os error, got {other:?}"),
    }
    assert_eq!(mock.calls().len(), 1);
}

#[test]
fn test_is_clustered() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(IS_CLUSTERED, MockReply::fail(os_error::NO_ERROR));
    mock.on(IS_CLUSTERED, MockReply::ok(Vec::new()));
    mock.on(IS_CLUSTERED, MockReply::fail(os_error::INVALID_FUNCTION));
    let dev = mock.device(r"\\.\C:");

    let volume = dev.volume();
    assert!(!volume.is_clustered()?);
    assert!(!volume.is_clustered()?);
    assert_eq!(mock.calls().len(), 1);

    assert!(dev.volume().is_clustered()?);
    assert!(dev.volume().is_clustered().is_err());
    Ok(())
}
