// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use hex_literal::hex;
use smart_ioctl_rs::{
    control_code::disc::{SMART_GET_VERSION, SMART_RCV_DRIVE_DATA, SMART_SEND_DRIVE_COMMAND},
    device::mock::{MockBackend, MockReply},
    error::{IoctlError, os_error},
    models::{
        attribute_names::attribute_name,
        smart::{
            AttrThreshold, DriveAttribute, NUM_ATTRIBUTE_STRUCTS, SmartDriverStatus, SmartHealth,
        },
    },
    smart::{SmartPipeline, SmartState, pair_attributes},
};
use zerocopy::FromZeros;

use crate::unit_tests::common::{attribute, load_fixture, sector, smart_out, threshold};

const FIXTURES: &str = "tests/unit_tests/fixtures/smart";

fn fixture(name: &str) -> Result<Vec<u8>> {
    load_fixture(&format!("{FIXTURES}/{name}"))
}

fn smart_backend() -> Result<MockBackend> {
    let mock = MockBackend::new();
    mock.always(SMART_SEND_DRIVE_COMMAND, MockReply::ok(smart_out(0, &[])));
    mock.always(SMART_GET_VERSION, MockReply::ok(fixture("get_version.hex")?));
    Ok(mock)
}

/// Feature register of a recorded SMART command block.
fn feature(input: &[u8]) -> u8 {
    input[4]
}

#[test]
fn test_enable_precedes_read() -> Result<()> {
    let mock = smart_backend()?;
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_attributes.hex")?));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    let attrs = smart.read_attributes()?;
    assert_eq!(attrs.len(), NUM_ATTRIBUTE_STRUCTS);
    assert_eq!(smart.state(), SmartState::AttributesRead);

    let calls = mock.calls();
    assert_eq!(
        mock.codes(),
        [SMART_SEND_DRIVE_COMMAND, SMART_RCV_DRIVE_DATA]
    );
    assert_eq!(feature(&calls[0].input), 0xD8);
    assert_eq!(feature(&calls[1].input), 0xD0);
    Ok(())
}

#[test]
fn test_raw_values_and_names() -> Result<()> {
    let mock = smart_backend()?;
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_attributes.hex")?));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let attrs = SmartPipeline::new(&dev).read_attributes()?;
    assert_eq!(attrs[0].id, 0x01);
    assert_eq!(attrs[0].raw_value(), 1);
    assert_eq!(attrs[0].value, 100);
    assert_eq!(attrs[1].id, 0x09);
    assert_eq!(attrs[1].raw_value(), (1u64 << 48) - 1);
    assert_eq!(attrs[1].name(), "Power-On Hours (POH)");
    assert_eq!(attrs[2].raw_value(), 0x24);
    assert!(attrs[3..].iter().all(|a| a.id == 0));

    assert_eq!(attribute_name(0x09), "Power-On Hours (POH)");
    assert_eq!(attribute_name(0x99), "<Unknown>");
    Ok(())
}

#[test]
fn test_paired_iteration() -> Result<()> {
    let mock = smart_backend()?;
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_attributes.hex")?));
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_thresholds.hex")?));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    let paired = smart.iterate_paired()?;
    assert_eq!(paired.len(), NUM_ATTRIBUTE_STRUCTS);

    let used: Vec<_> = paired.filter(|p| !p.is_empty()).collect();
    assert_eq!(used.len(), 3);
    assert_eq!(used[0].id(), 0x01);
    assert_eq!(used[0].threshold.threshold, 0x32);
    assert!(!used[0].is_failing());
    assert!(used.iter().all(|p| p.attribute.id == p.threshold.id));
    assert_eq!(smart.state(), SmartState::ThresholdsRead);
    Ok(())
}

#[test]
fn test_thresholds_are_cached() -> Result<()> {
    let mock = smart_backend()?;
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_thresholds.hex")?));
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(fixture("read_thresholds.hex")?));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let mut smart = SmartPipeline::new(&dev);
    let first = smart.read_thresholds()?.to_vec();
    let second = smart.read_thresholds()?.to_vec();
    assert_eq!(first, second);
    let reads = || {
        mock.codes()
            .into_iter()
            .filter(|c| *c == SMART_RCV_DRIVE_DATA)
            .count()
    };
    assert_eq!(reads(), 1);

    smart.reset_thresholds();
    smart.read_thresholds()?;
    assert_eq!(reads(), 2);
    Ok(())
}

#[test]
fn test_failing_attribute() -> Result<()> {
    let mock = smart_backend()?;
    let attrs = sector(&[attribute(0x05, 10, 10, 500), attribute(0xC2, 40, 30, 40)]);
    let thresholds = sector(&[threshold(0x05, 36), threshold(0xC2, 0)]);
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(smart_out(0, &attrs)));
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(smart_out(0, &thresholds)));
    let dev = mock.device(r"\\.\PhysicalDrive1");

    let smart = SmartPipeline::new(&dev);
    let failing: Vec<u8> = smart
        .iterate_paired()?
        .filter(|p| p.is_failing())
        .map(|p| p.id())
        .collect();
    assert_eq!(failing, [0x05]);
    Ok(())
}

#[test]
fn test_size_mismatch() -> Result<()> {
    let attrs = vec![DriveAttribute::new_zeroed(); 2];
    let thresholds = vec![AttrThreshold::new_zeroed(); 3];
    match pair_attributes(attrs, thresholds) {
        Err(IoctlError::SizeMismatch {
            attributes,
            thresholds,
        }) => assert_eq!((attributes, thresholds), (2, 3)),
        other => panic!("expected SizeMismatch, got {other:?}"),
    }

    let attrs = vec![DriveAttribute::new_zeroed(); 4];
    let thresholds = vec![AttrThreshold::new_zeroed(); 4];
    let ok = pair_attributes(attrs, thresholds)?;
    assert_eq!(ok.count(), 4);
    Ok(())
}

#[test]
fn test_driver_error_takes_precedence() -> Result<()> {
    let mock = smart_backend()?;
    // The OS reports success, the driver does not.
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(smart_out(4, &[])));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    match SmartPipeline::new(&dev).read_attributes() {
        Err(IoctlError::SmartDriver(SmartDriverStatus::InvalidBuffer)) => {},
        other => panic!("expected InvalidBuffer, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_enable_failure_stops_command() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(SMART_SEND_DRIVE_COMMAND, MockReply::fail(os_error::INVALID_FUNCTION));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    match SmartPipeline::new(&dev).read_attributes() {
        Err(IoctlError::Os { code }) => assert_eq!(code, os_error::INVALID_FUNCTION),
        other => panic!("expected Os error, got {other:?}"),
    }
    assert_eq!(mock.codes(), [SMART_SEND_DRIVE_COMMAND]);
    Ok(())
}

#[test]
fn test_version_and_support() -> Result<()> {
    let mock = smart_backend()?;
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    let version = smart.get_version()?.expect("version block");
    assert_eq!(version.version, 1);
    assert!(version.ide_device(0).is_some());
    assert!(version.ide_device(1).is_none());
    assert!(smart.is_smart_supported()?);
    assert_eq!(smart.state(), SmartState::VersionChecked);

    // Cached: one request for both calls.
    assert_eq!(mock.codes(), [SMART_GET_VERSION]);
    Ok(())
}

#[test]
fn test_zeroed_version_is_unsupported() -> Result<()> {
    let mock = MockBackend::new();
    mock.always(SMART_GET_VERSION, MockReply::ok(vec![0u8; 24]));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    assert_eq!(smart.get_version()?, None);
    assert_eq!(smart.state(), SmartState::Unsupported);
    assert!(dev.disc().smart(0)?.is_none());
    Ok(())
}

#[test]
fn test_rejected_version_is_cached_as_absent() -> Result<()> {
    let mock = MockBackend::new();
    mock.always(SMART_GET_VERSION, MockReply::fail(os_error::INVALID_FUNCTION));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    assert_eq!(smart.get_version()?, None);
    assert!(!smart.is_smart_supported()?);
    assert_eq!(smart.state(), SmartState::Unsupported);
    assert_eq!(mock.codes(), [SMART_GET_VERSION]);

    assert!(dev.disc().smart(0)?.is_none());
    Ok(())
}

#[test]
fn test_health_status() -> Result<()> {
    let mock = MockBackend::new();
    mock.on(SMART_SEND_DRIVE_COMMAND, MockReply::ok(smart_out(0, &[])));
    mock.on(
        SMART_SEND_DRIVE_COMMAND,
        MockReply::ok(smart_out(0, &hex!("da00004fc200b000"))),
    );
    mock.on(SMART_SEND_DRIVE_COMMAND, MockReply::ok(smart_out(0, &[])));
    mock.on(
        SMART_SEND_DRIVE_COMMAND,
        MockReply::ok(smart_out(0, &hex!("da0000f42c00b000"))),
    );
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    assert_eq!(smart.health_status()?, SmartHealth::Healthy);
    assert_eq!(smart.health_status()?, SmartHealth::ThresholdExceeded);

    let features: Vec<u8> = mock.calls().iter().map(|c| feature(&c.input)).collect();
    assert_eq!(features, [0xD8, 0xDA, 0xD8, 0xDA]);
    Ok(())
}

/// Pad `s` with spaces to `len` bytes and swap each byte pair, the way
/// IDENTIFY data stores strings.
fn ata_field(s: &str, len: usize) -> Vec<u8> {
    let mut v = s.as_bytes().to_vec();
    v.resize(len, b' ');
    for pair in v.chunks_mut(2) {
        pair.swap(0, 1);
    }
    v
}

#[test]
fn test_identify_skips_enable() -> Result<()> {
    let mut id = vec![0u8; 256];
    id[20..40].copy_from_slice(&ata_field("WD-123", 20));
    id[46..54].copy_from_slice(&ata_field("01.01A01", 8));
    id[54..94].copy_from_slice(&ata_field("ACME DISK 1000", 40));
    id[120..124].copy_from_slice(&2_000_000u32.to_le_bytes());

    let mock = MockBackend::new();
    mock.on(SMART_RCV_DRIVE_DATA, MockReply::ok(smart_out(0, &id)));
    let dev = mock.device(r"\\.\PhysicalDrive0");

    let smart = SmartPipeline::new(&dev);
    let sector = smart.identify()?;
    assert_eq!(sector.model(), "ACME DISK 1000");
    assert_eq!(sector.serial(), "WD-123");
    assert_eq!(sector.firmware(), "01.01A01");
    assert_eq!(sector.capacity_bytes(), 2_000_000 * 512);

    // Cached, and no enable in front of IDENTIFY.
    smart.identify()?;
    assert_eq!(mock.codes(), [SMART_RCV_DRIVE_DATA]);
    assert_eq!(mock.calls()[0].input[4 + 6], 0xEC);
    Ok(())
}
