//! Needs a real disk and administrator rights:
//! `cargo test --test integration -- --ignored`

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use serial_test::serial;
use smart_ioctl_rs::{
    cfg::config::{Report, Target},
    device::Device,
    error::IoctlError,
};
use tracing::info;

use crate::integration_tests::common::{init_test_logger, load_config};

#[test]
#[ignore]
#[serial]
fn physical_drive_geometry_and_smart() -> Result<()> {
    let _guard = init_test_logger();
    let cfg = load_config()?;
    let dev_cfg = cfg
        .devices
        .iter()
        .find(|d| matches!(d.target, Target::PhysicalDrive { .. }))
        .expect("a PhysicalDrive entry in the test config");

    let dev = Device::open(dev_cfg.target.path(), dev_cfg.access_mode(), dev_cfg.share_mode())?;
    let disc = dev.disc();

    let g = disc.geometry_ex()?;
    assert!(g.disk_size.get() > 0);
    assert!(g.geometry.bytes_per_sector.get() >= 512);
    info!(?g, "geometry");

    if dev_cfg.wants(Report::Smart) {
        match disc.smart(cfg.runtime.smart_drive_number)? {
            Some(smart) => {
                let pairs = smart.iterate_paired()?;
                assert_eq!(pairs.len(), 30);
                info!(model = %smart.identify()?.model(), "smart ok");
            },
            // NVMe and USB bridges commonly lack the ATA pass-through.
            None => info!("S.M.A.R.T. not supported by this drive"),
        }
    }
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn physical_drive_close_twice() -> Result<()> {
    let _guard = init_test_logger();
    let mut dev = Device::open_physical_drive(0)?;
    dev.close()?;
    dev.close()?;
    assert!(matches!(
        dev.disc().geometry(),
        Err(IoctlError::Closed { .. })
    ));
    Ok(())
}

#[test]
#[serial]
fn missing_drive_fails_to_open() {
    match Device::open_physical_drive(250) {
        Err(IoctlError::Open { code, .. }) => assert_ne!(code, 0),
        other => panic!("expected Open error, got {other:?}"),
    }
}
