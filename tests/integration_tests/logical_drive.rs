// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use serial_test::serial;
use smart_ioctl_rs::{cfg::config::Target, device::Device};
use tracing::info;

use crate::integration_tests::common::{init_test_logger, load_config};

#[test]
#[ignore]
#[serial]
fn volume_extents_and_bitmap() -> Result<()> {
    let _guard = init_test_logger();
    let cfg = load_config()?;
    let Some(dev_cfg) = cfg
        .devices
        .iter()
        .find(|d| matches!(d.target, Target::LogicalDrive { .. }))
    else {
        return Ok(());
    };

    let dev = Device::open(dev_cfg.target.path(), dev_cfg.access_mode(), dev_cfg.share_mode())?;
    let extents = dev.volume().disk_extents()?.clone();
    assert!(!extents.extents.is_empty());
    info!(disks = ?extents.disk_numbers(), "extents");

    let fs = dev.file_system().expect("logical drive is a volume");
    assert!(fs.is_volume_mounted()?);

    let mut last = None;
    let mut clusters = 0u64;
    for page in fs.volume_bitmap(cfg.runtime.bitmap_page_bytes) {
        let page = page?;
        if let Some(prev) = last {
            assert!(page.starting_lcn > prev);
        }
        last = Some(page.starting_lcn);
        clusters += page.clusters();
    }
    if let Ok(ntfs) = fs.ntfs_volume_data() {
        assert_eq!(clusters, ntfs.total_clusters.get() as u64);
    }
    Ok(())
}
