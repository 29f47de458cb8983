// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use smart_ioctl_rs::{
    cfg::{
        cli::resolve_config_path,
        config::{Config, MIN_BITMAP_PAGE_BYTES, Report, Target},
        enums::YesNo,
    },
    device::{AccessMode, ShareMode},
    facade::filesystem::DEFAULT_BITMAP_PAGE_BYTES,
};

#[test]
fn test_load_shipped_config() -> Result<()> {
    let cfg = resolve_config_path("tests/config.yaml").and_then(Config::load_from_file)?;
    assert_eq!(cfg.devices.len(), 2);

    let disk = &cfg.devices[0];
    assert_eq!(disk.target, Target::PhysicalDrive { index: 0 });
    assert_eq!(disk.target.path(), r"\\.\PhysicalDrive0");
    assert_eq!(disk.access_mode(), AccessMode::READ_WRITE);
    assert_eq!(disk.share_mode(), ShareMode::READ_WRITE);
    assert!(disk.wants(Report::Smart));
    assert!(!disk.wants(Report::FileSystem));

    let volume = &cfg.devices[1];
    assert_eq!(volume.target, Target::LogicalDrive {
        letter: "C".into()
    });
    assert_eq!(volume.target.path(), r"\\.\C:");
    assert_eq!(volume.access_mode(), AccessMode::READ);
    assert_eq!(volume.share.write, YesNo::Yes);

    assert_eq!(cfg.runtime.bitmap_page_bytes, 4112);
    Ok(())
}

#[test]
fn test_defaults_are_filled() -> Result<()> {
    let cfg = Config::from_yaml(
        r#"
devices:
  - Target:
      Kind: SMARTVSD
  - Target:
      Kind: ScsiPort
      Index: 1
    Share: { Read: yes, Write: no, Delete: "true" }
"#,
    )?;
    assert_eq!(cfg.devices[0].name, r"\\.\SMARTVSD");
    assert_eq!(cfg.devices[0].reports, Report::ALL);
    assert_eq!(cfg.devices[1].name, r"\\.\Scsi1:");
    assert_eq!(
        cfg.devices[1].share_mode(),
        ShareMode::READ | ShareMode::DELETE
    );
    assert_eq!(cfg.runtime.bitmap_page_bytes, DEFAULT_BITMAP_PAGE_BYTES);
    assert_eq!(cfg.runtime.smart_drive_number, 0);
    Ok(())
}

#[test]
fn test_validation_errors() {
    assert!(Config::from_yaml("devices: []").is_err());

    let no_letter = r#"
devices:
  - Target: { Kind: LogicalDrive, Letter: "1:" }
"#;
    assert!(Config::from_yaml(no_letter).is_err());

    let empty_path = r#"
devices:
  - Target: { Kind: Path, Path: "" }
"#;
    assert!(Config::from_yaml(empty_path).is_err());

    let tiny_page = format!(
        r#"
devices:
  - Target: {{ Kind: PhysicalDrive, Index: 0 }}
runtime:
  BitmapPageBytes: {}
"#,
        MIN_BITMAP_PAGE_BYTES - 1
    );
    assert!(Config::from_yaml(&tiny_page).is_err());
}
