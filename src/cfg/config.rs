// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{
    cfg::enums::YesNo,
    device::{AccessMode, ShareMode, path},
    facade::filesystem::DEFAULT_BITMAP_PAGE_BYTES,
    models::{Decodable, fsctl::VolumeBitmapHeader},
};

/// Smallest bitmap page that still carries bitmap bytes after the header.
pub const MIN_BITMAP_PAGE_BYTES: usize = VolumeBitmapHeader::SIZE + 8;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Devices to open, in report order.
    pub devices: Vec<DeviceConfig>,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// One device and what to read from it.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeviceConfig {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Target")]
    pub target: Target,
    #[serde(rename = "Access", default)]
    pub access: AccessConfig,
    #[serde(rename = "Share", default)]
    pub share: ShareConfig,
    /// Empty means every report that applies to the target.
    #[serde(rename = "Reports", default)]
    pub reports: Vec<Report>,
}

/// Where a device lives in the device namespace.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "Kind")]
pub enum Target {
    PhysicalDrive {
        #[serde(rename = "Index")]
        index: u32,
    },
    LogicalDrive {
        #[serde(rename = "Letter")]
        letter: String,
    },
    ScsiPort {
        #[serde(rename = "Index")]
        index: u32,
    },
    #[serde(rename = "SMARTVSD", alias = "SmartVsd")]
    SmartVsd,
    /// Raw device path, used verbatim.
    Path {
        #[serde(rename = "Path")]
        path: String,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AccessConfig {
    #[serde(rename = "Read")]
    pub read: YesNo,
    #[serde(rename = "Write")]
    pub write: YesNo,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            read: YesNo::Yes,
            write: YesNo::Yes,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ShareConfig {
    #[serde(rename = "Read")]
    pub read: YesNo,
    #[serde(rename = "Write")]
    pub write: YesNo,
    #[serde(rename = "Delete", default)]
    pub delete: YesNo,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            read: YesNo::Yes,
            write: YesNo::Yes,
            delete: YesNo::No,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Geometry,
    Performance,
    Storage,
    Properties,
    Smart,
    Volume,
    FileSystem,
}

impl Report {
    pub const ALL: [Report; 7] = [
        Report::Geometry,
        Report::Performance,
        Report::Storage,
        Report::Properties,
        Report::Smart,
        Report::Volume,
        Report::FileSystem,
    ];
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RuntimeConfig {
    /// Output buffer size of one volume bitmap request, header included.
    #[serde(rename = "BitmapPageBytes", default = "default_bitmap_page")]
    pub bitmap_page_bytes: usize,
    /// Drive number placed in S.M.A.R.T. command blocks.
    #[serde(rename = "SmartDriveNumber", default)]
    pub smart_drive_number: u8,
}

fn default_bitmap_page() -> usize {
    DEFAULT_BITMAP_PAGE_BYTES
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bitmap_page_bytes: DEFAULT_BITMAP_PAGE_BYTES,
            smart_drive_number: 0,
        }
    }
}

impl Config {
    /// Load YAML from `path`, validate it and normalize derived fields.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        let mut cfg: Config = serde_yaml::from_str(s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    pub fn validate_and_normalize(&mut self) -> Result<()> {
        ensure!(!self.devices.is_empty(), "at least one device is required");

        for dev in &mut self.devices {
            match &mut dev.target {
                Target::LogicalDrive { letter } => {
                    let c = letter.chars().find(char::is_ascii_alphabetic);
                    let Some(c) = c else {
                        anyhow::bail!("drive letter {letter:?} contains no letter");
                    };
                    *letter = c.to_ascii_uppercase().to_string();
                },
                Target::Path { path } => {
                    ensure!(!path.is_empty(), "device path must not be empty");
                },
                _ => {},
            }
            if dev.name.is_empty() {
                dev.name = dev.target.path();
            }
            if dev.reports.is_empty() {
                dev.reports = Report::ALL.to_vec();
            }
        }

        ensure!(
            self.runtime.bitmap_page_bytes >= MIN_BITMAP_PAGE_BYTES,
            "BitmapPageBytes must be >= {MIN_BITMAP_PAGE_BYTES}"
        );
        Ok(())
    }
}

impl Target {
    pub fn path(&self) -> String {
        match self {
            Target::PhysicalDrive { index } => path::physical_drive(*index),
            Target::LogicalDrive { letter } => {
                path::logical_drive(letter).unwrap_or_else(|| letter.clone())
            },
            Target::ScsiPort { index } => path::scsi_port(*index),
            Target::SmartVsd => path::SMARTVSD.to_string(),
            Target::Path { path } => path.clone(),
        }
    }
}

impl DeviceConfig {
    pub fn access_mode(&self) -> AccessMode {
        let mut mode = AccessMode::QUERY;
        mode.set(AccessMode::READ, self.access.read.as_bool());
        mode.set(AccessMode::WRITE, self.access.write.as_bool());
        mode
    }

    pub fn share_mode(&self) -> ShareMode {
        let mut mode = ShareMode::empty();
        mode.set(ShareMode::READ, self.share.read.as_bool());
        mode.set(ShareMode::WRITE, self.share.write.as_bool());
        mode.set(ShareMode::DELETE, self.share.delete.as_bool());
        mode
    }

    #[inline]
    pub fn wants(&self, report: Report) -> bool {
        self.reports.contains(&report)
    }
}
