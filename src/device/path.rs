// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Legacy Windows 9x S.M.A.R.T. driver.
pub const SMARTVSD: &str = r"\\.\SMARTVSD";

const PHYSICAL_DRIVE_PREFIX: &str = r"\\.\PhysicalDrive";
const SCSI_PREFIX: &str = r"\\.\Scsi";
const NAMESPACE_PREFIX: &str = r"\\.\";

#[inline]
pub fn physical_drive(index: u32) -> String {
    format!("{PHYSICAL_DRIVE_PREFIX}{index}")
}

/// Volume path for the first alphabetic character of `name`, upper-cased.
/// `None` when `name` has no letter.
pub fn logical_drive(name: &str) -> Option<String> {
    let letter = name.chars().find(char::is_ascii_alphabetic)?;
    Some(format!("{NAMESPACE_PREFIX}{}:", letter.to_ascii_uppercase()))
}

#[inline]
pub fn scsi_port(port: u32) -> String {
    format!("{SCSI_PREFIX}{port}:")
}

/// What kind of object a device path names. Decides which façades apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    PhysicalDrive(u32),
    Volume(char),
    ScsiPort(u32),
    SmartVsd,
    Other,
}

impl DeviceKind {
    pub fn classify(path: &str) -> Self {
        if path.eq_ignore_ascii_case(SMARTVSD) {
            return DeviceKind::SmartVsd;
        }
        let Some(rest) = strip_prefix_ignore_case(path, NAMESPACE_PREFIX) else {
            return DeviceKind::Other;
        };

        if let Some(n) = strip_prefix_ignore_case(rest, "PhysicalDrive")
            .and_then(|n| n.parse().ok())
        {
            return DeviceKind::PhysicalDrive(n);
        }
        if let Some(n) = strip_prefix_ignore_case(rest, "Scsi")
            .and_then(|s| s.strip_suffix(':'))
            .and_then(|n| n.parse().ok())
        {
            return DeviceKind::ScsiPort(n);
        }

        let mut chars = rest.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(':'), None) if c.is_ascii_alphabetic() => {
                DeviceKind::Volume(c.to_ascii_uppercase())
            },
            _ => DeviceKind::Other,
        }
    }

    #[inline]
    pub fn is_volume(self) -> bool {
        matches!(self, DeviceKind::Volume(_))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
