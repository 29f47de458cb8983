//! Control-code registry.
//!
//! A control code packs four fields:
//! `(device_type << 16) | (access << 14) | (function << 2) | method`.
//! Every code the crate sends is a named constant built with [`make_code`] or
//! [`make_code_with_method`] at compile time.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use bitflags::bitflags;

macro_rules! codes {
    ($($(#[$meta:meta])* $name:ident = $value:expr;)*) => {
        $(
            $(#[$meta])*
            pub const $name: u32 = $value;
        )*

        /// All codes of this category with their names.
        pub const ALL: &[(&str, u32)] = &[$((stringify!($name), $name)),*];
    };
}

/// `IOCTL_DISK_*` and `SMART_*` codes.
pub mod disc;
/// `FSCTL_*` codes.
pub mod fsctl;
/// `IOCTL_SCSI_*`, `IOCTL_IDE_*` and `IOCTL_ATA_*` codes.
pub mod scsi;
/// `IOCTL_STORAGE_*` codes.
pub mod storage;
/// `IOCTL_VOLUME_*` codes.
pub mod volume;

/// `FILE_DEVICE_*` values used as the device-type field.
pub mod device_type {
    pub const CONTROLLER: u16 = 0x0004;
    pub const DISK: u16 = 0x0007;
    pub const FILE_SYSTEM: u16 = 0x0009;
    pub const MASS_STORAGE: u16 = 0x002D;
    /// `'V'`
    pub const VOLUME: u16 = 0x0056;
}

/// Transfer method of a control code (`METHOD_*`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Buffered = 0,
    InDirect = 1,
    OutDirect = 2,
    Neither = 3,
}

bitflags! {
    /// Required access of a control code (`FILE_*_ACCESS`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileAccess: u8 {
        const ANY = 0;
        const READ = 1;
        const WRITE = 2;
    }
}

impl FileAccess {
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

/// Build a buffered control code.
#[inline]
pub const fn make_code(device_type: u16, function: u16, access: FileAccess) -> u32 {
    make_code_with_method(device_type, function, Method::Buffered, access)
}

#[inline]
pub const fn make_code_with_method(
    device_type: u16,
    function: u16,
    method: Method,
    access: FileAccess,
) -> u32 {
    ((device_type as u32) << 16)
        | ((access.bits() as u32) << 14)
        | (((function & 0x0FFF) as u32) << 2)
        | method as u32
}

/// Field view of a packed control code, mostly for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFields {
    pub device_type: u16,
    pub access: u8,
    pub function: u16,
    pub method: u8,
}

impl From<u32> for CodeFields {
    fn from(code: u32) -> Self {
        Self {
            device_type: (code >> 16) as u16,
            access: ((code >> 14) & 0x3) as u8,
            function: ((code >> 2) & 0x0FFF) as u16,
            method: (code & 0x3) as u8,
        }
    }
}

/// Every named code in the registry with its name.
pub fn all_codes() -> Vec<(&'static str, u32)> {
    let mut v = Vec::new();
    v.extend_from_slice(disc::ALL);
    v.extend_from_slice(storage::ALL);
    v.extend_from_slice(scsi::ALL);
    v.extend_from_slice(volume::ALL);
    v.extend_from_slice(fsctl::ALL);
    v
}

/// Name of a registered code, if any.
pub fn name_of(code: u32) -> Option<&'static str> {
    [disc::ALL, storage::ALL, scsi::ALL, volume::ALL, fsctl::ALL]
        .iter()
        .flat_map(|table| table.iter())
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}
