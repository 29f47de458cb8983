// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;

use bitflags::bitflags;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{LittleEndian, U16, U32},
};

use crate::{
    buffer::BufferReader,
    error::Result,
    models::{Decodable, attribute_names::attribute_name},
    utils::swap_ata_string,
};

/// Size of the data area appended to [`SendCmdOutParams`].
pub const SMART_BUFFER_SIZE: usize = 1024;
/// Number of attribute (and threshold) records in a S.M.A.R.T. data sector.
pub const NUM_ATTRIBUTE_STRUCTS: usize = 30;
/// The data sector starts with a 2-byte revision number.
pub const SMART_DATA_OFFSET: usize = 2;

/// Cylinder register signature that selects the S.M.A.R.T. feature set.
pub const SMART_CYL_LOW: u8 = 0x4F;
pub const SMART_CYL_HI: u8 = 0xC2;
/// Cylinder registers returned by RETURN STATUS when a threshold is exceeded.
pub const SMART_CYL_LOW_EXCEEDED: u8 = 0xF4;
pub const SMART_CYL_HI_EXCEEDED: u8 = 0x2C;

/// ATA command register values.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeCommand {
    Identify = 0xEC,
    AtapiIdentify = 0xA1,
    Smart = 0xB0,
}

/// Feature register values of the S.M.A.R.T. command.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartFeature {
    ReadAttributes = 0xD0,
    ReadThresholds = 0xD1,
    EnableDisableAutosave = 0xD2,
    SaveAttributeValues = 0xD3,
    ExecuteOfflineDiags = 0xD4,
    ReadLog = 0xD5,
    WriteLog = 0xD6,
    Enable = 0xD8,
    Disable = 0xD9,
    ReturnStatus = 0xDA,
    EnableDisableAutoOffline = 0xDB,
}

/// Driver status byte reported in [`DriverStatus::driver_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDriverStatus {
    NoError,
    IdeError,
    InvalidFlag,
    InvalidCommand,
    InvalidBuffer,
    InvalidDrive,
    InvalidIoctl,
    NoMemory,
    InvalidRegister,
    NotSupported,
    NoDevice,
    Unknown(u8),
}

impl From<u8> for SmartDriverStatus {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::NoError,
            1 => Self::IdeError,
            2 => Self::InvalidFlag,
            3 => Self::InvalidCommand,
            4 => Self::InvalidBuffer,
            5 => Self::InvalidDrive,
            6 => Self::InvalidIoctl,
            7 => Self::NoMemory,
            8 => Self::InvalidRegister,
            9 => Self::NotSupported,
            10 => Self::NoDevice,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for SmartDriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoError => f.write_str("no error"),
            Self::IdeError => f.write_str("IDE error"),
            Self::InvalidFlag => f.write_str("invalid flag"),
            Self::InvalidCommand => f.write_str("invalid command"),
            Self::InvalidBuffer => f.write_str("invalid buffer"),
            Self::InvalidDrive => f.write_str("invalid drive"),
            Self::InvalidIoctl => f.write_str("invalid IOCTL"),
            Self::NoMemory => f.write_str("out of memory"),
            Self::InvalidRegister => f.write_str("invalid register"),
            Self::NotSupported => f.write_str("not supported"),
            Self::NoDevice => f.write_str("no IDE device"),
            Self::Unknown(v) => write!(f, "unknown status 0x{v:02x}"),
        }
    }
}

/// IDE task-file registers (`IDEREGS`).
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdeRegs {
    pub features: u8,
    pub sector_count: u8,
    pub sector_number: u8,
    pub cyl_low: u8,
    pub cyl_high: u8,
    pub drive_head: u8,
    pub command: u8,
    pub reserved: u8,
}

/// Input block of the SMART send/receive requests (`SENDCMDINPARAMS`,
/// byte-packed).
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct SendCmdInParams {
    pub buffer_size: U32<LittleEndian>,
    pub ide_regs: IdeRegs,
    pub drive_number: u8,
    pub reserved: [u8; 3],
    pub dw_reserved: [U32<LittleEndian>; 4],
    pub buffer: [u8; 1],
}

impl SendCmdInParams {
    fn base(drive_number: u8, ide_regs: IdeRegs) -> Self {
        Self {
            buffer_size: U32::new(SMART_BUFFER_SIZE as u32),
            ide_regs,
            drive_number,
            reserved: [0; 3],
            dw_reserved: [U32::ZERO; 4],
            buffer: [0],
        }
    }

    /// S.M.A.R.T. command with the given feature register.
    pub fn smart(feature: SmartFeature, drive_number: u8) -> Self {
        Self::base(
            drive_number,
            IdeRegs {
                features: feature as u8,
                sector_count: 1,
                sector_number: 1,
                cyl_low: SMART_CYL_LOW,
                cyl_high: SMART_CYL_HI,
                command: IdeCommand::Smart as u8,
                ..IdeRegs::default()
            },
        )
    }

    /// IDENTIFY DEVICE (or IDENTIFY PACKET DEVICE for ATAPI).
    pub fn identify(command: IdeCommand, drive_number: u8) -> Self {
        Self::base(
            drive_number,
            IdeRegs {
                sector_count: 1,
                sector_number: 1,
                command: command as u8,
                ..IdeRegs::default()
            },
        )
    }
}

/// `DRIVERSTATUS`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DriverStatus {
    pub driver_error: u8,
    pub ide_error: u8,
    pub reserved: [u8; 2],
    pub dw_reserved: [U32<LittleEndian>; 2],
}

impl DriverStatus {
    #[inline]
    pub fn status(&self) -> SmartDriverStatus {
        SmartDriverStatus::from(self.driver_error)
    }
}

/// Output block of the SMART send/receive requests (`SENDCMDOUTPARAMS`) with
/// a [`SMART_BUFFER_SIZE`] data area.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct SendCmdOutParams {
    pub buffer_size: U32<LittleEndian>,
    pub status: DriverStatus,
    pub buffer: [u8; SMART_BUFFER_SIZE],
}

impl fmt::Debug for SendCmdOutParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendCmdOutParams")
            .field("buffer_size", &self.buffer_size.get())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl SendCmdOutParams {
    /// Decode the [`NUM_ATTRIBUTE_STRUCTS`] records that follow the revision
    /// word of a S.M.A.R.T. data sector.
    pub fn records<T: Decodable>(&self) -> Result<Vec<T>> {
        let reader = BufferReader::new(&self.buffer);
        let mut cursor = SMART_DATA_OFFSET;
        (0..NUM_ATTRIBUTE_STRUCTS)
            .map(|_| reader.decode_advancing::<T>(&mut cursor))
            .collect()
    }

    /// Task-file registers echoed back by RETURN STATUS.
    pub fn returned_regs(&self) -> Result<IdeRegs> {
        BufferReader::new(&self.buffer).decode(0)
    }

    pub fn identify_sector(&self) -> Result<IdSector> {
        BufferReader::new(&self.buffer).decode(0)
    }
}

bitflags! {
    /// Attribute flags word of a S.M.A.R.T. attribute record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttributeStatusFlags: u16 {
        const PRE_FAILURE       = 0x0001;
        const ONLINE_COLLECTION = 0x0002;
        const PERFORMANCE       = 0x0004;
        const ERROR_RATE        = 0x0008;
        const EVENT_COUNT       = 0x0010;
        const SELF_PRESERVING   = 0x0020;
        const _ = !0;
    }
}

/// One 12-byte attribute record of the S.M.A.R.T. data sector.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveAttribute {
    pub id: u8,
    pub status_flags: U16<LittleEndian>,
    /// Normalized current value.
    pub value: u8,
    pub worst: u8,
    pub raw: [u8; 6],
    pub reserved: u8,
}

impl DriveAttribute {
    /// The 48-bit little-endian raw counter, zero-extended.
    #[inline]
    pub fn raw_value(&self) -> u64 {
        let mut le = [0u8; 8];
        le[..6].copy_from_slice(&self.raw);
        u64::from_le_bytes(le)
    }

    #[inline]
    pub fn flags(&self) -> AttributeStatusFlags {
        AttributeStatusFlags::from_bits_retain(self.status_flags.get())
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        attribute_name(self.id)
    }
}

/// One 12-byte threshold record of the S.M.A.R.T. threshold sector.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrThreshold {
    pub id: u8,
    /// Warranty threshold for the normalized value.
    pub threshold: u8,
    pub reserved: [u8; 10],
}

impl AttrThreshold {
    #[inline]
    pub fn name(&self) -> &'static str {
        attribute_name(self.id)
    }
}

bitflags! {
    /// `GETVERSIONINPARAMS.fCapabilities`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SmartCapabilities: u32 {
        const ATA_ID_CMD   = 0x1;
        const ATAPI_ID_CMD = 0x2;
        const SMART_CMD    = 0x4;
        const _ = !0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeDeviceKind {
    Ata,
    Atapi,
}

/// One device reported in the IDE device map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeDevice {
    pub kind: IdeDeviceKind,
    pub primary_channel: bool,
    pub master: bool,
}

/// Response of the SMART version request (`GETVERSIONINPARAMS`).
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetVersionOutParams {
    pub version: u8,
    pub revision: u8,
    pub reserved: u8,
    /// Bits 0..3 flag ATA devices 0..3, bits 4..7 flag ATAPI devices 0..3.
    pub ide_device_map: u8,
    pub capabilities: U32<LittleEndian>,
    pub dw_reserved: [U32<LittleEndian>; 4],
}

impl GetVersionOutParams {
    #[inline]
    pub fn capabilities(&self) -> SmartCapabilities {
        SmartCapabilities::from_bits_retain(self.capabilities.get())
    }

    /// An all-zero response means the driver did not fill the block.
    pub fn is_zeroed(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// Device `index` (0..=3) from the device map, if present.
    pub fn ide_device(&self, index: u8) -> Option<IdeDevice> {
        if index > 3 {
            return None;
        }
        let kind = if self.ide_device_map & (1 << index) != 0 {
            IdeDeviceKind::Ata
        } else if self.ide_device_map & (1 << (index + 4)) != 0 {
            IdeDeviceKind::Atapi
        } else {
            return None;
        };
        Some(IdeDevice {
            kind,
            primary_channel: index < 2,
            master: index % 2 == 0,
        })
    }
}

/// IDENTIFY DEVICE data (`IDSECTOR`, 256 bytes).
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct IdSector {
    pub gen_config: U16<LittleEndian>,
    pub num_cyls: U16<LittleEndian>,
    pub reserved: U16<LittleEndian>,
    pub num_heads: U16<LittleEndian>,
    pub bytes_per_track: U16<LittleEndian>,
    pub bytes_per_sector: U16<LittleEndian>,
    pub sectors_per_track: U16<LittleEndian>,
    pub vendor_unique: [U16<LittleEndian>; 3],
    pub serial_number: [u8; 20],
    pub buffer_type: U16<LittleEndian>,
    pub buffer_size: U16<LittleEndian>,
    pub ecc_size: U16<LittleEndian>,
    pub firmware_rev: [u8; 8],
    pub model_number: [u8; 40],
    pub more_vendor_unique: U16<LittleEndian>,
    pub double_word_io: U16<LittleEndian>,
    pub capabilities: U16<LittleEndian>,
    pub reserved1: U16<LittleEndian>,
    pub pio_timing: U16<LittleEndian>,
    pub dma_timing: U16<LittleEndian>,
    pub bs: U16<LittleEndian>,
    pub num_current_cyls: U16<LittleEndian>,
    pub num_current_heads: U16<LittleEndian>,
    pub num_current_sectors_per_track: U16<LittleEndian>,
    pub current_sector_capacity: U32<LittleEndian>,
    pub mult_sector_stuff: U16<LittleEndian>,
    pub total_addressable_sectors: U32<LittleEndian>,
    pub single_word_dma: U16<LittleEndian>,
    pub multi_word_dma: U16<LittleEndian>,
    pub reserved2: [u8; 128],
}

impl IdSector {
    pub fn model(&self) -> String {
        swap_ata_string(&self.model_number)
    }

    pub fn serial(&self) -> String {
        swap_ata_string(&self.serial_number)
    }

    pub fn firmware(&self) -> String {
        swap_ata_string(&self.firmware_rev)
    }

    /// Capacity addressable through 28-bit LBA, in bytes.
    pub fn capacity_bytes(&self) -> u64 {
        self.total_addressable_sectors.get() as u64 * 512
    }
}

impl fmt::Debug for IdSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdSector")
            .field("model", &self.model())
            .field("serial", &self.serial())
            .field("firmware", &self.firmware())
            .field("sectors", &self.total_addressable_sectors.get())
            .finish()
    }
}

/// Overall health verdict reported by RETURN STATUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartHealth {
    Healthy,
    ThresholdExceeded,
    Unknown { cyl_low: u8, cyl_high: u8 },
}

impl From<&IdeRegs> for SmartHealth {
    fn from(regs: &IdeRegs) -> Self {
        match (regs.cyl_low, regs.cyl_high) {
            (SMART_CYL_LOW, SMART_CYL_HI) => Self::Healthy,
            (SMART_CYL_LOW_EXCEEDED, SMART_CYL_HI_EXCEEDED) => Self::ThresholdExceeded,
            (cyl_low, cyl_high) => Self::Unknown { cyl_low, cyl_high },
        }
    }
}

decodable! {
    IdeRegs => "IDEREGS",
    SendCmdInParams => "SENDCMDINPARAMS",
    DriverStatus => "DRIVERSTATUS",
    SendCmdOutParams => "SENDCMDOUTPARAMS",
    DriveAttribute => "DRIVEATTRIBUTE",
    AttrThreshold => "ATTRTHRESHOLD",
    GetVersionOutParams => "GETVERSIONINPARAMS",
    IdSector => "IDSECTOR",
}
