// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{I64, LittleEndian, U16, U32, U64},
};

use crate::{
    buffer::{BufferReader, StringEncoding},
    error::Result,
};

/// Room reserved behind `DISK_GEOMETRY_EX` for the partition and detection
/// blocks.
pub const GEOMETRY_EX_DATA_SIZE: usize = 1024;

/// `MEDIA_TYPE` of a disk geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Unknown,
    RemovableMedia,
    FixedMedia,
    /// One of the legacy floppy formats (`F5_1Pt2_512` and friends).
    Floppy(u32),
    Other(u32),
}

impl From<u32> for MediaType {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Unknown,
            11 => Self::RemovableMedia,
            12 => Self::FixedMedia,
            1..=10 | 13..=25 => Self::Floppy(v),
            other => Self::Other(other),
        }
    }
}

/// `DISK_GEOMETRY`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskGeometry {
    pub cylinders: I64<LittleEndian>,
    pub media_type: U32<LittleEndian>,
    pub tracks_per_cylinder: U32<LittleEndian>,
    pub sectors_per_track: U32<LittleEndian>,
    pub bytes_per_sector: U32<LittleEndian>,
}

impl DiskGeometry {
    #[inline]
    pub fn media_type(&self) -> MediaType {
        MediaType::from(self.media_type.get())
    }

    /// Size implied by the CHS geometry. Usually a little less than the real
    /// disk size.
    pub fn chs_bytes(&self) -> u64 {
        (self.cylinders.get().max(0) as u64)
            * self.tracks_per_cylinder.get() as u64
            * self.sectors_per_track.get() as u64
            * self.bytes_per_sector.get() as u64
    }
}

/// `DISK_GEOMETRY_EX` followed by its variable data area.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct DiskGeometryEx {
    pub geometry: DiskGeometry,
    pub disk_size: I64<LittleEndian>,
    pub data: [u8; GEOMETRY_EX_DATA_SIZE],
}

impl core::fmt::Debug for DiskGeometryEx {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DiskGeometryEx")
            .field("geometry", &self.geometry)
            .field("disk_size", &self.disk_size.get())
            .finish_non_exhaustive()
    }
}

impl DiskGeometryEx {
    pub fn partition_info(&self) -> Result<DiskPartitionInfo> {
        BufferReader::new(&self.data).decode(0)
    }

    /// Detection block, placed right after the partition block.
    pub fn detection_info(&self) -> Result<DetectionInfo> {
        let partition = self.partition_info()?;
        let reader = BufferReader::new(&self.data);
        let raw: DiskDetectionInfo =
            reader.decode(partition.size_of_partition_info.get() as usize)?;
        raw.decode()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStyle {
    Mbr,
    Gpt,
    Raw,
    Unknown(u32),
}

impl From<u32> for PartitionStyle {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Mbr,
            1 => Self::Gpt,
            2 => Self::Raw,
            other => Self::Unknown(other),
        }
    }
}

/// `DISK_PARTITION_INFO`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskPartitionInfo {
    pub size_of_partition_info: U32<LittleEndian>,
    pub partition_style: U32<LittleEndian>,
    /// MBR `{Signature, CheckSum}` or GPT `DiskId`.
    pub layout: [u8; 16],
}

/// Style-specific part of [`DiskPartitionInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionLayout {
    Mbr { signature: u32, checksum: u32 },
    Gpt { disk_id: [u8; 16] },
    Raw,
    Unknown(u32),
}

impl DiskPartitionInfo {
    #[inline]
    pub fn style(&self) -> PartitionStyle {
        PartitionStyle::from(self.partition_style.get())
    }

    pub fn layout(&self) -> PartitionLayout {
        let word = |i: usize| {
            u32::from_le_bytes([
                self.layout[i],
                self.layout[i + 1],
                self.layout[i + 2],
                self.layout[i + 3],
            ])
        };
        match self.style() {
            PartitionStyle::Mbr => PartitionLayout::Mbr {
                signature: word(0),
                checksum: word(4),
            },
            PartitionStyle::Gpt => PartitionLayout::Gpt {
                disk_id: self.layout,
            },
            PartitionStyle::Raw => PartitionLayout::Raw,
            PartitionStyle::Unknown(v) => PartitionLayout::Unknown(v),
        }
    }
}

/// `DISK_DETECTION_INFO` with its union left undecoded.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskDetectionInfo {
    pub size_of_detect_info: U32<LittleEndian>,
    pub detection_type: U32<LittleEndian>,
    pub info: [u8; 32],
}

/// `DISK_INT13_INFO`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskInt13Info {
    pub drive_select: U16<LittleEndian>,
    pub _pad0: [u8; 2],
    pub max_cylinders: U32<LittleEndian>,
    pub sectors_per_track: U16<LittleEndian>,
    pub max_heads: U16<LittleEndian>,
    pub number_drives: U16<LittleEndian>,
    pub _pad1: [u8; 2],
}

/// `DISK_EX_INT13_INFO`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskExInt13Info {
    pub buffer_size: U16<LittleEndian>,
    pub flags: U16<LittleEndian>,
    pub cylinders: U32<LittleEndian>,
    pub heads: U32<LittleEndian>,
    pub sectors_per_track: U32<LittleEndian>,
    pub sectors_per_drive: U64<LittleEndian>,
    pub sector_size: U16<LittleEndian>,
    pub reserved: U16<LittleEndian>,
    pub _pad0: [u8; 4],
}

/// How the BIOS detected the disk.
#[derive(Debug, Clone, Copy)]
pub enum DetectionInfo {
    None,
    Int13(DiskInt13Info),
    ExInt13(DiskExInt13Info),
    Unknown(u32),
}

impl DiskDetectionInfo {
    pub fn decode(&self) -> Result<DetectionInfo> {
        let reader = BufferReader::new(&self.info);
        Ok(match self.detection_type.get() {
            0 => DetectionInfo::None,
            1 => DetectionInfo::Int13(reader.decode(0)?),
            2 => DetectionInfo::ExInt13(reader.decode(0)?),
            other => DetectionInfo::Unknown(other),
        })
    }
}

/// `DISK_PERFORMANCE`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskPerformance {
    pub bytes_read: I64<LittleEndian>,
    pub bytes_written: I64<LittleEndian>,
    pub read_time: I64<LittleEndian>,
    pub write_time: I64<LittleEndian>,
    pub idle_time: I64<LittleEndian>,
    pub read_count: U32<LittleEndian>,
    pub write_count: U32<LittleEndian>,
    pub queue_depth: U32<LittleEndian>,
    pub split_count: U32<LittleEndian>,
    pub query_time: I64<LittleEndian>,
    pub storage_device_number: U32<LittleEndian>,
    /// `WCHAR[8]`
    pub storage_manager_name: [u8; 16],
    pub _pad0: [u8; 4],
}

impl DiskPerformance {
    /// Name of the driver that collected the counters, e.g. `PartMgr`.
    pub fn storage_manager_name(&self) -> Result<String> {
        BufferReader::new(&self.storage_manager_name).decode_fixed_string(
            0,
            8,
            StringEncoding::Utf16,
        )
    }
}

decodable! {
    DiskGeometry => "DISK_GEOMETRY",
    DiskGeometryEx => "DISK_GEOMETRY_EX",
    DiskPartitionInfo => "DISK_PARTITION_INFO",
    DiskDetectionInfo => "DISK_DETECTION_INFO",
    DiskInt13Info => "DISK_INT13_INFO",
    DiskExInt13Info => "DISK_EX_INT13_INFO",
    DiskPerformance => "DISK_PERFORMANCE",
}
