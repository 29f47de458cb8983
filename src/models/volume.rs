// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{I64, LittleEndian, U32},
};

use crate::{
    buffer::BufferReader,
    error::Result,
    models::Decodable,
};

/// Header of `VOLUME_DISK_EXTENTS`; the extents array follows at offset 8.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct VolumeDiskExtentsHeader {
    pub number_of_disk_extents: U32<LittleEndian>,
    pub _pad0: [u8; 4],
}

/// `DISK_EXTENT`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskExtent {
    pub disk_number: U32<LittleEndian>,
    pub _pad0: [u8; 4],
    pub starting_offset: I64<LittleEndian>,
    pub extent_length: I64<LittleEndian>,
}

/// Decoded `VOLUME_DISK_EXTENTS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDiskExtents {
    pub extents: Vec<DiskExtent>,
}

impl VolumeDiskExtents {
    /// Buffer size that holds a header plus `count` extents.
    #[inline]
    pub fn buffer_len(count: usize) -> usize {
        VolumeDiskExtentsHeader::SIZE + count * DiskExtent::SIZE
    }

    /// Number of extents the driver reported, even when the buffer was too
    /// small to hold them.
    pub fn reported_count(buf: &[u8]) -> Result<usize> {
        let hdr: VolumeDiskExtentsHeader = BufferReader::new(buf).decode(0)?;
        Ok(hdr.number_of_disk_extents.get() as usize)
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let reader = BufferReader::new(buf);
        let mut cursor = 0usize;
        let hdr: VolumeDiskExtentsHeader = reader.decode_advancing(&mut cursor)?;
        let extents = (0..hdr.number_of_disk_extents.get())
            .map(|_| reader.decode_advancing::<DiskExtent>(&mut cursor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { extents })
    }

    /// Physical disk numbers backing the volume, in extent order.
    pub fn disk_numbers(&self) -> Vec<u32> {
        self.extents.iter().map(|e| e.disk_number.get()).collect()
    }
}

decodable! {
    VolumeDiskExtentsHeader => "VOLUME_DISK_EXTENTS",
    DiskExtent => "DISK_EXTENT",
}
