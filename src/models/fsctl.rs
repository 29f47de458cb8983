// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{I64, LittleEndian, U16, U32, U64},
};

use crate::{
    buffer::BufferReader,
    error::Result,
    models::Decodable,
};

/// `NTFS_VOLUME_DATA_BUFFER`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct NtfsVolumeDataBuffer {
    pub volume_serial_number: I64<LittleEndian>,
    pub number_sectors: I64<LittleEndian>,
    pub total_clusters: I64<LittleEndian>,
    pub free_clusters: I64<LittleEndian>,
    pub total_reserved: I64<LittleEndian>,
    pub bytes_per_sector: U32<LittleEndian>,
    pub bytes_per_cluster: U32<LittleEndian>,
    pub bytes_per_file_record_segment: U32<LittleEndian>,
    pub clusters_per_file_record_segment: U32<LittleEndian>,
    pub mft_valid_data_length: I64<LittleEndian>,
    pub mft_start_lcn: I64<LittleEndian>,
    pub mft2_start_lcn: I64<LittleEndian>,
    pub mft_zone_start: I64<LittleEndian>,
    pub mft_zone_end: I64<LittleEndian>,
}

impl NtfsVolumeDataBuffer {
    pub fn free_bytes(&self) -> u64 {
        self.free_clusters.get().max(0) as u64 * self.bytes_per_cluster.get() as u64
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_clusters.get().max(0) as u64 * self.bytes_per_cluster.get() as u64
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Volume bitmap

/// `STARTING_LCN_INPUT_BUFFER`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StartingLcnInputBuffer {
    pub starting_lcn: I64<LittleEndian>,
}

impl StartingLcnInputBuffer {
    pub fn new(lcn: u64) -> Self {
        Self {
            starting_lcn: I64::new(lcn as i64),
        }
    }
}

/// Fixed part of `VOLUME_BITMAP_BUFFER`; the bitmap bytes follow.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct VolumeBitmapHeader {
    pub starting_lcn: I64<LittleEndian>,
    /// Number of clusters from `starting_lcn` to the end of the volume.
    pub bitmap_size: I64<LittleEndian>,
}

/// One page of the volume allocation bitmap. Bit `n` describes cluster
/// `starting_lcn + n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBitmapPage {
    pub starting_lcn: u64,
    pub bitmap_size: u64,
    pub bitmap: Vec<u8>,
}

impl VolumeBitmapPage {
    /// Decode a page from the bytes the driver actually returned.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let reader = BufferReader::new(buf);
        let hdr: VolumeBitmapHeader = reader.decode(0)?;
        let tail = reader.bytes(
            VolumeBitmapHeader::SIZE,
            buf.len() - VolumeBitmapHeader::SIZE,
        )?;
        let bitmap_size = hdr.bitmap_size.get().max(0) as u64;
        // The last page may carry padding bits past the end of the volume.
        let meaningful = bitmap_size.div_ceil(8).min(tail.len() as u64) as usize;
        Ok(Self {
            starting_lcn: hdr.starting_lcn.get().max(0) as u64,
            bitmap_size,
            bitmap: tail[..meaningful].to_vec(),
        })
    }

    /// Clusters described by this page.
    #[inline]
    pub fn clusters(&self) -> u64 {
        (self.bitmap.len() as u64 * 8).min(self.bitmap_size)
    }

    /// First cluster not described by this page.
    #[inline]
    pub fn next_lcn(&self) -> u64 {
        self.starting_lcn + self.bitmap.len() as u64 * 8
    }

    /// Allocation state of cluster `lcn`, if the page covers it.
    pub fn is_allocated(&self, lcn: u64) -> Option<bool> {
        let rel = lcn.checked_sub(self.starting_lcn)?;
        if rel >= self.clusters() {
            return None;
        }
        let byte = self.bitmap[(rel / 8) as usize];
        Some(byte & (1 << (rel % 8)) != 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-system statistics

/// `FILESYSTEM_STATISTICS_TYPE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSystemType {
    Ntfs,
    Fat,
    ExFat,
    ReFs,
    Other(u16),
}

impl From<u16> for FileSystemType {
    fn from(v: u16) -> Self {
        match v {
            1 => Self::Ntfs,
            2 => Self::Fat,
            3 => Self::ExFat,
            4 => Self::ReFs,
            other => Self::Other(other),
        }
    }
}

/// `FILESYSTEM_STATISTICS`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct FileSystemStatisticsHeader {
    pub file_system_type: U16<LittleEndian>,
    pub version: U16<LittleEndian>,
    pub size_of_complete_structure: U32<LittleEndian>,
    pub user_file_reads: U32<LittleEndian>,
    pub user_file_read_bytes: U32<LittleEndian>,
    pub user_disk_reads: U32<LittleEndian>,
    pub user_file_writes: U32<LittleEndian>,
    pub user_file_write_bytes: U32<LittleEndian>,
    pub user_disk_writes: U32<LittleEndian>,
    pub meta_data_reads: U32<LittleEndian>,
    pub meta_data_read_bytes: U32<LittleEndian>,
    pub meta_data_disk_reads: U32<LittleEndian>,
    pub meta_data_writes: U32<LittleEndian>,
    pub meta_data_write_bytes: U32<LittleEndian>,
    pub meta_data_disk_writes: U32<LittleEndian>,
}

/// `FILESYSTEM_STATISTICS_EX`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct FileSystemStatisticsExHeader {
    pub file_system_type: U16<LittleEndian>,
    pub version: U16<LittleEndian>,
    pub size_of_complete_structure: U32<LittleEndian>,
    pub user_file_reads: U64<LittleEndian>,
    pub user_file_read_bytes: U64<LittleEndian>,
    pub user_disk_reads: U64<LittleEndian>,
    pub user_file_writes: U64<LittleEndian>,
    pub user_file_write_bytes: U64<LittleEndian>,
    pub user_disk_writes: U64<LittleEndian>,
    pub meta_data_reads: U64<LittleEndian>,
    pub meta_data_read_bytes: U64<LittleEndian>,
    pub meta_data_disk_reads: U64<LittleEndian>,
    pub meta_data_writes: U64<LittleEndian>,
    pub meta_data_write_bytes: U64<LittleEndian>,
    pub meta_data_disk_writes: U64<LittleEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct UserLevelWrites {
    pub write: U16<LittleEndian>,
    pub create: U16<LittleEndian>,
    pub set_info: U16<LittleEndian>,
    pub flush: U16<LittleEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct BitmapUserLevelWrites {
    pub write: U16<LittleEndian>,
    pub create: U16<LittleEndian>,
    pub set_info: U16<LittleEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct NtfsAllocate {
    pub calls: U32<LittleEndian>,
    pub clusters: U32<LittleEndian>,
    pub hints: U32<LittleEndian>,
    pub runs_returned: U32<LittleEndian>,
    pub hints_honored: U32<LittleEndian>,
    pub hints_clusters: U32<LittleEndian>,
    pub cache: U32<LittleEndian>,
    pub cache_clusters: U32<LittleEndian>,
    pub cache_miss: U32<LittleEndian>,
    pub cache_miss_clusters: U32<LittleEndian>,
}

/// `NTFS_STATISTICS`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct NtfsStatistics {
    pub log_file_full_exceptions: U32<LittleEndian>,
    pub other_exceptions: U32<LittleEndian>,
    pub mft_reads: U32<LittleEndian>,
    pub mft_read_bytes: U32<LittleEndian>,
    pub mft_writes: U32<LittleEndian>,
    pub mft_write_bytes: U32<LittleEndian>,
    pub mft_writes_user_level: UserLevelWrites,
    pub mft_writes_flush_for_log_file_full: U16<LittleEndian>,
    pub mft_writes_lazy_writer: U16<LittleEndian>,
    pub mft_writes_user_request: U16<LittleEndian>,
    pub _pad0: [u8; 2],
    pub mft2_writes: U32<LittleEndian>,
    pub mft2_write_bytes: U32<LittleEndian>,
    pub mft2_writes_user_level: UserLevelWrites,
    pub mft2_writes_flush_for_log_file_full: U16<LittleEndian>,
    pub mft2_writes_lazy_writer: U16<LittleEndian>,
    pub mft2_writes_user_request: U16<LittleEndian>,
    pub _pad1: [u8; 2],
    pub root_index_reads: U32<LittleEndian>,
    pub root_index_read_bytes: U32<LittleEndian>,
    pub root_index_writes: U32<LittleEndian>,
    pub root_index_write_bytes: U32<LittleEndian>,
    pub bitmap_reads: U32<LittleEndian>,
    pub bitmap_read_bytes: U32<LittleEndian>,
    pub bitmap_writes: U32<LittleEndian>,
    pub bitmap_write_bytes: U32<LittleEndian>,
    pub bitmap_writes_flush_for_log_file_full: U16<LittleEndian>,
    pub bitmap_writes_lazy_writer: U16<LittleEndian>,
    pub bitmap_writes_user_request: U16<LittleEndian>,
    pub bitmap_writes_user_level: BitmapUserLevelWrites,
    pub mft_bitmap_reads: U32<LittleEndian>,
    pub mft_bitmap_read_bytes: U32<LittleEndian>,
    pub mft_bitmap_writes: U32<LittleEndian>,
    pub mft_bitmap_write_bytes: U32<LittleEndian>,
    pub mft_bitmap_writes_flush_for_log_file_full: U16<LittleEndian>,
    pub mft_bitmap_writes_lazy_writer: U16<LittleEndian>,
    pub mft_bitmap_writes_user_request: U16<LittleEndian>,
    pub mft_bitmap_writes_user_level: UserLevelWrites,
    pub _pad2: [u8; 2],
    pub user_index_reads: U32<LittleEndian>,
    pub user_index_read_bytes: U32<LittleEndian>,
    pub user_index_writes: U32<LittleEndian>,
    pub user_index_write_bytes: U32<LittleEndian>,
    pub log_file_reads: U32<LittleEndian>,
    pub log_file_read_bytes: U32<LittleEndian>,
    pub log_file_writes: U32<LittleEndian>,
    pub log_file_write_bytes: U32<LittleEndian>,
    pub allocate: NtfsAllocate,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct UserLevelWritesEx {
    pub write: U32<LittleEndian>,
    pub create: U32<LittleEndian>,
    pub set_info: U32<LittleEndian>,
    pub flush: U32<LittleEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct BitmapUserLevelWritesEx {
    pub write: U32<LittleEndian>,
    pub create: U32<LittleEndian>,
    pub set_info: U32<LittleEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct NtfsAllocateEx {
    pub calls: U32<LittleEndian>,
    pub runs_returned: U32<LittleEndian>,
    pub hints: U32<LittleEndian>,
    pub hints_honored: U32<LittleEndian>,
    pub cache: U32<LittleEndian>,
    pub cache_miss: U32<LittleEndian>,
    pub clusters: U64<LittleEndian>,
    pub hints_clusters: U64<LittleEndian>,
    pub cache_clusters: U64<LittleEndian>,
    pub cache_miss_clusters: U64<LittleEndian>,
}

/// `NTFS_STATISTICS_EX`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct NtfsStatisticsEx {
    pub log_file_full_exceptions: U32<LittleEndian>,
    pub other_exceptions: U32<LittleEndian>,
    pub mft_reads: U64<LittleEndian>,
    pub mft_read_bytes: U64<LittleEndian>,
    pub mft_writes: U64<LittleEndian>,
    pub mft_write_bytes: U64<LittleEndian>,
    pub mft_writes_user_level: UserLevelWritesEx,
    pub mft_writes_flush_for_log_file_full: U32<LittleEndian>,
    pub mft_writes_lazy_writer: U32<LittleEndian>,
    pub mft_writes_user_request: U32<LittleEndian>,
    pub _pad0: [u8; 4],
    pub mft2_writes: U64<LittleEndian>,
    pub mft2_write_bytes: U64<LittleEndian>,
    pub mft2_writes_user_level: UserLevelWritesEx,
    pub mft2_writes_flush_for_log_file_full: U32<LittleEndian>,
    pub mft2_writes_lazy_writer: U32<LittleEndian>,
    pub mft2_writes_user_request: U32<LittleEndian>,
    pub _pad1: [u8; 4],
    pub root_index_reads: U64<LittleEndian>,
    pub root_index_read_bytes: U64<LittleEndian>,
    pub root_index_writes: U64<LittleEndian>,
    pub root_index_write_bytes: U64<LittleEndian>,
    pub bitmap_reads: U64<LittleEndian>,
    pub bitmap_read_bytes: U64<LittleEndian>,
    pub bitmap_writes: U64<LittleEndian>,
    pub bitmap_write_bytes: U64<LittleEndian>,
    pub bitmap_writes_flush_for_log_file_full: U32<LittleEndian>,
    pub bitmap_writes_lazy_writer: U32<LittleEndian>,
    pub bitmap_writes_user_request: U32<LittleEndian>,
    pub bitmap_writes_user_level: BitmapUserLevelWritesEx,
    pub mft_bitmap_reads: U64<LittleEndian>,
    pub mft_bitmap_read_bytes: U64<LittleEndian>,
    pub mft_bitmap_writes: U64<LittleEndian>,
    pub mft_bitmap_write_bytes: U64<LittleEndian>,
    pub mft_bitmap_writes_flush_for_log_file_full: U32<LittleEndian>,
    pub mft_bitmap_writes_lazy_writer: U32<LittleEndian>,
    pub mft_bitmap_writes_user_request: U32<LittleEndian>,
    pub mft_bitmap_writes_user_level: UserLevelWritesEx,
    pub _pad2: [u8; 4],
    pub user_index_reads: U64<LittleEndian>,
    pub user_index_read_bytes: U64<LittleEndian>,
    pub user_index_writes: U64<LittleEndian>,
    pub user_index_write_bytes: U64<LittleEndian>,
    pub log_file_reads: U64<LittleEndian>,
    pub log_file_read_bytes: U64<LittleEndian>,
    pub log_file_writes: U64<LittleEndian>,
    pub log_file_write_bytes: U64<LittleEndian>,
    pub allocate: NtfsAllocateEx,
    pub disk_resources_exhausted: U32<LittleEndian>,
    pub _pad3: [u8; 4],
    pub volume_trim_count: U64<LittleEndian>,
    pub volume_trim_time: U64<LittleEndian>,
    pub volume_trim_byte_count: U64<LittleEndian>,
    pub file_level_trim_count: U64<LittleEndian>,
    pub file_level_trim_time: U64<LittleEndian>,
    pub file_level_trim_byte_count: U64<LittleEndian>,
    pub volume_trim_skipped_count: U64<LittleEndian>,
    pub volume_trim_skipped_byte_count: U64<LittleEndian>,
    pub fill_stat_info_from_mft_record_called_count: U64<LittleEndian>,
    pub fill_stat_info_bailed_attribute_list_count: U64<LittleEndian>,
    pub fill_stat_info_bailed_non_res_reparse_point_count: U64<LittleEndian>,
}

/// `FAT_STATISTICS`; `EXFAT_STATISTICS` has the same layout.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct FatStatistics {
    pub create_hits: U32<LittleEndian>,
    pub successful_create_hits: U32<LittleEndian>,
    pub failed_create_hits: U32<LittleEndian>,
    pub non_cached_reads: U32<LittleEndian>,
    pub non_cached_read_bytes: U32<LittleEndian>,
    pub non_cached_writes: U32<LittleEndian>,
    pub non_cached_write_bytes: U32<LittleEndian>,
    pub non_cached_disk_reads: U32<LittleEndian>,
    pub non_cached_disk_writes: U32<LittleEndian>,
}

/// File-system specific part of a statistics record, selected by its type
/// tag.
#[derive(Debug, Clone)]
pub enum FsSpecificStatistics<N> {
    Ntfs(Box<N>),
    Fat(FatStatistics),
    ExFat(FatStatistics),
    /// The type has no sub-structure this crate decodes.
    Other(FileSystemType),
}

/// First per-processor record of `FSCTL_FILESYSTEM_GET_STATISTICS`.
#[derive(Debug, Clone)]
pub struct FileSystemStatistics {
    pub common: FileSystemStatisticsHeader,
    pub specific: FsSpecificStatistics<NtfsStatistics>,
}

/// First per-processor record of `FSCTL_FILESYSTEM_GET_STATISTICS_EX`.
#[derive(Debug, Clone)]
pub struct FileSystemStatisticsEx {
    pub common: FileSystemStatisticsExHeader,
    pub specific: FsSpecificStatistics<NtfsStatisticsEx>,
}

fn parse_specific<N: Decodable>(
    reader: &BufferReader<'_>,
    kind: FileSystemType,
    offset: usize,
) -> Result<FsSpecificStatistics<N>> {
    Ok(match kind {
        FileSystemType::Ntfs => FsSpecificStatistics::Ntfs(Box::new(reader.decode(offset)?)),
        FileSystemType::Fat => FsSpecificStatistics::Fat(reader.decode(offset)?),
        FileSystemType::ExFat => FsSpecificStatistics::ExFat(reader.decode(offset)?),
        other => FsSpecificStatistics::Other(other),
    })
}

impl FileSystemStatistics {
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let reader = BufferReader::new(buf);
        let common: FileSystemStatisticsHeader = reader.decode(0)?;
        let kind = FileSystemType::from(common.file_system_type.get());
        let specific = parse_specific(&reader, kind, FileSystemStatisticsHeader::SIZE)?;
        Ok(Self { common, specific })
    }

    #[inline]
    pub fn file_system_type(&self) -> FileSystemType {
        FileSystemType::from(self.common.file_system_type.get())
    }
}

impl FileSystemStatisticsEx {
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let reader = BufferReader::new(buf);
        let common: FileSystemStatisticsExHeader = reader.decode(0)?;
        let kind = FileSystemType::from(common.file_system_type.get());
        let specific = parse_specific(&reader, kind, FileSystemStatisticsExHeader::SIZE)?;
        Ok(Self { common, specific })
    }

    #[inline]
    pub fn file_system_type(&self) -> FileSystemType {
        FileSystemType::from(self.common.file_system_type.get())
    }
}

decodable! {
    NtfsVolumeDataBuffer => "NTFS_VOLUME_DATA_BUFFER",
    StartingLcnInputBuffer => "STARTING_LCN_INPUT_BUFFER",
    VolumeBitmapHeader => "VOLUME_BITMAP_BUFFER",
    FileSystemStatisticsHeader => "FILESYSTEM_STATISTICS",
    FileSystemStatisticsExHeader => "FILESYSTEM_STATISTICS_EX",
    NtfsStatistics => "NTFS_STATISTICS",
    NtfsStatisticsEx => "NTFS_STATISTICS_EX",
    FatStatistics => "FAT_STATISTICS",
}
