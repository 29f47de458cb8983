// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::iter::FusedIterator;

use once_cell::unsync::OnceCell;
use tracing::trace;
use zerocopy::IntoBytes;

use crate::{
    control_code::fsctl::{
        DISMOUNT_VOLUME, FILESYSTEM_GET_STATISTICS, FILESYSTEM_GET_STATISTICS_EX,
        GET_NTFS_VOLUME_DATA, GET_VOLUME_BITMAP, IS_VOLUME_MOUNTED, LOCK_VOLUME, UNLOCK_VOLUME,
    },
    device::{Device, DeviceBackend},
    error::{IoctlError, Result, os_error},
    facade::{completed, probe},
    models::{
        Decodable,
        fsctl::{
            FileSystemStatistics, FileSystemStatisticsEx, FileSystemStatisticsExHeader,
            FileSystemStatisticsHeader, NtfsStatistics, NtfsStatisticsEx, NtfsVolumeDataBuffer,
            StartingLcnInputBuffer, VolumeBitmapHeader, VolumeBitmapPage,
        },
    },
};

/// Default bitmap page: the header plus 4 KiB of bitmap.
pub const DEFAULT_BITMAP_PAGE_BYTES: usize = VolumeBitmapHeader::SIZE + 4096;

#[derive(Debug)]
pub struct FileSystem<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    ntfs: OnceCell<NtfsVolumeDataBuffer>,
}

impl<'d, B: DeviceBackend> FileSystem<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self {
            device,
            ntfs: OnceCell::new(),
        }
    }

    /// NTFS volume metadata. Cached.
    pub fn ntfs_volume_data(&self) -> Result<&NtfsVolumeDataBuffer> {
        self.ntfs
            .get_or_try_init(|| self.device.send_checked(GET_NTFS_VOLUME_DATA))
    }

    /// `false` when the volume is not ready; other errors propagate.
    pub fn is_volume_mounted(&self) -> Result<bool> {
        probe(self.device.control(IS_VOLUME_MOUNTED)?, os_error::NOT_READY)
    }

    /// Counters of the first processor. `MORE_DATA` is expected here: the
    /// driver has one record per processor and the buffer holds one.
    pub fn statistics(&self) -> Result<FileSystemStatistics> {
        let len = FileSystemStatisticsHeader::SIZE + NtfsStatistics::SIZE;
        let data = self.statistics_buffer(FILESYSTEM_GET_STATISTICS, len)?;
        FileSystemStatistics::parse(&data)
    }

    /// [`FileSystem::statistics`] with 64-bit counters.
    pub fn statistics_ex(&self) -> Result<FileSystemStatisticsEx> {
        let len = FileSystemStatisticsExHeader::SIZE + NtfsStatisticsEx::SIZE;
        let data = self.statistics_buffer(FILESYSTEM_GET_STATISTICS_EX, len)?;
        FileSystemStatisticsEx::parse(&data)
    }

    fn statistics_buffer(&self, code: u32, len: usize) -> Result<Vec<u8>> {
        let rsp = self.device.send_raw(code, None, len)?;
        match rsp.status {
            s if s.success || s.error == os_error::MORE_DATA => Ok(rsp.data),
            s => Err(IoctlError::Os { code: s.error }),
        }
    }

    /// One bitmap page starting at `lcn`, and whether more pages follow.
    pub fn bitmap_page(&self, lcn: u64, page_bytes: usize) -> Result<(VolumeBitmapPage, bool)> {
        let input = StartingLcnInputBuffer::new(lcn);
        let rsp = self
            .device
            .send_raw(GET_VOLUME_BITMAP, Some(input.as_bytes()), page_bytes)?;
        let more = match rsp.status {
            s if s.success => false,
            s if s.error == os_error::MORE_DATA => true,
            s => return Err(IoctlError::Os { code: s.error }),
        };
        let page = VolumeBitmapPage::parse(&rsp.data)?;
        trace!(
            path = self.device.path(),
            starting_lcn = page.starting_lcn,
            clusters = page.clusters(),
            more,
            "bitmap page"
        );
        Ok((page, more))
    }

    /// The whole allocation bitmap, page by page from cluster 0.
    ///
    /// The sequence ends after the first page the driver reports as
    /// complete, or after the first error. Restarting means calling this
    /// again.
    pub fn volume_bitmap(&self, page_bytes: usize) -> VolumeBitmap<'_, 'd, B> {
        VolumeBitmap {
            fs: self,
            page_bytes,
            next_lcn: Some(0),
        }
    }

    pub fn lock_volume(&self) -> Result<()> {
        completed(self.device.control(LOCK_VOLUME)?)
    }

    pub fn unlock_volume(&self) -> Result<()> {
        completed(self.device.control(UNLOCK_VOLUME)?)
    }

    pub fn dismount_volume(&self) -> Result<()> {
        completed(self.device.control(DISMOUNT_VOLUME)?)
    }
}

/// Lazy sequence of [`VolumeBitmapPage`]s. See [`FileSystem::volume_bitmap`].
#[derive(Debug)]
pub struct VolumeBitmap<'f, 'd, B: DeviceBackend> {
    fs: &'f FileSystem<'d, B>,
    page_bytes: usize,
    next_lcn: Option<u64>,
}

impl<B: DeviceBackend> Iterator for VolumeBitmap<'_, '_, B> {
    type Item = Result<VolumeBitmapPage>;

    fn next(&mut self) -> Option<Self::Item> {
        let lcn = self.next_lcn.take()?;
        let (page, more) = match self.fs.bitmap_page(lcn, self.page_bytes) {
            Ok(v) => v,
            Err(e) => return Some(Err(e)),
        };
        if more {
            // A page without bitmap bytes cannot advance the cursor.
            if page.bitmap.is_empty() {
                return Some(Err(IoctlError::Os {
                    code: os_error::INSUFFICIENT_BUFFER,
                }));
            }
            self.next_lcn = Some(page.next_lcn());
        }
        Some(Ok(page))
    }
}

impl<B: DeviceBackend> FusedIterator for VolumeBitmap<'_, '_, B> {}
