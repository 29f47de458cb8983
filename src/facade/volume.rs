// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::{
    control_code::volume::{GET_VOLUME_DISK_EXTENTS, IS_CLUSTERED},
    device::{Device, DeviceBackend},
    error::{IoctlError, Result, os_error},
    facade::probe,
    models::volume::VolumeDiskExtents,
};

#[derive(Debug)]
pub struct Volume<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    extents: OnceCell<VolumeDiskExtents>,
    clustered: OnceCell<bool>,
}

impl<'d, B: DeviceBackend> Volume<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self {
            device,
            extents: OnceCell::new(),
            clustered: OnceCell::new(),
        }
    }

    /// Disks and ranges backing the volume. Cached.
    ///
    /// The first request has room for one extent; a volume spanning more
    /// disks answers `MORE_DATA` with the real count, and the request is
    /// repeated once with a buffer of that size.
    pub fn disk_extents(&self) -> Result<&VolumeDiskExtents> {
        self.extents.get_or_try_init(|| {
            let rsp =
                self.device
                    .send_raw(GET_VOLUME_DISK_EXTENTS, None, VolumeDiskExtents::buffer_len(1))?;
            if rsp.status.success {
                return VolumeDiskExtents::parse(&rsp.data);
            }
            if rsp.status.error != os_error::MORE_DATA {
                return Err(IoctlError::Os {
                    code: rsp.status.error,
                });
            }

            let count = VolumeDiskExtents::reported_count(&rsp.data)?;
            debug!(path = self.device.path(), count, "retrying disk extents");
            let rsp = self.device.send_raw(
                GET_VOLUME_DISK_EXTENTS,
                None,
                VolumeDiskExtents::buffer_len(count),
            )?;
            if !rsp.status.success {
                return Err(IoctlError::Os {
                    code: rsp.status.error,
                });
            }
            VolumeDiskExtents::parse(&rsp.data)
        })
    }

    /// Cluster membership. A failure that leaves the error code at
    /// `NO_ERROR` means "not clustered". Cached.
    pub fn is_clustered(&self) -> Result<bool> {
        self.clustered
            .get_or_try_init(|| probe(self.device.control(IS_CLUSTERED)?, os_error::NO_ERROR))
            .copied()
    }
}
