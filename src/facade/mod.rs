//! Property accessors grouped by device category.
//!
//! Each façade borrows an open [`Device`] and maps its getters onto single
//! control codes. Static properties are cached per façade instance.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    device::{Device, DeviceBackend, IoStatus},
    error::{IoctlError, Result},
};

/// Geometry, writability, S.M.A.R.T. and performance counters of a disk.
pub mod disc;
/// Mount state, statistics, allocation bitmap and locking of a volume.
pub mod filesystem;
/// Disk performance counter session.
pub mod performance;
/// Existence-probed storage property descriptors.
pub mod properties;
/// Media, capacity and failure prediction of a storage device.
pub mod storage;
/// Disk extents and cluster membership of a volume.
pub mod volume;

pub use disc::Disc;
pub use filesystem::{FileSystem, VolumeBitmap};
pub use performance::Performance;
pub use properties::Properties;
pub use storage::Storage;
pub use volume::Volume;

/// A probe succeeds as `true`, fails with `negative` as `false`, and
/// propagates every other error code.
pub(crate) fn probe(status: IoStatus, negative: u32) -> Result<bool> {
    match status {
        IoStatus { success: true, .. } => Ok(true),
        IoStatus { error, .. } if error == negative => Ok(false),
        IoStatus { error, .. } => Err(IoctlError::Os { code: error }),
    }
}

/// Commands without output succeed or carry their OS error.
pub(crate) fn completed(status: IoStatus) -> Result<()> {
    if status.success {
        Ok(())
    } else {
        Err(IoctlError::Os { code: status.error })
    }
}

impl<B: DeviceBackend> Device<B> {
    pub fn disc(&self) -> Disc<'_, B> {
        Disc::new(self)
    }

    pub fn storage(&self) -> Storage<'_, B> {
        Storage::new(self)
    }

    pub fn volume(&self) -> Volume<'_, B> {
        Volume::new(self)
    }

    /// File-system requests only make sense on a volume (`\\.\C:`).
    pub fn file_system(&self) -> Option<FileSystem<'_, B>> {
        self.kind().is_volume().then(|| FileSystem::new(self))
    }
}
