// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use once_cell::unsync::OnceCell;

use crate::{
    control_code::disc::{GET_DRIVE_GEOMETRY, GET_DRIVE_GEOMETRY_EX, IS_WRITABLE},
    device::{Device, DeviceBackend},
    error::{Result, os_error},
    facade::{performance::Performance, probe},
    models::disc::{DiskGeometry, DiskGeometryEx},
    smart::SmartPipeline,
};

#[derive(Debug)]
pub struct Disc<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    geometry_ex: OnceCell<DiskGeometryEx>,
    writable: OnceCell<bool>,
}

impl<'d, B: DeviceBackend> Disc<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self {
            device,
            geometry_ex: OnceCell::new(),
            writable: OnceCell::new(),
        }
    }

    pub fn geometry(&self) -> Result<DiskGeometry> {
        self.device.send_checked(GET_DRIVE_GEOMETRY)
    }

    /// Geometry with disk size, partition and detection info. Cached.
    pub fn geometry_ex(&self) -> Result<&DiskGeometryEx> {
        self.geometry_ex
            .get_or_try_init(|| self.device.send_checked(GET_DRIVE_GEOMETRY_EX))
    }

    /// `false` when the media is write-protected. Cached.
    pub fn is_writable(&self) -> Result<bool> {
        self.writable
            .get_or_try_init(|| probe(self.device.control(IS_WRITABLE)?, os_error::WRITE_PROTECT))
            .copied()
    }

    /// S.M.A.R.T. access when the driver reports support for it.
    pub fn smart(&self, drive_number: u8) -> Result<Option<SmartPipeline<'d, B>>> {
        let pipeline = SmartPipeline::with_drive_number(self.device, drive_number);
        Ok(pipeline.is_smart_supported()?.then_some(pipeline))
    }

    pub fn performance(&self) -> Performance<'d, B> {
        Performance::new(self.device)
    }
}
