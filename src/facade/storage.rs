// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use once_cell::unsync::OnceCell;

use crate::{
    control_code::storage::{
        CHECK_VERIFY, CHECK_VERIFY2, EJECT_MEDIA, GET_DEVICE_NUMBER, GET_HOTPLUG_INFO,
        GET_MEDIA_SERIAL_NUMBER, GET_MEDIA_TYPES_EX, LOAD_MEDIA, MEDIA_REMOVAL, PREDICT_FAILURE,
        READ_CAPACITY,
    },
    device::{Device, DeviceBackend},
    error::{Result, os_error},
    facade::{completed, probe, properties::Properties},
    models::storage::{
        GetMediaTypes, MediaSerialNumberData, PreventMediaRemoval, StorageDeviceNumber,
        StorageHotplugInfo, StoragePredictFailure, StorageReadCapacity,
    },
};

#[derive(Debug)]
pub struct Storage<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    properties: Properties<'d, B>,
    device_number: OnceCell<StorageDeviceNumber>,
    serial_number: OnceCell<MediaSerialNumberData>,
    media_types: OnceCell<GetMediaTypes>,
    read_capacity: OnceCell<StorageReadCapacity>,
}

impl<'d, B: DeviceBackend> Storage<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self {
            device,
            properties: Properties::new(device),
            device_number: OnceCell::new(),
            serial_number: OnceCell::new(),
            media_types: OnceCell::new(),
            read_capacity: OnceCell::new(),
        }
    }

    #[inline]
    pub fn properties(&self) -> &Properties<'d, B> {
        &self.properties
    }

    pub fn device_number(&self) -> Result<&StorageDeviceNumber> {
        self.device_number
            .get_or_try_init(|| self.device.send_checked(GET_DEVICE_NUMBER))
    }

    pub fn serial_number(&self) -> Result<&MediaSerialNumberData> {
        self.serial_number
            .get_or_try_init(|| self.device.send_checked(GET_MEDIA_SERIAL_NUMBER))
    }

    pub fn media_types_ex(&self) -> Result<&GetMediaTypes> {
        self.media_types
            .get_or_try_init(|| self.device.send_checked(GET_MEDIA_TYPES_EX))
    }

    pub fn read_capacity(&self) -> Result<&StorageReadCapacity> {
        self.read_capacity
            .get_or_try_init(|| self.device.send_checked(READ_CAPACITY))
    }

    /// `false` when the device is not ready (no media); other errors
    /// propagate.
    pub fn check_media_changed(&self) -> Result<bool> {
        probe(self.device.control(CHECK_VERIFY)?, os_error::NOT_READY)
    }

    /// [`Storage::check_media_changed`] for handles opened without read
    /// access.
    pub fn check_media_changed_any_access(&self) -> Result<bool> {
        probe(self.device.control(CHECK_VERIFY2)?, os_error::NOT_READY)
    }

    pub fn prevent_media_removal(&self, prevent: bool) -> Result<()> {
        let input = PreventMediaRemoval {
            prevent_media_removal: prevent as u8,
        };
        completed(self.device.control_with(MEDIA_REMOVAL, &input)?)
    }

    pub fn eject_media(&self) -> Result<()> {
        completed(self.device.control(EJECT_MEDIA)?)
    }

    pub fn load_media(&self) -> Result<()> {
        completed(self.device.control(LOAD_MEDIA)?)
    }

    pub fn hotplug_info(&self) -> Result<StorageHotplugInfo> {
        self.device.send_checked(GET_HOTPLUG_INFO)
    }

    pub fn predict_failure(&self) -> Result<StoragePredictFailure> {
        self.device.send_checked(PREDICT_FAILURE)
    }
}
