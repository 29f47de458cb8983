// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    device::{AccessMode, DeviceBackend, IoStatus, ShareMode},
    error::{IoctlError, Result, os_error},
};

/// Placeholder on platforms without a device-control API. Opening always
/// fails with `NOT_SUPPORTED`.
#[derive(Debug)]
pub struct OsHandle {
    _private: (),
}

impl OsHandle {
    pub fn open(path: &str, _access: AccessMode, _share: ShareMode) -> Result<Self> {
        Err(IoctlError::Open {
            path: path.to_string(),
            code: os_error::NOT_SUPPORTED,
        })
    }
}

impl DeviceBackend for OsHandle {
    fn io_control(&self, _code: u32, _input: &[u8], _output: &mut [u8]) -> IoStatus {
        IoStatus::failed(os_error::NOT_SUPPORTED, 0)
    }

    fn power_state(&self) -> std::result::Result<bool, u32> {
        Err(os_error::NOT_SUPPORTED)
    }

    fn close(&mut self) -> std::result::Result<(), u32> {
        Ok(())
    }
}
