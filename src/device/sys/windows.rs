// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    ffi::c_void,
    ptr::{null, null_mut},
};

use tracing::warn;
use windows_sys::Win32::{
    Foundation::{BOOL, CloseHandle, GetLastError, HANDLE, INVALID_HANDLE_VALUE},
    Storage::FileSystem::{CreateFileW, OPEN_EXISTING},
    System::{IO::DeviceIoControl, Power::GetDevicePowerState},
};

use crate::{
    device::{AccessMode, DeviceBackend, IoStatus, ShareMode},
    error::{IoctlError, Result},
};

/// A handle returned by `CreateFileW`.
#[derive(Debug)]
pub struct OsHandle {
    handle: HANDLE,
    path: String,
}

// The handle is a plain kernel object reference; it may move between
// threads as long as only one thread issues requests at a time.
unsafe impl Send for OsHandle {}

impl OsHandle {
    pub fn open(path: &str, access: AccessMode, share: ShareMode) -> Result<Self> {
        let wide: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
        let handle = unsafe {
            CreateFileW(
                wide.as_ptr(),
                access.bits(),
                share.bits(),
                null(),
                OPEN_EXISTING,
                0,
                null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            let code = unsafe { GetLastError() };
            return Err(IoctlError::Open {
                path: path.to_string(),
                code,
            });
        }
        Ok(Self {
            handle,
            path: path.to_string(),
        })
    }
}

impl DeviceBackend for OsHandle {
    fn io_control(&self, code: u32, input: &[u8], output: &mut [u8]) -> IoStatus {
        let in_ptr: *const c_void = if input.is_empty() {
            null()
        } else {
            input.as_ptr().cast()
        };
        let out_ptr: *mut c_void = if output.is_empty() {
            null_mut()
        } else {
            output.as_mut_ptr().cast()
        };
        let mut returned = 0u32;

        let ok = unsafe {
            DeviceIoControl(
                self.handle,
                code,
                in_ptr,
                input.len() as u32,
                out_ptr,
                output.len() as u32,
                &mut returned,
                null_mut(),
            )
        };
        if ok != 0 {
            IoStatus::completed(returned)
        } else {
            IoStatus::failed(unsafe { GetLastError() }, returned)
        }
    }

    fn power_state(&self) -> std::result::Result<bool, u32> {
        let mut on: BOOL = 0;
        if unsafe { GetDevicePowerState(self.handle, &mut on) } == 0 {
            return Err(unsafe { GetLastError() });
        }
        Ok(on != 0)
    }

    fn close(&mut self) -> std::result::Result<(), u32> {
        let handle = std::mem::replace(&mut self.handle, INVALID_HANDLE_VALUE);
        if handle == INVALID_HANDLE_VALUE {
            return Ok(());
        }
        if unsafe { CloseHandle(handle) } == 0 {
            return Err(unsafe { GetLastError() });
        }
        Ok(())
    }
}

impl Drop for OsHandle {
    fn drop(&mut self) {
        if self.handle != INVALID_HANDLE_VALUE {
            warn!(path = %self.path, "os handle dropped without close");
            let _ = self.close();
        }
    }
}
