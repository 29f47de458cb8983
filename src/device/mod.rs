//! Device handles and the request/response primitive every façade uses.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use bitflags::bitflags;

/// The owned device handle and its typed send operations.
pub mod handle;
/// Scripted in-memory backend for exercising the control layer without a
/// driver.
pub mod mock;
/// Device namespace path helpers.
pub mod path;
/// Platform backends.
pub mod sys;

pub use handle::{Device, RawResponse, Response};
pub use path::DeviceKind;
pub use sys::OsHandle;

bitflags! {
    /// Desired access passed to the open call (`GENERIC_*`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessMode: u32 {
        const READ    = 0x8000_0000;
        const WRITE   = 0x4000_0000;
        const EXECUTE = 0x2000_0000;
        const ALL     = 0x1000_0000;
    }
}

impl AccessMode {
    /// Query-only access; enough for most storage property requests.
    pub const QUERY: Self = Self::empty();
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

bitflags! {
    /// Share mode passed to the open call (`FILE_SHARE_*`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShareMode: u32 {
        const READ   = 0x0000_0001;
        const WRITE  = 0x0000_0002;
        const DELETE = 0x0000_0004;
    }
}

impl ShareMode {
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

/// Outcome of one device-control call as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoStatus {
    pub success: bool,
    pub bytes_returned: u32,
    /// Last error code after the call; `0` when the call succeeded.
    pub error: u32,
}

impl IoStatus {
    #[inline]
    pub fn completed(bytes_returned: u32) -> Self {
        Self {
            success: true,
            bytes_returned,
            error: 0,
        }
    }

    #[inline]
    pub fn failed(error: u32, bytes_returned: u32) -> Self {
        Self {
            success: false,
            bytes_returned,
            error,
        }
    }
}

/// The OS boundary: an open device that accepts control codes.
///
/// Implementations do no locking; callers serialize requests on one handle.
pub trait DeviceBackend {
    /// Issue `code` with `input`, letting the driver fill `output`. An empty
    /// slice is passed to the OS as a null buffer. On failure the output may
    /// still hold partial data.
    fn io_control(&self, code: u32, input: &[u8], output: &mut [u8]) -> IoStatus;

    /// Whether the device is powered on, or the OS error code.
    fn power_state(&self) -> Result<bool, u32>;

    /// Release the OS resource. Called at most once by [`Device`].
    fn close(&mut self) -> Result<(), u32>;
}
