// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::{debug, trace, warn};
use zerocopy::{Immutable, IntoBytes};

use crate::{
    buffer::BufferReader,
    control_code,
    device::{AccessMode, DeviceBackend, DeviceKind, IoStatus, OsHandle, ShareMode, path},
    error::{IoctlError, Result, os_error},
    models::Decodable,
};

/// Typed result of [`Device::send`].
///
/// `output` is decoded even when the call failed, since some drivers fill
/// part of the buffer before reporting an error.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub success: bool,
    pub output: T,
    pub bytes_returned: u32,
    pub error: u32,
}

impl<T> Response<T> {
    /// The output, or [`IoctlError::Os`] when the call failed.
    pub fn into_result(self) -> Result<T> {
        if self.success {
            Ok(self.output)
        } else {
            Err(IoctlError::Os { code: self.error })
        }
    }
}

/// Untyped result of [`Device::send_raw`]. `data` holds only the bytes the
/// driver reported as written.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: IoStatus,
    pub data: Vec<u8>,
}

impl RawResponse {
    #[inline]
    pub fn reader(&self) -> BufferReader<'_> {
        BufferReader::new(&self.data)
    }
}

/// One open device.
///
/// The handle is released exactly once: by [`Device::close`] or, failing
/// that, when the value is dropped. Every request after release fails with
/// [`IoctlError::Closed`].
pub struct Device<B: DeviceBackend = OsHandle> {
    path: String,
    access: AccessMode,
    share: ShareMode,
    backend: Option<B>,
}

impl<B: DeviceBackend> core::fmt::Debug for Device<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Device")
            .field("path", &self.path)
            .field("access", &self.access)
            .field("share", &self.share)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Device<OsHandle> {
    /// Open `path` in the device namespace.
    pub fn open(path: impl Into<String>, access: AccessMode, share: ShareMode) -> Result<Self> {
        let path = path.into();
        let backend = OsHandle::open(&path, access, share)?;
        debug!(path = %path, ?access, ?share, "device opened");
        Ok(Self::with_backend(path, access, share, backend))
    }

    /// `\\.\PhysicalDrive{index}` with read/write access.
    pub fn open_physical_drive(index: u32) -> Result<Self> {
        Self::open(
            path::physical_drive(index),
            AccessMode::READ_WRITE,
            ShareMode::READ_WRITE,
        )
    }

    /// `\\.\{letter}:` for the first letter found in `name` (`"C"`, `"c:\\"`).
    pub fn open_logical_drive(name: &str) -> Result<Self> {
        let path = path::logical_drive(name).ok_or_else(|| IoctlError::Open {
            path: name.to_string(),
            code: os_error::INVALID_FUNCTION,
        })?;
        Self::open(path, AccessMode::READ_WRITE, ShareMode::READ_WRITE)
    }

    /// `\\.\Scsi{port}:`
    pub fn open_scsi_port(port: u32) -> Result<Self> {
        Self::open(
            path::scsi_port(port),
            AccessMode::READ_WRITE,
            ShareMode::READ_WRITE,
        )
    }

    /// The legacy `\\.\SMARTVSD` driver.
    pub fn open_smartvsd() -> Result<Self> {
        Self::open(path::SMARTVSD, AccessMode::QUERY, ShareMode::empty())
    }
}

impl<B: DeviceBackend> Device<B> {
    /// Wrap an already open backend.
    pub fn with_backend(
        path: impl Into<String>,
        access: AccessMode,
        share: ShareMode,
        backend: B,
    ) -> Self {
        Self {
            path: path.into(),
            access,
            share,
            backend: Some(backend),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn access(&self) -> AccessMode {
        self.access
    }

    #[inline]
    pub fn share(&self) -> ShareMode {
        self.share
    }

    #[inline]
    pub fn kind(&self) -> DeviceKind {
        DeviceKind::classify(&self.path)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    /// Power state of the device. A failed query is an OS error.
    pub fn is_device_on(&self) -> Result<bool> {
        let on = self
            .backend()?
            .power_state()
            .map_err(|code| IoctlError::Os { code })?;
        trace!(path = %self.path, on, "device power state");
        Ok(on)
    }

    /// Send `code` with an optional input block and decode `O` from the
    /// output buffer, whatever the outcome of the call.
    pub fn send<I, O>(&self, code: u32, input: Option<&I>) -> Result<Response<O>>
    where
        I: IntoBytes + Immutable,
        O: Decodable,
    {
        let (status, buf) = self.transact(code, input.map(|i| i.as_bytes()), O::SIZE)?;
        let output = BufferReader::new(&buf).decode::<O>(0)?;
        Ok(Response {
            success: status.success,
            output,
            bytes_returned: status.bytes_returned,
            error: status.error,
        })
    }

    /// [`Device::send`] without an input block.
    pub fn query<O: Decodable>(&self, code: u32) -> Result<Response<O>> {
        self.send::<[u8; 0], O>(code, None)
    }

    /// Send `code` and return the output, or the OS error on failure.
    pub fn send_checked<O: Decodable>(&self, code: u32) -> Result<O> {
        self.query(code)?.into_result()
    }

    /// [`Device::send_checked`] with an input block.
    pub fn send_checked_with<I, O>(&self, code: u32, input: &I) -> Result<O>
    where
        I: IntoBytes + Immutable,
        O: Decodable,
    {
        self.send(code, Some(input))?.into_result()
    }

    /// Send a request that produces no output.
    pub fn control(&self, code: u32) -> Result<IoStatus> {
        Ok(self.transact(code, None, 0)?.0)
    }

    /// [`Device::control`] with an input block.
    pub fn control_with<I: IntoBytes + Immutable>(&self, code: u32, input: &I) -> Result<IoStatus> {
        Ok(self.transact(code, Some(input.as_bytes()), 0)?.0)
    }

    /// Send `code` with a caller-sized output buffer, for responses whose
    /// length is only known at run time.
    pub fn send_raw(&self, code: u32, input: Option<&[u8]>, out_len: usize) -> Result<RawResponse> {
        let (status, mut data) = self.transact(code, input, out_len)?;
        data.truncate(status.bytes_returned as usize);
        Ok(RawResponse { status, data })
    }

    /// Release the handle. Further calls are no-ops.
    pub fn close(&mut self) -> Result<()> {
        match self.backend.take() {
            Some(mut backend) => {
                backend.close().map_err(|code| IoctlError::Os { code })?;
                debug!(path = %self.path, "device closed");
                Ok(())
            },
            None => Ok(()),
        }
    }

    fn backend(&self) -> Result<&B> {
        self.backend.as_ref().ok_or_else(|| IoctlError::Closed {
            path: self.path.clone(),
        })
    }

    /// Both buffers live only for the duration of this call.
    fn transact(&self, code: u32, input: Option<&[u8]>, out_len: usize) -> Result<(IoStatus, Vec<u8>)> {
        let backend = self.backend()?;
        let in_buf = input.map(<[u8]>::to_vec).unwrap_or_default();
        let mut out_buf = vec![0u8; out_len];

        let mut status = backend.io_control(code, &in_buf, &mut out_buf);
        // A driver must not claim more bytes than the buffer holds.
        status.bytes_returned = status.bytes_returned.min(out_len as u32);

        trace!(
            path = %self.path,
            code = format_args!("0x{code:08x}"),
            name = control_code::name_of(code).unwrap_or("?"),
            in_len = in_buf.len(),
            out_len,
            success = status.success,
            bytes_returned = status.bytes_returned,
            error = status.error,
            output = %hex::encode(&out_buf[..status.bytes_returned as usize]),
            "device control"
        );
        Ok((status, out_buf))
    }
}

impl<B: DeviceBackend> Drop for Device<B> {
    fn drop(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            match backend.close() {
                Ok(()) => warn!(path = %self.path, "device was not closed, released on drop"),
                Err(code) => {
                    warn!(path = %self.path, code, "failed to release device handle on drop")
                },
            }
        }
    }
}
