// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

use crate::models::smart::SmartDriverStatus;

/// Win32 error codes that the control layer interprets.
///
/// The numeric values are part of the contract with the operating system and
/// must not change.
pub mod os_error {
    pub const NO_ERROR: u32 = 0x0000;
    pub const INVALID_FUNCTION: u32 = 0x0001;
    pub const INVALID_HANDLE: u32 = 0x0006;
    pub const WRITE_PROTECT: u32 = 0x0013;
    pub const NOT_READY: u32 = 0x0015;
    pub const NOT_SUPPORTED: u32 = 0x0032;
    pub const INSUFFICIENT_BUFFER: u32 = 0x007A;
    pub const MORE_DATA: u32 = 0x00EA;
    pub const INVALID_FLAGS: u32 = 0x03EC;
}

/// Errors produced while opening devices, issuing control codes and decoding
/// their responses.
#[derive(Debug, Error)]
pub enum IoctlError {
    #[error("cannot open device {path}: os error 0x{code:x}")]
    Open { path: String, code: u32 },

    #[error("device control failed: os error 0x{code:x}")]
    Os { code: u32 },

    #[error("S.M.A.R.T. driver rejected the command: {0}")]
    SmartDriver(SmartDriverStatus),

    #[error(
        "attribute/threshold count mismatch: {attributes} attributes, {thresholds} \
         thresholds"
    )]
    SizeMismatch { attributes: usize, thresholds: usize },

    #[error("{name}: {size} bytes at offset {offset} exceed buffer of {len} bytes")]
    OutOfRange {
        name: &'static str,
        offset: usize,
        size: usize,
        len: usize,
    },

    #[error("device {path} is already closed")]
    Closed { path: String },
}

impl IoctlError {
    /// Raw platform error code, when the error carries one.
    pub fn os_code(&self) -> Option<u32> {
        match self {
            IoctlError::Open { code, .. } | IoctlError::Os { code } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IoctlError>;
