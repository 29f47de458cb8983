//! Typed device-control access to Windows storage drivers, with a
//! S.M.A.R.T. attribute pipeline on top.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Bounds-checked decoding of driver output buffers.
pub mod buffer;
/// Handles configuration, command-line helpers, and logging.
pub mod cfg;
/// Device-control code construction and the named code tables.
pub mod control_code;
/// Device handles, the OS backend seam, and the in-memory mock.
pub mod device;
/// Error type shared by every device operation.
pub mod error;
/// Disc, Storage, Volume and FileSystem views over an open device.
pub mod facade;
/// Wire structures exchanged with storage drivers.
pub mod models;
/// Version check, attribute and threshold reads, and pairing.
pub mod smart;
/// Step-wise execution of multi-request driver conversations.
pub mod state_machine;
/// Provides utility functions used throughout the crate.
pub mod utils;
