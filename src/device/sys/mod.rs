// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::OsHandle;

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use unsupported::OsHandle;
