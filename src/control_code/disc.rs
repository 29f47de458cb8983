// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use super::{FileAccess, device_type::DISK, make_code};

codes! {
    GET_DRIVE_GEOMETRY = make_code(DISK, 0x0000, FileAccess::ANY);
    GET_PARTITION_INFO = make_code(DISK, 0x0001, FileAccess::READ);
    SET_PARTITION_INFO = make_code(DISK, 0x0002, FileAccess::READ_WRITE);
    GET_DRIVE_LAYOUT = make_code(DISK, 0x0003, FileAccess::READ);
    SET_DRIVE_LAYOUT = make_code(DISK, 0x0004, FileAccess::READ_WRITE);
    VERIFY = make_code(DISK, 0x0005, FileAccess::ANY);
    FORMAT_TRACKS = make_code(DISK, 0x0006, FileAccess::READ_WRITE);
    REASSIGN_BLOCKS = make_code(DISK, 0x0007, FileAccess::READ_WRITE);
    /// Enables the counters on first use.
    PERFORMANCE = make_code(DISK, 0x0008, FileAccess::ANY);
    IS_WRITABLE = make_code(DISK, 0x0009, FileAccess::ANY);
    LOGGING = make_code(DISK, 0x000A, FileAccess::ANY);
    FORMAT_TRACKS_EX = make_code(DISK, 0x000B, FileAccess::READ_WRITE);
    HISTOGRAM_STRUCTURE = make_code(DISK, 0x000C, FileAccess::ANY);
    HISTOGRAM_DATA = make_code(DISK, 0x000D, FileAccess::ANY);
    HISTOGRAM_RESET = make_code(DISK, 0x000E, FileAccess::ANY);
    REQUEST_STRUCTURE = make_code(DISK, 0x000F, FileAccess::ANY);
    REQUEST_DATA = make_code(DISK, 0x0010, FileAccess::ANY);
    PERFORMANCE_OFF = make_code(DISK, 0x0018, FileAccess::ANY);
    SMART_GET_VERSION = make_code(DISK, 0x0020, FileAccess::READ);
    SMART_SEND_DRIVE_COMMAND = make_code(DISK, 0x0021, FileAccess::READ_WRITE);
    SMART_RCV_DRIVE_DATA = make_code(DISK, 0x0022, FileAccess::READ_WRITE);
    GET_DRIVE_GEOMETRY_EX = make_code(DISK, 0x0028, FileAccess::ANY);
}
