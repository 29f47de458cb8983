// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use super::{FileAccess, Method, device_type::FILE_SYSTEM, make_code, make_code_with_method};

codes! {
    LOCK_VOLUME = make_code(FILE_SYSTEM, 6, FileAccess::ANY);
    UNLOCK_VOLUME = make_code(FILE_SYSTEM, 7, FileAccess::ANY);
    DISMOUNT_VOLUME = make_code(FILE_SYSTEM, 8, FileAccess::ANY);
    IS_VOLUME_MOUNTED = make_code(FILE_SYSTEM, 10, FileAccess::ANY);
    FILESYSTEM_GET_STATISTICS = make_code(FILE_SYSTEM, 24, FileAccess::ANY);
    GET_NTFS_VOLUME_DATA = make_code(FILE_SYSTEM, 25, FileAccess::ANY);
    GET_NTFS_FILE_RECORD = make_code(FILE_SYSTEM, 26, FileAccess::ANY);
    GET_VOLUME_BITMAP = make_code_with_method(FILE_SYSTEM, 27, Method::Neither, FileAccess::ANY);
    FIND_FILES_BY_SID = make_code_with_method(FILE_SYSTEM, 35, Method::Neither, FileAccess::ANY);
    FILESYSTEM_GET_STATISTICS_EX = make_code(FILE_SYSTEM, 99, FileAccess::ANY);
}
