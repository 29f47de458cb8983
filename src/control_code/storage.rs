// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use super::{FileAccess, device_type::MASS_STORAGE, make_code};

codes! {
    CHECK_VERIFY = make_code(MASS_STORAGE, 0x0200, FileAccess::READ);
    /// Same function as [`CHECK_VERIFY`] without requiring read access.
    CHECK_VERIFY2 = make_code(MASS_STORAGE, 0x0200, FileAccess::ANY);
    MEDIA_REMOVAL = make_code(MASS_STORAGE, 0x0201, FileAccess::READ);
    EJECT_MEDIA = make_code(MASS_STORAGE, 0x0202, FileAccess::READ);
    LOAD_MEDIA = make_code(MASS_STORAGE, 0x0203, FileAccess::READ);
    LOAD_MEDIA2 = make_code(MASS_STORAGE, 0x0203, FileAccess::ANY);
    RESERVE = make_code(MASS_STORAGE, 0x0204, FileAccess::READ);
    RELEASE = make_code(MASS_STORAGE, 0x0205, FileAccess::READ);
    FIND_NEW_DEVICES = make_code(MASS_STORAGE, 0x0206, FileAccess::READ);
    EJECTION_CONTROL = make_code(MASS_STORAGE, 0x0250, FileAccess::ANY);
    MCN_CONTROL = make_code(MASS_STORAGE, 0x0251, FileAccess::ANY);
    GET_MEDIA_TYPES = make_code(MASS_STORAGE, 0x0300, FileAccess::ANY);
    GET_MEDIA_TYPES_EX = make_code(MASS_STORAGE, 0x0301, FileAccess::ANY);
    GET_MEDIA_SERIAL_NUMBER = make_code(MASS_STORAGE, 0x0304, FileAccess::ANY);
    GET_HOTPLUG_INFO = make_code(MASS_STORAGE, 0x0305, FileAccess::ANY);
    SET_HOTPLUG_INFO = make_code(MASS_STORAGE, 0x0306, FileAccess::READ_WRITE);
    RESET_BUS = make_code(MASS_STORAGE, 0x0400, FileAccess::READ);
    RESET_DEVICE = make_code(MASS_STORAGE, 0x0401, FileAccess::READ);
    BREAK_RESERVATION = make_code(MASS_STORAGE, 0x0405, FileAccess::READ);
    PERSISTENT_RESERVE_IN = make_code(MASS_STORAGE, 0x0406, FileAccess::READ);
    PERSISTENT_RESERVE_OUT = make_code(MASS_STORAGE, 0x0407, FileAccess::READ_WRITE);
    GET_DEVICE_NUMBER = make_code(MASS_STORAGE, 0x0420, FileAccess::ANY);
    PREDICT_FAILURE = make_code(MASS_STORAGE, 0x0440, FileAccess::ANY);
    READ_CAPACITY = make_code(MASS_STORAGE, 0x0450, FileAccess::READ);
    QUERY_PROPERTY = make_code(MASS_STORAGE, 0x0500, FileAccess::ANY);
}
