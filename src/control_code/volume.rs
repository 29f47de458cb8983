// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use super::{FileAccess, device_type::VOLUME, make_code};

codes! {
    GET_VOLUME_DISK_EXTENTS = make_code(VOLUME, 0, FileAccess::ANY);
    IS_CLUSTERED = make_code(VOLUME, 12, FileAccess::ANY);
}
