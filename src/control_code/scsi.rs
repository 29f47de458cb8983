// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! IDE and ATA pass-through share the SCSI controller device type.

use super::{FileAccess, device_type::CONTROLLER, make_code};

codes! {
    SCSI_PASS_THROUGH = make_code(CONTROLLER, 0x0401, FileAccess::READ_WRITE);
    SCSI_MINIPORT = make_code(CONTROLLER, 0x0402, FileAccess::READ_WRITE);
    SCSI_GET_INQUIRY_DATA = make_code(CONTROLLER, 0x0403, FileAccess::ANY);
    SCSI_GET_CAPABILITIES = make_code(CONTROLLER, 0x0404, FileAccess::ANY);
    SCSI_PASS_THROUGH_DIRECT = make_code(CONTROLLER, 0x0405, FileAccess::READ_WRITE);
    SCSI_GET_ADDRESS = make_code(CONTROLLER, 0x0406, FileAccess::ANY);
    SCSI_RESCAN_BUS = make_code(CONTROLLER, 0x0407, FileAccess::ANY);
    SCSI_GET_DUMP_POINTERS = make_code(CONTROLLER, 0x0408, FileAccess::ANY);
    SCSI_FREE_DUMP_POINTERS = make_code(CONTROLLER, 0x0409, FileAccess::ANY);
    IDE_PASS_THROUGH = make_code(CONTROLLER, 0x040A, FileAccess::READ_WRITE);
    ATA_PASS_THROUGH = make_code(CONTROLLER, 0x040B, FileAccess::READ_WRITE);
    ATA_PASS_THROUGH_DIRECT = make_code(CONTROLLER, 0x040C, FileAccess::READ_WRITE);
}
