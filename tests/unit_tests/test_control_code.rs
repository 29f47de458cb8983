// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashMap;

use smart_ioctl_rs::control_code::{
    CodeFields, FileAccess, Method, all_codes, device_type, disc, fsctl, make_code,
    make_code_with_method, name_of, storage, volume,
};

#[test]
fn test_well_known_values() {
    assert_eq!(disc::GET_DRIVE_GEOMETRY, 0x0007_0000);
    assert_eq!(disc::PERFORMANCE, 0x0007_0020);
    assert_eq!(disc::IS_WRITABLE, 0x0007_0024);
    assert_eq!(disc::SMART_GET_VERSION, 0x0007_4080);
    assert_eq!(disc::SMART_SEND_DRIVE_COMMAND, 0x0007_C084);
    assert_eq!(disc::SMART_RCV_DRIVE_DATA, 0x0007_C088);
    assert_eq!(disc::GET_DRIVE_GEOMETRY_EX, 0x0007_00A0);
    assert_eq!(storage::CHECK_VERIFY, 0x002D_4800);
    assert_eq!(storage::QUERY_PROPERTY, 0x002D_1400);
    assert_eq!(volume::GET_VOLUME_DISK_EXTENTS, 0x0056_0000);
    assert_eq!(fsctl::IS_VOLUME_MOUNTED, 0x0009_0028);
    assert_eq!(fsctl::GET_VOLUME_BITMAP, 0x0009_006F);
}

#[test]
fn test_make_code_packs_fields() {
    let code = make_code_with_method(
        device_type::FILE_SYSTEM,
        27,
        Method::Neither,
        FileAccess::ANY,
    );
    let fields = CodeFields::from(code);
    assert_eq!(fields.device_type, device_type::FILE_SYSTEM);
    assert_eq!(fields.function, 27);
    assert_eq!(fields.method, Method::Neither as u8);
    assert_eq!(fields.access, 0);

    let rw = make_code(device_type::DISK, 0x21, FileAccess::READ_WRITE);
    assert_eq!(CodeFields::from(rw).access, 3);
    assert_eq!(CodeFields::from(rw).method, Method::Buffered as u8);
}

#[test]
fn test_registry_is_injective() {
    let codes = all_codes();
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for (name, code) in &codes {
        if let Some(prev) = seen.insert(*code, name) {
            panic!("{name} and {prev} share code 0x{code:08x}");
        }
    }
    assert_eq!(seen.len(), codes.len());
}

#[test]
fn test_name_of() {
    assert_eq!(name_of(disc::SMART_RCV_DRIVE_DATA), Some("SMART_RCV_DRIVE_DATA"));
    assert_eq!(name_of(fsctl::GET_VOLUME_BITMAP), Some("GET_VOLUME_BITMAP"));
    assert_eq!(name_of(0xFFFF_FFFF), None);
}
