// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use smart_ioctl_rs::{
    buffer::{BufferReader, StringEncoding, encode},
    error::IoctlError,
    models::{
        Decodable,
        disc::DiskGeometry,
        smart::{DriveAttribute, IdeCommand, SendCmdInParams, SmartFeature},
        volume::DiskExtent,
    },
};

#[test]
fn test_decode_fits_exactly() -> Result<()> {
    let mut buf = vec![0u8; DiskGeometry::SIZE];
    buf[0..8].copy_from_slice(&1024i64.to_le_bytes());
    buf[8..12].copy_from_slice(&12u32.to_le_bytes());
    buf[12..16].copy_from_slice(&255u32.to_le_bytes());
    buf[16..20].copy_from_slice(&63u32.to_le_bytes());
    buf[20..24].copy_from_slice(&512u32.to_le_bytes());

    let g: DiskGeometry = BufferReader::new(&buf).decode(0)?;
    assert_eq!(g.cylinders.get(), 1024);
    assert_eq!(g.bytes_per_sector.get(), 512);
    assert_eq!(g.chs_bytes(), 1024 * 255 * 63 * 512);
    Ok(())
}

#[test]
fn test_out_of_range_iff_past_end() {
    let buf = [0u8; 30];
    let reader = BufferReader::new(&buf);
    let size = DiskExtent::SIZE;
    assert_eq!(size, 24);

    for offset in 0..=buf.len() + 1 {
        let r = reader.decode::<DiskExtent>(offset);
        if offset + size > buf.len() {
            match r {
                Err(IoctlError::OutOfRange {
                    name,
                    offset: o,
                    size: s,
                    len,
                }) => {
                    assert_eq!(name, "DISK_EXTENT");
                    assert_eq!((o, s, len), (offset, size, buf.len()));
                },
                other => panic!("offset {offset}: expected OutOfRange, got {other:?}"),
            }
        } else {
            assert!(r.is_ok(), "offset {offset} should fit");
        }
    }
}

#[test]
fn test_decode_advancing_walks_records() -> Result<()> {
    let mut buf = Vec::new();
    for id in 1..=3u8 {
        buf.extend_from_slice(&[id, 0, 0, 100, 90, id, 0, 0, 0, 0, 0, 0]);
    }
    let reader = BufferReader::new(&buf);
    let mut cursor = 0;
    let ids: Vec<u8> = (0..3)
        .map(|_| reader.decode_advancing::<DriveAttribute>(&mut cursor).map(|a| a.id))
        .collect::<Result<_, _>>()?;
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(cursor, 36);
    assert!(reader.decode_advancing::<DriveAttribute>(&mut cursor).is_err());
    assert_eq!(cursor, 36);
    Ok(())
}

#[test]
fn test_strings() -> Result<()> {
    let buf = b"\0\0ACME\0junk";
    let reader = BufferReader::new(buf);
    assert_eq!(reader.decode_string(2, StringEncoding::Ansi)?, "ACME");
    assert_eq!(reader.decode_fixed_string(2, 2, StringEncoding::Ansi)?, "AC");

    let wide: Vec<u8> = "PartMgr"
        .encode_utf16()
        .chain([0u16])
        .flat_map(u16::to_le_bytes)
        .collect();
    let reader = BufferReader::new(&wide);
    assert_eq!(reader.decode_fixed_string(0, 8, StringEncoding::Utf16)?, "PartMgr");
    assert!(reader.decode_fixed_string(0, 9, StringEncoding::Utf16).is_err());
    Ok(())
}

#[test]
fn test_encode_command_block() {
    let smart = encode(&SendCmdInParams::smart(SmartFeature::ReadAttributes, 1));
    assert_eq!(smart.len(), SendCmdInParams::SIZE);
    assert_eq!(&smart[0..4], &1024u32.to_le_bytes());
    // IDEREGS: features, count, number, cyl low/high, head, command
    assert_eq!(&smart[4..11], &[0xD0, 1, 1, 0x4F, 0xC2, 0, 0xB0]);
    assert_eq!(smart[12], 1);

    let id = encode(&SendCmdInParams::identify(IdeCommand::Identify, 0));
    assert_eq!(id[4 + 6], 0xEC);
    assert_eq!(id[4], 0);
}
