// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fs;

use anyhow::Result;
use hex::FromHex;

// Helper to load a hex fixture and decode it to a byte vector.
pub fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

/// `SENDCMDOUTPARAMS` header with the given driver status byte, followed by
/// `data`.
pub fn smart_out(driver_error: u8, data: &[u8]) -> Vec<u8> {
    let mut v = vec![0u8; 16];
    v[0..4].copy_from_slice(&512u32.to_le_bytes());
    v[4] = driver_error;
    v.extend_from_slice(data);
    v
}

/// One 12-byte attribute record.
pub fn attribute(id: u8, value: u8, worst: u8, raw: u64) -> Vec<u8> {
    let mut v = vec![id, 0x03, 0x00, value, worst];
    v.extend_from_slice(&raw.to_le_bytes()[..6]);
    v.push(0);
    v
}

/// One 12-byte threshold record.
pub fn threshold(id: u8, threshold: u8) -> Vec<u8> {
    let mut v = vec![id, threshold];
    v.extend_from_slice(&[0u8; 10]);
    v
}

/// A data sector: revision word then the records.
pub fn sector(records: &[Vec<u8>]) -> Vec<u8> {
    let mut v = vec![0x10, 0x00];
    for r in records {
        v.extend_from_slice(r);
    }
    v
}

/// `VOLUME_BITMAP_BUFFER` header plus bitmap bytes.
pub fn bitmap_page(starting_lcn: i64, bitmap_size: i64, bitmap: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(16 + bitmap.len());
    v.extend_from_slice(&starting_lcn.to_le_bytes());
    v.extend_from_slice(&bitmap_size.to_le_bytes());
    v.extend_from_slice(bitmap);
    v
}
