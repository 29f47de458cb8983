// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

const SIZE_STEP: u64 = 1024;
const SIZE_UNITS: [&str; 4] = ["bytes", "Kb", "Mb", "Gb"];

/// Decode an ATA IDENTIFY string: each 16-bit word stores its two
/// characters swapped. Trailing padding and NULs are removed.
pub fn swap_ata_string(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    for pair in raw.chunks(2) {
        match *pair {
            [a, b] => {
                out.push(ata_char(b));
                out.push(ata_char(a));
            },
            [a] => out.push(ata_char(a)),
            _ => {},
        }
    }
    out.trim_matches(|c: char| c == ' ' || c == '\0').to_string()
}

#[inline]
fn ata_char(b: u8) -> char {
    if b.is_ascii() { b as char } else { '?' }
}

/// Human-readable size, truncated to the largest unit (up to Gb) the value
/// exceeds by more than one step, e.g. `1,024 bytes`, `1 Kb`, `3,000 Gb`.
pub fn format_size(bytes: u64) -> String {
    let mut unit = 1u64;
    let mut idx = 0usize;
    while bytes > unit * SIZE_STEP && idx + 1 < SIZE_UNITS.len() {
        unit *= SIZE_STEP;
        idx += 1;
    }
    format!("{} {}", group_thousands(bytes / unit), SIZE_UNITS[idx])
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
