// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Name returned for attribute ids missing from [`ATTRIBUTE_NAMES`].
pub const UNKNOWN_ATTRIBUTE: &str = "<Unknown>";

/// Known S.M.A.R.T. attribute ids and their common names.
pub static ATTRIBUTE_NAMES: &[(u8, &str)] = &[
    (0x00, UNKNOWN_ATTRIBUTE),
    (0x01, "Raw Read Error Rate"),
    (0x02, "Throughput Performance"),
    (0x03, "Spin-Up Time"),
    (0x04, "Start/Stop Count"),
    (0x05, "Reallocated Sectors Count"),
    (0x06, "Read Channel Margin"),
    (0x07, "Seek Error Rate"),
    (0x08, "Seek Time Performance"),
    (0x09, "Power-On Hours (POH)"),
    (0x0A, "Spin-Up Retry Count"),
    (0x0B, "Recalibration Retries"),
    (0x0C, "Device Power Cycle Count"),
    (0x0D, "Soft Read Error Rate"),
    (0xB4, "Unused Reserved Block Count Total"),
    (0xB7, "SATA Downshift Error Count"),
    (0xB8, "End-to-End error"),
    (0xB9, "Head Stability"),
    (0xBA, "Induced Op-Vibration Detection"),
    (0xBB, "Reported Uncorrectable Errors"),
    (0xBC, "Command Timeout"),
    (0xBD, "High Fly Writes"),
    (0xBE, "Temperature Difference from 100"),
    (0xBF, "G-sense error rate"),
    (0xC0, "Power-off retract count / Emergency Retract Cycle Count (Fujitsu)"),
    (0xC1, "Load Cycle Count / Load/Unload Cycle Count (Fujitsu)"),
    (0xC2, "HDA temperature"),
    (0xC3, "Hardware ECC Recovered"),
    (0xC4, "Reallocation Event Count"),
    (0xC5, "Current Pending Sector Count"),
    (0xC6, "Uncorrectable Sector Count"),
    (0xC7, "UltraDMA CRC Error Count"),
    (0xC8, "Write Error Rate / Multi-Zone Error Rate"),
    (0xC9, "Soft read error rate"),
    (0xCA, "Data Address Mark errors"),
    (0xCB, "Run out cancel"),
    (0xCC, "Soft ECC correction"),
    (0xCD, "Thermal asperity rate (TAR)"),
    (0xCE, "Flying height"),
    (0xCF, "Spin high current"),
    (0xD0, "Spin buzz"),
    (0xD1, "Offline seek performance"),
    (0xD2, "Vibration During Write"),
    (0xD3, "Vibration During Write"),
    (0xD4, "Shock During Write"),
    (0xDC, "Disk Shift"),
    (0xDD, "G-Sense Error Rate"),
    (0xDE, "Loaded Hours"),
    (0xDF, "Load/Unload Retry Count"),
    (0xE0, "Load Friction"),
    (0xE1, "Load Cycle Count"),
    (0xE2, "Load 'In'-time"),
    (0xE3, "Torque Amplification Count"),
    (0xE4, "Power-Off Retract Cycle"),
    (0xE6, "Drive Life Protection Status"),
    (0xE7, "Temperature"),
    (0xE8, "Endurance Remaining / Available Reserved Space"),
    (0xE9, "Power-On Hours / Media Wearout Indicator"),
    (0xEA, "Average erase count AND Maximum Erase Count"),
    (0xEB, "Good Block Count AND System(Free) Block Count"),
    (0xF0, "Head flying hours / Transfer Error Rate (Fujitsu)"),
    (0xF1, "Total LBAs Written"),
    (0xF2, "Total LBAs Read"),
    (0xFA, "Read Error Retry Rate"),
    (0xFE, "Free Fall Protection"),
];

static ATTRIBUTE_NAME_MAP: Lazy<HashMap<u8, &'static str>> =
    Lazy::new(|| ATTRIBUTE_NAMES.iter().copied().collect());

/// Human-readable name of attribute `id`, falling back to the `0x00` entry.
#[inline]
pub fn attribute_name(id: u8) -> &'static str {
    ATTRIBUTE_NAME_MAP
        .get(&id)
        .copied()
        .unwrap_or(UNKNOWN_ATTRIBUTE)
}
