//! Fixed-layout wire structures exchanged with storage drivers.
//!
//! Every structure is `#[repr(C)]` over byte-aligned little-endian integers,
//! with the padding the platform ABI inserts spelled out as explicit fields.
//! That makes `size_of::<T>()` equal to the size the driver reads or writes.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{FromBytes, Immutable, KnownLayout};

macro_rules! decodable {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl $crate::models::Decodable for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

/// Static S.M.A.R.T. attribute name table.
pub mod attribute_names;
/// Disk geometry and performance structures.
pub mod disc;
/// File-system control structures (NTFS data, bitmap, statistics).
pub mod fsctl;
/// ATA S.M.A.R.T. command blocks, attributes and thresholds.
pub mod smart;
/// Storage class structures and property descriptors.
pub mod storage;
/// Volume disk extents.
pub mod volume;

/// A structure that can be decoded from a raw response buffer.
///
/// The size used for bounds checks is the Rust size of the type, which the
/// layout rules above keep equal to the native size.
pub trait Decodable: FromBytes + KnownLayout + Immutable + Sized {
    /// Native structure name, used in diagnostics.
    const NAME: &'static str;
    const SIZE: usize = core::mem::size_of::<Self>();
}
