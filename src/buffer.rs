// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{Immutable, IntoBytes};

use crate::{
    error::{IoctlError, Result},
    models::Decodable,
};

/// Character encoding of a string embedded in a response buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// Single-byte characters. Non-ASCII bytes are replaced with `?`.
    Ansi,
    /// UTF-16 little-endian code units.
    Utf16,
}

impl StringEncoding {
    #[inline]
    fn unit(self) -> usize {
        match self {
            StringEncoding::Ansi => 1,
            StringEncoding::Utf16 => 2,
        }
    }
}

/// Read-only view over a response buffer.
///
/// The reader borrows the buffer, so it cannot be resized or moved while any
/// decoded view is outstanding. Every read is bounds-checked against the
/// buffer length; a structure that does not fit is an
/// [`IoctlError::OutOfRange`], never a truncation.
#[derive(Debug, Clone, Copy)]
pub struct BufferReader<'a> {
    buf: &'a [u8],
}

impl<'a> BufferReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        self.range("bytes", offset, len)
    }

    /// Decode `T` from `offset`.
    pub fn decode<T: Decodable>(&self, offset: usize) -> Result<T> {
        let raw = self.range(T::NAME, offset, T::SIZE)?;
        T::read_from_bytes(raw).map_err(|_| IoctlError::OutOfRange {
            name: T::NAME,
            offset,
            size: T::SIZE,
            len: self.buf.len(),
        })
    }

    /// Decode `T` at `*cursor` and move the cursor past it.
    pub fn decode_advancing<T: Decodable>(&self, cursor: &mut usize) -> Result<T> {
        let value = self.decode::<T>(*cursor)?;
        *cursor += T::SIZE;
        Ok(value)
    }

    /// Decode a NUL-terminated string starting at `offset`. The string ends at
    /// the first NUL or at the end of the buffer.
    pub fn decode_string(&self, offset: usize, encoding: StringEncoding) -> Result<String> {
        let available = self.buf.len().saturating_sub(offset);
        let width = available - available % encoding.unit();
        self.decode_fixed_string(offset, width / encoding.unit(), encoding)
    }

    /// Decode a fixed-width character array of `chars` characters, stopping
    /// early at the first NUL.
    pub fn decode_fixed_string(
        &self,
        offset: usize,
        chars: usize,
        encoding: StringEncoding,
    ) -> Result<String> {
        let raw = self.range("string", offset, chars * encoding.unit())?;
        Ok(match encoding {
            StringEncoding::Ansi => raw
                .iter()
                .take_while(|b| **b != 0)
                .map(|&b| if b.is_ascii() { b as char } else { '?' })
                .collect(),
            StringEncoding::Utf16 => {
                let units: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]))
                    .take_while(|u| *u != 0)
                    .collect();
                String::from_utf16_lossy(&units)
            },
        })
    }

    fn range(&self, name: &'static str, offset: usize, size: usize) -> Result<&'a [u8]> {
        let end = offset.checked_add(size).filter(|end| *end <= self.buf.len());
        match end {
            Some(end) => Ok(&self.buf[offset..end]),
            None => Err(IoctlError::OutOfRange {
                name,
                offset,
                size,
                len: self.buf.len(),
            }),
        }
    }
}

/// Serialize a request structure into a freshly allocated byte buffer.
pub fn encode<T: IntoBytes + Immutable + ?Sized>(value: &T) -> Vec<u8> {
    value.as_bytes().to_vec()
}
