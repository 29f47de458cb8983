// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{iter::Zip, vec::IntoIter};

use crate::{
    error::{IoctlError, Result},
    models::smart::{AttrThreshold, DriveAttribute},
};

/// An attribute record with the threshold record at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeThreshold {
    pub attribute: DriveAttribute,
    pub threshold: AttrThreshold,
}

impl AttributeThreshold {
    #[inline]
    pub fn id(&self) -> u8 {
        self.attribute.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.attribute.name()
    }

    /// Unused slot of the 30-entry table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attribute.id == 0
    }

    /// Normalized value at or below a non-zero warranty threshold.
    pub fn is_failing(&self) -> bool {
        let threshold = self.threshold.threshold;
        threshold != 0 && self.attribute.value <= threshold
    }
}

/// Lazy pairs in table order. See [`pair_attributes`].
#[derive(Debug, Clone)]
pub struct Paired {
    inner: Zip<IntoIter<DriveAttribute>, IntoIter<AttrThreshold>>,
}

impl Iterator for Paired {
    type Item = AttributeThreshold;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(attribute, threshold)| AttributeThreshold {
                attribute,
                threshold,
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Paired {}

/// Zip attributes with thresholds by position.
///
/// Unequal lengths fail with [`IoctlError::SizeMismatch`] before any pair is
/// produced.
pub fn pair_attributes(
    attributes: Vec<DriveAttribute>,
    thresholds: Vec<AttrThreshold>,
) -> Result<Paired> {
    if attributes.len() != thresholds.len() {
        return Err(IoctlError::SizeMismatch {
            attributes: attributes.len(),
            thresholds: thresholds.len(),
        });
    }
    Ok(Paired {
        inner: attributes.into_iter().zip(thresholds),
    })
}
