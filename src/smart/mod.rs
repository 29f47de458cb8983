//! S.M.A.R.T. attribute pipeline.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Attribute/threshold pairing.
pub mod pairing;
/// Per-device pipeline with its version, threshold and identity caches.
pub mod pipeline;

pub use pairing::{AttributeThreshold, Paired, pair_attributes};
pub use pipeline::{SmartPipeline, SmartState};
