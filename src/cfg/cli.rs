// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Absolute, canonical form of `rel`, resolved against the working
/// directory when relative. The file must exist.
pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);
    let abs = match p.is_absolute() {
        true => p.to_path_buf(),
        false => std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p),
    };
    abs.canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))
}
