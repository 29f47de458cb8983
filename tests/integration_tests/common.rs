// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::PathBuf;

use anyhow::{Context, Result};
use smart_ioctl_rs::cfg::{config::Config, logger::init_logger};
use tracing_appender::non_blocking::WorkerGuard;

pub fn test_path() -> String {
    std::env::var("TEST_CONFIG").unwrap_or_else(|_| "tests/config.yaml".into())
}

pub fn load_config() -> Result<Config> {
    let pb = PathBuf::from(test_path());
    Config::load_from_file(&pb).with_context(|| format!("failed to load {pb:?}"))
}

/// The subscriber is global; only the first caller installs it.
pub fn init_test_logger() -> Option<WorkerGuard> {
    init_logger("tests/config_logger.yaml").ok()
}
