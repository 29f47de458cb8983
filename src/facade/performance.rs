// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::{debug, warn};

use crate::{
    control_code::disc::{PERFORMANCE, PERFORMANCE_OFF},
    device::{Device, DeviceBackend},
    error::Result,
    facade::completed,
    models::disc::DiskPerformance,
};

/// Disk performance counters.
///
/// The first query switches the counters on; they are switched off by
/// [`Performance::stop`] or when the session is dropped.
#[derive(Debug)]
pub struct Performance<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    active: bool,
}

impl<'d, B: DeviceBackend> Performance<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self {
            device,
            active: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switch the counters on. Calling it on an active session only takes
    /// another sample.
    pub fn start(&mut self) -> Result<()> {
        self.query().map(|_| ())
    }

    /// Current counter snapshot.
    pub fn query(&mut self) -> Result<DiskPerformance> {
        let perf = self.device.send_checked(PERFORMANCE)?;
        if !self.active {
            debug!(path = self.device.path(), "disk performance counters on");
        }
        self.active = true;
        Ok(perf)
    }

    /// No-op unless the counters were switched on by this session.
    pub fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        completed(self.device.control(PERFORMANCE_OFF)?)?;
        self.active = false;
        debug!(path = self.device.path(), "disk performance counters off");
        Ok(())
    }
}

impl<B: DeviceBackend> Drop for Performance<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(path = self.device.path(), error = %e, "failed to stop performance counters");
        }
    }
}
