// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::cell::Cell;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::{
    control_code::disc::{SMART_GET_VERSION, SMART_SEND_DRIVE_COMMAND},
    device::{Device, DeviceBackend},
    error::{IoctlError, Result},
    models::smart::{
        AttrThreshold, DriveAttribute, GetVersionOutParams, IdSector, SendCmdInParams,
        SendCmdOutParams, SmartCapabilities, SmartFeature, SmartHealth,
    },
    smart::pairing::{Paired, pair_attributes},
    state_machine::{
        common::StateMachineCtx,
        smart_states::{SmartCommand, SmartCommandCtx, check_driver_status},
    },
};

/// Where the pipeline stands for its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartState {
    Unknown,
    VersionChecked,
    Unsupported,
    Enabled,
    AttributesRead,
    ThresholdsRead,
}

/// S.M.A.R.T. access for one drive behind an open device.
///
/// The version, the thresholds and the IDENTIFY data are cached for the
/// lifetime of the pipeline; attributes and the health status are read fresh
/// on every call. The caches live in cells, so a pipeline stays on the
/// thread that created it.
#[derive(Debug)]
pub struct SmartPipeline<'d, B: DeviceBackend> {
    device: &'d Device<B>,
    drive_number: u8,
    state: Cell<SmartState>,
    version: OnceCell<Option<GetVersionOutParams>>,
    thresholds: OnceCell<Vec<AttrThreshold>>,
    identity: OnceCell<IdSector>,
}

impl<'d, B: DeviceBackend> SmartPipeline<'d, B> {
    pub fn new(device: &'d Device<B>) -> Self {
        Self::with_drive_number(device, 0)
    }

    /// `drive_number` goes into the command block; IDE controllers use it
    /// to select one of up to four drives.
    pub fn with_drive_number(device: &'d Device<B>, drive_number: u8) -> Self {
        Self {
            device,
            drive_number,
            state: Cell::new(SmartState::Unknown),
            version: OnceCell::new(),
            thresholds: OnceCell::new(),
            identity: OnceCell::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> SmartState {
        self.state.get()
    }

    #[inline]
    pub fn drive_number(&self) -> u8 {
        self.drive_number
    }

    fn set_state(&self, next: SmartState) {
        let prev = self.state.replace(next);
        if prev != next {
            debug!(path = self.device.path(), ?prev, ?next, "smart state");
        }
    }

    /// Driver version and capabilities. An all-zero answer is `None`.
    ///
    /// The block is decoded whatever the OS result; a driver that rejects
    /// the request leaves it zeroed, so it reads as "not present" and is
    /// cached like any other answer.
    pub fn get_version(&self) -> Result<Option<GetVersionOutParams>> {
        let version = self.version.get_or_try_init(|| {
            let rsp = self.device.query::<GetVersionOutParams>(SMART_GET_VERSION)?;
            let v = rsp.output;
            debug!(
                path = self.device.path(),
                success = rsp.success,
                error = rsp.error,
                ?v,
                "smart version cached"
            );
            Ok::<_, IoctlError>((!v.is_zeroed()).then_some(v))
        })?;
        if self.state.get() == SmartState::Unknown {
            let supported = version
                .is_some_and(|v| v.capabilities().contains(SmartCapabilities::SMART_CMD));
            self.set_state(SmartState::VersionChecked);
            if !supported {
                self.set_state(SmartState::Unsupported);
            }
        }
        Ok(*version)
    }

    pub fn is_smart_supported(&self) -> Result<bool> {
        Ok(self
            .get_version()?
            .is_some_and(|v| v.capabilities().contains(SmartCapabilities::SMART_CMD)))
    }

    /// ENABLE SMART OPERATIONS. Reads issue it on their own.
    pub fn enable(&self) -> Result<()> {
        let input = SendCmdInParams::smart(SmartFeature::Enable, self.drive_number);
        check_driver_status(self.device.send(SMART_SEND_DRIVE_COMMAND, Some(&input))?)?;
        self.set_state(SmartState::Enabled);
        Ok(())
    }

    fn run(&self, command: SmartCommand) -> Result<SendCmdOutParams> {
        SmartCommandCtx::new(self.device, self.drive_number, command).execute()
    }

    /// Current attribute table (30 records, unused slots have id 0).
    pub fn read_attributes(&self) -> Result<Vec<DriveAttribute>> {
        let out = self.run(SmartCommand::ReadAttributes)?;
        let attributes = out.records::<DriveAttribute>()?;
        self.set_state(SmartState::AttributesRead);
        Ok(attributes)
    }

    /// Threshold table, read once and then served from cache until
    /// [`SmartPipeline::reset_thresholds`].
    pub fn read_thresholds(&self) -> Result<&[AttrThreshold]> {
        let thresholds = self.thresholds.get_or_try_init(|| {
            let out = self.run(SmartCommand::ReadThresholds)?;
            let records = out.records::<AttrThreshold>()?;
            self.set_state(SmartState::ThresholdsRead);
            debug!(path = self.device.path(), "smart thresholds cached");
            Ok::<_, IoctlError>(records)
        })?;
        Ok(thresholds)
    }

    pub fn reset_thresholds(&mut self) {
        self.thresholds.take();
    }

    /// Fresh attributes paired with the cached thresholds.
    pub fn iterate_paired(&self) -> Result<Paired> {
        let attributes = self.read_attributes()?;
        let thresholds = self.read_thresholds()?.to_vec();
        pair_attributes(attributes, thresholds)
    }

    /// IDENTIFY DEVICE data, cached.
    pub fn identify(&self) -> Result<&IdSector> {
        self.identity.get_or_try_init(|| {
            let out = self.run(SmartCommand::Identify)?;
            out.identify_sector()
        })
    }

    /// RETURN SMART STATUS verdict.
    pub fn health_status(&self) -> Result<SmartHealth> {
        let out = self.run(SmartCommand::ReturnStatus)?;
        let regs = out.returned_regs()?;
        Ok(SmartHealth::from(&regs))
    }
}
