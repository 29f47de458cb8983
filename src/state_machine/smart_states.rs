// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    control_code::disc::{SMART_RCV_DRIVE_DATA, SMART_SEND_DRIVE_COMMAND},
    device::{Device, DeviceBackend, Response},
    error::{IoctlError, Result},
    models::smart::{
        IdeCommand, SendCmdInParams, SendCmdOutParams, SmartDriverStatus, SmartFeature,
    },
    state_machine::common::{StateMachine, StateMachineCtx, Transition},
};

/// Drive command issued by a [`SmartCommandCtx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartCommand {
    ReadAttributes,
    ReadThresholds,
    ReturnStatus,
    Identify,
}

impl SmartCommand {
    /// S.M.A.R.T. feature commands need the feature set enabled first;
    /// IDENTIFY does not.
    fn needs_enable(self) -> bool {
        !matches!(self, SmartCommand::Identify)
    }

    fn request(self, drive_number: u8) -> (u32, SendCmdInParams) {
        match self {
            SmartCommand::ReadAttributes => (
                SMART_RCV_DRIVE_DATA,
                SendCmdInParams::smart(SmartFeature::ReadAttributes, drive_number),
            ),
            SmartCommand::ReadThresholds => (
                SMART_RCV_DRIVE_DATA,
                SendCmdInParams::smart(SmartFeature::ReadThresholds, drive_number),
            ),
            SmartCommand::ReturnStatus => (
                SMART_SEND_DRIVE_COMMAND,
                SendCmdInParams::smart(SmartFeature::ReturnStatus, drive_number),
            ),
            SmartCommand::Identify => (
                SMART_RCV_DRIVE_DATA,
                SendCmdInParams::identify(IdeCommand::Identify, drive_number),
            ),
        }
    }
}

/// Enable → Issue sequence for one drive command.
#[derive(Debug)]
pub struct SmartCommandCtx<'d, B: DeviceBackend> {
    pub device: &'d Device<B>,
    pub drive_number: u8,
    pub command: SmartCommand,

    last_response: Option<SendCmdOutParams>,
    state: Option<SmartStates>,
}

impl<'d, B: DeviceBackend> SmartCommandCtx<'d, B> {
    pub fn new(device: &'d Device<B>, drive_number: u8, command: SmartCommand) -> Self {
        let state = if command.needs_enable() {
            SmartStates::Enable(Enable)
        } else {
            SmartStates::Issue(Issue)
        };
        Self {
            device,
            drive_number,
            command,
            last_response: None,
            state: Some(state),
        }
    }

    fn send(&self, code: u32, input: &SendCmdInParams) -> Result<SendCmdOutParams> {
        let rsp = self.device.send(code, Some(input))?;
        check_driver_status(rsp)
    }

    fn send_enable(&self) -> Result<()> {
        let input = SendCmdInParams::smart(SmartFeature::Enable, self.drive_number);
        self.send(SMART_SEND_DRIVE_COMMAND, &input)?;
        Ok(())
    }

    fn send_command(&mut self) -> Result<()> {
        let (code, input) = self.command.request(self.drive_number);
        let out = self.send(code, &input)?;
        self.last_response = Some(out);
        Ok(())
    }
}

/// The driver status is reported inside the output block and takes
/// precedence over the OS result, so a rejected command surfaces as the
/// specific driver error.
pub fn check_driver_status(rsp: Response<SendCmdOutParams>) -> Result<SendCmdOutParams> {
    match rsp.output.status.status() {
        SmartDriverStatus::NoError => rsp.into_result(),
        other => Err(IoctlError::SmartDriver(other)),
    }
}

#[derive(Debug)]
pub struct Enable;
#[derive(Debug)]
pub struct Issue;

#[derive(Debug)]
pub enum SmartStates {
    Enable(Enable),
    Issue(Issue),
}

type SmartStepOut = Transition<SmartStates, Result<()>>;

impl<'d, B: DeviceBackend> StateMachine<SmartCommandCtx<'d, B>, SmartStepOut> for Enable {
    fn step(&self, ctx: &mut SmartCommandCtx<'d, B>) -> SmartStepOut {
        match ctx.send_enable() {
            Ok(()) => Transition::Next(SmartStates::Issue(Issue), Ok(())),
            Err(e) => Transition::Done(Err(e)),
        }
    }
}

impl<'d, B: DeviceBackend> StateMachine<SmartCommandCtx<'d, B>, SmartStepOut> for Issue {
    fn step(&self, ctx: &mut SmartCommandCtx<'d, B>) -> SmartStepOut {
        Transition::Done(ctx.send_command())
    }
}

impl<'d, B: DeviceBackend> StateMachineCtx<SmartCommandCtx<'d, B>, SendCmdOutParams>
    for SmartCommandCtx<'d, B>
{
    fn execute(&mut self) -> Result<SendCmdOutParams> {
        debug!(command = ?self.command, drive = self.drive_number, "smart command");
        loop {
            let Some(state) = self.state.take() else {
                break;
            };
            let trans = match state {
                SmartStates::Enable(s) => s.step(self),
                SmartStates::Issue(s) => s.step(self),
            };

            match trans {
                Transition::Next(next_state, r) => {
                    r?;
                    self.state = Some(next_state);
                },
                Transition::Done(r) => {
                    r?;
                    break;
                },
            }
        }

        self.last_response.take().ok_or(IoctlError::SmartDriver(
            SmartDriverStatus::InvalidBuffer,
        ))
    }
}
