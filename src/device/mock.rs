// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::{
    device::{AccessMode, Device, DeviceBackend, IoStatus, ShareMode},
    error::os_error,
};

/// One scripted driver reply.
#[derive(Debug, Clone, Default)]
pub struct MockReply {
    pub success: bool,
    pub error: u32,
    /// Copied to the start of the output buffer, clipped to its length.
    pub data: Vec<u8>,
    /// Overrides the reported byte count; defaults to the copied length.
    pub bytes_returned: Option<u32>,
}

impl MockReply {
    pub fn ok(data: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn fail(error: u32) -> Self {
        Self {
            error,
            ..Default::default()
        }
    }

    /// A failure that still fills part of the output buffer.
    pub fn fail_with(error: u32, data: impl Into<Vec<u8>>) -> Self {
        Self {
            error,
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn with_bytes_returned(mut self, n: u32) -> Self {
        self.bytes_returned = Some(n);
        self
    }
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub code: u32,
    pub input: Vec<u8>,
    pub out_len: usize,
}

#[derive(Debug, Default)]
struct MockState {
    replies: RefCell<HashMap<u32, VecDeque<MockReply>>>,
    sticky: RefCell<HashMap<u32, MockReply>>,
    calls: RefCell<Vec<MockCall>>,
    closes: Cell<usize>,
    close_error: Cell<Option<u32>>,
    power: Cell<Option<std::result::Result<bool, u32>>>,
}

/// In-memory [`DeviceBackend`] driven by scripted replies.
///
/// Clones share state, so a test keeps one clone for inspection after handing
/// the other to a [`Device`]. Codes without a script fail with
/// `INVALID_FUNCTION`, the way a driver answers a code it does not know.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Rc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next call with `code`. Queued replies are
    /// consumed in order.
    pub fn on(&self, code: u32, reply: MockReply) -> &Self {
        self.state
            .replies
            .borrow_mut()
            .entry(code)
            .or_default()
            .push_back(reply);
        self
    }

    /// Reply to every call with `code` once the queue for it is drained.
    pub fn always(&self, code: u32, reply: MockReply) -> &Self {
        self.state.sticky.borrow_mut().insert(code, reply);
        self
    }

    /// Make the next close report `error`.
    pub fn fail_close(&self, error: u32) -> &Self {
        self.state.close_error.set(Some(error));
        self
    }

    /// Answer power-state queries with `state`. Unscripted queries report
    /// the device as on.
    pub fn power(&self, state: std::result::Result<bool, u32>) -> &Self {
        self.state.power.set(Some(state));
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.calls.borrow().clone()
    }

    /// Codes received so far, in order.
    pub fn codes(&self) -> Vec<u32> {
        self.state.calls.borrow().iter().map(|c| c.code).collect()
    }

    pub fn close_count(&self) -> usize {
        self.state.closes.get()
    }

    /// Wrap a clone of this backend in a device with the given path.
    pub fn device(&self, path: impl Into<String>) -> Device<MockBackend> {
        Device::with_backend(path, AccessMode::READ_WRITE, ShareMode::READ_WRITE, self.clone())
    }

    fn next_reply(&self, code: u32) -> MockReply {
        if let Some(r) = self
            .state
            .replies
            .borrow_mut()
            .get_mut(&code)
            .and_then(VecDeque::pop_front)
        {
            return r;
        }
        self.state
            .sticky
            .borrow()
            .get(&code)
            .cloned()
            .unwrap_or_else(|| MockReply::fail(os_error::INVALID_FUNCTION))
    }
}

impl DeviceBackend for MockBackend {
    fn io_control(&self, code: u32, input: &[u8], output: &mut [u8]) -> IoStatus {
        self.state.calls.borrow_mut().push(MockCall {
            code,
            input: input.to_vec(),
            out_len: output.len(),
        });

        let reply = self.next_reply(code);
        let n = reply.data.len().min(output.len());
        output[..n].copy_from_slice(&reply.data[..n]);
        let bytes = reply.bytes_returned.unwrap_or(n as u32);

        if reply.success {
            IoStatus::completed(bytes)
        } else {
            IoStatus::failed(reply.error, bytes)
        }
    }

    fn power_state(&self) -> Result<bool, u32> {
        self.state.power.get().unwrap_or(Ok(true))
    }

    fn close(&mut self) -> Result<(), u32> {
        self.state.closes.set(self.state.closes.get() + 1);
        match self.state.close_error.take() {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }
}
