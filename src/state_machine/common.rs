// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::error::Result;

/// Outcome of one step: move on to another state, or finish.
pub enum Transition<S, R> {
    Next(S, R),
    Done(R),
}

/// One state of a request sequence. Steps block on the device call.
pub trait StateMachine<Ctx, Resp> {
    fn step(&self, ctx: &mut Ctx) -> Resp;
}

pub trait StateMachineCtx<Ctx, Out = ()>: Sized {
    fn execute(&mut self) -> Result<Out>;
}
