//! Request sequences that span several device calls.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Common structures and traits for state machines.
pub mod common;
/// Enable-then-issue sequence of the S.M.A.R.T. drive commands.
pub mod smart_states;
