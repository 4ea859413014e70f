// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session plumbing between the library and the messaging transport.
//!
//! # Components
//!
//! - [`Transport`]: the seam a messaging client implements
//! - [`SessionConfig`]: endpoint and timeout shared by all sessions
//! - [`SessionEngine`]: drives one request to a [`SessionOutcome`]
//!
//! Every operation runs in its own short-lived session on a fresh
//! transport; nothing is pooled or shared between sessions.

mod config;
mod session;
mod session_id;
mod transport;

pub use config::{ConnectTarget, SessionConfig};
pub use session::{ReplyInterpreter, SessionEngine, SessionFailure, SessionOutcome, SessionState};
pub use session_id::SessionId;
pub use transport::{Transport, TransportEvent, TransportFactory};
