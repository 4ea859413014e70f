// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The messaging transport seam.
//!
//! The thermostat is reached through an XMPP-family messaging service. This
//! crate does not implement that stack; callers plug one in through the
//! [`Transport`] trait. A transport delivers everything it observes on the
//! connection as [`TransportEvent`]s over a channel, the same way the event
//! loop of a message-broker client forwards incoming publications.

use tokio::sync::mpsc;

use crate::credentials::TransportIdentity;
use crate::error::ProtocolError;
use crate::protocol::ConnectTarget;

/// Something that happened on the transport connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The socket is open; login has not completed yet.
    Connected,
    /// Login succeeded and the stream is ready for messages.
    SessionEstablished,
    /// A chat message arrived.
    MessageReceived {
        /// Full sender address, possibly with a resource part.
        from: String,
        /// Message body text.
        body: String,
    },
    /// The connection closed.
    Disconnected,
    /// The server rejected the login secret.
    AuthenticationFailed,
    /// The stream reported a recoverable error.
    StreamError(String),
}

/// A connection to the messaging service.
///
/// A transport is used for exactly one session and then dropped.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Opens the connection and starts logging in as `identity`.
    ///
    /// Progress and incoming messages are reported on the returned channel.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the endpoint cannot be
    /// reached.
    async fn connect(
        &mut self,
        target: &ConnectTarget,
        identity: &TransportIdentity,
    ) -> Result<mpsc::Receiver<TransportEvent>, ProtocolError>;

    /// Announces presence and requests the roster.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::SendFailed` if the stanza cannot be written.
    async fn announce_presence(&mut self) -> Result<(), ProtocolError>;

    /// Sends a chat message with `body` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::SendFailed` if the message cannot be written.
    async fn send_message(&mut self, to: &str, body: &str) -> Result<(), ProtocolError>;

    /// Closes the connection. Must be safe to call more than once.
    async fn disconnect(&mut self);
}

/// Creates a fresh [`Transport`] for each session.
///
/// Any `Fn() -> T` where `T: Transport` is a factory.
pub trait TransportFactory {
    /// The transport type produced.
    type Transport: Transport;

    /// Creates a new, unconnected transport.
    fn create(&self) -> Self::Transport;
}

impl<F, T> TransportFactory for F
where
    F: Fn() -> T,
    T: Transport,
{
    type Transport = T;

    fn create(&self) -> T {
        self()
    }
}

/// Strips the resource part from a transport address.
#[must_use]
pub(crate) fn bare_address(address: &str) -> &str {
    address.split_once('/').map_or(address, |(bare, _)| bare)
}
