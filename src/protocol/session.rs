// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-exchange session state machine.
//!
//! A [`SessionEngine`] owns one transport connection and drives exactly one
//! request to completion:
//!
//! ```text
//! Idle -> Connecting -> Authenticated -> RequestSent -> Completed
//!            \               \               \
//!             +---------------+---------------+--> Failed
//! ```
//!
//! The whole exchange, connection included, shares one deadline. The
//! transport is disconnected whenever a terminal state is reached; the
//! disconnect itself is bounded by a short grace period.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::Instrument;

use crate::codec::PayloadCodec;
use crate::command::{Command, RequestBuilder, WireMessage};
use crate::credentials::{Credentials, TransportIdentity};
use crate::error::{DeviceError, Error, ProtocolError};
use crate::protocol::transport::bare_address;
use crate::protocol::{SessionConfig, SessionId, Transport, TransportEvent};
use crate::response::{CommandAck, Reply, ResponseParser};

/// Time allowed for the transport to close once the session has ended.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

/// How replies from the peer are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyInterpreter {
    /// Decode the body; the first reply carrying data completes the session.
    StatusReply,
    /// Inspect the status line; acceptance or rejection completes the
    /// session.
    CommandReply,
}

impl ReplyInterpreter {
    fn interpret(self, codec: &PayloadCodec, body: &str) -> Option<Verdict> {
        match self {
            Self::StatusReply => match ResponseParser::new(codec).parse(body) {
                Ok(Reply::Data(value)) => Some(Verdict::Accepted(Some(value))),
                Ok(Reply::Empty) => {
                    tracing::debug!("Reply carried no data yet");
                    None
                }
                Err(error) => {
                    tracing::debug!(%error, "Ignoring undecodable reply");
                    None
                }
            },
            Self::CommandReply => match CommandAck::classify(body) {
                Some(CommandAck::Accepted) => Some(Verdict::Accepted(None)),
                Some(CommandAck::Rejected(status)) => Some(Verdict::Rejected(status)),
                None => {
                    tracing::trace!("Ignoring reply without a recognised status");
                    None
                }
            },
        }
    }
}

enum Verdict {
    Accepted(Option<Value>),
    Rejected(String),
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Not started.
    #[default]
    Idle,
    /// Waiting for the transport to log in.
    Connecting,
    /// Logged in; the request is about to be sent.
    Authenticated,
    /// The request was sent; waiting for the peer.
    RequestSent,
    /// The peer gave a definitive answer.
    Completed,
    /// The session ended without an answer.
    Failed,
}

impl SessionState {
    /// Returns `true` for `Completed` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns a short name for the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Authenticated => "authenticated",
            Self::RequestSent => "request_sent",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a session did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionFailure {
    /// The transport could not connect.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The login secret was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,
    /// No answer arrived before the deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The connection closed before an answer arrived.
    #[error("disconnected")]
    Disconnected,
    /// The request could not be sent.
    #[error("send failed: {0}")]
    SendFailed(String),
    /// The device refused the request; carries the status line.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl SessionFailure {
    fn from_transport(err: ProtocolError, wrap: fn(String) -> Self) -> Self {
        match err {
            ProtocolError::AuthenticationFailed => Self::AuthenticationFailed,
            ProtocolError::Disconnected => Self::Disconnected,
            ProtocolError::ConnectionFailed(detail)
            | ProtocolError::SendFailed(detail)
            | ProtocolError::MalformedReply(detail) => wrap(detail),
            other @ ProtocolError::Timeout(_) => wrap(other.to_string()),
        }
    }
}

impl From<SessionFailure> for Error {
    fn from(failure: SessionFailure) -> Self {
        match failure {
            SessionFailure::ConnectionFailed(detail) => {
                ProtocolError::ConnectionFailed(detail).into()
            }
            SessionFailure::AuthenticationFailed => ProtocolError::AuthenticationFailed.into(),
            SessionFailure::Timeout(timeout) => {
                #[allow(clippy::cast_possible_truncation)]
                let timeout_ms = timeout.as_millis() as u64;
                ProtocolError::Timeout(timeout_ms).into()
            }
            SessionFailure::Disconnected => ProtocolError::Disconnected.into(),
            SessionFailure::SendFailed(detail) => ProtocolError::SendFailed(detail).into(),
            SessionFailure::Rejected(status) => DeviceError::CommandRejected(status).into(),
        }
    }
}

/// The single result of a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionOutcome {
    /// The peer answered positively.
    pub success: bool,
    /// Decoded payload of a status reply.
    pub data: Option<Value>,
    /// The transport rejected the login.
    pub auth_failed: bool,
    /// The request reached the transport.
    pub message_sent: bool,
    /// Why the session did not succeed.
    pub failure: Option<SessionFailure>,
    /// Last non-fatal stream error seen.
    pub stream_error: Option<String>,
    /// Terminal state.
    pub state: SessionState,
}

impl SessionOutcome {
    /// Converts the outcome into the payload or an error.
    ///
    /// # Errors
    ///
    /// Returns the error matching [`SessionOutcome::failure`]: a
    /// `ProtocolError` for transport problems and
    /// `DeviceError::CommandRejected` when the device refused the request.
    pub fn into_result(self) -> crate::Result<Option<Value>> {
        if self.success {
            return Ok(self.data);
        }
        Err(self.failure.unwrap_or(SessionFailure::Disconnected).into())
    }
}

/// Drives one request/response exchange over a [`Transport`].
///
/// # Examples
///
/// ```no_run
/// use wavetherm_lib::Credentials;
/// use wavetherm_lib::command::StatusCommand;
/// use wavetherm_lib::protocol::{SessionConfig, SessionEngine, Transport};
///
/// async fn query<T: Transport>(transport: T, creds: &Credentials) -> wavetherm_lib::Result<()> {
///     let engine = SessionEngine::from_credentials(transport, creds, SessionConfig::default());
///     let data = engine.execute(&StatusCommand).await.into_result()?;
///     println!("{data:?}");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SessionEngine<T> {
    id: SessionId,
    transport: T,
    identity: TransportIdentity,
    codec: PayloadCodec,
    config: SessionConfig,
    state: SessionState,
}

impl<T: Transport> SessionEngine<T> {
    /// Creates an engine from already derived session material.
    #[must_use]
    pub fn new(
        transport: T,
        identity: TransportIdentity,
        codec: PayloadCodec,
        config: SessionConfig,
    ) -> Self {
        Self {
            id: SessionId::new(),
            transport,
            identity,
            codec,
            config,
            state: SessionState::Idle,
        }
    }

    /// Creates an engine, deriving identity and key from `credentials`.
    #[must_use]
    pub fn from_credentials(
        transport: T,
        credentials: &Credentials,
        config: SessionConfig,
    ) -> Self {
        Self::new(
            transport,
            credentials.identity(),
            PayloadCodec::new(credentials.session_key()),
            config,
        )
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Builds the request for `command` and runs the session.
    pub async fn execute<C: Command + ?Sized>(self, command: &C) -> SessionOutcome {
        let request = RequestBuilder::new(&self.codec).build(command);
        let span = tracing::debug_span!("request", path = command.resource_path());
        self.run(request, command.reply_interpreter())
            .instrument(span)
            .await
    }

    /// Runs the session to a terminal state.
    ///
    /// Never fails: every way the exchange can end is described by the
    /// returned [`SessionOutcome`].
    pub async fn run(mut self, request: WireMessage, interpreter: ReplyInterpreter) -> SessionOutcome {
        let span = tracing::debug_span!("session", id = %self.id);
        async move {
            let mut outcome = SessionOutcome::default();

            match self.drive(&request, interpreter, &mut outcome).await {
                Ok(Verdict::Accepted(data)) => {
                    self.transition(SessionState::Completed);
                    outcome.success = true;
                    outcome.data = data;
                }
                Ok(Verdict::Rejected(status)) => {
                    tracing::warn!(%status, "Device rejected request");
                    self.transition(SessionState::Completed);
                    outcome.failure = Some(SessionFailure::Rejected(status));
                }
                Err(failure) => {
                    tracing::debug!(%failure, "Session failed");
                    self.transition(SessionState::Failed);
                    outcome.auth_failed = failure == SessionFailure::AuthenticationFailed;
                    outcome.failure = Some(failure);
                }
            }

            if tokio::time::timeout(DISCONNECT_GRACE, self.transport.disconnect())
                .await
                .is_err()
            {
                tracing::warn!(grace = ?DISCONNECT_GRACE, "Transport did not disconnect in time");
            }
            outcome.state = self.state;
            outcome
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &mut self,
        request: &WireMessage,
        interpreter: ReplyInterpreter,
        outcome: &mut SessionOutcome,
    ) -> Result<Verdict, SessionFailure> {
        let timeout = self.config.timeout();
        let deadline = Instant::now() + timeout;
        let peer = self.identity.peer_address().to_string();

        self.transition(SessionState::Connecting);
        let target = self.config.target();
        tracing::debug!(%target, "Connecting");
        let mut events = within(deadline, timeout, self.transport.connect(&target, &self.identity))
            .await?
            .map_err(|err| SessionFailure::from_transport(err, SessionFailure::ConnectionFailed))?;

        loop {
            let Some(event) = within(deadline, timeout, events.recv()).await? else {
                return Err(SessionFailure::Disconnected);
            };

            match event {
                TransportEvent::Connected => tracing::debug!("Transport connected"),
                TransportEvent::SessionEstablished => {
                    if self.state != SessionState::Connecting {
                        tracing::trace!("Ignoring repeated session establishment");
                        continue;
                    }
                    self.transition(SessionState::Authenticated);

                    within(deadline, timeout, self.transport.announce_presence())
                        .await?
                        .map_err(|err| {
                            SessionFailure::from_transport(err, SessionFailure::SendFailed)
                        })?;
                    within(
                        deadline,
                        timeout,
                        self.transport.send_message(&peer, request.as_str()),
                    )
                    .await?
                    .map_err(|err| SessionFailure::from_transport(err, SessionFailure::SendFailed))?;

                    outcome.message_sent = true;
                    tracing::debug!(bytes = request.len(), "Request sent");
                    self.transition(SessionState::RequestSent);
                }
                TransportEvent::MessageReceived { from, body } => {
                    if !bare_address(&from).eq_ignore_ascii_case(bare_address(&peer)) {
                        tracing::trace!(%from, "Ignoring message from unexpected sender");
                        continue;
                    }
                    if self.state != SessionState::RequestSent {
                        tracing::trace!(state = %self.state, "Ignoring message before request");
                        continue;
                    }
                    tracing::debug!(bytes = body.len(), "Reply received");
                    if let Some(verdict) = interpreter.interpret(&self.codec, &body) {
                        return Ok(verdict);
                    }
                }
                TransportEvent::Disconnected => return Err(SessionFailure::Disconnected),
                TransportEvent::AuthenticationFailed => {
                    return Err(SessionFailure::AuthenticationFailed);
                }
                TransportEvent::StreamError(error) => {
                    tracing::warn!(%error, "Stream error");
                    outcome.stream_error = Some(error);
                }
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = %self.state, to = %next, "Session state");
        self.state = next;
    }
}

async fn within<F: Future>(
    deadline: Instant,
    timeout: Duration,
    future: F,
) -> Result<F::Output, SessionFailure> {
    tokio::time::timeout_at(deadline, future)
        .await
        .map_err(|_| SessionFailure::Timeout(timeout))
}
