// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `WaveTherm` library.
//!
//! This module provides the error hierarchy for the whole session pipeline:
//! credential validation, transport/session failures, payload cryptography,
//! reply parsing, and device-side rejections.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A user-supplied value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The session with the thermostat failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A payload could not be encrypted or decrypted.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// A decrypted payload could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device answered but refused the operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The blocking runtime could not be started.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A credential was empty after sanitizing.
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),

    /// An unknown user mode was provided.
    #[error("invalid user mode: {0} (expected \"manual\" or \"clock\")")]
    InvalidUserMode(String),

    /// An unknown on/off value was provided.
    #[error("invalid switch state: {0} (expected \"on\" or \"off\")")]
    InvalidSwitch(String),

    /// A temperature was NaN or infinite.
    #[error("temperature must be a finite number, got {0}")]
    NonFiniteTemperature(String),
}

/// Errors raised while driving a session over the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The transport could not establish a connection.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport rejected the login credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// No terminal outcome arrived within the session window.
    #[error("session timed out after {0} ms")]
    Timeout(u64),

    /// The transport dropped the connection before a reply arrived.
    #[error("disconnected before a reply was received")]
    Disconnected,

    /// The request could not be handed to the transport.
    #[error("failed to send request: {0}")]
    SendFailed(String),

    /// A reply did not have a header/body separator.
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Errors related to payload encryption.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The ciphertext is not a whole number of AES blocks.
    #[error("ciphertext length {0} is not a multiple of the 16-byte block size")]
    Misaligned(usize),

    /// The encrypted body is not valid base64.
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors related to parsing decrypted payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The plaintext is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Expected field is missing from the payload.
    #[error("missing field in payload: {0}")]
    MissingField(String),

    /// Unexpected payload shape.
    #[error("unexpected payload format: {0}")]
    UnexpectedFormat(String),
}

/// Errors reported by the device itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device answered a command with an error status.
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::EmptyCredential("serial number");
        assert_eq!(err.to_string(), "serial number must not be empty");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::AuthenticationFailed.into();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
    }

    #[test]
    fn crypto_error_display() {
        let err = CryptoError::Misaligned(17);
        assert_eq!(
            err.to_string(),
            "ciphertext length 17 is not a multiple of the 16-byte block size"
        );
    }

    #[test]
    fn timeout_display() {
        let err = ProtocolError::Timeout(15_000);
        assert_eq!(err.to_string(), "session timed out after 15000 ms");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("value".to_string());
        assert_eq!(err.to_string(), "missing field in payload: value");
    }
}
