// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reply parsing.
//!
//! Replies from the thermostat have the same shape as requests: a header
//! block, a blank line, and a base64 body holding an encrypted
//! `{"value": ...}` document. Status replies are decoded by
//! [`ResponseParser`]; replies to writes are judged by their status line
//! alone, see [`CommandAck`].

mod command;
mod status;

use serde_json::Value;

use crate::codec::{PayloadCodec, strip_padding};
use crate::error::{ParseError, ProtocolError, Result};

pub use command::CommandAck;
pub use status::{StatusSnapshot, ThermostatStatus};

/// A decoded reply body.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The `value` member of the decrypted document.
    Data(Value),
    /// The body decrypted to nothing or to a `null` value; the device has
    /// no data yet.
    Empty,
}

impl Reply {
    /// Returns the payload, if any.
    #[must_use]
    pub fn into_data(self) -> Option<Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Empty => None,
        }
    }
}

/// Splits a reply at its first blank line into header and body blocks.
///
/// Both `\n\n` and `\r\n\r\n` are accepted; the earliest one wins.
#[must_use]
pub fn split_reply(raw: &str) -> Option<(&str, &str)> {
    let lf = raw.find("\n\n").map(|i| (i, 2));
    let crlf = raw.find("\r\n\r\n").map(|i| (i, 4));

    let (index, width) = match (lf, crlf) {
        (Some(a), Some(b)) => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((&raw[..index], &raw[index + width..]))
}

/// Decodes reply bodies with a [`PayloadCodec`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wavetherm_lib::codec::PayloadCodec;
/// use wavetherm_lib::credentials::SessionKey;
/// use wavetherm_lib::response::{Reply, ResponseParser};
///
/// let codec = PayloadCodec::new(SessionKey::from_bytes([3; 32]));
/// let raw = format!("HTTP/1.0 200 OK\nContent-Type: application/json\n\n{}", codec.encrypt(&json!(21.5)));
///
/// let reply = ResponseParser::new(&codec).parse(&raw).unwrap();
/// assert_eq!(reply, Reply::Data(json!(21.5)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser<'a> {
    codec: &'a PayloadCodec,
}

impl<'a> ResponseParser<'a> {
    /// Creates a parser that decrypts bodies with `codec`.
    #[must_use]
    pub const fn new(codec: &'a PayloadCodec) -> Self {
        Self { codec }
    }

    /// Parses one raw reply.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::MalformedReply` if there is no blank line
    /// - `CryptoError` if the body is not valid base64 or not block aligned
    /// - `ParseError` if the plaintext is not UTF-8 JSON with a `value`
    ///   member
    pub fn parse(&self, raw: &str) -> Result<Reply> {
        let (_, body) = split_reply(raw).ok_or_else(|| {
            ProtocolError::MalformedReply(format!(
                "no header/body separator in {} byte reply",
                raw.len()
            ))
        })?;

        let plaintext = strip_padding(&self.codec.decrypt(body.trim())?);
        let text = String::from_utf8(plaintext).map_err(ParseError::from)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Reply::Empty);
        }

        let mut document: Value = serde_json::from_str(text).map_err(ParseError::from)?;
        match document.get_mut("value") {
            Some(Value::Null) => Ok(Reply::Empty),
            Some(value) => Ok(Reply::Data(value.take())),
            None => Err(ParseError::MissingField("value".to_string()).into()),
        }
    }
}
