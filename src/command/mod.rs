// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat request definitions.
//!
//! The thermostat speaks a small pseudo-HTTP dialect carried in the body of
//! transport messages. This module provides typed commands for the
//! resources the library touches and the [`RequestBuilder`] that renders
//! them into [`WireMessage`]s.
//!
//! # Available Commands
//!
//! | Command Type | Method | Resource |
//! |-------------|--------|----------|
//! | [`StatusCommand`] | GET | `ecus/rrc/uiStatus` |
//! | [`SettingCommand::UserMode`] | PUT | `heatingCircuits/hc1/usermode` |
//! | [`SettingCommand::ManualTemperature`] | PUT | `heatingCircuits/hc1/temperatureRoomManual` |
//! | [`SettingCommand::OverrideTemperature`] | PUT | `heatingCircuits/hc1/manualTempOverride/temperature` |
//! | [`SettingCommand::OverrideStatus`] | PUT | `heatingCircuits/hc1/manualTempOverride/status` |
//!
//! # Examples
//!
//! ```
//! use wavetherm_lib::codec::PayloadCodec;
//! use wavetherm_lib::command::{RequestBuilder, StatusCommand};
//! use wavetherm_lib::credentials::SessionKey;
//!
//! let codec = PayloadCodec::new(SessionKey::from_bytes([0; 32]));
//! let message = RequestBuilder::new(&codec).build(&StatusCommand);
//!
//! assert_eq!(
//!     message.as_str(),
//!     "GET /ecus/rrc/uiStatus HTTP /1.0\nUser-Agent: NefitEasy"
//! );
//! ```

mod setting;
mod status;

use std::fmt;

use serde_json::Value;

use crate::codec::PayloadCodec;
use crate::protocol::ReplyInterpreter;

pub use setting::SettingCommand;
pub use status::StatusCommand;

/// User agent announced on every request.
pub const USER_AGENT: &str = "NefitEasy";

/// Resource holding the abbreviated status snapshot.
pub const STATUS_PATH: &str = "ecus/rrc/uiStatus";

/// Resource holding the program mode.
pub const USER_MODE_PATH: &str = "heatingCircuits/hc1/usermode";

/// Resource holding the manual-mode set point.
pub const MANUAL_TEMPERATURE_PATH: &str = "heatingCircuits/hc1/temperatureRoomManual";

/// Resource holding the temporary override set point.
pub const OVERRIDE_TEMPERATURE_PATH: &str = "heatingCircuits/hc1/manualTempOverride/temperature";

/// Resource toggling the temporary override.
pub const OVERRIDE_STATUS_PATH: &str = "heatingCircuits/hc1/manualTempOverride/status";

/// Request method understood by the thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Write a resource.
    Put,
}

impl Method {
    /// Returns the method token as written on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that can be sent to the thermostat.
pub trait Command {
    /// Returns the resource path, without a leading slash.
    fn resource_path(&self) -> &'static str;

    /// Returns the value written by this command, if any.
    ///
    /// Queries return `None`.
    fn value(&self) -> Option<Value>;

    /// Returns the request method.
    fn method(&self) -> Method {
        if self.value().is_some() {
            Method::Put
        } else {
            Method::Get
        }
    }

    /// Returns how the session should judge replies to this command.
    fn reply_interpreter(&self) -> ReplyInterpreter {
        match self.method() {
            Method::Get => ReplyInterpreter::StatusReply,
            Method::Put => ReplyInterpreter::CommandReply,
        }
    }
}

/// The body text of one transport message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage(String);

impl WireMessage {
    /// Wraps raw message text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the message length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the message is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WireMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WireMessage> for String {
    fn from(message: WireMessage) -> Self {
        message.0
    }
}

/// Renders requests into wire text.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    codec: &'a PayloadCodec,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder that encrypts bodies with `codec`.
    #[must_use]
    pub const fn new(codec: &'a PayloadCodec) -> Self {
        Self { codec }
    }

    /// Builds a bodiless read request.
    #[must_use]
    pub fn build_get(&self, path: &str) -> WireMessage {
        WireMessage(format!(
            "GET /{} HTTP /1.0\nUser-Agent: {USER_AGENT}",
            path.trim_start_matches('/')
        ))
    }

    /// Builds a write request carrying `value` as an encrypted body.
    ///
    /// `Content-Length` is the byte length of the base64 body.
    #[must_use]
    pub fn build_put(&self, path: &str, value: &Value) -> WireMessage {
        let body = self.codec.encrypt(value);
        WireMessage(format!(
            "PUT {} HTTP/1.0\nContent-Type: application/json\nContent-Length: {}\nUser-Agent: {USER_AGENT}\n\n\n{body}\n",
            path.trim_start_matches('/'),
            body.len()
        ))
    }

    /// Builds the request for `command`.
    #[must_use]
    pub fn build<C: Command + ?Sized>(&self, command: &C) -> WireMessage {
        match command.value() {
            Some(value) => self.build_put(command.resource_path(), &value),
            None => self.build_get(command.resource_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::codec::strip_padding;
    use crate::credentials::SessionKey;
    use crate::types::{SwitchState, Temperature, UserMode};

    fn codec() -> PayloadCodec {
        PayloadCodec::new(SessionKey::from_bytes([0x11; 32]))
    }

    fn split_put(message: &WireMessage) -> (&str, &str) {
        message
            .as_str()
            .split_once("\n\n\n")
            .expect("PUT has a header/body separator")
    }

    #[test]
    fn get_request_format() {
        let codec = codec();
        let message = RequestBuilder::new(&codec).build_get("ecus/rrc/uiStatus");
        assert_eq!(
            message.as_str(),
            "GET /ecus/rrc/uiStatus HTTP /1.0\nUser-Agent: NefitEasy"
        );
    }

    #[test]
    fn get_request_does_not_double_slash() {
        let codec = codec();
        let message = RequestBuilder::new(&codec).build_get("/ecus/rrc/uiStatus");
        assert!(message.as_str().starts_with("GET /ecus/rrc/uiStatus "));
    }

    #[test]
    fn put_request_headers() {
        let codec = codec();
        let message = RequestBuilder::new(&codec).build_put(USER_MODE_PATH, &json!("clock"));
        let (headers, _) = split_put(&message);
        let lines: Vec<&str> = headers.lines().collect();

        assert_eq!(lines[0], "PUT heatingCircuits/hc1/usermode HTTP/1.0");
        assert_eq!(lines[1], "Content-Type: application/json");
        assert!(lines[2].starts_with("Content-Length: "));
        assert_eq!(lines[3], "User-Agent: NefitEasy");
        assert!(message.as_str().ends_with('\n'));
    }

    #[test]
    fn content_length_matches_body() {
        let codec = codec();
        let builder = RequestBuilder::new(&codec);
        for value in [json!(21.5), json!("on"), json!("a considerably longer string")] {
            let message = builder.build_put(OVERRIDE_TEMPERATURE_PATH, &value);
            let (headers, body) = split_put(&message);
            let body = body.trim_end_matches('\n');
            let declared: usize = headers
                .lines()
                .find_map(|l| l.strip_prefix("Content-Length: "))
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(declared, body.len());
        }
    }

    #[test]
    fn put_body_decrypts_to_value() {
        let codec = codec();
        let message = RequestBuilder::new(&codec).build_put(MANUAL_TEMPERATURE_PATH, &json!(21.5));
        let (_, body) = split_put(&message);
        let plain = strip_padding(&codec.decrypt(body).unwrap());
        assert_eq!(plain, br#"{"value":21.5}"#);
    }

    #[test]
    fn build_dispatches_on_method() {
        let codec = codec();
        let builder = RequestBuilder::new(&codec);

        assert!(builder.build(&StatusCommand).as_str().starts_with("GET "));

        let put = builder.build(&SettingCommand::UserMode(UserMode::Manual));
        assert!(put.as_str().starts_with("PUT heatingCircuits/hc1/usermode "));

        let put = builder.build(&SettingCommand::OverrideStatus(SwitchState::On));
        let (_, body) = split_put(&put);
        assert_eq!(
            strip_padding(&codec.decrypt(body).unwrap()),
            br#"{"value":"on"}"#
        );

        let temp = Temperature::new(22.0).unwrap();
        let put = builder.build(&SettingCommand::OverrideTemperature(temp));
        assert!(put.as_str().starts_with(
            "PUT heatingCircuits/hc1/manualTempOverride/temperature HTTP/1.0\n"
        ));
    }

    #[test]
    fn default_interpreter_follows_method() {
        assert_eq!(StatusCommand.method(), Method::Get);
        assert_eq!(
            StatusCommand.reply_interpreter(),
            ReplyInterpreter::StatusReply
        );

        let cmd = SettingCommand::UserMode(UserMode::Clock);
        assert_eq!(cmd.method(), Method::Put);
        assert_eq!(cmd.reply_interpreter(), ReplyInterpreter::CommandReply);
    }

    #[test]
    fn wire_message_accessors() {
        let message = WireMessage::new("hello");
        assert_eq!(message.len(), 5);
        assert!(!message.is_empty());
        assert_eq!(message.to_string(), "hello");
        assert_eq!(String::from(message), "hello");
    }
}
