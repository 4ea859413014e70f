// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::credentials::SERVER_DOMAIN;

/// Configuration shared by every session a thermostat opens.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wavetherm_lib::protocol::SessionConfig;
///
/// let config = SessionConfig::default().with_timeout(Duration::from_secs(5));
/// assert_eq!(config.port(), 5222);
/// assert_eq!(config.timeout(), Duration::from_secs(5));
///
/// let config: SessionConfig = serde_json::from_str(r#"{"timeout_ms": 2500}"#).unwrap();
/// assert_eq!(config.host(), "wa2-mz36-qrmzh6.bosch.de");
/// assert_eq!(config.timeout(), Duration::from_millis(2500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    host: String,
    port: u16,
    #[serde(rename = "timeout_ms", deserialize_with = "millis")]
    timeout: Duration,
}

impl SessionConfig {
    /// Default server host.
    pub const DEFAULT_HOST: &'static str = SERVER_DOMAIN;
    /// Default server port.
    pub const DEFAULT_PORT: u16 = 5222;
    /// Default time allowed for one complete exchange.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the server port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the session timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the server host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the server port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the session timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the endpoint sessions connect to.
    #[must_use]
    pub fn target(&self) -> ConnectTarget {
        ConnectTarget {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// The endpoint a transport should connect to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectTarget {
    host: String,
    port: u16,
}

impl ConnectTarget {
    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether the transport should negotiate TLS.
    ///
    /// The thermostat service is plaintext; payloads are protected by the
    /// session key instead.
    #[must_use]
    pub const fn tls(&self) -> bool {
        false
    }
}

impl fmt::Display for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.host(), "wa2-mz36-qrmzh6.bosch.de");
        assert_eq!(config.port(), 5222);
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn builder_methods() {
        let config = SessionConfig::new()
            .with_host("localhost")
            .with_port(15222)
            .with_timeout(Duration::from_millis(300));
        let target = config.target();
        assert_eq!(target.to_string(), "localhost:15222");
        assert!(!target.tls());
        assert_eq!(config.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: SessionConfig = serde_json::from_str(r#"{"port": 5223}"#).unwrap();
        assert_eq!(config.port(), 5223);
        assert_eq!(config.timeout(), SessionConfig::DEFAULT_TIMEOUT);

        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }
}
