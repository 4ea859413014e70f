// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat builder.

use std::time::Duration;

use crate::blocking;
use crate::credentials::Credentials;
use crate::device::Thermostat;
use crate::error::Error;
use crate::protocol::{SessionConfig, TransportFactory};

/// Builder for [`Thermostat`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use wavetherm_lib::{Credentials, ThermostatBuilder};
/// # use wavetherm_lib::protocol::TransportFactory;
///
/// # async fn example<F: TransportFactory>(factory: F) -> wavetherm_lib::Result<()> {
/// let creds = Credentials::new("458921440", "AbCdEfGhIjKlMnOp", "hunter2")?;
/// let thermostat = ThermostatBuilder::new(creds)
///     .with_timeout(Duration::from_secs(10))
///     .build(factory);
///
/// let status = thermostat.get_status().await?;
/// println!("{:?}", status.current_temperature);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ThermostatBuilder {
    credentials: Credentials,
    config: SessionConfig,
}

impl ThermostatBuilder {
    /// Creates a builder with the default session configuration.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: SessionConfig::default(),
        }
    }

    /// Replaces the session configuration.
    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the server host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config = self.config.with_host(host);
        self
    }

    /// Sets the server port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the per-session timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds the thermostat; `factory` supplies one transport per session.
    #[must_use]
    pub fn build<F: TransportFactory>(self, factory: F) -> Thermostat<F> {
        Thermostat::from_parts(self.credentials, self.config, factory)
    }

    /// Builds a [`blocking::Thermostat`] for callers without an async runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::Runtime` if the runtime cannot be created.
    pub fn build_blocking<F: TransportFactory>(
        self,
        factory: F,
    ) -> Result<blocking::Thermostat<F>, Error> {
        blocking::Thermostat::new(self.build(factory))
    }
}
