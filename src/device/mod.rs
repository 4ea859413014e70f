// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level thermostat API.
//!
//! [`Thermostat`] combines credentials, session configuration and a
//! transport factory. Each call opens one or more short-lived sessions;
//! the only state kept between calls is the last status read.
//!
//! ```no_run
//! use wavetherm_lib::{Credentials, Thermostat, UserMode};
//! # use wavetherm_lib::protocol::TransportFactory;
//!
//! # async fn example<F: TransportFactory>(factory: F) -> wavetherm_lib::Result<()> {
//! let creds = Credentials::new("458921440", "AbCdEfGhIjKlMnOp", "hunter2")?;
//! let thermostat = Thermostat::new(creds, factory);
//!
//! thermostat.set_mode(UserMode::Clock).await?;
//! thermostat.set_temperature(21.5).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod command_set;
mod status_query;

pub use builder::ThermostatBuilder;
pub use command_set::CommandSet;
pub use status_query::StatusQuery;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::codec::PayloadCodec;
use crate::credentials::{Credentials, TransportIdentity};
use crate::error::Error;
use crate::protocol::{SessionConfig, SessionEngine, TransportFactory};
use crate::response::ThermostatStatus;
use crate::types::{SwitchState, Temperature, UserMode};

/// Immutable session material plus the transport factory.
#[derive(Debug, Clone)]
pub(crate) struct Connector<F> {
    factory: F,
    identity: TransportIdentity,
    codec: PayloadCodec,
    config: SessionConfig,
}

impl<F: TransportFactory> Connector<F> {
    fn open(&self) -> SessionEngine<F::Transport> {
        SessionEngine::new(
            self.factory.create(),
            self.identity.clone(),
            self.codec.clone(),
            self.config.clone(),
        )
    }
}

/// A thermostat reachable through a messaging transport.
///
/// # Type Parameter
///
/// `F` creates a fresh transport for every session. Any closure returning a
/// [`Transport`](crate::protocol::Transport) works.
#[derive(Debug, Clone)]
pub struct Thermostat<F> {
    credentials: Credentials,
    connector: Connector<F>,
    last_status: Arc<RwLock<Option<ThermostatStatus>>>,
}

impl<F: TransportFactory> Thermostat<F> {
    /// Creates a thermostat with the default session configuration.
    #[must_use]
    pub fn new(credentials: Credentials, factory: F) -> Self {
        Self::from_parts(credentials, SessionConfig::default(), factory)
    }

    pub(crate) fn from_parts(credentials: Credentials, config: SessionConfig, factory: F) -> Self {
        let connector = Connector {
            factory,
            identity: credentials.identity(),
            codec: PayloadCodec::new(credentials.session_key()),
            config,
        };
        Self {
            credentials,
            connector,
            last_status: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the credentials this thermostat was built with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.connector.config
    }

    /// Returns the status reader.
    #[must_use]
    pub fn status_query(&self) -> StatusQuery<'_, F> {
        StatusQuery::new(&self.connector)
    }

    /// Returns the setting writer.
    #[must_use]
    pub fn commands(&self) -> CommandSet<'_, F> {
        CommandSet::new(&self.connector)
    }

    /// Reads the current status and caches it.
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` if the session fails or a `ParseError` if
    /// the reply cannot be decoded.
    pub async fn get_status(&self) -> Result<ThermostatStatus, Error> {
        let status = self.status_query().fetch().await?;
        *self.last_status.write() = Some(status.clone());
        Ok(status)
    }

    /// Returns the status from the most recent successful
    /// [`get_status`](Self::get_status), if any.
    #[must_use]
    pub fn last_status(&self) -> Option<ThermostatStatus> {
        self.last_status.read().clone()
    }

    /// Sets the target room temperature.
    ///
    /// Reads the status first. In manual mode the manual set point is
    /// written; otherwise the override set point is written and the
    /// override switched on.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` before any session is
    /// opened if `celsius` is NaN or infinite. Otherwise returns the first
    /// session error; later writes are skipped.
    pub async fn set_temperature(&self, celsius: f64) -> Result<(), Error> {
        let temperature = Temperature::new(celsius)?;
        let status = self.get_status().await?;
        let commands = self.commands();

        if status.is_manual() {
            tracing::debug!(%temperature, "Setting manual temperature");
            commands.set_manual_temperature(temperature).await
        } else {
            tracing::debug!(%temperature, "Setting override temperature");
            commands.set_override_temperature(temperature).await?;
            commands.set_override_status(SwitchState::On).await
        }
    }

    /// Enables or disables the temporary override.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::CommandRejected` if the device refuses, or a
    /// `ProtocolError` if the session fails.
    pub async fn set_override(&self, enabled: bool) -> Result<(), Error> {
        self.commands()
            .set_override_status(SwitchState::from(enabled))
            .await
    }

    /// Switches between manual and clock program.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::CommandRejected` if the device refuses, or a
    /// `ProtocolError` if the session fails.
    pub async fn set_mode(&self, mode: UserMode) -> Result<(), Error> {
        self.commands().set_mode(mode).await
    }
}
