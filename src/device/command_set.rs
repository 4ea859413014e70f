// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setting writes.
//!
//! Every write is its own session. The device takes one value per request,
//! so there is no batching.

use crate::command::{Command, SettingCommand};
use crate::device::Connector;
use crate::error::Error;
use crate::protocol::TransportFactory;
use crate::types::{SwitchState, Temperature, UserMode};

/// Writes individual thermostat settings.
#[derive(Debug)]
pub struct CommandSet<'a, F> {
    connector: &'a Connector<F>,
}

impl<'a, F: TransportFactory> CommandSet<'a, F> {
    pub(crate) fn new(connector: &'a Connector<F>) -> Self {
        Self { connector }
    }

    /// Sends one setting and waits for the device to acknowledge it.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::CommandRejected` if the device refuses the
    /// value, or a `ProtocolError` if the session fails.
    pub async fn apply(&self, command: &SettingCommand) -> Result<(), Error> {
        tracing::debug!(path = command.resource_path(), "Applying setting");
        self.connector
            .open()
            .execute(command)
            .await
            .into_result()
            .map(|_| ())
    }

    /// Switches the program mode.
    ///
    /// # Errors
    ///
    /// See [`CommandSet::apply`].
    pub async fn set_mode(&self, mode: UserMode) -> Result<(), Error> {
        self.apply(&SettingCommand::UserMode(mode)).await
    }

    /// Sets the manual-mode set point.
    ///
    /// # Errors
    ///
    /// See [`CommandSet::apply`].
    pub async fn set_manual_temperature(&self, temperature: Temperature) -> Result<(), Error> {
        self.apply(&SettingCommand::ManualTemperature(temperature))
            .await
    }

    /// Sets the override set point.
    ///
    /// # Errors
    ///
    /// See [`CommandSet::apply`].
    pub async fn set_override_temperature(&self, temperature: Temperature) -> Result<(), Error> {
        self.apply(&SettingCommand::OverrideTemperature(temperature))
            .await
    }

    /// Enables or disables the temporary override.
    ///
    /// # Errors
    ///
    /// See [`CommandSet::apply`].
    pub async fn set_override_status(&self, state: SwitchState) -> Result<(), Error> {
        self.apply(&SettingCommand::OverrideStatus(state)).await
    }
}
