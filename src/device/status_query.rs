// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status query.

use crate::command::StatusCommand;
use crate::device::Connector;
use crate::error::{Error, ParseError};
use crate::protocol::TransportFactory;
use crate::response::{StatusSnapshot, ThermostatStatus};

/// Reads the thermostat status in one session.
#[derive(Debug)]
pub struct StatusQuery<'a, F> {
    connector: &'a Connector<F>,
}

impl<'a, F: TransportFactory> StatusQuery<'a, F> {
    pub(crate) fn new(connector: &'a Connector<F>) -> Self {
        Self { connector }
    }

    /// Fetches the raw status snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` if the session fails and a `ParseError` if
    /// the reply is not a status object.
    pub async fn fetch_snapshot(&self) -> Result<StatusSnapshot, Error> {
        let data = self
            .connector
            .open()
            .execute(&StatusCommand)
            .await
            .into_result()?
            .ok_or_else(|| ParseError::MissingField("value".to_string()))?;

        let snapshot = StatusSnapshot::from_value(data)?;
        tracing::debug!(fields = snapshot.len(), "Status snapshot received");
        Ok(snapshot)
    }

    /// Fetches the status and maps it to named fields.
    ///
    /// # Errors
    ///
    /// Same as [`StatusQuery::fetch_snapshot`].
    pub async fn fetch(&self) -> Result<ThermostatStatus, Error> {
        Ok(ThermostatStatus::from_snapshot(self.fetch_snapshot().await?)?)
    }
}
