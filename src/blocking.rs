// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blocking thermostat API.
//!
//! Wraps the async [`Thermostat`](crate::Thermostat) with an owned
//! current-thread runtime with the I/O and time drivers enabled, so socket
//! based transports work. Must not be used from inside an async context.
//!
//! ```no_run
//! use wavetherm_lib::{Credentials, ThermostatBuilder};
//! # use wavetherm_lib::protocol::TransportFactory;
//!
//! # fn example<F: TransportFactory>(factory: F) -> wavetherm_lib::Result<()> {
//! let creds = Credentials::new("458921440", "AbCdEfGhIjKlMnOp", "hunter2")?;
//! let thermostat = ThermostatBuilder::new(creds).build_blocking(factory)?;
//!
//! let status = thermostat.get_status()?;
//! println!("{:?}", status.set_point);
//! # Ok(())
//! # }
//! ```

use tokio::runtime::{Builder, Runtime};

use crate::device;
use crate::error::Error;
use crate::protocol::TransportFactory;
use crate::response::ThermostatStatus;
use crate::types::UserMode;

/// A thermostat whose operations block the calling thread.
#[derive(Debug)]
pub struct Thermostat<F> {
    inner: device::Thermostat<F>,
    runtime: Runtime,
}

impl<F: TransportFactory> Thermostat<F> {
    /// Wraps an async thermostat.
    ///
    /// # Errors
    ///
    /// Returns `Error::Runtime` if the runtime cannot be created.
    pub fn new(inner: device::Thermostat<F>) -> Result<Self, Error> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Returns the wrapped async thermostat.
    #[must_use]
    pub fn inner(&self) -> &device::Thermostat<F> {
        &self.inner
    }

    /// See [`Thermostat::get_status`](crate::Thermostat::get_status).
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` or `ParseError` on failure.
    pub fn get_status(&self) -> Result<ThermostatStatus, Error> {
        self.runtime.block_on(self.inner.get_status())
    }

    /// See [`Thermostat::last_status`](crate::Thermostat::last_status).
    #[must_use]
    pub fn last_status(&self) -> Option<ThermostatStatus> {
        self.inner.last_status()
    }

    /// See [`Thermostat::set_temperature`](crate::Thermostat::set_temperature).
    ///
    /// # Errors
    ///
    /// Returns a `ValueError`, `ProtocolError` or `DeviceError` on failure.
    pub fn set_temperature(&self, celsius: f64) -> Result<(), Error> {
        self.runtime.block_on(self.inner.set_temperature(celsius))
    }

    /// See [`Thermostat::set_override`](crate::Thermostat::set_override).
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` or `DeviceError` on failure.
    pub fn set_override(&self, enabled: bool) -> Result<(), Error> {
        self.runtime.block_on(self.inner.set_override(enabled))
    }

    /// See [`Thermostat::set_mode`](crate::Thermostat::set_mode).
    ///
    /// # Errors
    ///
    /// Returns a `ProtocolError` or `DeviceError` on failure.
    pub fn set_mode(&self, mode: UserMode) -> Result<(), Error> {
        self.runtime.block_on(self.inner.set_mode(mode))
    }
}
