// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `WaveTherm` Lib - A Rust library to query and control Worcester Bosch Wave
//! and Nefit Easy thermostats.
//!
//! The thermostat is reached through a vendor messaging service. Each
//! request is a small pseudo-HTTP document whose body is AES encrypted with
//! a key derived from the device's serial number, access code and password.
//! This library implements that protocol layer; the messaging client itself
//! is supplied by the caller through the [`protocol::Transport`] trait.
//!
//! # Supported Features
//!
//! - **Status**: room temperature, set point, program mode, boiler activity,
//!   hot water, override and holiday flags, device clock
//! - **Control**: set temperature, switch program mode, toggle override
//! - **Blocking API**: [`blocking::Thermostat`] for synchronous callers
//!
//! # Quick Start
//!
//! ```no_run
//! use wavetherm_lib::{Credentials, Thermostat};
//! # use wavetherm_lib::protocol::TransportFactory;
//!
//! # async fn example<F: TransportFactory>(factory: F) -> wavetherm_lib::Result<()> {
//! let creds = Credentials::new("458921440", "AbCdEfGhIjKlMnOp", "my password")?;
//! let thermostat = Thermostat::new(creds, factory);
//!
//! let status = thermostat.get_status().await?;
//! println!(
//!     "{:?} °C, target {:?} °C, mode {:?}",
//!     status.current_temperature, status.set_point, status.program_mode
//! );
//!
//! thermostat.set_temperature(21.5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events and installs no subscriber. Every
//! session runs in a `session` span carrying a random identifier. Secrets
//! are never logged.

pub mod blocking;
pub mod codec;
pub mod command;
pub mod credentials;
mod device;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

pub use command::{Command, SettingCommand, StatusCommand};
pub use credentials::{Credentials, SessionKey, TransportIdentity};
pub use device::{CommandSet, StatusQuery, Thermostat, ThermostatBuilder};
pub use error::{
    CryptoError, DeviceError, Error, ParseError, ProtocolError, Result, ValueError,
};
pub use protocol::{SessionConfig, Transport, TransportEvent, TransportFactory};
pub use response::{StatusSnapshot, ThermostatStatus};
pub use types::{BoilerActivity, DeviceTime, SwitchState, Temperature, UserMode};
