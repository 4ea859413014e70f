// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for thermostat control.
//!
//! # Types
//!
//! - [`UserMode`] - Program mode, `manual` or `clock`
//! - [`SwitchState`] - The device's `on`/`off` vocabulary
//! - [`BoilerActivity`] - Burner state from the `BAI` code
//! - [`Temperature`] - A finite Celsius value
//! - [`DeviceTime`] - The thermostat clock from the `CTD` field

mod boiler;
mod datetime;
mod mode;
mod switch;
mod temperature;

pub use boiler::BoilerActivity;
pub use datetime::{DateTimeParseError, DeviceTime};
pub use mode::UserMode;
pub use switch::SwitchState;
pub use temperature::Temperature;
