// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off flags as spoken by the thermostat.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An on/off value.
///
/// The device reports flags as the lowercase strings `"on"` and `"off"`.
/// When reading status, anything other than exactly `"on"` counts as off;
/// see [`SwitchState::from_device_str`].
///
/// # Examples
///
/// ```
/// use wavetherm_lib::types::SwitchState;
///
/// assert_eq!(SwitchState::from(true).as_str(), "on");
/// assert!(!SwitchState::from_device_str("ON").is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    /// Flag is off.
    Off,
    /// Flag is on.
    On,
}

impl SwitchState {
    /// Returns the device token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns true if the flag is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Interprets a status value: `"on"` is on, anything else is off.
    ///
    /// Matching is case-sensitive to follow the device output exactly.
    #[must_use]
    pub fn from_device_str(s: &str) -> Self {
        if s == "on" { Self::On } else { Self::Off }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ValueError::InvalidSwitch(other.to_string())),
        }
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<SwitchState> for bool {
    fn from(value: SwitchState) -> Self {
        value.is_on()
    }
}
