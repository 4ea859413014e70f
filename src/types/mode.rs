// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Program mode of the heating circuit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The base control mode of the thermostat (when not overridden).
///
/// Only the two device-native tokens are accepted. Host-level spellings such
/// as "auto" or "program" must be mapped before reaching this type.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::types::UserMode;
///
/// assert_eq!(UserMode::Manual.as_str(), "manual");
/// assert_eq!("clock".parse::<UserMode>().unwrap(), UserMode::Clock);
/// assert!("auto".parse::<UserMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    /// Fixed set-point chosen by the user.
    Manual,
    /// Set-point follows the weekly schedule.
    Clock,
}

impl UserMode {
    /// Returns the device token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Clock => "clock",
        }
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "manual" => Ok(Self::Manual),
            "clock" => Ok(Self::Clock),
            other => Err(ValueError::InvalidUserMode(other.to_string())),
        }
    }
}
