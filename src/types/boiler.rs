// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boiler activity indicator.

use std::fmt;

/// What the boiler burner is currently doing (`BAI` status field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoilerActivity {
    /// Burner is off (`"No"`).
    Idle,
    /// Firing for central heating (`"CH"`).
    CentralHeating,
    /// Firing for domestic hot water (`"HW"`).
    HotWater,
}

impl BoilerActivity {
    /// Parses the device code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_device_str(s: &str) -> Option<Self> {
        match s {
            "No" => Some(Self::Idle),
            "CH" => Some(Self::CentralHeating),
            "HW" => Some(Self::HotWater),
            _ => None,
        }
    }

    /// Returns the device code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "No",
            Self::CentralHeating => "CH",
            Self::HotWater => "HW",
        }
    }

    /// Returns true if the burner is firing.
    #[must_use]
    pub const fn is_firing(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for BoilerActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
