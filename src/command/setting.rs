// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setting commands.
//!
//! Each variant writes a single heating-circuit resource. The device accepts
//! one value per request, so changing several settings means several
//! sessions.

use serde_json::{Value, json};

use crate::command::{
    Command, MANUAL_TEMPERATURE_PATH, OVERRIDE_STATUS_PATH, OVERRIDE_TEMPERATURE_PATH,
    USER_MODE_PATH,
};
use crate::types::{SwitchState, Temperature, UserMode};

/// Command to write one thermostat setting.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wavetherm_lib::command::{Command, SettingCommand};
/// use wavetherm_lib::types::{SwitchState, Temperature, UserMode};
///
/// let cmd = SettingCommand::UserMode(UserMode::Clock);
/// assert_eq!(cmd.resource_path(), "heatingCircuits/hc1/usermode");
/// assert_eq!(cmd.value(), Some(json!("clock")));
///
/// let cmd = SettingCommand::ManualTemperature(Temperature::new(20.5).unwrap());
/// assert_eq!(cmd.value(), Some(json!(20.5)));
///
/// let cmd = SettingCommand::OverrideStatus(SwitchState::Off);
/// assert_eq!(cmd.value(), Some(json!("off")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingCommand {
    /// Switch between manual and clock program.
    UserMode(UserMode),
    /// Set the manual-mode set point.
    ManualTemperature(Temperature),
    /// Set the temporary override set point.
    OverrideTemperature(Temperature),
    /// Enable or disable the temporary override.
    OverrideStatus(SwitchState),
}

impl Command for SettingCommand {
    fn resource_path(&self) -> &'static str {
        match self {
            Self::UserMode(_) => USER_MODE_PATH,
            Self::ManualTemperature(_) => MANUAL_TEMPERATURE_PATH,
            Self::OverrideTemperature(_) => OVERRIDE_TEMPERATURE_PATH,
            Self::OverrideStatus(_) => OVERRIDE_STATUS_PATH,
        }
    }

    fn value(&self) -> Option<Value> {
        let value = match self {
            Self::UserMode(mode) => json!(mode.as_str()),
            Self::ManualTemperature(t) | Self::OverrideTemperature(t) => json!(t.celsius()),
            Self::OverrideStatus(state) => json!(state.as_str()),
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_degrees_stay_floats() {
        let cmd = SettingCommand::OverrideTemperature(Temperature::new(22.0).unwrap());
        assert_eq!(cmd.value().unwrap().to_string(), "22.0");
    }

    #[test]
    fn paths_are_distinct() {
        let t = Temperature::new(20.0).unwrap();
        let paths = [
            SettingCommand::UserMode(UserMode::Manual).resource_path(),
            SettingCommand::ManualTemperature(t).resource_path(),
            SettingCommand::OverrideTemperature(t).resource_path(),
            SettingCommand::OverrideStatus(SwitchState::On).resource_path(),
        ];
        for (i, a) in paths.iter().enumerate() {
            assert!(a.starts_with("heatingCircuits/hc1/"));
            for b in &paths[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
