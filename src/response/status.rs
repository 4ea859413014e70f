// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status snapshot parsing.
//!
//! The `uiStatus` resource returns a flat object keyed by three-letter codes.
//! Values arrive as strings even when numeric, and firmware versions differ
//! in which codes they report, so every field is optional and coerced
//! leniently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::types::{BoilerActivity, DeviceTime, SwitchState, UserMode};

/// The raw status object, keyed by field code.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wavetherm_lib::response::StatusSnapshot;
///
/// let snapshot = StatusSnapshot::from_value(json!({"IHT": "19.5", "ARS": "init"})).unwrap();
/// assert_eq!(snapshot.get_str("ARS"), Some("init"));
/// assert!(StatusSnapshot::from_value(json!(19.5)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusSnapshot(Map<String, Value>);

impl StatusSnapshot {
    /// Wraps a decoded reply value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ParseError::UnexpectedFormat(format!(
                "status snapshot is not an object: {other}"
            ))),
        }
    }

    /// Returns the raw value for a field code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Value> {
        self.0.get(code)
    }

    /// Returns a field value when it is a string.
    #[must_use]
    pub fn get_str(&self, code: &str) -> Option<&str> {
        self.0.get(code).and_then(Value::as_str)
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the snapshot has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Typed view of a status snapshot.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wavetherm_lib::response::ThermostatStatus;
///
/// let status = ThermostatStatus::from_value(json!({
///     "IHT": "19.5", "TSP": "21.0", "UMD": "manual", "BAI": "CH"
/// })).unwrap();
///
/// assert_eq!(status.current_temperature, Some(19.5));
/// assert_eq!(status.set_point, Some(21.0));
/// assert_eq!(status.program_mode.as_deref(), Some("manual"));
/// assert_eq!(status.is_boiler_on(), Some(true));
/// assert_eq!(status.is_hot_water_enabled, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThermostatStatus {
    /// Measured room temperature (`IHT`).
    #[serde(rename = "IHT", default, deserialize_with = "lenient::number")]
    pub current_temperature: Option<f64>,

    /// Active set point (`TSP`).
    #[serde(rename = "TSP", default, deserialize_with = "lenient::number")]
    pub set_point: Option<f64>,

    /// Program mode as reported, usually `manual` or `clock` (`UMD`).
    #[serde(rename = "UMD", default, deserialize_with = "lenient::string")]
    pub program_mode: Option<String>,

    /// Set point of the current clock program slot (`CSP`).
    #[serde(rename = "CSP", default, deserialize_with = "lenient::number")]
    pub current_switch_point: Option<f64>,

    /// Today follows the Sunday program (`DAS`).
    #[serde(rename = "DAS", default, deserialize_with = "lenient::on_off")]
    pub is_day_as_sunday: Option<bool>,

    /// Holiday mode (`HMD`).
    #[serde(rename = "HMD", default, deserialize_with = "lenient::on_off")]
    pub is_holiday_mode: Option<bool>,

    /// Domestic hot water (`DHW`).
    #[serde(rename = "DHW", default, deserialize_with = "lenient::on_off")]
    pub is_hot_water_enabled: Option<bool>,

    /// Temporary override active (`TOR`).
    #[serde(rename = "TOR", default, deserialize_with = "lenient::on_off")]
    pub is_temp_override_on: Option<bool>,

    /// Tomorrow follows the Sunday program (`TAS`).
    #[serde(rename = "TAS", default, deserialize_with = "lenient::on_off")]
    pub is_tomorrow_as_sunday: Option<bool>,

    /// Remaining override duration (`TOD`).
    #[serde(rename = "TOD", default, deserialize_with = "lenient::number")]
    pub temp_override_duration: Option<f64>,

    /// Burner state (`BAI`).
    #[serde(rename = "BAI", default, deserialize_with = "lenient::boiler")]
    pub boiler_activity: Option<BoilerActivity>,

    /// Manual-mode set point (`MMT`).
    #[serde(rename = "MMT", default, deserialize_with = "lenient::number")]
    pub manual_temperature: Option<f64>,

    /// Override set point (`TOT`).
    #[serde(rename = "TOT", default, deserialize_with = "lenient::number")]
    pub override_temperature: Option<f64>,

    /// Device clock (`CTD`).
    #[serde(rename = "CTD", default, deserialize_with = "lenient::device_time")]
    pub device_time: Option<DeviceTime>,

    #[serde(skip)]
    snapshot: StatusSnapshot,
}

impl ThermostatStatus {
    /// Builds the typed view of a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the snapshot cannot be mapped.
    pub fn from_snapshot(snapshot: StatusSnapshot) -> Result<Self, ParseError> {
        let mut status: Self = serde_json::from_value(Value::Object(snapshot.0.clone()))?;
        status.snapshot = snapshot;
        Ok(status)
    }

    /// Builds the typed view of a decoded reply value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        Self::from_snapshot(StatusSnapshot::from_value(value)?)
    }

    /// Returns whether the burner is firing, if known.
    #[must_use]
    pub fn is_boiler_on(&self) -> Option<bool> {
        self.boiler_activity.map(|activity| activity.is_firing())
    }

    /// Returns the program mode when it is one the library can set.
    #[must_use]
    pub fn user_mode(&self) -> Option<UserMode> {
        self.program_mode.as_deref()?.parse().ok()
    }

    /// Returns `true` when the thermostat reports manual mode.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.program_mode.as_deref() == Some(UserMode::Manual.as_str())
    }

    /// Returns the raw snapshot this view was built from.
    #[must_use]
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }
}

mod lenient {
    use super::{BoilerActivity, Deserialize, Deserializer, DeviceTime, SwitchState, Value};

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(deserializer)
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Ok(raw(deserializer)?.and_then(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(raw(deserializer)?.and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    pub(super) fn on_off<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        Ok(raw(deserializer)?.map(|value| {
            value
                .as_str()
                .is_some_and(|s| SwitchState::from_device_str(s).is_on())
        }))
    }

    pub(super) fn boiler<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BoilerActivity>, D::Error> {
        Ok(raw(deserializer)?
            .as_ref()
            .and_then(Value::as_str)
            .and_then(BoilerActivity::from_device_str))
    }

    pub(super) fn device_time<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DeviceTime>, D::Error> {
        Ok(raw(deserializer)?
            .as_ref()
            .and_then(Value::as_str)
            .and_then(DeviceTime::parse))
    }
}
