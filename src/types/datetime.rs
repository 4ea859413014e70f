// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat clock value.
//!
//! The `CTD` status field carries the device clock as an ISO 8601 timestamp
//! followed by a two-letter weekday token, e.g. `"2025-09-22T18:33:30+01:00 Mo"`.
//! Some firmware omits the offset.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Error returned when parsing a device timestamp fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    input: String,
}

impl DateTimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to parse device time: '{}'", self.input)
    }
}

impl std::error::Error for DateTimeParseError {}

/// The thermostat's local clock.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::types::DeviceTime;
///
/// let t: DeviceTime = "2025-09-22T18:33:30+01:00 Mo".parse().unwrap();
/// assert_eq!(t.weekday_token(), Some("Mo"));
/// assert_eq!(t.naive().format("%H:%M").to_string(), "18:33");
/// assert!(t.to_datetime().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTime {
    naive: NaiveDateTime,
    offset: Option<FixedOffset>,
    weekday: Option<String>,
}

impl DeviceTime {
    /// Parses a device timestamp, returning `None` on failure.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Returns the local datetime without offset.
    #[must_use]
    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// Returns the timezone-aware datetime when the offset is known.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.offset
            .and_then(|offset| self.naive.and_local_timezone(offset).single())
    }

    /// Returns the trailing weekday token reported by the device.
    #[must_use]
    pub fn weekday_token(&self) -> Option<&str> {
        self.weekday.as_deref()
    }
}

impl FromStr for DeviceTime {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let stamp = parts.next().ok_or_else(|| DateTimeParseError::new(s))?;
        let weekday = parts.next().map(str::to_string);

        if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
            return Ok(Self {
                naive: dt.naive_local(),
                offset: Some(*dt.offset()),
                weekday,
            });
        }

        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S")
            .map(|naive| Self {
                naive,
                offset: None,
                weekday,
            })
            .map_err(|_| DateTimeParseError::new(s))
    }
}
