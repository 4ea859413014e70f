// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature set-points.

use std::fmt;

use crate::error::ValueError;

/// A temperature in degrees Celsius.
///
/// The thermostat works in 0.5 °C steps but accepts any number; the value is
/// sent as given. Use [`Temperature::rounded_to_half`] to snap it first.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::types::Temperature;
///
/// let t = Temperature::new(21.3).unwrap();
/// assert_eq!(t.rounded_to_half().celsius(), 21.5);
///
/// assert!(Temperature::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` for NaN or infinity.
    pub fn new(celsius: f64) -> Result<Self, ValueError> {
        if celsius.is_finite() {
            Ok(Self(celsius))
        } else {
            Err(ValueError::NonFiniteTemperature(celsius.to_string()))
        }
    }

    /// Returns the value in degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> f64 {
        self.0
    }

    /// Rounds to the nearest 0.5 °C.
    #[must_use]
    pub fn rounded_to_half(&self) -> Self {
        Self((self.0 * 2.0).round() / 2.0)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}\u{00b0}C", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Temperature::new(f64::INFINITY).is_err());
        assert!(Temperature::try_from(f64::NAN).is_err());
    }

    #[test]
    fn rounds_to_half_degrees() {
        assert_eq!(Temperature::new(19.74).unwrap().rounded_to_half().celsius(), 19.5);
        assert_eq!(Temperature::new(19.76).unwrap().rounded_to_half().celsius(), 20.0);
    }

    #[test]
    fn display() {
        assert_eq!(Temperature::new(21.5).unwrap().to_string(), "21.5\u{00b0}C");
    }
}
