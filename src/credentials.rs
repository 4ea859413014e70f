// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credential handling and session key derivation.
//!
//! A thermostat is addressed by three user-supplied secrets printed on the
//! device or chosen in the vendor app: the serial number, the access code and
//! the user password. From these the library derives:
//!
//! - a [`TransportIdentity`]: the login address and secret used on the
//!   messaging transport, and the address of the device peer;
//! - a [`SessionKey`]: the 32-byte AES key protecting every payload.
//!
//! Both are pure functions of the [`Credentials`].

use std::fmt;

use md5::{Digest, Md5};
use serde::Deserialize;

use crate::error::ValueError;

/// Domain shared by the controller and device transport addresses.
pub const SERVER_DOMAIN: &str = "wa2-mz36-qrmzh6.bosch.de";

const LOGIN_PREFIX: &str = "rrccontact_";
const PEER_PREFIX: &str = "rrcgateway_";
const SECRET_PREFIX: &str = "Ct7ZR03b_";

const SHARED_SECRET: [u8; 32] = [
    0x58, 0xF1, 0x8D, 0x70, 0xF6, 0x67, 0xC9, 0xC7, 0x9E, 0xF7, 0xDE, 0x43, 0x5B, 0xF0, 0xF9, 0xB1,
    0x55, 0x3B, 0xBB, 0x6E, 0x61, 0x81, 0x62, 0x12, 0xAB, 0x80, 0xE5, 0xB0, 0xD3, 0x51, 0xFB, 0xB1,
];

/// The secrets identifying one thermostat.
///
/// Inputs are sanitized on construction: surrounding whitespace and quote
/// characters are stripped, and the serial number and access code lose any
/// internal whitespace. The sanitized values are used everywhere else.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::Credentials;
///
/// let creds = Credentials::new(" 123 456 789 ", "\"abcd efgh\"", "secret").unwrap();
/// assert_eq!(creds.serial_number(), "123456789");
/// assert_eq!(creds.access_code(), "abcdefgh");
///
/// assert!(Credentials::new("", "abcd", "secret").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    serial_number: String,
    access_code: String,
    password: String,
}

#[derive(Deserialize)]
struct RawCredentials {
    serial_number: String,
    access_code: String,
    password: String,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = ValueError;

    fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
        Self::new(raw.serial_number, raw.access_code, raw.password)
    }
}

impl Credentials {
    /// Creates sanitized credentials.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyCredential` if any input is empty after
    /// sanitizing.
    pub fn new(
        serial_number: impl AsRef<str>,
        access_code: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Result<Self, ValueError> {
        let serial_number = sanitize_compact(serial_number.as_ref());
        let access_code = sanitize_compact(access_code.as_ref());
        let password = sanitize(password.as_ref()).to_string();

        if serial_number.is_empty() {
            return Err(ValueError::EmptyCredential("serial number"));
        }
        if access_code.is_empty() {
            return Err(ValueError::EmptyCredential("access code"));
        }
        if password.is_empty() {
            return Err(ValueError::EmptyCredential("password"));
        }

        Ok(Self {
            serial_number,
            access_code,
            password,
        })
    }

    /// Returns the sanitized serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the sanitized access code.
    #[must_use]
    pub fn access_code(&self) -> &str {
        &self.access_code
    }

    /// Derives the transport login identity and device peer address.
    #[must_use]
    pub fn identity(&self) -> TransportIdentity {
        TransportIdentity {
            login_address: format!("{LOGIN_PREFIX}{}@{SERVER_DOMAIN}", self.serial_number),
            login_secret: format!("{SECRET_PREFIX}{}", self.access_code),
            peer_address: format!("{PEER_PREFIX}{}@{SERVER_DOMAIN}", self.serial_number),
        }
    }

    /// Derives the payload encryption key.
    ///
    /// The key is `MD5(access_code || SECRET) || MD5(SECRET || password)`.
    #[must_use]
    pub fn session_key(&self) -> SessionKey {
        let head = Md5::new()
            .chain_update(self.access_code.as_bytes())
            .chain_update(SHARED_SECRET)
            .finalize();
        let tail = Md5::new()
            .chain_update(SHARED_SECRET)
            .chain_update(self.password.as_bytes())
            .finalize();

        let mut key = [0u8; SessionKey::LEN];
        key[..16].copy_from_slice(&head);
        key[16..].copy_from_slice(&tail);
        SessionKey(key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("serial_number", &self.serial_number)
            .field("access_code", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Strips surrounding whitespace and quote characters.
fn sanitize(input: &str) -> &str {
    input
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
}

/// Like [`sanitize`], also removing internal whitespace.
fn sanitize_compact(input: &str) -> String {
    sanitize(input)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Addresses and secret used on the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportIdentity {
    login_address: String,
    login_secret: String,
    peer_address: String,
}

impl TransportIdentity {
    /// Address the controller logs in as.
    #[must_use]
    pub fn login_address(&self) -> &str {
        &self.login_address
    }

    /// Secret the controller logs in with.
    #[must_use]
    pub fn login_secret(&self) -> &str {
        &self.login_secret
    }

    /// Address of the thermostat gateway.
    #[must_use]
    pub fn peer_address(&self) -> &str {
        &self.peer_address
    }
}

/// The 32-byte AES key protecting payloads for one set of credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    /// Key length in bytes.
    pub const LEN: usize = 32;

    /// Wraps raw key bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}
