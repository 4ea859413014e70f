// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload encryption.
//!
//! Every pseudo-HTTP body exchanged with the thermostat is a JSON document
//! zero-padded to the AES block size, encrypted with AES-256 in ECB mode and
//! base64 encoded.

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::{Value, json};

use crate::credentials::SessionKey;
use crate::error::CryptoError;

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Encrypts and decrypts payload bodies with a [`SessionKey`].
///
/// # Examples
///
/// ```
/// use wavetherm_lib::codec::{PayloadCodec, strip_padding};
/// use wavetherm_lib::credentials::SessionKey;
///
/// let codec = PayloadCodec::new(SessionKey::from_bytes([7; 32]));
/// let body = codec.encrypt(&serde_json::json!(21.5));
///
/// let plain = strip_padding(&codec.decrypt(&body).unwrap());
/// assert_eq!(plain, br#"{"value":21.5}"#);
/// ```
#[derive(Debug, Clone)]
pub struct PayloadCodec {
    key: SessionKey,
}

impl PayloadCodec {
    /// Creates a codec for the given key.
    #[must_use]
    pub fn new(key: SessionKey) -> Self {
        Self { key }
    }

    /// Wraps `value` as `{"value": <value>}`, encrypts it and returns the
    /// base64 ciphertext.
    #[must_use]
    pub fn encrypt(&self, value: &Value) -> String {
        let plaintext = json!({ "value": value }).to_string();
        BASE64_STANDARD.encode(self.encrypt_bytes(plaintext.as_bytes()))
    }

    /// Zero-pads and encrypts raw bytes.
    #[must_use]
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut buf = plaintext.to_vec();
        let remainder = buf.len() % BLOCK_SIZE;
        if remainder != 0 {
            buf.resize(buf.len() + BLOCK_SIZE - remainder, 0);
        }

        let len = buf.len();
        Aes256EcbEnc::new(self.key.as_bytes().into())
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .expect("buffer is padded to a whole number of blocks");
        buf
    }

    /// Decodes and decrypts a base64 body, returning the raw plaintext.
    ///
    /// Padding is left in place; see [`strip_padding`].
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Base64` for invalid base64 and
    /// `CryptoError::Misaligned` when the ciphertext is not a whole number of
    /// blocks.
    pub fn decrypt(&self, body: &str) -> Result<Vec<u8>, CryptoError> {
        let ciphertext = BASE64_STANDARD.decode(body.trim())?;
        self.decrypt_bytes(ciphertext)
    }

    /// Decrypts raw ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Misaligned` when the ciphertext is not a whole
    /// number of blocks.
    pub fn decrypt_bytes(&self, mut ciphertext: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::Misaligned(ciphertext.len()));
        }

        let total = ciphertext.len();
        let len = Aes256EcbDec::new(self.key.as_bytes().into())
            .decrypt_padded_mut::<NoPadding>(&mut ciphertext)
            .map_err(|_| CryptoError::Misaligned(total))?
            .len();
        ciphertext.truncate(len);
        Ok(ciphertext)
    }
}

/// Removes every zero byte from decrypted plaintext.
#[must_use]
pub fn strip_padding(plaintext: &[u8]) -> Vec<u8> {
    plaintext.iter().copied().filter(|&b| b != 0).collect()
}
