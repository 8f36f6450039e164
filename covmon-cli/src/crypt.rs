//! Credential encryption for configuration values.
//!
//! Values are sealed with AES-SIV under a 512-bit key read from
//! `COVMON_CRYPT_KEY` (hex) and stored in the YAML file as `ENC(<base64>)`.
//! SIV is deterministic, so the same secret always encrypts to the same text.

use aes_siv::KeyInit;
use aes_siv::siv::Aes256Siv;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Environment variable holding the hex-encoded key.
pub const KEY_ENV: &str = "COVMON_CRYPT_KEY";

const KEY_LEN: usize = 64;
const ASSOCIATED_DATA: &[u8] = b"covmon";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptError {
    #[error("{KEY_ENV} is not set")]
    MissingKey,
    #[error("{KEY_ENV} must be {KEY_LEN} bytes of hex: {0}")]
    BadKey(String),
    #[error("value is not valid base64: {0}")]
    Encoding(String),
    #[error("value could not be decrypted with the configured key")]
    Decrypt,
    #[error("encryption failed")]
    Encrypt,
    #[error("decrypted value is not UTF-8")]
    Utf8,
}

pub struct Crypter {
    cipher: Aes256Siv,
}

impl Crypter {
    /// Build from a hex key string.
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptError> {
        let key = hex::decode(hex_key.trim()).map_err(|e| CryptError::BadKey(e.to_string()))?;
        if key.len() != KEY_LEN {
            return Err(CryptError::BadKey(format!("got {} bytes", key.len())));
        }
        let cipher =
            Aes256Siv::new_from_slice(&key).map_err(|e| CryptError::BadKey(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Build from [`KEY_ENV`].
    pub fn from_env() -> Result<Self, CryptError> {
        let key = std::env::var(KEY_ENV).map_err(|_| CryptError::MissingKey)?;
        Self::from_hex(&key)
    }

    /// Seal `plain` and wrap it as `ENC(...)`.
    pub fn encrypt(&mut self, plain: &str) -> Result<String, CryptError> {
        let sealed = self
            .cipher
            .encrypt([ASSOCIATED_DATA], plain.as_bytes())
            .map_err(|_| CryptError::Encrypt)?;
        Ok(format!("ENC({})", STANDARD.encode(sealed)))
    }

    /// Open the base64 payload of an `ENC(...)` value.
    pub fn decrypt(&mut self, payload: &str) -> Result<String, CryptError> {
        let sealed = STANDARD
            .decode(payload.trim())
            .map_err(|e| CryptError::Encoding(e.to_string()))?;
        let plain = self
            .cipher
            .decrypt([ASSOCIATED_DATA], &sealed)
            .map_err(|_| CryptError::Decrypt)?;
        String::from_utf8(plain).map_err(|_| CryptError::Utf8)
    }
}

/// Payload of an `ENC(...)` value, if `value` is one.
#[must_use]
pub fn encrypted_payload(value: &str) -> Option<&str> {
    value.trim().strip_prefix("ENC(")?.strip_suffix(')')
}

#[cfg(test)]
pub(crate) const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f";
