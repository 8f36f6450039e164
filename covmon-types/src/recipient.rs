use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CovmonError;

/// An email address read from the recipients table.
///
/// Validation is deliberately shallow (`local@domain`, no whitespace); the
/// relay is the authority on deliverability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipientAddress(String);

impl RecipientAddress {
    /// Parse and trim a raw address.
    ///
    /// # Errors
    /// Returns `InvalidRecipient` when the value is not shaped like an address.
    pub fn parse(raw: &str) -> Result<Self, CovmonError> {
        let trimmed = raw.trim();
        let invalid = || CovmonError::InvalidRecipient {
            address: raw.to_string(),
        };
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecipientAddress {
    type Error = CovmonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecipientAddress> for String {
    fn from(value: RecipientAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for RecipientAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
