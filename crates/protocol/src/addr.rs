//! Account and component addresses.
//!
//! Addresses are opaque, validated-on-construction strings. An account
//! address has the `local@domain` form; a component address is a bare
//! domain such as `upload.example.org`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors produced when parsing an address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddrError {
    #[error("empty address")]
    Empty,

    #[error("address contains whitespace: {0}")]
    Whitespace(String),

    #[error("account address is missing '@': {0}")]
    MissingLocalPart(String),

    #[error("address has an empty part: {0}")]
    EmptyPart(String),
}

fn check_domain(s: &str) -> Result<(), AddrError> {
    if s.is_empty() {
        return Err(AddrError::Empty);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(AddrError::Whitespace(s.to_string()));
    }
    Ok(())
}

/// The account an upload is performed for (`local@domain`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the domain part (after the `@`).
    pub fn domain(&self) -> &str {
        // Validated at construction: '@' is present.
        &self.0[self.0.find('@').map(|i| i + 1).unwrap_or(0)..]
    }
}

impl FromStr for AccountAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_domain(s)?;
        let Some((local, domain)) = s.split_once('@') else {
            return Err(AddrError::MissingLocalPart(s.to_string()));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(AddrError::EmptyPart(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = AddrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountAddress> for String {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a server-side upload component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentAddress(String);

impl ComponentAddress {
    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ComponentAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_domain(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ComponentAddress {
    type Error = AddrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ComponentAddress> for String {
    fn from(addr: ComponentAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for ComponentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
