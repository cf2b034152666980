//! Account address
//!
//! Addresses are opaque byte strings owned by the account subsystem. This
//! crate only references them. The text form is lowercase hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest address that fits behind a one-byte length prefix.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Address decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,

    #[error("decoding hex address failed: {0}")]
    InvalidHex(String),

    #[error("address length {len} exceeds maximum of {max}")]
    TooLong { len: usize, max: usize },
}

/// Account address (at most [`MAX_ADDRESS_LEN`] bytes).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(Vec<u8>);

impl Address {
    /// Wrap raw bytes, rejecting anything longer than [`MAX_ADDRESS_LEN`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AddressError> {
        let bytes = bytes.into();
        if bytes.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::TooLong {
                len: bytes.len(),
                max: MAX_ADDRESS_LEN,
            });
        }
        Ok(Self(bytes))
    }

    /// Decode the hex text form.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::new(bytes)
    }

    /// Bytes already known to fit, such as a length-prefixed key segment.
    pub(crate) fn from_trusted(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_ADDRESS_LEN);
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes.to_vec())
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}
