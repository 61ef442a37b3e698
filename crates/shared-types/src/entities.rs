//! # Core Entities
//!
//! Identifier aliases shared by the subspace-scoped modules and the account
//! [`Address`] type.

use crate::errors::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a subspace (tenant). Zero is never a valid id.
pub type SubspaceId = u64;

/// Identifier of a post, unique inside its subspace.
pub type PostId = u64;

/// Identifier of a reason, unique inside its subspace.
pub type ReasonId = u32;

/// Identifier of a report, unique inside its subspace.
pub type ReportId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Characters allowed in the data part of a bech32 string.
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Minimum data part length (checksum alone is 6 characters).
const MIN_DATA_LEN: usize = 6;

/// Maximum total bech32 string length.
const MAX_ADDRESS_LEN: usize = 90;

/// A bech32-formatted account address (e.g. `cosmos1...`).
///
/// Only the format is checked: lowercase, a non-empty human readable part,
/// the `1` separator and a data part drawn from the bech32 charset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address string.
    pub fn parse(value: impl Into<String>) -> Result<Self, AddressError> {
        let value = value.into();
        validate_address(&value)?;
        Ok(Self(value))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_address(value: &str) -> Result<(), AddressError> {
    if value.trim().is_empty() {
        return Err(AddressError::Empty);
    }
    if value.len() > MAX_ADDRESS_LEN {
        return Err(AddressError::InvalidData(value.to_string()));
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AddressError::MixedCase(value.to_string()));
    }

    let Some(separator) = value.rfind('1') else {
        return Err(AddressError::MissingPrefix(value.to_string()));
    };
    let (hrp, data) = (&value[..separator], &value[separator + 1..]);
    if hrp.is_empty() || !hrp.chars().all(|c| ('!'..='~').contains(&c)) {
        return Err(AddressError::MissingPrefix(value.to_string()));
    }
    if data.len() < MIN_DATA_LEN || !data.chars().all(|c| BECH32_CHARSET.contains(c)) {
        return Err(AddressError::InvalidData(value.to_string()));
    }
    Ok(())
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
