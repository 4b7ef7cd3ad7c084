// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::Bytes;

use crate::error::{BuilderError, BuilderResult};
use crate::sui_serde::{Hex, Readable};

#[cfg(test)]
#[path = "unit_tests/base_types_tests.rs"]
mod base_types_tests;

/// The number of bytes in an address or object id.
pub const SUI_ADDRESS_LENGTH: usize = 32;

/// Unique identifier of an object on chain.
#[serde_as]
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default, Serialize, Deserialize)]
pub struct ObjectID(#[serde_as(as = "Readable<Hex, Bytes>")] [u8; SUI_ADDRESS_LENGTH]);

impl ObjectID {
    pub const LENGTH: usize = SUI_ADDRESS_LENGTH;
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a hex literal, with or without a `0x` prefix. Short literals are
    /// left-padded with zeros, so `0x2` names the framework package id.
    pub fn from_hex_literal(literal: &str) -> BuilderResult<Self> {
        Ok(Self(decode_hex_literal(literal)?))
    }

    pub fn random() -> Self {
        Self(rand::thread_rng().gen())
    }

    pub const fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for ObjectID {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ObjectID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ObjectID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for ObjectID {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

/// An account address on chain, the recipient of transfers.
#[serde_as]
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default, Serialize, Deserialize)]
pub struct SuiAddress(#[serde_as(as = "Readable<Hex, Bytes>")] [u8; SUI_ADDRESS_LENGTH]);

impl SuiAddress {
    pub const LENGTH: usize = SUI_ADDRESS_LENGTH;

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex_literal(literal: &str) -> BuilderResult<Self> {
        Ok(Self(decode_hex_literal(literal)?))
    }

    pub fn random() -> Self {
        Self(rand::thread_rng().gen())
    }
}

impl From<ObjectID> for SuiAddress {
    fn from(id: ObjectID) -> Self {
        Self(id.into_bytes())
    }
}

impl AsRef<[u8]> for SuiAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for SuiAddress {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

/// Version number of an object, incremented on every mutation.
#[derive(
    Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default, Debug, Serialize, Deserialize,
)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    pub const fn new() -> Self {
        SequenceNumber(0)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SequenceNumber {
    fn from(value: u64) -> Self {
        SequenceNumber(value)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

/// A 32 byte digest committing to an object's contents.
#[serde_as]
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default, Serialize, Deserialize)]
pub struct ObjectDigest(#[serde_as(as = "Readable<Hex, Bytes>")] [u8; 32]);

impl ObjectDigest {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    pub fn random() -> Self {
        Self(rand::thread_rng().gen())
    }
}

impl AsRef<[u8]> for ObjectDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for ObjectDigest {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_hex_literal(s)?))
    }
}

/// A fully resolved reference to an object: id, version, and content digest.
/// Resolution from a bare id happens externally; the builder treats the
/// triple as opaque.
pub type ObjectRef = (ObjectID, SequenceNumber, ObjectDigest);

pub fn random_object_ref() -> ObjectRef {
    (ObjectID::random(), SequenceNumber::new(), ObjectDigest::random())
}

/// An address built from a single repeated byte, for tests and debugging.
pub fn dbg_addr(name: u8) -> SuiAddress {
    SuiAddress::new([name; SUI_ADDRESS_LENGTH])
}

/// A Move identifier: a module or function name.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(Box<str>);

impl Identifier {
    /// Valid identifiers start with a letter or underscore followed by
    /// letters, digits, or underscores; a lone underscore is not a name.
    pub fn new(name: impl Into<String>) -> BuilderResult<Self> {
        let name = name.into();
        fp_ensure!(
            is_valid_identifier(&name),
            BuilderError::InvalidInput {
                error: format!("invalid Move identifier \"{name}\""),
            }
        );
        Ok(Self(name.into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || (first == '_' && name.len() > 1))
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TryFrom<String> for Identifier {
    type Error = BuilderError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0.into()
    }
}

impl FromStr for Identifier {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Decode a hex literal, with or without a `0x` prefix, into a fixed-size
/// byte array, left-padding short literals with zeros.
pub fn decode_hex_literal<const N: usize>(s: &str) -> BuilderResult<[u8; N]> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    fp_ensure!(
        !digits.is_empty() && digits.len() <= N * 2,
        BuilderError::InvalidInput {
            error: format!("hex literal \"{s}\" must encode between 1 and {N} bytes"),
        }
    );
    let padded = format!("{digits:0>width$}", width = N * 2);
    let mut bytes = [0u8; N];
    hex::decode_to_slice(&padded, &mut bytes).map_err(|e| BuilderError::InvalidInput {
        error: format!("invalid hex literal \"{s}\": {e}"),
    })?;
    Ok(bytes)
}
