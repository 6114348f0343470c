// Path: crates/types/src/app/identity.rs

//! Defines the fixed-length binary identifiers used across the gateway:
//! the account `Identifier` and the `ContentHash` that names a post.

use crate::error::CodecError;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length in bytes of an account identifier (a compressed secp256k1 key).
pub const IDENTIFIER_LEN: usize = 33;
/// The length in bytes of a content hash.
pub const CONTENT_HASH_LEN: usize = 32;

/// A unique, immutable identifier for an on-chain account.
///
/// Identifiers are owned by the ledger; the gateway only reads them and
/// re-encodes them for presentation (see [`crate::codec::PublicKeyCodec`]).
/// On the wire they serialize as their raw byte sequence, which is the shape
/// the verified-username registry publishes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(pub [u8; IDENTIFIER_LEN]);

impl Identifier {
    /// Returns the raw bytes of the identifier.
    pub fn to_bytes(&self) -> [u8; IDENTIFIER_LEN] {
        self.0
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; IDENTIFIER_LEN]> for Identifier {
    fn from(bytes: [u8; IDENTIFIER_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; IDENTIFIER_LEN] =
            bytes.try_into().map_err(|_| CodecError::InvalidLength {
                expected: IDENTIFIER_LEN,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", hex::encode(self.0))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Identifier::try_from(bytes.as_slice()).map_err(D::Error::custom)
    }
}

/// The hash that uniquely names a content item. Doubles as the pagination cursor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentHash(pub [u8; CONTENT_HASH_LEN]);

impl ContentHash {
    /// Parses a hex-encoded content hash, rejecting anything that is not
    /// exactly [`CONTENT_HASH_LEN`] bytes of valid hex.
    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(s).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        let arr: [u8; CONTENT_HASH_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| CodecError::InvalidLength {
                    expected: CONTENT_HASH_LEN,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Returns the lowercase hex encoding of the hash.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; CONTENT_HASH_LEN]> for ContentHash {
    fn from(bytes: [u8; CONTENT_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for ContentHash {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContentHash::from_hex(&s).map_err(D::Error::custom)
    }
}
