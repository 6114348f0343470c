// Path: crates/types/src/codec.rs

//! The canonical public-string encoding for account identifiers.
//!
//! An identifier is presented as `Base58Check(prefix || identifier)`, where the
//! 3-byte prefix is selected by the [`Network`] and the checksum is the first
//! four bytes of a double SHA-256. The mapping is deterministic and injective
//! for a fixed network, which is what lets it rekey moderation maps without
//! merging entries.

use crate::app::{Identifier, IDENTIFIER_LEN};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The network an encoder emits addresses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Network {
    /// Production addresses (`BC1YL...`).
    #[default]
    Mainnet,
    /// Test network addresses (`tBC...`).
    Testnet,
}

impl Network {
    /// The version prefix prepended to an identifier before Base58Check encoding.
    pub const fn public_key_prefix(self) -> [u8; 3] {
        match self {
            Network::Mainnet => [0xcd, 0x14, 0x00],
            Network::Testnet => [0x11, 0xc2, 0x00],
        }
    }
}

/// Encodes and decodes identifiers to and from their public string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyCodec {
    prefix: [u8; 3],
}

impl PublicKeyCodec {
    /// Creates a codec for the given network.
    pub const fn new(network: Network) -> Self {
        Self {
            prefix: network.public_key_prefix(),
        }
    }

    /// Returns the canonical public string for `id`.
    pub fn encode(&self, id: &Identifier) -> String {
        let mut payload = Vec::with_capacity(self.prefix.len() + IDENTIFIER_LEN);
        payload.extend_from_slice(&self.prefix);
        payload.extend_from_slice(id.as_ref());
        bs58::encode(payload).with_check().into_string()
    }

    /// Parses a public string, verifying its checksum, network prefix and length.
    pub fn decode(&self, s: &str) -> Result<Identifier, CodecError> {
        let payload = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| CodecError::InvalidBase58(e.to_string()))?;
        let (prefix, rest) = match (
            payload.get(..self.prefix.len()),
            payload.get(self.prefix.len()..),
        ) {
            (Some(prefix), Some(rest)) => (prefix, rest),
            _ => {
                return Err(CodecError::InvalidLength {
                    expected: self.prefix.len() + IDENTIFIER_LEN,
                    got: payload.len(),
                })
            }
        };
        if prefix != self.prefix {
            return Err(CodecError::WrongNetwork);
        }
        Identifier::try_from(rest)
    }

    /// Rekeys a moderation map by the public string form of each identifier.
    ///
    /// The output has exactly one entry per input entry; an empty input yields
    /// an empty map.
    pub fn project<V: Clone>(&self, record: &BTreeMap<Identifier, V>) -> BTreeMap<String, V> {
        record
            .iter()
            .map(|(id, value)| (self.encode(id), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mainnet_addresses_have_the_familiar_prefix() {
        let codec = PublicKeyCodec::new(Network::Mainnet);
        let mut raw = [0u8; IDENTIFIER_LEN];
        raw[0] = 0x02;
        let encoded = codec.encode(&Identifier(raw));
        assert!(encoded.starts_with("BC1Y"), "got {encoded}");
    }

    #[test]
    fn decode_rejects_other_network() {
        let id = Identifier([3u8; IDENTIFIER_LEN]);
        let testnet = PublicKeyCodec::new(Network::Testnet).encode(&id);
        let err = PublicKeyCodec::new(Network::Mainnet)
            .decode(&testnet)
            .unwrap_err();
        assert!(matches!(err, CodecError::WrongNetwork));
    }

    #[test]
    fn decode_rejects_corrupted_checksum() {
        let codec = PublicKeyCodec::new(Network::Mainnet);
        let mut encoded = codec.encode(&Identifier([9u8; IDENTIFIER_LEN]));
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            codec.decode(&encoded),
            Err(CodecError::InvalidBase58(_))
        ));
    }

    #[test]
    fn empty_record_projects_to_empty_map() {
        let codec = PublicKeyCodec::new(Network::Mainnet);
        let record: BTreeMap<Identifier, Vec<u8>> = BTreeMap::new();
        assert!(codec.project(&record).is_empty());
    }

    #[test]
    fn projection_keeps_every_entry_and_value() {
        let codec = PublicKeyCodec::new(Network::Mainnet);
        let mut record = BTreeMap::new();
        record.insert(Identifier([1u8; IDENTIFIER_LEN]), vec![1u8]);
        record.insert(Identifier([2u8; IDENTIFIER_LEN]), vec![]);
        let projected = codec.project(&record);
        assert_eq!(projected.len(), 2);
        for (id, value) in &record {
            assert_eq!(projected.get(&codec.encode(id)), Some(value));
        }
    }

    proptest! {
        #[test]
        fn encoding_is_deterministic_and_reversible(bytes in prop::array::uniform32(any::<u8>()), last in any::<u8>()) {
            let mut raw = [0u8; IDENTIFIER_LEN];
            raw[..32].copy_from_slice(&bytes);
            raw[32] = last;
            let id = Identifier(raw);
            let codec = PublicKeyCodec::new(Network::Mainnet);
            let first = codec.encode(&id);
            prop_assert_eq!(&first, &codec.encode(&id));
            prop_assert_eq!(codec.decode(&first).unwrap(), id);
        }

        #[test]
        fn distinct_identifiers_never_collide(a in prop::array::uniform32(any::<u8>()), b in prop::array::uniform32(any::<u8>())) {
            prop_assume!(a != b);
            let mut ra = [0u8; IDENTIFIER_LEN];
            let mut rb = [0u8; IDENTIFIER_LEN];
            ra[1..].copy_from_slice(&a);
            rb[1..].copy_from_slice(&b);
            let codec = PublicKeyCodec::new(Network::Testnet);
            prop_assert_ne!(codec.encode(&Identifier(ra)), codec.encode(&Identifier(rb)));
        }
    }
}
