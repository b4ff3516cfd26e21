//! Addresses and their human-readable bech32 encoding.

use bech32::{Bech32, Hrp};
use std::fmt;

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::crypto::Blake2bHash;
use crate::error::Error;

/// Wire tag of an Ed25519 address.
pub const ED25519_ADDRESS_TYPE: u8 = 0;

/// Byte length of an Ed25519 address.
pub const ED25519_ADDRESS_LENGTH: usize = 32;

/// The human-readable prefix of a bech32 address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkPrefix {
    Mainnet,
    Testnet,
}

impl NetworkPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkPrefix::Mainnet => "iota",
            NetworkPrefix::Testnet => "atoi",
        }
    }

    fn hrp(self) -> Hrp {
        // Both prefixes are valid HRPs by construction.
        Hrp::parse_unchecked(self.as_str())
    }

    /// Parse a prefix from its string form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "iota" => Ok(NetworkPrefix::Mainnet),
            "atoi" => Ok(NetworkPrefix::Testnet),
            other => Err(Error::Bech32InvalidHrp(other.to_string())),
        }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An Ed25519 address: the Blake2b-256 hash of an Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ed25519Address([u8; ED25519_ADDRESS_LENGTH]);

impl Ed25519Address {
    pub const fn from_bytes(bytes: [u8; ED25519_ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ED25519_ADDRESS_LENGTH] {
        &self.0
    }

    /// The address belonging to the given Ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        Self(Blake2bHash::hash(public_key).0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Ed25519Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Address({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Ed25519Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; ED25519_ADDRESS_LENGTH]> for Ed25519Address {
    fn from(bytes: [u8; ED25519_ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

/// An address of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Ed25519(Ed25519Address),
}

impl Address {
    /// The wire tag of this address.
    pub fn kind(&self) -> u8 {
        match self {
            Address::Ed25519(_) => ED25519_ADDRESS_TYPE,
        }
    }

    /// Encode as a bech32 string with the given network prefix.
    ///
    /// The bech32 payload is the serialized address, type tag included.
    pub fn to_bech32(&self, prefix: NetworkPrefix) -> String {
        let bytes = self
            .to_bytes(Mode::NoValidation)
            .expect("address serialization is infallible");
        bech32::encode::<Bech32>(prefix.hrp(), &bytes)
            .expect("a serialized address always fits a bech32 string")
    }

    /// Decode a bech32 address string into its network prefix and address.
    pub fn from_bech32(s: &str) -> Result<(NetworkPrefix, Self), Error> {
        let (hrp, data) = bech32::decode(s).map_err(|e| Error::Bech32DecodeFailed(e.to_string()))?;
        let prefix = NetworkPrefix::parse(&hrp.to_string())?;
        if data.is_empty() {
            return Err(Error::NotEnoughData {
                needed: 1,
                available: 0,
            });
        }
        let address = Self::from_bytes(&data, Mode::Validate)?;
        Ok((prefix, address))
    }
}

impl From<Ed25519Address> for Address {
    fn from(address: Ed25519Address) -> Self {
        Address::Ed25519(address)
    }
}

impl WireFormat for Address {
    fn read_from(reader: &mut Reader<'_>, _mode: Mode) -> Result<Self, Error> {
        match reader.read_u8()? {
            ED25519_ADDRESS_TYPE => Ok(Address::Ed25519(Ed25519Address(reader.read_fixed()?))),
            tag => Err(Error::UnknownAddressType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, _mode: Mode) -> Result<(), Error> {
        writer.write_u8(self.kind());
        match self {
            Address::Ed25519(address) => writer.write_bytes(address.as_bytes()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address::Ed25519(Ed25519Address::from_bytes([0x51; 32]))
    }

    #[test]
    fn test_address_roundtrip() {
        let address = sample_address();
        let bytes = address.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], ED25519_ADDRESS_TYPE);
        let decoded = Address::from_bytes(&bytes, Mode::Validate).unwrap();
        assert_eq!(decoded, address);
    }

    #[test]
    fn test_unknown_address_type_rejected() {
        let mut bytes = vec![0x07u8];
        bytes.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            Address::from_bytes(&bytes, Mode::Validate),
            Err(Error::UnknownAddressType(0x07))
        ));
    }

    #[test]
    fn test_bech32_roundtrip() {
        let address = sample_address();
        for prefix in [NetworkPrefix::Mainnet, NetworkPrefix::Testnet] {
            let encoded = address.to_bech32(prefix);
            assert!(encoded.starts_with(prefix.as_str()));
            let (decoded_prefix, decoded) = Address::from_bech32(&encoded).unwrap();
            assert_eq!(decoded_prefix, prefix);
            assert_eq!(decoded, address);
        }
    }

    #[test]
    fn test_bech32_unknown_hrp_rejected() {
        let address = sample_address();
        let bytes = address.to_bytes(Mode::NoValidation).unwrap();
        let hrp = Hrp::parse_unchecked("volt");
        let encoded = bech32::encode::<Bech32>(hrp, &bytes).unwrap();
        assert!(matches!(
            Address::from_bech32(&encoded),
            Err(Error::Bech32InvalidHrp(_))
        ));
    }

    #[test]
    fn test_bech32_garbage_rejected() {
        assert!(matches!(
            Address::from_bech32("not a bech32 string"),
            Err(Error::Bech32DecodeFailed(_))
        ));
    }

    #[test]
    fn test_address_from_public_key_is_hash() {
        let public_key = [0x0Fu8; 32];
        let address = Ed25519Address::from_public_key(&public_key);
        assert_eq!(address.as_bytes(), &Blake2bHash::hash(&public_key).0);
    }
}
