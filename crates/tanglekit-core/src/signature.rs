//! Wire signatures.

use std::fmt;

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::crypto;
use crate::error::Error;

/// Wire tag of an Ed25519 signature.
pub const ED25519_SIGNATURE_TYPE: u8 = 0;

/// An Ed25519 signature together with the public key that produced it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature {
    pub public_key: [u8; 32],
    pub signature: [u8; 64],
}

impl Ed25519Signature {
    pub fn new(public_key: [u8; 32], signature: [u8; 64]) -> Self {
        Self {
            public_key,
            signature,
        }
    }

    /// Verify this signature over the given message with its embedded key.
    pub fn verify(&self, message: &[u8]) -> Result<(), Error> {
        crypto::verify(&self.public_key, message, &self.signature)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ed25519Signature(key {}, sig {})",
            &hex::encode(self.public_key)[..16],
            &hex::encode(self.signature)[..16],
        )
    }
}

/// A signature of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Ed25519(Ed25519Signature),
}

impl Signature {
    /// The wire tag of this signature.
    pub fn kind(&self) -> u8 {
        match self {
            Signature::Ed25519(_) => ED25519_SIGNATURE_TYPE,
        }
    }
}

impl From<Ed25519Signature> for Signature {
    fn from(signature: Ed25519Signature) -> Self {
        Signature::Ed25519(signature)
    }
}

impl WireFormat for Signature {
    fn read_from(reader: &mut Reader<'_>, _mode: Mode) -> Result<Self, Error> {
        match reader.read_u8()? {
            ED25519_SIGNATURE_TYPE => Ok(Signature::Ed25519(Ed25519Signature {
                public_key: reader.read_fixed()?,
                signature: reader.read_fixed()?,
            })),
            tag => Err(Error::UnknownSignatureType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, _mode: Mode) -> Result<(), Error> {
        writer.write_u8(self.kind());
        match self {
            Signature::Ed25519(signature) => {
                writer.write_bytes(&signature.public_key);
                writer.write_bytes(&signature.signature);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn test_signature_roundtrip() {
        let signature = Signature::Ed25519(Ed25519Signature::new([0x11; 32], [0x22; 64]));
        let bytes = signature.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes.len(), 1 + 32 + 64);
        assert_eq!(bytes[0], ED25519_SIGNATURE_TYPE);
        assert_eq!(Signature::from_bytes(&bytes, Mode::Validate).unwrap(), signature);
    }

    #[test]
    fn test_unknown_signature_type_rejected() {
        let mut bytes = vec![0x04u8];
        bytes.extend_from_slice(&[0u8; 96]);
        assert!(matches!(
            Signature::from_bytes(&bytes, Mode::Validate),
            Err(Error::UnknownSignatureType(0x04))
        ));
    }

    #[test]
    fn test_embedded_key_verification() {
        let keypair = Keypair::from_seed(&[0x33; 32]);
        let message = b"sign me";
        let signature = Ed25519Signature::new(keypair.public_key(), keypair.sign(message));
        signature.verify(message).unwrap();
        assert!(signature.verify(b"other message").is_err());
    }
}
