//! Milestones: periodic multi-signed markers defining the confirmed
//! subtangle.
//!
//! A milestone carries between 1 and 255 public keys and exactly as many
//! signatures. The signed bytes (the essence) cover everything up to and
//! including the public keys; the embedded payload slot and the signatures
//! themselves are excluded.

use std::collections::{HashMap, HashSet};

use crate::codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
use crate::crypto::{self, Blake2bHash, Keypair};
use crate::error::Error;
use crate::payload::{read_payload_slot, write_payload_slot, Payload, MILESTONE_PAYLOAD_TYPE};
use crate::receipt::Receipt;
use crate::rules::{ArrayRules, ElementOrder};
use crate::types::{MessageId, MilestoneId};
use crate::{
    MILESTONE_KEY_COUNT_MAX, MILESTONE_KEY_COUNT_MIN, PARENT_COUNT_MAX, PARENT_COUNT_MIN,
};

/// Byte length of a milestone public key.
pub const MILESTONE_PUBLIC_KEY_LENGTH: usize = 32;

/// Byte length of a milestone signature.
pub const MILESTONE_SIGNATURE_LENGTH: usize = 64;

const PARENTS_RULES: ArrayRules =
    ArrayRules::new(PARENT_COUNT_MIN, PARENT_COUNT_MAX, ElementOrder::Lexical, true);

const PUBLIC_KEY_RULES: ArrayRules = ArrayRules::new(
    MILESTONE_KEY_COUNT_MIN,
    MILESTONE_KEY_COUNT_MAX,
    ElementOrder::Lexical,
    true,
);

/// A milestone payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// The index of this milestone.
    pub index: u32,
    /// The time at which this milestone was issued, in Unix seconds.
    pub timestamp: u64,
    /// The messages this milestone attaches to, lexically ordered.
    pub parents: Vec<MessageId>,
    /// The inclusion merkle proof of newly confirmed transactions.
    pub inclusion_merkle_proof: [u8; 32],
    /// The public keys validating the signatures, lexically ordered.
    pub public_keys: Vec<[u8; MILESTONE_PUBLIC_KEY_LENGTH]>,
    /// An optional embedded receipt.
    pub receipt: Option<Receipt>,
    /// One signature per public key, in key order.
    pub signatures: Vec<[u8; MILESTONE_SIGNATURE_LENGTH]>,
}

impl Milestone {
    /// Create a new, unsigned milestone.
    ///
    /// The given public keys are sorted into their lexical byte order, so
    /// the caller need not pre-sort.
    pub fn new(
        index: u32,
        timestamp: u64,
        parents: Vec<MessageId>,
        inclusion_merkle_proof: [u8; 32],
        mut public_keys: Vec<[u8; MILESTONE_PUBLIC_KEY_LENGTH]>,
    ) -> Result<Self, Error> {
        PUBLIC_KEY_RULES.check_count(public_keys.len())?;
        public_keys.sort_unstable();
        Ok(Self {
            index,
            timestamp,
            parents,
            inclusion_merkle_proof,
            public_keys,
            receipt: None,
            signatures: Vec::new(),
        })
    }

    /// The milestone ID: the Blake2b-256 hash of the serialized payload.
    pub fn id(&self) -> Result<MilestoneId, Error> {
        let bytes = self.to_bytes(Mode::NoValidation)?;
        Ok(MilestoneId::from_bytes(Blake2bHash::hash(&bytes).0))
    }

    /// The essence: the bytes a milestone signature is computed over.
    pub fn essence(&self) -> Result<Vec<u8>, Error> {
        PUBLIC_KEY_RULES.check_count(self.public_keys.len())?;
        let mut writer = Writer::new();
        writer.write_u32(self.index);
        writer.write_u64(self.timestamp);
        let parents: Vec<[u8; 32]> = self.parents.iter().map(|id| id.0).collect();
        writer.write_array_slice(LengthPrefix::U8, &parents)?;
        writer.write_bytes(&self.inclusion_merkle_proof);
        writer.write_array_slice(LengthPrefix::U8, &self.public_keys)?;
        Ok(writer.into_bytes())
    }

    /// Produce and attach the signatures via the given signing function.
    ///
    /// The function receives the public keys (dictating the signature order)
    /// and the essence bytes; it must return exactly one signature per key.
    pub fn sign<F>(&mut self, signing_fn: F) -> Result<(), Error>
    where
        F: FnOnce(
            &[[u8; MILESTONE_PUBLIC_KEY_LENGTH]],
            &[u8],
        ) -> Result<Vec<[u8; MILESTONE_SIGNATURE_LENGTH]>, Error>,
    {
        let essence = self.essence()?;
        let signatures = signing_fn(&self.public_keys, &essence)?;
        if signatures.len() != self.public_keys.len() {
            return Err(Error::MilestonePubKeySigMismatch {
                public_keys: self.public_keys.len(),
                signatures: signatures.len(),
            });
        }
        self.signatures = signatures;
        Ok(())
    }

    /// Verify that at least `min_threshold` valid signatures occur, all
    /// produced by keys from the applicable set.
    pub fn verify_signatures(
        &self,
        min_threshold: usize,
        applicable_public_keys: &HashSet<[u8; MILESTONE_PUBLIC_KEY_LENGTH]>,
    ) -> Result<(), Error> {
        if min_threshold == 0 {
            return Err(Error::MilestoneThresholdUnsatisfiable {
                threshold: min_threshold,
                applicable: applicable_public_keys.len(),
            });
        }
        if self.signatures.is_empty() {
            return Err(Error::MilestoneTooFewSignatures {
                min: min_threshold,
                actual: 0,
            });
        }
        if self.signatures.len() != self.public_keys.len() {
            return Err(Error::MilestonePubKeySigMismatch {
                public_keys: self.public_keys.len(),
                signatures: self.signatures.len(),
            });
        }
        if self.signatures.len() < min_threshold {
            return Err(Error::MilestoneTooFewSignatures {
                min: min_threshold,
                actual: self.signatures.len(),
            });
        }
        if applicable_public_keys.len() < min_threshold {
            return Err(Error::MilestoneThresholdUnsatisfiable {
                threshold: min_threshold,
                applicable: applicable_public_keys.len(),
            });
        }

        let essence = self.essence()?;
        let mut seen: HashMap<[u8; 32], usize> = HashMap::new();
        for (pos, (public_key, signature)) in
            self.public_keys.iter().zip(&self.signatures).enumerate()
        {
            if let Some(prev) = seen.insert(*public_key, pos) {
                return Err(Error::MilestoneDuplicatedKey { pos, prev });
            }
            if !applicable_public_keys.contains(public_key) {
                return Err(Error::MilestoneNonApplicableKey { pos });
            }
            crypto::verify(public_key, &essence, signature)
                .map_err(|_| Error::MilestoneInvalidSignature { pos })?;
        }
        Ok(())
    }

    fn check_signature_counts(&self) -> Result<(), Error> {
        if self.signatures.is_empty() {
            return Err(Error::MilestoneTooFewSignatures {
                min: MILESTONE_KEY_COUNT_MIN,
                actual: 0,
            });
        }
        if self.signatures.len() > MILESTONE_KEY_COUNT_MAX {
            return Err(Error::MaxExceeded {
                max: MILESTONE_KEY_COUNT_MAX,
                actual: self.signatures.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let index = reader.read_u32()?;
        let timestamp = reader.read_u64()?;
        let parents: Vec<[u8; 32]> = reader.read_array_slice(LengthPrefix::U8)?;
        let inclusion_merkle_proof = reader.read_fixed()?;
        let public_keys = reader.read_array_slice(LengthPrefix::U8)?;
        let receipt = match read_payload_slot(reader, mode)? {
            None => None,
            Some(Payload::Receipt(receipt)) => Some(*receipt),
            Some(other) => {
                return Err(Error::TypeMismatch {
                    expected: crate::payload::RECEIPT_PAYLOAD_TYPE,
                    actual: other.kind(),
                })
            }
        };
        let signatures = reader.read_array_slice(LengthPrefix::U8)?;

        let milestone = Self {
            index,
            timestamp,
            parents: parents.into_iter().map(MessageId::from_bytes).collect(),
            inclusion_merkle_proof,
            public_keys,
            receipt,
            signatures,
        };
        if milestone.signatures.len() != milestone.public_keys.len() {
            return Err(Error::MilestonePubKeySigMismatch {
                public_keys: milestone.public_keys.len(),
                signatures: milestone.signatures.len(),
            });
        }
        if mode.validating() {
            PARENTS_RULES.check(&milestone.parents)?;
            PUBLIC_KEY_RULES.check(&milestone.public_keys)?;
            milestone.check_signature_counts()?;
        }
        Ok(milestone)
    }
}

impl WireFormat for Milestone {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u32()?;
        if tag != MILESTONE_PAYLOAD_TYPE {
            return Err(Error::TypeMismatch {
                expected: MILESTONE_PAYLOAD_TYPE,
                actual: tag,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            PARENTS_RULES.check(&self.parents)?;
            PUBLIC_KEY_RULES.check(&self.public_keys)?;
            self.check_signature_counts()?;
            if self.signatures.len() != self.public_keys.len() {
                return Err(Error::MilestonePubKeySigMismatch {
                    public_keys: self.public_keys.len(),
                    signatures: self.signatures.len(),
                });
            }
        }
        writer.write_u32(MILESTONE_PAYLOAD_TYPE);
        writer.write_u32(self.index);
        writer.write_u64(self.timestamp);
        let parents: Vec<[u8; 32]> = self.parents.iter().map(|id| id.0).collect();
        writer.write_array_slice(LengthPrefix::U8, &parents)?;
        writer.write_bytes(&self.inclusion_merkle_proof);
        writer.write_array_slice(LengthPrefix::U8, &self.public_keys)?;
        let receipt_payload = self.receipt.clone().map(Payload::from);
        write_payload_slot(writer, receipt_payload.as_ref(), mode)?;
        writer.write_array_slice(LengthPrefix::U8, &self.signatures)?;
        Ok(())
    }
}

/// A signing function backed by an in-memory key mapping.
///
/// Looks up the secret key for every milestone public key; a missing key
/// aborts the signing.
pub fn in_memory_signer(
    keys: HashMap<[u8; MILESTONE_PUBLIC_KEY_LENGTH], Keypair>,
) -> impl FnOnce(
    &[[u8; MILESTONE_PUBLIC_KEY_LENGTH]],
    &[u8],
) -> Result<Vec<[u8; MILESTONE_SIGNATURE_LENGTH]>, Error> {
    move |public_keys, essence| {
        let mut signatures = Vec::with_capacity(public_keys.len());
        for public_key in public_keys {
            let keypair = keys
                .get(public_key)
                .ok_or_else(|| Error::MilestoneSignerKeyMissing(hex::encode(public_key)))?;
            signatures.push(keypair.sign(essence));
        }
        Ok(signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_parents() -> Vec<MessageId> {
        vec![
            MessageId::from_bytes([0x11; 32]),
            MessageId::from_bytes([0x22; 32]),
        ]
    }

    fn signed_milestone(key_count: usize) -> (Milestone, Vec<Keypair>) {
        let keypairs: Vec<Keypair> = (0..key_count)
            .map(|i| Keypair::from_seed(&[i as u8 + 1; 32]))
            .collect();
        let public_keys = keypairs.iter().map(Keypair::public_key).collect();
        let mut milestone =
            Milestone::new(7, 1_600_000_000, sorted_parents(), [0x99; 32], public_keys).unwrap();

        let keys: HashMap<[u8; 32], Keypair> = keypairs
            .iter()
            .map(|kp| (kp.public_key(), kp.clone()))
            .collect();
        milestone.sign(in_memory_signer(keys)).unwrap();
        (milestone, keypairs)
    }

    #[test]
    fn test_new_sorts_public_keys() {
        let milestone = Milestone::new(
            1,
            0,
            sorted_parents(),
            [0x00; 32],
            vec![[0x03; 32], [0x01; 32], [0x02; 32]],
        )
        .unwrap();
        assert_eq!(
            milestone.public_keys,
            vec![[0x01; 32], [0x02; 32], [0x03; 32]]
        );
    }

    #[test]
    fn test_roundtrip() {
        let (milestone, _) = signed_milestone(3);
        let bytes = milestone.to_bytes(Mode::Validate).unwrap();
        assert_eq!(&bytes[..4], &MILESTONE_PAYLOAD_TYPE.to_le_bytes());
        assert_eq!(
            Milestone::from_bytes(&bytes, Mode::Validate).unwrap(),
            milestone
        );
    }

    #[test]
    fn test_unsorted_public_keys_rejected_on_serialize() {
        let (mut milestone, _) = signed_milestone(3);
        milestone.public_keys.swap(0, 2);
        milestone.signatures.swap(0, 2);
        assert!(matches!(
            milestone.to_bytes(Mode::Validate),
            Err(Error::OrderViolation { .. })
        ));
    }

    #[test]
    fn test_signature_count_must_match_keys() {
        let (mut milestone, _) = signed_milestone(2);
        milestone.signatures.pop();
        assert!(matches!(
            milestone.to_bytes(Mode::Validate),
            Err(Error::MilestonePubKeySigMismatch { .. })
        ));
        let bytes = milestone.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            Milestone::from_bytes(&bytes, Mode::NoValidation),
            Err(Error::MilestonePubKeySigMismatch { .. })
        ));
    }

    #[test]
    fn test_sign_then_verify() {
        let (milestone, keypairs) = signed_milestone(3);
        let applicable: HashSet<[u8; 32]> =
            keypairs.iter().map(Keypair::public_key).collect();
        milestone.verify_signatures(2, &applicable).unwrap();
    }

    #[test]
    fn test_verify_rejects_non_applicable_key() {
        let (milestone, keypairs) = signed_milestone(3);
        let removed = keypairs[1].public_key();
        let applicable: HashSet<[u8; 32]> = keypairs
            .iter()
            .map(Keypair::public_key)
            .filter(|pk| *pk != removed)
            .collect();
        let err = milestone.verify_signatures(2, &applicable).unwrap_err();
        let expected_pos = milestone
            .public_keys
            .iter()
            .position(|pk| *pk == removed)
            .unwrap();
        assert!(
            matches!(err, Error::MilestoneNonApplicableKey { pos } if pos == expected_pos)
        );
    }

    #[test]
    fn test_verify_rejects_tampered_signature() {
        let (mut milestone, keypairs) = signed_milestone(2);
        milestone.signatures[1] = [0xFF; 64];
        let applicable: HashSet<[u8; 32]> =
            keypairs.iter().map(Keypair::public_key).collect();
        assert!(matches!(
            milestone.verify_signatures(1, &applicable),
            Err(Error::MilestoneInvalidSignature { pos: 1 })
        ));
    }

    #[test]
    fn test_verify_threshold_bounds() {
        let (milestone, keypairs) = signed_milestone(2);
        let applicable: HashSet<[u8; 32]> =
            keypairs.iter().map(Keypair::public_key).collect();
        assert!(matches!(
            milestone.verify_signatures(0, &applicable),
            Err(Error::MilestoneThresholdUnsatisfiable { .. })
        ));
        assert!(matches!(
            milestone.verify_signatures(3, &applicable),
            Err(Error::MilestoneTooFewSignatures { min: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_signer_missing_key() {
        let keypair = Keypair::from_seed(&[0x01; 32]);
        let mut milestone = Milestone::new(
            1,
            0,
            sorted_parents(),
            [0x00; 32],
            vec![keypair.public_key()],
        )
        .unwrap();
        let err = milestone
            .sign(in_memory_signer(HashMap::new()))
            .unwrap_err();
        assert!(matches!(err, Error::MilestoneSignerKeyMissing(_)));
    }

    #[test]
    fn test_essence_excludes_signatures() {
        let (mut milestone, _) = signed_milestone(2);
        let essence_before = milestone.essence().unwrap();
        milestone.signatures[0] = [0xAA; 64];
        assert_eq!(milestone.essence().unwrap(), essence_before);
    }
}
