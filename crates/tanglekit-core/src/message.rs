//! The message envelope, the on-wire unit of the network.

use crate::codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
use crate::crypto::Blake2bHash;
use crate::error::Error;
use crate::payload::{read_payload_slot, write_payload_slot, Payload};
use crate::rules::{ArrayRules, ElementOrder};
use crate::types::MessageId;
use crate::{MAX_MESSAGE_SIZE, PARENT_COUNT_MAX, PARENT_COUNT_MIN};

const PARENTS_RULES: ArrayRules =
    ArrayRules::new(PARENT_COUNT_MIN, PARENT_COUNT_MAX, ElementOrder::Lexical, true);

/// A message: the envelope carrying an optional payload through the network.
///
/// Wire layout: network ID, parent list, payload slot, nonce. The serialized
/// form must not exceed [`MAX_MESSAGE_SIZE`] bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// The network this message is meant for.
    pub network_id: u64,
    /// The messages this message attaches to, lexically ordered and unique.
    pub parents: Vec<MessageId>,
    /// The optional payload.
    pub payload: Option<Payload>,
    /// The proof-of-work nonce.
    pub nonce: u64,
}

impl Message {
    /// The message ID: the Blake2b-256 hash of the serialized message.
    pub fn id(&self) -> Result<MessageId, Error> {
        let bytes = self.to_bytes(Mode::NoValidation)?;
        Ok(MessageId::from_bytes(Blake2bHash::hash(&bytes).0))
    }

    fn check_payload(&self) -> Result<(), Error> {
        match &self.payload {
            None
            | Some(Payload::Transaction(_))
            | Some(Payload::Milestone(_))
            | Some(Payload::Indexation(_)) => Ok(()),
            // Receipts and treasury transactions only travel embedded in
            // milestones.
            Some(other) => Err(Error::UnknownPayloadType(other.kind())),
        }
    }
}

impl WireFormat for Message {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        if mode.validating() {
            let total = reader.remaining();
            if total > MAX_MESSAGE_SIZE {
                return Err(Error::LengthInvalid {
                    len: total,
                    max: MAX_MESSAGE_SIZE,
                });
            }
        }
        let network_id = reader.read_u64()?;
        let parents: Vec<[u8; 32]> = reader.read_array_slice(LengthPrefix::U8)?;
        let payload = read_payload_slot(reader, mode)?;
        let nonce = reader.read_u64()?;

        let message = Self {
            network_id,
            parents: parents.into_iter().map(MessageId::from_bytes).collect(),
            payload,
            nonce,
        };
        if mode.validating() {
            PARENTS_RULES.check(&message.parents)?;
            message.check_payload()?;
        }
        Ok(message)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            PARENTS_RULES.check(&self.parents)?;
            self.check_payload()?;
        }
        let start = writer.len();
        writer.write_u64(self.network_id);
        let parents: Vec<[u8; 32]> = self.parents.iter().map(|id| id.0).collect();
        writer.write_array_slice(LengthPrefix::U8, &parents)?;
        write_payload_slot(writer, self.payload.as_ref(), mode)?;
        writer.write_u64(self.nonce);

        if mode.validating() {
            let len = writer.len() - start;
            if len > MAX_MESSAGE_SIZE {
                return Err(Error::MaxExceeded {
                    max: MAX_MESSAGE_SIZE,
                    actual: len,
                });
            }
        }
        Ok(())
    }
}

/// Derives a network ID from a network name: the low eight bytes of the
/// name's Blake2b-256 hash, read as a little-endian u64.
pub fn network_id_from_name(name: &str) -> u64 {
    let hash = Blake2bHash::hash(name.as_bytes());
    u64::from_le_bytes(hash.0[..8].try_into().expect("hash holds at least 8 bytes"))
}
