//! Literal wire vectors with known byte layouts.
//!
//! These pin the exact on-wire encoding: tests deserialize the bytes and
//! compare against the expected entity, and serialize the entity and
//! compare against the bytes.

use tanglekit_core::{Indexation, Message, MessageId, Payload};

/// An indexation payload and its exact wire bytes.
pub fn indexation_vector() -> (Indexation, Vec<u8>) {
    let indexation =
        Indexation::new(b"IOTA".to_vec(), vec![0xDE, 0xAD, 0xBE, 0xEF]).expect("valid index");
    let bytes = vec![
        0x02, 0x00, 0x00, 0x00, // payload type
        0x04, 0x00, // index length
        0x49, 0x4F, 0x54, 0x41, // "IOTA"
        0x04, 0x00, 0x00, 0x00, // data length
        0xDE, 0xAD, 0xBE, 0xEF, // data
    ];
    (indexation, bytes)
}

/// A payload-free message with two sorted parents and its exact wire bytes.
pub fn message_without_payload_vector() -> (Message, Vec<u8>) {
    let parent_1 = [0x11u8; 32];
    let parent_2 = [0x22u8; 32];
    let message = Message {
        network_id: 1,
        parents: vec![
            MessageId::from_bytes(parent_1),
            MessageId::from_bytes(parent_2),
        ],
        payload: None,
        nonce: 0,
    };

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u64.to_le_bytes());
    bytes.push(2);
    bytes.extend_from_slice(&parent_1);
    bytes.extend_from_slice(&parent_2);
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    (message, bytes)
}

/// A message carrying the indexation vector as its payload.
pub fn message_with_indexation_vector() -> (Message, Vec<u8>) {
    let (indexation, indexation_bytes) = indexation_vector();
    let (mut message, _) = message_without_payload_vector();
    message.payload = Some(Payload::Indexation(indexation));
    message.nonce = 0xDEAD_BEEF;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&message.network_id.to_le_bytes());
    bytes.push(2);
    for parent in &message.parents {
        bytes.extend_from_slice(parent.as_bytes());
    }
    bytes.extend_from_slice(&(indexation_bytes.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&indexation_bytes);
    bytes.extend_from_slice(&message.nonce.to_le_bytes());
    (message, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanglekit_core::{Mode, WireFormat};

    #[test]
    fn test_vectors_are_internally_consistent() {
        let (indexation, bytes) = indexation_vector();
        assert_eq!(indexation.to_bytes(Mode::Validate).unwrap(), bytes);

        let (message, bytes) = message_without_payload_vector();
        assert_eq!(message.to_bytes(Mode::Validate).unwrap(), bytes);

        let (message, bytes) = message_with_indexation_vector();
        assert_eq!(message.to_bytes(Mode::Validate).unwrap(), bytes);
    }
}
