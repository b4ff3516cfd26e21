//! Proptest strategies for wire entities.
//!
//! Strategies produce entities that satisfy the wire invariants, so tests
//! can assert round-trip properties over the validated codec paths.

use proptest::prelude::*;

use tanglekit_core::{
    Address, Ed25519Address, Ed25519Signature, Indexation, Message, MessageId, Mode, Output,
    Payload, Signature, SigLockedSingleOutput, SignatureUnlockBlock, Transaction,
    TransactionEssence, TransactionId, UnlockBlock, UtxoInput, WireFormat, UTXO_INDEX_MAX,
};

/// A random message ID.
pub fn message_id() -> impl Strategy<Value = MessageId> {
    any::<[u8; 32]>().prop_map(MessageId::from_bytes)
}

/// A random Ed25519 address.
pub fn ed25519_address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(|bytes| Address::Ed25519(Ed25519Address::from_bytes(bytes)))
}

/// A random UTXO input within the index bound.
pub fn utxo_input() -> impl Strategy<Value = UtxoInput> {
    (any::<[u8; 32]>(), 0..=UTXO_INDEX_MAX).prop_map(|(id, index)| {
        UtxoInput::new(TransactionId::from_bytes(id), index)
    })
}

/// A random signature-locked single output with a small positive amount.
pub fn sig_locked_single_output() -> impl Strategy<Value = Output> {
    (ed25519_address(), 1u64..1_000_000).prop_map(|(address, amount)| {
        Output::SigLockedSingle(SigLockedSingleOutput::new(address, amount))
    })
}

/// A random indexation payload with a valid index length.
pub fn indexation() -> impl Strategy<Value = Indexation> {
    (
        prop::collection::vec(any::<u8>(), 1..=64),
        prop::collection::vec(any::<u8>(), 0..=256),
    )
        .prop_map(|(index, data)| Indexation::new(index, data).expect("index is within bounds"))
}

/// 1 to 8 distinct parents, sorted into wire order.
pub fn parents() -> impl Strategy<Value = Vec<MessageId>> {
    prop::collection::btree_set(any::<[u8; 32]>(), 1..=8).prop_map(|set| {
        // BTreeSet iteration order matches byte-wise lexical order.
        set.into_iter().map(MessageId::from_bytes).collect()
    })
}

/// A transaction essence with sorted, distinct inputs and outputs.
pub fn transaction_essence() -> impl Strategy<Value = TransactionEssence> {
    (
        prop::collection::vec(utxo_input(), 1..=4),
        prop::collection::vec(sig_locked_single_output(), 1..=4),
        prop::option::of(indexation()),
    )
        .prop_map(|(mut inputs, mut outputs, payload)| {
            inputs.sort_unstable_by_key(|input| {
                input
                    .to_bytes(Mode::NoValidation)
                    .expect("input serialization is infallible")
            });
            inputs.dedup();
            outputs.sort_unstable_by_key(|output| {
                output
                    .to_bytes(Mode::NoValidation)
                    .expect("output serialization is infallible")
            });
            outputs.dedup();
            TransactionEssence {
                inputs,
                outputs,
                payload: payload.map(Payload::Indexation),
            }
        })
}

/// A transaction with one distinct-key signature unlock block per input.
pub fn transaction() -> impl Strategy<Value = Transaction> {
    (transaction_essence(), any::<[u8; 16]>()).prop_map(|(essence, key_seed)| {
        let unlock_blocks = (0..essence.inputs.len())
            .map(|position| {
                let mut public_key = [0u8; 32];
                public_key[..16].copy_from_slice(&key_seed);
                public_key[16] = position as u8;
                UnlockBlock::Signature(SignatureUnlockBlock::new(Signature::Ed25519(
                    Ed25519Signature::new(public_key, [0x5A; 64]),
                )))
            })
            .collect();
        Transaction {
            essence,
            unlock_blocks,
        }
    })
}

/// A message carrying no payload, an indexation, or a transaction.
pub fn message() -> impl Strategy<Value = Message> {
    let payload = prop_oneof![
        Just(None),
        indexation().prop_map(|indexation| Some(Payload::Indexation(indexation))),
        transaction().prop_map(|transaction| Some(Payload::from(transaction))),
    ];
    (any::<u64>(), parents(), payload, any::<u64>()).prop_map(
        |(network_id, parents, payload, nonce)| Message {
            network_id,
            parents,
            payload,
            nonce,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_messages_validate(message in message()) {
            prop_assert!(message.to_bytes(Mode::Validate).is_ok());
        }

        #[test]
        fn test_generated_essences_validate(essence in transaction_essence()) {
            prop_assert!(essence.to_bytes(Mode::Validate).is_ok());
        }
    }
}
