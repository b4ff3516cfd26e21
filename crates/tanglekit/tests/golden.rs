//! Golden end-to-end scenarios over literal wire vectors.

use std::collections::HashSet;
use std::time::Duration;

use tanglekit::{
    pow_score, CancelToken, Error, Keypair, Message, MessageBuilder, MessageId, Miner, Mode,
    Output, Payload, PowError, SigLockedSingleOutput, WireFormat, TOKEN_SUPPLY,
};
use tanglekit_testkit::vectors::{
    indexation_vector, message_with_indexation_vector, message_without_payload_vector,
};
use tanglekit_testkit::EntityFixture;

#[test]
fn indexation_round_trips_through_its_wire_bytes() {
    let (indexation, bytes) = indexation_vector();
    assert_eq!(indexation.to_bytes(Mode::Validate).unwrap(), bytes);

    let decoded = tanglekit::Indexation::from_bytes(&bytes, Mode::Validate).unwrap();
    assert_eq!(decoded, indexation);
    assert_eq!(decoded.to_bytes(Mode::Validate).unwrap(), bytes);
}

#[test]
fn message_without_payload_has_the_documented_layout() {
    let (message, bytes) = message_without_payload_vector();
    assert_eq!(message.to_bytes(Mode::Validate).unwrap(), bytes);

    let decoded = Message::from_bytes(&bytes, Mode::Validate).unwrap();
    assert_eq!(decoded, message);
    assert!(decoded.payload.is_none());
    assert_eq!(decoded.to_bytes(Mode::Validate).unwrap(), bytes);
}

#[test]
fn unsorted_parents_are_rejected_on_serialize() {
    let (mut message, _) = message_without_payload_vector();
    message.parents.reverse();
    assert!(matches!(
        message.to_bytes(Mode::Validate),
        Err(Error::OrderViolation { .. })
    ));
}

#[test]
fn outputs_summing_past_the_supply_are_rejected() {
    let mut fixture = EntityFixture::new(4);
    let mut transaction = fixture.transaction();
    transaction.essence.outputs = {
        let mut outputs = vec![
            Output::SigLockedSingle(SigLockedSingleOutput::new(fixture.ed25519_address(), 1)),
            Output::SigLockedSingle(SigLockedSingleOutput::new(
                fixture.ed25519_address(),
                TOKEN_SUPPLY,
            )),
        ];
        outputs.sort_unstable_by_key(|output| output.to_bytes(Mode::NoValidation).unwrap());
        outputs
    };

    let bytes = transaction.to_bytes(Mode::NoValidation).unwrap();
    assert!(matches!(
        tanglekit::Transaction::from_bytes(&bytes, Mode::Validate),
        Err(Error::OutputsSumExceedsSupply(_))
    ));
}

#[test]
fn milestone_signatures_verify_against_the_applicable_key_set() {
    let mut fixture = EntityFixture::new(5);
    let (milestone, keypairs) = fixture.signed_milestone(3);

    let applicable: HashSet<[u8; 32]> = keypairs.iter().map(Keypair::public_key).collect();
    milestone.verify_signatures(2, &applicable).unwrap();

    // Removing one key makes its signature non-applicable.
    let removed = keypairs[1].public_key();
    let reduced: HashSet<[u8; 32]> = applicable
        .iter()
        .copied()
        .filter(|key| *key != removed)
        .collect();
    let err = milestone.verify_signatures(2, &reduced).unwrap_err();
    let expected_pos = milestone
        .public_keys
        .iter()
        .position(|key| *key == removed)
        .unwrap();
    assert!(matches!(err, Error::MilestoneNonApplicableKey { pos } if pos == expected_pos));
}

#[test]
fn mined_messages_meet_the_target_score() {
    let (message, _) = message_with_indexation_vector();
    let target = 100.0;

    let mined = MessageBuilder::new()
        .network_id(message.network_id)
        .parents(message.parents.clone())
        .payload(message.payload.clone().unwrap())
        .finish_with_pow(&Miner::with_workers(2), target, &CancelToken::new())
        .unwrap();

    let bytes = mined.to_bytes(Mode::Validate).unwrap();
    assert!(pow_score(&bytes) >= target);
}

#[test]
fn mining_can_be_cancelled() {
    let (message, _) = message_with_indexation_vector();
    let cancel = CancelToken::new();
    let canceller = cancel.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        canceller.cancel();
    });

    // An unreachable target forces the run to end through cancellation.
    let outcome = MessageBuilder::new()
        .network_id(message.network_id)
        .parents(message.parents.clone())
        .payload(message.payload.clone().unwrap())
        .finish_with_pow(&Miner::with_workers(2), 1e15, &cancel);
    handle.join().unwrap();
    assert!(matches!(outcome, Err(tanglekit::BuildError::Pow(PowError::Cancelled))));
}

#[test]
fn empty_payload_slot_means_no_payload() {
    let (message, bytes) = message_without_payload_vector();
    // The payload slot is the four zero bytes before the nonce.
    let slot = &bytes[bytes.len() - 12..bytes.len() - 8];
    assert_eq!(slot, &[0, 0, 0, 0]);

    let reparsed = Message::from_bytes(&bytes, Mode::Validate).unwrap();
    assert_eq!(reparsed, message);
    assert_eq!(reparsed.to_bytes(Mode::Validate).unwrap(), bytes);
}

#[test]
fn transaction_with_missing_unlock_block_is_rejected() {
    let mut fixture = EntityFixture::new(6);
    let mut transaction = fixture.transaction();
    transaction.unlock_blocks.pop();
    assert!(matches!(
        transaction.to_bytes(Mode::Validate),
        Err(Error::UnlockBlocksValidation(_))
    ));
}

#[test]
fn message_ids_are_stable_across_round_trips() {
    let mut fixture = EntityFixture::new(8);
    let payload = Some(Payload::Indexation(fixture.indexation()));
    let message = fixture.message(payload);

    let bytes = message.to_bytes(Mode::Validate).unwrap();
    let decoded = Message::from_bytes(&bytes, Mode::Validate).unwrap();
    assert_eq!(message.id().unwrap(), decoded.id().unwrap());
    assert_eq!(MessageId::from_bytes(*message.id().unwrap().as_bytes()), decoded.id().unwrap());
}
