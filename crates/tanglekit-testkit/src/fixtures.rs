//! Seeded random fixtures for wire entities.
//!
//! Every fixture draws from a caller-owned seeded RNG, so tests stay
//! reproducible. Collections that must be lexically ordered on the wire are
//! sorted by their serialized bytes before assembly.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use tanglekit_core::{
    in_memory_signer, Address, Ed25519Address, Ed25519Signature, Indexation, Keypair, Message,
    MessageId, Milestone, MilestoneId, Mode, Output, Payload, Receipt, Signature,
    SigLockedSingleOutput, SignatureUnlockBlock, Transaction, TransactionEssence, TransactionId,
    TreasuryInput, TreasuryOutput, TreasuryTransaction, UnlockBlock, UtxoInput, WireFormat,
    UTXO_INDEX_MAX,
};
use tanglekit_core::receipt::{MigratedFundsEntry, TAIL_TRANSACTION_HASH_LENGTH};

/// A fixture with a seeded RNG for building random but reproducible
/// entities.
pub struct EntityFixture {
    rng: StdRng,
}

impl EntityFixture {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn bytes_32(&mut self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    pub fn message_id(&mut self) -> MessageId {
        MessageId::from_bytes(self.bytes_32())
    }

    /// Random message IDs, sorted into their wire order.
    pub fn sorted_message_ids(&mut self, count: usize) -> Vec<MessageId> {
        let mut ids: Vec<MessageId> = (0..count).map(|_| self.message_id()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn ed25519_address(&mut self) -> Address {
        Address::Ed25519(Ed25519Address::from_bytes(self.bytes_32()))
    }

    pub fn utxo_input(&mut self) -> UtxoInput {
        UtxoInput::new(
            TransactionId::from_bytes(self.bytes_32()),
            self.rng.gen_range(0..=UTXO_INDEX_MAX),
        )
    }

    pub fn sig_locked_single_output(&mut self) -> Output {
        Output::SigLockedSingle(SigLockedSingleOutput::new(
            self.ed25519_address(),
            self.rng.gen_range(1..10_000),
        ))
    }

    pub fn indexation(&mut self) -> Indexation {
        let index_len = self.rng.gen_range(1..=64);
        let mut index = vec![0u8; index_len];
        self.rng.fill_bytes(&mut index);
        let mut data = vec![0u8; self.rng.gen_range(0..200)];
        self.rng.fill_bytes(&mut data);
        Indexation::new(index, data).expect("index length is within bounds")
    }

    /// A transaction essence with sorted, duplicate-free inputs and outputs.
    pub fn transaction_essence(&mut self) -> TransactionEssence {
        let mut inputs: Vec<UtxoInput> =
            (0..self.rng.gen_range(1..5)).map(|_| self.utxo_input()).collect();
        inputs.sort_unstable_by_key(|input| {
            input
                .to_bytes(Mode::NoValidation)
                .expect("input serialization is infallible")
        });

        let mut outputs: Vec<Output> = (0..self.rng.gen_range(1..5))
            .map(|_| self.sig_locked_single_output())
            .collect();
        outputs.sort_unstable_by_key(|output| {
            output
                .to_bytes(Mode::NoValidation)
                .expect("output serialization is infallible")
        });

        TransactionEssence {
            inputs,
            outputs,
            payload: None,
        }
    }

    /// A transaction whose unlock blocks carry distinct random keys, one per
    /// input.
    pub fn transaction(&mut self) -> Transaction {
        let essence = self.transaction_essence();
        let unlock_blocks = (0..essence.inputs.len())
            .map(|_| {
                UnlockBlock::Signature(SignatureUnlockBlock::new(Signature::Ed25519(
                    Ed25519Signature::new(self.bytes_32(), {
                        let mut signature = [0u8; 64];
                        self.rng.fill_bytes(&mut signature);
                        signature
                    }),
                )))
            })
            .collect();
        Transaction {
            essence,
            unlock_blocks,
        }
    }

    /// A milestone signed by freshly generated keypairs, together with those
    /// keypairs.
    pub fn signed_milestone(&mut self, key_count: usize) -> (Milestone, Vec<Keypair>) {
        let keypairs: Vec<Keypair> = (0..key_count)
            .map(|_| {
                let mut seed = [0u8; 32];
                self.rng.fill_bytes(&mut seed);
                Keypair::from_seed(&seed)
            })
            .collect();
        let parent_count = self.rng.gen_range(1..=8);
        let mut milestone = Milestone::new(
            self.rng.gen_range(1..100_000),
            self.rng.gen_range(1_500_000_000..1_700_000_000),
            self.sorted_message_ids(parent_count),
            self.bytes_32(),
            keypairs.iter().map(Keypair::public_key).collect(),
        )
        .expect("at least one public key is supplied");

        let keys: HashMap<[u8; 32], Keypair> = keypairs
            .iter()
            .map(|keypair| (keypair.public_key(), keypair.clone()))
            .collect();
        milestone
            .sign(in_memory_signer(keys))
            .expect("the in-memory signer covers every key");
        (milestone, keypairs)
    }

    pub fn treasury_transaction(&mut self) -> TreasuryTransaction {
        TreasuryTransaction::new(
            TreasuryInput::new(MilestoneId::from_bytes(self.bytes_32())),
            TreasuryOutput::new(self.rng.gen_range(0..1_000_000_000)),
        )
    }

    /// A receipt with sorted, duplicate-free funds entries.
    pub fn receipt(&mut self) -> Receipt {
        let mut funds: Vec<MigratedFundsEntry> = (0..self.rng.gen_range(1..5))
            .map(|_| {
                let mut tail = [0u8; TAIL_TRANSACTION_HASH_LENGTH];
                self.rng.fill_bytes(&mut tail);
                MigratedFundsEntry {
                    tail_transaction_hash: tail,
                    address: self.ed25519_address(),
                    deposit: self.rng.gen_range(1_000_000..10_000_000),
                }
            })
            .collect();
        funds.sort_unstable_by_key(|entry| {
            entry
                .to_bytes(Mode::NoValidation)
                .expect("entry serialization is infallible")
        });
        Receipt {
            migrated_at: self.rng.gen_range(1..1_000_000),
            is_final: self.rng.gen_bool(0.5),
            funds,
            transaction: self.treasury_transaction(),
        }
    }

    /// A message with sorted parents and the given payload.
    pub fn message(&mut self, payload: Option<Payload>) -> Message {
        let parent_count = self.rng.gen_range(1..=8);
        Message {
            network_id: self.rng.gen(),
            parents: self.sorted_message_ids(parent_count),
            payload,
            nonce: self.rng.gen(),
        }
    }
}
