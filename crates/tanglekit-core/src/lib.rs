//! # tanglekit-core
//!
//! The pure binary codec and validation core of the tangle client library.
//!
//! This crate contains no I/O, no networking, no persistence. It is pure
//! computation over byte buffers: parsing and emitting the length-prefixed,
//! strictly-ordered wire format, enforcing its structural invariants, and
//! computing the hashes and signatures the protocol defines.
//!
//! ## Key Types
//!
//! - [`Message`] - The on-wire envelope and top-level entry point
//! - [`Payload`] - The sum of all payload kinds a message can carry
//! - [`Transaction`] / [`TransactionEssence`] - Value transfers
//! - [`Milestone`] - Multi-signed confirmation markers
//! - [`Mode`] - Chooses between structural and fully validated codec runs
//!
//! ## Round-trip guarantee
//!
//! Any accepted byte buffer re-serializes byte-for-byte, and any entity that
//! serializes under validation deserializes back to an equal value.

pub mod address;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod indexation;
pub mod input;
pub mod message;
pub mod milestone;
pub mod output;
pub mod payload;
pub mod receipt;
pub mod rules;
pub mod signature;
pub mod transaction;
pub mod treasury;
pub mod types;
pub mod unlock;

pub use address::{Address, Ed25519Address, NetworkPrefix};
pub use codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
pub use crypto::{Blake2bHash, Keypair};
pub use error::Error;
pub use indexation::Indexation;
pub use input::{Input, TreasuryInput, UtxoInput};
pub use message::{network_id_from_name, Message};
pub use milestone::{in_memory_signer, Milestone};
pub use output::{Output, SigLockedDustAllowanceOutput, SigLockedSingleOutput, TreasuryOutput};
pub use payload::Payload;
pub use receipt::{MigratedFundsEntry, Receipt};
pub use rules::{ArrayRules, ElementOrder};
pub use signature::{Ed25519Signature, Signature};
pub use transaction::{Transaction, TransactionEssence};
pub use treasury::TreasuryTransaction;
pub use types::{MessageId, MilestoneId, TransactionId};
pub use unlock::{ReferenceUnlockBlock, SignatureUnlockBlock, UnlockBlock};

/// The total token supply of the network.
pub const TOKEN_SUPPLY: u64 = 2_779_530_283_277_761;

/// Maximum serialized size of a message in bytes.
pub const MAX_MESSAGE_SIZE: usize = 32_768;

/// Largest output index a UTXO input may reference.
pub const UTXO_INDEX_MAX: u16 = 126;

/// Minimum deposit of a dust allowance output.
pub const DUST_ALLOWANCE_MIN_AMOUNT: u64 = 1_000_000;

/// Minimum number of parents a message or milestone references.
pub const PARENT_COUNT_MIN: usize = 1;

/// Maximum number of parents a message or milestone references.
pub const PARENT_COUNT_MAX: usize = 8;

/// Minimum number of inputs in a transaction essence.
pub const INPUT_COUNT_MIN: usize = 1;

/// Maximum number of inputs in a transaction essence.
pub const INPUT_COUNT_MAX: usize = 127;

/// Minimum number of outputs in a transaction essence.
pub const OUTPUT_COUNT_MIN: usize = 1;

/// Maximum number of outputs in a transaction essence.
pub const OUTPUT_COUNT_MAX: usize = 127;

/// Minimum number of public keys (and signatures) in a milestone.
pub const MILESTONE_KEY_COUNT_MIN: usize = 1;

/// Maximum number of public keys (and signatures) in a milestone.
pub const MILESTONE_KEY_COUNT_MAX: usize = 255;

/// Minimum byte length of an indexation index.
pub const INDEXATION_INDEX_MIN_LENGTH: usize = 1;

/// Maximum byte length of an indexation index.
pub const INDEXATION_INDEX_MAX_LENGTH: usize = 64;

/// Minimum number of entries in a receipt's funds list.
pub const MIGRATED_FUNDS_COUNT_MIN: usize = 1;

/// Maximum number of entries in a receipt's funds list.
pub const MIGRATED_FUNDS_COUNT_MAX: usize = 127;
