//! Error types for the tangle wire codec.

use thiserror::Error;

/// Errors produced while encoding, decoding or validating wire entities.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not enough data: needed {needed} more bytes but only {available} remain")]
    NotEnoughData { needed: usize, available: usize },

    #[error("{remaining} trailing bytes were not consumed")]
    NotAllConsumed { remaining: usize },

    #[error("length denotation {len} is invalid, at most {max} is allowed")]
    LengthInvalid { len: usize, max: usize },

    #[error("invalid bool byte {0}, must be 0 or 1")]
    InvalidBoolValue(u8),

    #[error("unknown payload type {0}")]
    UnknownPayloadType(u32),

    #[error("unknown address type {0}")]
    UnknownAddressType(u8),

    #[error("unknown input type {0}")]
    UnknownInputType(u8),

    #[error("unknown output type {0}")]
    UnknownOutputType(u8),

    #[error("unknown unlock block type {0}")]
    UnknownUnlockBlockType(u8),

    #[error("unknown signature type {0}")]
    UnknownSignatureType(u8),

    #[error("unknown transaction essence type {0}")]
    UnknownEssenceType(u8),

    #[error("type tag is {actual} but {expected} was expected")]
    TypeMismatch { expected: u32, actual: u32 },

    #[error("collection holds {actual} elements but at least {min} are required")]
    MinNotReached { min: usize, actual: usize },

    #[error("collection holds {actual} elements but at most {max} are allowed")]
    MaxExceeded { max: usize, actual: usize },

    #[error("element at index {index} violates byte-wise lexical order")]
    OrderViolation { index: usize },

    #[error("element at index {index} duplicates an earlier element")]
    UniquenessViolation { index: usize },

    #[error("output amount must not be zero")]
    AmountZero,

    #[error("amount {0} exceeds the token supply")]
    AmountExceedsSupply(u64),

    #[error("dust allowance amount {amount} is below the minimum of {min}")]
    AmountBelowDustMinimum { amount: u64, min: u64 },

    #[error("outputs sum {0} exceeds the token supply")]
    OutputsSumExceedsSupply(u64),

    #[error("referenced UTXO index {index} exceeds the maximum of {max}")]
    InvalidUtxoIndex { index: u16, max: u16 },

    #[error("unlock block validation failed: {0}")]
    UnlockBlocksValidation(String),

    #[error("milestone holds {actual} signatures but at least {min} are required")]
    MilestoneTooFewSignatures { min: usize, actual: usize },

    #[error("milestone public key and signature counts differ: {public_keys} vs {signatures}")]
    MilestonePubKeySigMismatch {
        public_keys: usize,
        signatures: usize,
    },

    #[error("milestone signature at position {pos} is invalid")]
    MilestoneInvalidSignature { pos: usize },

    #[error("milestone public key at position {pos} is not applicable")]
    MilestoneNonApplicableKey { pos: usize },

    #[error("milestone public key at position {pos} duplicates the key at position {prev}")]
    MilestoneDuplicatedKey { pos: usize, prev: usize },

    #[error("signature threshold {threshold} cannot be satisfied by {applicable} applicable keys")]
    MilestoneThresholdUnsatisfiable { threshold: usize, applicable: usize },

    #[error("no private key available for public key {0}")]
    MilestoneSignerKeyMissing(String),

    #[error("receipt must embed a treasury transaction")]
    ReceiptMissingTreasuryTransaction,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid human-readable prefix {0:?}")]
    Bech32InvalidHrp(String),

    #[error("bech32 decoding failed: {0}")]
    Bech32DecodeFailed(String),
}
