//! # tanglekit-pow
//!
//! The proof-of-work miner: searches a 64-bit nonce such that the
//! Blake2b-256 hash of a serialized message (pre-nonce bytes plus the
//! candidate nonce) carries enough trailing zero bits to meet a target
//! score.
//!
//! This is the only parallel component of the library. Workers scan
//! disjoint nonce strides, publish the first solution through a
//! compare-and-swap cell and stop cooperatively on cancellation.

mod miner;
mod score;

pub use miner::{CancelToken, Miner, PowError};
pub use score::{pow_score, required_trailing_zeros, trailing_zeros};
