//! The proof-of-work score function.
//!
//! The score of a message is `2^z / len`, where `z` counts the trailing
//! zero bits of the Blake2b-256 hash of the full serialized message and
//! `len` is its byte length. A message satisfies a target when its score
//! reaches it, which reduces to a minimum trailing-zero count for a given
//! message length.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Counts the trailing zero bits of a 32-byte hash.
pub fn trailing_zeros(hash: &[u8; 32]) -> u32 {
    let mut zeros = 0;
    for byte in hash.iter().rev() {
        if *byte == 0 {
            zeros += 8;
        } else {
            zeros += byte.trailing_zeros();
            break;
        }
    }
    zeros
}

/// The proof-of-work score of a fully serialized message, nonce included.
pub fn pow_score(message_bytes: &[u8]) -> f64 {
    let hash: [u8; 32] = Blake2b256::digest(message_bytes).into();
    2f64.powi(trailing_zeros(&hash) as i32) / message_bytes.len() as f64
}

/// The smallest trailing-zero count satisfying `target_score` for a message
/// of `message_len` bytes.
pub fn required_trailing_zeros(target_score: f64, message_len: usize) -> u32 {
    (target_score * message_len as f64).log2().ceil().max(0.0) as u32
}

pub(crate) fn hash_with_nonce(pre_nonce_bytes: &[u8], nonce: u64) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(pre_nonce_bytes);
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}
