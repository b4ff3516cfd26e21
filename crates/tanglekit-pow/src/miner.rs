//! The parallel nonce miner.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tracing::debug;

use crate::score::{hash_with_nonce, required_trailing_zeros, trailing_zeros};

/// How many candidates a worker tries between cancellation polls.
const CANCEL_POLL_INTERVAL: u64 = 1 << 14;

/// Errors produced by the miner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PowError {
    #[error("proof-of-work was cancelled")]
    Cancelled,
}

/// A cooperative cancellation signal for a mining run.
///
/// Clone the token, hand one to the miner and keep the other to cancel
/// from any thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Workers observe it at their next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Searches nonces in parallel until one meets the target score.
#[derive(Debug, Clone)]
pub struct Miner {
    num_workers: usize,
}

impl Miner {
    /// A miner with one worker per available hardware thread.
    pub fn new() -> Self {
        let num_workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { num_workers }
    }

    /// A miner with a fixed worker count (at least one).
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Mine a nonce over the serialized message bytes minus the trailing
    /// nonce field.
    ///
    /// The returned nonce, written into the message's nonce slot, makes the
    /// full serialization meet `target_score`. Worker `i` scans nonces
    /// `i, i + N, i + 2N, ...`; the first solution wins and every worker
    /// stops. Cancellation is polled cooperatively and surfaces as
    /// [`PowError::Cancelled`].
    pub fn mine(
        &self,
        pre_nonce_bytes: &[u8],
        target_score: f64,
        cancel: &CancelToken,
    ) -> Result<u64, PowError> {
        let message_len = pre_nonce_bytes.len() + 8;
        let required = required_trailing_zeros(target_score, message_len);
        debug!(
            workers = self.num_workers,
            target_score, required, "starting proof-of-work"
        );

        let done = AtomicBool::new(false);
        let winner = AtomicBool::new(false);
        let result = AtomicU64::new(0);

        thread::scope(|scope| {
            for worker in 0..self.num_workers {
                let done = &done;
                let winner = &winner;
                let result = &result;
                let step = self.num_workers as u64;
                scope.spawn(move || {
                    let mut nonce = worker as u64;
                    let mut iterations = 0u64;
                    loop {
                        if done.load(Ordering::Relaxed) {
                            return;
                        }
                        iterations += 1;
                        if iterations % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
                            return;
                        }

                        let hash = hash_with_nonce(pre_nonce_bytes, nonce);
                        if trailing_zeros(&hash) >= required {
                            // Exactly one worker publishes its nonce.
                            if winner
                                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                                .is_ok()
                            {
                                result.store(nonce, Ordering::Release);
                            }
                            done.store(true, Ordering::Release);
                            return;
                        }
                        nonce = nonce.wrapping_add(step);
                    }
                });
            }
        });

        if winner.load(Ordering::Acquire) {
            let nonce = result.load(Ordering::Acquire);
            debug!(nonce, "proof-of-work finished");
            Ok(nonce)
        } else {
            debug!("proof-of-work cancelled");
            Err(PowError::Cancelled)
        }
    }
}

impl Default for Miner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::pow_score;
    use std::time::Duration;

    #[test]
    fn test_mined_nonce_meets_target() {
        let pre_nonce = b"a short pre-nonce buffer for testing".to_vec();
        let target = 100.0;
        let miner = Miner::with_workers(2);
        let nonce = miner.mine(&pre_nonce, target, &CancelToken::new()).unwrap();

        let mut full = pre_nonce;
        full.extend_from_slice(&nonce.to_le_bytes());
        assert!(pow_score(&full) >= target);
    }

    #[test]
    fn test_zero_target_is_trivial() {
        let miner = Miner::with_workers(1);
        let nonce = miner.mine(b"anything", 0.0, &CancelToken::new()).unwrap();
        // Any nonce satisfies a zero target; the stride starts at zero.
        assert_eq!(nonce, 0);
    }

    #[test]
    fn test_cancellation_stops_the_search() {
        // A target needing ~2^60 attempts will not complete; cancellation
        // must end the run.
        let miner = Miner::with_workers(2);
        let cancel = CancelToken::new();
        let canceller = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            canceller.cancel();
        });
        let outcome = miner.mine(b"unreachable difficulty", 1e15, &cancel);
        handle.join().unwrap();
        assert_eq!(outcome, Err(PowError::Cancelled));
    }

    #[test]
    fn test_worker_count_floor() {
        assert_eq!(Miner::with_workers(0).num_workers(), 1);
    }
}
