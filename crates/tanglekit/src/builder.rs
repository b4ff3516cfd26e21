//! A fluent builder for messages, including the proof-of-work step.

use thiserror::Error;

use tanglekit_core::{network_id_from_name, Error as WireError, Message, MessageId, Mode, Payload, WireFormat};
use tanglekit_pow::{CancelToken, Miner, PowError};

/// Errors produced while building a message.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("wire format error: {0}")]
    Wire(#[from] WireError),

    #[error("proof-of-work error: {0}")]
    Pow(#[from] PowError),
}

/// Builds up a [`Message`] step by step.
///
/// `finish` validates by serializing once; `finish_with_pow` additionally
/// mines the nonce over the serialized pre-nonce bytes.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network ID this message is meant for.
    pub fn network_id(mut self, network_id: u64) -> Self {
        self.message.network_id = network_id;
        self
    }

    /// Derive the network ID from a network name.
    pub fn network_id_from_name(mut self, name: &str) -> Self {
        self.message.network_id = network_id_from_name(name);
        self
    }

    /// Set the parents. They are sorted into their wire order, so the caller
    /// need not pre-sort.
    pub fn parents(mut self, mut parents: Vec<MessageId>) -> Self {
        parents.sort_unstable();
        parents.dedup();
        self.message.parents = parents;
        self
    }

    /// Set the payload to embed.
    pub fn payload(mut self, payload: Payload) -> Self {
        self.message.payload = Some(payload);
        self
    }

    /// Set an explicit nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.message.nonce = nonce;
        self
    }

    /// Validate and return the message.
    pub fn finish(self) -> Result<Message, BuildError> {
        self.message.to_bytes(Mode::Validate)?;
        Ok(self.message)
    }

    /// Mine a nonce meeting `target_score`, then validate and return the
    /// message.
    pub fn finish_with_pow(
        mut self,
        miner: &Miner,
        target_score: f64,
        cancel: &CancelToken,
    ) -> Result<Message, BuildError> {
        self.message.nonce = 0;
        let bytes = self.message.to_bytes(Mode::Validate)?;
        // The nonce occupies the trailing eight bytes.
        let pre_nonce = &bytes[..bytes.len() - 8];
        self.message.nonce = miner.mine(pre_nonce, target_score, cancel)?;
        Ok(self.message)
    }
}
