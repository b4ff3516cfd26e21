//! # tanglekit
//!
//! A client library for a distributed ledger whose on-wire unit is the
//! Message: a binary, length-prefixed, strictly-ordered envelope carrying
//! one of several payload variants.
//!
//! The workspace splits into focused crates, re-exported here:
//!
//! - `tanglekit-core` - the pure binary codec and validation core
//! - `tanglekit-pow` - the parallel proof-of-work miner
//! - `tanglekit-client` - the async node HTTP client and JSON mirror
//!
//! ## Example
//!
//! ```
//! use tanglekit::{Indexation, MessageBuilder, MessageId, Payload};
//!
//! let indexation = Indexation::new(b"greeting".to_vec(), b"hello".to_vec()).unwrap();
//! let message = MessageBuilder::new()
//!     .network_id_from_name("example-net")
//!     .parents(vec![MessageId::from_bytes([0x11; 32])])
//!     .payload(Payload::Indexation(indexation))
//!     .finish()
//!     .unwrap();
//!
//! assert!(message.payload.is_some());
//! ```

mod builder;

pub use builder::{BuildError, MessageBuilder};

pub use tanglekit_client::{ClientConfig, ClientError, MessageDto, NodeClient, PayloadDto};
pub use tanglekit_core::*;
pub use tanglekit_pow::{pow_score, CancelToken, Miner, PowError};
