//! # tanglekit-client
//!
//! An async HTTP client for tangle node APIs, layered over the binary codec
//! of `tanglekit-core`.
//!
//! The node speaks JSON with integer `type` discriminators and hex-encoded
//! byte fields; the [`dto`] module mirrors every wire type into that form
//! and converts losslessly to and from the core entities. Raw wire bytes
//! are available through the `/raw` routes for byte-exact work.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{
    BalanceResponse, ChildrenResponse, ClientConfig, InfoResponse, MessageMetadataResponse,
    MessagesByIndexResponse, MilestoneResponse, NodeClient, OutputResponse, TipsResponse,
};
pub use dto::{MessageDto, PayloadDto};
pub use error::ClientError;
