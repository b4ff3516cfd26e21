//! # tanglekit-testkit
//!
//! Shared test tooling: seeded random fixtures for every wire entity,
//! proptest strategies for property-based round-trips, and literal wire
//! vectors with known byte layouts.

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::EntityFixture;
