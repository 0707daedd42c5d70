//! Shared components and utilities for mission-console crates.
//!
//! This crate holds the pieces with no mission semantics of their own:
//! bounded history retention and persistence of the console configuration
//! blob. The derivation engine lives in the `mission` crate; the serving
//! layer lives in `console`.

pub mod config_storage;
pub mod ring_buffer;

pub use config_storage::{ConfigStorage, ConfigStorageError, StoredConfig};
pub use ring_buffer::RingBuffer;
