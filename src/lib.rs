//! Sharded Namespace Metadata Cluster Library
//!
//! This library crate defines the modules behind both process roles of the
//! binary (`main.rs`): metadata shards and the routing gateway.
//!
//! ## Architecture Modules
//! - **`namespace`**: Shared model. Path normalization, the entry record, the
//!   versioned dump format and the cycle-safe tree renderer.
//! - **`shard`**: One shard's authoritative slice of the namespace. A concurrent
//!   in-memory map persisted to a text checkpoint, served over plain-text HTTP.
//! - **`gateway`**: Stateless router. Hashes each full path to a shard, checks
//!   parents across every shard before writes, and merges all shard dumps into
//!   one global tree.
//! - **`error`**: The error taxonomy and its HTTP status mapping.
//! - **`config`**: CLI and environment configuration.

pub mod config;
pub mod error;
pub mod gateway;
pub mod namespace;
pub mod shard;

#[cfg(test)]
mod test_support;
