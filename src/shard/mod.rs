//! Shard Store Module
//!
//! One independent metadata node owning an unreplicated slice of the namespace.
//!
//! ## Core Concepts
//! - **Authority**: A shard is the sole source of truth for the paths the gateway hashes to it.
//!   Parent and emptiness checks only ever see this shard's own entries.
//! - **Durability**: Every successful mutation rewrites the full checkpoint file. A failed
//!   write is logged and the in-memory change stands.
//! - **Access**: `handlers` exposes the store over plain-text HTTP endpoints (`protocol`).

pub mod checkpoint;
pub mod handlers;
pub mod protocol;
pub mod store;

#[cfg(test)]
mod tests;
