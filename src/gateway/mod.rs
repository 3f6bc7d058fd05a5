//! Routing Gateway Module
//!
//! Stateless router in front of a fixed, ordered list of shards.
//!
//! ## Core Concepts
//! - **Routing**: `ShardRouter` hashes the full normalized path onto the shard list.
//! - **Federated parent check**: Before a write, the parent is looked up on every shard
//!   concurrently, because hashing is per path and a parent may live elsewhere.
//! - **Forwarding**: `ShardClient` makes one timed call per request, no retries; the
//!   shard's status and body are relayed as-is.
//! - **Global tree**: `aggregator` merges all shard dumps and renders one cycle-safe tree.

pub mod aggregator;
pub mod client;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod service;
