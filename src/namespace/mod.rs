//! Namespace Entry Model
//!
//! The schema shared by every shard and by the gateway's tree reconstruction.
//!
//! ## Submodules
//! - **`types`**: `NamespaceEntry` and `EntryKind`.
//! - **`path`**: Path normalization, validation and parent/segment helpers.
//! - **`dump`**: The textual dump format shards export and the gateway re-parses.
//! - **`tree`**: Cycle-safe tree rendering over any source of child entries.

pub mod dump;
pub mod path;
pub mod tree;
pub mod types;
