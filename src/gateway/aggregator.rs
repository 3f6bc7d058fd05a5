//! Global Tree Aggregator
//!
//! Rebuilds one namespace view from the dumps of every shard. The merged
//! collection is neither de-duplicated nor trusted: two shards claiming the
//! same path both appear, and parent pointers may form cycles, which the
//! shared renderer cuts off.

use crate::error::NamespaceError;
use crate::namespace::dump;
use crate::namespace::path::ROOT;
use crate::namespace::tree::{self, ChildSource};
use crate::namespace::types::NamespaceEntry;

pub struct GlobalTree {
    entries: Vec<NamespaceEntry>,
}

impl GlobalTree {
    pub fn from_entries(entries: Vec<NamespaceEntry>) -> Self {
        Self { entries }
    }

    /// Parses and concatenates dumps in the order given.
    pub fn from_dumps<'a>(dumps: impl IntoIterator<Item = &'a str>) -> Self {
        let entries = dumps.into_iter().flat_map(dump::parse).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[NamespaceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with this path. `/` falls back to a virtual root directory.
    pub fn find(&self, path: &str) -> Option<NamespaceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .cloned()
            .or_else(|| (path == ROOT).then(NamespaceEntry::virtual_root))
    }

    pub fn render(&self, root: &str, absolute: bool) -> Result<String, NamespaceError> {
        let entry = self
            .find(root)
            .ok_or_else(|| NamespaceError::NotFound(root.to_string()))?;
        if !entry.is_dir() {
            return Err(NamespaceError::NotADirectory(root.to_string()));
        }
        Ok(tree::render(self, &entry.path, absolute))
    }
}

impl ChildSource for GlobalTree {
    /// Linear scan in discovery order; an absent parent counts as `/`.
    fn children_of(&self, path: &str) -> Vec<NamespaceEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.path != path && entry.parent.as_deref().unwrap_or(ROOT) == path)
            .cloned()
            .collect()
    }
}
