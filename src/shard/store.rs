//! Shard Store
//!
//! The authoritative table for the paths hashed to this shard.
//!
//! Reads go straight to the concurrent map. Every mutation runs under the
//! shard's write guard so the check, the map update and the checkpoint rewrite
//! form one step with respect to other mutations on the same shard.

use super::checkpoint::Checkpoint;
use crate::error::NamespaceError;
use crate::namespace::dump;
use crate::namespace::path::{self, ROOT};
use crate::namespace::tree::{self, ChildSource};
use crate::namespace::types::{EntryKind, NamespaceEntry};

use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::PathBuf;

/// How a create treats the parent of the new path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentCheck {
    /// The parent must be `/` or present in this shard.
    Local,
    /// The gateway already confirmed the parent somewhere in the cluster.
    /// A parent held locally must still be a directory.
    Verified,
}

pub struct ShardStore {
    shard_id: String,
    entries: DashMap<String, NamespaceEntry>,
    write_guard: Mutex<()>,
    checkpoint: Checkpoint,
}

impl ShardStore {
    /// Opens the store and loads whatever the checkpoint holds.
    pub fn open(shard_id: impl Into<String>, checkpoint_path: impl Into<PathBuf>) -> Self {
        let shard_id = shard_id.into();
        let checkpoint = Checkpoint::new(checkpoint_path);
        let entries = DashMap::new();
        for entry in checkpoint.load() {
            entries.insert(entry.path.clone(), entry);
        }

        tracing::info!(
            shard = %shard_id,
            file = %checkpoint.path().display(),
            "Loaded {} entries from checkpoint",
            entries.len()
        );

        Self {
            shard_id,
            entries,
            write_guard: Mutex::new(()),
            checkpoint,
        }
    }

    pub fn shard_id(&self) -> &str {
        &self.shard_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn create_directory(&self, path: &str) -> Result<NamespaceEntry, NamespaceError> {
        self.create(path, EntryKind::Directory, ParentCheck::Local)
    }

    pub fn create_file(&self, path: &str) -> Result<NamespaceEntry, NamespaceError> {
        self.create(path, EntryKind::File, ParentCheck::Local)
    }

    pub fn create(
        &self,
        path: &str,
        kind: EntryKind,
        parent_check: ParentCheck,
    ) -> Result<NamespaceEntry, NamespaceError> {
        let path = path::normalize(path);
        path::validate(&path)?;

        let _guard = self.write_guard.lock();

        if self.entries.contains_key(&path) {
            return Err(NamespaceError::AlreadyExists(path));
        }

        if let Some(parent) = path::parent_path(&path)
            && parent != ROOT
        {
            match self.entries.get(&parent).map(|entry| entry.kind) {
                Some(EntryKind::File) => return Err(NamespaceError::NotADirectory(parent)),
                Some(EntryKind::Directory) => {}
                None if parent_check == ParentCheck::Local => {
                    return Err(NamespaceError::ParentMissing(parent));
                }
                None => {}
            }
        }

        let entry = NamespaceEntry::new(&path, kind);
        self.entries.insert(path.clone(), entry.clone());
        self.persist();

        tracing::info!(shard = %self.shard_id, path = %path, kind = %kind, "Created entry");
        Ok(entry)
    }

    pub fn remove(&self, path: &str) -> Result<NamespaceEntry, NamespaceError> {
        let path = path::normalize(path);
        let _guard = self.write_guard.lock();

        let entry = self
            .entries
            .get(&path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NamespaceError::NotFound(path.clone()))?;

        if entry.is_dir() && self.has_children(&path) {
            return Err(NamespaceError::DirectoryNotEmpty(path));
        }

        self.entries.remove(&path);
        self.persist();

        tracing::info!(shard = %self.shard_id, path = %path, "Removed entry");
        Ok(entry)
    }

    pub fn stat(&self, path: &str) -> Result<NamespaceEntry, NamespaceError> {
        let path = path::normalize(path);
        self.entries
            .get(&path)
            .map(|entry| entry.value().clone())
            .ok_or(NamespaceError::NotFound(path))
    }

    /// Sorted direct-child paths of a directory.
    pub fn list_children(&self, path: &str) -> Result<Vec<String>, NamespaceError> {
        let dir = self.directory(path)?;
        Ok(self
            .children_of(&dir.path)
            .into_iter()
            .map(|child| child.path)
            .collect())
    }

    /// Recursive rendering of a directory held by this shard.
    pub fn render_tree(&self, path: &str, absolute: bool) -> Result<String, NamespaceError> {
        let dir = self.directory(path)?;
        Ok(tree::render(self, &dir.path, absolute))
    }

    pub fn dump(&self) -> String {
        dump::render(&self.shard_id, &self.snapshot())
    }

    /// All entries sorted by path.
    pub fn snapshot(&self) -> Vec<NamespaceEntry> {
        let mut entries: Vec<NamespaceEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Resolves `path` to a directory entry. A shard without an explicit `/`
    /// still answers for the root.
    fn directory(&self, path: &str) -> Result<NamespaceEntry, NamespaceError> {
        let path = path::normalize(path);
        let entry = match self.entries.get(&path) {
            Some(entry) => entry.value().clone(),
            None if path == ROOT => NamespaceEntry::virtual_root(),
            None => return Err(NamespaceError::NotFound(path)),
        };
        if !entry.is_dir() {
            return Err(NamespaceError::NotADirectory(path));
        }
        Ok(entry)
    }

    fn has_children(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.key() != path && entry.value().parent.as_deref() == Some(path))
    }

    /// Caller must hold the write guard.
    fn persist(&self) {
        if let Err(e) = self.checkpoint.save(&self.snapshot()) {
            tracing::error!(shard = %self.shard_id, "Error saving checkpoint: {:#}", e);
        }
    }
}

impl ChildSource for ShardStore {
    fn children_of(&self, path: &str) -> Vec<NamespaceEntry> {
        let mut children: Vec<NamespaceEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.key() != path && entry.value().parent.as_deref() == Some(path))
            .map(|entry| entry.value().clone())
            .collect();
        children.sort_by(|a, b| a.path.cmp(&b.path));
        children
    }
}
